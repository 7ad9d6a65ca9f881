use std::fmt;

/// Fixed-length checksum of a file's byte content.
///
/// Two files are considered equal by the reconciliation engine exactly when
/// their digests are equal. Digests are produced by the checksum service in
/// `treecmp-crypto`; this type only carries them.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Wrap a finished 32-byte hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContentDigest(")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        f.write_str("..)")
    }
}
