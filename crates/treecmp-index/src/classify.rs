//! Text/Binary content classification.
//!
//! The indexer treats the classifier as an opaque oracle. Results are only
//! expected to be stable within one classifier implementation, so nothing
//! downstream may assume two classifiers agree.

use std::io::{self, Read};

use treecmp_types::ContentKind;

/// Classifies a file's byte stream as text or binary.
pub trait ContentClassifier: Send + Sync {
    /// Read as much of `reader` as needed and classify it.
    fn classify(&self, reader: &mut dyn Read) -> io::Result<ContentKind>;
}

/// Heuristic byte sniffer.
///
/// Looks at a bounded prefix of the content:
///
/// 1. an empty sample is text;
/// 2. a Unicode byte-order mark means text;
/// 3. any NUL byte means binary;
/// 4. more than one suspicious control byte in 32 means binary;
/// 5. everything else (UTF-8 and legacy 8-bit encodings) is text.
#[derive(Clone, Debug)]
pub struct SniffClassifier {
    sample_len: usize,
}

impl SniffClassifier {
    /// Default number of leading bytes inspected.
    pub const DEFAULT_SAMPLE_LEN: usize = 8000;

    /// Create a classifier that inspects at most `sample_len` bytes.
    pub fn new(sample_len: usize) -> Self {
        Self {
            sample_len: sample_len.max(1),
        }
    }

    /// Classify an in-memory sample.
    pub fn sniff(sample: &[u8]) -> ContentKind {
        if sample.is_empty() || has_bom(sample) {
            return ContentKind::Text;
        }
        if sample.contains(&0) {
            return ContentKind::Binary;
        }

        let suspicious = sample.iter().filter(|&&b| is_suspicious_control(b)).count();
        if suspicious * 32 > sample.len() {
            ContentKind::Binary
        } else {
            ContentKind::Text
        }
    }
}

impl Default for SniffClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SAMPLE_LEN)
    }
}

impl ContentClassifier for SniffClassifier {
    fn classify(&self, reader: &mut dyn Read) -> io::Result<ContentKind> {
        let mut sample = Vec::with_capacity(self.sample_len.min(64 * 1024));
        Read::take(reader, self.sample_len as u64).read_to_end(&mut sample)?;
        Ok(Self::sniff(&sample))
    }
}

fn has_bom(sample: &[u8]) -> bool {
    sample.starts_with(&[0xEF, 0xBB, 0xBF])
        || sample.starts_with(&[0xFF, 0xFE])
        || sample.starts_with(&[0xFE, 0xFF])
        || sample.starts_with(&[0x00, 0x00, 0xFE, 0xFF])
}

/// C0 controls and DEL, except the ones that show up in ordinary text.
fn is_suspicious_control(b: u8) -> bool {
    match b {
        b'\t' | b'\n' | b'\r' | 0x0C | 0x1B => false,
        0x00..=0x1F | 0x7F => true,
        _ => false,
    }
}
