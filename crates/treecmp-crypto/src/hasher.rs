use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use treecmp_types::ContentDigest;

use crate::error::{ChecksumError, ChecksumResult};

/// Size of the read buffer used for streaming digests.
const CHUNK_SIZE: usize = 64 * 1024;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag that is prepended to every hash
/// computation, so digests produced for one purpose never collide with
/// digests of identical bytes produced for another.
#[derive(Clone, Copy, Debug)]
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for file content compared across trees.
    pub const FILE: Self = Self {
        domain: "treecmp-file-v1",
    };

    fn start(&self) -> blake3::Hasher {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher
    }

    /// Hash everything `reader` yields, in fixed-size chunks.
    pub fn digest_reader<R: Read>(&self, mut reader: R) -> io::Result<ContentDigest> {
        let mut hasher = self.start();
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buf[..n]);
        }
        Ok(ContentDigest::from_hash(*hasher.finalize().as_bytes()))
    }

    /// Hash the content of the file at `path`.
    ///
    /// The file is opened read-only and streamed; failures are returned as
    /// [`ChecksumError::Io`] and never retried.
    pub fn digest_file(&self, path: &Path) -> ChecksumResult<ContentDigest> {
        let io_err = |source| ChecksumError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        self.digest_reader(file).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn digest_is_stable_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "a.txt", b"hello\n");

        let d1 = ContentHasher::FILE.digest_file(&path).unwrap();
        let d2 = ContentHasher::FILE.digest_file(&path).unwrap();
        assert_eq!(d1, d2);
    }

    #[test]
    fn file_digest_matches_buffer_hash() {
        let dir = tempfile::tempdir().unwrap();
        let content = b"some content spanning one chunk";
        let path = write_temp(&dir, "a.bin", content);

        let from_file = ContentHasher::FILE.digest_file(&path).unwrap();
        let from_buffer = ContentHasher::FILE.digest_reader(&content[..]).unwrap();
        assert_eq!(from_file, from_buffer);
    }

    #[test]
    fn streaming_matches_across_chunk_boundaries() {
        let content: Vec<u8> = (0..(CHUNK_SIZE * 3 + 17)).map(|i| (i % 251) as u8).collect();
        let streamed = ContentHasher::FILE.digest_reader(&content[..]).unwrap();

        let mut whole = blake3::Hasher::new();
        whole.update(b"treecmp-file-v1:");
        whole.update(&content);
        assert_eq!(streamed, ContentDigest::from_hash(*whole.finalize().as_bytes()));
    }

    #[test]
    fn one_byte_difference_changes_digest() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_temp(&dir, "a.txt", b"hello world\n");
        let b = write_temp(&dir, "b.txt", b"hello world!");

        let da = ContentHasher::FILE.digest_file(&a).unwrap();
        let db = ContentHasher::FILE.digest_file(&b).unwrap();
        assert_ne!(da, db);
    }

    #[test]
    fn identical_content_in_different_files_is_equal() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_temp(&dir, "a.txt", b"same\n");
        let b = write_temp(&dir, "b.txt", b"same\n");

        assert_eq!(
            ContentHasher::FILE.digest_file(&a).unwrap(),
            ContentHasher::FILE.digest_file(&b).unwrap()
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let err = ContentHasher::FILE.digest_file(&missing).unwrap_err();
        match err {
            ChecksumError::Io { path, source } => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
        }
    }

    #[test]
    fn digest_is_domain_separated() {
        let tagged = ContentHasher::FILE.digest_reader(&b"data"[..]).unwrap();
        assert_ne!(tagged, ContentDigest::from_hash(*blake3::hash(b"data").as_bytes()));
    }
}
