use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Domain separator mixed into text seeds so they never alias plain digests.
const SEED_CONTEXT: &str = "jsveil 2024 identifier-names seed";

/// Compute the BLAKE3 hash of a file, returning the hex-encoded digest.
///
/// Streams the file content to minimize memory usage.
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn blake3_file(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}

/// Derive a 64-bit RNG seed from arbitrary seed text.
///
/// The same text always yields the same seed, so `--seed my-build` is as
/// reproducible as a numeric seed.
#[must_use]
pub fn seed_from_text(text: &str) -> u64 {
    let mut hasher = blake3::Hasher::new_derive_key(SEED_CONTEXT);
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();

    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(seed_bytes)
}
