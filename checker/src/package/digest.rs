//! MD5 content hashing for package verification.
//!
//! The release manifest records MD5 digests as 32 lowercase hexadecimal
//! characters, matching the output of `md5sum --binary`.

use md5::{Digest, Md5};
use std::io::Read;

/// Compute the lowercase hex MD5 digest of everything `reader` yields.
///
/// The input is hashed in fixed-size chunks so large packages are never
/// held in memory at once.
///
/// # Errors
///
/// Returns the I/O error raised while reading.
///
/// # Examples
///
/// ```
/// use release_checker::package::digest::compute_md5;
///
/// let digest = compute_md5(&b""[..]).expect("in-memory read");
/// assert_eq!(digest, "d41d8cd98f00b204e9800998ecf8427e");
/// ```
pub fn compute_md5<R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(buffer.get(..bytes_read).unwrap_or_default());
    }
    Ok(format!("{:x}", hasher.finalize()))
}
