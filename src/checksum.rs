use sha2::{Digest, Sha256};

/// Hex SHA-256 digest of one frame's raw bytes.
///
/// Debug aid for comparing a stream's frames against another tool's output
/// without storing the frames themselves.
pub fn frame_digest(bytes: &[u8]) -> String {
    let mut sha256 = Sha256::new();
    sha256.update(bytes);

    data_encoding::HEXLOWER.encode(&sha256.finalize())
}
