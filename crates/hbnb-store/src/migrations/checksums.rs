//! Migration checksums
//!
//! SHA256 over the migration SQL with line endings normalised, so a CRLF
//! checkout of the same file is not reported as tampering.

use sha2::{Digest, Sha256};

/// Hex SHA256 of `sql`, ignoring `\r\n` vs `\n`
pub fn compute_checksum(sql: &str) -> String {
    let mut hasher = Sha256::new();
    for line in sql.lines() {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}
