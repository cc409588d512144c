//! Wire encoding of passwords.

use std::fmt::Write;

use rescli_common::types::PasswordTransport;
use sha2::{Digest, Sha256};

/// Encodes `password` for transmission under `policy`.
///
/// The encoding is deterministic: the same password always yields the same
/// wire value, for login and sign-up alike.
#[must_use]
pub fn encode(policy: PasswordTransport, password: &str) -> String {
    match policy {
        PasswordTransport::Plain => password.to_string(),
        PasswordTransport::Sha256 => {
            let digest = Sha256::digest(password.as_bytes());
            digest.iter().fold(String::with_capacity(64), |mut hex, byte| {
                let _ = write!(hex, "{byte:02x}");
                hex
            })
        }
    }
}
