//! Process-wide immutable key material.
//!
//! Both services load their key exactly once at startup and hold it for the
//! process lifetime. Nothing mutates a key after load, so the values are
//! shared by reference without locking. Rotating a key is a redeploy.

use anyhow::{Context, Result};
use jsonwebtoken::{DecodingKey, EncodingKey};

/// Load the RSA private key the exchanger signs internal tokens with.
pub fn load_signing_key(path: &str) -> Result<EncodingKey> {
    let pem = std::fs::read(path).with_context(|| format!("Cannot read private key '{}'", path))?;
    EncodingKey::from_rsa_pem(&pem).with_context(|| format!("Invalid RSA private key '{}'", path))
}

/// Load the RSA public key the aggregator verifies internal tokens against.
pub fn load_verification_key(path: &str) -> Result<DecodingKey> {
    let pem = std::fs::read(path).with_context(|| format!("Cannot read public key '{}'", path))?;
    DecodingKey::from_rsa_pem(&pem).with_context(|| format!("Invalid RSA public key '{}'", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn signing_key_requires_valid_pem() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a pem at all").unwrap();

        let err = load_signing_key(file.path().to_str().unwrap());
        assert!(err.is_err());
    }

    #[test]
    fn missing_key_file_is_an_error() {
        // DecodingKey has no Debug impl, so take the error side directly.
        let err = load_verification_key("/nonexistent/public_key.pem")
            .err()
            .unwrap();
        let msg = format!("{:#}", err);
        assert!(msg.contains("Cannot read public key"));
    }
}
