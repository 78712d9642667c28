//! Signing key generation.

use rand::rngs::OsRng;
use rosa_oidc_core::{Error, Result};
use rsa::RsaPrivateKey;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use std::fmt;
use tracing::debug;

/// RSA modulus size. Fixed; service-account issuers must not go below it.
pub const KEY_BITS: usize = 4096;

/// PEM-encoded signing key pair.
#[derive(Clone)]
pub struct KeyPair {
    /// PKCS#1 `RSA PRIVATE KEY` block.
    pub private_key_pem: String,
    /// PKIX `PUBLIC KEY` block.
    pub public_key_pem: String,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key_pem", &"***")
            .field("public_key_pem", &self.public_key_pem)
            .finish()
    }
}

/// Generate a fresh 4096-bit RSA key pair.
pub fn generate_key_pair() -> Result<KeyPair> {
    debug!(bits = KEY_BITS, "Generating RSA key pair");

    let private_key = RsaPrivateKey::new(&mut OsRng, KEY_BITS)
        .map_err(|e| Error::KeyGeneration(format!("failed to generate private key: {}", e)))?;

    let private_key_pem = private_key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| Error::KeyGeneration(format!("failed to encode private key: {}", e)))?;

    let public_key_pem = private_key
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| {
            Error::KeyGeneration(format!("failed to generate public key from private: {}", e))
        })?;

    Ok(KeyPair {
        private_key_pem: private_key_pem.to_string(),
        public_key_pem,
    })
}
