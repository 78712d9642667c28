//! JSON Web Key Set generation.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rosa_oidc_core::{Error, Result};
use rsa::RsaPublicKey;
use rsa::pkcs8::der::{Decode, Document};
use rsa::pkcs8::spki::SubjectPublicKeyInfoRef;
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey, ObjectIdentifier};
use rsa::traits::PublicKeyParts;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Signature algorithm advertised for every key.
pub const SIGNING_ALGORITHM: &str = "RS256";

/// `rsaEncryption` (PKCS #1).
const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// JSON Web Key for an RSA signing key.
///
/// Field order is the serialization order: `use`, `kty`, `kid`, `alg`, `n`, `e`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    #[serde(rename = "use")]
    pub key_use: String,
    pub kty: String,
    pub kid: String,
    pub alg: String,
    pub n: String,
    pub e: String,
}

impl Jwk {
    /// Build the signing JWK for an RSA public key.
    pub fn from_rsa_public_key(public_key: &RsaPublicKey) -> Result<Self> {
        Ok(Self {
            key_use: "sig".to_string(),
            kty: "RSA".to_string(),
            kid: key_id_from_public_key(public_key)?,
            alg: SIGNING_ALGORITHM.to_string(),
            n: URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be()),
            e: URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be()),
        })
    }
}

/// JSON Web Key Set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// Build the JWKS document for a PEM-encoded PKIX public key.
///
/// Output is pretty-printed with 4-space indentation so that users of the
/// manual flow can read and diff the file before uploading it.
pub fn build_jwks(public_key_pem: &str) -> Result<Vec<u8>> {
    let public_key = parse_public_key(public_key_pem)?;
    let jwks = Jwks {
        keys: vec![Jwk::from_rsa_public_key(&public_key)?],
    };
    to_indented_json(&jwks, b"    ")
}

/// Derive a key ID non-reversibly from a public key.
///
/// `base64url(sha256(DER(PKIX(key))))` without padding, the same derivation
/// the Kubernetes service-account token issuer uses, so verifiers can find
/// the key independently.
pub fn key_id_from_public_key(public_key: &RsaPublicKey) -> Result<String> {
    let der = public_key.to_public_key_der().map_err(|e| {
        Error::MalformedKey(format!("Failed to serialize public key to DER format: {}", e))
    })?;
    let digest = Sha256::digest(der.as_bytes());
    Ok(URL_SAFE_NO_PAD.encode(digest))
}

fn parse_public_key(public_key_pem: &str) -> Result<RsaPublicKey> {
    let (_label, document) = Document::from_pem(public_key_pem)
        .map_err(|e| Error::MalformedKey(format!("Failed to decode PEM file: {}", e)))?;

    let spki = SubjectPublicKeyInfoRef::from_der(document.as_bytes())
        .map_err(|e| Error::MalformedKey(format!("Failed to parse key content: {}", e)))?;
    if spki.algorithm.oid != RSA_ENCRYPTION {
        return Err(Error::UnsupportedKeyType(format!(
            "Public key is not of type RSA (algorithm {})",
            spki.algorithm.oid
        )));
    }

    RsaPublicKey::from_public_key_der(document.as_bytes())
        .map_err(|e| Error::MalformedKey(format!("Failed to parse key content: {}", e)))
}

pub(crate) fn to_indented_json<T: Serialize>(value: &T, indent: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}
