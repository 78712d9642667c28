//! Signing material for rosa-oidc.
//!
//! Generates the issuer's RSA key pair and renders the two public artifacts
//! a service-account token verifier needs: the OIDC discovery document and
//! the JSON Web Key Set.

pub mod jwks;
pub mod keys;
pub mod oidc;

pub use jwks::{Jwk, Jwks, build_jwks, key_id_from_public_key};
pub use keys::{KeyPair, generate_key_pair};
pub use oidc::{OidcDiscoveryDocument, build_discovery_document};
