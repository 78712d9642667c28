//! Resource naming: bucket, secret, issuer URL and local file names.

use rand::Rng;
use rosa_oidc_core::{Error, Result};

/// Length of the random label appended to every bucket name.
pub const RANDOM_LABEL_LENGTH: usize = 4;

/// Maximum length of the user prefix, in characters.
pub const MAX_PREFIX_LENGTH: usize = 15;

/// Fixed component of every bucket name.
pub const CONFIGURATION_PREFIX: &str = "oidc";

/// Prefix of the secret (and local file) holding the private key.
pub const PRIVATE_KEY_SECRET_PREFIX: &str = "rosa-private-key";

/// Region that rejects an explicit `LocationConstraint` on bucket creation.
pub const DEFAULT_REGION: &str = "us-east-1";

const LABEL_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

const MIN_BUCKET_NAME_LENGTH: usize = 3;
const MAX_BUCKET_NAME_LENGTH: usize = 63;

/// A short random label of lowercase letters and digits.
pub fn random_label(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| LABEL_CHARSET[rng.gen_range(0..LABEL_CHARSET.len())] as char)
        .collect()
}

/// `[prefix-]oidc-<label>`.
pub fn bucket_name(prefix: &str, label: &str) -> String {
    if prefix.is_empty() {
        format!("{}-{}", CONFIGURATION_PREFIX, label)
    } else {
        format!("{}-{}-{}", prefix, CONFIGURATION_PREFIX, label)
    }
}

/// Check a bucket name before anything is created remotely.
///
/// Stricter than S3 itself: names must start with a letter and may not
/// contain dots.
pub fn validate_bucket_name(name: &str) -> Result<()> {
    let invalid = || Err(Error::InvalidBucketName(name.to_string()));

    if name.len() < MIN_BUCKET_NAME_LENGTH || name.len() > MAX_BUCKET_NAME_LENGTH {
        return invalid();
    }
    if name.starts_with('.') || name.ends_with('.') {
        return invalid();
    }
    if name.starts_with("xn--") || name.ends_with("-s3alias") {
        return invalid();
    }
    if name.contains("..") || name.contains('.') {
        return invalid();
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return invalid();
    }
    if !name.starts_with(|c: char| c.is_ascii_lowercase()) || name.ends_with('-') {
        return invalid();
    }
    Ok(())
}

/// Regional virtual-hosted-style URL of the bucket, used as the issuer URL.
pub fn issuer_url(bucket_name: &str, region: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com", bucket_name, region)
}

pub fn private_key_secret_name(bucket_name: &str) -> String {
    format!("{}-{}", PRIVATE_KEY_SECRET_PREFIX, bucket_name)
}

pub fn private_key_filename(secret_name: &str) -> String {
    format!("{}.key", secret_name)
}

pub fn discovery_document_filename(bucket_name: &str) -> String {
    format!("discovery-document-{}.json", bucket_name)
}

pub fn jwks_filename(bucket_name: &str) -> String {
    format!("jwks-{}.json", bucket_name)
}

/// Trim surrounding spaces and tabs and enforce the length limit.
pub fn normalize_prefix(prefix: &str) -> Result<String> {
    let trimmed = prefix.trim_matches(|c| c == ' ' || c == '\t');
    if trimmed.chars().count() > MAX_PREFIX_LENGTH {
        return Err(Error::InvalidPrefix(format!(
            "length of prefix is limited to {} characters",
            MAX_PREFIX_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_bucket_names() {
        for name in ["ab.", ".ab", "xn--abc", "abc-s3alias", "a..b", "a.b", "foo.oidc-ab12"] {
            let err = validate_bucket_name(name).unwrap_err();
            assert!(
                matches!(err, Error::InvalidBucketName(ref n) if n == name),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_rejects_bad_charset_and_length() {
        assert!(validate_bucket_name("a").is_err());
        assert!(validate_bucket_name("").is_err());
        assert!(validate_bucket_name("Foo-oidc-ab12").is_err());
        assert!(validate_bucket_name("foo_oidc-ab12").is_err());
        assert!(validate_bucket_name("my prefix-oidc-ab12").is_err());
        assert!(validate_bucket_name("-oidc-ab12").is_err());
        assert!(validate_bucket_name("1foo-oidc-ab12").is_err());
        assert!(validate_bucket_name("oidc-ab1-").is_err());
        assert!(validate_bucket_name(&"a".repeat(64)).is_err());
    }

    #[test]
    fn test_accepts_valid_bucket_names() {
        assert!(validate_bucket_name("oidc-ab12").is_ok());
        assert!(validate_bucket_name("foo-oidc-0z9y").is_ok());
        assert!(validate_bucket_name("abc").is_ok());
        assert!(validate_bucket_name("ab").is_err());
    }

    #[test]
    fn test_random_label() {
        let label = random_label(RANDOM_LABEL_LENGTH);
        assert_eq!(label.len(), 4);
        assert!(label.bytes().all(|b| LABEL_CHARSET.contains(&b)));
    }

    #[test]
    fn test_derived_names() {
        let bucket = bucket_name("foo", "ab12");
        assert_eq!(bucket, "foo-oidc-ab12");
        assert_eq!(bucket_name("", "ab12"), "oidc-ab12");
        assert_eq!(
            issuer_url(&bucket, "us-east-1"),
            "https://foo-oidc-ab12.s3.us-east-1.amazonaws.com"
        );

        let secret = private_key_secret_name(&bucket);
        assert_eq!(secret, "rosa-private-key-foo-oidc-ab12");
        assert_eq!(private_key_filename(&secret), "rosa-private-key-foo-oidc-ab12.key");
        assert_eq!(
            discovery_document_filename(&bucket),
            "discovery-document-foo-oidc-ab12.json"
        );
        assert_eq!(jwks_filename(&bucket), "jwks-foo-oidc-ab12.json");
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("  foo\t").unwrap(), "foo");
        assert_eq!(normalize_prefix("").unwrap(), "");
        assert!(normalize_prefix("abcdefghijklmno").is_ok());
        let err = normalize_prefix("abcdefghijklmnop").unwrap_err();
        assert!(err.is_validation());
    }
}
