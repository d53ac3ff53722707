//! Cache key generation

use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Exact-match key for a normalized query (lowercase hex digest)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Wraps an already computed digest
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trait for deriving exact-match keys from normalized queries
pub trait QueryKeyGenerator: Send + Sync + Debug {
    /// Generates the key for a normalized query
    fn generate(&self, normalized: &str) -> CacheKey;
}

/// SHA-256 based key generator producing 64 hex chars
#[derive(Debug, Clone, Default)]
pub struct Sha256KeyGenerator;

impl Sha256KeyGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl QueryKeyGenerator for Sha256KeyGenerator {
    fn generate(&self, normalized: &str) -> CacheKey {
        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        CacheKey(hex::encode(hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_fixed_length_hex() {
        let key = Sha256KeyGenerator::new().generate("what is 2+2?");

        assert_eq!(key.as_str().len(), 64);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_key_is_deterministic() {
        let generator = Sha256KeyGenerator::new();
        assert_eq!(generator.generate("hello"), generator.generate("hello"));
    }

    #[test]
    fn test_known_digest() {
        let key = Sha256KeyGenerator::new().generate("");
        assert_eq!(
            key.as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_different_queries_different_keys() {
        let generator = Sha256KeyGenerator::new();
        assert_ne!(generator.generate("hello"), generator.generate("hello!"));
    }

    #[test]
    fn test_key_serializes_as_plain_string() {
        let key = CacheKey::new("abc123");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"abc123\"");
        assert_eq!(key.to_string(), "abc123");
    }
}
