//! Query text normalization

/// Canonicalizes raw query text into the form used for hashing and embedding.
///
/// Trims surrounding whitespace and lowercases. Two inputs that normalize to the
/// same string are the same cache subject.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
