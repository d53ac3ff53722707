//! Query canonicalization, exact-match key derivation and outcomes

mod key;
mod normalize;
mod outcome;

pub use key::{CacheKey, QueryKeyGenerator, Sha256KeyGenerator};
pub use normalize::normalize;
pub use outcome::{MatchKind, QueryOutcome};
