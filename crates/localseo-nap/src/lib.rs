//! NAP (name, address, phone) normalization and fuzzy matching.
//!
//! Everything in this crate is pure and synchronous: no I/O, no shared
//! mutable state, safe to call from any number of tasks at once.

pub mod address;
pub mod levenshtein;
pub mod matcher;
pub mod normalize;
pub mod types;

pub use address::parse_address;
pub use levenshtein::{levenshtein_distance, levenshtein_similarity};
pub use matcher::{
    compare_nap, MatchWeights, NapMatcher, ADDRESS_WEIGHT, NAME_SIMILARITY_THRESHOLD,
    NAME_WEIGHT, PHONE_WEIGHT,
};
pub use normalize::{normalize_address, normalize_name, normalize_nap, normalize_phone};
pub use types::{MatchDetails, MatchResult, NapRecord, NormalizedNap, ParsedAddress};
