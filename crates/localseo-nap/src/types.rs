//! Domain types for NAP comparison.
//!
//! All of these are transient values: built for one comparison, handed back
//! to the caller, never mutated afterwards.

use serde::{Deserialize, Serialize};

/// A business identity as claimed by the owner or observed on a listing.
///
/// `address` loosely follows `"<street>, <city>, <STATE> <ZIP>"`. No field is
/// validated; missing pieces degrade to empty strings during normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NapRecord {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl NapRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>, phone: Option<&str>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.map(str::to_owned),
        }
    }
}

/// Comparable form of a [`NapRecord`].
///
/// `name`, `address` and `street` contain only `[a-z0-9]`; `phone` and `zip`
/// contain only digits. Recomputed on every comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedNap {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Comma-separated components of a raw address, trimmed but otherwise
/// untouched. Absent segments are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Outcome of comparing a source record against a target listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub name_match: bool,
    pub address_match: bool,
    pub phone_match: bool,
    /// `name_match && address_match`. Phone only corroborates.
    pub overall_match: bool,
    /// 0..=100.
    pub confidence: u8,
    pub details: MatchDetails,
}

/// Per-field scores, each in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchDetails {
    pub name_score: f64,
    pub address_score: f64,
    pub phone_score: f64,
}
