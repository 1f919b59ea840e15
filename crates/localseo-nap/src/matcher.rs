//! NAP comparison: per-field match decisions plus a weighted confidence.
//!
//! Weighting policy lives in [`MatchWeights`] so it can be tuned without
//! touching the comparison rules. [`NapMatcher`] carries only that policy;
//! it is `Copy` and can be built once and shared by every caller.

use serde::{Deserialize, Serialize};

use crate::levenshtein::levenshtein_similarity;
use crate::normalize::normalize_nap;
use crate::types::{MatchDetails, MatchResult, NapRecord, NormalizedNap};

/// Confidence points awarded when the names match.
pub const NAME_WEIGHT: u8 = 40;
/// Confidence points awarded when street, city and ZIP agree.
pub const ADDRESS_WEIGHT: u8 = 50;
/// Confidence points awarded when both sides carry the same phone number.
pub const PHONE_WEIGHT: u8 = 10;
/// Names whose Levenshtein similarity exceeds this count as a match even
/// when neither contains the other.
pub const NAME_SIMILARITY_THRESHOLD: f64 = 0.8;

const MAX_CONFIDENCE: u16 = 100;

/// Points added to the confidence score per matching field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub name: u8,
    pub address: u8,
    pub phone: u8,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            name: NAME_WEIGHT,
            address: ADDRESS_WEIGHT,
            phone: PHONE_WEIGHT,
        }
    }
}

/// Stateless comparator for NAP records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NapMatcher {
    weights: MatchWeights,
    name_similarity_threshold: f64,
}

impl Default for NapMatcher {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            name_similarity_threshold: NAME_SIMILARITY_THRESHOLD,
        }
    }
}

impl NapMatcher {
    #[must_use]
    pub fn new(weights: MatchWeights, name_similarity_threshold: f64) -> Self {
        Self {
            weights,
            name_similarity_threshold,
        }
    }

    #[must_use]
    pub fn weights(&self) -> MatchWeights {
        self.weights
    }

    #[must_use]
    pub fn name_similarity_threshold(&self) -> f64 {
        self.name_similarity_threshold
    }

    /// Compares a trusted `source` record against a `target` observed on an
    /// external listing. Both are normalized first.
    #[must_use]
    pub fn compare(&self, source: &NapRecord, target: &NapRecord) -> MatchResult {
        self.compare_normalized(&normalize_nap(source), &normalize_nap(target))
    }

    /// Compares two already-normalized records.
    ///
    /// Rules:
    /// - name: either contains the other, or similarity above the
    ///   threshold. An empty normalized name never matches anything.
    /// - address: street equal or containing the other, city equal, and ZIP
    ///   equal unless either ZIP is missing.
    /// - phone: equal unless either side is missing.
    /// - overall: name and address. Phone only adds confidence, and only
    ///   when both sides actually have one.
    #[must_use]
    pub fn compare_normalized(
        &self,
        source: &NormalizedNap,
        target: &NormalizedNap,
    ) -> MatchResult {
        let names_comparable = !source.name.is_empty() && !target.name.is_empty();
        let name_similarity = levenshtein_similarity(&source.name, &target.name);
        let name_match = names_comparable
            && (either_contains(&source.name, &target.name)
                || name_similarity > self.name_similarity_threshold);

        let street_match = source.street == target.street
            || (!source.street.is_empty()
                && !target.street.is_empty()
                && either_contains(&source.street, &target.street));
        let city_match = source.city == target.city;
        let zip_match =
            source.zip == target.zip || source.zip.is_empty() || target.zip.is_empty();
        let address_match = street_match && city_match && zip_match;

        let phones_present = !source.phone.is_empty() && !target.phone.is_empty();
        let phone_match = source.phone == target.phone || !phones_present;

        let mut confidence = 0u16;
        if name_match {
            confidence += u16::from(self.weights.name);
        }
        if address_match {
            confidence += u16::from(self.weights.address);
        }
        if phone_match && phones_present {
            confidence += u16::from(self.weights.phone);
        }
        let confidence = u8::try_from(confidence.min(MAX_CONFIDENCE)).unwrap_or(u8::MAX);

        let name_score = if name_match {
            100.0
        } else if names_comparable {
            name_similarity * 100.0
        } else {
            0.0
        };
        let address_score = if address_match {
            100.0
        } else {
            50.0 * f64::from(u8::from(street_match)) + 50.0 * f64::from(u8::from(city_match))
        };
        let phone_score = if phone_match { 100.0 } else { 0.0 };

        MatchResult {
            name_match,
            address_match,
            phone_match,
            overall_match: name_match && address_match,
            confidence,
            details: MatchDetails {
                name_score,
                address_score,
                phone_score,
            },
        }
    }
}

/// Compares two records with the default weights and threshold.
///
/// A record compared with itself matches overall only when its name
/// normalizes to something non-empty: a name such as "The LLC" reduces to
/// `""` and never matches, not even itself.
#[must_use]
pub fn compare_nap(source: &NapRecord, target: &NapRecord) -> MatchResult {
    NapMatcher::default().compare(source, target)
}

fn either_contains(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
