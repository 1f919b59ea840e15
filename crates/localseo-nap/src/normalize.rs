//! Field normalizers that turn raw NAP strings into comparable tokens.
//!
//! Every function here is total and deterministic. Output never depends on
//! earlier calls.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::address::parse_address;
use crate::types::{NapRecord, NormalizedNap};

static ENTITY_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:llc|inc|incorporated|ltd|limited|co|company)\b\.?")
        .expect("valid entity suffix regex")
});
static ARTICLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:the|a|an)\b").expect("valid article regex"));
static ABBREVIATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    let words = ABBREVIATIONS
        .iter()
        .map(|(long, _)| *long)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{words})\b")).expect("valid abbreviation regex")
});
// A designator word may carry its own `#` ("suite #310"); a bare `#` is a
// designator on its own.
static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\b(?:ste|suite|apt|apartment|unit)\b\.?\s*#?|#)\s*[a-z0-9-]+")
        .expect("valid unit regex")
});

/// Street, direction and unit-type spellings mapped to their USPS-style
/// abbreviation. `#` is not a word character, so `UNIT_RE` treats it as a
/// designator directly.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("street", "st"),
    ("avenue", "ave"),
    ("boulevard", "blvd"),
    ("road", "rd"),
    ("drive", "dr"),
    ("lane", "ln"),
    ("court", "ct"),
    ("circle", "cir"),
    ("place", "pl"),
    ("suite", "ste"),
    ("apartment", "apt"),
    ("building", "bldg"),
    ("floor", "fl"),
    ("north", "n"),
    ("south", "s"),
    ("east", "e"),
    ("west", "w"),
];

/// Normalizes a business name to a single lowercase alphanumeric token.
///
/// Drops legal-entity suffixes (`llc`, `inc`, `co`, ...) and the articles
/// `the`/`a`/`an` as whole words, then removes everything outside
/// `[a-z0-9]`. A name made only of those words normalizes to `""`.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let without_suffixes = ENTITY_SUFFIX_RE.replace_all(&lower, " ");
    let without_articles = ARTICLE_RE.replace_all(&without_suffixes, " ");
    keep_alphanumeric(&without_articles)
}

/// Normalizes an address (or one component of it) for comparison.
///
/// Applies the abbreviation table, strips unit/suite designators together
/// with their number, then removes everything outside `[a-z0-9]`. Suite
/// numbers are treated as noise: the building is the unit of identity.
#[must_use]
pub fn normalize_address(address: &str) -> String {
    let lower = address.to_lowercase();
    let abbreviated = ABBREVIATION_RE.replace_all(&lower, |caps: &Captures<'_>| {
        let word = &caps[0];
        ABBREVIATIONS
            .iter()
            .find(|(long, _)| long.eq_ignore_ascii_case(word))
            .map_or_else(|| word.to_string(), |(_, short)| (*short).to_string())
    });
    let without_units = UNIT_RE.replace_all(&abbreviated, " ");
    keep_alphanumeric(&without_units)
}

/// Reduces a phone number to at most 10 digits.
///
/// An 11-digit number with a leading US country code `1` loses it; anything
/// still longer than 10 digits is cut to the first 10 (drops extensions).
/// No check that the digits form a dialable number.
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    let mut digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 11 && digits.starts_with('1') {
        digits.remove(0);
    }
    digits.truncate(10);
    digits
}

/// Normalizes every field of `record`, splitting the address into its
/// components on the way.
#[must_use]
pub fn normalize_nap(record: &NapRecord) -> NormalizedNap {
    let parsed = parse_address(&record.address);

    NormalizedNap {
        name: normalize_name(&record.name),
        address: normalize_address(&record.address),
        phone: record
            .phone
            .as_deref()
            .map(normalize_phone)
            .unwrap_or_default(),
        street: normalize_address(&parsed.street),
        city: keep_alphanumeric(&parsed.city.to_lowercase()),
        state: keep_alphanumeric(&parsed.state.to_lowercase()),
        zip: parsed.zip.chars().filter(char::is_ascii_digit).collect(),
    }
}

fn keep_alphanumeric(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
