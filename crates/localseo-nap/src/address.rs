//! Splits a loose US address into street, city, state and ZIP.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ParsedAddress;

static STATE_ZIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z]{2})\b\s*(\d{5}(?:-\d{4})?)?").expect("valid state/zip regex")
});
static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{5}(?:-\d{4})?)\b").expect("valid zip regex"));

/// Parses `"<street>, <city>, <STATE> <ZIP>"`.
///
/// Segments are split on commas and trimmed. The third segment is matched
/// against a two-letter state code optionally followed by a 5 or 5+4 ZIP.
/// When the state code is spelled out (`"Texas 78759"`) the ZIP is still
/// picked up on its own.
///
/// Never fails: addresses that don't follow the convention simply yield
/// empty components.
#[must_use]
pub fn parse_address(address: &str) -> ParsedAddress {
    let mut segments = address.split(',').map(str::trim);
    let street = segments.next().unwrap_or_default().to_string();
    let city = segments.next().unwrap_or_default().to_string();
    let state_zip = segments.next().unwrap_or_default();

    let mut state = String::new();
    let mut zip = String::new();

    if let Some(caps) = STATE_ZIP_RE.captures(state_zip) {
        state = caps
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        zip = caps
            .get(2)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
    }

    if zip.is_empty() {
        if let Some(m) = ZIP_RE.captures(state_zip).and_then(|c| c.get(1)) {
            zip = m.as_str().to_string();
        }
    }

    ParsedAddress {
        street,
        city,
        state,
        zip,
    }
}
