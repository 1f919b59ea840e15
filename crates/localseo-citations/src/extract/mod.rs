//! NAP extraction strategies for a fetched listing page.
//!
//! Tried in priority order (schema.org JSON-LD, schema.org microdata,
//! OpenGraph business meta tags); the first strategy that yields a name
//! wins. All parsing is regex-based with no DOM model.

mod html;
mod jsonld;
mod meta;
mod microdata;

use localseo_nap::NapRecord;
use serde::Serialize;

/// Which extraction strategy produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extractor {
    JsonLd,
    Microdata,
    MetaTags,
}

impl std::fmt::Display for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Extractor::JsonLd => write!(f, "json_ld"),
            Extractor::Microdata => write!(f, "microdata"),
            Extractor::MetaTags => write!(f, "meta_tags"),
        }
    }
}

/// Extracts the business NAP shown on a listing page.
///
/// Returns `None` when no strategy finds a business name.
#[must_use]
pub fn extract_listing_nap(html: &str) -> Option<(NapRecord, Extractor)> {
    if let Some(record) = jsonld::extract_jsonld_nap(html) {
        return Some((record, Extractor::JsonLd));
    }
    if let Some(record) = microdata::extract_microdata_nap(html) {
        return Some((record, Extractor::Microdata));
    }
    meta::extract_meta_nap(html).map(|record| (record, Extractor::MetaTags))
}

/// Joins address parts into `"<street>, <city>, <REGION> <ZIP>"`.
///
/// Segment positions are kept so the address parser still reads the city
/// as the second segment; trailing empty segments are dropped.
pub(crate) fn format_address(
    street: Option<&str>,
    city: Option<&str>,
    region: Option<&str>,
    postal_code: Option<&str>,
) -> String {
    let clean = |v: Option<&str>| v.map(str::trim).unwrap_or_default().to_string();
    let region_zip = format!("{} {}", clean(region), clean(postal_code))
        .trim()
        .to_string();

    let mut segments = vec![clean(street), clean(city), region_zip];
    while segments.last().is_some_and(String::is_empty) {
        segments.pop();
    }
    segments.join(", ")
}
