//! schema.org JSON-LD extraction.

use std::sync::LazyLock;

use localseo_nap::NapRecord;
use regex::Regex;

use super::format_address;

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]+type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid regex")
});

const BUSINESS_TYPES: &[&str] = &[
    "LocalBusiness",
    "Store",
    "FoodEstablishment",
    "Restaurant",
    "HealthAndBeautyBusiness",
    "HairSalon",
    "BeautySalon",
    "DaySpa",
    "ProfessionalService",
    "LegalService",
    "Attorney",
    "Dentist",
    "MedicalBusiness",
    "AutomotiveBusiness",
    "AutoRepair",
    "HomeAndConstructionBusiness",
    "Plumber",
    "Electrician",
    "LodgingBusiness",
];

/// Returns the first business-like JSON-LD object on the page as a NAP.
pub(super) fn extract_jsonld_nap(html: &str) -> Option<NapRecord> {
    for cap in SCRIPT_RE.captures_iter(html) {
        let Some(json_text) = cap.get(1).map(|m| m.as_str()) else {
            continue;
        };

        let Ok(value) = serde_json::from_str::<serde_json::Value>(json_text) else {
            continue;
        };

        // Accept top-level object, array, or @graph container.
        let mut candidates: Vec<serde_json::Value> = match value {
            serde_json::Value::Array(items) => items,
            other => vec![other],
        };
        let graphs: Vec<serde_json::Value> = candidates
            .iter()
            .filter_map(|item| item.get("@graph").and_then(serde_json::Value::as_array))
            .flat_map(|graph| graph.iter().cloned())
            .collect();
        candidates.extend(graphs);

        if let Some(record) = candidates.iter().find_map(jsonld_item_to_nap) {
            return Some(record);
        }
    }

    None
}

fn jsonld_item_to_nap(item: &serde_json::Value) -> Option<NapRecord> {
    let address = item.get("address");
    let has_postal_address = address
        .and_then(|a| a.get("streetAddress"))
        .is_some();

    if !is_business_type(item.get("@type")?) && !has_postal_address {
        return None;
    }

    let name = item.get("name")?.as_str()?.trim().to_string();
    if name.is_empty() {
        return None;
    }

    // `address` is usually a PostalAddress object but some directories emit
    // a plain string.
    let address = match address {
        Some(serde_json::Value::String(s)) => s.trim().to_string(),
        Some(a) => {
            let field = |key: &str| a.get(key).and_then(serde_json::Value::as_str);
            format_address(
                field("streetAddress"),
                field("addressLocality"),
                field("addressRegion"),
                field("postalCode"),
            )
        }
        None => String::new(),
    };

    let phone = item
        .get("telephone")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    Some(NapRecord {
        name,
        address,
        phone,
    })
}

/// `@type` may be a plain string or an array of strings.
fn is_business_type(type_node: &serde_json::Value) -> bool {
    let matches = |s: &str| BUSINESS_TYPES.iter().any(|t| s.eq_ignore_ascii_case(t));
    match type_node {
        serde_json::Value::String(s) => matches(s),
        serde_json::Value::Array(arr) => arr
            .iter()
            .filter_map(serde_json::Value::as_str)
            .any(matches),
        _ => false,
    }
}
