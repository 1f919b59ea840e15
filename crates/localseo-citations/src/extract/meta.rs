//! OpenGraph business meta tags plus `tel:` links.

use std::sync::LazyLock;

use localseo_nap::NapRecord;
use regex::Regex;

use super::format_address;
use super::html::{extract_attr, non_empty, strip_html};

static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid regex"));
static TEL_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href\s*=\s*["']tel:([^"']+)["']"#).expect("valid regex")
});

/// Builds a NAP from `business:contact_data:*` meta tags, falling back to
/// `og:title`/`<title>` for the name and the first `tel:` link for the phone.
///
/// A page title is present on every page, so at least an address part or a
/// phone number is required.
pub(super) fn extract_meta_nap(html: &str) -> Option<NapRecord> {
    let street = non_empty(find_meta_content(html, "business:contact_data:street_address"));
    let city = non_empty(find_meta_content(html, "business:contact_data:locality"));
    let region = non_empty(find_meta_content(html, "business:contact_data:region"));
    let postal_code = non_empty(find_meta_content(html, "business:contact_data:postal_code"));
    let phone = non_empty(find_meta_content(html, "business:contact_data:phone_number"))
        .or_else(|| non_empty(first_tel_link(html)));

    if street.is_none() && city.is_none() && phone.is_none() {
        return None;
    }

    let name = non_empty(find_meta_content(html, "og:title"))
        .or_else(|| non_empty(page_title(html)))?;

    Some(NapRecord {
        name,
        address: format_address(
            street.as_deref(),
            city.as_deref(),
            region.as_deref(),
            postal_code.as_deref(),
        ),
        phone,
    })
}

/// Matches `property=` or `name=` against `key`.
fn find_meta_content(html: &str, key: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let tag_key = extract_attr(tag, "property").or_else(|| extract_attr(tag, "name"))?;
        if tag_key.eq_ignore_ascii_case(key) {
            extract_attr(tag, "content")
        } else {
            None
        }
    })
}

fn page_title(html: &str) -> Option<String> {
    TITLE_RE
        .captures(html)
        .and_then(|c| c.get(1).map(|m| strip_html(m.as_str())))
}

fn first_tel_link(html: &str) -> Option<String> {
    TEL_LINK_RE
        .captures(html)
        .and_then(|c| c.get(1).map(|m| m.as_str().trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_opengraph_business_tags() {
        let html = r#"
            <head>
              <meta property="og:title" content="The Gents Place - Austin, TX">
              <meta property="business:contact_data:street_address" content="10225 Research Blvd #310">
              <meta property="business:contact_data:locality" content="Austin">
              <meta property="business:contact_data:region" content="TX">
              <meta property="business:contact_data:postal_code" content="78759">
              <meta property="business:contact_data:phone_number" content="512-555-1234">
            </head>
        "#;
        let record = extract_meta_nap(html).unwrap();
        assert_eq!(record.name, "The Gents Place - Austin, TX");
        assert_eq!(record.address, "10225 Research Blvd #310, Austin, TX 78759");
        assert_eq!(record.phone.as_deref(), Some("512-555-1234"));
    }

    #[test]
    fn falls_back_to_title_and_tel_link() {
        let html = r#"
            <html><head><title>Gents Place | Barbers</title></head>
            <body><a href="tel:+15125551234">Call</a></body></html>
        "#;
        let record = extract_meta_nap(html).unwrap();
        assert_eq!(record.name, "Gents Place | Barbers");
        assert_eq!(record.address, "");
        assert_eq!(record.phone.as_deref(), Some("+15125551234"));
    }

    #[test]
    fn title_alone_is_not_a_listing() {
        let html = r#"<html><head><title>Gents Place</title><meta property="og:title" content="Gents Place"></head></html>"#;
        assert!(extract_meta_nap(html).is_none());
    }

    #[test]
    fn accepts_name_attribute_for_meta_key() {
        let html = r#"
            <meta name="og:title" content="Acme">
            <meta name="business:contact_data:locality" content="Springfield">
        "#;
        let record = extract_meta_nap(html).unwrap();
        assert_eq!(record.name, "Acme");
        assert_eq!(record.address, ", Springfield");
    }
}
