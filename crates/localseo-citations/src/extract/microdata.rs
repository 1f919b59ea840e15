//! schema.org microdata (`itemprop` attributes) extraction.

use localseo_nap::NapRecord;
use regex::Regex;

use super::format_address;
use super::html::{extract_attr, non_empty, strip_html};

/// Reads `itemprop` values for a business marked up with microdata.
///
/// Needs a name plus at least an address part or a phone; a bare
/// `itemprop="name"` is too common (reviews, breadcrumbs) to trust alone.
pub(super) fn extract_microdata_nap(html: &str) -> Option<NapRecord> {
    if !html.contains("itemprop") {
        return None;
    }

    let name = non_empty(itemprop_value(html, "name"))?;
    let street = non_empty(itemprop_value(html, "streetAddress"));
    let city = non_empty(itemprop_value(html, "addressLocality"));
    let region = non_empty(itemprop_value(html, "addressRegion"));
    let postal_code = non_empty(itemprop_value(html, "postalCode"));
    let phone = non_empty(itemprop_value(html, "telephone"));

    let has_address = street.is_some() || city.is_some();
    if !has_address && phone.is_none() {
        return None;
    }

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

/// First non-empty value for `prop`: the `content` attribute when present,
/// otherwise the element's text up to its closing tag.
fn itemprop_value(html: &str, prop: &str) -> Option<String> {
    let pattern = format!(
        r#"(?is)<([a-z][a-z0-9]*)\b[^>]*\bitemprop\s*=\s*["']{}["'][^>]*>"#,
        regex::escape(prop)
    );
    let re = Regex::new(&pattern).ok()?;

    for caps in re.captures_iter(html) {
        let Some(open_tag) = caps.get(0) else {
            continue;
        };
        if let Some(content) = non_empty(extract_attr(open_tag.as_str(), "content")) {
            return Some(content);
        }

        let tag_name = caps[1].to_ascii_lowercase();
        if matches!(tag_name.as_str(), "meta" | "link") {
            continue;
        }

        let rest = &html[open_tag.end()..];
        let close = format!("</{tag_name}");
        let end = rest.to_ascii_lowercase().find(&close).unwrap_or(rest.len());
        let text = strip_html(&rest[..end]);
        if !text.is_empty() {
            return Some(text);
        }
    }

    None
}
