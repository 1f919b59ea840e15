//! Integration tests for `CitationClient` page fetching, listing lookup and
//! the concurrent audit.
//!
//! Every test stands up its own `wiremock` server; no real directory is
//! contacted.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use localseo_citations::{
    AuditOptions, CitationClient, CitationError, ErrorPolicy, Extractor, LookupOutcome,
};
use localseo_core::Listing;
use localseo_nap::NapRecord;

/// 5-second timeout, descriptive UA, no retries.
fn test_client() -> CitationClient {
    CitationClient::new(5, "localseo-test/0.1", 0, 0).expect("failed to build test CitationClient")
}

fn business() -> NapRecord {
    NapRecord::new(
        "The Gents Place",
        "10225 Research Blvd #310, Austin, TX 78759",
        Some("(512) 555-1234"),
    )
}

fn listing(directory: &str, urls: Vec<String>) -> Listing {
    Listing {
        directory: directory.to_string(),
        urls,
    }
}

const JSONLD_PAGE: &str = r#"
<html><head>
<script type="application/ld+json">
{
  "@context": "https://schema.org",
  "@type": "LocalBusiness",
  "name": "The Gents Place",
  "address": {
    "@type": "PostalAddress",
    "streetAddress": "10225 Research Blvd Suite 310",
    "addressLocality": "Austin",
    "addressRegion": "TX",
    "postalCode": "78759"
  },
  "telephone": "+1 512-555-1234"
}
</script>
</head><body>Gents Place</body></html>
"#;

const MICRODATA_PAGE: &str = r#"
<div itemscope itemtype="https://schema.org/LocalBusiness">
  <h1 itemprop="name">Gents Place</h1>
  <div itemprop="address" itemscope itemtype="https://schema.org/PostalAddress">
    <span itemprop="streetAddress">10225 Research Boulevard</span>,
    <span itemprop="addressLocality">Austin</span>,
    <span itemprop="addressRegion">TX</span>
    <span itemprop="postalCode">78759</span>
  </div>
  <span itemprop="telephone">512.555.1234</span>
</div>
"#;

const STALE_PAGE: &str = r#"
<script type="application/ld+json">
{"@type": "HairSalon", "name": "Gents Place Austin",
 "address": {"streetAddress": "400 Congress Ave", "addressLocality": "Austin",
             "addressRegion": "TX", "postalCode": "78701"},
 "telephone": "(512) 555-0000"}
</script>
"#;

async fn mount_html(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// fetch_page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_page_returns_body_on_200() {
    let server = MockServer::start().await;
    mount_html(&server, "/biz/gents", 200, "<html>ok</html>").await;

    let body = test_client()
        .fetch_page(&format!("{}/biz/gents", server.uri()))
        .await
        .expect("fetch should succeed");
    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn fetch_page_maps_404_to_not_found() {
    let server = MockServer::start().await;
    mount_html(&server, "/biz/missing", 404, "").await;

    let result = test_client()
        .fetch_page(&format!("{}/biz/missing", server.uri()))
        .await;
    assert!(
        matches!(result, Err(CitationError::NotFound { .. })),
        "expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_page_maps_500_to_unexpected_status() {
    let server = MockServer::start().await;
    mount_html(&server, "/biz/broken", 500, "oops").await;

    let result = test_client()
        .fetch_page(&format!("{}/biz/broken", server.uri()))
        .await;
    assert!(
        matches!(result, Err(CitationError::UnexpectedStatus { status: 500, .. })),
        "expected UnexpectedStatus(500), got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_page_retries_429_then_reports_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/biz/busy"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .expect(3)
        .mount(&server)
        .await;

    let client = CitationClient::new(5, "localseo-test/0.1", 2, 0)
        .expect("failed to build test CitationClient");
    let result = client
        .fetch_page(&format!("{}/biz/busy", server.uri()))
        .await;

    match result {
        Err(CitationError::RateLimited {
            retry_after_secs, ..
        }) => assert_eq!(retry_after_secs, 7),
        other => panic!("expected RateLimited, got: {other:?}"),
    }
    // `expect(3)` is verified when the server drops.
}

#[tokio::test]
async fn fetch_page_rejects_unparseable_url() {
    let result = test_client().fetch_page("not a url").await;
    assert!(
        matches!(result, Err(CitationError::InvalidUrl { .. })),
        "expected InvalidUrl, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lookup_extracts_jsonld_listing() {
    let server = MockServer::start().await;
    mount_html(&server, "/biz/gents", 200, JSONLD_PAGE).await;

    let url = format!("{}/biz/gents", server.uri());
    let outcome = test_client()
        .lookup(&listing("yelp", vec![url.clone()]), ErrorPolicy::Propagate)
        .await;

    let LookupOutcome::Found(found) = outcome else {
        panic!("expected Found, got: {outcome:?}");
    };
    assert_eq!(found.extractor, Extractor::JsonLd);
    assert_eq!(found.url, url);
    assert_eq!(found.record.name, "The Gents Place");
    assert_eq!(
        found.record.address,
        "10225 Research Blvd Suite 310, Austin, TX 78759"
    );
    assert_eq!(found.record.phone.as_deref(), Some("+1 512-555-1234"));
}

#[tokio::test]
async fn lookup_falls_through_404_to_next_url() {
    let server = MockServer::start().await;
    mount_html(&server, "/old", 404, "").await;
    mount_html(&server, "/new", 200, MICRODATA_PAGE).await;

    let outcome = test_client()
        .lookup(
            &listing(
                "yellowpages",
                vec![
                    format!("{}/old", server.uri()),
                    format!("{}/new", server.uri()),
                ],
            ),
            ErrorPolicy::Propagate,
        )
        .await;

    let LookupOutcome::Found(found) = outcome else {
        panic!("expected Found, got: {outcome:?}");
    };
    assert_eq!(found.extractor, Extractor::Microdata);
    assert!(found.url.ends_with("/new"));
    assert_eq!(found.record.phone.as_deref(), Some("512.555.1234"));
}

#[tokio::test]
async fn lookup_page_without_business_data_is_not_found() {
    let server = MockServer::start().await;
    mount_html(&server, "/search", 200, "<html><p>No results</p></html>").await;

    let outcome = test_client()
        .lookup(
            &listing("bing", vec![format!("{}/search", server.uri())]),
            ErrorPolicy::Propagate,
        )
        .await;
    assert_eq!(outcome, LookupOutcome::NotFound);
}

#[tokio::test]
async fn lookup_propagate_stops_at_first_error() {
    let server = MockServer::start().await;
    mount_html(&server, "/down", 500, "").await;
    Mock::given(method("GET"))
        .and(path("/fallback"))
        .respond_with(ResponseTemplate::new(200).set_body_string(JSONLD_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = test_client()
        .lookup(
            &listing(
                "foursquare",
                vec![
                    format!("{}/down", server.uri()),
                    format!("{}/fallback", server.uri()),
                ],
            ),
            ErrorPolicy::Propagate,
        )
        .await;

    let LookupOutcome::Error { reason } = outcome else {
        panic!("expected Error, got: {outcome:?}");
    };
    assert!(reason.contains("500"), "reason should name the status: {reason}");
}

#[tokio::test]
async fn lookup_suppress_moves_past_errors() {
    let server = MockServer::start().await;
    mount_html(&server, "/down", 500, "").await;
    mount_html(&server, "/fallback", 200, JSONLD_PAGE).await;

    let outcome = test_client()
        .lookup(
            &listing(
                "foursquare",
                vec![
                    format!("{}/down", server.uri()),
                    format!("{}/fallback", server.uri()),
                ],
            ),
            ErrorPolicy::Suppress,
        )
        .await;
    assert!(outcome.is_found(), "expected Found, got: {outcome:?}");
}

#[tokio::test]
async fn lookup_suppress_with_only_errors_is_not_found() {
    let server = MockServer::start().await;
    mount_html(&server, "/down", 503, "").await;

    let outcome = test_client()
        .lookup(
            &listing("foursquare", vec![format!("{}/down", server.uri())]),
            ErrorPolicy::Suppress,
        )
        .await;
    assert_eq!(outcome, LookupOutcome::NotFound);
}

// ---------------------------------------------------------------------------
// audit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn audit_scores_every_listing_in_input_order() {
    let server = MockServer::start().await;
    mount_html(&server, "/yelp", 200, JSONLD_PAGE).await;
    mount_html(&server, "/yp", 200, STALE_PAGE).await;
    mount_html(&server, "/fsq", 404, "").await;
    mount_html(&server, "/bing", 500, "").await;

    let listings = vec![
        listing("yelp", vec![format!("{}/yelp", server.uri())]),
        listing("yellowpages", vec![format!("{}/yp", server.uri())]),
        listing("foursquare", vec![format!("{}/fsq", server.uri())]),
        listing("bing", vec![format!("{}/bing", server.uri())]),
    ];

    let options = AuditOptions {
        max_concurrent: 2,
        ..AuditOptions::default()
    };
    let report = test_client().audit(&business(), &listings, options).await;

    let directories: Vec<&str> = report.checks.iter().map(|c| c.directory.as_str()).collect();
    assert_eq!(directories, ["yelp", "yellowpages", "foursquare", "bing"]);

    let yelp = report.checks[0].result.as_ref().expect("yelp was found");
    assert!(yelp.overall_match);
    assert_eq!(yelp.confidence, 100);

    // Name still matches by containment but the street moved.
    let yp = report.checks[1].result.as_ref().expect("yellowpages was found");
    assert!(yp.name_match);
    assert!(!yp.address_match);
    assert!(!yp.overall_match);
    assert_eq!(yp.confidence, 40);

    assert_eq!(report.checks[2].outcome, LookupOutcome::NotFound);
    assert!(report.checks[2].result.is_none());
    assert!(report.checks[3].outcome.is_error());

    let summary = &report.summary;
    assert_eq!(summary.listings_checked, 4);
    assert_eq!(summary.listings_found, 2);
    assert_eq!(summary.listings_consistent, 1);
    assert_eq!(summary.lookup_errors, 1);
    assert!((summary.average_confidence - 70.0).abs() < f64::EPSILON);
    assert!((summary.consistency_score - 50.0).abs() < f64::EPSILON);
    assert_eq!(report.business, business());
}

#[tokio::test]
async fn audit_report_serializes_to_json() {
    let server = MockServer::start().await;
    mount_html(&server, "/yelp", 200, JSONLD_PAGE).await;

    let report = test_client()
        .audit(
            &business(),
            &[listing("yelp", vec![format!("{}/yelp", server.uri())])],
            AuditOptions::default(),
        )
        .await;

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["checks"][0]["outcome"]["status"], "found");
    assert_eq!(json["checks"][0]["outcome"]["extractor"], "json_ld");
    assert_eq!(json["checks"][0]["result"]["confidence"], 100);
    assert_eq!(json["summary"]["listings_found"], 1);
    assert!(json["generated_at"].is_string());
}
