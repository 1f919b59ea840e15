//! Citation audit: look up every listing concurrently and score each one
//! against the business's claimed NAP.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use localseo_core::{AppConfig, Listing};
use localseo_nap::{MatchResult, NapMatcher, NapRecord};
use serde::Serialize;

use crate::client::CitationClient;
use crate::lookup::{ErrorPolicy, LookupOutcome};

/// Knobs for a single audit run.
#[derive(Debug, Clone, Copy)]
pub struct AuditOptions {
    /// Upper bound on listing lookups in flight at once.
    pub max_concurrent: usize,
    pub error_policy: ErrorPolicy,
    pub matcher: NapMatcher,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            max_concurrent: 8,
            error_policy: ErrorPolicy::default(),
            matcher: NapMatcher::default(),
        }
    }
}

impl AuditOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_concurrent: config.max_concurrent_lookups,
            ..Self::default()
        }
    }
}

/// Result of checking one directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitationCheck {
    pub directory: String,
    pub outcome: LookupOutcome,
    /// Present only when the listing was found.
    pub result: Option<MatchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditSummary {
    pub listings_checked: usize,
    pub listings_found: usize,
    /// Found listings whose NAP matches overall (name and address).
    pub listings_consistent: usize,
    pub lookup_errors: usize,
    /// Mean confidence over found listings; `0.0` when none were found.
    pub average_confidence: f64,
    /// Share of found listings that are consistent, `0.0..=100.0`.
    pub consistency_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub business: NapRecord,
    pub generated_at: DateTime<Utc>,
    pub checks: Vec<CitationCheck>,
    pub summary: AuditSummary,
}

impl CitationClient {
    /// Checks every listing for `business`.
    ///
    /// Lookups run concurrently (bounded by `options.max_concurrent`) and
    /// are isolated from each other: one directory failing never affects
    /// another. Checks come back in the same order as `listings`.
    pub async fn audit(
        &self,
        business: &NapRecord,
        listings: &[Listing],
        options: AuditOptions,
    ) -> AuditReport {
        let mut indexed: Vec<(usize, CitationCheck)> = stream::iter(listings.iter().enumerate())
            .map(|(idx, listing)| async move {
                (idx, self.check_listing(business, listing, options).await)
            })
            .buffer_unordered(options.max_concurrent.max(1))
            .collect()
            .await;
        indexed.sort_by_key(|(idx, _)| *idx);

        let checks: Vec<CitationCheck> = indexed.into_iter().map(|(_, check)| check).collect();
        let summary = summarize(&checks);

        tracing::info!(
            business = %business.name,
            checked = summary.listings_checked,
            found = summary.listings_found,
            consistent = summary.listings_consistent,
            errors = summary.lookup_errors,
            "citation audit complete"
        );

        AuditReport {
            business: business.clone(),
            generated_at: Utc::now(),
            checks,
            summary,
        }
    }

    /// Looks up one listing and compares whatever it shows against `business`.
    pub async fn check_listing(
        &self,
        business: &NapRecord,
        listing: &Listing,
        options: AuditOptions,
    ) -> CitationCheck {
        let outcome = self.lookup(listing, options.error_policy).await;
        let result = match &outcome {
            LookupOutcome::Found(found) => Some(options.matcher.compare(business, &found.record)),
            LookupOutcome::NotFound | LookupOutcome::Error { .. } => None,
        };

        CitationCheck {
            directory: listing.directory.clone(),
            outcome,
            result,
        }
    }
}

/// Aggregates per-listing checks into headline numbers.
#[must_use]
pub fn summarize(checks: &[CitationCheck]) -> AuditSummary {
    let results: Vec<&MatchResult> = checks.iter().filter_map(|c| c.result.as_ref()).collect();
    let listings_found = results.len();
    let listings_consistent = results.iter().filter(|r| r.overall_match).count();
    let lookup_errors = checks.iter().filter(|c| c.outcome.is_error()).count();

    // Counts are bounded by the number of configured listings, far below
    // f64's exact integer range.
    #[allow(clippy::cast_precision_loss)]
    let (average_confidence, consistency_score) = if listings_found == 0 {
        (0.0, 0.0)
    } else {
        let total: f64 = results.iter().map(|r| f64::from(r.confidence)).sum();
        (
            total / listings_found as f64,
            listings_consistent as f64 / listings_found as f64 * 100.0,
        )
    };

    AuditSummary {
        listings_checked: checks.len(),
        listings_found,
        listings_consistent,
        lookup_errors,
        average_confidence,
        consistency_score,
    }
}
