//! Prioritized lookup of a single directory listing.
//!
//! A [`Listing`] carries one or more URLs. They are tried in order and each
//! attempt ends in a tagged [`LookupOutcome`]; the caller's [`ErrorPolicy`]
//! decides whether a failed fetch ends the chain or falls through to the
//! next URL.

use localseo_core::Listing;
use localseo_nap::NapRecord;
use serde::Serialize;

use crate::client::CitationClient;
use crate::error::CitationError;
use crate::extract::{extract_listing_nap, Extractor};

/// NAP scraped from a listing page, with where and how it was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingNap {
    pub record: NapRecord,
    pub extractor: Extractor,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    Found(ListingNap),
    NotFound,
    Error { reason: String },
}

impl LookupOutcome {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, LookupOutcome::Error { .. })
    }
}

/// What to do when fetching one of a listing's URLs fails.
///
/// A 404 or a page with no business data is never an error: it is a
/// definite "not here" and the chain always moves on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the failure and try the next URL; an exhausted chain reports
    /// [`LookupOutcome::NotFound`].
    Suppress,
    /// Stop at the first failure and report [`LookupOutcome::Error`].
    #[default]
    Propagate,
}

impl CitationClient {
    /// Looks up `listing`, trying its URLs in order until one yields a NAP.
    pub async fn lookup(&self, listing: &Listing, policy: ErrorPolicy) -> LookupOutcome {
        for url in &listing.urls {
            match self.fetch_page(url).await {
                Ok(html) => {
                    if let Some((record, extractor)) = extract_listing_nap(&html) {
                        tracing::debug!(
                            directory = %listing.directory,
                            %url,
                            %extractor,
                            "extracted listing NAP"
                        );
                        return LookupOutcome::Found(ListingNap {
                            record,
                            extractor,
                            url: url.clone(),
                        });
                    }
                    tracing::debug!(
                        directory = %listing.directory,
                        %url,
                        "page reachable but no business data found"
                    );
                }
                Err(CitationError::NotFound { .. }) => {
                    tracing::debug!(directory = %listing.directory, %url, "listing page 404");
                }
                Err(err) => {
                    tracing::warn!(
                        directory = %listing.directory,
                        %url,
                        error = %err,
                        ?policy,
                        "listing lookup failed"
                    );
                    if policy == ErrorPolicy::Propagate {
                        return LookupOutcome::Error {
                            reason: err.to_string(),
                        };
                    }
                }
            }
        }

        LookupOutcome::NotFound
    }
}
