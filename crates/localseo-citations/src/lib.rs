//! Citation lookup: finds a business's listing on third-party directories,
//! scrapes the NAP shown there, and scores it against the claimed NAP.

pub mod audit;
pub mod client;
pub mod error;
pub mod extract;
pub mod lookup;
mod retry;

pub use audit::{summarize, AuditOptions, AuditReport, AuditSummary, CitationCheck};
pub use client::CitationClient;
pub use error::CitationError;
pub use extract::{extract_listing_nap, Extractor};
pub use lookup::{ErrorPolicy, ListingNap, LookupOutcome};
