//! Audit command handler for the CLI.
//!
//! Per-listing lookup failures never abort the run; they are recorded in
//! the report. Only config, targets-file and client construction errors
//! are propagated.

use std::path::Path;

use anyhow::Context;
use localseo_citations::{AuditOptions, AuditReport, CitationClient, ErrorPolicy};
use localseo_core::AppConfig;

/// Loads the targets file and audits every listing in it.
///
/// `targets_override` takes precedence over `config.targets_path`.
///
/// # Errors
///
/// Returns an error if the targets file cannot be read or fails validation,
/// or if the HTTP client cannot be constructed.
pub(crate) async fn run_audit(
    config: &AppConfig,
    targets_override: Option<&Path>,
    policy: ErrorPolicy,
) -> anyhow::Result<AuditReport> {
    let path = targets_override.unwrap_or(&config.targets_path);
    let targets = localseo_core::load_targets(path)
        .with_context(|| format!("loading targets from {}", path.display()))?;

    if targets.listings.is_empty() {
        tracing::warn!(path = %path.display(), "targets file has no listings");
    }

    let client = CitationClient::from_config(config)?;
    let options = AuditOptions {
        error_policy: policy,
        ..AuditOptions::from_config(config)
    };

    tracing::info!(
        business = %targets.business.name,
        listings = targets.listings.len(),
        max_concurrent = options.max_concurrent,
        ?policy,
        "starting citation audit"
    );

    Ok(client
        .audit(&targets.business, &targets.listings, options)
        .await)
}
