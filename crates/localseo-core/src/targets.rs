use std::collections::HashSet;
use std::path::Path;

use localseo_nap::NapRecord;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One directory to check for a citation of the business.
///
/// `urls` are tried in order: the first is the expected listing page, the
/// rest are fallbacks (search result pages, mirrors).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub directory: String,
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetsFile {
    pub business: NapRecord,
    #[serde(default)]
    pub listings: Vec<Listing>,
}

/// Load and validate the audit targets from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_targets(path: &Path) -> Result<TargetsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TargetsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let targets: TargetsFile = serde_yaml::from_str(&content)?;

    validate_targets(&targets)?;

    Ok(targets)
}

fn validate_targets(targets: &TargetsFile) -> Result<(), ConfigError> {
    if targets.business.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "business name must be non-empty".to_string(),
        ));
    }

    let mut seen_directories = HashSet::new();

    for listing in &targets.listings {
        let directory = listing.directory.trim();
        if directory.is_empty() {
            return Err(ConfigError::Validation(
                "listing directory must be non-empty".to_string(),
            ));
        }

        if listing.urls.is_empty() {
            return Err(ConfigError::Validation(format!(
                "listing '{directory}' has no urls"
            )));
        }

        if let Some(bad) = listing
            .urls
            .iter()
            .find(|u| !(u.starts_with("http://") || u.starts_with("https://")))
        {
            return Err(ConfigError::Validation(format!(
                "listing '{directory}' has non-http url '{bad}'"
            )));
        }

        if !seen_directories.insert(directory.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate listing directory: '{directory}'"
            )));
        }
    }

    Ok(())
}
