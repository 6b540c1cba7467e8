use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Tunables for the AI match ranker and the taxonomy fallback labels.
///
/// The defaults are the production values; a YAML file may override any
/// subset of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Display categories eligible for AI-driven recognition.
    pub allowed_display_categories: Vec<String>,
    /// Candidates priced above this are never suggested.
    pub price_ceiling: Decimal,
    /// Generic catch-all subcategory labels, matched by exact text only.
    pub fallback_categories: Vec<String>,
    /// Upper bound on the ranked list length.
    pub max_results: usize,
    /// Candidates whose match score is at or below this are dropped.
    pub noise_floor: u32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            allowed_display_categories: vec!["Floral".to_string(), "Greenery".to_string()],
            price_ceiling: Decimal::from(30),
            fallback_categories: vec![
                "Other Flower".to_string(),
                "Other Leaf".to_string(),
                "Other Plant".to_string(),
                "Other Decor".to_string(),
            ],
            max_results: 50,
            noise_floor: 10,
        }
    }
}

/// Load match settings from an optional YAML file.
///
/// `None` yields [`MatchSettings::default`]. A file may override any subset of
/// the fields; the merged result is validated.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_match_settings(path: Option<&Path>) -> Result<MatchSettings, ConfigError> {
    let Some(path) = path else {
        return Ok(MatchSettings::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SettingsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let settings: MatchSettings = serde_yaml::from_str(&content)?;
    validate_settings(&settings)?;

    Ok(settings)
}

fn validate_settings(settings: &MatchSettings) -> Result<(), ConfigError> {
    if settings.allowed_display_categories.is_empty() {
        return Err(ConfigError::Validation(
            "allowed_display_categories must list at least one category".to_string(),
        ));
    }
    if settings
        .allowed_display_categories
        .iter()
        .any(|c| c.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "allowed_display_categories must not contain blank entries".to_string(),
        ));
    }

    if settings.price_ceiling.is_sign_negative() {
        return Err(ConfigError::Validation(format!(
            "price_ceiling must be non-negative, got {}",
            settings.price_ceiling
        )));
    }

    if settings.max_results == 0 {
        return Err(ConfigError::Validation(
            "max_results must be greater than zero".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for label in &settings.fallback_categories {
        let key = label.trim().to_lowercase();
        if key.is_empty() {
            return Err(ConfigError::Validation(
                "fallback category label must be non-empty".to_string(),
            ));
        }
        if !seen.insert(key) {
            return Err(ConfigError::Validation(format!(
                "duplicate fallback category: '{label}'"
            )));
        }
    }

    Ok(())
}
