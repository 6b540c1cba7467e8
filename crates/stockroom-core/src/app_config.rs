use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Log filter used when `STOCKROOM_LOG_LEVEL` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Test => "warn",
            Environment::Production => "info",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Synonym/subcategory feed (CatCode, Category, SubCategory, Singular, Synonyms).
    pub synonym_feed_path: PathBuf,
    /// Category + subcategory → numeric code feed.
    pub code_feed_path: PathBuf,
    /// Optional YAML overrides for the ranker; built-in defaults apply when unset.
    pub match_settings_path: Option<PathBuf>,
    /// Field delimiter shared by both taxonomy feeds.
    pub feed_delimiter: char,
}
