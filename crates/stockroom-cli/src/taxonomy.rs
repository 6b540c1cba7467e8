//! Taxonomy loading and lookup commands.
//!
//! A feed that fails to load is logged by the store and left out; commands
//! still run against whatever half did load, matching how a long-running host
//! keeps serving its previous snapshot.

use std::sync::Arc;

use anyhow::Context;
use stockroom_core::{AppConfig, MatchSettings};
use stockroom_taxonomy::{TaxonomySnapshot, TaxonomyStore};

use crate::catalog::print_json;

/// Loads match settings, then both taxonomy feeds into a fresh store.
///
/// # Errors
///
/// Returns an error only when the match settings file is unusable. Feed
/// failures degrade to an empty half.
pub(crate) fn load_taxonomy(
    config: &AppConfig,
) -> anyhow::Result<(Arc<TaxonomySnapshot>, MatchSettings)> {
    let settings = stockroom_core::load_match_settings(config.match_settings_path.as_deref())
        .context("failed to load match settings")?;
    let store = TaxonomyStore::new(settings.fallback_categories.clone());

    if let Err(e) = store.reload_synonyms_from_path(&config.synonym_feed_path, config.feed_delimiter)
    {
        tracing::warn!(
            path = %config.synonym_feed_path.display(),
            error = %e,
            "continuing without synonym families"
        );
    }
    if let Err(e) = store.reload_codes_from_path(&config.code_feed_path, config.feed_delimiter) {
        tracing::warn!(
            path = %config.code_feed_path.display(),
            error = %e,
            "continuing without catalog codes"
        );
    }

    Ok((store.snapshot(), settings))
}

pub(crate) fn run_expand(config: &AppConfig, term: &str) -> anyhow::Result<()> {
    let (snapshot, _) = load_taxonomy(config)?;
    print_json(&serde_json::json!({
        "term": term,
        "canonical": snapshot.canonical_name(term),
        "fallback": snapshot.is_fallback(term),
        "family": snapshot.expand_term(term),
    }))
}

pub(crate) fn run_code(config: &AppConfig, category: &str, sub_category: &str) -> anyhow::Result<()> {
    let (snapshot, _) = load_taxonomy(config)?;
    let code = snapshot.find_code(category, sub_category);
    if code.is_empty() {
        anyhow::bail!("no catalog code for {category} / {sub_category}");
    }
    println!("{code}");
    Ok(())
}

pub(crate) fn run_categories(config: &AppConfig, category: Option<&str>) -> anyhow::Result<()> {
    let (snapshot, _) = load_taxonomy(config)?;
    let names = match category {
        Some(category) => snapshot.list_subcategories(category),
        None => snapshot.list_categories(),
    };
    for name in names {
        println!("{name}");
    }
    Ok(())
}

pub(crate) fn run_vocabulary(config: &AppConfig) -> anyhow::Result<()> {
    let (snapshot, _) = load_taxonomy(config)?;
    print_json(&snapshot.vocabulary())
}
