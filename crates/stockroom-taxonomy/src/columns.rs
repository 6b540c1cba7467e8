//! Declarative header matching for the taxonomy feeds.
//!
//! Feed exports disagree on header spelling (`SubCategory`, `Sub Category`,
//! `sub_category`, `Product Category`). Each feed declares an ordered list of
//! [`ColumnRule`]s; rules run once per load, top to bottom, and each one claims
//! the first not-yet-claimed header it matches for a role that is still
//! unresolved. Exact rules are listed before containment rules so that
//! `Category` wins over `SubCategory` for the category role.

use std::collections::HashMap;

use crate::error::TaxonomyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    CatCode,
    Category,
    SubCategory,
    Singular,
    Synonyms,
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRole::CatCode => write!(f, "code"),
            ColumnRole::Category => write!(f, "category"),
            ColumnRole::SubCategory => write!(f, "subcategory"),
            ColumnRole::Singular => write!(f, "singular"),
            ColumnRole::Synonyms => write!(f, "synonyms"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum HeaderMatch {
    /// Normalized header equals the pattern.
    Exact(&'static str),
    /// Normalized header contains the pattern.
    Contains(&'static str),
}

impl HeaderMatch {
    fn matches(self, normalized_header: &str) -> bool {
        match self {
            HeaderMatch::Exact(p) => normalized_header == p,
            HeaderMatch::Contains(p) => normalized_header.contains(p),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    pub role: ColumnRole,
    pub matcher: HeaderMatch,
}

const fn rule(role: ColumnRole, matcher: HeaderMatch) -> ColumnRule {
    ColumnRule { role, matcher }
}

/// Rules for the `(category, subcategory) → code` feed.
pub const CODE_FEED_RULES: &[ColumnRule] = &[
    rule(ColumnRole::CatCode, HeaderMatch::Exact("code")),
    rule(ColumnRole::CatCode, HeaderMatch::Exact("catcode")),
    rule(ColumnRole::SubCategory, HeaderMatch::Exact("subcategory")),
    rule(ColumnRole::Category, HeaderMatch::Exact("category")),
    rule(ColumnRole::SubCategory, HeaderMatch::Contains("subcategory")),
    rule(ColumnRole::Category, HeaderMatch::Contains("category")),
    rule(ColumnRole::CatCode, HeaderMatch::Contains("code")),
];

pub const CODE_FEED_REQUIRED: &[ColumnRole] = &[
    ColumnRole::CatCode,
    ColumnRole::Category,
    ColumnRole::SubCategory,
];

/// Rules for the synonym/subcategory feed.
pub const SYNONYM_FEED_RULES: &[ColumnRule] = &[
    rule(ColumnRole::CatCode, HeaderMatch::Exact("catcode")),
    rule(ColumnRole::SubCategory, HeaderMatch::Exact("subcategory")),
    rule(ColumnRole::Category, HeaderMatch::Exact("category")),
    rule(ColumnRole::Singular, HeaderMatch::Exact("singular")),
    rule(ColumnRole::Synonyms, HeaderMatch::Exact("synonyms")),
    rule(ColumnRole::Synonyms, HeaderMatch::Exact("synonym")),
    rule(ColumnRole::SubCategory, HeaderMatch::Contains("subcategory")),
    rule(ColumnRole::Category, HeaderMatch::Contains("category")),
    rule(ColumnRole::Singular, HeaderMatch::Contains("singular")),
    rule(ColumnRole::Synonyms, HeaderMatch::Contains("synonym")),
    rule(ColumnRole::CatCode, HeaderMatch::Contains("code")),
];

pub const SYNONYM_FEED_REQUIRED: &[ColumnRole] = &[ColumnRole::SubCategory];

/// Role → column index, as resolved for one feed's header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: HashMap<ColumnRole, usize>,
}

impl ColumnMap {
    #[must_use]
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        self.columns.get(&role).copied()
    }
}

/// Lowercases and drops everything that is not alphanumeric, so
/// `"Sub Category"`, `"sub_category"` and `"SubCategory"` compare equal.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Resolves `rules` against `headers`.
///
/// # Errors
///
/// Returns [`TaxonomyError::MissingColumn`] for the first role in `required`
/// that no rule could resolve. There is no positional fallback.
pub fn resolve_columns(
    feed: &'static str,
    headers: &[String],
    rules: &[ColumnRule],
    required: &[ColumnRole],
) -> Result<ColumnMap, TaxonomyError> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let mut claimed = vec![false; headers.len()];
    let mut columns = HashMap::new();

    for rule in rules {
        if columns.contains_key(&rule.role) {
            continue;
        }
        let hit = normalized
            .iter()
            .enumerate()
            .find(|(idx, header)| !claimed[*idx] && rule.matcher.matches(header));
        if let Some((idx, _)) = hit {
            claimed[idx] = true;
            columns.insert(rule.role, idx);
        }
    }

    if let Some(&role) = required.iter().find(|role| !columns.contains_key(role)) {
        return Err(TaxonomyError::MissingColumn { feed, role });
    }

    Ok(ColumnMap { columns })
}
