//! Scores catalog items against one vision-analysis guess.
//!
//! The ranker is deliberately coarse: a candidate either carries the detected
//! name (full name weight) or it does not, and color similarity is normalized
//! against the farthest candidate in the same pool, where an unresolvable
//! color counts as the sentinel distance.

use std::cmp::Ordering;

use stockroom_core::{MatchSettings, ProductItem, ScoredProductItem, VisionAnalysisResult};
use stockroom_taxonomy::TaxonomySnapshot;

use crate::color::{distance, resolve};

pub const NAME_WEIGHT: u32 = 60;
pub const COLOR_WEIGHT: f64 = 40.0;

struct Candidate<'a> {
    item: &'a ProductItem,
    name_score: u32,
    /// Sentinel distance when either color failed to resolve.
    distance: f64,
    color_known: bool,
}

/// Ranks `items` against `analysis`.
///
/// Candidates are gated by display category, price ceiling and name
/// relevance, scored, cut at the noise floor, and returned sorted by name
/// score, color score (both descending) and then list price (ascending). The
/// result never exceeds `settings.max_results`; an empty pool yields an empty
/// list.
#[must_use]
pub fn rank_matches(
    items: &[ProductItem],
    analysis: &VisionAnalysisResult,
    taxonomy: &TaxonomySnapshot,
    settings: &MatchSettings,
) -> Vec<ScoredProductItem> {
    let target_color = resolve(&analysis.color);
    let simple_name = analysis.simple_name.trim();
    let fallback = taxonomy.is_fallback(simple_name);
    let terms: Vec<String> = taxonomy
        .expand_term(simple_name)
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let candidates: Vec<Candidate<'_>> = items
        .iter()
        .filter(|item| is_allowed(item, settings))
        .filter_map(|item| {
            let sub_category = item.sub_category.to_lowercase();
            let name_score = if fallback {
                if !item.sub_category.trim().eq_ignore_ascii_case(simple_name) {
                    return None;
                }
                NAME_WEIGHT
            } else {
                let description = item.description.to_lowercase();
                let relevant = terms
                    .iter()
                    .any(|t| description.contains(t.as_str()) || sub_category.contains(t.as_str()));
                if !relevant {
                    return None;
                }
                if terms.iter().any(|t| sub_category.contains(t.as_str())) {
                    NAME_WEIGHT
                } else {
                    0
                }
            };
            let item_color = resolve(&item.color);
            Some(Candidate {
                item,
                name_score,
                distance: distance(target_color, item_color),
                color_known: target_color.is_some() && item_color.is_some(),
            })
        })
        .collect();

    if candidates.is_empty() {
        tracing::debug!(
            simple_name = %analysis.simple_name,
            color = %analysis.color,
            "no ranking candidates"
        );
        return Vec::new();
    }

    // Unresolved pairs count at the sentinel distance.
    let max_distance = candidates
        .iter()
        .map(|c| c.distance)
        .fold(0.0_f64, f64::max);

    let pool = candidates.len();
    let mut scored: Vec<ScoredProductItem> = candidates
        .into_iter()
        .map(|c| {
            let color_score = color_score(c.color_known.then_some(c.distance), max_distance);
            ScoredProductItem {
                item: c.item.clone(),
                name_score: c.name_score,
                color_score,
                match_score: c.name_score + color_score,
            }
        })
        .filter(|s| s.match_score > settings.noise_floor)
        .collect();

    scored.sort_by(compare_scored);
    scored.truncate(settings.max_results);

    tracing::debug!(
        simple_name = %analysis.simple_name,
        fallback,
        candidates = pool,
        returned = scored.len(),
        "ranked vision matches"
    );
    scored
}

fn is_allowed(item: &ProductItem, settings: &MatchSettings) -> bool {
    item.list_price <= settings.price_ceiling
        && settings
            .allowed_display_categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(item.display_category.trim()))
}

/// Normalizes a distance to `0..=40`. Zero distance always earns the full
/// color weight.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn color_score(distance: Option<f64>, max_distance: f64) -> u32 {
    match distance {
        Some(d) if d <= 0.0 => COLOR_WEIGHT as u32,
        Some(d) if max_distance > 0.0 => {
            let raw = (COLOR_WEIGHT - d / max_distance * COLOR_WEIGHT).round();
            raw.clamp(0.0, COLOR_WEIGHT) as u32
        }
        _ => 0,
    }
}

fn compare_scored(a: &ScoredProductItem, b: &ScoredProductItem) -> Ordering {
    b.name_score
        .cmp(&a.name_score)
        .then_with(|| b.color_score.cmp(&a.color_score))
        .then_with(|| a.item.list_price.cmp(&b.item.list_price))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use stockroom_taxonomy::{FeedTable, TaxonomySnapshot};

    use super::*;

    fn settings() -> MatchSettings {
        MatchSettings::default()
    }

    fn taxonomy() -> TaxonomySnapshot {
        let synonyms = FeedTable::parse(
            "CatCode,Category,SubCategory,Singular,Synonyms\n\
             101,Flowers,Rose,Rose,\"Roses,Rosebud\"\n\
             102,Flowers,Peony,Peony,Peonies\n",
            ',',
        )
        .unwrap();
        let codes = FeedTable::parse("Code,Category,SubCategory\n1,Flowers,Rose\n", ',').unwrap();
        TaxonomySnapshot::from_tables(&synonyms, &codes, &settings().fallback_categories).unwrap()
    }

    fn item(id: i64, sub_category: &str, color: &str, price: i64) -> ProductItem {
        ProductItem {
            id,
            code: format!("FL-{id}"),
            sku: String::new(),
            description: format!("{color} {sub_category} stem"),
            category: "ARTIFICIAL FLOWERS".to_string(),
            display_category: "Floral".to_string(),
            sub_category: sub_category.to_string(),
            color: color.to_string(),
            cluster_color: String::new(),
            list_price: Decimal::from(price),
            stock: 1,
            height: Decimal::from(24),
            supplier: None,
        }
    }

    fn analysis(name: &str, color: &str) -> VisionAnalysisResult {
        VisionAnalysisResult {
            simple_name: name.to_string(),
            color: color.to_string(),
        }
    }

    #[test]
    fn color_score_edges() {
        assert_eq!(color_score(Some(0.0), 0.0), 40);
        assert_eq!(color_score(Some(0.0), 100.0), 40);
        assert_eq!(color_score(Some(100.0), 100.0), 0);
        assert_eq!(color_score(Some(50.0), 100.0), 20);
        assert_eq!(color_score(None, 100.0), 0);
    }

    #[test]
    fn synonym_in_subcategory_earns_name_weight() {
        let items = vec![item(1, "Rose", "Red", 10)];
        let ranked = rank_matches(&items, &analysis("rosebud", "red"), &taxonomy(), &settings());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name_score, 60);
        assert_eq!(ranked[0].color_score, 40);
        assert_eq!(ranked[0].match_score, 100);
    }

    #[test]
    fn description_only_match_scores_zero_name() {
        let mut vase = item(1, "Vase", "Red", 10);
        vase.description = "Glass vase for roses".to_string();
        let ranked = rank_matches(&[vase], &analysis("roses", "red"), &taxonomy(), &settings());
        // Exact color alone clears the noise floor.
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name_score, 0);
        assert_eq!(ranked[0].color_score, 40);
    }

    #[test]
    fn name_zero_and_color_unknown_is_dropped() {
        let mut vase = item(1, "Vase", "Mystery", 10);
        vase.description = "Glass vase for roses".to_string();
        let ranked = rank_matches(&[vase], &analysis("roses", "red"), &taxonomy(), &settings());
        assert!(ranked.is_empty());
    }

    #[test]
    fn display_category_and_price_gate_candidates() {
        let mut decor = item(1, "Rose", "Red", 10);
        decor.display_category = "Decor".to_string();
        let pricey = item(2, "Rose", "Red", 31);
        let ceiling = item(3, "Rose", "Red", 30);
        let mut greenery = item(4, "Rose", "Red", 5);
        greenery.display_category = "greenery".to_string();
        let ranked = rank_matches(
            &[decor, pricey, ceiling, greenery],
            &analysis("rose", "red"),
            &taxonomy(),
            &settings(),
        );
        let ids: Vec<i64> = ranked.iter().map(|s| s.item.id).collect();
        assert_eq!(ids, [4, 3]);
    }

    #[test]
    fn fallback_name_matches_subcategory_exactly() {
        let leaf = item(1, "Other Leaf", "Green", 10);
        let mut mentions = item(2, "Fern", "Green", 10);
        mentions.description = "Other Leaf style fern".to_string();
        let ranked = rank_matches(
            &[leaf, mentions],
            &analysis(" other leaf ", "green"),
            &taxonomy(),
            &settings(),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].item.id, 1);
        assert_eq!(ranked[0].name_score, 60);
    }

    #[test]
    fn unknown_name_yields_empty() {
        let items = vec![item(1, "Rose", "Red", 10)];
        let ranked = rank_matches(&items, &analysis("tulip", "red"), &taxonomy(), &settings());
        assert!(ranked.is_empty());
    }

    #[test]
    fn cap_follows_settings() {
        let items: Vec<ProductItem> = (0..80).map(|i| item(i, "Rose", "Red", 10)).collect();
        let ranked = rank_matches(&items, &analysis("rose", "red"), &taxonomy(), &settings());
        assert_eq!(ranked.len(), 50);

        let small = MatchSettings {
            max_results: 3,
            ..settings()
        };
        assert_eq!(
            rank_matches(&items, &analysis("rose", "red"), &taxonomy(), &small).len(),
            3
        );
    }

    #[test]
    fn equal_scores_order_by_price() {
        let items = vec![
            item(1, "Rose", "Red", 25),
            item(2, "Rose", "Red", 5),
            item(3, "Rose", "Red", 15),
        ];
        let ranked = rank_matches(&items, &analysis("rose", "red"), &taxonomy(), &settings());
        let ids: Vec<i64> = ranked.iter().map(|s| s.item.id).collect();
        assert_eq!(ids, [2, 3, 1]);
    }
}
