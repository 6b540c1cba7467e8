//! Vision-driven ranking across the taxonomy and color classifier.

use rust_decimal::Decimal;
use stockroom_core::{MatchSettings, ProductItem, VisionAnalysisResult};
use stockroom_match::{rank_matches, suggest_cluster_color};
use stockroom_taxonomy::{FeedTable, TaxonomyStore};

const SYNONYMS: &str = "\
CatCode,Category,SubCategory,Singular,Synonyms
101,Flowers,Rose,Rose,\"Roses,Rosebud\"
102,Flowers,Hydrangea,Hydrangea,Hydrangeas
201,Foliage,Eucalyptus,Eucalyptus,\"Eucalyptus Spray,Silver Dollar\"
";

fn store() -> TaxonomyStore {
    let settings = MatchSettings::default();
    let store = TaxonomyStore::new(settings.fallback_categories);
    store
        .reload_synonyms(&FeedTable::parse(SYNONYMS, ',').expect("synonym feed"))
        .expect("synonym feed loads");
    store
}

fn product(id: i64, sub_category: &str, color: &str, price: &str) -> ProductItem {
    ProductItem {
        id,
        code: format!("P-{id}"),
        sku: String::new(),
        description: format!("{sub_category} stem"),
        category: "ARTIFICIAL FLOWERS".to_string(),
        display_category: "Floral".to_string(),
        sub_category: sub_category.to_string(),
        color: color.to_string(),
        cluster_color: String::new(),
        list_price: price.parse::<Decimal>().expect("price"),
        stock: 3,
        height: Decimal::from(18),
        supplier: Some("Acme".to_string()),
    }
}

fn guess(name: &str, color: &str) -> VisionAnalysisResult {
    VisionAnalysisResult {
        simple_name: name.to_string(),
        color: color.to_string(),
    }
}

#[test]
fn exact_partial_and_unresolved_colors_order_by_color_first() {
    let items = vec![
        product(3, "Rose", "Mystery", "30"),
        product(1, "Rose", "Red", "10"),
        product(2, "Rose", "Dark Red", "20"),
    ];
    let snapshot = store().snapshot();
    let ranked = rank_matches(
        &items,
        &guess("Rose", "Red"),
        &snapshot,
        &MatchSettings::default(),
    );

    assert_eq!(ranked.len(), 3);
    assert!(ranked.iter().all(|s| s.name_score == 60));

    let exact = &ranked[0];
    let partial = &ranked[1];
    let unresolved = &ranked[2];
    assert_eq!(exact.item.id, 1);
    assert_eq!(exact.color_score, 40);
    assert_eq!(partial.item.id, 2);
    assert!(
        partial.color_score > 0 && partial.color_score < 40,
        "partial color score {}",
        partial.color_score
    );
    assert_eq!(unresolved.item.id, 3);
    assert_eq!(unresolved.color_score, 0);
    assert_eq!(unresolved.match_score, 60);
}

#[test]
fn color_outranks_price_within_equal_name_score() {
    let items = vec![
        product(1, "Rose", "Black", "1"),
        product(2, "Rose", "Red", "29.99"),
        product(3, "Rose", "Dark Red", "15"),
    ];
    let ranked = rank_matches(
        &items,
        &guess("roses", "red"),
        &store().snapshot(),
        &MatchSettings::default(),
    );
    let ids: Vec<i64> = ranked.iter().map(|s| s.item.id).collect();
    assert_eq!(ids, [2, 3, 1]);
    assert_eq!(ranked[2].color_score, 0);
    assert!(ranked[1].color_score > 0 && ranked[1].color_score < 40);
}

#[test]
fn unresolved_analysis_color_scores_name_only() {
    let items = vec![product(1, "Rose", "Red", "10"), product(2, "Rose", "Blue", "5")];
    let ranked = rank_matches(
        &items,
        &guess("Rose", "iridescent"),
        &store().snapshot(),
        &MatchSettings::default(),
    );
    assert!(ranked.iter().all(|s| s.color_score == 0 && s.match_score == 60));
    let ids: Vec<i64> = ranked.iter().map(|s| s.item.id).collect();
    assert_eq!(ids, [2, 1]);
}

#[test]
fn multi_word_synonym_matches_description() {
    let mut spray = product(1, "Eucalyptus", "Sage", "12");
    spray.description = "Silver dollar spray, 24in".to_string();
    let ranked = rank_matches(
        &[spray],
        &guess("Silver Dollar", "sage"),
        &store().snapshot(),
        &MatchSettings::default(),
    );
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].name_score, 60);
    assert_eq!(ranked[0].color_score, 40);
}

#[test]
fn fallback_guess_only_matches_that_label() {
    let mut other = product(1, "Other Flower", "White", "8");
    other.description = "Mixed filler".to_string();
    let rose = product(2, "Rose", "White", "8");
    let ranked = rank_matches(
        &[other, rose],
        &guess("Other Flower", "white"),
        &store().snapshot(),
        &MatchSettings::default(),
    );
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].item.id, 1);
    assert_eq!(ranked[0].match_score, 100);
}

#[test]
fn settings_file_overrides_gate_and_floor() {
    let settings = MatchSettings {
        allowed_display_categories: vec!["Floral".to_string()],
        price_ceiling: Decimal::from(12),
        noise_floor: 60,
        ..MatchSettings::default()
    };
    let items = vec![
        product(1, "Rose", "Mystery", "10"),
        product(2, "Rose", "Red", "10"),
        product(3, "Rose", "Red", "12.01"),
    ];
    let ranked = rank_matches(&items, &guess("rose", "red"), &store().snapshot(), &settings);
    let ids: Vec<i64> = ranked.iter().map(|s| s.item.id).collect();
    assert_eq!(ids, [2]);
}

#[test]
fn suggested_cluster_color_for_ranked_items() {
    let items = vec![product(1, "Rose", "Dusty Pink/Ivory", "10"), product(2, "Rose", "??", "10")];
    assert_eq!(suggest_cluster_color(&items[0]), "pink");
    assert_eq!(suggest_cluster_color(&items[1]), "");
}
