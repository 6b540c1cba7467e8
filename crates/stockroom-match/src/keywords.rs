//! Boolean keyword expressions for the product search box.
//!
//! Grammar, loosest to tightest:
//!
//! ```text
//! query := group (" OR " group)*        -- case-insensitive OR, spaces required
//! group := term ((whitespace | '+') term)*
//! term  := '-' word                     -- must NOT match
//!        | word                         -- must match
//! ```
//!
//! A term matches an item when it occurs, case-insensitively, in the item's
//! code, SKU, description, or subcategory. An item satisfies the query when
//! at least one group has all of its positive terms matched and none of the
//! query's negative terms match. Negative terms exclude across every group,
//! so `red OR blue -small` reads as `(red OR blue) AND NOT small`.

use std::sync::LazyLock;

use regex::Regex;
use stockroom_core::ProductItem;

static OR_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i) OR ").expect("valid OR delimiter regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Lowercased text without the leading `-`.
    pub text: String,
    pub negated: bool,
}

impl Term {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix('-') {
            Some(rest) if !rest.is_empty() => Self {
                text: rest.to_lowercase(),
                negated: true,
            },
            _ => Self {
                text: raw.to_lowercase(),
                negated: false,
            },
        }
    }

    fn occurs_in(&self, haystacks: &[String]) -> bool {
        haystacks.iter().any(|h| h.contains(&self.text))
    }
}

/// A parsed keyword expression, reusable across many items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordQuery {
    groups: Vec<Vec<Term>>,
}

impl KeywordQuery {
    /// Parses `raw`. Returns `None` when it contains no terms at all, in which
    /// case the keyword filter is inactive.
    ///
    /// Empty groups (e.g. from `"red OR  OR blue"`) are dropped.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let groups: Vec<Vec<Term>> = OR_DELIMITER
            .split(raw)
            .map(|group| {
                group
                    .split(|c: char| c.is_whitespace() || c == '+')
                    .filter(|t| !t.is_empty())
                    .map(Term::parse)
                    .collect::<Vec<_>>()
            })
            .filter(|terms| !terms.is_empty())
            .collect();

        if groups.is_empty() {
            None
        } else {
            Some(Self { groups })
        }
    }

    #[must_use]
    pub fn groups(&self) -> &[Vec<Term>] {
        &self.groups
    }

    #[must_use]
    pub fn matches(&self, item: &ProductItem) -> bool {
        let haystacks = [
            item.code.to_lowercase(),
            item.sku.to_lowercase(),
            item.description.to_lowercase(),
            item.sub_category.to_lowercase(),
        ];
        let excluded = self
            .groups
            .iter()
            .flatten()
            .any(|term| term.negated && term.occurs_in(&haystacks));
        if excluded {
            return false;
        }
        self.groups.iter().any(|group| {
            group
                .iter()
                .filter(|term| !term.negated)
                .all(|term| term.occurs_in(&haystacks))
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn item(code: &str, description: &str, sub_category: &str) -> ProductItem {
        ProductItem {
            id: 1,
            code: code.to_string(),
            sku: String::new(),
            description: description.to_string(),
            category: String::new(),
            display_category: "Floral".to_string(),
            sub_category: sub_category.to_string(),
            color: String::new(),
            cluster_color: String::new(),
            list_price: Decimal::ONE,
            stock: 1,
            height: Decimal::ZERO,
            supplier: None,
        }
    }

    fn matches(query: &str, item: &ProductItem) -> bool {
        KeywordQuery::parse(query).expect("query has terms").matches(item)
    }

    #[test]
    fn blank_query_is_inactive() {
        assert!(KeywordQuery::parse("").is_none());
        assert!(KeywordQuery::parse("   ").is_none());
        assert!(KeywordQuery::parse(" OR ").is_none());
        assert!(KeywordQuery::parse("+ +").is_none());
    }

    #[test]
    fn parse_splits_groups_and_terms() {
        let query = KeywordQuery::parse("red+rose OR Blue -small").unwrap();
        let groups = query.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0][1].text, "rose");
        assert!(!groups[0][1].negated);
        assert_eq!(groups[1][0].text, "blue");
        assert_eq!(groups[1][1].text, "small");
        assert!(groups[1][1].negated);
    }

    #[test]
    fn or_delimiter_is_case_insensitive() {
        assert_eq!(KeywordQuery::parse("red or blue").unwrap().groups().len(), 2);
        assert_eq!(KeywordQuery::parse("red Or blue").unwrap().groups().len(), 2);
    }

    #[test]
    fn or_inside_a_word_does_not_split() {
        let query = KeywordQuery::parse("orchid ORNAMENT").unwrap();
        assert_eq!(query.groups().len(), 1);
        assert_eq!(query.groups()[0].len(), 2);
    }

    #[test]
    fn lone_dash_is_a_positive_term() {
        let query = KeywordQuery::parse("-").unwrap();
        assert!(!query.groups()[0][0].negated);
        assert_eq!(query.groups()[0][0].text, "-");
    }

    #[test]
    fn terms_within_group_are_anded() {
        let rose = item("FL-1", "Red rose stem", "Rose");
        assert!(matches("red rose", &rose));
        assert!(matches("red+stem", &rose));
        assert!(!matches("red tulip", &rose));
    }

    #[test]
    fn negative_term_excludes() {
        let small = item("FL-2", "Small red rose", "Rose");
        let large = item("FL-3", "Large red rose", "Rose");
        assert!(!matches("rose -small", &small));
        assert!(matches("rose -small", &large));
    }

    #[test]
    fn red_or_blue_minus_small_law() {
        let cases = [
            (item("A", "red bloom", "Rose"), true),
            (item("B", "blue bloom", "Hydrangea"), true),
            (item("C", "small blue bloom", "Hydrangea"), false),
            (item("D", "small red bloom", "Rose"), false),
            (item("E", "green bloom", "Fern"), false),
        ];
        for (product, expected) in &cases {
            assert_eq!(
                matches("red OR blue -small", product),
                *expected,
                "item {}",
                product.code
            );
        }
    }

    #[test]
    fn negative_in_an_earlier_group_excludes_from_later_groups() {
        let big_blue = item("B", "big blue bloom", "Hydrangea");
        let red = item("R", "red bloom", "Rose");
        assert!(!matches("red -big OR blue", &big_blue));
        assert!(matches("red -big OR blue", &red));
        assert!(matches("red -big OR blue", &item("C", "blue bloom", "Hydrangea")));
    }

    #[test]
    fn negative_only_query_keeps_everything_else() {
        assert!(matches("-small", &item("A", "large rose", "Rose")));
        assert!(!matches("-small", &item("B", "small rose", "Rose")));
    }

    #[test]
    fn matches_any_searchable_field_case_insensitively() {
        let mut product = item("PEONY-12", "", "Peony");
        product.sku = "SKU-Blush-Xl".to_string();
        assert!(matches("peony-12", &product));
        assert!(matches("BLUSH", &product));
        assert!(matches("peony", &product));
        assert!(!matches("ivory", &product));
    }

    #[test]
    fn color_and_category_are_not_searched() {
        let mut product = item("X-1", "stem", "Rose");
        product.color = "Ivory".to_string();
        product.display_category = "Floral".to_string();
        assert!(!matches("ivory", &product));
        assert!(!matches("floral", &product));
    }
}
