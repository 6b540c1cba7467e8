//! Free-text color resolution against a fixed RGB palette.

use serde::{Deserialize, Serialize};
use stockroom_core::ProductItem;

/// Returned by [`distance`] when either side is unresolved. Larger than any
/// real RGB distance (√(3·255²) ≈ 441.7).
pub const UNRESOLVED_DISTANCE: f64 = 442.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Canonical color names, lowercase.
///
/// Order matters: the substring pass in [`resolve`] returns the first name
/// contained in the input, so multi-word names come before the single words
/// they contain (`"dusty pink"` before `"pink"`, `"rose gold"` before `"gold"`).
pub(crate) const PALETTE: &[(&str, Rgb)] = &[
    ("dusty pink", Rgb::new(216, 167, 177)),
    ("light pink", Rgb::new(255, 182, 193)),
    ("hot pink", Rgb::new(255, 105, 180)),
    ("rose gold", Rgb::new(183, 110, 121)),
    ("dark red", Rgb::new(139, 0, 0)),
    ("baby blue", Rgb::new(137, 207, 240)),
    ("light blue", Rgb::new(173, 216, 230)),
    ("navy blue", Rgb::new(0, 0, 128)),
    ("dark green", Rgb::new(0, 100, 0)),
    ("forest green", Rgb::new(34, 139, 34)),
    ("off white", Rgb::new(250, 249, 246)),
    ("burgundy", Rgb::new(128, 0, 32)),
    ("red", Rgb::new(255, 0, 0)),
    ("pink", Rgb::new(255, 192, 203)),
    ("blush", Rgb::new(222, 93, 131)),
    ("coral", Rgb::new(255, 127, 80)),
    ("orange", Rgb::new(255, 165, 0)),
    ("peach", Rgb::new(255, 218, 185)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("gold", Rgb::new(255, 215, 0)),
    ("champagne", Rgb::new(247, 231, 206)),
    ("cream", Rgb::new(255, 253, 208)),
    ("ivory", Rgb::new(255, 255, 240)),
    ("white", Rgb::new(255, 255, 255)),
    ("beige", Rgb::new(245, 245, 220)),
    ("tan", Rgb::new(210, 180, 140)),
    ("brown", Rgb::new(165, 42, 42)),
    ("copper", Rgb::new(184, 115, 51)),
    ("sage", Rgb::new(188, 184, 138)),
    ("olive", Rgb::new(128, 128, 0)),
    ("green", Rgb::new(0, 128, 0)),
    ("teal", Rgb::new(0, 128, 128)),
    ("turquoise", Rgb::new(64, 224, 208)),
    ("navy", Rgb::new(0, 0, 128)),
    ("blue", Rgb::new(0, 0, 255)),
    ("lavender", Rgb::new(230, 230, 250)),
    ("lilac", Rgb::new(200, 162, 200)),
    ("mauve", Rgb::new(224, 176, 255)),
    ("plum", Rgb::new(142, 69, 133)),
    ("purple", Rgb::new(128, 0, 128)),
    ("silver", Rgb::new(192, 192, 192)),
    ("grey", Rgb::new(128, 128, 128)),
    ("gray", Rgb::new(128, 128, 128)),
    ("black", Rgb::new(0, 0, 0)),
];

/// Output buckets for coarse color classification. Every entry is a
/// [`PALETTE`] name; ties in [`closest_cluster_color`] go to the earlier one.
pub const CLUSTER_COLORS: &[&str] = &[
    "red",
    "burgundy",
    "pink",
    "light pink",
    "hot pink",
    "coral",
    "orange",
    "peach",
    "yellow",
    "gold",
    "cream",
    "white",
    "beige",
    "brown",
    "green",
    "sage",
    "teal",
    "blue",
    "navy",
    "lavender",
    "purple",
    "silver",
    "black",
];

/// The ordered palette, for callers that want to show or validate names.
#[must_use]
pub fn palette() -> &'static [(&'static str, Rgb)] {
    PALETTE
}

#[must_use]
pub fn cluster_colors() -> &'static [&'static str] {
    CLUSTER_COLORS
}

/// Resolves free-text color to RGB.
///
/// The input is trimmed and lowercased, then tried in three passes:
/// 1. exact palette name;
/// 2. each token after splitting on `/`, `,`, `&` and whitespace, left to right;
/// 3. first palette name (in [`PALETTE`] order) contained in the input.
///
/// Returns `None` when all three miss.
#[must_use]
pub fn resolve(text: &str) -> Option<Rgb> {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    lookup(&normalized)
        .or_else(|| {
            normalized
                .split(|c: char| c.is_whitespace() || matches!(c, '/' | ',' | '&'))
                .filter(|token| !token.is_empty())
                .find_map(lookup)
        })
        .or_else(|| {
            PALETTE
                .iter()
                .find(|(name, _)| normalized.contains(name))
                .map(|(_, rgb)| *rgb)
        })
}

fn lookup(name: &str) -> Option<Rgb> {
    PALETTE
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, rgb)| *rgb)
}

/// Euclidean distance in RGB space, or [`UNRESOLVED_DISTANCE`] if either
/// color is unknown.
#[must_use]
pub fn distance(a: Option<Rgb>, b: Option<Rgb>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => rgb_distance(a, b),
        _ => UNRESOLVED_DISTANCE,
    }
}

pub(crate) fn rgb_distance(a: Rgb, b: Rgb) -> f64 {
    let dr = f64::from(a.r) - f64::from(b.r);
    let dg = f64::from(a.g) - f64::from(b.g);
    let db = f64::from(a.b) - f64::from(b.b);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Nearest cluster color to `text`.
///
/// Returns `""` when the text cannot be resolved; the caller should ask for a
/// manual classification rather than guess.
#[must_use]
pub fn closest_cluster_color(text: &str) -> &'static str {
    let Some(target) = resolve(text) else {
        return "";
    };

    let mut best: Option<(&'static str, f64)> = None;
    for &cluster in CLUSTER_COLORS {
        let Some(rgb) = lookup(cluster) else {
            continue;
        };
        let d = rgb_distance(target, rgb);
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((cluster, d));
        }
    }
    best.map_or("", |(name, _)| name)
}

/// Cluster color suggested from an item's free-text color.
#[must_use]
pub fn suggest_cluster_color(item: &ProductItem) -> &'static str {
    closest_cluster_color(&item.color)
}
