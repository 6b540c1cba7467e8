//! Product retrieval for the Stockroom catalog.
//!
//! Two independent paths over the same in-memory product list:
//! [`filter_products`] applies user-entered structured filters, and
//! [`rank_matches`] turns a vision-analysis guess into a scored shortlist
//! using the taxonomy snapshot and the color palette. Everything here is
//! synchronous and side-effect free apart from logging.

pub mod color;
pub mod filter;
pub mod keywords;
pub mod ranker;

pub use color::{
    closest_cluster_color, cluster_colors, distance, palette, resolve, suggest_cluster_color, Rgb,
    UNRESOLVED_DISTANCE,
};
pub use filter::{filter_products, CompiledFilter, FilterSpec, ValueRange, UNRESTRICTED};
pub use keywords::KeywordQuery;
pub use ranker::{rank_matches, COLOR_WEIGHT, NAME_WEIGHT};
