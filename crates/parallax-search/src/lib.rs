//! Parallax Search — text matchers, result ordering, and per-view searchers
//!
//! The primary and secondary graphs are searched directly; combined and super
//! results are derived from them by membership projection, never re-searched.

pub mod highlight;
pub mod matcher;
pub mod order;
pub mod query;
pub mod result;
pub mod searcher;


pub use highlight::{
    highlight_results, recolor_combined, remove_highlighting, restore_borders, HighlightColors,
};
pub use matcher::TextMatcher;
pub use order::{anchor_of, cmp_objects, cmp_results, sort_objects};
pub use query::{SearchError, SearchQuery};
pub use result::{ResultObject, SearchResult};
pub use searcher::{GraphSearcher, ResultAddresses};
