//! Paginated table extraction and normalization
//!
//! This module turns the rendered results grid into canonical records:
//! - [`SchemaRegistry`]: which columns each jurisdiction renders
//! - [`normalize`] / [`RowNormalizer`]: one raw row to one [`Record`]
//! - [`PaginationWalker`]: page-by-page traversal of one target's results

pub mod normalize;
pub mod page;
pub mod record;
pub mod schema;
pub mod walker;

pub use normalize::{RowNormalizer, normalize};
pub use page::{ELLIPSIS, PageSource, PaginationLink, RawPage, RawRow};
pub use record::{Field, Record, RecordSet};
pub use schema::{Layout, Schema, SchemaRegistry};
pub use walker::{Decision, PageWalkState, PaginationWalker, Transition, decide};
