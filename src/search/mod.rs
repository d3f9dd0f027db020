//! Submitting searches and aggregating their results
//!
//! - [`TargetQuery`]: one jurisdiction plus name criteria
//! - [`SearchSite`] / [`ProbateSite`]: the search form and results grid
//! - [`SearchOrchestrator`]: runs every target in order and collects a [`RecordSet`](crate::table::RecordSet)

pub mod orchestrator;
pub mod query;
pub mod site;

pub use orchestrator::{SearchOrchestrator, preflight};
pub use query::{NamePart, RecordType, TargetQuery, display_name, display_names, resolve_alias};
pub use site::{ProbateSite, SITE_URL, SearchSite, SiteConfig};
