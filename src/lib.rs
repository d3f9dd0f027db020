//! # probate-search
//!
//! Search the South Carolina probate case index through a Chrome/Chromium session and
//! collect the results as canonical records.
//!
//! ## Features
//!
//! - **Schema Registry**: one declarative table of per-jurisdiction results layouts
//! - **Row Normalization**: 8, 9 and 10 column layouts mapped into one 9-field [`Record`]
//! - **Pagination Walking**: direct page links and the ellipsis jump to the next block of pages
//! - **Ordered Aggregation**: many jurisdictions in one run, results in submission order
//! - **CSV Export**: canonical header row, one line per record
//!
//! ## Command Line
//!
//! ```bash
//! # Every estate with a last name starting with "Smi" in two counties
//! cargo run --bin probate-search -- -c Aiken -c Charleston -l "Smi%"
//!
//! # Every county with a known layout, visible browser, verbose logging
//! cargo run --bin probate-search -- -c ALL -l "Smith" --headed -vv
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use probate_search::{BrowserSession, LaunchOptions, ProbateSite, SchemaRegistry, SearchOrchestrator, SiteConfig, TargetQuery};
//!
//! # fn main() -> probate_search::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! let site = ProbateSite::new(&session, SiteConfig::default());
//! let registry = SchemaRegistry::standard();
//!
//! let targets = vec![
//!     TargetQuery::estate("Aiken").with_last_name("Smi%"),
//!     TargetQuery::estate("Charleston").with_last_name("Smi%"),
//! ];
//!
//! let results = SearchOrchestrator::new(site, &registry).run(&targets)?;
//! println!("{} Records Found.", results.count());
//!
//! probate_search::output::save_csv("results.csv", &results)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: the [`Automation`] surface and its headless_chrome implementation
//! - [`table`]: schemas, row normalization, and the pagination walker
//! - [`search`]: queries, the probate site adapter, and the orchestrator
//! - [`progress`]: per-record progress reporting
//! - [`output`]: CSV export
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod error;
pub mod output;
pub mod progress;
pub mod search;
pub mod table;

pub use browser::{Automation, BrowserSession, ConnectionOptions, ElementRef, LaunchOptions, Locator, Wait};
pub use error::{Result, SearchError};
pub use progress::{DotProgress, NullProgress, Progress};
pub use search::{ProbateSite, RecordType, SearchOrchestrator, SearchSite, SiteConfig, TargetQuery};
pub use table::{Field, Layout, PageSource, PaginationWalker, RawPage, Record, RecordSet, Schema, SchemaRegistry};
