//! Browser session management and the automation surface the search runs against
//!
//! - [`Automation`]: the capabilities the search needs (navigate, select, fill, click, query, read text, wait)
//! - [`BrowserSession`]: a headless_chrome implementation of [`Automation`]
//! - [`LaunchOptions`] / [`ConnectionOptions`]: how to get a browser

pub mod automation;
pub mod config;
pub mod session;

pub use automation::{Automation, ElementRef, Locator, Wait};
pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
