use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

/// An XPath expression that may match any number of elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator(String);

impl Locator {
    pub fn xpath(xpath: impl Into<String>) -> Self {
        Self(xpath.into())
    }

    /// Locator for the element whose `id` attribute equals `id`
    pub fn by_id(id: &str) -> Self {
        Self(format!("//*[@id=\"{}\"]", id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Address of the `n`th match (1-based, XPath convention)
    pub fn nth(&self, n: usize) -> ElementRef {
        ElementRef(format!("({})[{}]", self.0, n))
    }

    /// Treat the locator as a reference to its first (and presumably only) match
    pub fn single(&self) -> ElementRef {
        self.nth(1)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address of a single element
///
/// References are XPath addresses rather than live handles, so they can be held
/// across blocking calls and resolved again after the page re-renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef(String);

impl ElementRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Locator for descendants of this element, relative path such as `td` or `/a`
    pub fn child(&self, relative: &str) -> Locator {
        Locator(format!("{}/{}", self.0, relative))
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How to wait for the view to settle after a blocking action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wait {
    /// Sleep for a fixed duration
    Delay(Duration),

    /// Pause for `settle`, then wait up to `timeout` for `locator` to match
    Element {
        locator: Locator,
        settle: Duration,
        timeout: Duration,
    },
}

impl Default for Wait {
    fn default() -> Self {
        Wait::Delay(Duration::from_secs(5))
    }
}

/// The browser capabilities the search needs
///
/// Every call blocks until the browser has answered. An element wait that runs
/// out is reported as [`SearchError::Timeout`](crate::SearchError::Timeout); any
/// other failure as [`SearchError::Interaction`](crate::SearchError::Interaction).
pub trait Automation {
    fn navigate(&self, url: &str) -> Result<()>;

    /// Pick the `<option>` of a `<select>` whose visible text equals `visible_text`
    fn select_option(&self, element: &ElementRef, visible_text: &str) -> Result<()>;

    fn fill_text(&self, element: &ElementRef, text: &str) -> Result<()>;

    fn click(&self, element: &ElementRef) -> Result<()>;

    /// All current matches of `locator`, in document order
    fn query_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>>;

    /// Rendered text of the element, trimmed
    fn element_text(&self, element: &ElementRef) -> Result<String>;

    fn wait(&self, wait: &Wait) -> Result<()>;
}

impl<A: Automation + ?Sized> Automation for &A {
    fn navigate(&self, url: &str) -> Result<()> {
        (**self).navigate(url)
    }

    fn select_option(&self, element: &ElementRef, visible_text: &str) -> Result<()> {
        (**self).select_option(element, visible_text)
    }

    fn fill_text(&self, element: &ElementRef, text: &str) -> Result<()> {
        (**self).fill_text(element, text)
    }

    fn click(&self, element: &ElementRef) -> Result<()> {
        (**self).click(element)
    }

    fn query_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>> {
        (**self).query_elements(locator)
    }

    fn element_text(&self, element: &ElementRef) -> Result<String> {
        (**self).element_text(element)
    }

    fn wait(&self, wait: &Wait) -> Result<()> {
        (**self).wait(wait)
    }
}
