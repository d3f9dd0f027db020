use crate::{browser::{automation::{Automation, ElementRef, Locator, Wait},
                      config::{ConnectionOptions, LaunchOptions}},
            error::{Result, SearchError}};
use headless_chrome::{Browser, Element, Tab, util::Timeout};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Selects the `<option>` whose visible text matches and fires `change`, like a user pick would
const SELECT_BY_TEXT_JS: &str = r#"
    function (text) {
        const option = Array.from(this.options).find(o => o.text.trim() === text);
        if (!option) {
            return false;
        }
        this.value = option.value;
        this.dispatchEvent(new Event('change', { bubbles: true }));
        return true;
    }
"#;

/// Browser session that owns a Chrome/Chromium instance and the one tab the search runs in
pub struct BrowserSession {
    /// Keeps the Chrome process (or the attached connection) alive for the session
    _browser: Browser,

    /// Tab all automation calls go to
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // A search over every county easily outlives the 30 second default
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| SearchError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| SearchError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        log::debug!("Launched browser (headless: {})", options.headless);

        Ok(Self { _browser: browser, tab })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url, Duration::from_millis(options.timeout))
            .map_err(|e| SearchError::ConnectionFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| SearchError::TabOperationFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { _browser: browser, tab })
    }

    /// Navigate to a URL and wait for the load to finish
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| SearchError::interaction("navigate", format!("Failed to navigate to {}: {}", url, e)))?
            .wait_until_navigated()
            .map_err(|e| SearchError::interaction("navigate", format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Resolve an element reference against the current document
    fn resolve(&self, element: &ElementRef, action: &str) -> Result<Element<'_>> {
        self.tab
            .find_element_by_xpath(element.as_str())
            .map_err(|e| SearchError::interaction(action, format!("Element '{}' not found: {}", element, e)))
    }

    /// Evaluate an expression in the page and return its JSON value
    fn evaluate(&self, expression: &str, action: &str) -> Result<serde_json::Value> {
        let result = self
            .tab
            .evaluate(expression, false)
            .map_err(|e| SearchError::interaction(action, e))?;

        result
            .value
            .ok_or_else(|| SearchError::interaction(action, "No value returned from page"))
    }

    /// Close the tab; the browser itself shuts down when the session is dropped
    pub fn close(&self) -> Result<()> {
        self.tab
            .close(true)
            .map_err(|e| SearchError::TabOperationFailed(format!("Failed to close tab: {}", e)))?;

        Ok(())
    }
}

impl Automation for BrowserSession {
    fn navigate(&self, url: &str) -> Result<()> {
        BrowserSession::navigate(self, url)
    }

    fn select_option(&self, element: &ElementRef, visible_text: &str) -> Result<()> {
        let select = self.resolve(element, "select_option")?;
        let result = select
            .call_js_fn(SELECT_BY_TEXT_JS, vec![serde_json::json!(visible_text)], false)
            .map_err(|e| SearchError::interaction("select_option", e))?;

        match result.value.and_then(|v| v.as_bool()) {
            Some(true) => Ok(()),
            _ => Err(SearchError::interaction(
                "select_option",
                format!("No option '{}' in {}", visible_text, element),
            )),
        }
    }

    fn fill_text(&self, element: &ElementRef, text: &str) -> Result<()> {
        self.resolve(element, "fill_text")?
            .type_into(text)
            .map_err(|e| SearchError::interaction("fill_text", e))?;

        Ok(())
    }

    fn click(&self, element: &ElementRef) -> Result<()> {
        self.resolve(element, "click")?
            .click()
            .map_err(|e| SearchError::interaction("click", e))?;

        Ok(())
    }

    fn query_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>> {
        // Count in the page: DOM.performSearch reports "no match" as an error
        let xpath = serde_json::to_string(locator.as_str())
            .map_err(|e| SearchError::interaction("query_elements", e))?;
        let expression = format!(
            "document.evaluate('count(' + {} + ')', document, null, XPathResult.NUMBER_TYPE, null).numberValue",
            xpath
        );

        let count = self
            .evaluate(&expression, "query_elements")?
            .as_f64()
            .ok_or_else(|| SearchError::interaction("query_elements", "Match count is not a number"))?;

        Ok((1..=count as usize).map(|n| locator.nth(n)).collect())
    }

    fn element_text(&self, element: &ElementRef) -> Result<String> {
        let text = self
            .resolve(element, "element_text")?
            .get_inner_text()
            .map_err(|e| SearchError::interaction("element_text", e))?;

        Ok(text.trim().to_string())
    }

    fn wait(&self, wait: &Wait) -> Result<()> {
        match wait {
            Wait::Delay(duration) => {
                std::thread::sleep(*duration);
                Ok(())
            }
            Wait::Element {
                locator,
                settle,
                timeout,
            } => {
                std::thread::sleep(*settle);
                self.tab
                    .wait_for_xpath_with_custom_timeout(locator.as_str(), *timeout)
                    .map_err(|e| {
                        if e.downcast_ref::<Timeout>().is_some() {
                            SearchError::Timeout(locator.to_string())
                        } else {
                            SearchError::interaction("wait", format!("'{}' did not appear: {}", locator, e))
                        }
                    })?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_builder() {
        let opts = LaunchOptions::new().headless(true).window_size(800, 600);

        assert!(opts.headless);
        assert_eq!(opts.window_width, 800);
        assert_eq!(opts.window_height, 600);
    }

    #[test]
    fn test_connection_options() {
        let opts = ConnectionOptions::new("ws://localhost:9222").timeout(5000);

        assert_eq!(opts.ws_url, "ws://localhost:9222");
        assert_eq!(opts.timeout, 5000);
    }

    // Integration tests (require Chrome to be installed)
    #[test]
    #[ignore] // Ignore by default, run with: cargo test -- --ignored
    fn test_launch_browser() {
        let result = BrowserSession::launch(LaunchOptions::new().headless(true));
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_query_elements_counts_matches() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
        session
            .navigate("data:text/html,<html><body><p>one</p><p>two</p></body></html>")
            .expect("Failed to navigate");

        let paragraphs = session.query_elements(&Locator::xpath("//p")).expect("Failed to query");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(session.element_text(&paragraphs[1]).unwrap(), "two");

        let none = session.query_elements(&Locator::xpath("//table")).expect("Failed to query");
        assert!(none.is_empty());
    }

    #[test]
    #[ignore]
    fn test_select_option_unknown_text_fails() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
        session
            .navigate("data:text/html,<html><body><select id='s'><option>Aiken</option></select></body></html>")
            .expect("Failed to navigate");

        let select = Locator::by_id("s").single();
        assert!(session.select_option(&select, "Aiken").is_ok());
        assert!(session.select_option(&select, "York").is_err());
    }
}
