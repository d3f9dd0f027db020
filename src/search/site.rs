use crate::{browser::{Automation, Locator, Wait},
            error::{Result, SearchError},
            search::query::{NamePart, TargetQuery},
            table::{PageSource, PaginationLink, RawPage, RawRow}};
use std::time::Duration;

/// Public search page of the South Carolina probate case index
pub const SITE_URL: &str = "https://www.southcarolinaprobate.net/search/";

/// Where the search form and results grid live on the site
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Search page URL
    pub url: String,

    /// `id` of the jurisdiction `<select>`
    pub jurisdiction_select: String,

    /// `id` of the last (or business) name input
    pub last_name_input: String,

    /// `id` of the first name input
    pub first_name_input: String,

    /// `id` of the middle name input
    pub middle_name_input: String,

    /// `id` of the search button
    pub search_button: String,

    /// `id` of the results grid `<table>`
    pub results_grid: String,

    /// Wait applied after the search is submitted and after every pager click
    pub settle: Wait,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: SITE_URL.to_string(),
            jurisdiction_select: "ctl00_ContentPlaceHolder1_ddlCounties".to_string(),
            last_name_input: "ctl00_ContentPlaceHolder1_tbLastName".to_string(),
            first_name_input: "ctl00_ContentPlaceHolder1_tbFirstName".to_string(),
            middle_name_input: "ctl00_ContentPlaceHolder1_tbMiddleName".to_string(),
            search_button: "ctl00_ContentPlaceHolder1_btnSearch".to_string(),
            results_grid: "ctl00_ContentPlaceHolder1_cgvCases".to_string(),
            settle: Wait::default(),
        }
    }
}

impl SiteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set search page URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builder method: set the settle wait
    pub fn settle(mut self, wait: Wait) -> Self {
        self.settle = wait;
        self
    }

    /// Builder method: after a short pause, wait up to `timeout` for the results grid
    pub fn wait_for_grid(mut self, pause: Duration, timeout: Duration) -> Self {
        self.settle = Wait::Element {
            locator: Locator::by_id(&self.results_grid),
            settle: pause,
            timeout,
        };
        self
    }

    /// Every row of the results grid, header and pager row included
    pub fn result_rows(&self) -> Locator {
        Locator::xpath(format!("{}/tbody/tr", Locator::by_id(&self.results_grid)))
    }

    fn name_input(&self, part: NamePart) -> Locator {
        let id = match part {
            NamePart::Last => &self.last_name_input,
            NamePart::First => &self.first_name_input,
            NamePart::Middle => &self.middle_name_input,
        };
        Locator::by_id(id)
    }
}

/// A search form that can be submitted and whose results can be paged
pub trait SearchSite: PageSource {
    /// Fill in and submit the form for one target, then wait for the first results
    fn submit(&mut self, jurisdiction_id: &str, query: &TargetQuery) -> Result<()>;
}

/// The probate index driven through an [`Automation`] surface
pub struct ProbateSite<A: Automation> {
    automation: A,
    config: SiteConfig,
}

impl<A: Automation> ProbateSite<A> {
    pub fn new(automation: A, config: SiteConfig) -> Self {
        Self { automation, config }
    }

    pub fn automation(&self) -> &A {
        &self.automation
    }
}

impl<A: Automation> SearchSite for ProbateSite<A> {
    fn submit(&mut self, jurisdiction_id: &str, query: &TargetQuery) -> Result<()> {
        log::info!("Searching {} ({})", jurisdiction_id, query.record_type);

        self.automation.navigate(&self.config.url)?;

        let select = Locator::by_id(&self.config.jurisdiction_select).single();
        self.automation.select_option(&select, jurisdiction_id)?;

        for (part, value) in query.name_parts() {
            let input = self.config.name_input(part).single();
            self.automation.fill_text(&input, value)?;
        }

        let search = Locator::by_id(&self.config.search_button).single();
        self.automation.click(&search)?;

        // The grid is not rendered at all when nothing matched
        match self.automation.wait(&self.config.settle) {
            Err(SearchError::Timeout(locator)) => {
                log::info!("{}: no results grid ({} never appeared)", jurisdiction_id, locator);
                Ok(())
            }
            other => other,
        }
    }
}

impl<A: Automation> PageSource for ProbateSite<A> {
    fn fetch_page(&mut self) -> Result<RawPage> {
        let rows = self.automation.query_elements(&self.config.result_rows())?;
        let Some(pager_row) = rows.last() else {
            return Ok(RawPage::default());
        };

        let mut table: Vec<RawRow> = Vec::with_capacity(rows.len());
        for row in &rows {
            let cells = self.automation.query_elements(&row.child("td"))?;
            let texts = cells
                .iter()
                .map(|cell| self.automation.element_text(cell))
                .collect::<Result<RawRow>>()?;
            table.push(texts);
        }

        let mut links = Vec::new();
        for anchor in self.automation.query_elements(&pager_row.child("/a"))? {
            let label = self.automation.element_text(&anchor)?;
            links.push(PaginationLink::new(label, anchor));
        }

        Ok(RawPage::from_table_rows(table, links))
    }

    fn follow(&mut self, link: &PaginationLink) -> Result<()> {
        log::debug!("Following pager link '{}'", link.label);
        self.automation.click(&link.action)?;
        self.automation.wait(&self.config.settle)
    }
}
