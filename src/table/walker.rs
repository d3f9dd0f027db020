use crate::{error::Result,
            progress::Progress,
            table::{normalize::RowNormalizer,
                    page::{PageSource, PaginationLink},
                    record::Record,
                    schema::Schema}};

/// Position of a walk through one target's result pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWalkState {
    /// Page currently on screen, 1-based
    pub current_page: u32,
    /// Set once the walk reached the end of the content
    pub terminal: bool,
}

impl Default for PageWalkState {
    fn default() -> Self {
        Self {
            current_page: 1,
            terminal: false,
        }
    }
}

/// What the pager row says to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<'l> {
    /// Follow the link numbered `current + 1`
    Direct(&'l PaginationLink),
    /// Follow the trailing ellipsis to the next block of page numbers
    EllipsisJump(&'l PaginationLink),
    EndOfContent,
}

/// Outcome of one walker iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    DirectAdvance { to: u32 },
    EllipsisJump { to: u32 },
    EndOfContent,
}

/// Decide how to leave `current_page` given the pager links on screen
///
/// The first non-ellipsis link numbered `current_page + 1` wins. Failing that, the
/// trailing ellipsis is followed only when `current_page` is past the number on the
/// second-to-last link. The current page is rendered as plain text rather than a
/// link, so that holds on the last page of a block.
pub fn decide(links: &[PaginationLink], current_page: u32) -> Decision<'_> {
    let Some(first) = links.first() else {
        return Decision::EndOfContent;
    };
    if first.label.is_empty() {
        return Decision::EndOfContent;
    }

    let wanted = current_page + 1;
    if let Some(link) = links
        .iter()
        .find(|link| !link.is_ellipsis && link.page_number() == Some(wanted))
    {
        return Decision::Direct(link);
    }

    let [.., second_to_last, last] = links else {
        return Decision::EndOfContent;
    };
    match second_to_last.page_number() {
        Some(label) if current_page > label && last.is_ellipsis => Decision::EllipsisJump(last),
        _ => Decision::EndOfContent,
    }
}

/// Walks one target's paginated results and collects its records
///
/// Each walker owns its state; the orchestrator builds a fresh one per target.
pub struct PaginationWalker<'a> {
    schema: &'a Schema,
    state: PageWalkState,
    records: Vec<Record>,
    pages_read: usize,
}

impl<'a> PaginationWalker<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            state: PageWalkState::default(),
            records: Vec::new(),
            pages_read: 0,
        }
    }

    pub fn state(&self) -> PageWalkState {
        self.state
    }

    /// Records accepted so far, in page then row order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of pages fetched so far
    pub fn pages_read(&self) -> usize {
        self.pages_read
    }

    /// Fetch the page on screen, keep its records and move to the next page if there is one
    pub fn step<S>(&mut self, source: &mut S, progress: &mut dyn Progress) -> Result<Transition>
    where
        S: PageSource + ?Sized,
    {
        if self.state.terminal {
            return Ok(Transition::EndOfContent);
        }

        let page = source.fetch_page()?;
        self.pages_read += 1;

        if !page.has_rows() {
            log::debug!(
                "{}: page {} has no data rows",
                self.schema.jurisdiction_id(),
                self.state.current_page
            );
            return Ok(self.finish());
        }

        let before = self.records.len();
        let mut normalizer = RowNormalizer::new(self.schema, progress);
        self.records
            .extend(page.data_rows.iter().filter_map(|row| normalizer.normalize(row)));

        log::debug!(
            "{}: page {} gave {} of {} rows, {} pager links",
            self.schema.jurisdiction_id(),
            self.state.current_page,
            self.records.len() - before,
            page.data_rows.len(),
            page.pagination_links.len()
        );

        for link in &page.pagination_links {
            if !link.is_ellipsis && !link.label.is_empty() && link.page_number().is_none() {
                log::warn!("{}: unrecognized pager label '{}'", self.schema.jurisdiction_id(), link.label);
            }
        }

        let transition = match decide(&page.pagination_links, self.state.current_page) {
            Decision::Direct(link) => {
                source.follow(link)?;
                self.state.current_page += 1;
                Transition::DirectAdvance {
                    to: self.state.current_page,
                }
            }
            Decision::EllipsisJump(link) => {
                source.follow(link)?;
                self.state.current_page += 1;
                Transition::EllipsisJump {
                    to: self.state.current_page,
                }
            }
            Decision::EndOfContent => self.finish(),
        };

        Ok(transition)
    }

    /// Step until the end of the content and hand back the collected records
    ///
    /// There is no page limit: a pager that always offers a next page keeps the walk going.
    pub fn walk<S>(mut self, source: &mut S, progress: &mut dyn Progress) -> Result<Vec<Record>>
    where
        S: PageSource + ?Sized,
    {
        while self.step(source, progress)? != Transition::EndOfContent {}

        log::debug!(
            "{}: walked {} pages, {} records",
            self.schema.jurisdiction_id(),
            self.pages_read,
            self.records.len()
        );

        Ok(self.records)
    }

    fn finish(&mut self) -> Transition {
        self.state.terminal = true;
        Transition::EndOfContent
    }
}
