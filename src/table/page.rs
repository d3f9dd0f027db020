use crate::{browser::ElementRef, error::Result};

/// Cell texts of one table row, in column order
pub type RawRow = Vec<String>;

/// Label the pager uses for a truncated run of page numbers
pub const ELLIPSIS: &str = "...";

/// One entry of the pager row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationLink {
    pub label: String,
    pub is_ellipsis: bool,
    /// Element to click to follow the link
    pub action: ElementRef,
}

impl PaginationLink {
    pub fn new(label: impl Into<String>, action: ElementRef) -> Self {
        let label = label.into();
        let is_ellipsis = is_ellipsis_label(&label);
        Self {
            label,
            is_ellipsis,
            action,
        }
    }

    /// Page number the link leads to; `None` for the ellipsis or any non-numeric label
    pub fn page_number(&self) -> Option<u32> {
        if self.is_ellipsis {
            return None;
        }
        self.label.trim().parse().ok()
    }
}

fn is_ellipsis_label(label: &str) -> bool {
    matches!(label.trim(), ELLIPSIS | "\u{2026}")
}

/// One snapshot of the results table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPage {
    /// Every row between the header row and the pager row
    pub data_rows: Vec<RawRow>,
    /// Links found in the pager row, in display order
    pub pagination_links: Vec<PaginationLink>,
}

impl RawPage {
    pub fn new(data_rows: Vec<RawRow>, pagination_links: Vec<PaginationLink>) -> Self {
        Self {
            data_rows,
            pagination_links,
        }
    }

    /// Build a page from all rendered table rows: the first row is the header,
    /// the last carries the pager, everything in between is data
    pub fn from_table_rows(mut rows: Vec<RawRow>, pagination_links: Vec<PaginationLink>) -> Self {
        let data_rows = if rows.len() > 2 {
            rows.pop();
            rows.remove(0);
            rows
        } else {
            Vec::new()
        };

        Self::new(data_rows, pagination_links)
    }

    pub fn has_rows(&self) -> bool {
        !self.data_rows.is_empty()
    }
}

/// Where the walker gets pages from
pub trait PageSource {
    /// Read the results table as currently rendered
    fn fetch_page(&mut self) -> Result<RawPage>;

    /// Invoke the link's action and wait until the table has re-rendered
    fn follow(&mut self, link: &PaginationLink) -> Result<()>;
}

impl<S: PageSource + ?Sized> PageSource for &mut S {
    fn fetch_page(&mut self) -> Result<RawPage> {
        (**self).fetch_page()
    }

    fn follow(&mut self, link: &PaginationLink) -> Result<()> {
        (**self).follow(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::Locator;

    fn link(label: &str) -> PaginationLink {
        PaginationLink::new(label, Locator::xpath("//a").single())
    }

    fn rows(n: usize) -> Vec<RawRow> {
        (0..n).map(|i| vec![format!("row{}", i)]).collect()
    }

    #[test]
    fn test_link_page_numbers() {
        assert_eq!(link("7").page_number(), Some(7));
        assert_eq!(link(" 12 ").page_number(), Some(12));
        assert_eq!(link("...").page_number(), None);
        assert_eq!(link("Next").page_number(), None);
        assert_eq!(link("").page_number(), None);
    }

    #[test]
    fn test_ellipsis_detection() {
        assert!(link("...").is_ellipsis);
        assert!(link("\u{2026}").is_ellipsis);
        assert!(!link("..").is_ellipsis);
        assert!(!link("3").is_ellipsis);
    }

    #[test]
    fn test_from_table_rows_drops_header_and_pager() {
        let page = RawPage::from_table_rows(rows(5), Vec::new());
        assert_eq!(page.data_rows, vec![vec!["row1"], vec!["row2"], vec!["row3"]]);
        assert!(page.has_rows());
    }

    #[test]
    fn test_from_table_rows_with_only_structural_rows() {
        assert!(!RawPage::from_table_rows(rows(0), Vec::new()).has_rows());
        assert!(!RawPage::from_table_rows(rows(1), Vec::new()).has_rows());
        assert!(!RawPage::from_table_rows(rows(2), Vec::new()).has_rows());
    }
}
