//! # Paged Listings
//!
//! [`PagedView`] walks a snapshot of records a page at a time. It is a plain
//! [`Iterator`]: `None` means the listing is over, which is not an error.
//!
//! ```text
//!   Active (cursor < len) --next()--> Active ... --next()--> Exhausted
//! ```
//!
//! Without a page size the first page holds everything. Numbering runs across
//! pages: with a page size of 2 over 5 records the pages are numbered `1-2`,
//! `3-4` and `5`.

use crate::error::{Result, RolodexError};
use crate::record::{today, Record};
use chrono::NaiveDate;

/// Rejects a zero page size; `None` means "no paging".
pub fn validate_page_size(page_size: Option<usize>) -> Result<Option<usize>> {
    match page_size {
        Some(0) => Err(invalid_page_size("0")),
        other => Ok(other),
    }
}

/// Parses a user-supplied page size. Must be a positive integer.
pub fn parse_page_size(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid_page_size(raw)),
    }
}

fn invalid_page_size(raw: &str) -> RolodexError {
    RolodexError::validation(format!(
        "Positive integer number is expected as the number of records per page, provided: '{}'.",
        raw
    ))
}

/// `"{n}. {summary}"` for each record, numbered from `offset + 1`, blank-line separated.
pub fn render_records(records: &[&Record], offset: usize, today: NaiveDate) -> Result<String> {
    let summaries = records
        .iter()
        .enumerate()
        .map(|(pos, record)| {
            Ok(format!("{}. {}", offset + pos + 1, record.render_summary_on(today)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(summaries.join("\n\n"))
}

#[derive(Debug, Clone)]
pub struct Page<'a> {
    offset: usize,
    records: Vec<&'a Record>,
}

impl<'a> Page<'a> {
    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 1-based number of each record on this page.
    pub fn numbers(&self) -> std::ops::RangeInclusive<usize> {
        self.offset + 1..=self.offset + self.records.len()
    }

    pub fn render(&self) -> Result<String> {
        self.render_on(today())
    }

    pub fn render_on(&self, today: NaiveDate) -> Result<String> {
        render_records(&self.records, self.offset, today)
    }
}

#[derive(Debug, Clone)]
pub struct PagedView<'a> {
    source: Vec<&'a Record>,
    page_size: Option<usize>,
    cursor: usize,
}

impl<'a> PagedView<'a> {
    pub fn new(source: Vec<&'a Record>, page_size: Option<usize>) -> Result<Self> {
        let page_size = validate_page_size(page_size)?;
        Ok(Self {
            source,
            page_size,
            cursor: 0,
        })
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    /// Everything the view walks over, paged or not.
    pub fn records(&self) -> &[&'a Record] {
        &self.source
    }

    pub fn total(&self) -> usize {
        self.source.len()
    }

    pub fn remaining(&self) -> usize {
        self.source.len().saturating_sub(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.source.len()
    }
}

impl<'a> Iterator for PagedView<'a> {
    type Item = Page<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }
        let end = match self.page_size {
            Some(n) => (self.cursor + n).min(self.source.len()),
            None => self.source.len(),
        };
        let page = Page {
            offset: self.cursor,
            records: self.source[self.cursor..end].to_vec(),
        };
        self.cursor = end;
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pages = match self.page_size {
            _ if self.is_exhausted() => 0,
            Some(n) => self.remaining().div_ceil(n),
            None => 1,
        };
        (pages, Some(pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| Record::new(&format!("contact{}", i)).unwrap())
            .collect()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_pages_of_two_over_five() {
        let recs = records(5);
        let view = PagedView::new(recs.iter().collect(), Some(2)).unwrap();
        assert_eq!(view.size_hint(), (3, Some(3)));

        let pages: Vec<Page> = view.collect();
        let sizes: Vec<usize> = pages.iter().map(Page::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);

        let numbers: Vec<usize> = pages.iter().flat_map(Page::numbers).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_rendered_numbering_continues_across_pages() {
        let recs = records(3);
        let mut view = PagedView::new(recs.iter().collect(), Some(2)).unwrap();

        let first = view.next().unwrap().render_on(date()).unwrap();
        assert!(first.starts_with("1. CONTACT INFO"));
        assert!(first.contains("\n\n2. CONTACT INFO"));

        let second = view.next().unwrap().render_on(date()).unwrap();
        assert!(second.starts_with("3. CONTACT INFO"));
        assert!(second.contains("contact3"));

        assert!(view.next().is_none());
        assert!(view.is_exhausted());
        // stays exhausted
        assert!(view.next().is_none());
    }

    #[test]
    fn test_no_page_size_yields_everything_once() {
        let recs = records(4);
        let mut view = PagedView::new(recs.iter().collect(), None).unwrap();
        assert_eq!(view.next().unwrap().len(), 4);
        assert!(view.next().is_none());
    }

    #[test]
    fn test_empty_source_is_exhausted() {
        let mut view = PagedView::new(Vec::new(), Some(3)).unwrap();
        assert!(view.is_exhausted());
        assert_eq!(view.size_hint(), (0, Some(0)));
        assert!(view.next().is_none());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = PagedView::new(Vec::new(), Some(0)).unwrap_err();
        assert!(matches!(err, RolodexError::Validation(_)));
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("3").unwrap(), 3);
        assert_eq!(parse_page_size(" 10 ").unwrap(), 10);
        for raw in ["0", "-1", "m3", "", "2.5"] {
            assert!(parse_page_size(raw).is_err(), "{}", raw);
        }
    }
}
