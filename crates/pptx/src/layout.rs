//! Pagination of slide descriptors into physical deck pages.
//!
//! A table slide whose rows do not fit on one page continues on further
//! pages. Each continuation repeats the table header and keeps the slide
//! number of the slide it continues.

use std::ops::Range;

use bid_core::{SlideContent, SlideDescriptor};

/// One physical page of the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub slide: &'a SlideDescriptor,
    /// Zero-based part index within the slide.
    pub part: usize,
    /// Number of pages the slide spans.
    pub parts: usize,
    /// Table rows shown on this page; empty for non-table slides.
    pub rows: Range<usize>,
}

impl Page<'_> {
    pub fn is_continuation(&self) -> bool {
        self.part > 0
    }

    /// Page title, marking continuations.
    pub fn title(&self) -> String {
        if self.is_continuation() {
            format!("{} (cont.)", self.slide.title)
        } else {
            self.slide.title.clone()
        }
    }
}

/// Split slides into pages of at most `rows_per_page` table rows.
pub fn paginate(slides: &[SlideDescriptor], rows_per_page: usize) -> Vec<Page<'_>> {
    let per_page = rows_per_page.max(1);
    let mut pages = Vec::with_capacity(slides.len());

    for slide in slides {
        let total_rows = match &slide.content {
            SlideContent::Table(table) => table.rows.len(),
            _ => 0,
        };
        // An empty table still gets its header page.
        let parts = total_rows.div_ceil(per_page).max(1);

        for part in 0..parts {
            let start = part * per_page;
            let end = (start + per_page).min(total_rows);
            pages.push(Page {
                slide,
                part,
                parts,
                rows: start..end,
            });
        }

        if parts > 1 {
            log::debug!(
                "Slide {} ({} rows) spans {} pages",
                slide.number,
                total_rows,
                parts
            );
        }
    }

    pages
}
