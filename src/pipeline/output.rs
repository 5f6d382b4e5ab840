//! Extraction results.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::text::paragraph::Paragraph;

/// Paragraphs of one page, keyed by id in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageParagraphs {
    /// Page number
    pub page: u32,
    /// Paragraphs by id, ordered by [`Paragraph::order`]
    pub paragraphs: IndexMap<String, Paragraph>,
}

impl PageParagraphs {
    /// Number of paragraphs on the page.
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// True when the page produced no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Paragraph texts in display order.
    pub fn texts(&self) -> Vec<&str> {
        self.paragraphs.values().map(|p| p.src_text.as_str()).collect()
    }
}

/// Paragraphs of a whole document plus the style dictionary they reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentParagraphs {
    /// Per-page results in input order
    pub pages: Vec<PageParagraphs>,
    /// Style key to CSS declaration, sorted by key
    pub styles: BTreeMap<String, String>,
}

impl DocumentParagraphs {
    /// Total paragraph count across pages.
    pub fn paragraph_count(&self) -> usize {
        self.pages.iter().map(PageParagraphs::len).sum()
    }

    /// Iterate over every paragraph, page by page.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.pages.iter().flat_map(|p| p.paragraphs.values())
    }
}
