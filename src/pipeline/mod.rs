//! Paragraph extraction pipeline.
//!
//! ```text
//! Page (blocks → lines → spans)
//!     ↓
//! [partition_blocks] (header / body / footer)
//!     ↓
//! [group_into_boxes] → [ColumnBuilder] → [assign_reading_order]
//!     ↓
//! Column[] (ordered)
//!     ↓
//! [ParagraphMerger] (per block, shared StyleCatalog)
//!     ↓
//! PageParagraphs (display order)
//! ```

pub mod output;
pub mod page_layout;

pub use output::{DocumentParagraphs, PageParagraphs};
pub use page_layout::PageLayout;

use indexmap::IndexMap;

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::layout::text_block::Page;
use crate::text::paragraph::{Paragraph, ParagraphMerger};
use crate::text::style::StyleCatalog;
use crate::utils::safe_float_cmp;

/// Drives layout analysis and paragraph merging over pages.
#[derive(Debug, Clone, Default)]
pub struct ParagraphExtractor {
    config: ExtractionConfig,
}

impl ParagraphExtractor {
    /// Create an extractor with the given configuration.
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract the paragraphs of one page.
    ///
    /// Styles are registered in `catalog`, which the caller shares across
    /// the pages of one document.
    ///
    /// Paragraphs are ordered by `(column_order, bbox.y0, first_line_number)`
    /// and numbered from 1. A paragraph whose id is already taken on this page
    /// is kept under `"{id}_dupN"`.
    pub fn process_page(&self, page: &Page, catalog: &mut StyleCatalog) -> Result<PageParagraphs> {
        let columns = PageLayout::analyze(page, &self.config.bands)?;

        let mut merger = ParagraphMerger::new(catalog);
        let mut collected: Vec<Paragraph> = Vec::new();
        for column in &columns {
            for block in &column.blocks {
                collected.extend(merger.merge_block(page.number, column.order, block).into_values());
            }
        }

        collected.sort_by(|a, b| {
            a.column_order
                .cmp(&b.column_order)
                .then_with(|| safe_float_cmp(a.bbox.y0, b.bbox.y0))
                .then_with(|| a.first_line_number.cmp(&b.first_line_number))
        });

        let mut paragraphs: IndexMap<String, Paragraph> = IndexMap::with_capacity(collected.len());
        for (idx, mut paragraph) in collected.into_iter().enumerate() {
            paragraph.order = idx as u32 + 1;
            if paragraphs.contains_key(&paragraph.id) {
                let unique = (1..)
                    .map(|n| format!("{}_dup{}", paragraph.id, n))
                    .find(|candidate| !paragraphs.contains_key(candidate))
                    .unwrap_or_default();
                log::warn!(
                    "Page {}: duplicate paragraph id {}, stored as {}",
                    page.number,
                    paragraph.id,
                    unique
                );
                paragraph.id = unique;
            }
            paragraphs.insert(paragraph.id.clone(), paragraph);
        }

        log::debug!("Page {}: {} paragraphs", page.number, paragraphs.len());

        Ok(PageParagraphs {
            page: page.number,
            paragraphs,
        })
    }

    /// Extract the paragraphs of every page with one style catalog for the run.
    ///
    /// # Examples
    ///
    /// ```
    /// use paraflow::config::ExtractionConfig;
    /// use paraflow::geometry::BBox;
    /// use paraflow::layout::text_block::{Block, Line, Page, Span};
    /// use paraflow::pipeline::ParagraphExtractor;
    ///
    /// let line = Line::new(BBox::new(0.0, 0.0, 100.0, 10.0), vec![Span::new("Hello world.", "Times New Roman", 11.2)]);
    /// let page = Page::new(1, vec![Block::new(0, BBox::new(0.0, 0.0, 100.0, 10.0), vec![line])]);
    ///
    /// let doc = ParagraphExtractor::new(ExtractionConfig::new()).process_document(&[page]).unwrap();
    /// assert_eq!(doc.pages[0].paragraphs["0_0"].src_text, "Hello world.");
    /// assert_eq!(doc.styles["Times_New_Roman_0110"], "font-family: Times New Roman; font-size: 11.0px;");
    /// ```
    pub fn process_document(&self, pages: &[Page]) -> Result<DocumentParagraphs> {
        let mut catalog = StyleCatalog::new();
        let pages = pages
            .iter()
            .map(|page| self.process_page(page, &mut catalog))
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "Extracted paragraphs from {} pages, {} styles",
            pages.len(),
            catalog.len()
        );

        Ok(DocumentParagraphs {
            pages,
            styles: catalog.css_map(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;
    use crate::layout::text_block::{Block, Line, Span};

    fn text_block(number: u32, bbox: BBox, texts: &[&str]) -> Block {
        let lines = texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let y = bbox.y0 + i as f32 * 12.0;
                Line::new(BBox::new(bbox.x0, y, bbox.x1, y + 10.0), vec![Span::new(*t, "Times", 10.0)])
            })
            .collect();
        let mut block = Block::new(number, bbox, lines);
        block.number_lines();
        block
    }

    #[test]
    fn test_display_order_follows_columns() {
        let page = Page::new(
            2,
            vec![
                text_block(0, BBox::new(300.0, 0.0, 550.0, 400.0), &["Right column."]),
                text_block(1, BBox::new(0.0, 0.0, 250.0, 400.0), &["Left column."]),
                text_block(2, BBox::new(0.0, 780.0, 550.0, 800.0), &["Page 2"]),
            ],
        );
        let extractor = ParagraphExtractor::new(ExtractionConfig::new().with_footer_y0(760.0));
        let mut catalog = StyleCatalog::new();
        let result = extractor.process_page(&page, &mut catalog).unwrap();

        assert_eq!(result.page, 2);
        assert_eq!(result.texts(), vec!["Left column.", "Right column.", "Page 2"]);
        let orders: Vec<(u32, u32)> = result
            .paragraphs
            .values()
            .map(|p| (p.column_order, p.order))
            .collect();
        assert_eq!(orders, vec![(1, 1), (2, 2), (999, 3)]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_paragraphs_within_column_sorted_by_y() {
        let page = Page::new(
            1,
            vec![text_block(
                0,
                BBox::new(0.0, 0.0, 250.0, 100.0),
                &["First.", "Second.", "Third."],
            )],
        );
        let extractor = ParagraphExtractor::default();
        let result = extractor.process_page(&page, &mut StyleCatalog::new()).unwrap();

        let ids: Vec<&String> = result.paragraphs.keys().collect();
        assert_eq!(ids, vec!["0_0", "0_1", "0_2"]);
    }

    #[test]
    fn test_duplicate_ids_are_suffixed() {
        // Two blocks sharing a number produce colliding ids
        let page = Page::new(
            1,
            vec![
                text_block(5, BBox::new(0.0, 0.0, 250.0, 10.0), &["Upper."]),
                text_block(5, BBox::new(0.0, 100.0, 250.0, 110.0), &["Lower."]),
            ],
        );
        let result = ParagraphExtractor::default()
            .process_page(&page, &mut StyleCatalog::new())
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.paragraphs["5_0"].src_text, "Upper.");
        assert_eq!(result.paragraphs["5_0_dup1"].src_text, "Lower.");
        assert_eq!(result.paragraphs["5_0_dup1"].id, "5_0_dup1");
    }

    #[test]
    fn test_document_shares_styles() {
        let pages = vec![
            Page::new(1, vec![text_block(0, BBox::new(0.0, 0.0, 250.0, 10.0), &["One."])]),
            Page::new(2, vec![text_block(0, BBox::new(0.0, 0.0, 250.0, 10.0), &["Two."])]),
        ];
        let doc = ParagraphExtractor::default().process_document(&pages).unwrap();

        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.paragraph_count(), 2);
        assert_eq!(doc.styles.len(), 1);
        // Same id on different pages is fine
        assert!(doc.paragraphs().all(|p| p.id == "0_0"));
    }

    #[test]
    fn test_empty_document() {
        let doc = ParagraphExtractor::default().process_document(&[]).unwrap();
        assert!(doc.pages.is_empty());
        assert!(doc.styles.is_empty());
    }
}
