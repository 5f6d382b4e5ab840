// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Paraflow
//!
//! Paragraph reconstruction from positioned PDF text.
//!
//! An upstream extractor hands over pages of blocks, lines and spans with
//! bounding boxes but no notion of columns or paragraphs. Paraflow infers
//! the column structure of each page, orders the columns for reading, and
//! merges lines into paragraphs carrying both plain text and style-annotated
//! HTML.
//!
//! ## Stages
//!
//! - **Bands**: header and footer blocks are split off by externally supplied limits
//! - **Boxes**: overlapping body blocks are clustered
//! - **Columns**: a top-down sweep grows columns while keeping open columns x-disjoint
//! - **Reading order**: columns are chained downward, left before right
//! - **Paragraphs**: lines are merged by punctuation and style heuristics
//!
//! ## Quick Start
//!
//! ```
//! use paraflow::config::ExtractionConfig;
//! use paraflow::geometry::BBox;
//! use paraflow::layout::text_block::{Block, Line, Page, Span};
//! use paraflow::pipeline::ParagraphExtractor;
//!
//! # fn main() -> paraflow::Result<()> {
//! let lines = vec![
//!     Line::new(BBox::new(50.0, 100.0, 300.0, 112.0), vec![Span::new("This is a long-", "Georgia", 10.0)]),
//!     Line::new(BBox::new(50.0, 114.0, 300.0, 126.0), vec![Span::new("winded sentence.", "Georgia", 10.0)]),
//! ];
//! let mut page = Page::new(1, vec![Block::new(0, BBox::new(50.0, 100.0, 300.0, 126.0), lines)]);
//! page.number_lines();
//!
//! let config = ExtractionConfig::new().with_header_y1(40.0).with_footer_y0(780.0);
//! let doc = ParagraphExtractor::new(config).process_document(&[page])?;
//!
//! let paragraph = &doc.pages[0].paragraphs["0_0"];
//! assert_eq!(paragraph.src_text, "This is a long-winded sentence.");
//! assert_eq!(paragraph.base_style, "Georgia_0100");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry primitives
pub mod geometry;

// Layout analysis
pub mod layout;

// Paragraph and style handling
pub mod text;

// Page and document drivers
pub mod pipeline;

// Re-exports
pub use config::ExtractionConfig;
pub use error::{Error, Result};
pub use geometry::BBox;
pub use layout::{Block, Column, Line, Page, PageBands, Span};
pub use pipeline::{DocumentParagraphs, PageLayout, PageParagraphs, ParagraphExtractor};
pub use text::{Paragraph, StyleCatalog};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    use crate::geometry::BBox;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all other values.
    /// This ensures that sorting operations never panic due to NaN comparisons.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

    /// Order boxes top to bottom, then left to right.
    #[inline]
    pub fn cmp_top_left(a: &BBox, b: &BBox) -> Ordering {
        safe_float_cmp(a.y0, b.y0).then_with(|| safe_float_cmp(a.x0, b.x0))
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
