//! Paragraph reconstruction and style handling.
//!
//! - [`style`]: canonical style keys and the per-run style catalog
//! - [`paragraph`]: merging of block lines into paragraphs

pub mod paragraph;
pub mod style;

pub use paragraph::{Continuation, Paragraph, ParagraphBuilder, ParagraphMerger};
pub use style::{StyleCatalog, StyleDescriptor};
