//! Layout analysis for positioned text.
//!
//! This module turns a page of blocks into ordered columns:
//! - Header/footer band partitioning
//! - Overlap clustering of blocks into boxes
//! - Sweep-line column detection
//! - Reading order across columns

pub mod bands;
pub mod clustering;
pub mod column_detector;
pub mod reading_order;
pub mod text_block;

// Re-export main types
pub use bands::{Band, BandPartition, PageBands, PlacedBlock, partition_blocks};
pub use clustering::{LayoutBox, group_into_boxes};
pub use column_detector::{Column, ColumnBuilder, ColumnId, ColumnStatus};
pub use reading_order::{assign_reading_order, reading_sequence};
pub use text_block::{Block, Line, Page, Span};
