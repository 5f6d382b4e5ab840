//! Positioned text as handed over by the upstream extractor.
//!
//! A page is a list of blocks, a block is a list of lines and a line is a
//! list of spans. Only spans carry text and font attributes; lines and blocks
//! carry geometry.

use crate::geometry::BBox;
use serde::{Deserialize, Serialize};

/// A run of text sharing one font and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Text content, possibly containing tabs
    pub text: String,
    /// Font name as reported by the source document
    pub font: String,
    /// Font size in points
    pub size: f64,
}

impl Span {
    /// Create a span.
    pub fn new(text: impl Into<String>, font: impl Into<String>, size: f64) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            size,
        }
    }
}

/// One geometric line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Spans in source order
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Bounding box of the whole line
    pub bbox: BBox,
    /// Number of the owning block
    #[serde(default)]
    pub block_number: u32,
    /// Position of this line within its block
    #[serde(default)]
    pub line_number: u32,
}

impl Line {
    /// Create a line with block and line numbers left at zero.
    pub fn new(bbox: BBox, spans: Vec<Span>) -> Self {
        Self {
            spans,
            bbox,
            block_number: 0,
            line_number: 0,
        }
    }

    /// True when the line carries no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// A text block: the extractor's unit of spatially grouped lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block number, unique within its page
    pub number: u32,
    /// Bounding box; blocks without a usable one are dropped from layout
    #[serde(default)]
    pub bbox: Option<BBox>,
    /// Lines in source order
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Block {
    /// Create a block.
    pub fn new(number: u32, bbox: BBox, lines: Vec<Line>) -> Self {
        Self {
            number,
            bbox: Some(bbox),
            lines,
        }
    }

    /// Stamp every line with this block's number and its index in the block.
    ///
    /// Extractors that do not number lines themselves produce zeros. Paragraph
    /// ids are derived from line positions during merging either way.
    pub fn number_lines(&mut self) {
        let number = self.number;
        for (idx, line) in self.lines.iter_mut().enumerate() {
            line.block_number = number;
            line.line_number = idx as u32;
        }
    }
}

/// One page of positioned text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number as used in paragraph output
    pub number: u32,
    /// Blocks in extraction order
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create a page.
    pub fn new(number: u32, blocks: Vec<Block>) -> Self {
        Self { number, blocks }
    }

    /// Number the lines of every block, see [`Block::number_lines`].
    pub fn number_lines(&mut self) {
        for block in &mut self.blocks {
            block.number_lines();
        }
    }
}
