//! Header/footer band partitioning.
//!
//! Before column inference, each block is assigned to the header band, the
//! footer band, or the body. Band blocks receive fixed column orders and skip
//! column inference entirely. Blocks with unusable geometry are dropped here.

use crate::error::Error;
use crate::geometry::BBox;
use crate::layout::text_block::Block;

/// Column order reserved for the header band.
pub const HEADER_COLUMN_ORDER: u32 = 0;

/// Column order reserved for the footer band.
pub const FOOTER_COLUMN_ORDER: u32 = 999;

/// Vertical limits of the header and footer bands on a page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PageBands {
    /// Bottom edge of the header band
    pub header_y1: Option<f32>,
    /// Top edge of the footer band
    pub footer_y0: Option<f32>,
}

/// Which band a block falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Entirely above `header_y1`
    Header,
    /// Neither header nor footer
    Body,
    /// Entirely below `footer_y0`
    Footer,
}

impl PageBands {
    /// Create band limits.
    pub fn new(header_y1: Option<f32>, footer_y0: Option<f32>) -> Self {
        Self {
            header_y1,
            footer_y0,
        }
    }

    /// Classify a bounding box. The header band wins when both match.
    ///
    /// # Examples
    ///
    /// ```
    /// use paraflow::geometry::BBox;
    /// use paraflow::layout::bands::{Band, PageBands};
    ///
    /// let bands = PageBands::new(Some(50.0), Some(750.0));
    /// assert_eq!(bands.classify(&BBox::new(0.0, 10.0, 100.0, 40.0)), Band::Header);
    /// assert_eq!(bands.classify(&BBox::new(0.0, 60.0, 100.0, 90.0)), Band::Body);
    /// assert_eq!(bands.classify(&BBox::new(0.0, 760.0, 100.0, 780.0)), Band::Footer);
    /// ```
    pub fn classify(&self, bbox: &BBox) -> Band {
        if self.header_y1.is_some_and(|y| bbox.y1 <= y) {
            Band::Header
        } else if self.footer_y0.is_some_and(|y| bbox.y0 >= y) {
            Band::Footer
        } else {
            Band::Body
        }
    }
}

/// A block whose bounding box has been checked to be present and finite.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    /// Validated bounding box
    pub bbox: BBox,
    /// The block itself
    pub block: Block,
}

impl PlacedBlock {
    /// Validate a block's geometry.
    pub fn try_from_block(block: &Block) -> Result<Self, Error> {
        match block.bbox {
            None => Err(Error::MalformedGeometry {
                block: block.number,
                reason: "missing bbox".to_string(),
            }),
            Some(bbox) if !bbox.is_finite() => Err(Error::MalformedGeometry {
                block: block.number,
                reason: format!(
                    "non-finite bbox ({}, {}, {}, {})",
                    bbox.x0, bbox.y0, bbox.x1, bbox.y1
                ),
            }),
            Some(bbox) => Ok(Self {
                bbox,
                block: block.clone(),
            }),
        }
    }
}

/// Blocks of one page split by band.
#[derive(Debug, Clone, Default)]
pub struct BandPartition {
    /// Header band blocks
    pub header: Vec<PlacedBlock>,
    /// Body blocks, subject to column inference
    pub body: Vec<PlacedBlock>,
    /// Footer band blocks
    pub footer: Vec<PlacedBlock>,
}

/// Validate and split a page's blocks into header, body and footer.
///
/// Blocks with a missing or non-finite bbox are reported through `log` and
/// left out of every band.
pub fn partition_blocks(blocks: &[Block], bands: &PageBands) -> BandPartition {
    let mut partition = BandPartition::default();

    for block in blocks {
        let placed = match PlacedBlock::try_from_block(block) {
            Ok(placed) => placed,
            Err(e) => {
                log::warn!("Dropping block from layout: {}", e);
                continue;
            },
        };

        match bands.classify(&placed.bbox) {
            Band::Header => partition.header.push(placed),
            Band::Body => partition.body.push(placed),
            Band::Footer => partition.footer.push(placed),
        }
    }

    log::debug!(
        "Band partition: {} header, {} body, {} footer",
        partition.header.len(),
        partition.body.len(),
        partition.footer.len()
    );

    partition
}
