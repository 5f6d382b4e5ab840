//! Overlap clustering of text blocks into boxes.
//!
//! Blocks whose bounding boxes intersect are grouped into a [`LayoutBox`]
//! before column inference, so that overlapping fragments (drop caps, inset
//! captions, footnote markers) travel through the column sweep together.

use crate::geometry::BBox;
use crate::layout::bands::PlacedBlock;
use crate::layout::text_block::Block;

/// A cluster of blocks with intersecting bounding boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    /// Union of the member blocks' bounding boxes
    pub bbox: BBox,
    /// Member blocks in the order they joined
    pub blocks: Vec<Block>,
}

impl LayoutBox {
    /// Start a box from a single block.
    pub fn from_block(placed: PlacedBlock) -> Self {
        Self {
            bbox: placed.bbox,
            blocks: vec![placed.block],
        }
    }

    fn absorb(&mut self, placed: PlacedBlock) {
        self.bbox = self.bbox.union(&placed.bbox);
        self.blocks.push(placed.block);
    }
}

/// Group blocks into boxes by incremental overlap clustering.
///
/// Each block joins the first existing box whose current bbox it intersects,
/// otherwise it starts a new box. This is a single pass, not a union-find:
/// two boxes that only become connected through a later block are not merged
/// with each other, the later block simply joins the first of them.
///
/// # Examples
///
/// ```
/// use paraflow::geometry::BBox;
/// use paraflow::layout::bands::PlacedBlock;
/// use paraflow::layout::clustering::group_into_boxes;
/// use paraflow::layout::text_block::Block;
///
/// let placed = |n: u32, b: BBox| PlacedBlock { bbox: b, block: Block::new(n, b, vec![]) };
/// let boxes = group_into_boxes(vec![
///     placed(0, BBox::new(0.0, 0.0, 100.0, 100.0)),
///     placed(1, BBox::new(50.0, 50.0, 150.0, 150.0)),
///     placed(2, BBox::new(300.0, 0.0, 400.0, 100.0)),
/// ]);
/// assert_eq!(boxes.len(), 2);
/// assert_eq!(boxes[0].bbox, BBox::new(0.0, 0.0, 150.0, 150.0));
/// ```
pub fn group_into_boxes(blocks: Vec<PlacedBlock>) -> Vec<LayoutBox> {
    let mut boxes: Vec<LayoutBox> = Vec::new();

    for placed in blocks {
        match boxes.iter_mut().find(|b| b.bbox.intersects(&placed.bbox)) {
            Some(target) => target.absorb(placed),
            None => boxes.push(LayoutBox::from_block(placed)),
        }
    }

    log::trace!("Grouped blocks into {} boxes", boxes.len());
    boxes
}
