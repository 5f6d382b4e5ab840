//! Sweep-line column detection.
//!
//! Boxes are visited top to bottom (ties left to right). Each box either
//! extends one open column or opens a new one; open columns are closed as
//! soon as a horizontal conflict forces a decision. This handles columns
//! that start and stop at different heights on the same page, which pages
//! without structural markup do all the time.
//!
//! Columns live in an arena and are addressed by [`ColumnId`]. The set of
//! open columns is always pairwise disjoint in x; [`ColumnBuilder::step`]
//! checks this after every box.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::geometry::BBox;
use crate::layout::bands::PlacedBlock;
use crate::layout::clustering::LayoutBox;
use crate::layout::text_block::Block;
use crate::utils::cmp_top_left;

/// Index of a column in the builder's arena.
pub type ColumnId = usize;

/// Lifecycle state of a column during the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnStatus {
    /// Still accepting boxes
    Open,
    /// Final; keeps vetoing expansions that would cross it
    Closed,
}

/// A vertical region of the page read as one unit.
#[derive(Debug, Clone)]
pub struct Column {
    /// Union of all member boxes
    pub bbox: BBox,
    /// Member blocks in sweep order
    pub blocks: Vec<Block>,
    /// Reading order rank, 0 until assigned
    pub order: u32,
    /// Open or closed
    pub status: ColumnStatus,
}

/// Columns are identified by their bounding box alone.
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.bbox == other.bbox
    }
}

impl Column {
    /// Open a new column seeded from a box.
    pub fn from_box(b: LayoutBox) -> Self {
        Self {
            bbox: b.bbox,
            blocks: b.blocks,
            order: 0,
            status: ColumnStatus::Open,
        }
    }

    /// Build a closed column with a fixed order from band blocks.
    ///
    /// Returns `None` when the band is empty.
    pub fn from_band(order: u32, blocks: Vec<PlacedBlock>) -> Option<Self> {
        let mut iter = blocks.into_iter();
        let mut column = Self::from_box(LayoutBox::from_block(iter.next()?));
        for placed in iter {
            column.bbox = column.bbox.union(&placed.bbox);
            column.blocks.push(placed.block);
        }
        column.order = order;
        column.status = ColumnStatus::Closed;
        Some(column)
    }

    /// True while the column accepts boxes.
    pub fn is_open(&self) -> bool {
        self.status == ColumnStatus::Open
    }

    fn absorb(&mut self, b: LayoutBox) {
        self.bbox = self.bbox.union(&b.bbox);
        self.blocks.extend(b.blocks);
    }
}

/// Incremental column builder.
///
/// Use [`ColumnBuilder::build`] to run the whole sweep, or drive it with
/// [`ColumnBuilder::step`] to inspect intermediate states.
#[derive(Debug)]
pub struct ColumnBuilder {
    columns: Vec<Column>,
    pending: VecDeque<LayoutBox>,
}

impl ColumnBuilder {
    /// Prepare a sweep over `boxes`, sorted by `(y0, x0)`.
    pub fn new(mut boxes: Vec<LayoutBox>) -> Self {
        boxes.sort_by(|a, b| cmp_top_left(&a.bbox, &b.bbox));
        Self {
            columns: Vec::new(),
            pending: boxes.into(),
        }
    }

    /// Run the sweep to completion and return all columns, closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use paraflow::geometry::BBox;
    /// use paraflow::layout::clustering::LayoutBox;
    /// use paraflow::layout::column_detector::ColumnBuilder;
    ///
    /// let boxes = [
    ///     BBox::new(0.0, 0.0, 250.0, 400.0),
    ///     BBox::new(300.0, 0.0, 550.0, 400.0),
    ///     BBox::new(0.0, 410.0, 250.0, 800.0),
    ///     BBox::new(300.0, 410.0, 550.0, 800.0),
    /// ]
    /// .into_iter()
    /// .map(|bbox| LayoutBox { bbox, blocks: vec![] })
    /// .collect();
    ///
    /// let columns = ColumnBuilder::build(boxes).unwrap();
    /// assert_eq!(columns.len(), 2);
    /// assert_eq!(columns[0].bbox, BBox::new(0.0, 0.0, 250.0, 800.0));
    /// ```
    pub fn build(boxes: Vec<LayoutBox>) -> Result<Vec<Column>> {
        Self::new(boxes).finish()
    }

    /// True when every box has been placed.
    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    /// Columns currently open.
    pub fn open_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_open())
    }

    /// Columns already closed.
    pub fn closed_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_open())
    }

    /// Place the next box. Returns `Ok(false)` once no boxes remain.
    pub fn step(&mut self) -> Result<bool> {
        let Some(b) = self.pending.pop_front() else {
            return Ok(false);
        };

        let mut overlapping: Vec<ColumnId> = self
            .open_ids()
            .into_iter()
            .filter(|&id| self.columns[id].bbox.x_overlaps(&b.bbox))
            .collect();

        if overlapping.len() >= 2 {
            overlapping = self.prune_vertically_disjoint(overlapping);
        }

        match overlapping.as_slice() {
            [] => {
                self.open(b);
            },
            &[target] => {
                if self.expansion_is_safe(target, &b) {
                    log::trace!("Column {} absorbs box at {:?}", target, b.bbox);
                    self.columns[target].absorb(b);
                } else {
                    self.close(target);
                    self.open(b);
                }
            },
            conflicting => {
                for &id in conflicting {
                    self.close(id);
                }
                self.open(b);
            },
        }

        self.check_open_columns_disjoint()?;
        Ok(true)
    }

    /// Place all remaining boxes, close every open column and return the arena.
    pub fn finish(mut self) -> Result<Vec<Column>> {
        while self.step()? {}
        for id in self.open_ids() {
            self.close(id);
        }
        log::debug!("Column sweep produced {} columns", self.columns.len());
        Ok(self.columns)
    }

    fn open_ids(&self) -> Vec<ColumnId> {
        (0..self.columns.len()).filter(|&id| self.columns[id].is_open()).collect()
    }

    fn open(&mut self, b: LayoutBox) -> ColumnId {
        self.columns.push(Column::from_box(b));
        let id = self.columns.len() - 1;
        log::trace!("Opened column {} at {:?}", id, self.columns[id].bbox);
        id
    }

    fn close(&mut self, id: ColumnId) {
        self.columns[id].status = ColumnStatus::Closed;
        log::trace!("Closed column {} at {:?}", id, self.columns[id].bbox);
    }

    /// Among columns sorted by `(y0, x0)`, close each one that ends above the
    /// start of the next: it no longer reaches the sweep position.
    fn prune_vertically_disjoint(&mut self, mut ids: Vec<ColumnId>) -> Vec<ColumnId> {
        ids.sort_by(|&a, &b| cmp_top_left(&self.columns[a].bbox, &self.columns[b].bbox));

        let mut kept = Vec::with_capacity(ids.len());
        for (i, &id) in ids.iter().enumerate() {
            let stale = ids
                .get(i + 1)
                .is_some_and(|&next| self.columns[id].bbox.y1 < self.columns[next].bbox.y0);
            if stale {
                self.close(id);
            } else {
                kept.push(id);
            }
        }
        kept
    }

    /// Whether `target` may grow to include `b`.
    ///
    /// Growth is refused if the widened x-range would start overlapping
    /// another open column, or a closed column reaching down to the target's
    /// top, or if the grown bbox would start intersecting a box still
    /// waiting in the sweep.
    fn expansion_is_safe(&self, target: ColumnId, b: &LayoutBox) -> bool {
        let current = self.columns[target].bbox;
        let widened = current.union_x(&b.bbox);

        let crosses_column = self.columns.iter().enumerate().any(|(id, col)| {
            if id == target {
                return false;
            }
            let newly = widened.x_overlaps(&col.bbox) && !current.x_overlaps(&col.bbox);
            match col.status {
                ColumnStatus::Open => newly,
                ColumnStatus::Closed => newly && col.bbox.y1 >= current.y0,
            }
        });
        if crosses_column {
            return false;
        }

        let grown = current.union(&b.bbox);
        !self
            .pending
            .iter()
            .any(|p| grown.intersects(&p.bbox) && !current.intersects(&p.bbox))
    }

    fn check_open_columns_disjoint(&self) -> Result<()> {
        let open = self.open_ids();
        for (i, &a) in open.iter().enumerate() {
            for &b in &open[i + 1..] {
                if self.columns[a].bbox.x_overlaps(&self.columns[b].bbox) {
                    return Err(Error::InvariantViolation(format!(
                        "open columns {} {:?} and {} {:?} overlap in x",
                        a, self.columns[a].bbox, b, self.columns[b].bbox
                    )));
                }
            }
        }
        Ok(())
    }
}
