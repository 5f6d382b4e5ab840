//! Per-page layout analysis: bands, boxes, columns and reading order.

use crate::error::Result;
use crate::layout::bands::{FOOTER_COLUMN_ORDER, HEADER_COLUMN_ORDER, PageBands, partition_blocks};
use crate::layout::clustering::group_into_boxes;
use crate::layout::column_detector::{Column, ColumnBuilder};
use crate::layout::reading_order::assign_reading_order;
use crate::layout::text_block::Page;

/// Column layout of a single page.
pub struct PageLayout;

impl PageLayout {
    /// Infer the ordered columns of `page`.
    ///
    /// Blocks are validated and split into bands first. Header and footer
    /// blocks each form one column with a fixed order; body blocks are
    /// clustered into boxes, swept into columns and ranked from 1.
    ///
    /// The result lists the header column, body columns by rank, then the
    /// footer column. Every column is closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use paraflow::geometry::BBox;
    /// use paraflow::layout::bands::PageBands;
    /// use paraflow::layout::text_block::{Block, Page};
    /// use paraflow::pipeline::PageLayout;
    ///
    /// let page = Page::new(1, vec![
    ///     Block::new(0, BBox::new(300.0, 60.0, 550.0, 700.0), vec![]),
    ///     Block::new(1, BBox::new(0.0, 60.0, 250.0, 700.0), vec![]),
    ///     Block::new(2, BBox::new(0.0, 10.0, 550.0, 30.0), vec![]),
    /// ]);
    /// let columns = PageLayout::analyze(&page, &PageBands::new(Some(40.0), None)).unwrap();
    ///
    /// let orders: Vec<u32> = columns.iter().map(|c| c.order).collect();
    /// assert_eq!(orders, vec![0, 1, 2]);
    /// assert_eq!(columns[1].blocks[0].number, 1);
    /// ```
    pub fn analyze(page: &Page, bands: &PageBands) -> Result<Vec<Column>> {
        let partition = partition_blocks(&page.blocks, bands);

        let boxes = group_into_boxes(partition.body);
        let mut body = ColumnBuilder::build(boxes)?;
        assign_reading_order(&mut body);
        body.sort_by_key(|c| c.order);

        log::debug!("Page {}: {} body columns", page.number, body.len());

        let mut columns = Vec::with_capacity(body.len() + 2);
        columns.extend(Column::from_band(HEADER_COLUMN_ORDER, partition.header));
        columns.extend(body);
        columns.extend(Column::from_band(FOOTER_COLUMN_ORDER, partition.footer));
        Ok(columns)
    }
}
