//! Integration tests for page layout analysis.
//!
//! These tests drive band partitioning, box grouping, the column sweep and
//! reading order together on mock pages shaped like real documents.

use paraflow::geometry::BBox;
use paraflow::layout::bands::{FOOTER_COLUMN_ORDER, HEADER_COLUMN_ORDER, PageBands};
use paraflow::layout::clustering::{LayoutBox, group_into_boxes};
use paraflow::layout::column_detector::{Column, ColumnBuilder};
use paraflow::layout::reading_order::{assign_reading_order, reading_sequence};
use paraflow::layout::text_block::{Block, Page};
use paraflow::pipeline::PageLayout;

// ============================================================================
// Helper Functions for Creating Mock Data
// ============================================================================

fn mock_block(number: u32, x0: f32, y0: f32, x1: f32, y1: f32) -> Block {
    Block::new(number, BBox::new(x0, y0, x1, y1), vec![])
}

fn mock_box(x0: f32, y0: f32, x1: f32, y1: f32) -> LayoutBox {
    LayoutBox {
        bbox: BBox::new(x0, y0, x1, y1),
        blocks: vec![],
    }
}

fn block_numbers(column: &Column) -> Vec<u32> {
    column.blocks.iter().map(|b| b.number).collect()
}

fn texts_in_reading_order(columns: &[Column]) -> Vec<u32> {
    columns.iter().flat_map(block_numbers).collect()
}

// ============================================================================
// Column Sweep
// ============================================================================

#[test]
fn test_two_column_page_yields_two_columns_not_four() {
    let columns = ColumnBuilder::build(vec![
        mock_box(0.0, 0.0, 250.0, 400.0),
        mock_box(300.0, 0.0, 550.0, 400.0),
        mock_box(0.0, 410.0, 250.0, 800.0),
        mock_box(300.0, 410.0, 550.0, 800.0),
    ])
    .unwrap();

    assert_eq!(columns.len(), 2);
    let mut bboxes: Vec<BBox> = columns.iter().map(|c| c.bbox).collect();
    bboxes.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap());
    assert_eq!(bboxes[0], BBox::new(0.0, 0.0, 250.0, 800.0));
    assert_eq!(bboxes[1], BBox::new(300.0, 0.0, 550.0, 800.0));
}

#[test]
fn test_stepping_exposes_open_and_closed_sets() {
    let mut builder = ColumnBuilder::new(vec![
        mock_box(0.0, 0.0, 550.0, 50.0),
        mock_box(0.0, 60.0, 250.0, 400.0),
        mock_box(300.0, 60.0, 550.0, 400.0),
    ]);

    assert!(builder.step().unwrap());
    assert_eq!(builder.open_columns().count(), 1);

    // The left box would grow the title over the pending right box
    assert!(builder.step().unwrap());
    assert_eq!(builder.closed_columns().count(), 1);
    assert_eq!(builder.open_columns().count(), 1);

    assert!(builder.step().unwrap());
    assert_eq!(builder.open_columns().count(), 2);
    assert!(builder.is_done());
    assert!(!builder.step().unwrap());

    let columns = builder.finish().unwrap();
    assert_eq!(columns.len(), 3);
}

// ============================================================================
// Full Page Layout
// ============================================================================

#[test]
fn test_article_page_reading_order() {
    // Running header, title, two body columns of two blocks each, then a
    // footer with the page number.
    let page = Page::new(
        7,
        vec![
            mock_block(0, 50.0, 20.0, 300.0, 35.0),
            mock_block(1, 50.0, 60.0, 550.0, 100.0),
            mock_block(2, 320.0, 120.0, 550.0, 400.0),
            mock_block(3, 50.0, 120.0, 280.0, 400.0),
            mock_block(4, 50.0, 410.0, 280.0, 600.0),
            mock_block(5, 320.0, 410.0, 550.0, 600.0),
            mock_block(6, 280.0, 770.0, 320.0, 785.0),
        ],
    );
    let bands = PageBands::new(Some(40.0), Some(760.0));
    let columns = PageLayout::analyze(&page, &bands).unwrap();

    let orders: Vec<u32> = columns.iter().map(|c| c.order).collect();
    assert_eq!(orders.first(), Some(&HEADER_COLUMN_ORDER));
    assert_eq!(orders.last(), Some(&FOOTER_COLUMN_ORDER));

    assert_eq!(texts_in_reading_order(&columns), vec![0, 1, 3, 4, 2, 5, 6]);
}

#[test]
fn test_full_width_block_below_columns_chains_from_left() {
    // A caption spanning both columns shares x-range with the left column,
    // so the downward chain reaches it before jumping to the right column.
    let page = Page::new(
        1,
        vec![
            mock_block(0, 50.0, 120.0, 280.0, 400.0),
            mock_block(1, 320.0, 120.0, 550.0, 400.0),
            mock_block(2, 50.0, 420.0, 550.0, 480.0),
        ],
    );
    let columns = PageLayout::analyze(&page, &PageBands::default()).unwrap();
    assert_eq!(texts_in_reading_order(&columns), vec![0, 2, 1]);
}

#[test]
fn test_overlapping_blocks_travel_together() {
    // A drop cap overlapping the first lines of its paragraph
    let page = Page::new(
        1,
        vec![
            mock_block(0, 50.0, 100.0, 80.0, 140.0),
            mock_block(1, 70.0, 100.0, 300.0, 300.0),
            mock_block(2, 350.0, 100.0, 550.0, 300.0),
        ],
    );
    let columns = PageLayout::analyze(&page, &PageBands::default()).unwrap();

    assert_eq!(columns.len(), 2);
    assert_eq!(block_numbers(&columns[0]), vec![0, 1]);
    assert_eq!(block_numbers(&columns[1]), vec![2]);
}

#[test]
fn test_grouping_is_single_pass() {
    use paraflow::layout::bands::PlacedBlock;

    let placed = |n: u32, b: BBox| PlacedBlock {
        bbox: b,
        block: Block::new(n, b, vec![]),
    };
    let boxes = group_into_boxes(vec![
        placed(0, BBox::new(0.0, 0.0, 10.0, 10.0)),
        placed(1, BBox::new(20.0, 0.0, 30.0, 10.0)),
        placed(2, BBox::new(5.0, 5.0, 25.0, 8.0)),
    ]);
    // Block 2 bridges both boxes but joins only the first
    assert_eq!(boxes.len(), 2);
}

#[test]
fn test_reading_order_is_repeatable() {
    let mut columns: Vec<Column> = [
        (300.0, 0.0, 550.0, 400.0),
        (0.0, 0.0, 250.0, 200.0),
        (0.0, 250.0, 250.0, 400.0),
        (0.0, 450.0, 550.0, 600.0),
    ]
    .into_iter()
    .map(|(x0, y0, x1, y1)| Column::from_box(mock_box(x0, y0, x1, y1)))
    .collect();

    let first = reading_sequence(&columns);
    assert_eq!(first, vec![1, 2, 3, 0]);
    assert_eq!(reading_sequence(&columns), first);

    assign_reading_order(&mut columns);
    let orders: Vec<u32> = columns.iter().map(|c| c.order).collect();
    assert_eq!(orders, vec![4, 1, 2, 3]);
}
