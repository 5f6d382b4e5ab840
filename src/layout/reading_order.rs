//! Reading order across columns.
//!
//! Columns are chained downward: after reading a column, the reader moves to
//! the highest remaining column below it that shares some of its horizontal
//! extent. When a chain runs dry the next chain starts at the top-left-most
//! remaining column. At every pick, a column that starts further left on the
//! same horizontal band takes priority.

use crate::layout::column_detector::Column;
use crate::utils::{cmp_top_left, safe_float_cmp};

/// Assign 1-based reading order ranks to `columns` in place.
///
/// Every column receives a distinct rank in `1..=columns.len()`. The result
/// depends only on the column geometry and, for exact ties, on input order.
///
/// # Examples
///
/// ```
/// use paraflow::geometry::BBox;
/// use paraflow::layout::clustering::LayoutBox;
/// use paraflow::layout::column_detector::Column;
/// use paraflow::layout::reading_order::assign_reading_order;
///
/// let column = |x0, y0, x1, y1| Column::from_box(LayoutBox { bbox: BBox::new(x0, y0, x1, y1), blocks: vec![] });
/// let mut columns = vec![
///     column(300.0, 0.0, 550.0, 800.0),
///     column(0.0, 0.0, 250.0, 800.0),
/// ];
/// assign_reading_order(&mut columns);
/// assert_eq!(columns[1].order, 1);
/// assert_eq!(columns[0].order, 2);
/// ```
pub fn assign_reading_order(columns: &mut [Column]) {
    for (rank, idx) in reading_sequence(columns).into_iter().enumerate() {
        columns[idx].order = rank as u32 + 1;
    }
}

/// Compute the reading sequence as indices into `columns`.
pub fn reading_sequence(columns: &[Column]) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..columns.len()).collect();
    let mut sequence = Vec::with_capacity(columns.len());

    while let Some(candidate) = topmost(columns, &remaining) {
        let mut last = promote_leftward(columns, &remaining, candidate);
        take(&mut remaining, &mut sequence, last);

        while let Some(next) = next_below(columns, &remaining, last) {
            last = promote_leftward(columns, &remaining, next);
            take(&mut remaining, &mut sequence, last);
        }
    }

    log::trace!("Column reading sequence: {:?}", sequence);
    sequence
}

fn take(remaining: &mut Vec<usize>, sequence: &mut Vec<usize>, idx: usize) {
    remaining.retain(|&i| i != idx);
    sequence.push(idx);
}

/// Remaining column with the smallest `(y0, x0)`.
fn topmost(columns: &[Column], remaining: &[usize]) -> Option<usize> {
    remaining
        .iter()
        .copied()
        .min_by(|&a, &b| cmp_top_left(&columns[a].bbox, &columns[b].bbox))
}

/// Highest remaining column sharing some x-range with `last`.
fn next_below(columns: &[Column], remaining: &[usize], last: usize) -> Option<usize> {
    let anchor = &columns[last].bbox;
    remaining
        .iter()
        .copied()
        .filter(|&i| columns[i].bbox.x_overlaps(anchor))
        .min_by(|&a, &b| cmp_top_left(&columns[a].bbox, &columns[b].bbox))
}

/// Replace `current` with the left-most remaining column that starts further
/// left and shares its y-range, until no such column exists.
///
/// Terminates because `x0` strictly decreases with every promotion.
fn promote_leftward(columns: &[Column], remaining: &[usize], mut current: usize) -> usize {
    loop {
        let bbox = &columns[current].bbox;
        let left = remaining
            .iter()
            .copied()
            .filter(|&i| i != current)
            .filter(|&i| columns[i].bbox.x0 < bbox.x0 && columns[i].bbox.y_overlaps(bbox))
            .min_by(|&a, &b| {
                safe_float_cmp(columns[a].bbox.x0, columns[b].bbox.x0)
                    .then_with(|| safe_float_cmp(columns[a].bbox.y0, columns[b].bbox.y0))
            });

        match left {
            Some(idx) => current = idx,
            None => return current,
        }
    }
}
