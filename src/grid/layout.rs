use std::ops::RangeInclusive;

use crate::foundation::core::Rect;

/// Column-major lattice of cells spaced `gap` apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    gap: f64,
    columns: usize,
    rows: usize,
}

impl GridLayout {
    /// `ceil(width / gap) x ceil(height / gap)`. Panics on a non-positive gap.
    pub fn new(width: u32, height: u32, gap: f64) -> Self {
        assert!(gap.is_finite() && gap > 0.0, "grid gap must be positive, got {gap}");
        Self {
            gap,
            columns: (f64::from(width) / gap).ceil() as usize,
            rows: (f64::from(height) / gap).ceil() as usize,
        }
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Storage index for `(column, row)`.
    #[inline]
    pub fn index(&self, column: usize, row: usize) -> usize {
        column * self.rows + row
    }

    /// Grid-space origin of a cell.
    pub fn position(&self, column: usize, row: usize) -> (f64, f64) {
        (column as f64 * self.gap, row as f64 * self.gap)
    }

    /// Inclusive column and row ranges touched by `bounds`, clamped to the grid.
    ///
    /// Returns `None` for inverted, non-finite or fully off-grid bounds.
    pub fn cell_range(&self, bounds: Rect) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
        let cols = axis_range(bounds.x0, bounds.x1, self.gap, self.columns)?;
        let rows = axis_range(bounds.y0, bounds.y1, self.gap, self.rows)?;
        Some((cols, rows))
    }
}

fn axis_range(lo: f64, hi: f64, gap: f64, count: usize) -> Option<RangeInclusive<usize>> {
    if count == 0 || !lo.is_finite() || !hi.is_finite() || hi < lo {
        return None;
    }
    let first = (lo / gap).floor().max(0.0);
    let last = (hi / gap).floor().min((count - 1) as f64);
    if last < first {
        return None;
    }
    Some(first as usize..=last as usize)
}

#[cfg(test)]
#[path = "../../tests/unit/grid/layout.rs"]
mod tests;
