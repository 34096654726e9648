//! Loading placeholder shape.

use crate::density::Density;

/// Bar widths in percent, cycled by cell position so renders stay deterministic.
pub const SKELETON_WIDTHS: [u8; 16] = [72, 48, 85, 60, 93, 55, 78, 66, 40, 88, 57, 70, 95, 50, 63, 81];

/// Minimum rows drawn even when the container is shorter than one row.
const MIN_SKELETON_ROWS: usize = 1;

/// Rows and columns of the loading placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkeletonLayout {
    /// Placeholder body rows.
    pub rows: usize,
    /// Placeholder columns.
    pub columns: usize,
    /// Row height taken from the density preset.
    pub row_height: u32,
}

impl SkeletonLayout {
    /// Fits as many density-sized rows as the container allows below the header.
    pub fn new(density: Density, container_height: u32, columns: usize) -> Self {
        let tokens = density.tokens();
        let body = container_height.saturating_sub(tokens.header_height);
        let rows = (body / tokens.row_height.max(1)) as usize;
        Self {
            rows: rows.max(MIN_SKELETON_ROWS),
            columns: columns.max(1),
            row_height: tokens.row_height,
        }
    }

    /// Bar width for a cell.
    pub fn width(&self, row: usize, column: usize) -> u8 {
        SKELETON_WIDTHS[(row * self.columns + column) % SKELETON_WIDTHS.len()]
    }

    /// Width grid, row major.
    pub fn widths(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|row| (0..self.columns).map(|column| self.width(row, column)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn row_count_follows_density() {
        assert_eq!(SkeletonLayout::new(Density::Standard, 400, 4).rows, 6);
        assert_eq!(SkeletonLayout::new(Density::Compact, 400, 4).rows, 10);
        assert_eq!(SkeletonLayout::new(Density::Comfortable, 400, 4).rows, 4);
        assert_eq!(SkeletonLayout::new(Density::Standard, 10, 4).rows, 1);
    }

    #[test]
    fn widths_are_stable_across_calls() {
        let layout = SkeletonLayout::new(Density::Standard, 400, 3);
        assert_eq!(layout.widths(), layout.widths());
        assert_eq!(layout.width(0, 0), 72);
        assert_eq!(layout.width(1, 0), SKELETON_WIDTHS[3]);
    }
}
