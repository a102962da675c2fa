/*!
This module implements the fixed-size cell store settled [`Block`]s live in.
*/

use crate::Block;

/// The playing grid: a fixed `columns × rows` store of optional [`Block`]s.
///
/// The backing store is a flat vector indexed by `row * columns + column`.
/// Invariant: a stored block's `(column, row)` always matches the cell it
/// occupies; the engine maintains this through settling and collapse.
///
/// The grid itself performs no bounds checking - the [`Game`](crate::Game)
/// validates coordinates before indexing, and an out-of-range access is a
/// programming error, not a recoverable condition.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    columns: i32,
    rows: i32,
    cells: Vec<Option<Block>>,
}

impl Grid {
    /// Creates an empty grid of the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics unless `columns > 0` and `rows >= 2` (the grid must accommodate
    /// the spawn row at row 0 and the preview row at row 1).
    pub fn new(columns: i32, rows: i32) -> Self {
        assert!(columns > 0, "grid needs at least one column");
        assert!(rows >= 2, "grid needs a spawn row and a preview row");
        Self {
            columns,
            rows,
            cells: vec![None; (columns * rows) as usize],
        }
    }

    /// The grid width.
    pub const fn columns(&self) -> i32 {
        self.columns
    }

    /// The grid height.
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    /// Whether `(column, row)` lies within `[0, columns) × [0, rows)`.
    pub const fn in_bounds(&self, column: i32, row: i32) -> bool {
        0 <= column && column < self.columns && 0 <= row && row < self.rows
    }

    /// Returns the block stored at `(column, row)`, if any.
    ///
    /// # Panics
    ///
    /// May panic on out-of-range coordinates; callers validate bounds first.
    pub fn get(&self, column: i32, row: i32) -> Option<Block> {
        debug_assert!(self.in_bounds(column, row));
        self.cells[(row * self.columns + column) as usize]
    }

    /// Stores `block` at `(column, row)`; `None` clears the cell.
    ///
    /// # Panics
    ///
    /// May panic on out-of-range coordinates; callers validate bounds first.
    pub fn set(&mut self, column: i32, row: i32, block: Option<Block>) {
        debug_assert!(self.in_bounds(column, row));
        self.cells[(row * self.columns + column) as usize] = block;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlockColor;

    #[test]
    fn set_then_get_returns_exact_block() {
        let mut grid = Grid::new(10, 20);
        let block = Block {
            column: 3,
            row: 17,
            color: BlockColor::Teal,
        };
        grid.set(3, 17, Some(block));
        assert_eq!(grid.get(3, 17), Some(block));

        grid.set(3, 17, None);
        assert_eq!(grid.get(3, 17), None);
    }

    #[test]
    fn cells_are_independent() {
        let mut grid = Grid::new(10, 20);
        let block = Block {
            column: 0,
            row: 19,
            color: BlockColor::Red,
        };
        grid.set(0, 19, Some(block));
        for row in 0..20 {
            for column in 0..10 {
                assert_eq!(
                    grid.get(column, row).is_some(),
                    (column, row) == (0, 19),
                    "unexpected cell at ({column}, {row})"
                );
            }
        }
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(4, 5);
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.rows(), 5);
        for row in 0..5 {
            for column in 0..4 {
                assert_eq!(grid.get(column, row), None);
            }
        }
    }

    #[test]
    fn bounds_check_helper() {
        let grid = Grid::new(10, 20);
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(9, 19));
        assert!(!grid.in_bounds(-1, 0));
        assert!(!grid.in_bounds(0, -1));
        assert!(!grid.in_bounds(10, 0));
        assert!(!grid.in_bounds(0, 20));
    }

    #[test]
    #[should_panic]
    fn negative_row_access_is_fatal() {
        let grid = Grid::new(10, 20);
        let _ = grid.get(0, -1);
    }
}
