/*!
This module implements the movable, rotatable piece in play.
*/

use rand::Rng;

use crate::{Block, BlockColor, Orientation, ShapeKind};

/// An active piece: a [`ShapeKind`] instance with an anchor position, an
/// orientation, and its four occupied [`Block`]s.
///
/// The blocks are a cached projection of
/// `ShapeKind::offsets(orientation)` onto the anchor - they are always
/// recomputable from `(kind, anchor, orientation)` and never independent
/// state. Rotations and absolute moves re-project them from the table;
/// relative shifts translate them in place, which is equivalent by
/// construction.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    kind: ShapeKind,
    color: BlockColor,
    orientation: Orientation,
    column: i32,
    row: i32,
    blocks: [Block; 4],
}

impl Piece {
    /// Creates a piece of the given kind at the given anchor, with its four
    /// blocks projected from the offset table.
    pub fn new(
        kind: ShapeKind,
        color: BlockColor,
        orientation: Orientation,
        column: i32,
        row: i32,
    ) -> Self {
        let mut piece = Self {
            kind,
            color,
            orientation,
            column,
            row,
            blocks: [Block { column, row, color }; 4],
        };
        piece.project_blocks();
        piece
    }

    /// Creates a piece with uniformly random kind, orientation and color at
    /// the given anchor.
    ///
    /// Takes the caller's RNG so that a seeded game yields a reproducible
    /// sequence of pieces.
    pub fn random<R: Rng>(rng: &mut R, column: i32, row: i32) -> Self {
        let kind = ShapeKind::VARIANTS[rng.random_range(0..ShapeKind::VARIANTS.len())];
        let orientation = Orientation::VARIANTS[rng.random_range(0..Orientation::VARIANTS.len())];
        let color = BlockColor::VARIANTS[rng.random_range(0..BlockColor::VARIANTS.len())];
        Self::new(kind, color, orientation, column, row)
    }

    /// Which of the seven shapes this piece is.
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// The color shared by all four blocks.
    pub const fn color(&self) -> BlockColor {
        self.color
    }

    /// The current rotational state.
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The anchor `(column, row)` all block offsets are computed from.
    pub const fn anchor(&self) -> (i32, i32) {
        (self.column, self.row)
    }

    /// The four blocks currently occupied by the piece.
    pub const fn blocks(&self) -> &[Block; 4] {
        &self.blocks
    }

    /// The blocks forming the bottom contour at the current orientation,
    /// i.e. the ones floor/stack contact is tested against.
    pub fn bottom_blocks(&self) -> impl Iterator<Item = &Block> {
        self.kind
            .bottom_contour(self.orientation)
            .iter()
            .map(|&idx| &self.blocks[idx])
    }

    /// Recomputes all four blocks by applying the offset table at the current
    /// orientation to the anchor.
    fn project_blocks(&mut self) {
        let offsets = self.kind.offsets(self.orientation);
        for (block, (column_diff, row_diff)) in self.blocks.iter_mut().zip(offsets) {
            block.column = self.column + column_diff;
            block.row = self.row + row_diff;
            block.color = self.color;
        }
    }

    /// Advances the orientation one step clockwise and re-projects the
    /// blocks from the anchor.
    ///
    /// Blocks are freshly projected rather than geometrically rotated, so
    /// repeated rotation cannot accumulate positional drift.
    pub fn rotate_clockwise(&mut self) {
        self.orientation = self.orientation.rotated_right(1);
        self.project_blocks();
    }

    /// Advances the orientation one step counter-clockwise and re-projects
    /// the blocks from the anchor.
    pub fn rotate_counter_clockwise(&mut self) {
        self.orientation = self.orientation.rotated_right(-1);
        self.project_blocks();
    }

    /// Translates the anchor and all four blocks by the same delta.
    pub fn shift_by(&mut self, columns: i32, rows: i32) {
        self.column += columns;
        self.row += rows;
        for block in &mut self.blocks {
            block.column += columns;
            block.row += rows;
        }
    }

    /// Moves the piece down one row.
    pub fn lower_by_one_row(&mut self) {
        self.shift_by(0, 1);
    }

    /// Moves the piece up one row.
    pub fn raise_by_one_row(&mut self) {
        self.shift_by(0, -1);
    }

    /// Moves the piece one column to the left.
    pub fn shift_left_by_one_column(&mut self) {
        self.shift_by(-1, 0);
    }

    /// Moves the piece one column to the right.
    pub fn shift_right_by_one_column(&mut self) {
        self.shift_by(1, 0);
    }

    /// Moves the anchor to an absolute position and re-projects the blocks.
    pub fn move_to(&mut self, column: i32, row: i32) {
        self.column = column;
        self.row = row;
        self.project_blocks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Orientation::*;

    #[test]
    fn blocks_are_projection_of_offsets() {
        let piece = Piece::new(ShapeKind::T, BlockColor::Purple, Deg0, 4, 0);
        let offsets = ShapeKind::T.offsets(Deg0);
        for (block, (column_diff, row_diff)) in piece.blocks().iter().zip(offsets) {
            assert_eq!(block.column, 4 + column_diff);
            assert_eq!(block.row, row_diff);
            assert_eq!(block.color, BlockColor::Purple);
        }
    }

    #[test]
    fn four_clockwise_rotations_are_identity() {
        for kind in ShapeKind::VARIANTS {
            for orientation in Orientation::VARIANTS {
                let original = Piece::new(kind, BlockColor::Blue, orientation, 5, 7);
                let mut piece = original;
                for _ in 0..4 {
                    piece.rotate_clockwise();
                }
                assert_eq!(piece, original, "{kind:?} at {orientation:?}");
            }
        }
    }

    #[test]
    fn clockwise_then_counter_clockwise_cancels() {
        let original = Piece::new(ShapeKind::L, BlockColor::Orange, Deg90, 3, 3);
        let mut piece = original;
        piece.rotate_clockwise();
        piece.rotate_counter_clockwise();
        assert_eq!(piece, original);
    }

    #[test]
    fn shift_matches_reprojection() {
        // Shifting in place and re-projecting at the shifted anchor must
        // agree, since blocks are a pure function of (kind, anchor,
        // orientation).
        for kind in ShapeKind::VARIANTS {
            let mut shifted = Piece::new(kind, BlockColor::Yellow, Deg90, 4, 2);
            shifted.shift_by(-2, 5);
            let projected = Piece::new(kind, BlockColor::Yellow, Deg90, 2, 7);
            assert_eq!(shifted, projected, "{kind:?}");
        }
    }

    #[test]
    fn move_to_is_absolute() {
        let mut piece = Piece::new(ShapeKind::Line, BlockColor::Red, Deg90, 12, 1);
        piece.move_to(4, 0);
        assert_eq!(piece.anchor(), (4, 0));
        assert_eq!(piece, Piece::new(ShapeKind::Line, BlockColor::Red, Deg90, 4, 0));
    }

    #[test]
    fn bottom_contour_is_lowest_block_per_column() {
        for kind in ShapeKind::VARIANTS {
            for orientation in Orientation::VARIANTS {
                let piece = Piece::new(kind, BlockColor::Teal, orientation, 0, 0);
                let contour: Vec<&Block> = piece.bottom_blocks().collect();
                for block in piece.blocks() {
                    let lowest_in_column = piece
                        .blocks()
                        .iter()
                        .filter(|other| other.column == block.column)
                        .map(|other| other.row)
                        .max()
                        .unwrap();
                    let in_contour = contour
                        .iter()
                        .any(|c| (c.column, c.row) == (block.column, block.row));
                    assert_eq!(
                        in_contour,
                        block.row == lowest_in_column,
                        "{kind:?} at {orientation:?}, block ({}, {})",
                        block.column,
                        block.row,
                    );
                }
            }
        }
    }

    #[test]
    fn random_piece_sits_at_requested_anchor() {
        let mut rng = rand::rng();
        for _ in 0..32 {
            let piece = Piece::random(&mut rng, 12, 1);
            assert_eq!(piece.anchor(), (12, 1));
        }
    }
}
