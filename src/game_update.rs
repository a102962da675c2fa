/*!
This module handles the operations that advance a round of play.

The external driver owns the tick cadence and calls [`Game::tick`]; player
intents arrive as the move / rotate / drop operations. Every operation is a
deterministic check-then-commit: attempt the mutation, validate against the
grid, revert in place if invalid. Expected game conditions (illegal placement,
spawn collision) are state transitions, never errors.
*/

use super::*;

impl Game {
    /// Ensures a preview piece exists and announces the new round.
    ///
    /// Emits [`Event::GameBegan`]. Does not spawn the falling piece itself -
    /// that happens via [`Game::spawn_next`].
    pub fn begin_game(&mut self) {
        if self.next_piece.is_none() {
            let (column, row) = self.preview_anchor();
            self.next_piece = Some(Piece::random(&mut self.rng, column, row));
        }
        self.events.push(Event::GameBegan);
    }

    /// Promotes the preview piece into play and pre-generates a fresh
    /// preview piece.
    ///
    /// The promoted piece is repositioned to the spawn anchor and immediately
    /// legality-checked. On a spawn collision (board full near the top) the
    /// promoted piece is parked back at the preview anchor, the round ends
    /// via [`Game::end_game`], and `None` is returned with no falling piece
    /// set. Otherwise returns copies of `(falling, next)` for the consumer
    /// to render.
    pub fn spawn_next(&mut self) -> Option<(Piece, Piece)> {
        let (preview_column, preview_row) = self.preview_anchor();
        let (spawn_column, spawn_row) = self.spawn_anchor();

        self.falling_piece = self.next_piece.take();
        self.next_piece = Some(Piece::random(&mut self.rng, preview_column, preview_row));
        if let Some(piece) = self.falling_piece.as_mut() {
            piece.move_to(spawn_column, spawn_row);
        }

        if self.placement_illegal() {
            // Spawn collision. The promoted piece goes back into the preview
            // slot, replacing the piece generated above.
            if let Some(mut piece) = self.falling_piece.take() {
                piece.move_to(preview_column, preview_row);
                self.next_piece = Some(piece);
            }
            self.end_game();
            return None;
        }

        match (self.falling_piece, self.next_piece) {
            (Some(falling), Some(next)) => Some((falling, next)),
            _ => None,
        }
    }

    /// Whether the falling piece currently occupies an illegal position:
    /// any block outside the grid or colliding with a settled block.
    ///
    /// Always `false` while no piece is falling.
    pub fn placement_illegal(&self) -> bool {
        let Some(piece) = self.falling_piece.as_ref() else {
            return false;
        };
        piece.blocks().iter().any(|block| {
            !self.grid.in_bounds(block.column, block.row)
                || self.grid.get(block.column, block.row).is_some()
        })
    }

    /// Whether the falling piece rests on the floor or on settled blocks:
    /// any bottom-contour block at the last row, or with an occupied cell
    /// directly below it.
    ///
    /// Always `false` while no piece is falling. Only meaningful while the
    /// piece is legally placed.
    pub fn is_touching(&self) -> bool {
        let Some(piece) = self.falling_piece.as_ref() else {
            return false;
        };
        piece.bottom_blocks().any(|block| {
            block.row == self.grid.rows() - 1
                || self.grid.get(block.column, block.row + 1).is_some()
        })
    }

    /// Commits all four falling-piece blocks into the grid at their current
    /// positions and clears the falling slot.
    ///
    /// Emits [`Event::PieceLanded`]. Normally invoked through [`Game::tick`]
    /// once the piece can no longer fall. No-op while no piece is falling.
    pub fn settle(&mut self) {
        let Some(piece) = self.falling_piece.take() else {
            return;
        };
        for &block in piece.blocks() {
            self.grid.set(block.column, block.row, Some(block));
        }
        self.events.push(Event::PieceLanded);
    }

    /// Advances gravity by one step: the falling piece drops one row.
    ///
    /// If the lowered position is illegal the piece is raised back; if even
    /// the original position is illegal the board has overflowed and the
    /// round ends, otherwise the piece settles. If the lowered position is
    /// legal, [`Event::PieceMoved`] is emitted - and if the piece now touches
    /// the floor or the stack it settles immediately rather than waiting for
    /// one more tick.
    ///
    /// The engine never schedules this itself; the external driver calls it
    /// at whatever cadence (milliseconds per row) it owns.
    pub fn tick(&mut self) {
        let Some(piece) = self.falling_piece.as_mut() else {
            return;
        };
        piece.lower_by_one_row();

        if self.placement_illegal() {
            if let Some(piece) = self.falling_piece.as_mut() {
                piece.raise_by_one_row();
            }
            if self.placement_illegal() {
                self.end_game();
            } else {
                self.settle();
            }
        } else {
            self.events.push(Event::PieceMoved);
            if self.is_touching() {
                self.settle();
            }
        }
    }

    /// Drops the falling piece to the lowest legal row.
    ///
    /// Emits [`Event::PieceDropped`]. The drop does not settle the piece;
    /// the driver is expected to follow up with [`Game::tick`], mirroring
    /// normal gravity semantics. No-op while no piece is falling.
    pub fn hard_drop(&mut self) {
        if self.falling_piece.is_none() {
            return;
        }
        while !self.placement_illegal() {
            if let Some(piece) = self.falling_piece.as_mut() {
                piece.lower_by_one_row();
            }
        }
        if let Some(piece) = self.falling_piece.as_mut() {
            piece.raise_by_one_row();
        }
        self.events.push(Event::PieceDropped);
    }

    /// Rotates the falling piece one step clockwise, reverting in place if
    /// the rotated position is illegal.
    ///
    /// There is no wall-kick search; a rejected rotation fails silently.
    /// Emits [`Event::PieceMoved`] on success only.
    pub fn rotate_clockwise(&mut self) {
        let Some(piece) = self.falling_piece.as_mut() else {
            return;
        };
        piece.rotate_clockwise();
        if self.placement_illegal() {
            if let Some(piece) = self.falling_piece.as_mut() {
                piece.rotate_counter_clockwise();
            }
            return;
        }
        self.events.push(Event::PieceMoved);
    }

    /// Rotates the falling piece one step counter-clockwise, reverting in
    /// place if the rotated position is illegal.
    ///
    /// Emits [`Event::PieceMoved`] on success only.
    pub fn rotate_counter_clockwise(&mut self) {
        let Some(piece) = self.falling_piece.as_mut() else {
            return;
        };
        piece.rotate_counter_clockwise();
        if self.placement_illegal() {
            if let Some(piece) = self.falling_piece.as_mut() {
                piece.rotate_clockwise();
            }
            return;
        }
        self.events.push(Event::PieceMoved);
    }

    /// Shifts the falling piece one column to the left, reverting in place
    /// if the shifted position is illegal.
    ///
    /// Emits [`Event::PieceMoved`] on success only.
    pub fn shift_left(&mut self) {
        let Some(piece) = self.falling_piece.as_mut() else {
            return;
        };
        piece.shift_left_by_one_column();
        if self.placement_illegal() {
            if let Some(piece) = self.falling_piece.as_mut() {
                piece.shift_right_by_one_column();
            }
            return;
        }
        self.events.push(Event::PieceMoved);
    }

    /// Shifts the falling piece one column to the right, reverting in place
    /// if the shifted position is illegal.
    ///
    /// Emits [`Event::PieceMoved`] on success only.
    pub fn shift_right(&mut self) {
        let Some(piece) = self.falling_piece.as_mut() else {
            return;
        };
        piece.shift_right_by_one_column();
        if self.placement_illegal() {
            if let Some(piece) = self.falling_piece.as_mut() {
                piece.shift_left_by_one_column();
            }
            return;
        }
        self.events.push(Event::PieceMoved);
    }

    /// Removes every fully-occupied row, scores it, and collapses the
    /// columns above.
    ///
    /// Rows are scanned from the bottom (`rows - 1`) up to row 1 - row 0 is
    /// the spawn row and is never cleared. Returns
    /// `(removed_rows, fallen_blocks)`:
    ///
    /// - `removed_rows`: one entry per cleared row in scan order, each the
    ///   row's blocks left-to-right at their original positions.
    /// - `fallen_blocks`: for each column that had blocks slide down, those
    ///   blocks (with updated rows) in scan order.
    ///
    /// With no full rows this returns two empty vectors and changes nothing.
    /// Otherwise `removed_count * 10 * level` points are added, and if the
    /// score reaches `level * 1000` the level increments and
    /// [`Event::LeveledUp`] is emitted.
    pub fn clear_completed_lines(&mut self) -> (Vec<Vec<Block>>, Vec<Vec<Block>>) {
        let columns = self.grid.columns();
        let rows = self.grid.rows();

        let mut removed_rows: Vec<Vec<Block>> = Vec::new();
        for row in (1..rows).rev() {
            let row_blocks: Vec<Block> = (0..columns)
                .filter_map(|column| self.grid.get(column, row))
                .collect();
            if row_blocks.len() == columns as usize {
                for block in &row_blocks {
                    self.grid.set(block.column, block.row, None);
                }
                removed_rows.push(row_blocks);
            }
        }
        if removed_rows.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let points = removed_rows.len() as u32 * Self::POINTS_PER_LINE * self.level;
        self.score += points;
        if self.score >= self.level * Self::LEVEL_THRESHOLD {
            self.level += 1;
            self.events.push(Event::LeveledUp);
        }

        // Column-wise collapse. Anything that can move sits above the
        // bottom-most cleared row, which is the first entry of the list
        // (rows were collected bottom-up).
        let bottom_cleared_row = removed_rows[0][0].row;
        let mut fallen_blocks: Vec<Vec<Block>> = Vec::new();
        for column in 0..columns {
            let mut column_fallen: Vec<Block> = Vec::new();
            for row in (1..bottom_cleared_row).rev() {
                let Some(mut block) = self.grid.get(column, row) else {
                    continue;
                };
                // Slide down to the lowest free row beneath it in this column.
                let mut new_row = row;
                while new_row < rows - 1 && self.grid.get(column, new_row + 1).is_none() {
                    new_row += 1;
                }
                if new_row == row {
                    continue;
                }
                block.row = new_row;
                self.grid.set(column, row, None);
                self.grid.set(column, new_row, Some(block));
                column_fallen.push(block);
            }
            if !column_fallen.is_empty() {
                fallen_blocks.push(column_fallen);
            }
        }

        (removed_rows, fallen_blocks)
    }

    /// Ends the round: score and level reset to `(0, 1)`.
    ///
    /// Emits [`Event::GameEnded`]. The grid is left intact - the driver
    /// requests [`Game::drain_all_blocks`] before restarting.
    pub fn end_game(&mut self) {
        self.score = 0;
        self.level = 1;
        self.events.push(Event::GameEnded);
    }

    /// Snapshots every settled block per row (ascending, one entry per row,
    /// possibly empty), clearing the grid as a side effect.
    ///
    /// Used for the end-of-game visual clear and for any full-board reset.
    pub fn drain_all_blocks(&mut self) -> Vec<Vec<Block>> {
        let mut all_blocks = Vec::with_capacity(self.grid.rows() as usize);
        for row in 0..self.grid.rows() {
            let mut row_blocks = Vec::new();
            for column in 0..self.grid.columns() {
                if let Some(block) = self.grid.get(column, row) {
                    row_blocks.push(block);
                    self.grid.set(column, row, None);
                }
            }
            all_blocks.push(row_blocks);
        }
        all_blocks
    }

    /// Drains the queue of notifications emitted since the last call.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
