/*!
# Blockfall Engine

`blockfall_engine` is an implementation of a falling-block puzzle game's rules
engine: a grid of settled blocks, a falling piece, placement legality, gravity
and settling, line clearing with per-column collapse, scoring and leveling.

The engine never renders, schedules or reads input itself. An external driver
calls [`Game::tick`] at its own cadence, forwards player intents as the move /
rotate / drop operations, and drains [`Game::take_events`] to learn what to
redraw.

# Examples

```
use blockfall_engine::{Event, Game};

// Starting up a game - the board defaults to 10x20.
let mut game = Game::builder().seed(42).build();
game.begin_game();

// Promote the preview piece into play and pre-generate a fresh preview.
let pieces = game.spawn_next();
assert!(pieces.is_some());

// An external driver calls this periodically; the piece falls one row.
game.tick();

// Notifications accumulated since the last drain, e.g. for rendering.
for event in game.take_events() {
    match event {
        Event::PieceMoved => { /* redraw the falling piece */ }
        _ => {}
    }
}
```
*/

#![warn(missing_docs)]

mod game_builder;
mod game_update;
pub mod grid;
pub mod piece;

use rand_chacha::{rand_core::SeedableRng, ChaCha12Rng};

pub use game_builder::GameBuilder;
pub use grid::Grid;
pub use piece::Piece;

/// Relative cell offsets `(column, row)` that make up a shape's geometry.
///
/// Rows grow *downward*: row `0` is the spawn row at the top of the grid.
pub type Offset = (i32, i32);
/// The internal PRNG used by a game.
pub type GameRng = ChaCha12Rng;

/// Represents one of the seven falling shapes.
///
/// Every shape consists of exactly four blocks; its geometry per
/// [`Orientation`] is given by two fixed tables, [`ShapeKind::offsets`] and
/// [`ShapeKind::bottom_contour`].
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    /// 2×2 square. Identical in all four orientations.
    Square = 0,
    /// Straight line of four blocks.
    Line = 1,
    /// 'T'-junction.
    T = 2,
    /// 'L'-shape.
    L = 3,
    /// 'J'-shape, the mirror image of [`ShapeKind::L`].
    J = 4,
    /// 'S'-snake.
    S = 5,
    /// 'Z'-snake, the mirror image of [`ShapeKind::S`].
    Z = 6,
}

/// Represents the rotational state of a piece.
///
/// The four values form a ring: one clockwise rotation steps `+1`, one
/// counter-clockwise rotation steps `-1`, wrapping modulo 4.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// 0°.
    Deg0 = 0,
    /// 90°.
    Deg90,
    /// 180°.
    Deg180,
    /// 270°.
    Deg270,
}

/// The color tag carried by every settled or falling block.
///
/// Purely cosmetic variety; picked uniformly at random per spawned piece and
/// shared by all four blocks of that piece.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockColor {
    /// Blue.
    Blue = 0,
    /// Orange.
    Orange,
    /// Purple.
    Purple,
    /// Red.
    Red,
    /// Teal.
    Teal,
    /// Yellow.
    Yellow,
}

/// A single block, either settled in the [`Grid`] or part of a falling
/// [`Piece`].
///
/// Equality is field equality on `(column, row, color)`; a block has no
/// identity beyond its position updates during collapse.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// Horizontal grid position, `0..columns` once settled.
    pub column: i32,
    /// Vertical grid position, `0..rows` once settled; `0` is the top.
    pub row: i32,
    /// Color tag shared with the piece this block belonged to.
    pub color: BlockColor,
}

/// A notification emitted by the engine for its consumer.
///
/// Events are pushed synchronously, in operation order, onto an internal
/// queue drained via [`Game::take_events`]. They carry no payload; the
/// consumer re-reads whatever state it needs through the read accessors
/// ([`Game::falling_piece`], [`Game::score`], ...).
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A new round has begun ([`Game::begin_game`]).
    GameBegan,
    /// The round ended; score and level were reset ([`Game::end_game`]).
    GameEnded,
    /// The falling piece settled into the grid.
    PieceLanded,
    /// The falling piece moved or rotated to a new legal position.
    PieceMoved,
    /// The falling piece was hard-dropped onto the stack.
    PieceDropped,
    /// The score crossed the current level threshold.
    LeveledUp,
}

impl ShapeKind {
    /// All `ShapeKind` enum variants in order.
    ///
    /// Note that `ShapeKind::VARIANTS[k as usize] == k` always holds.
    pub const VARIANTS: [Self; 7] = {
        use ShapeKind::*;
        [Square, Line, T, L, J, S, Z]
    };

    /// Returns the four block offsets of this shape at the given orientation,
    /// relative to the piece anchor.
    ///
    /// The list order is fixed; [`ShapeKind::bottom_contour`] indexes into it.
    #[rustfmt::skip]
    pub const fn offsets(&self, oriented: Orientation) -> [Offset; 4] {
        use Orientation::*;
        match self {
            // ▓▓
            // ▓▓
            ShapeKind::Square => [(0, 0), (1, 0), (0, 1), (1, 1)],
            ShapeKind::Line => match oriented {
                // ▓
                // ▓ (×4)
                Deg0 | Deg180 => [(0, 0), (0, 1), (0, 2), (0, 3)],
                // ▓▓▓▓
                Deg90 | Deg270 => [(-1, 0), (0, 0), (1, 0), (2, 0)],
            },
            ShapeKind::T => match oriented {
                //  ▓
                // ▓▓▓
                Deg0 => [(1, 0), (0, 1), (1, 1), (2, 1)],
                //  ▓
                //  ▓▓
                //  ▓
                Deg90 => [(2, 1), (1, 0), (1, 1), (1, 2)],
                // ▓▓▓
                //  ▓
                Deg180 => [(1, 2), (0, 1), (1, 1), (2, 1)],
                //  ▓
                // ▓▓
                //  ▓
                Deg270 => [(0, 1), (1, 0), (1, 1), (1, 2)],
            },
            ShapeKind::L => match oriented {
                // ▓
                // ▓
                // ▓▓
                Deg0 => [(0, 0), (0, 1), (0, 2), (1, 2)],
                // ▓▓▓
                // ▓
                Deg90 => [(1, 1), (0, 1), (-1, 1), (-1, 2)],
                // ▓▓
                //  ▓
                //  ▓
                Deg180 => [(0, 2), (0, 1), (0, 0), (-1, 0)],
                //   ▓
                // ▓▓▓
                Deg270 => [(-1, 1), (0, 1), (1, 1), (1, 0)],
            },
            ShapeKind::J => match oriented {
                //  ▓
                //  ▓
                // ▓▓
                Deg0 => [(1, 0), (1, 1), (1, 2), (0, 2)],
                // ▓
                // ▓▓▓
                Deg90 => [(1, 1), (0, 1), (-1, 1), (-1, 0)],
                // ▓▓
                // ▓
                // ▓
                Deg180 => [(0, 2), (0, 1), (0, 0), (1, 0)],
                // ▓▓▓
                //   ▓
                Deg270 => [(-1, 1), (0, 1), (1, 1), (1, 2)],
            },
            ShapeKind::S => match oriented {
                // ▓
                // ▓▓
                //  ▓
                Deg0 | Deg180 => [(0, 0), (0, 1), (1, 1), (1, 2)],
                //  ▓▓
                // ▓▓
                Deg90 | Deg270 => [(2, 0), (1, 0), (1, 1), (0, 1)],
            },
            ShapeKind::Z => match oriented {
                //  ▓
                // ▓▓
                // ▓
                Deg0 | Deg180 => [(1, 0), (1, 1), (0, 1), (0, 2)],
                // ▓▓
                //  ▓▓
                Deg90 | Deg270 => [(0, 0), (1, 0), (1, 1), (2, 1)],
            },
        }
    }

    /// Returns the indices (into [`ShapeKind::offsets`]) of the blocks that
    /// form the shape's bottom contour at the given orientation.
    ///
    /// These are the lowest blocks per occupied column; touch detection only
    /// ever needs to look directly below them.
    #[rustfmt::skip]
    pub const fn bottom_contour(&self, oriented: Orientation) -> &'static [usize] {
        use Orientation::*;
        match self {
            ShapeKind::Square => &[2, 3],
            ShapeKind::Line => match oriented {
                Deg0 | Deg180 => &[3],
                Deg90 | Deg270 => &[0, 1, 2, 3],
            },
            ShapeKind::T => match oriented {
                Deg0 => &[1, 2, 3],
                Deg90 => &[0, 3],
                Deg180 => &[0, 1, 3],
                Deg270 => &[0, 3],
            },
            ShapeKind::L => match oriented {
                Deg0 => &[2, 3],
                Deg90 => &[0, 1, 3],
                Deg180 => &[0, 3],
                Deg270 => &[0, 1, 2],
            },
            ShapeKind::J => match oriented {
                Deg0 => &[2, 3],
                Deg90 => &[0, 1, 2],
                Deg180 => &[0, 3],
                Deg270 => &[0, 1, 3],
            },
            ShapeKind::S => match oriented {
                Deg0 | Deg180 => &[1, 3],
                Deg90 | Deg270 => &[0, 2, 3],
            },
            ShapeKind::Z => match oriented {
                Deg0 | Deg180 => &[1, 3],
                Deg90 | Deg270 => &[0, 2, 3],
            },
        }
    }
}

impl Orientation {
    /// All `Orientation` enum variants in order.
    ///
    /// Note that `Orientation::VARIANTS[o as usize] == o` always holds.
    pub const VARIANTS: [Self; 4] = {
        use Orientation::*;
        [Deg0, Deg90, Deg180, Deg270]
    };

    /// Find a new orientation by turning clockwise some number of times.
    ///
    /// This accepts `i8` to allow for counter-clockwise rotation.
    pub const fn rotated_right(&self, right_turns: i8) -> Self {
        Orientation::VARIANTS[((*self as i8 + right_turns) as isize).rem_euclid(4) as usize]
    }
}

impl BlockColor {
    /// All `BlockColor` enum variants in order.
    ///
    /// Note that `BlockColor::VARIANTS[c as usize] == c` always holds.
    pub const VARIANTS: [Self; 6] = {
        use BlockColor::*;
        [Blue, Orange, Purple, Red, Teal, Yellow]
    };
}

/// Main game struct representing a round of play.
///
/// The `Game` exclusively owns the [`Grid`] and both piece slots; consumers
/// may only read them through the accessors here. All operations are
/// synchronous and run to completion - the engine performs no locking and
/// assumes at most one logical operation in flight at a time.
#[derive(Eq, PartialEq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    grid: Grid,
    falling_piece: Option<Piece>,
    next_piece: Option<Piece>,
    score: u32,
    level: u32,
    rng: GameRng,
    events: Vec<Event>,
}

impl Game {
    /// Default grid width.
    pub const DEFAULT_COLUMNS: i32 = 10;
    /// Default grid height.
    pub const DEFAULT_ROWS: i32 = 20;
    /// Points awarded per cleared line, before the level multiplier.
    pub const POINTS_PER_LINE: u32 = 10;
    /// Score-per-level needed to level up: the bar is `level * LEVEL_THRESHOLD`.
    pub const LEVEL_THRESHOLD: u32 = 1000;
    /// The row every promoted piece spawns at.
    pub const SPAWN_ROW: i32 = 0;
    /// The row the preview piece is parked at.
    pub const PREVIEW_ROW: i32 = 1;

    /// Creates a blank new template representing a yet-to-be-started `Game`
    /// ready for configuration.
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    /// Read accessor for the playing grid.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Read accessor for the currently falling piece, if any.
    pub const fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    /// Read accessor for the preview piece, if any.
    pub const fn next_piece(&self) -> Option<&Piece> {
        self.next_piece.as_ref()
    }

    /// The current total score of this round of play.
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// The current level, starting at `1`.
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// The anchor `(column, row)` at which promoted pieces start falling.
    ///
    /// `(4, 0)` on the default board; centered for other widths.
    pub const fn spawn_anchor(&self) -> (i32, i32) {
        (self.grid.columns() / 2 - 1, Self::SPAWN_ROW)
    }

    /// The anchor `(column, row)` at which the preview piece is parked.
    ///
    /// Deliberately outside the grid (`(12, 1)` on the default board); the
    /// preview piece is never legality-checked until it is promoted.
    pub const fn preview_anchor(&self) -> (i32, i32) {
        (self.grid.columns() + 2, Self::PREVIEW_ROW)
    }
}
