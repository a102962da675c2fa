/*!
This module handles creation / initialization / building of [`Game`]s.
*/

use super::*;

/// This builder exposes the ability to configure a new [`Game`].
///
/// Generally speaking, when using `GameBuilder`, you'll first call
/// [`GameBuilder::new`] or [`Game::builder`], then chain calls to methods to
/// set each option, then call [`GameBuilder::build`]. The `GameBuilder` is
/// not used up and its configuration can be re-used to initialize more
/// [`Game`]s.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameBuilder {
    /// The grid width the game will be played on.
    pub columns: i32,
    /// The grid height the game will be played on.
    pub rows: i32,
    /// The value to seed the game's PRNG with.
    pub seed: Option<u64>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            columns: Game::DEFAULT_COLUMNS,
            rows: Game::DEFAULT_ROWS,
            seed: None,
        }
    }
}

impl GameBuilder {
    /// Creates a blank new template representing a yet-to-be-started [`Game`]
    /// ready for configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Game`] with the information specified by `self`.
    ///
    /// If no seed was set, a thread-random one is drawn, so distinct
    /// unseeded games play distinct rounds.
    ///
    /// # Panics
    ///
    /// Panics if the configured dimensions are invalid (see [`Grid::new`]).
    pub fn build(&self) -> Game {
        let seed = self.seed.unwrap_or_else(rand::random);
        Game {
            grid: Grid::new(self.columns, self.rows),
            falling_piece: None,
            next_piece: None,
            score: 0,
            level: 1,
            rng: GameRng::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// The grid width the game will be played on.
    pub fn columns(&mut self, x: i32) -> &mut Self {
        self.columns = x;
        self
    }

    /// The grid height the game will be played on.
    pub fn rows(&mut self, x: i32) -> &mut Self {
        self.rows = x;
        self
    }

    /// The value to seed the game's PRNG with.
    pub fn seed(&mut self, x: u64) -> &mut Self {
        self.seed = Some(x);
        self
    }
}
