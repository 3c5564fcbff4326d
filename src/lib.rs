//! Seeded maze engine: reproducible perfect-maze generation, movement checks
//! and shortest-path solving, plus the game session driven by the terminal
//! front end.

pub mod config;
pub mod error;
pub mod game;
pub mod generator;
pub mod input;
pub mod maze;
pub mod render;
pub mod rng;
pub mod solver;

pub use error::{MazeError, Result};
pub use generator::generate;
pub use maze::{can_move, Coord, Direction, Maze};
pub use rng::derive_generator;
pub use solver::find_path;

pub const DEFAULT_ROWS: usize = 25;
pub const DEFAULT_COLS: usize = 25;
