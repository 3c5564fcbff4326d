//! Caller-side state of one play session: the seed, the maze built from it,
//! where the player stands and any auto-solve playback in progress. Timing
//! lives with the caller, which calls [`Game::advance_auto`] once per tick.

use rand::Rng;

use crate::error::Result;
use crate::generator::generate;
use crate::maze::{can_move, Coord, Direction, Maze};
use crate::rng::derive_generator;
use crate::solver::find_path;

const SEED_LEN: usize = 8;
const SEED_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Blocked,
    Moved,
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoState {
    Idle,
    Running,
}

pub struct Game {
    rows: usize,
    cols: usize,
    seed: String,
    custom_seed: bool,
    maze: Maze,
    player: Coord,
    goal: Coord,
    paused: bool,
    won: bool,
    auto_path: Vec<Coord>,
    auto_plan: Vec<Coord>,
    auto_next: Option<usize>,
}

/// Short base-36 seed for a fresh, shareable maze.
pub fn random_seed(rng: &mut impl Rng) -> String {
    (0..SEED_LEN)
        .map(|_| SEED_ALPHABET[rng.gen_range(0..SEED_ALPHABET.len())] as char)
        .collect()
}

fn build(rows: usize, cols: usize, seed: &str) -> Result<Maze> {
    generate(rows, cols, &mut derive_generator(Some(seed)))
}

impl Game {
    /// A `None` or empty seed draws a random one, and later new games will
    /// draw again. A given seed is kept, so new games rebuild the same maze.
    pub fn new(seed: Option<String>, rows: usize, cols: usize, rng: &mut impl Rng) -> Result<Self> {
        let (seed, custom_seed) = match seed {
            Some(s) if !s.is_empty() => (s, true),
            _ => (random_seed(rng), false),
        };
        let maze = build(rows, cols, &seed)?;
        log::info!("new {}x{} maze from seed {:?}", rows, cols, seed);
        Ok(Self {
            rows,
            cols,
            seed,
            custom_seed,
            maze,
            player: Coord::new(0, 0),
            goal: Coord::new(rows - 1, cols - 1),
            paused: false,
            won: false,
            auto_path: Vec::new(),
            auto_plan: Vec::new(),
            auto_next: None,
        })
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn is_custom_seed(&self) -> bool {
        self.custom_seed
    }

    pub fn player(&self) -> Coord {
        self.player
    }

    pub fn start(&self) -> Coord {
        Coord::new(0, 0)
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Cells of the auto-solve route revealed so far.
    pub fn auto_path(&self) -> &[Coord] {
        &self.auto_path
    }

    pub fn auto_state(&self) -> AutoState {
        if self.auto_next.is_some() {
            AutoState::Running
        } else {
            AutoState::Idle
        }
    }

    /// Starts over: same maze for a custom seed, a fresh random one otherwise.
    pub fn new_game(&mut self, rng: &mut impl Rng) -> Result<()> {
        if !self.custom_seed {
            self.seed = random_seed(rng);
        }
        self.rebuild()
    }

    /// Applies a seed typed by the user. Empty clears the custom seed.
    pub fn set_seed(&mut self, seed: &str, rng: &mut impl Rng) -> Result<()> {
        if seed.is_empty() {
            self.custom_seed = false;
            self.seed = random_seed(rng);
        } else {
            self.custom_seed = true;
            self.seed = seed.to_string();
        }
        self.rebuild()
    }

    fn rebuild(&mut self) -> Result<()> {
        self.maze = build(self.rows, self.cols, &self.seed)?;
        self.player = self.start();
        self.won = false;
        self.stop_auto();
        self.auto_path.clear();
        log::info!("regenerated maze from seed {:?}", self.seed);
        Ok(())
    }

    pub fn try_move(&mut self, dir: Direction) -> Result<MoveOutcome> {
        if self.paused || self.won {
            return Ok(MoveOutcome::Blocked);
        }
        if !can_move(&self.maze, self.player.row, self.player.col, dir)? {
            return Ok(MoveOutcome::Blocked);
        }
        let Some(next) = self.maze.step(self.player, dir) else {
            return Ok(MoveOutcome::Blocked);
        };
        self.player = next;
        self.stop_auto();
        self.auto_path.clear();
        Ok(self.arrive())
    }

    fn arrive(&mut self) -> MoveOutcome {
        if self.player == self.goal {
            self.won = true;
            log::info!("goal reached on seed {:?}", self.seed);
            MoveOutcome::Won
        } else {
            MoveOutcome::Moved
        }
    }

    /// Stops a running auto-solve and hides its route, or plans a route from
    /// the player to the goal and starts playing it back.
    pub fn toggle_auto(&mut self) -> Result<AutoState> {
        if self.auto_next.is_some() {
            self.stop_auto();
            self.auto_path.clear();
            return Ok(AutoState::Idle);
        }
        if self.paused || self.won {
            return Ok(AutoState::Idle);
        }
        let plan = find_path(&self.maze, self.player, self.goal)?;
        if plan.len() <= 1 {
            return Ok(AutoState::Idle);
        }
        log::debug!("auto-solve planned {} steps", plan.len() - 1);
        self.auto_path = plan[..1].to_vec();
        self.auto_plan = plan;
        self.auto_next = Some(1);
        Ok(AutoState::Running)
    }

    /// One playback step.
    pub fn advance_auto(&mut self) -> MoveOutcome {
        if self.paused {
            return MoveOutcome::Blocked;
        }
        let Some(i) = self.auto_next else {
            return MoveOutcome::Blocked;
        };
        let next = self.auto_plan[i];
        self.auto_path.push(next);
        self.player = next;
        if i + 1 >= self.auto_plan.len() {
            self.stop_auto();
            return self.arrive();
        }
        self.auto_next = Some(i + 1);
        MoveOutcome::Moved
    }

    fn stop_auto(&mut self) {
        self.auto_next = None;
        self.auto_plan.clear();
    }

    /// Pausing halts auto-solve playback but leaves the route drawn.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        if self.paused {
            self.stop_auto();
        }
        self.paused
    }
}
