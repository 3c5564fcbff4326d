use clap::Parser;

use crate::{DEFAULT_COLS, DEFAULT_ROWS};

pub const DEFAULT_TICK_MS: u64 = 130;
pub const DEFAULT_RENDER_FPS: u64 = 120;

/// Largest accepted `--rows`/`--cols`; keeps the board inside terminal
/// coordinates.
pub const MAX_DIM: u64 = 512;

fn dim_parser() -> clap::builder::RangedU64ValueParser<usize> {
    clap::builder::RangedU64ValueParser::<usize>::new().range(1..=MAX_DIM)
}

/// Terminal maze: walk from the green corner to the red one.
#[derive(Parser, Debug, Clone)]
#[command(name = "maze25", version, about, long_about = None)]
pub struct Cli {
    /// Seed for a reproducible maze (random when omitted)
    #[arg(short, long, env = "MAZE_SEED")]
    pub seed: Option<String>,

    /// Maze rows
    #[arg(long, default_value_t = DEFAULT_ROWS, value_parser = dim_parser())]
    pub rows: usize,

    /// Maze columns
    #[arg(long, default_value_t = DEFAULT_COLS, value_parser = dim_parser())]
    pub cols: usize,

    /// Print the maze as text and exit instead of playing
    #[arg(long)]
    pub print: bool,

    /// With --print, also mark the shortest route to the goal
    #[arg(long, requires = "print")]
    pub solve: bool,

    /// Verbose logging to stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speed {
    pub tick_ms: u64,
    pub render_fps: u64,
}

impl Speed {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };
        Self {
            tick_ms: read("MAZE_TICK_MS", DEFAULT_TICK_MS),
            render_fps: read("MAZE_FPS", DEFAULT_RENDER_FPS),
        }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            render_fps: DEFAULT_RENDER_FPS,
        }
    }
}

pub fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}
