use std::collections::HashSet;
use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::game::{AutoState, Game};
use crate::maze::{Coord, Maze};

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Glyph {
    Wall,
    Open,
    Start,
    Finish,
    Player,
    Path,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Block {
    glyph: Glyph,
    color: Color,
}

impl Block {
    fn of(glyph: Glyph) -> Self {
        let color = match glyph {
            Glyph::Wall => Color::Grey,
            Glyph::Open => Color::Reset,
            Glyph::Start => Color::Green,
            Glyph::Finish => Color::Red,
            Glyph::Player => Color::Yellow,
            Glyph::Path => Color::Blue,
        };
        Block { glyph, color }
    }
}

/// Block-grid dimensions (width, height) of a maze: every cell and every
/// wall gets its own block.
pub fn board_size(maze: &Maze) -> (usize, usize) {
    (maze.cols() * 2 + 1, maze.rows() * 2 + 1)
}

fn wall_block(maze: &Maze, x: usize, y: usize) -> Option<(Coord, Coord)> {
    // Odd/odd blocks are cells, even/even are corners, mixed are wall slots
    // that are open only when the two cells on either side are joined.
    match (x % 2, y % 2) {
        (0, 1) => {
            let (r, k) = (y / 2, x / 2);
            if k == 0 || k == maze.cols() {
                return None;
            }
            Some((Coord::new(r, k - 1), Coord::new(r, k)))
        }
        (1, 0) => {
            let (k, c) = (y / 2, x / 2);
            if k == 0 || k == maze.rows() {
                return None;
            }
            Some((Coord::new(k - 1, c), Coord::new(k, c)))
        }
        _ => None,
    }
}

fn is_open_between(maze: &Maze, a: Coord, b: Coord) -> bool {
    let Ok(cell) = maze.cell(a) else {
        return false;
    };
    if b.col > a.col {
        !cell.walls.right
    } else {
        !cell.walls.bottom
    }
}

/// Glyph for each block, row-major.
pub fn layout(maze: &Maze, player: Option<Coord>, path: &[Coord]) -> Vec<Glyph> {
    let (w, h) = board_size(maze);
    let on_path: HashSet<Coord> = path.iter().copied().collect();
    let start = Coord::new(0, 0);
    let finish = Coord::new(maze.rows() - 1, maze.cols() - 1);
    let mut out = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            let glyph = if x % 2 == 1 && y % 2 == 1 {
                let pos = Coord::new(y / 2, x / 2);
                if Some(pos) == player {
                    Glyph::Player
                } else if pos == start {
                    Glyph::Start
                } else if pos == finish {
                    Glyph::Finish
                } else if on_path.contains(&pos) {
                    Glyph::Path
                } else {
                    Glyph::Open
                }
            } else if let Some((a, b)) = wall_block(maze, x, y) {
                if !is_open_between(maze, a, b) {
                    Glyph::Wall
                } else if on_path.contains(&a) && on_path.contains(&b) {
                    Glyph::Path
                } else {
                    Glyph::Open
                }
            } else {
                Glyph::Wall
            };
            out.push(glyph);
        }
    }
    out
}

/// Plain-text picture of a maze, one character per block.
pub fn render_text(maze: &Maze, path: &[Coord]) -> String {
    let (w, _) = board_size(maze);
    let glyphs = layout(maze, None, path);
    let mut out = String::with_capacity(glyphs.len() + glyphs.len() / w);
    for row in glyphs.chunks(w) {
        for glyph in row {
            out.push(match glyph {
                Glyph::Wall => '#',
                Glyph::Open => ' ',
                Glyph::Start => 'S',
                Glyph::Finish => 'F',
                Glyph::Player => '@',
                Glyph::Path => '.',
            });
        }
        out.push('\n');
    }
    out
}

/// Terminal cells (width, height) needed for the board plus the HUD line
/// above and a spare line below, or `None` when that exceeds terminal
/// coordinates.
pub fn needed_size(maze: &Maze) -> Option<(u16, u16)> {
    let (board_w, board_h) = board_size(maze);
    let w = u16::try_from(board_w.checked_mul(CELL_W)?).ok()?;
    let h = u16::try_from(board_h.checked_add(2)?).ok()?;
    Some((w, h))
}

pub struct Renderer {
    last: Vec<Block>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(maze: &Maze) -> Self {
        let (w, h) = board_size(maze);
        Self {
            last: vec![Block::of(Glyph::Open); w * h],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn render<W: Write>(&mut self, out: &mut W, game: &Game, prompt: Option<&str>) -> io::Result<()> {
        let (board_w, _) = board_size(game.maze());
        let needed = needed_size(game.maze());

        out.queue(MoveTo(0, 0))?;

        let (term_w, term_h) = terminal::size()?;
        let fits = needed.filter(|&(w, h)| term_w >= w && term_h >= h);
        let Some((needed_w, needed_h)) = fits else {
            out.queue(Clear(ClearType::All))?;
            let need = match needed {
                Some((w, h)) => format!("{}x{}", w, h),
                None => "more than 65535x65535".to_string(),
            };
            let msg = format!(
                "Terminal too small. Need at least {} (cols x rows). Current: {}x{}.",
                need, term_w, term_h
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        };

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = hud_line(game, prompt);
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        let glyphs = layout(game.maze(), Some(game.player()), game.auto_path());
        if self.last.len() != glyphs.len() {
            self.last = vec![Block::of(Glyph::Open); glyphs.len()];
            self.needs_full = true;
        }
        for (idx, glyph) in glyphs.into_iter().enumerate() {
            let block = Block::of(glyph);
            if self.needs_full || block != self.last[idx] {
                self.last[idx] = block;
                self.draw_block(out, idx % board_w, idx / board_w, block)?;
            }
        }
        self.needs_full = false;

        out.flush()
    }

    fn draw_block<W: Write>(&self, out: &mut W, x: usize, y: usize, block: Block) -> io::Result<()> {
        let text = match block.glyph {
            Glyph::Wall => "██",
            Glyph::Open => "  ",
            Glyph::Start => "▓▓",
            Glyph::Finish => "▓▓",
            Glyph::Player => "🙂",
            Glyph::Path => "··",
        };
        let x_pos = u16::try_from(x * CELL_W).map_or(u16::MAX, |x| self.origin_x.saturating_add(x));
        let y_pos = u16::try_from(y).map_or(u16::MAX, |y| self.origin_y.saturating_add(y));
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(block.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                out.queue(Print(' '))?;
            }
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

/// Status line above the board. While a seed is being typed it shows the
/// prompt instead of the key help.
pub fn hud_line(game: &Game, prompt: Option<&str>) -> String {
    if let Some(text) = prompt {
        return format!("New seed: {}_  (enter apply, esc cancel)", text);
    }
    let custom = if game.is_custom_seed() { " (custom)" } else { "" };
    let state = if game.is_won() {
        "VICTORY! r: new game"
    } else if game.is_paused() {
        "PAUSED"
    } else if game.auto_state() == AutoState::Running {
        "AUTO"
    } else {
        "PLAY"
    };
    format!(
        "Seed: {}{}  Pos: {}  {}  (arrows/hjkl move, p pause, r new, s seed, space auto, q quit)",
        game.seed(),
        custom,
        game.player(),
        state
    )
}
