use std::fmt;

use crate::error::{MazeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    Top,
    Right,
    Bottom,
    Left,
}

struct DirInfo {
    dr: isize,
    dc: isize,
    wall: Wall,
    opposite: Wall,
}

static DIR_TABLE: [DirInfo; 4] = [
    DirInfo { dr: -1, dc: 0, wall: Wall::Top, opposite: Wall::Bottom },
    DirInfo { dr: 0, dc: 1, wall: Wall::Right, opposite: Wall::Left },
    DirInfo { dr: 1, dc: 0, wall: Wall::Bottom, opposite: Wall::Top },
    DirInfo { dr: 0, dc: -1, wall: Wall::Left, opposite: Wall::Right },
];

impl Direction {
    /// Canonical expansion order used by both carving and solving.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    fn info(self) -> &'static DirInfo {
        &DIR_TABLE[self as usize]
    }

    pub fn delta(self) -> (isize, isize) {
        let info = self.info();
        (info.dr, info.dc)
    }

    pub fn wall(self) -> Wall {
        self.info().wall
    }

    /// The wall on the neighbouring cell that faces back at us.
    pub fn opposite_wall(self) -> Wall {
        self.info().opposite
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub const ALL: Walls = Walls {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };

    pub fn has(&self, wall: Wall) -> bool {
        match wall {
            Wall::Top => self.top,
            Wall::Right => self.right,
            Wall::Bottom => self.bottom,
            Wall::Left => self.left,
        }
    }

    fn remove(&mut self, wall: Wall) {
        match wall {
            Wall::Top => self.top = false,
            Wall::Right => self.right = false,
            Wall::Bottom => self.bottom = false,
            Wall::Left => self.left = false,
        }
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::ALL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub walls: Walls,
}

/// Fixed-size grid of cells, stored row-major. Shared walls are recorded on
/// both cells; the only mutation is [`Maze::remove_wall`], which clears both
/// sides together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Maze {
    /// A maze with every wall standing.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell { walls: Walls::ALL }; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub(crate) fn index(&self, pos: Coord) -> usize {
        pos.row * self.cols + pos.col
    }

    pub(crate) fn coord_at(&self, idx: usize) -> Coord {
        Coord::new(idx / self.cols, idx % self.cols)
    }

    pub fn check(&self, pos: Coord) -> Result<()> {
        if self.in_bounds(pos.row, pos.col) {
            Ok(())
        } else {
            Err(MazeError::OutOfRange {
                row: pos.row,
                col: pos.col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn cell(&self, pos: Coord) -> Result<&Cell> {
        self.check(pos)?;
        Ok(&self.cells[self.index(pos)])
    }

    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (self.coord_at(idx), cell))
    }

    /// In-bounds neighbour of `pos` one step towards `dir`.
    pub fn step(&self, pos: Coord, dir: Direction) -> Option<Coord> {
        let (dr, dc) = dir.delta();
        let nr = pos.row as isize + dr;
        let nc = pos.col as isize + dc;
        if nr < 0 || nc < 0 {
            return None;
        }
        let (nr, nc) = (nr as usize, nc as usize);
        if !self.in_bounds(nr, nc) {
            return None;
        }
        Some(Coord::new(nr, nc))
    }

    /// In-bounds neighbours in canonical order, whether walled or not.
    pub fn neighbors(&self, pos: Coord) -> Vec<(Direction, Coord)> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.step(pos, dir).map(|next| (dir, next)))
            .collect()
    }

    /// Knocks down the wall pair between `pos` and its neighbour towards `dir`.
    pub fn remove_wall(&mut self, pos: Coord, dir: Direction) -> Result<Coord> {
        self.check(pos)?;
        let next = self.step(pos, dir).ok_or(MazeError::OutOfRange {
            row: pos.row,
            col: pos.col,
            rows: self.rows,
            cols: self.cols,
        })?;
        let (a, b) = (self.index(pos), self.index(next));
        self.cells[a].walls.remove(dir.wall());
        self.cells[b].walls.remove(dir.opposite_wall());
        Ok(next)
    }

    /// Number of open wall pairs between adjacent cells.
    pub fn passages(&self) -> usize {
        self.cells()
            .map(|(_, cell)| !cell.walls.right as usize + !cell.walls.bottom as usize)
            .sum()
    }
}

/// Whether a player at `(row, col)` may step towards `dir`.
pub fn can_move(maze: &Maze, row: usize, col: usize, dir: Direction) -> Result<bool> {
    let pos = Coord::new(row, col);
    let cell = maze.cell(pos)?;
    if cell.walls.has(dir.wall()) {
        return Ok(false);
    }
    Ok(maze.step(pos, dir).is_some())
}
