use std::collections::VecDeque;

use crate::error::Result;
use crate::maze::{can_move, Coord, Direction, Maze};

const NO_PREV: usize = usize::MAX;

/// Shortest route from `start` to `goal`, both ends included.
///
/// Breadth-first over open passages, expanding up, right, down, left; among
/// equally short routes the one found first in that order wins. An empty
/// result means the goal cannot be reached. Coordinates outside the maze are
/// an error.
pub fn find_path(maze: &Maze, start: Coord, goal: Coord) -> Result<Vec<Coord>> {
    maze.check(start)?;
    maze.check(goal)?;
    if start == goal {
        return Ok(vec![start]);
    }

    let mut visited = vec![false; maze.len()];
    let mut prev = vec![NO_PREV; maze.len()];
    let mut q = VecDeque::new();
    visited[maze.index(start)] = true;
    q.push_back(start);

    while let Some(pos) = q.pop_front() {
        if pos == goal {
            break;
        }
        for dir in Direction::ALL {
            if !can_move(maze, pos.row, pos.col, dir)? {
                continue;
            }
            let Some(next) = maze.step(pos, dir) else {
                continue;
            };
            let j = maze.index(next);
            if visited[j] {
                continue;
            }
            visited[j] = true;
            prev[j] = maze.index(pos);
            q.push_back(next);
        }
    }

    let mut cur = maze.index(goal);
    if !visited[cur] {
        log::debug!("no path from {} to {}", start, goal);
        return Ok(Vec::new());
    }
    let mut path = Vec::new();
    while cur != NO_PREV {
        path.push(maze.coord_at(cur));
        cur = prev[cur];
    }
    path.reverse();
    log::debug!("path from {} to {} has {} cells", start, goal, path.len());
    Ok(path)
}
