use rand::RngCore;

use crate::error::Result;
use crate::maze::{Coord, Direction, Maze};
use crate::rng::unit_f64;

/// Carves a perfect maze with an iterative randomized depth-first search
/// from the top-left cell.
///
/// Every cell is visited exactly once, so the open passages form a spanning
/// tree: `rows * cols - 1` passages and exactly one route between any two
/// cells. The walk keeps its own stack, so depth is bounded only by memory.
pub fn generate<R: RngCore + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Maze> {
    let mut maze = Maze::new(rows, cols)?;
    let mut visited = vec![false; maze.len()];
    let mut stack: Vec<Coord> = Vec::with_capacity(maze.len());

    let start = Coord::new(0, 0);
    visited[maze.index(start)] = true;
    stack.push(start);

    while let Some(&current) = stack.last() {
        let mut candidates: Vec<(Direction, Coord)> = maze
            .neighbors(current)
            .into_iter()
            .filter(|(_, next)| !visited[maze.index(*next)])
            .collect();
        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        shuffle(&mut candidates, rng);
        let (dir, chosen) = candidates[0];
        maze.remove_wall(current, dir)?;
        visited[maze.index(chosen)] = true;
        stack.push(chosen);
    }

    log::debug!(
        "generated {}x{} maze with {} passages",
        rows,
        cols,
        maze.passages()
    );
    Ok(maze)
}

/// Fisher-Yates, walking down from the last index. The swap partner is
/// `floor(draw * (i + 1))` so the sequence matches seeded mazes built
/// elsewhere from the same seed.
pub fn shuffle<T, R: RngCore + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = (unit_f64(rng.next_u32()) * (i + 1) as f64) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;
    use crate::maze::Walls;
    use crate::rng::derive_generator;

    fn wall_bits(walls: &Walls) -> String {
        [walls.top, walls.right, walls.bottom, walls.left]
            .iter()
            .map(|&w| if w { '1' } else { '0' })
            .collect()
    }

    fn layout(maze: &Maze) -> Vec<String> {
        (0..maze.rows())
            .map(|r| {
                (0..maze.cols())
                    .map(|c| wall_bits(&maze.cell(Coord::new(r, c)).unwrap().walls))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    #[test]
    fn seeded_layout_matches_reference() {
        let maze = generate(3, 3, &mut derive_generator(Some("test"))).unwrap();
        assert_eq!(
            layout(&maze),
            vec!["1011 1100 1101", "1101 0011 0100", "0011 1010 0110"]
        );
        assert_eq!(maze.passages(), 8);
    }

    #[test]
    fn rectangular_layout_matches_reference() {
        let maze = generate(4, 5, &mut derive_generator(Some("maze-seed"))).unwrap();
        assert_eq!(
            layout(&maze),
            vec![
                "1011 1100 1001 1100 1101",
                "1001 0110 0101 0101 0101",
                "0101 1001 0110 0101 0101",
                "0011 0110 1011 0010 0110",
            ]
        );
    }

    #[test]
    fn zero_dimensions_fail_before_drawing() {
        let mut rng = derive_generator(Some("x"));
        let before = rng.state();
        assert_eq!(
            generate(0, 4, &mut rng),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 4 })
        );
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn single_cell_keeps_all_walls() {
        let maze = generate(1, 1, &mut derive_generator(None)).unwrap();
        assert_eq!(maze.cell(Coord::new(0, 0)).unwrap().walls, Walls::ALL);
        assert_eq!(maze.passages(), 0);
    }

    #[test]
    fn corridor_is_fully_open() {
        let maze = generate(1, 6, &mut derive_generator(Some("line"))).unwrap();
        assert_eq!(maze.passages(), 5);
    }

    #[test]
    fn large_grid_does_not_recurse() {
        let maze = generate(300, 300, &mut derive_generator(Some("deep"))).unwrap();
        assert_eq!(maze.passages(), 300 * 300 - 1);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..20).collect();
        shuffle(&mut items, &mut derive_generator(Some("perm")));
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
