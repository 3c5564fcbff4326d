use std::collections::VecDeque;

use maze25::{can_move, derive_generator, find_path, generate, Coord, Direction, Maze};
use proptest::prelude::*;

fn open_neighbors(maze: &Maze, pos: Coord) -> Vec<Coord> {
    Direction::ALL
        .into_iter()
        .filter(|&dir| can_move(maze, pos.row, pos.col, dir).unwrap())
        .filter_map(|dir| maze.step(pos, dir))
        .collect()
}

fn reachable(maze: &Maze) -> usize {
    let mut seen = vec![vec![false; maze.cols()]; maze.rows()];
    let mut q = VecDeque::new();
    seen[0][0] = true;
    q.push_back(Coord::new(0, 0));
    let mut count = 1;
    while let Some(pos) = q.pop_front() {
        for next in open_neighbors(maze, pos) {
            if !seen[next.row][next.col] {
                seen[next.row][next.col] = true;
                count += 1;
                q.push_back(next);
            }
        }
    }
    count
}

/// Length in steps of the shortest simple route, by trying every route.
fn shortest_by_enumeration(maze: &Maze, start: Coord, goal: Coord) -> Option<usize> {
    fn walk(
        maze: &Maze,
        pos: Coord,
        goal: Coord,
        on_route: &mut Vec<Vec<bool>>,
        depth: usize,
        best: &mut Option<usize>,
    ) {
        if pos == goal {
            *best = Some(best.map_or(depth, |b| b.min(depth)));
            return;
        }
        for next in open_neighbors(maze, pos) {
            if on_route[next.row][next.col] {
                continue;
            }
            on_route[next.row][next.col] = true;
            walk(maze, next, goal, on_route, depth + 1, best);
            on_route[next.row][next.col] = false;
        }
    }

    let mut on_route = vec![vec![false; maze.cols()]; maze.rows()];
    on_route[start.row][start.col] = true;
    let mut best = None;
    walk(maze, start, goal, &mut on_route, 0, &mut best);
    best
}

fn assert_route(maze: &Maze, path: &[Coord], start: Coord, goal: Coord) {
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    for pair in path.windows(2) {
        assert!(
            open_neighbors(maze, pair[0]).contains(&pair[1]),
            "{} -> {} is not an open step",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn seeded_three_by_three_end_to_end() {
    let maze = generate(3, 3, &mut derive_generator(Some("test"))).unwrap();
    assert_eq!(maze.passages(), 8);
    assert_eq!(reachable(&maze), 9);
    let start = Coord::new(0, 0);
    let goal = Coord::new(2, 2);
    let path = find_path(&maze, start, goal).unwrap();
    assert_route(&maze, &path, start, goal);
    assert_eq!(path.len() - 1, shortest_by_enumeration(&maze, start, goal).unwrap());
}

#[test]
fn default_board_is_a_spanning_tree() {
    let maze = generate(25, 25, &mut derive_generator(None)).unwrap();
    assert_eq!(maze.passages(), 25 * 25 - 1);
    assert_eq!(reachable(&maze), 25 * 25);
    let path = find_path(&maze, Coord::new(0, 0), Coord::new(24, 24)).unwrap();
    assert_route(&maze, &path, Coord::new(0, 0), Coord::new(24, 24));
}

proptest! {
    #[test]
    fn same_seed_same_maze(seed in ".{0,24}", rows in 1usize..12, cols in 1usize..12) {
        let a = generate(rows, cols, &mut derive_generator(Some(seed.as_str()))).unwrap();
        let b = generate(rows, cols, &mut derive_generator(Some(seed.as_str()))).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn generated_mazes_are_perfect(seed in "[a-z0-9]{1,12}", rows in 1usize..15, cols in 1usize..15) {
        let maze = generate(rows, cols, &mut derive_generator(Some(seed.as_str()))).unwrap();
        prop_assert_eq!(maze.passages(), rows * cols - 1);
        prop_assert_eq!(reachable(&maze), rows * cols);
    }

    #[test]
    fn walls_come_in_pairs(seed in "[a-z0-9]{1,12}", rows in 1usize..10, cols in 1usize..10) {
        let maze = generate(rows, cols, &mut derive_generator(Some(seed.as_str()))).unwrap();
        for (pos, _) in maze.cells() {
            for dir in Direction::ALL {
                match maze.step(pos, dir) {
                    Some(next) => {
                        prop_assert_eq!(
                            can_move(&maze, pos.row, pos.col, dir).unwrap(),
                            can_move(&maze, next.row, next.col, dir.reverse()).unwrap()
                        );
                    }
                    None => {
                        prop_assert!(!can_move(&maze, pos.row, pos.col, dir).unwrap());
                    }
                }
            }
        }
    }

    #[test]
    fn bfs_is_shortest_on_small_mazes(
        seed in "[a-z0-9]{1,8}",
        rows in 1usize..4,
        cols in 1usize..4,
        sr in 0usize..3, sc in 0usize..3, gr in 0usize..3, gc in 0usize..3,
    ) {
        let maze = generate(rows, cols, &mut derive_generator(Some(seed.as_str()))).unwrap();
        let start = Coord::new(sr % rows, sc % cols);
        let goal = Coord::new(gr % rows, gc % cols);
        let path = find_path(&maze, start, goal).unwrap();
        prop_assert!(!path.is_empty());
        assert_route(&maze, &path, start, goal);
        prop_assert_eq!(Some(path.len() - 1), shortest_by_enumeration(&maze, start, goal));
    }

    #[test]
    fn bfs_is_shortest_with_cycles(
        openings in proptest::collection::vec((0usize..9, 0usize..4), 0..14),
        gr in 0usize..3, gc in 0usize..3,
    ) {
        let mut maze = Maze::new(3, 3).unwrap();
        for (idx, d) in openings {
            let _ = maze.remove_wall(Coord::new(idx / 3, idx % 3), Direction::ALL[d]);
        }
        let start = Coord::new(0, 0);
        let goal = Coord::new(gr, gc);
        let path = find_path(&maze, start, goal).unwrap();
        match shortest_by_enumeration(&maze, start, goal) {
            Some(len) => {
                assert_route(&maze, &path, start, goal);
                prop_assert_eq!(path.len() - 1, len);
            }
            None => {
                prop_assert!(path.is_empty());
            }
        }
    }
}
