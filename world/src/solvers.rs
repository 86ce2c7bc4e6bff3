//! Path solvers that run once against a finished maze.
//!
//! All three treat walls and lava as impassable, never mutate the maze, and
//! return an empty path when the end cannot be reached. They run at maze
//! build time; selecting which result to display never recomputes anything.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use tile_maze_core::{Direction, GridCoord, PathKind};

use crate::{Maze, SolvedPath};

/// Runs every solver against the maze and returns the cache table.
pub(crate) fn solve_all(maze: &Maze) -> [SolvedPath; 3] {
    [
        SolvedPath::new(PathKind::Dfs, dfs_path(maze)),
        SolvedPath::new(PathKind::Bfs, bfs_path(maze)),
        SolvedPath::new(PathKind::Dijkstra, dijkstra_path(maze)),
    ]
}

/// Unweighted breadth-first reachability probe used by generation repair.
pub(crate) fn reachable<F>(
    cols: u32,
    rows: u32,
    start: GridCoord,
    end: GridCoord,
    mut is_blocked: F,
) -> bool
where
    F: FnMut(GridCoord) -> bool,
{
    let width = cols as usize;
    let index = |cell: GridCoord| -> Option<usize> {
        if cell.x() < 0 || cell.y() < 0 || cell.x() >= cols as i32 || cell.y() >= rows as i32 {
            return None;
        }
        Some(cell.y() as usize * width + cell.x() as usize)
    };

    let Some(start_index) = index(start) else {
        return false;
    };
    if is_blocked(start) {
        return false;
    }

    let mut visited = vec![false; width * rows as usize];
    visited[start_index] = true;
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        if cell == end {
            return true;
        }
        for direction in Direction::ORDERED {
            let neighbor = cell.offset_by(direction);
            let Some(neighbor_index) = index(neighbor) else {
                continue;
            };
            if visited[neighbor_index] || is_blocked(neighbor) {
                continue;
            }
            visited[neighbor_index] = true;
            queue.push_back(neighbor);
        }
    }

    false
}

/// Depth-first solver preserving the reference path-choice semantics.
///
/// Each stack entry owns its path so far; neighbors are pushed in reversed
/// fixed order so that popping restores up/down/left/right priority. The
/// first route to reach the end wins regardless of length.
fn dfs_path(maze: &Maze) -> Vec<GridCoord> {
    let mut visited = vec![false; maze.tile_count()];
    let mut stack = vec![(maze.start(), vec![maze.start()])];

    while let Some((cell, path)) = stack.pop() {
        if cell == maze.end() {
            return path;
        }

        let Some(cell_index) = maze.index(cell) else {
            continue;
        };
        if visited[cell_index] {
            continue;
        }
        visited[cell_index] = true;

        let neighbors: Vec<GridCoord> = maze.neighbors(cell).collect();
        for neighbor in neighbors.into_iter().rev() {
            let Some(neighbor_index) = maze.index(neighbor) else {
                continue;
            };
            if visited[neighbor_index] {
                continue;
            }
            let mut extended = path.clone();
            extended.push(neighbor);
            stack.push((neighbor, extended));
        }
    }

    Vec::new()
}

/// Breadth-first solver: shortest path by edge count, terrain ignored.
fn bfs_path(maze: &Maze) -> Vec<GridCoord> {
    let mut visited = vec![false; maze.tile_count()];
    let mut previous: Vec<Option<GridCoord>> = vec![None; maze.tile_count()];
    let mut queue = VecDeque::new();

    let Some(start_index) = maze.index(maze.start()) else {
        return Vec::new();
    };
    visited[start_index] = true;
    queue.push_back(maze.start());

    let mut found = false;
    while let Some(cell) = queue.pop_front() {
        if cell == maze.end() {
            found = true;
            break;
        }
        for neighbor in maze.neighbors(cell) {
            let Some(neighbor_index) = maze.index(neighbor) else {
                continue;
            };
            if visited[neighbor_index] {
                continue;
            }
            visited[neighbor_index] = true;
            previous[neighbor_index] = Some(cell);
            queue.push_back(neighbor);
        }
    }

    if !found {
        return Vec::new();
    }
    reconstruct(maze, &previous)
}

/// Dijkstra solver: cheapest path by terrain cost.
///
/// The heap orders by accumulated cost with a monotonic sequence number
/// breaking ties in discovery order. Edge weight is the destination tile's
/// traversal cost, so grass penalties steer the result.
fn dijkstra_path(maze: &Maze) -> Vec<GridCoord> {
    let mut distances = vec![u32::MAX; maze.tile_count()];
    let mut previous: Vec<Option<GridCoord>> = vec![None; maze.tile_count()];
    let mut heap: BinaryHeap<Reverse<(u32, u64, GridCoord)>> = BinaryHeap::new();
    let mut sequence = 0u64;

    let Some(start_index) = maze.index(maze.start()) else {
        return Vec::new();
    };
    distances[start_index] = 0;
    heap.push(Reverse((0, sequence, maze.start())));

    let mut found = false;
    while let Some(Reverse((cost, _, cell))) = heap.pop() {
        if cell == maze.end() {
            found = true;
            break;
        }
        let Some(cell_index) = maze.index(cell) else {
            continue;
        };
        if cost > distances[cell_index] {
            // Stale queue entry superseded by a cheaper relaxation.
            continue;
        }

        for neighbor in maze.neighbors(cell) {
            let Some(neighbor_index) = maze.index(neighbor) else {
                continue;
            };
            let next_cost = cost + maze.tile_at(neighbor).traversal_cost();
            if next_cost < distances[neighbor_index] {
                distances[neighbor_index] = next_cost;
                previous[neighbor_index] = Some(cell);
                sequence += 1;
                heap.push(Reverse((next_cost, sequence, neighbor)));
            }
        }
    }

    if !found {
        return Vec::new();
    }
    reconstruct(maze, &previous)
}

/// Walks predecessor pointers backward from the end, then reverses.
fn reconstruct(maze: &Maze, previous: &[Option<GridCoord>]) -> Vec<GridCoord> {
    let mut path = Vec::new();
    let mut cursor = Some(maze.end());
    while let Some(cell) = cursor {
        path.push(cell);
        cursor = maze.index(cell).and_then(|index| previous[index]);
    }
    path.reverse();
    path
}
