//! Procedural maze generation: spanning-tree carve, terrain perturbation,
//! connectivity repair.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tile_maze_core::{GridCoord, TileType};

use crate::{solvers, Maze};

/// Smallest accepted dimension; anything below degenerates the cell lattice.
const MIN_DIMENSION: u32 = 5;

/// Upper bound on tiles rewritten by terrain perturbation.
const MAX_PERTURBED_TILES: usize = 30;

/// Generates a maze from the requested dimensions and seed.
///
/// The same seed and dimensions always produce the same maze, tiles and
/// cached paths included.
pub(crate) fn generate(rows: u32, cols: u32, seed: u64) -> Maze {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let rows = normalize_dimension(rows);
    let cols = normalize_dimension(cols);

    let mut tiles = carve(rows, cols, &mut rng);

    let start = GridCoord::new(1, 1);
    let end = GridCoord::new(cols as i32 - 2, rows as i32 - 2);
    tiles[tile_index(cols, start)] = TileType::Start;
    tiles[tile_index(cols, end)] = TileType::End;

    perturb(rows, cols, &mut tiles, &mut rng);
    repair(rows, cols, &mut tiles, start, end);

    Maze::from_parts(rows, cols, tiles, start, end)
}

/// Forces a dimension to an odd value so walls land on even indices.
fn normalize_dimension(requested: u32) -> u32 {
    let clamped = requested.max(MIN_DIMENSION);
    if clamped % 2 == 0 {
        clamped + 1
    } else {
        clamped
    }
}

fn tile_index(cols: u32, cell: GridCoord) -> usize {
    cell.y() as usize * cols as usize + cell.x() as usize
}

const fn lattice_to_grid(i: usize, j: usize) -> GridCoord {
    GridCoord::new(2 * j as i32 + 1, 2 * i as i32 + 1)
}

/// Randomized depth-first spanning-tree carve over the half-resolution lattice.
///
/// Cell (i, j) of the lattice maps to grid coordinate (2j + 1, 2i + 1); walls
/// occupy the even indices between cells. The result is a perfect maze:
/// every cell reaches every other through exactly one simple corridor.
fn carve(rows: u32, cols: u32, rng: &mut ChaCha8Rng) -> Vec<TileType> {
    let cell_rows = ((rows - 1) / 2) as usize;
    let cell_cols = ((cols - 1) / 2) as usize;
    let mut tiles = vec![TileType::Wall; rows as usize * cols as usize];
    let mut visited = vec![false; cell_rows * cell_cols];
    let mut stack = vec![(0usize, 0usize)];
    visited[0] = true;
    tiles[tile_index(cols, lattice_to_grid(0, 0))] = TileType::Floor;

    while let Some(&(i, j)) = stack.last() {
        let mut candidates = [(0usize, 0usize); 4];
        let mut count = 0;
        if i > 0 && !visited[(i - 1) * cell_cols + j] {
            candidates[count] = (i - 1, j);
            count += 1;
        }
        if i + 1 < cell_rows && !visited[(i + 1) * cell_cols + j] {
            candidates[count] = (i + 1, j);
            count += 1;
        }
        if j > 0 && !visited[i * cell_cols + (j - 1)] {
            candidates[count] = (i, j - 1);
            count += 1;
        }
        if j + 1 < cell_cols && !visited[i * cell_cols + (j + 1)] {
            candidates[count] = (i, j + 1);
            count += 1;
        }

        if count == 0 {
            let _ = stack.pop();
            continue;
        }

        let (next_i, next_j) = candidates[rng.gen_range(0..count)];
        let here = lattice_to_grid(i, j);
        let there = lattice_to_grid(next_i, next_j);
        let opening = GridCoord::new((here.x() + there.x()) / 2, (here.y() + there.y()) / 2);
        tiles[tile_index(cols, opening)] = TileType::Floor;
        tiles[tile_index(cols, there)] = TileType::Floor;
        visited[next_i * cell_cols + next_j] = true;
        stack.push((next_i, next_j));
    }

    tiles
}

/// Rewrites a bounded number of corridor cells as grass or lava.
///
/// Only floor tiles at odd/odd lattice positions are candidates, so walls and
/// the start/end tiles are never touched.
fn perturb(rows: u32, cols: u32, tiles: &mut [TileType], rng: &mut ChaCha8Rng) {
    let mut floors = Vec::new();
    for y in (1..rows as i32 - 1).step_by(2) {
        for x in (1..cols as i32 - 1).step_by(2) {
            let cell = GridCoord::new(x, y);
            if tiles[tile_index(cols, cell)] == TileType::Floor {
                floors.push(cell);
            }
        }
    }

    floors.shuffle(rng);
    let modify = (floors.len() / 3).min(MAX_PERTURBED_TILES);
    for &cell in floors.iter().take(modify) {
        let tile = match rng.gen_range(0..20u32) {
            0..=14 => TileType::Grass,
            15..=17 => TileType::Floor,
            _ => TileType::Lava,
        };
        tiles[tile_index(cols, cell)] = tile;
    }
}

/// Restores start-to-end reachability after perturbation.
///
/// Lava tiles are converted back to floor one at a time in row-major order,
/// re-checking reachability after each conversion and stopping at the first
/// success. The carved maze was a spanning tree and perturbation never
/// touches walls, so removing lava always restores the route.
fn repair(rows: u32, cols: u32, tiles: &mut [TileType], start: GridCoord, end: GridCoord) {
    if solvers::reachable(cols, rows, start, end, |cell| {
        tiles[tile_index(cols, cell)].blocks_pathfinding()
    }) {
        return;
    }

    for index in 0..tiles.len() {
        if tiles[index] != TileType::Lava {
            continue;
        }
        tiles[index] = TileType::Floor;
        if solvers::reachable(cols, rows, start, end, |cell| {
            tiles[tile_index(cols, cell)].blocks_pathfinding()
        }) {
            return;
        }
    }

    unreachable!("a perturbed spanning-tree maze must become reachable once all lava is removed");
}

#[cfg(test)]
mod tests {
    use super::{carve, generate, lattice_to_grid, normalize_dimension, tile_index};
    use crate::solvers;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tile_maze_core::{GridCoord, TileType};

    #[test]
    fn dimensions_normalize_to_odd() {
        assert_eq!(normalize_dimension(15), 15);
        assert_eq!(normalize_dimension(16), 17);
        assert_eq!(normalize_dimension(20), 21);
        assert_eq!(normalize_dimension(2), 5);
    }

    #[test]
    fn carve_produces_a_spanning_tree() {
        let rows = 15u32;
        let cols = 15u32;
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let tiles = carve(rows, cols, &mut rng);

        let cell_rows = ((rows - 1) / 2) as usize;
        let cell_cols = ((cols - 1) / 2) as usize;
        let total_cells = cell_rows * cell_cols;
        let floors = tiles
            .iter()
            .filter(|tile| **tile == TileType::Floor)
            .count();
        // A spanning tree has one floor tile per cell plus one opening per edge.
        assert_eq!(floors, 2 * total_cells - 1);

        let root = GridCoord::new(1, 1);
        for i in 0..cell_rows {
            for j in 0..cell_cols {
                let target = lattice_to_grid(i, j);
                assert!(
                    solvers::reachable(cols, rows, root, target, |cell| {
                        tiles[tile_index(cols, cell)].blocks_pathfinding()
                    }),
                    "cell ({i}, {j}) is not connected to the root",
                );
            }
        }
    }

    #[test]
    fn generated_terrain_stays_within_the_perturbation_budget() {
        let maze = generate(25, 25, 1234);
        let mut rewritten = 0;
        for y in 0..maze.rows() as i32 {
            for x in 0..maze.cols() as i32 {
                let tile = maze.tile_at(GridCoord::new(x, y));
                if tile == TileType::Grass || tile == TileType::Lava {
                    rewritten += 1;
                }
            }
        }
        assert!(rewritten <= 30, "{rewritten} tiles were rewritten");
    }

    #[test]
    fn generation_places_endpoints_in_opposite_corners() {
        let maze = generate(15, 21, 5);
        assert_eq!(maze.start(), GridCoord::new(1, 1));
        assert_eq!(
            maze.end(),
            GridCoord::new(maze.cols() as i32 - 2, maze.rows() as i32 - 2)
        );
        assert_eq!(maze.tile_at(maze.start()), TileType::Start);
        assert_eq!(maze.tile_at(maze.end()), TileType::End);
    }
}
