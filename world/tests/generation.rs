use tile_maze_core::{Command, Event, GridCoord, PathKind, TileType};
use tile_maze_world::{apply, query, World};

fn generate(rows: u32, cols: u32, seed: u64) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(&mut world, Command::GenerateMaze { rows, cols, seed }, &mut events);
    assert!(
        matches!(events.first(), Some(Event::MazeReady { .. })),
        "expected MazeReady, got {events:?}"
    );
    world
}

fn tile_census(world: &World) -> (usize, usize) {
    let maze = query::maze(world).expect("maze");
    let mut starts = 0;
    let mut ends = 0;
    for y in 0..maze.rows() as i32 {
        for x in 0..maze.cols() as i32 {
            match maze.tile_at(GridCoord::new(x, y)) {
                TileType::Start => starts += 1,
                TileType::End => ends += 1,
                _ => {}
            }
        }
    }
    (starts, ends)
}

#[test]
fn generated_mazes_have_unique_endpoints_and_a_route() {
    for seed in 0..20 {
        let world = generate(15, 15, seed);
        let (starts, ends) = tile_census(&world);
        assert_eq!(starts, 1, "seed {seed}");
        assert_eq!(ends, 1, "seed {seed}");

        let maze = query::maze(&world).expect("maze");
        let bfs = maze.path(PathKind::Bfs);
        assert!(!bfs.is_empty(), "seed {seed} produced an unreachable end");
        assert_eq!(bfs.first(), Some(&maze.start()));
        assert_eq!(bfs.last(), Some(&maze.end()));
    }
}

#[test]
fn odd_requests_keep_their_dimensions() {
    let world = generate(15, 15, 3);
    let maze = query::maze(&world).expect("maze");
    assert_eq!((maze.rows(), maze.cols()), (15, 15));
}

#[test]
fn even_requests_normalize_upward() {
    let world = generate(16, 20, 3);
    let maze = query::maze(&world).expect("maze");
    assert_eq!((maze.rows(), maze.cols()), (17, 21));
}

#[test]
fn identical_seeds_replay_identically() {
    for seed in [0, 1, 0xdead_beef] {
        let first = generate(21, 21, seed);
        let second = generate(21, 21, seed);
        let first_maze = query::maze(&first).expect("maze");
        let second_maze = query::maze(&second).expect("maze");

        for y in 0..first_maze.rows() as i32 {
            for x in 0..first_maze.cols() as i32 {
                let cell = GridCoord::new(x, y);
                assert_eq!(
                    first_maze.tile_at(cell),
                    second_maze.tile_at(cell),
                    "seed {seed} diverged at {cell:?}"
                );
            }
        }

        for kind in PathKind::ALL {
            assert_eq!(
                first_maze.path(kind),
                second_maze.path(kind),
                "seed {seed} diverged on the {} path",
                kind.label()
            );
        }
    }
}
