#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for the tile-maze game.
//!
//! The world owns at most one [`Maze`] and one player at a time. Adapters
//! mutate it exclusively through [`apply`] with [`Command`] values and observe
//! the results through the broadcast [`Event`] stream and the read-only
//! [`query`] module. Maze construction, solver caching, and player traversal
//! all run to completion synchronously on the calling thread.

use glam::Vec2;
use tile_maze_core::{
    Command, Direction, Event, GridCoord, MazeLayout, PathKind, PlayerState, TileType, TILE_HEIGHT,
    TILE_WIDTH,
};

mod generator;
pub mod loader;
mod solvers;

/// Finished maze: tile matrix, endpoints, and the three cached solver paths.
///
/// The structure is fixed once built; tiles are only rewritten by the
/// generation-time perturbation and repair passes, never during gameplay.
#[derive(Clone, Debug)]
pub struct Maze {
    rows: u32,
    cols: u32,
    tiles: Vec<TileType>,
    start: GridCoord,
    end: GridCoord,
    paths: [SolvedPath; 3],
    selected: Option<PathKind>,
}

impl Maze {
    /// Builds a maze from a validated blueprint and caches all solver paths.
    pub(crate) fn from_layout(layout: MazeLayout) -> Self {
        let rows = layout.rows();
        let cols = layout.cols();
        let start = layout.start();
        let end = layout.end();
        Self::from_parts(rows, cols, layout.into_tiles(), start, end)
    }

    pub(crate) fn from_parts(
        rows: u32,
        cols: u32,
        tiles: Vec<TileType>,
        start: GridCoord,
        end: GridCoord,
    ) -> Self {
        let mut maze = Self {
            rows,
            cols,
            tiles,
            start,
            end,
            paths: PathKind::ALL.map(|kind| SolvedPath::new(kind, Vec::new())),
            selected: None,
        };
        maze.paths = solvers::solve_all(&maze);
        maze
    }

    /// Number of tile rows in the maze.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of tile columns in the maze.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Coordinate of the unique start tile.
    #[must_use]
    pub const fn start(&self) -> GridCoord {
        self.start
    }

    /// Coordinate of the unique end tile.
    #[must_use]
    pub const fn end(&self) -> GridCoord {
        self.end
    }

    /// Tile type at the provided coordinate.
    ///
    /// Out-of-bounds coordinates resolve to [`TileType::Wall`] so callers
    /// never need explicit bounds checks.
    #[must_use]
    pub fn tile_at(&self, cell: GridCoord) -> TileType {
        self.index(cell)
            .map_or(TileType::Wall, |index| self.tiles[index])
    }

    /// In-bounds orthogonal neighbors that solvers may traverse.
    ///
    /// Order is fixed to up, down, left, right; solver tie-breaking depends
    /// on it.
    pub fn neighbors(&self, cell: GridCoord) -> impl Iterator<Item = GridCoord> + '_ {
        let mut candidates = [None; 4];
        let mut count = 0;
        for direction in Direction::ORDERED {
            let neighbor = cell.offset_by(direction);
            if !self.tile_at(neighbor).blocks_pathfinding() {
                candidates[count] = Some(neighbor);
                count += 1;
            }
        }
        candidates.into_iter().take(count).flatten()
    }

    /// Screen-space position of a tile, derived from its grid indices.
    #[must_use]
    pub fn tile_position(&self, cell: GridCoord) -> Vec2 {
        Vec2::new(cell.x() as f32 * TILE_WIDTH, cell.y() as f32 * TILE_HEIGHT)
    }

    /// Cached path for the requested solver; empty when the end is unreachable.
    #[must_use]
    pub fn path(&self, kind: PathKind) -> &[GridCoord] {
        self.paths[kind.table_index()].cells()
    }

    /// Overlay currently chosen for display, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<PathKind> {
        self.selected
    }

    /// Cached path for the active overlay selection.
    #[must_use]
    pub fn selected_path(&self) -> Option<&[GridCoord]> {
        self.selected.map(|kind| self.path(kind))
    }

    pub(crate) fn index(&self, cell: GridCoord) -> Option<usize> {
        if cell.x() < 0
            || cell.y() < 0
            || cell.x() >= self.cols as i32
            || cell.y() >= self.rows as i32
        {
            return None;
        }
        Some(cell.y() as usize * self.cols as usize + cell.x() as usize)
    }

    pub(crate) fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

/// Cached result of a single solver run, tagged with its algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolvedPath {
    kind: PathKind,
    cells: Vec<GridCoord>,
}

impl SolvedPath {
    pub(crate) fn new(kind: PathKind, cells: Vec<GridCoord>) -> Self {
        Self { kind, cells }
    }

    /// Algorithm that produced this path.
    #[must_use]
    pub const fn kind(&self) -> PathKind {
        self.kind
    }

    /// Ordered coordinates from start to end; empty when unreachable.
    #[must_use]
    pub fn cells(&self) -> &[GridCoord] {
        &self.cells
    }
}

/// Player traversal state, owned by the world alongside its maze.
#[derive(Debug)]
struct Player {
    cell: GridCoord,
    state: PlayerState,
    cost: u32,
    won: bool,
    dead: bool,
}

impl Player {
    fn new(start: GridCoord) -> Self {
        Self {
            cell: start,
            state: PlayerState::Standing,
            cost: 0,
            won: false,
            dead: false,
        }
    }

    fn reset(&mut self, start: GridCoord) {
        self.cell = start;
        self.state = PlayerState::Standing;
        self.cost = 0;
        self.won = false;
        self.dead = false;
    }
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Tile currently occupied by the player.
    pub cell: GridCoord,
    /// Screen-space position derived from the occupied tile.
    pub position: Vec2,
    /// Movement state of the player.
    pub state: PlayerState,
    /// Traversal cost accumulated since the last reset.
    pub cost: u32,
    /// Set once the player reaches the end tile.
    pub won: bool,
    /// Set once the player arrives on lava.
    pub dead: bool,
}

/// Represents the authoritative tile-maze session state.
#[derive(Debug, Default)]
pub struct World {
    maze: Option<Maze>,
    player: Option<Player>,
}

impl World {
    /// Creates a world with no active maze.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::GenerateMaze { rows, cols, seed } => {
            let maze = generator::generate(rows, cols, seed);
            install(world, maze, out_events);
        }
        Command::InstallMaze { layout } => {
            let maze = Maze::from_layout(layout);
            install(world, maze, out_events);
        }
        Command::MovePlayer { direction } => {
            resolve_move(world, direction, out_events);
        }
        Command::SelectPath { selection } => {
            if let Some(maze) = world.maze.as_mut() {
                maze.selected = selection;
                out_events.push(Event::PathSelected { selection });
            }
        }
        Command::ResetPlayer => {
            if let (Some(maze), Some(player)) = (world.maze.as_ref(), world.player.as_mut()) {
                player.reset(maze.start());
                out_events.push(Event::PlayerReset);
            }
        }
        Command::DiscardMaze => {
            if world.maze.take().is_some() {
                world.player = None;
                out_events.push(Event::MazeDiscarded);
            }
        }
    }
}

fn install(world: &mut World, maze: Maze, out_events: &mut Vec<Event>) {
    out_events.push(Event::MazeReady {
        rows: maze.rows(),
        cols: maze.cols(),
        start: maze.start(),
        end: maze.end(),
    });
    world.player = Some(Player::new(maze.start()));
    world.maze = Some(maze);
}

fn resolve_move(world: &mut World, direction: Direction, out_events: &mut Vec<Event>) {
    let (Some(maze), Some(player)) = (world.maze.as_ref(), world.player.as_mut()) else {
        out_events.push(Event::MoveRejected { direction });
        return;
    };

    if player.won || player.dead || player.state != PlayerState::Standing {
        out_events.push(Event::MoveRejected { direction });
        return;
    }

    let target = player.cell.offset_by(direction);
    if maze.tile_at(target).blocks_player() {
        out_events.push(Event::MoveRejected { direction });
        return;
    }

    // Directional states exist only between acceptance and arrival; the
    // logical transition is instantaneous.
    player.state = PlayerState::moving(direction);
    let from = player.cell;
    player.cell = target;
    player.state = PlayerState::Standing;

    let tile = maze.tile_at(target);
    if tile == TileType::Lava {
        player.dead = true;
        out_events.push(Event::PlayerDied { at: target });
        return;
    }

    player.cost += tile.traversal_cost();
    out_events.push(Event::PlayerMoved {
        from,
        to: target,
        cost: player.cost,
    });

    if target == maze.end() {
        player.won = true;
        out_events.push(Event::PlayerWon { cost: player.cost });
    }
}

/// Read-only queries into the world reserved for adapters and systems.
pub mod query {
    use crate::{Maze, PlayerSnapshot, World};

    /// Active maze, if a session is running.
    #[must_use]
    pub fn maze(world: &World) -> Option<&Maze> {
        world.maze.as_ref()
    }

    /// Snapshot of the player, if a session is running.
    #[must_use]
    pub fn player(world: &World) -> Option<PlayerSnapshot> {
        let maze = world.maze.as_ref()?;
        world.player.as_ref().map(|player| PlayerSnapshot {
            cell: player.cell,
            position: maze.tile_position(player.cell),
            state: player.state,
            cost: player.cost,
            won: player.won,
            dead: player.dead,
        })
    }
}
