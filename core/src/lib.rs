#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the tile-maze engine.
//!
//! This crate defines the vocabulary that connects adapters and the
//! authoritative world. Adapters submit [`Command`] values describing desired
//! mutations, the world executes those commands via its `apply` entry point,
//! and then broadcasts [`Event`] values describing what actually happened.
//! The tile taxonomy, coordinate type, and maze blueprint all live here so
//! that every crate speaks the same language.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of a single maze tile expressed in screen units.
pub const TILE_WIDTH: f32 = 48.0;

/// Height of a single maze tile expressed in screen units.
pub const TILE_HEIGHT: f32 = 48.0;

/// Location of a single maze tile expressed as column and row indices.
///
/// `x` addresses the column and `y` the row. Coordinates may legitimately
/// leave the grid bounds during neighbor arithmetic; consumers resolve
/// out-of-bounds lookups to [`TileType::Wall`] instead of failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    x: i32,
    y: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate from column and row indices.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the coordinate one tile away in the provided direction.
    #[must_use]
    pub const fn offset_by(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offsets();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Closed set of tile kinds that may appear in a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// Goal tile the player must reach.
    End,
    /// Tile the player begins the session on.
    Start,
    /// Plain walkable tile costing one traversal unit.
    Floor,
    /// Impassable tile for both solvers and the player.
    Wall,
    /// Walkable tile costing three traversal units.
    Grass,
    /// Tile that solvers avoid and that kills the player on arrival.
    Lava,
}

impl TileType {
    /// Decodes the wire representation used by the maze text format.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            -2 => Some(Self::End),
            -1 => Some(Self::Start),
            0 => Some(Self::Floor),
            1 => Some(Self::Wall),
            2 => Some(Self::Grass),
            3 => Some(Self::Lava),
            _ => None,
        }
    }

    /// Encodes the tile into the wire representation of the text format.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::End => -2,
            Self::Start => -1,
            Self::Floor => 0,
            Self::Wall => 1,
            Self::Grass => 2,
            Self::Lava => 3,
        }
    }

    /// Cost of stepping onto this tile, defined for every variant.
    #[must_use]
    pub const fn traversal_cost(self) -> u32 {
        match self {
            Self::Grass => 3,
            _ => 1,
        }
    }

    /// Reports whether path solvers must treat the tile as impassable.
    #[must_use]
    pub const fn blocks_pathfinding(self) -> bool {
        matches!(self, Self::Wall | Self::Lava)
    }

    /// Reports whether the tile stops a player move request.
    ///
    /// Lava is deliberately absent: the player may step onto it and dies on
    /// arrival instead of being blocked.
    #[must_use]
    pub const fn blocks_player(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Cardinal movement directions available to the player and the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Fixed visitation order that solvers and neighbor queries rely on.
    pub const ORDERED: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit column and row offsets applied by a step in this direction.
    #[must_use]
    pub const fn offsets(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Identifies one of the three cached solver paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    /// Depth-first search: first discovered route, not length-optimal.
    Dfs,
    /// Breadth-first search: shortest route by edge count.
    Bfs,
    /// Dijkstra: cheapest route by terrain traversal cost.
    Dijkstra,
}

impl PathKind {
    /// All path kinds in cache-table order.
    pub const ALL: [Self; 3] = [Self::Dfs, Self::Bfs, Self::Dijkstra];

    /// Slot occupied by this kind within the fixed path cache table.
    #[must_use]
    pub const fn table_index(self) -> usize {
        match self {
            Self::Dfs => 0,
            Self::Bfs => 1,
            Self::Dijkstra => 2,
        }
    }

    /// Human-readable solver name for adapters.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dfs => "DFS",
            Self::Bfs => "BFS",
            Self::Dijkstra => "Dijkstra",
        }
    }
}

/// Discrete states the player occupies while traversing the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerState {
    /// At rest on a tile, ready to accept a move request.
    Standing,
    /// Advancing one tile toward decreasing row indices.
    MovingUp,
    /// Advancing one tile toward increasing row indices.
    MovingDown,
    /// Advancing one tile toward decreasing column indices.
    MovingLeft,
    /// Advancing one tile toward increasing column indices.
    MovingRight,
}

impl PlayerState {
    /// State entered when a move in the provided direction is accepted.
    #[must_use]
    pub const fn moving(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::MovingUp,
            Direction::Down => Self::MovingDown,
            Direction::Left => Self::MovingLeft,
            Direction::Right => Self::MovingRight,
        }
    }
}

/// Validated blueprint for a maze, ready to be installed into the world.
///
/// Construction enforces the structural invariant that exactly one start and
/// one end tile exist; a layout that reaches the world is therefore always
/// well-formed regardless of where it originated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    rows: u32,
    cols: u32,
    tiles: Vec<TileType>,
    start: GridCoord,
    end: GridCoord,
}

impl MazeLayout {
    /// Builds a layout from row-major tiles, validating the start/end invariant.
    pub fn from_tiles(rows: u32, cols: u32, tiles: Vec<TileType>) -> Result<Self, LayoutError> {
        if rows == 0 || cols == 0 {
            return Err(LayoutError::EmptyGrid);
        }

        let expected = (rows as usize)
            .checked_mul(cols as usize)
            .ok_or(LayoutError::EmptyGrid)?;
        if tiles.len() != expected {
            return Err(LayoutError::TileCountMismatch {
                rows,
                cols,
                expected,
                found: tiles.len(),
            });
        }

        let mut start = None;
        let mut end = None;
        for (index, tile) in tiles.iter().enumerate() {
            let coord = GridCoord::new(
                (index % cols as usize) as i32,
                (index / cols as usize) as i32,
            );
            match tile {
                TileType::Start => {
                    if start.replace(coord).is_some() {
                        return Err(LayoutError::DuplicateStart);
                    }
                }
                TileType::End => {
                    if end.replace(coord).is_some() {
                        return Err(LayoutError::DuplicateEnd);
                    }
                }
                _ => {}
            }
        }

        let start = start.ok_or(LayoutError::MissingStart)?;
        let end = end.ok_or(LayoutError::MissingEnd)?;
        Ok(Self {
            rows,
            cols,
            tiles,
            start,
            end,
        })
    }

    /// Number of tile rows in the layout.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of tile columns in the layout.
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

    /// Row-major tile contents of the layout.
    #[must_use]
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    /// Consumes the layout, yielding the row-major tile storage.
    #[must_use]
    pub fn into_tiles(self) -> Vec<TileType> {
        self.tiles
    }
}

/// Reasons a maze blueprint fails structural validation.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Either dimension was zero or the tile count overflowed.
    #[error("maze dimensions must be non-zero")]
    EmptyGrid,
    /// The tile storage does not match the declared dimensions.
    #[error("expected {expected} tiles for a {rows}x{cols} maze, found {found}")]
    TileCountMismatch {
        /// Declared row count.
        rows: u32,
        /// Declared column count.
        cols: u32,
        /// Tile count implied by the dimensions.
        expected: usize,
        /// Tile count actually provided.
        found: usize,
    },
    /// No start tile was present.
    #[error("maze must contain exactly one start tile")]
    MissingStart,
    /// More than one start tile was present.
    #[error("maze contains more than one start tile")]
    DuplicateStart,
    /// No end tile was present.
    #[error("maze must contain exactly one end tile")]
    MissingEnd,
    /// More than one end tile was present.
    #[error("maze contains more than one end tile")]
    DuplicateEnd,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Procedurally generates a maze and installs it as the active session.
    GenerateMaze {
        /// Requested number of tile rows; normalized to odd by the generator.
        rows: u32,
        /// Requested number of tile columns; normalized to odd by the generator.
        cols: u32,
        /// Seed for the deterministic pseudo-random generator.
        seed: u64,
    },
    /// Installs a pre-validated maze blueprint as the active session.
    InstallMaze {
        /// Blueprint produced by the text loader or another adapter.
        layout: MazeLayout,
    },
    /// Requests that the player advance one tile in the given direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Chooses which cached solver path the rendering layer should overlay.
    SelectPath {
        /// Overlay to display, or `None` to hide all overlays.
        selection: Option<PathKind>,
    },
    /// Returns the player to the start tile and clears terminal flags.
    ResetPlayer,
    /// Discards the active maze and player, ending the session.
    DiscardMaze,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a maze was installed and all solver paths were cached.
    MazeReady {
        /// Final number of tile rows.
        rows: u32,
        /// Final number of tile columns.
        cols: u32,
        /// Coordinate of the start tile.
        start: GridCoord,
        /// Coordinate of the end tile.
        end: GridCoord,
    },
    /// Confirms that the player advanced one tile.
    PlayerMoved {
        /// Tile the player occupied before the step.
        from: GridCoord,
        /// Tile the player occupies after the step.
        to: GridCoord,
        /// Accumulated traversal cost after the step.
        cost: u32,
    },
    /// Reports that a move request was not accepted.
    MoveRejected {
        /// Direction of the rejected step.
        direction: Direction,
    },
    /// Reports that the player arrived on a lava tile and died.
    PlayerDied {
        /// Tile the player died on.
        at: GridCoord,
    },
    /// Reports that the player reached the end tile.
    PlayerWon {
        /// Accumulated traversal cost of the winning run.
        cost: u32,
    },
    /// Confirms that the path overlay selection changed.
    PathSelected {
        /// Overlay now active, or `None` when hidden.
        selection: Option<PathKind>,
    },
    /// Confirms that the player returned to the start tile.
    PlayerReset,
    /// Confirms that the active maze was discarded.
    MazeDiscarded,
}

#[cfg(test)]
mod tests {
    use super::{Direction, GridCoord, LayoutError, MazeLayout, PathKind, TileType};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn tile_codes_round_trip() {
        for tile in [
            TileType::End,
            TileType::Start,
            TileType::Floor,
            TileType::Wall,
            TileType::Grass,
            TileType::Lava,
        ] {
            assert_eq!(TileType::from_code(tile.code()), Some(tile));
        }
        assert_eq!(TileType::from_code(4), None);
        assert_eq!(TileType::from_code(-3), None);
    }

    #[test]
    fn grass_is_the_only_expensive_tile() {
        assert_eq!(TileType::Grass.traversal_cost(), 3);
        assert_eq!(TileType::Floor.traversal_cost(), 1);
        assert_eq!(TileType::Start.traversal_cost(), 1);
        assert_eq!(TileType::End.traversal_cost(), 1);
        assert_eq!(TileType::Lava.traversal_cost(), 1);
        assert_eq!(TileType::Wall.traversal_cost(), 1);
    }

    #[test]
    fn lava_blocks_solvers_but_not_the_player() {
        assert!(TileType::Lava.blocks_pathfinding());
        assert!(TileType::Wall.blocks_pathfinding());
        assert!(!TileType::Lava.blocks_player());
        assert!(TileType::Wall.blocks_player());
        assert!(!TileType::Grass.blocks_pathfinding());
    }

    #[test]
    fn direction_offsets_are_unit_steps() {
        let origin = GridCoord::new(3, 3);
        assert_eq!(origin.offset_by(Direction::Up), GridCoord::new(3, 2));
        assert_eq!(origin.offset_by(Direction::Down), GridCoord::new(3, 4));
        assert_eq!(origin.offset_by(Direction::Left), GridCoord::new(2, 3));
        assert_eq!(origin.offset_by(Direction::Right), GridCoord::new(4, 3));
    }

    #[test]
    fn path_kind_table_indices_cover_the_cache() {
        for (slot, kind) in PathKind::ALL.iter().enumerate() {
            assert_eq!(kind.table_index(), slot);
        }
    }

    #[test]
    fn layout_records_start_and_end_coordinates() {
        let tiles = vec![
            TileType::Start,
            TileType::Floor,
            TileType::Wall,
            TileType::End,
        ];
        let layout = MazeLayout::from_tiles(2, 2, tiles).expect("layout");
        assert_eq!(layout.start(), GridCoord::new(0, 0));
        assert_eq!(layout.end(), GridCoord::new(1, 1));
    }

    #[test]
    fn layout_rejects_duplicate_and_missing_endpoints() {
        let missing_end = vec![TileType::Start, TileType::Floor];
        assert_eq!(
            MazeLayout::from_tiles(1, 2, missing_end),
            Err(LayoutError::MissingEnd)
        );

        let missing_start = vec![TileType::Floor, TileType::End];
        assert_eq!(
            MazeLayout::from_tiles(1, 2, missing_start),
            Err(LayoutError::MissingStart)
        );

        let duplicate_start = vec![TileType::Start, TileType::Start, TileType::End];
        assert_eq!(
            MazeLayout::from_tiles(1, 3, duplicate_start),
            Err(LayoutError::DuplicateStart)
        );

        let duplicate_end = vec![TileType::Start, TileType::End, TileType::End];
        assert_eq!(
            MazeLayout::from_tiles(1, 3, duplicate_end),
            Err(LayoutError::DuplicateEnd)
        );
    }

    #[test]
    fn layout_rejects_mismatched_tile_counts() {
        let tiles = vec![TileType::Start, TileType::End];
        assert!(matches!(
            MazeLayout::from_tiles(2, 2, tiles),
            Err(LayoutError::TileCountMismatch {
                expected: 4,
                found: 2,
                ..
            })
        ));
        assert_eq!(
            MazeLayout::from_tiles(0, 3, Vec::new()),
            Err(LayoutError::EmptyGrid)
        );
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn grid_coord_round_trips_through_bincode() {
        assert_round_trip(&GridCoord::new(-4, 17));
    }

    #[test]
    fn tile_type_round_trips_through_bincode() {
        assert_round_trip(&TileType::Grass);
    }

    #[test]
    fn path_kind_round_trips_through_bincode() {
        assert_round_trip(&PathKind::Dijkstra);
    }

    #[test]
    fn direction_round_trips_through_bincode() {
        assert_round_trip(&Direction::Left);
    }
}
