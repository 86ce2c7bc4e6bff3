#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for the tile-maze engine.
//!
//! Generates or loads a maze, renders it as ASCII with an optional solver
//! overlay, summarizes the three cached paths, and can drive the player with
//! a scripted move sequence.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tile_maze_core::{Command, Direction, Event, GridCoord, PathKind, TileType};
use tile_maze_world::{apply, loader, query, World};

/// Command-line interface for generating, loading, and solving tile mazes.
#[derive(Debug, Parser)]
#[command(name = "tile-maze", about = "Grid-maze generator and solver")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Procedurally generates a maze.
    Generate {
        /// Requested row count; overrides the difficulty preset.
        #[arg(long)]
        rows: Option<u32>,
        /// Requested column count; overrides the difficulty preset.
        #[arg(long)]
        cols: Option<u32>,
        /// Size preset mirroring the in-game difficulty menu.
        #[arg(long, value_enum, default_value_t = Difficulty::Easy)]
        difficulty: Difficulty,
        /// Seed for the deterministic generator; drawn from entropy when omitted.
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Loads a maze from a whitespace-delimited text description.
    Load {
        /// Path to the maze description file.
        file: PathBuf,
        #[command(flatten)]
        display: DisplayArgs,
    },
}

#[derive(Args, Debug)]
struct DisplayArgs {
    /// Solver path to overlay on the rendered maze.
    #[arg(long, value_enum)]
    show: Option<Overlay>,
    /// Move sequence to drive the player with, for example "rrddl".
    #[arg(long)]
    moves: Option<String>,
}

/// Size presets matching the reference difficulty menu.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Difficulty {
    /// 15 by 15 tiles.
    Easy,
    /// 25 by 25 tiles.
    Normal,
    /// 30 by 30 tiles (normalized to 31 by 31).
    Hard,
}

impl Difficulty {
    const fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Easy => (15, 15),
            Self::Normal => (25, 25),
            Self::Hard => (30, 30),
        }
    }
}

/// Solver overlays selectable from the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Overlay {
    /// First route discovered by depth-first search.
    Dfs,
    /// Shortest route by edge count.
    Bfs,
    /// Cheapest route by terrain cost.
    Dijkstra,
}

impl Overlay {
    const fn kind(self) -> PathKind {
        match self {
            Self::Dfs => PathKind::Dfs,
            Self::Bfs => PathKind::Bfs,
            Self::Dijkstra => PathKind::Dijkstra,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut world = World::new();
    let mut events = Vec::new();

    let display = match cli.command {
        CliCommand::Generate {
            rows,
            cols,
            difficulty,
            seed,
            display,
        } => {
            let (preset_rows, preset_cols) = difficulty.dimensions();
            let seed = seed.unwrap_or_else(rand::random);
            apply(
                &mut world,
                Command::GenerateMaze {
                    rows: rows.unwrap_or(preset_rows),
                    cols: cols.unwrap_or(preset_cols),
                    seed,
                },
                &mut events,
            );
            println!("seed: {seed}");
            display
        }
        CliCommand::Load { file, display } => {
            let layout = loader::load(&file)
                .with_context(|| format!("loading maze from {}", file.display()))?;
            apply(&mut world, Command::InstallMaze { layout }, &mut events);
            display
        }
    };

    if !events
        .iter()
        .any(|event| matches!(event, Event::MazeReady { .. }))
    {
        return Err(anyhow!("the world did not accept the maze"));
    }

    if let Some(overlay) = display.show {
        events.clear();
        apply(
            &mut world,
            Command::SelectPath {
                selection: Some(overlay.kind()),
            },
            &mut events,
        );
    }

    print_maze(&world);
    print_solver_summary(&world);

    if let Some(moves) = display.moves.as_deref() {
        run_moves(&mut world, moves)?;
    }

    Ok(())
}

fn tile_glyph(tile: TileType) -> char {
    match tile {
        TileType::Start => 'S',
        TileType::End => 'E',
        TileType::Floor => '.',
        TileType::Wall => '#',
        TileType::Grass => ',',
        TileType::Lava => '~',
    }
}

fn print_maze(world: &World) {
    let Some(maze) = query::maze(world) else {
        return;
    };
    let overlay: HashSet<GridCoord> = maze
        .selected_path()
        .map(|path| path.iter().copied().collect())
        .unwrap_or_default();

    for y in 0..maze.rows() as i32 {
        let mut line = String::with_capacity(maze.cols() as usize);
        for x in 0..maze.cols() as i32 {
            let cell = GridCoord::new(x, y);
            let tile = maze.tile_at(cell);
            let keep_endpoint = tile == TileType::Start || tile == TileType::End;
            if overlay.contains(&cell) && !keep_endpoint {
                line.push('*');
            } else {
                line.push(tile_glyph(tile));
            }
        }
        println!("{line}");
    }
}

fn print_solver_summary(world: &World) {
    let Some(maze) = query::maze(world) else {
        return;
    };
    for kind in PathKind::ALL {
        let path = maze.path(kind);
        if path.is_empty() {
            println!("{:>8}: no route", kind.label());
            continue;
        }
        let cost: u32 = path
            .iter()
            .skip(1)
            .map(|&cell| maze.tile_at(cell).traversal_cost())
            .sum();
        println!("{:>8}: {} steps, cost {cost}", kind.label(), path.len() - 1);
    }
}

fn run_moves(world: &mut World, moves: &str) -> Result<()> {
    let directions = parse_moves(moves)?;
    let mut events = Vec::new();
    for direction in directions {
        events.clear();
        apply(world, Command::MovePlayer { direction }, &mut events);
        for event in &events {
            match event {
                Event::PlayerMoved { to, cost, .. } => {
                    println!("moved {direction:?} to ({}, {}), cost {cost}", to.x(), to.y());
                }
                Event::MoveRejected { .. } => println!("move {direction:?} rejected"),
                Event::PlayerDied { at } => {
                    println!("died on lava at ({}, {})", at.x(), at.y());
                }
                Event::PlayerWon { cost } => println!("reached the end with cost {cost}"),
                _ => {}
            }
        }
    }

    if let Some(player) = query::player(world) {
        println!(
            "final: cell ({}, {}), cost {}, won {}, dead {}",
            player.cell.x(),
            player.cell.y(),
            player.cost,
            player.won,
            player.dead
        );
    }
    Ok(())
}

fn parse_moves(moves: &str) -> Result<Vec<Direction>> {
    moves
        .chars()
        .map(|glyph| match glyph.to_ascii_lowercase() {
            'u' => Ok(Direction::Up),
            'd' => Ok(Direction::Down),
            'l' => Ok(Direction::Left),
            'r' => Ok(Direction::Right),
            other => Err(anyhow!("unknown move {other:?}, expected u/d/l/r")),
        })
        .collect()
}
