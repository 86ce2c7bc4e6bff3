//! Text-format maze loading.
//!
//! The format is whitespace-delimited integers: row count, column count, then
//! rows × cols tile codes in row-major order. Tile codes follow
//! [`TileType::from_code`]: −2 end, −1 start, 0 floor, 1 wall, 2 grass,
//! 3 lava. Exactly one start and one end code must be present.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tile_maze_core::{LayoutError, MazeLayout, TileType};

/// Reasons a maze description cannot be turned into a layout.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read maze file")]
    Io(#[from] std::io::Error),
    /// The description ended before both dimensions were declared.
    #[error("maze description must start with row and column counts")]
    MissingDimensions,
    /// A token was not a valid integer.
    #[error("invalid integer {token:?} in maze description")]
    InvalidToken {
        /// Offending token.
        token: String,
    },
    /// The declared dimensions were not positive or were unreasonably large.
    #[error("maze dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions {
        /// Declared row count.
        rows: i64,
        /// Declared column count.
        cols: i64,
    },
    /// The description carried fewer or more tile codes than rows × cols.
    #[error("expected {expected} tile codes, found {found}")]
    TileCountMismatch {
        /// Tile count implied by the declared dimensions.
        expected: usize,
        /// Tile count actually present.
        found: usize,
    },
    /// A tile code outside the closed enumeration. Out-of-range codes are
    /// rejected rather than clamped to a default.
    #[error("unknown tile code {code}")]
    UnknownTileCode {
        /// Offending code.
        code: i64,
    },
    /// The tile contents violate a structural invariant.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Reads and parses a maze description from disk.
pub fn load(path: impl AsRef<Path>) -> Result<MazeLayout, LoadError> {
    parse(&fs::read_to_string(path)?)
}

/// Parses a maze description from text.
pub fn parse(text: &str) -> Result<MazeLayout, LoadError> {
    let mut tokens = text.split_whitespace();

    let rows = dimension_token(tokens.next())?;
    let cols = dimension_token(tokens.next())?;
    if rows <= 0 || cols <= 0 {
        return Err(LoadError::InvalidDimensions { rows, cols });
    }
    let (Ok(rows_u32), Ok(cols_u32)) = (u32::try_from(rows), u32::try_from(cols)) else {
        return Err(LoadError::InvalidDimensions { rows, cols });
    };
    let expected = (rows as usize)
        .checked_mul(cols as usize)
        .ok_or(LoadError::InvalidDimensions { rows, cols })?;

    let mut tiles = Vec::with_capacity(expected);
    for _ in 0..expected {
        let Some(token) = tokens.next() else {
            return Err(LoadError::TileCountMismatch {
                expected,
                found: tiles.len(),
            });
        };
        let code = parse_int(token)?;
        let tile = i32::try_from(code)
            .ok()
            .and_then(TileType::from_code)
            .ok_or(LoadError::UnknownTileCode { code })?;
        tiles.push(tile);
    }

    let trailing = tokens.count();
    if trailing > 0 {
        return Err(LoadError::TileCountMismatch {
            expected,
            found: expected + trailing,
        });
    }

    Ok(MazeLayout::from_tiles(rows_u32, cols_u32, tiles)?)
}

fn dimension_token(token: Option<&str>) -> Result<i64, LoadError> {
    parse_int(token.ok_or(LoadError::MissingDimensions)?)
}

fn parse_int(token: &str) -> Result<i64, LoadError> {
    token.parse().map_err(|_| LoadError::InvalidToken {
        token: token.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::{parse, LoadError};
    use tile_maze_core::{GridCoord, LayoutError, TileType};

    #[test]
    fn parses_the_reference_corridor_maze() {
        let layout = parse("3 3 \n -1 0 1 \n 1 0 1 \n 1 0 -2").expect("layout");
        assert_eq!(layout.rows(), 3);
        assert_eq!(layout.cols(), 3);
        assert_eq!(layout.start(), GridCoord::new(0, 0));
        assert_eq!(layout.end(), GridCoord::new(2, 2));
        assert_eq!(layout.tiles()[4], TileType::Floor);
    }

    #[test]
    fn rejects_descriptions_without_dimensions() {
        assert!(matches!(parse(""), Err(LoadError::MissingDimensions)));
        assert!(matches!(parse("3"), Err(LoadError::MissingDimensions)));
    }

    #[test]
    fn rejects_non_integer_tokens() {
        assert!(matches!(
            parse("3 three"),
            Err(LoadError::InvalidToken { token }) if token == "three"
        ));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(matches!(
            parse("0 3"),
            Err(LoadError::InvalidDimensions { rows: 0, cols: 3 })
        ));
        assert!(matches!(
            parse("3 -2"),
            Err(LoadError::InvalidDimensions { rows: 3, cols: -2 })
        ));
    }

    #[test]
    fn rejects_truncated_and_padded_tile_lists() {
        assert!(matches!(
            parse("2 2 -1 0 -2"),
            Err(LoadError::TileCountMismatch {
                expected: 4,
                found: 3
            })
        ));
        assert!(matches!(
            parse("1 2 -1 -2 0"),
            Err(LoadError::TileCountMismatch {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn rejects_codes_outside_the_enumeration() {
        assert!(matches!(
            parse("1 3 -1 7 -2"),
            Err(LoadError::UnknownTileCode { code: 7 })
        ));
    }

    #[test]
    fn surfaces_structural_layout_violations() {
        assert!(matches!(
            parse("1 2 -1 0"),
            Err(LoadError::Layout(LayoutError::MissingEnd))
        ));
        assert!(matches!(
            parse("1 3 -1 -1 -2"),
            Err(LoadError::Layout(LayoutError::DuplicateStart))
        ));
    }
}
