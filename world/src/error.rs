//! Error types raised by the world map model.

use mazemap_core::{Tile, UnknownTileCode};
use thiserror::Error;

/// Errors surfaced by layers and world maps.
#[derive(Debug, Error)]
pub enum WorldMapError {
    /// A tile outside `[0, rows) x [0, cols)` was addressed.
    #[error("tile {tile} lies outside the {rows}x{cols} map")]
    OutOfBounds {
        /// Offending tile.
        tile: Tile,
        /// Number of rows of the addressed layer.
        rows: usize,
        /// Number of columns of the addressed layer.
        cols: usize,
    },

    /// A row index passed to a row editing operation is out of range.
    #[error("row index {index} is out of range for a map with {rows} rows")]
    RowOutOfRange {
        /// Offending row index.
        index: usize,
        /// Number of rows of the map.
        rows: usize,
    },

    /// A byte written through a strict entry point names no tile code.
    #[error(transparent)]
    UnknownCode(#[from] UnknownTileCode),

    /// A map location used a scheme other than `file:`.
    #[error("unsupported map url '{0}', only file: urls can be loaded")]
    UnsupportedUrl(String),

    /// Reading or writing a map file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, WorldMapError>;
