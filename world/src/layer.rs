//! Rectangular byte grid with a string property map.

use std::collections::BTreeMap;

use mazemap_core::Tile;

use crate::error::{Result, WorldMapError};

/// Row-major grid of tile bytes plus free-form string properties.
///
/// Every coordinate access is bounds-checked; tiles outside
/// `[0, rows) x [0, cols)` produce [`WorldMapError::OutOfBounds`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layer {
    rows: usize,
    cols: usize,
    values: Vec<u8>,
    properties: BTreeMap<String, String>,
}

impl Layer {
    /// Creates a layer of the given size filled with zero bytes.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0; rows * cols],
            properties: BTreeMap::new(),
        }
    }

    /// Creates a layer from explicit rows.
    ///
    /// The column count is the length of the first row. Shorter rows are
    /// padded with zero bytes and longer rows are truncated.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        let mut layer = Self::new(rows.len(), cols);
        for (row_index, row) in rows.into_iter().enumerate() {
            let start = row_index * cols;
            let copied = row.len().min(cols);
            layer.values[start..start + copied].copy_from_slice(&row[..copied]);
        }
        layer
    }

    /// Number of rows.
    #[must_use]
    pub const fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn num_cols(&self) -> usize {
        self.cols
    }

    /// Reports whether the tile lies inside the layer.
    #[must_use]
    pub fn in_bounds(&self, tile: Tile) -> bool {
        usize::try_from(tile.row()).is_ok_and(|row| row < self.rows)
            && usize::try_from(tile.col()).is_ok_and(|col| col < self.cols)
    }

    /// Row-major index of the tile: `col + row * num_cols`.
    pub fn index(&self, tile: Tile) -> Result<usize> {
        if !self.in_bounds(tile) {
            return Err(self.out_of_bounds(tile));
        }
        Ok(tile.col() as usize + tile.row() as usize * self.cols)
    }

    /// Byte stored at the tile.
    pub fn get(&self, tile: Tile) -> Result<u8> {
        self.index(tile).map(|index| self.values[index])
    }

    /// Overwrites the byte stored at the tile.
    pub fn set(&mut self, tile: Tile, value: u8) -> Result<()> {
        let index = self.index(tile)?;
        self.values[index] = value;
        Ok(())
    }

    /// Horizontally mirrored tile: `(row, num_cols - 1 - col)`.
    pub fn mirror_position(&self, tile: Tile) -> Result<Tile> {
        if !self.in_bounds(tile) {
            return Err(self.out_of_bounds(tile));
        }
        let last_col = self.cols as i32 - 1;
        Ok(Tile::new(tile.row(), last_col - tile.col()))
    }

    /// Writes the byte into every tile.
    pub fn fill(&mut self, value: u8) {
        self.values.fill(value);
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> {
        let cols = self.cols as i32;
        let rows = self.rows as i32;
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Tile::new(row, col)))
    }

    /// Tiles holding the byte, in row-major order.
    pub fn tiles_containing(&self, value: u8) -> impl Iterator<Item = Tile> + '_ {
        self.tiles()
            .zip(self.values.iter())
            .filter(move |(_, stored)| **stored == value)
            .map(|(tile, _)| tile)
    }

    /// Bytes of one row, or `None` when the row does not exist.
    #[must_use]
    pub fn row_values(&self, row: usize) -> Option<&[u8]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.values[start..start + self.cols])
    }

    /// All bytes in row-major order.
    #[must_use]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Copy of the layer with a different size; existing bytes keep their tiles.
    #[must_use]
    pub fn resized(&self, rows: usize, cols: usize) -> Self {
        let mut layer = Self::new(rows, cols);
        let kept_cols = cols.min(self.cols);
        for row in 0..rows.min(self.rows) {
            let source = row * self.cols;
            let target = row * cols;
            layer.values[target..target + kept_cols]
                .copy_from_slice(&self.values[source..source + kept_cols]);
        }
        layer.properties = self.properties.clone();
        layer
    }

    /// Copy of the layer with a row inserted at `index`.
    ///
    /// The inserted row repeats the row above it, or is zero-filled when
    /// inserted at the top. `index` may equal the row count to append.
    pub fn with_row_inserted(&self, index: usize) -> Result<Self> {
        if index > self.rows {
            return Err(self.row_out_of_range(index));
        }
        let at = index * self.cols;
        let mut values = Vec::with_capacity(self.values.len() + self.cols);
        values.extend_from_slice(&self.values[..at]);
        if index == 0 {
            values.resize(self.cols, 0);
        } else {
            values.extend_from_slice(&self.values[at - self.cols..at]);
        }
        values.extend_from_slice(&self.values[at..]);
        Ok(Self {
            rows: self.rows + 1,
            cols: self.cols,
            values,
            properties: self.properties.clone(),
        })
    }

    /// Copy of the layer without the row at `index`.
    pub fn with_row_removed(&self, index: usize) -> Result<Self> {
        if index >= self.rows {
            return Err(self.row_out_of_range(index));
        }
        let start = index * self.cols;
        let mut values = Vec::with_capacity(self.values.len() - self.cols);
        values.extend_from_slice(&self.values[..start]);
        values.extend_from_slice(&self.values[start + self.cols..]);
        Ok(Self {
            rows: self.rows - 1,
            cols: self.cols,
            values,
            properties: self.properties.clone(),
        })
    }

    /// Properties sorted by key.
    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Value of a property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Sets a property, returning the previous value.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.properties.insert(key.into(), value.into())
    }

    /// Removes a property, returning its value.
    pub fn remove_property(&mut self, key: &str) -> Option<String> {
        self.properties.remove(key)
    }

    /// Tile stored in a property as a `(row,col)` literal.
    ///
    /// Missing properties and malformed literals both yield `None`.
    #[must_use]
    pub fn tile_property(&self, key: &str) -> Option<Tile> {
        self.property(key).and_then(|value| value.parse().ok())
    }

    /// Stores a tile in a property as a `(row,col)` literal.
    pub fn set_tile_property(&mut self, key: impl Into<String>, tile: Tile) -> Option<String> {
        self.set_property(key, tile.to_string())
    }

    fn row_out_of_range(&self, index: usize) -> WorldMapError {
        WorldMapError::RowOutOfRange {
            index,
            rows: self.rows,
        }
    }

    fn out_of_bounds(&self, tile: Tile) -> WorldMapError {
        WorldMapError::OutOfBounds {
            tile,
            rows: self.rows,
            cols: self.cols,
        }
    }
}
