#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Two-layer tile map model for maze worlds.
//!
//! A [`WorldMap`] aggregates a [`TerrainLayer`] and a [`FoodLayer`] of equal
//! size, a free-form configuration map and the location the map was loaded
//! from. Maps are read from and written to the `.world` text format described
//! in [`format`]. Resizing never happens in place: row insertion and removal
//! build a new map.

use std::{collections::BTreeMap, fs, path::Path};

use mazemap_core::{FoodCode, LayerId, TerrainCode, Tile};
use serde_json::Value;

mod error;
mod food;
pub mod format;
mod layer;
mod terrain;

pub use error::{Result, WorldMapError};
pub use food::FoodLayer;
pub use layer::Layer;
pub use terrain::{House, Portal, TerrainLayer, PORTAL_DEPTH};

const FILE_URL_PREFIX: &str = "file://";

/// Terrain and food layers plus configuration for one maze.
#[derive(Clone, Debug, Default)]
pub struct WorldMap {
    terrain: TerrainLayer,
    food: FoodLayer,
    config: BTreeMap<String, Value>,
    url: Option<String>,
}

impl WorldMap {
    /// Creates a map of the given size with empty terrain and no food.
    #[must_use]
    pub fn empty_map(rows: usize, cols: usize) -> Self {
        Self::from_layers(Layer::new(rows, cols), Layer::new(rows, cols))
    }

    /// Assembles a map from raw layers.
    ///
    /// The terrain layer defines the map size; a food layer of different size
    /// is resized to match.
    #[must_use]
    pub fn from_layers(terrain: Layer, food: Layer) -> Self {
        let food = if (food.num_rows(), food.num_cols()) == (terrain.num_rows(), terrain.num_cols()) {
            food
        } else {
            food.resized(terrain.num_rows(), terrain.num_cols())
        };
        Self {
            terrain: TerrainLayer::new(terrain),
            food: FoodLayer::new(food),
            config: BTreeMap::new(),
            url: None,
        }
    }

    /// Deep copy of the map's layers, configuration and url with fresh food state.
    #[must_use]
    pub fn copy_of(&self) -> Self {
        let mut copy = Self::from_layers(self.terrain.layer().clone(), self.food.layer().clone());
        copy.terrain.set_house(self.terrain.house().copied());
        copy.config = self.config.clone();
        copy.url = self.url.clone();
        copy
    }

    /// Parses `.world` text, accepting only known terrain and food codes.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        format::parse(text.lines(), TerrainCode::is_valid, FoodCode::is_valid)
    }

    /// Loads a map from a `.world` file and remembers its location.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut map = Self::parse(&text);
        map.url = Some(file_url(path));
        tracing::debug!(
            path = %path.display(),
            rows = map.num_rows(),
            cols = map.num_cols(),
            "loaded world map"
        );
        Ok(map)
    }

    /// Loads a map from a `file:` url.
    pub fn load_from_url(url: &str) -> Result<Self> {
        let path = url
            .strip_prefix(FILE_URL_PREFIX)
            .or_else(|| url.strip_prefix("file:"))
            .ok_or_else(|| WorldMapError::UnsupportedUrl(url.to_owned()))?;
        let mut map = Self::load_from_file(path)?;
        map.url = Some(url.to_owned());
        Ok(map)
    }

    /// Writes the map as `.world` text and remembers the new location.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_text())?;
        self.url = Some(file_url(path));
        tracing::debug!(path = %path.display(), "saved world map");
        Ok(())
    }

    /// The map in `.world` text form.
    #[must_use]
    pub fn to_text(&self) -> String {
        format::serialize(self)
    }

    /// Number of rows, taken from the terrain layer.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.terrain.num_rows()
    }

    /// Number of columns, taken from the terrain layer.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.terrain.num_cols()
    }

    /// Terrain layer.
    #[must_use]
    pub const fn terrain(&self) -> &TerrainLayer {
        &self.terrain
    }

    /// Food layer.
    #[must_use]
    pub const fn food(&self) -> &FoodLayer {
        &self.food
    }

    /// Mutable food layer, for eaten-state bookkeeping.
    pub fn food_mut(&mut self) -> &mut FoodLayer {
        &mut self.food
    }

    /// Places or clears the ghost house on the terrain.
    pub fn set_house(&mut self, house: Option<House>) {
        self.terrain.set_house(house);
    }

    /// Location the map was loaded from or saved to.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Byte stored at the tile of the given layer.
    pub fn content(&self, layer: LayerId, tile: Tile) -> Result<u8> {
        match layer {
            LayerId::Terrain => self.terrain.get(tile),
            LayerId::Food => self.food.get(tile),
        }
    }

    /// Writes a code into a layer.
    ///
    /// The code must be valid for the layer. Terrain edits re-derive the
    /// portals and keep the house. Food edits adjust the counts for the one
    /// tile and keep the eaten state of every other tile.
    pub fn set_content(&mut self, layer: LayerId, tile: Tile, code: u8) -> Result<()> {
        match layer {
            LayerId::Terrain => {
                let _ = TerrainCode::try_from(code)?;
                let mut bytes = self.terrain.layer().clone();
                bytes.set(tile, code)?;
                let house = self.terrain.house().copied();
                self.terrain = TerrainLayer::new(bytes);
                self.terrain.set_house(house);
            }
            LayerId::Food => self.food.set_content(tile, FoodCode::try_from(code)?)?,
        }
        Ok(())
    }

    /// Horizontally mirrored tile, used for symmetric edits.
    pub fn mirror_position(&self, tile: Tile) -> Result<Tile> {
        self.terrain.mirror_position(tile)
    }

    /// New map with a row inserted at `index`.
    ///
    /// The inserted row copies the row above it; at index 0 it is empty.
    pub fn with_row_inserted(&self, index: usize) -> Result<Self> {
        self.rebuilt_with(|layer| layer.with_row_inserted(index))
    }

    /// New map with the row at `index` removed.
    pub fn with_row_removed(&self, index: usize) -> Result<Self> {
        self.rebuilt_with(|layer| layer.with_row_removed(index))
    }

    /// Runtime configuration attached to the map.
    #[must_use]
    pub const fn config(&self) -> &BTreeMap<String, Value> {
        &self.config
    }

    /// Configuration value stored under the key.
    #[must_use]
    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// Stores a configuration value, returning the previous one.
    pub fn set_config_value(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.config.insert(key.into(), value)
    }

    fn rebuilt_with(&self, edit: impl Fn(&Layer) -> Result<Layer>) -> Result<Self> {
        let mut map = Self::from_layers(edit(self.terrain.layer())?, edit(self.food.layer())?);
        map.config = self.config.clone();
        map.url = self.url.clone();
        Ok(map)
    }
}

fn file_url(path: &Path) -> String {
    let absolute = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    format!("{FILE_URL_PREFIX}{}", absolute.display())
}
