//! Terrain layer with derived portals and an optional ghost house.

use std::ops::Deref;

use mazemap_core::{TerrainCode, Tile};

use crate::{error::Result, layer::Layer};

/// Traversal cost, in tiles, of passing through a portal.
pub const PORTAL_DEPTH: u32 = 2;

/// Pair of tunnel tiles on opposite map borders connected for traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Portal {
    left: Tile,
    right: Tile,
    depth: u32,
}

impl Portal {
    /// Creates a portal between two border tiles.
    #[must_use]
    pub const fn new(left: Tile, right: Tile, depth: u32) -> Self {
        Self { left, right, depth }
    }

    /// Tunnel tile on the left border.
    #[must_use]
    pub const fn left(&self) -> Tile {
        self.left
    }

    /// Tunnel tile on the right border.
    #[must_use]
    pub const fn right(&self) -> Tile {
        self.right
    }

    /// Traversal cost in tiles.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Reports whether the tile is one of the portal's ends.
    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        tile == self.left || tile == self.right
    }
}

/// Rectangular region reserved for the ghost house, bounds inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct House {
    min_tile: Tile,
    max_tile: Tile,
}

impl House {
    /// Creates a house spanning `min_tile..=max_tile`.
    #[must_use]
    pub const fn new(min_tile: Tile, max_tile: Tile) -> Self {
        Self { min_tile, max_tile }
    }

    /// Upper-left tile of the house.
    #[must_use]
    pub const fn min_tile(&self) -> Tile {
        self.min_tile
    }

    /// Lower-right tile of the house.
    #[must_use]
    pub const fn max_tile(&self) -> Tile {
        self.max_tile
    }

    /// Number of rows and columns covered, in that order.
    #[must_use]
    pub const fn size(&self) -> (i32, i32) {
        (
            self.max_tile.row() - self.min_tile.row() + 1,
            self.max_tile.col() - self.min_tile.col() + 1,
        )
    }

    /// Reports whether the tile lies inside the house area.
    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        (self.min_tile.row()..=self.max_tile.row()).contains(&tile.row())
            && (self.min_tile.col()..=self.max_tile.col()).contains(&tile.col())
    }

    /// Door tiles found inside the house area of the terrain.
    #[must_use]
    pub fn door_tiles(&self, terrain: &TerrainLayer) -> Vec<Tile> {
        terrain
            .tiles_containing(TerrainCode::Door.to_byte())
            .filter(|tile| self.contains(*tile))
            .collect()
    }
}

/// Terrain layer: walls, doors, tunnels and one-way markers.
///
/// Portals are derived once when the layer is constructed. The house is a
/// reference placed by higher-level code and only consulted by
/// [`TerrainLayer::is_intersection`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TerrainLayer {
    layer: Layer,
    portals: Vec<Portal>,
    house: Option<House>,
}

impl TerrainLayer {
    /// Wraps a byte layer and derives its portals.
    #[must_use]
    pub fn new(layer: Layer) -> Self {
        let portals = derive_portals(&layer);
        Self {
            layer,
            portals,
            house: None,
        }
    }

    /// Underlying byte layer.
    #[must_use]
    pub const fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Portals found at construction, ordered by row.
    #[must_use]
    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    /// House placed on this terrain, if any.
    #[must_use]
    pub const fn house(&self) -> Option<&House> {
        self.house.as_ref()
    }

    /// Places or clears the house.
    pub fn set_house(&mut self, house: Option<House>) {
        self.house = house;
    }

    /// Terrain code at the tile; unknown bytes read as [`TerrainCode::Empty`].
    pub fn content(&self, tile: Tile) -> Result<TerrainCode> {
        self.layer.get(tile).map(TerrainCode::from_byte_or_empty)
    }

    /// Whether the tile blocks movement. Tiles outside the map never block.
    #[must_use]
    pub fn is_blocked(&self, tile: Tile) -> bool {
        self.content(tile).is_ok_and(TerrainCode::is_blocked)
    }

    /// Whether the tile is a free tile with at least three open neighbours.
    ///
    /// Border columns and tiles inside the house are never intersections.
    /// Doors count as closed neighbours.
    #[must_use]
    pub fn is_intersection(&self, tile: Tile) -> bool {
        let last_col = self.layer.num_cols() as i32 - 1;
        if !self.layer.in_bounds(tile) || tile.col() <= 0 || tile.col() >= last_col {
            return false;
        }
        if self.house.is_some_and(|house| house.contains(tile)) || self.is_blocked(tile) {
            return false;
        }
        let closed = tile
            .neighbors()
            .into_iter()
            .filter(|neighbor| {
                self.is_blocked(*neighbor)
                    || self.content(*neighbor).is_ok_and(|code| code == TerrainCode::Door)
            })
            .count();
        closed < 2
    }

    /// First tile in row-major order whose content is not empty.
    #[must_use]
    pub fn first_non_empty_tile(&self) -> Option<Tile> {
        self.layer
            .tiles()
            .zip(self.layer.values())
            .find(|(_, value)| **value != TerrainCode::Empty.to_byte())
            .map(|(tile, _)| tile)
    }
}

impl Deref for TerrainLayer {
    type Target = Layer;

    fn deref(&self) -> &Layer {
        &self.layer
    }
}

fn derive_portals(layer: &Layer) -> Vec<Portal> {
    let cols = layer.num_cols();
    if cols < 2 {
        return Vec::new();
    }
    let tunnel = TerrainCode::Tunnel.to_byte();
    (0..layer.num_rows())
        .filter_map(|row| layer.row_values(row).map(|values| (row, values)))
        .filter(|(_, values)| values[0] == tunnel && values[cols - 1] == tunnel)
        .map(|(row, _)| {
            let row = row as i32;
            Portal::new(
                Tile::new(row, 0),
                Tile::new(row, cols as i32 - 1),
                PORTAL_DEPTH,
            )
        })
        .collect()
}
