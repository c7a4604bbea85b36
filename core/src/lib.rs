#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core vocabulary shared across the maze map crates.
//!
//! This crate defines the closed sets of tile codes stored in the terrain and
//! food layers, the [`Tile`] coordinate used to address grid cells, the
//! [`Direction`] used when walking the grid, and the axis-aligned [`Rect`]
//! produced by geometry consumers. Every byte value maps to exactly one code;
//! unknown bytes are rejected by the strict conversions and replaced by the
//! empty code by the lenient ones.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod bits;

pub use bits::TileBitSet;

/// Edge length of a single tile measured in pixels.
pub const TS: i32 = 8;

/// Half of [`TS`], the offset from a tile edge to its center line.
pub const HTS: i32 = TS / 2;

/// Location of a single grid tile expressed as row and column indices.
///
/// Coordinates are signed so that walkers may step outside the map; layers
/// reject such tiles explicitly instead of wrapping or clamping them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    row: i32,
    col: i32,
}

impl Tile {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn col(&self) -> i32 {
        self.col
    }

    /// Tile adjacent to this one in the provided direction.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let (row_delta, col_delta) = direction.delta();
        Self::new(self.row + row_delta, self.col + col_delta)
    }

    /// The four orthogonal neighbours in north, east, south, west order.
    #[must_use]
    pub const fn neighbors(self) -> [Tile; 4] {
        [
            self.neighbor(Direction::North),
            self.neighbor(Direction::East),
            self.neighbor(Direction::South),
            self.neighbor(Direction::West),
        ]
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Error returned when a `(row,col)` tile literal cannot be parsed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid tile literal '{0}', expected '(row,col)'")]
pub struct ParseTileError(String);

impl FromStr for Tile {
    type Err = ParseTileError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseTileError(value.to_owned());
        let inner = value
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let (row, col) = inner.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse::<i32>().map_err(|_| invalid())?;
        let col = col.trim().parse::<i32>().map_err(|_| invalid())?;
        Ok(Self::new(row, col))
    }
}

/// Cardinal directions used when walking the tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Row and column delta of a single step, in that order.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Direction of a single orthogonal step from `from` to `to`, if they are adjacent.
    #[must_use]
    pub fn between(from: Tile, to: Tile) -> Option<Self> {
        match (to.row() - from.row(), to.col() - from.col()) {
            (-1, 0) => Some(Self::North),
            (0, 1) => Some(Self::East),
            (1, 0) => Some(Self::South),
            (0, -1) => Some(Self::West),
            _ => None,
        }
    }
}

/// Names the layer a tile code belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerId {
    /// Walls, doors, tunnels and one-way markers.
    Terrain,
    /// Pellets and energizers.
    Food,
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terrain => write!(f, "terrain"),
            Self::Food => write!(f, "food"),
        }
    }
}

/// Error raised by strict byte-to-code conversions.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("byte {value:#04x} is not a valid {layer} code")]
pub struct UnknownTileCode {
    /// Layer whose code set rejected the byte.
    pub layer: LayerId,
    /// Rejected byte value.
    pub value: u8,
}

/// Content codes stored in the terrain layer.
///
/// The arc codes describe rounded obstacle corners named after the compass
/// corner they occupy. The angled arc codes are the square corners used by the
/// ghost house; they connect like plain arcs but do not block movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TerrainCode {
    /// Free space.
    Empty = 0x00,
    /// Horizontal wall segment.
    WallH = 0x01,
    /// Vertical wall segment.
    WallV = 0x02,
    /// Rounded north-west corner, connecting the east and south tile edges.
    ArcNw = 0x03,
    /// Rounded north-east corner, connecting the west and south tile edges.
    ArcNe = 0x04,
    /// Rounded south-east corner, connecting the west and north tile edges.
    ArcSe = 0x05,
    /// Rounded south-west corner, connecting the east and north tile edges.
    ArcSw = 0x06,
    /// Tunnel tile; paired tunnels on both map borders form a portal.
    Tunnel = 0x07,
    /// Angled north-west house corner.
    AngArcNw = 0x0a,
    /// Angled north-east house corner.
    AngArcNe = 0x0b,
    /// Angled south-east house corner.
    AngArcSe = 0x0c,
    /// Angled south-west house corner.
    AngArcSw = 0x0d,
    /// House door, traced like a horizontal wall.
    Door = 0x0e,
    /// One-way marker allowing only northward movement.
    OneWayUp = 0x0f,
    /// One-way marker allowing only eastward movement.
    OneWayRight = 0x10,
    /// One-way marker allowing only southward movement.
    OneWayDown = 0x11,
    /// One-way marker allowing only westward movement.
    OneWayLeft = 0x12,
}

impl TerrainCode {
    /// Every terrain code in ascending byte order.
    pub const ALL: [TerrainCode; 17] = [
        Self::Empty,
        Self::WallH,
        Self::WallV,
        Self::ArcNw,
        Self::ArcNe,
        Self::ArcSe,
        Self::ArcSw,
        Self::Tunnel,
        Self::AngArcNw,
        Self::AngArcNe,
        Self::AngArcSe,
        Self::AngArcSw,
        Self::Door,
        Self::OneWayUp,
        Self::OneWayRight,
        Self::OneWayDown,
        Self::OneWayLeft,
    ];

    /// Byte stored in the terrain layer for this code.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Lenient conversion used while parsing: unknown bytes become [`TerrainCode::Empty`].
    #[must_use]
    pub fn from_byte_or_empty(value: u8) -> Self {
        Self::try_from(value).unwrap_or(Self::Empty)
    }

    /// Reports whether the byte names a terrain code.
    #[must_use]
    pub fn is_valid(value: u8) -> bool {
        Self::try_from(value).is_ok()
    }

    /// Walls and plain arcs block movement; doors, angled arcs and tunnels do not.
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(
            self,
            Self::WallH | Self::WallV | Self::ArcNw | Self::ArcNe | Self::ArcSe | Self::ArcSw
        )
    }

}

impl TryFrom<u8> for TerrainCode {
    type Error = UnknownTileCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|code| code.to_byte() == value)
            .ok_or(UnknownTileCode {
                layer: LayerId::Terrain,
                value,
            })
    }
}

/// Content codes stored in the food layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FoodCode {
    /// No food.
    Empty = 0x00,
    /// Regular pellet.
    Pellet = 0x01,
    /// Energizer pellet.
    Energizer = 0x02,
}

impl FoodCode {
    /// Byte stored in the food layer for this code.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Lenient conversion used while parsing: unknown bytes become [`FoodCode::Empty`].
    #[must_use]
    pub fn from_byte_or_empty(value: u8) -> Self {
        Self::try_from(value).unwrap_or(Self::Empty)
    }

    /// Reports whether the byte names a food code.
    #[must_use]
    pub fn is_valid(value: u8) -> bool {
        Self::try_from(value).is_ok()
    }
}

impl TryFrom<u8> for FoodCode {
    type Error = UnknownTileCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Empty),
            0x01 => Ok(Self::Pellet),
            0x02 => Ok(Self::Energizer),
            _ => Err(UnknownTileCode {
                layer: LayerId::Food,
                value,
            }),
        }
    }
}

/// Axis-aligned rectangle expressed in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    /// Creates a rectangle from its upper-left corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Top edge.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Covered area in square pixels.
    #[must_use]
    pub const fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Reports whether the interiors of two rectangles intersect.
    #[must_use]
    pub const fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, FoodCode, LayerId, Rect, TerrainCode, Tile, UnknownTileCode};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn every_terrain_byte_maps_to_exactly_one_code() {
        for value in 0..=u8::MAX {
            let matches = TerrainCode::ALL
                .iter()
                .filter(|code| code.to_byte() == value)
                .count();
            assert!(matches <= 1, "byte {value:#04x} names {matches} codes");
            assert_eq!(TerrainCode::is_valid(value), matches == 1);
        }
    }

    #[test]
    fn strict_conversion_rejects_unused_bytes() {
        assert_eq!(
            TerrainCode::try_from(0x08),
            Err(UnknownTileCode {
                layer: LayerId::Terrain,
                value: 0x08,
            })
        );
        assert_eq!(TerrainCode::try_from(0x0e), Ok(TerrainCode::Door));
        assert!(FoodCode::try_from(3).is_err());
    }

    #[test]
    fn lenient_conversion_defaults_to_empty() {
        assert_eq!(TerrainCode::from_byte_or_empty(0x42), TerrainCode::Empty);
        assert_eq!(TerrainCode::from_byte_or_empty(0x05), TerrainCode::ArcSe);
        assert_eq!(FoodCode::from_byte_or_empty(9), FoodCode::Empty);
        assert_eq!(FoodCode::from_byte_or_empty(2), FoodCode::Energizer);
    }

    #[test]
    fn blocking_covers_walls_and_plain_arcs_only() {
        let blocked: Vec<_> = TerrainCode::ALL
            .into_iter()
            .filter(|code| code.is_blocked())
            .collect();
        assert_eq!(
            blocked,
            vec![
                TerrainCode::WallH,
                TerrainCode::WallV,
                TerrainCode::ArcNw,
                TerrainCode::ArcNe,
                TerrainCode::ArcSe,
                TerrainCode::ArcSw,
            ]
        );
        assert!(!TerrainCode::Door.is_blocked());
        assert!(!TerrainCode::AngArcNw.is_blocked());
        assert!(!TerrainCode::Tunnel.is_blocked());
    }

    #[test]
    fn tile_literal_parses_and_displays() {
        let tile: Tile = " (13, 4)".parse().expect("tile literal parses");
        assert_eq!(tile, Tile::new(13, 4));
        assert_eq!(tile.to_string(), "(13,4)");
        assert!("13,4".parse::<Tile>().is_err());
        assert!("(a,4)".parse::<Tile>().is_err());
    }

    #[test]
    fn direction_between_adjacent_tiles() {
        let origin = Tile::new(3, 3);
        for direction in [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ] {
            assert_eq!(
                Direction::between(origin, origin.neighbor(direction)),
                Some(direction)
            );
            assert_eq!(
                origin.neighbor(direction).neighbor(direction.opposite()),
                origin
            );
        }
        assert_eq!(Direction::between(origin, Tile::new(4, 4)), None);
    }

    #[test]
    fn rect_overlap_excludes_shared_edges() {
        let left = Rect::new(0, 0, 8, 8);
        let right = Rect::new(8, 0, 8, 8);
        assert!(!left.overlaps(&right));
        assert!(left.overlaps(&Rect::new(4, 4, 8, 8)));
        assert_eq!(left.area(), 64);
    }

    #[test]
    fn value_types_round_trip_through_bincode() {
        assert_round_trip(&Tile::new(-1, 27));
        assert_round_trip(&TerrainCode::AngArcSw);
        assert_round_trip(&Rect::new(4, 8, 16, 32));
    }
}
