//! Per-tile state transitions of the contour tracer.

use glam::IVec2;
use mazemap_core::{Direction, TerrainCode, Tile, HTS, TS};

/// Pixel position of the upper-left corner of a tile.
#[must_use]
pub const fn tile_origin(tile: Tile) -> IVec2 {
    IVec2::new(tile.col() * TS, tile.row() * TS)
}

/// Pixel position of the center of a tile.
#[must_use]
pub const fn tile_center(tile: Tile) -> IVec2 {
    IVec2::new(tile.col() * TS + HTS, tile.row() * TS + HTS)
}

/// Midpoint of the tile edge facing `side`.
#[must_use]
pub const fn edge_midpoint(tile: Tile, side: Direction) -> IVec2 {
    let center = tile_center(tile);
    let (row, col) = side.delta();
    IVec2::new(center.x + col * HTS, center.y + row * HTS)
}

/// Position of the tracer: the tile it came from and the tile it stands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    previous: Tile,
    current: Tile,
    heading: Direction,
}

impl Cursor {
    /// Cursor that has just left `tile` moving in `heading`.
    #[must_use]
    pub const fn leaving(tile: Tile, heading: Direction) -> Self {
        Self {
            previous: tile,
            current: tile.neighbor(heading),
            heading,
        }
    }

    /// Tile visited before the current one.
    #[must_use]
    pub const fn previous(&self) -> Tile {
        self.previous
    }

    /// Tile under the cursor.
    #[must_use]
    pub const fn current(&self) -> Tile {
        self.current
    }

    /// Direction of the last move, from `previous` to `current`.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Cursor after one more step in `heading`.
    #[must_use]
    pub const fn advance(self, heading: Direction) -> Self {
        Self::leaving(self.current, heading)
    }
}

/// Outcome of entering a tile while tracing a contour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Wall piece crossed in a straight line; heading and winding are kept.
    Straight {
        /// Pixel displacement across the tile.
        vector: IVec2,
    },
    /// Corner piece turning the contour by 90 degrees.
    Turn {
        /// Half-tile diagonal displacement from one edge midpoint to the next.
        vector: IVec2,
        /// Heading after the turn.
        heading: Direction,
        /// Winding of the contour after the turn.
        counter_clockwise: bool,
    },
    /// Content that does not continue a contour entered this way.
    Unexpected,
}

/// Transition for entering a tile holding `content` while moving in `heading`.
#[must_use]
pub const fn transition(content: TerrainCode, heading: Direction) -> Transition {
    use Direction::{East, North, South, West};
    use TerrainCode as T;

    match (content, heading) {
        (T::WallV, North) => straight(0, -TS),
        (T::WallV, South) => straight(0, TS),
        (T::WallH | T::Door, East) => straight(TS, 0),
        (T::WallH | T::Door, West) => straight(-TS, 0),

        (T::ArcNw | T::AngArcNw, West) => turn(-HTS, HTS, South, true),
        (T::ArcNw | T::AngArcNw, North) => turn(HTS, -HTS, East, false),
        (T::ArcSw | T::AngArcSw, South) => turn(HTS, HTS, East, true),
        (T::ArcSw | T::AngArcSw, West) => turn(-HTS, -HTS, North, false),
        (T::ArcSe | T::AngArcSe, East) => turn(HTS, -HTS, North, true),
        (T::ArcSe | T::AngArcSe, South) => turn(-HTS, HTS, West, false),
        (T::ArcNe | T::AngArcNe, North) => turn(-HTS, -HTS, West, true),
        (T::ArcNe | T::AngArcNe, East) => turn(HTS, HTS, South, false),

        _ => Transition::Unexpected,
    }
}

const fn straight(x: i32, y: i32) -> Transition {
    Transition::Straight {
        vector: IVec2::new(x, y),
    }
}

const fn turn(x: i32, y: i32, heading: Direction, counter_clockwise: bool) -> Transition {
    Transition::Turn {
        vector: IVec2::new(x, y),
        heading,
        counter_clockwise,
    }
}

#[cfg(test)]
mod tests {
    use super::{edge_midpoint, tile_center, tile_origin, transition, Cursor, Transition};
    use glam::IVec2;
    use mazemap_core::{Direction, TerrainCode, Tile};

    fn turn_of(content: TerrainCode, heading: Direction) -> (IVec2, Direction, bool) {
        match transition(content, heading) {
            Transition::Turn {
                vector,
                heading,
                counter_clockwise,
            } => (vector, heading, counter_clockwise),
            other => panic!("{content:?} entered {heading:?} gave {other:?}"),
        }
    }

    #[test]
    fn pixel_helpers_follow_tile_geometry() {
        let tile = Tile::new(2, 3);
        assert_eq!(tile_origin(tile), IVec2::new(24, 16));
        assert_eq!(tile_center(tile), IVec2::new(28, 20));
        assert_eq!(edge_midpoint(tile, Direction::East), IVec2::new(32, 20));
        assert_eq!(edge_midpoint(tile, Direction::North), IVec2::new(28, 16));
    }

    #[test]
    fn cursor_tracks_previous_and_current_tiles() {
        let cursor = Cursor::leaving(Tile::new(1, 1), Direction::South);
        assert_eq!(cursor.current(), Tile::new(2, 1));
        let cursor = cursor.advance(Direction::East);
        assert_eq!(cursor.previous(), Tile::new(2, 1));
        assert_eq!(cursor.current(), Tile::new(2, 2));
        assert_eq!(cursor.heading(), Direction::East);
        assert_eq!(
            Direction::between(cursor.previous(), cursor.current()),
            Some(cursor.heading())
        );
    }

    #[test]
    fn vertical_walls_only_continue_vertical_runs() {
        assert_eq!(
            transition(TerrainCode::WallV, Direction::South),
            Transition::Straight {
                vector: IVec2::new(0, 8)
            }
        );
        assert_eq!(
            transition(TerrainCode::WallV, Direction::East),
            Transition::Unexpected
        );
    }

    #[test]
    fn doors_behave_like_horizontal_walls() {
        for heading in [Direction::East, Direction::West] {
            assert_eq!(
                transition(TerrainCode::Door, heading),
                transition(TerrainCode::WallH, heading)
            );
        }
        assert_eq!(
            transition(TerrainCode::Door, Direction::North),
            Transition::Unexpected
        );
    }

    #[test]
    fn every_arc_turns_between_its_two_edges() {
        let cases = [
            (TerrainCode::ArcNw, Direction::West, (-4, 4), Direction::South, true),
            (TerrainCode::ArcNw, Direction::North, (4, -4), Direction::East, false),
            (TerrainCode::ArcSw, Direction::South, (4, 4), Direction::East, true),
            (TerrainCode::ArcSw, Direction::West, (-4, -4), Direction::North, false),
            (TerrainCode::ArcSe, Direction::East, (4, -4), Direction::North, true),
            (TerrainCode::ArcSe, Direction::South, (-4, 4), Direction::West, false),
            (TerrainCode::ArcNe, Direction::North, (-4, -4), Direction::West, true),
            (TerrainCode::ArcNe, Direction::East, (4, 4), Direction::South, false),
        ];
        for (content, heading, (x, y), turned, ccw) in cases {
            assert_eq!(
                turn_of(content, heading),
                (IVec2::new(x, y), turned, ccw),
                "{content:?} entered {heading:?}"
            );
        }
    }

    #[test]
    fn angled_arcs_connect_like_plain_arcs() {
        let pairs = [
            (TerrainCode::AngArcNw, TerrainCode::ArcNw),
            (TerrainCode::AngArcNe, TerrainCode::ArcNe),
            (TerrainCode::AngArcSe, TerrainCode::ArcSe),
            (TerrainCode::AngArcSw, TerrainCode::ArcSw),
        ];
        for (angled, plain) in pairs {
            for heading in [
                Direction::North,
                Direction::East,
                Direction::South,
                Direction::West,
            ] {
                assert_eq!(transition(angled, heading), transition(plain, heading));
            }
        }
    }

    #[test]
    fn arcs_reject_the_other_two_approaches() {
        assert_eq!(
            transition(TerrainCode::ArcNw, Direction::South),
            Transition::Unexpected
        );
        assert_eq!(
            transition(TerrainCode::ArcSe, Direction::West),
            Transition::Unexpected
        );
        assert_eq!(
            transition(TerrainCode::Tunnel, Direction::East),
            Transition::Unexpected
        );
        assert_eq!(
            transition(TerrainCode::Empty, Direction::North),
            Transition::Unexpected
        );
    }
}
