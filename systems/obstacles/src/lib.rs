#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Contour tracer turning terrain tiles into vector obstacles.
//!
//! The tracer walks wall and arc tiles one at a time, emitting a segment per
//! tile, and collects the outlines into [`Obstacle`]s. Tracing never fails:
//! a tile whose content does not continue the outline is reported in
//! [`BuildResult::error_tiles`], that outline ends as [`TraceEnd::Broken`] and
//! tracing carries on with the next obstacle.

mod inner;
mod obstacle;
mod rectangles;
mod tracer;

use mazemap_core::{Direction, TerrainCode, Tile, TileBitSet};
use mazemap_world::TerrainLayer;

pub use obstacle::{Obstacle, ObstacleSegment, TraceEnd};
pub use rectangles::{RectangleDecomposer, SlabDecomposer};
pub use tracer::{edge_midpoint, tile_center, tile_origin, transition, Cursor, Transition};

/// Default number of tiles a single trace may visit.
pub const DEFAULT_MAX_TRACE_STEPS: usize = 1000;

/// Tuning knobs for the tracer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceConfig {
    max_steps: usize,
}

impl TraceConfig {
    /// Creates a configuration with the given per-obstacle step limit.
    #[must_use]
    pub const fn new(max_steps: usize) -> Self {
        Self { max_steps }
    }

    /// Tiles a single trace may visit before it is abandoned.
    #[must_use]
    pub const fn max_steps(&self) -> usize {
        self.max_steps
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TRACE_STEPS)
    }
}

/// Obstacles found in a terrain layer plus the tiles that broke tracing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildResult {
    /// Optimized obstacles, border obstacles first, in discovery order.
    pub obstacles: Vec<Obstacle>,
    /// Tiles with unexpected content or approach, in discovery order. Each
    /// tile appears at most once.
    pub error_tiles: Vec<Tile>,
}

impl BuildResult {
    /// Number of obstacles whose outline is closed.
    #[must_use]
    pub fn closed_count(&self) -> usize {
        self.obstacles.iter().filter(|obstacle| obstacle.is_closed()).count()
    }
}

/// Builds obstacles from terrain layers.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObstacleBuilder {
    config: TraceConfig,
}

impl ObstacleBuilder {
    /// Creates a builder using the given configuration.
    #[must_use]
    pub const fn new(config: TraceConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Traces every obstacle of the terrain.
    ///
    /// Border obstacles starting in the outer columns are traced first, then
    /// inner obstacles starting at their north-west corner.
    #[must_use]
    pub fn build_obstacles(&self, terrain: &TerrainLayer) -> BuildResult {
        let result = Tracer::new(terrain, self.config).run();
        tracing::debug!(
            obstacles = result.obstacles.len(),
            closed = result.closed_count(),
            error_tiles = result.error_tiles.len(),
            "traced terrain obstacles"
        );
        for obstacle in result.obstacles.iter().filter(|obstacle| !obstacle.is_complete()) {
            tracing::warn!(
                start = ?obstacle.start_point(),
                end = ?obstacle.trace_end(),
                max_steps = self.config.max_steps(),
                "obstacle trace ended early"
            );
        }
        for tile in &result.error_tiles {
            tracing::warn!(%tile, "unexpected terrain while tracing obstacle");
        }
        result
    }
}

/// Traces every obstacle of the terrain with the default configuration.
#[must_use]
pub fn build_obstacles(terrain: &TerrainLayer) -> BuildResult {
    ObstacleBuilder::default().build_obstacles(terrain)
}

struct Tracer<'a> {
    terrain: &'a TerrainLayer,
    config: TraceConfig,
    explored: TileBitSet,
    reported: TileBitSet,
    result: BuildResult,
}

impl<'a> Tracer<'a> {
    fn new(terrain: &'a TerrainLayer, config: TraceConfig) -> Self {
        Self {
            terrain,
            config,
            explored: TileBitSet::with_capacity(terrain.values().len()),
            reported: TileBitSet::with_capacity(terrain.values().len()),
            result: BuildResult::default(),
        }
    }

    fn run(mut self) -> BuildResult {
        let last_col = self.terrain.num_cols() as i32 - 1;
        let tiles: Vec<Tile> = self.terrain.tiles().collect();

        for &tile in &tiles {
            if self.is_explored(tile) || (tile.col() != 0 && tile.col() != last_col) {
                continue;
            }
            let content = self.content(tile);
            let heading = if tile.col() == 0 {
                matches!(content, TerrainCode::WallH | TerrainCode::ArcSe | TerrainCode::ArcNe)
                    .then_some(Direction::East)
            } else {
                matches!(content, TerrainCode::WallH | TerrainCode::ArcSw | TerrainCode::ArcNw)
                    .then_some(Direction::West)
            };
            if let Some(heading) = heading {
                let mut obstacle = self.trace(tile, heading);
                obstacle.set_border_obstacle(true);
                self.result.obstacles.push(obstacle.optimized());
            }
        }

        let first_non_empty = self.terrain.first_non_empty_tile();
        for &tile in &tiles {
            if self.is_explored(tile)
                || !matches!(self.content(tile), TerrainCode::ArcNw | TerrainCode::AngArcNw)
            {
                continue;
            }
            let mut obstacle = self.trace(tile, Direction::West);
            obstacle.set_border_obstacle(first_non_empty == Some(tile));
            self.result.obstacles.push(obstacle.optimized());
        }

        self.result
    }

    /// Traces one outline entering `start` in `heading`.
    ///
    /// The outline starts at the midpoint of the edge the tracer enters
    /// through; the start tile must accept that approach. Only tiles the
    /// outline passes through are marked explored.
    fn trace(&mut self, start: Tile, mut heading: Direction) -> Obstacle {
        let mut obstacle = Obstacle::new(edge_midpoint(start, heading.opposite()));
        let mut counter_clockwise = heading == Direction::East;

        self.mark_explored(start);
        let end = if self.apply(start, &mut obstacle, &mut heading, &mut counter_clockwise) {
            self.follow(start, heading, &mut obstacle, counter_clockwise)
        } else {
            TraceEnd::Broken
        };
        obstacle.set_trace_end(end);
        obstacle
    }

    fn follow(
        &mut self,
        start: Tile,
        mut heading: Direction,
        obstacle: &mut Obstacle,
        mut counter_clockwise: bool,
    ) -> TraceEnd {
        let mut cursor = Cursor::leaving(start, heading);
        let mut steps = 0;

        loop {
            let tile = cursor.current();
            if tile == start {
                return TraceEnd::ReturnedToStart;
            }
            if steps == self.config.max_steps() {
                return TraceEnd::BailedOut;
            }
            steps += 1;

            if !self.terrain.in_bounds(tile) {
                return TraceEnd::LeftMap;
            }
            if self.is_explored(tile) {
                self.report(tile);
                return TraceEnd::Stalled;
            }
            self.mark_explored(tile);
            if !self.apply(tile, obstacle, &mut heading, &mut counter_clockwise) {
                return TraceEnd::Broken;
            }
            cursor = cursor.advance(heading);
        }
    }

    /// Adds the segment for `tile` to the outline. Returns `false` when the
    /// tile cannot continue it.
    fn apply(
        &mut self,
        tile: Tile,
        obstacle: &mut Obstacle,
        heading: &mut Direction,
        counter_clockwise: &mut bool,
    ) -> bool {
        let content = self.content(tile);
        match transition(content, *heading) {
            Transition::Straight { vector } => {
                obstacle.add_segment(vector, *counter_clockwise, content);
                true
            }
            Transition::Turn {
                vector,
                heading: turned,
                counter_clockwise: winding,
            } => {
                *counter_clockwise = winding;
                *heading = turned;
                obstacle.add_segment(vector, winding, content);
                true
            }
            Transition::Unexpected => {
                self.report(tile);
                false
            }
        }
    }

    fn report(&mut self, tile: Tile) {
        if let Some(index) = self.index(tile) {
            if self.reported.insert(index) {
                self.result.error_tiles.push(tile);
            }
        }
    }

    fn content(&self, tile: Tile) -> TerrainCode {
        self.terrain.content(tile).unwrap_or(TerrainCode::Empty)
    }

    fn index(&self, tile: Tile) -> Option<usize> {
        self.terrain.index(tile).ok()
    }

    fn is_explored(&self, tile: Tile) -> bool {
        self.index(tile).is_some_and(|index| self.explored.contains(index))
    }

    fn mark_explored(&mut self, tile: Tile) {
        if let Some(index) = self.index(tile) {
            let _ = self.explored.insert(index);
        }
    }
}
