//! Vector outline of one connected wall structure.

use std::cell::OnceCell;

use glam::IVec2;
use mazemap_core::{Rect, TerrainCode};

use crate::{
    inner::inner_polygon,
    rectangles::{RectangleDecomposer, SlabDecomposer},
};

/// One edge of an obstacle outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObstacleSegment {
    start_point: IVec2,
    vector: IVec2,
    counter_clockwise: bool,
    tile_code: TerrainCode,
}

impl ObstacleSegment {
    /// Creates a segment starting at `start_point` and displaced by `vector`.
    #[must_use]
    pub const fn new(
        start_point: IVec2,
        vector: IVec2,
        counter_clockwise: bool,
        tile_code: TerrainCode,
    ) -> Self {
        Self {
            start_point,
            vector,
            counter_clockwise,
            tile_code,
        }
    }

    /// Pixel position where the segment begins.
    #[must_use]
    pub const fn start_point(&self) -> IVec2 {
        self.start_point
    }

    /// Pixel displacement from start to end.
    #[must_use]
    pub const fn vector(&self) -> IVec2 {
        self.vector
    }

    /// Pixel position where the segment ends.
    #[must_use]
    pub fn end_point(&self) -> IVec2 {
        self.start_point + self.vector
    }

    /// Winding of the contour when the segment was traced.
    #[must_use]
    pub const fn counter_clockwise(&self) -> bool {
        self.counter_clockwise
    }

    /// Terrain code of the tile the segment was traced from.
    #[must_use]
    pub const fn tile_code(&self) -> TerrainCode {
        self.tile_code
    }

    /// Whether the segment runs along one axis.
    #[must_use]
    pub const fn is_straight(&self) -> bool {
        self.vector.x == 0 || self.vector.y == 0
    }

    /// Manhattan length of the vector in pixels.
    #[must_use]
    pub const fn length(&self) -> i32 {
        self.vector.x.abs() + self.vector.y.abs()
    }

    /// Whether the segment is a diagonal arc piece.
    #[must_use]
    pub const fn is_diagonal(&self) -> bool {
        !self.is_straight()
    }

    /// Whether the diagonal belongs to a north-west or south-east corner.
    ///
    /// Those corners are split vertical leg first; the other two horizontal
    /// leg first.
    #[must_use]
    pub const fn is_vertical_first(&self) -> bool {
        (self.vector.x < 0) != (self.vector.y < 0)
    }

    /// Point where the two axis-aligned legs of a diagonal meet.
    ///
    /// Straight segments have no corner.
    #[must_use]
    pub fn corner_point(&self) -> Option<IVec2> {
        if self.is_straight() {
            None
        } else if self.is_vertical_first() {
            Some(self.start_point + IVec2::new(0, self.vector.y))
        } else {
            Some(self.start_point + IVec2::new(self.vector.x, 0))
        }
    }
}

/// How the tracer finished an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraceEnd {
    /// The contour came back to its starting tile.
    ReturnedToStart,
    /// The contour ran off the map.
    LeftMap,
    /// The contour ran into a tile that had already been traced.
    Stalled,
    /// The contour reached a tile that cannot continue it.
    Broken,
    /// The step limit was reached before the contour ended.
    BailedOut,
}

/// Polygonal outline traced from the terrain, open or closed.
#[derive(Clone, Debug)]
pub struct Obstacle {
    start_point: IVec2,
    segments: Vec<ObstacleSegment>,
    border: bool,
    trace_end: Option<TraceEnd>,
    inner_rectangles: OnceCell<Vec<Rect>>,
}

impl Obstacle {
    /// Creates an obstacle without segments.
    #[must_use]
    pub fn new(start_point: IVec2) -> Self {
        Self {
            start_point,
            segments: Vec::new(),
            border: false,
            trace_end: None,
            inner_rectangles: OnceCell::new(),
        }
    }

    /// Pixel position of the first segment's start.
    #[must_use]
    pub const fn start_point(&self) -> IVec2 {
        self.start_point
    }

    /// Start point plus the sum of all segment vectors.
    #[must_use]
    pub fn end_point(&self) -> IVec2 {
        self.segments
            .last()
            .map_or(self.start_point, ObstacleSegment::end_point)
    }

    /// Segments in tracing order.
    #[must_use]
    pub fn segments(&self) -> &[ObstacleSegment] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Appends a segment starting at the current end point.
    pub fn add_segment(&mut self, vector: IVec2, counter_clockwise: bool, tile_code: TerrainCode) {
        let segment = ObstacleSegment::new(self.end_point(), vector, counter_clockwise, tile_code);
        self.segments.push(segment);
        self.inner_rectangles = OnceCell::new();
    }

    /// Whether the outline ends where it starts.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        !self.segments.is_empty() && self.end_point() == self.start_point
    }

    /// Whether the obstacle touches or starts at the map's outer edge.
    #[must_use]
    pub const fn is_border_obstacle(&self) -> bool {
        self.border
    }

    /// Marks the obstacle as part of the map border.
    pub fn set_border_obstacle(&mut self, border: bool) {
        self.border = border;
    }

    /// How tracing ended, or `None` for obstacles assembled by hand.
    #[must_use]
    pub const fn trace_end(&self) -> Option<TraceEnd> {
        self.trace_end
    }

    pub(crate) fn set_trace_end(&mut self, trace_end: TraceEnd) {
        self.trace_end = Some(trace_end);
    }

    /// Whether tracing ran to a natural end.
    ///
    /// Outlines that stalled on an explored tile, broke on unexpected
    /// terrain, or hit the step limit are incomplete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !matches!(
            self.trace_end,
            Some(TraceEnd::Stalled | TraceEnd::Broken | TraceEnd::BailedOut)
        )
    }

    /// One character per segment, `'a'` plus the segment's tile code byte.
    ///
    /// Obstacles of identical shape share an encoding regardless of position.
    #[must_use]
    pub fn encoding(&self) -> String {
        self.segments
            .iter()
            .map(|segment| char::from(b'a' + segment.tile_code().to_byte()))
            .collect()
    }

    /// Pixel length of the outline, diagonals counted along both legs.
    #[must_use]
    pub fn outline_length(&self) -> i32 {
        self.segments.iter().map(ObstacleSegment::length).sum()
    }

    /// Leg intersection of every diagonal segment, in tracing order.
    #[must_use]
    pub fn corner_points(&self) -> Vec<IVec2> {
        self.segments
            .iter()
            .filter_map(ObstacleSegment::corner_point)
            .collect()
    }

    /// Axis-aligned polygon enclosed by a closed obstacle.
    ///
    /// Empty for open obstacles and for outlines that enclose no area.
    #[must_use]
    pub fn inner_area_polygon(&self) -> Vec<IVec2> {
        if !self.is_closed() {
            return Vec::new();
        }
        inner_polygon(self.start_point, &self.segments)
    }

    /// Rectangles covering the enclosed area, computed once and cached.
    ///
    /// Returns `None` for open obstacles. Adding a segment drops the cache.
    #[must_use]
    pub fn inner_area_rectangles(&self) -> Option<&[Rect]> {
        if !self.is_closed() {
            return None;
        }
        let rectangles = self.inner_rectangles.get_or_init(|| {
            self.inner_area_rectangles_with(&SlabDecomposer)
                .unwrap_or_default()
        });
        Some(rectangles.as_slice())
    }

    /// Rectangles covering the enclosed area using a custom decomposer.
    #[must_use]
    pub fn inner_area_rectangles_with(&self, decomposer: &dyn RectangleDecomposer) -> Option<Vec<Rect>> {
        self.is_closed()
            .then(|| decomposer.decompose(&self.inner_area_polygon()))
    }

    /// Copy with runs of equally directed straight segments merged.
    ///
    /// A merged segment keeps the winding and tile code of the first segment
    /// of its run. Diagonal segments are kept as they are.
    #[must_use]
    pub fn optimized(&self) -> Self {
        let mut segments: Vec<ObstacleSegment> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segments.last_mut() {
                Some(last)
                    if segment.is_straight()
                        && last.is_straight()
                        && last.vector().signum() == segment.vector().signum() =>
                {
                    last.vector += segment.vector();
                }
                _ => segments.push(*segment),
            }
        }
        Self {
            start_point: self.start_point,
            segments,
            border: self.border,
            trace_end: self.trace_end,
            inner_rectangles: OnceCell::new(),
        }
    }
}

impl PartialEq for Obstacle {
    fn eq(&self, other: &Self) -> bool {
        self.start_point == other.start_point
            && self.segments == other.segments
            && self.border == other.border
            && self.trace_end == other.trace_end
    }
}

impl Eq for Obstacle {}
