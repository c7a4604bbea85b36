//! Decomposition of rectilinear polygons into rectangles.

use std::collections::BTreeSet;

use glam::IVec2;
use mazemap_core::Rect;

/// Converts a simple closed polygon with axis-aligned edges into rectangles.
///
/// `polygon` lists the corners in order without repeating the first one.
/// Implementations return non-overlapping rectangles whose union is the
/// polygon's interior.
pub trait RectangleDecomposer {
    /// Covers the polygon with rectangles.
    fn decompose(&self, polygon: &[IVec2]) -> Vec<Rect>;
}

/// Cuts the polygon into vertical slabs at every distinct corner x coordinate.
///
/// Within a slab the horizontal edges crossing it bound the covered spans;
/// spans of neighbouring slabs with equal vertical extent are merged.
#[derive(Clone, Copy, Debug, Default)]
pub struct SlabDecomposer;

impl RectangleDecomposer for SlabDecomposer {
    fn decompose(&self, polygon: &[IVec2]) -> Vec<Rect> {
        if polygon.len() < 4 {
            return Vec::new();
        }
        let edges: Vec<(IVec2, IVec2)> = polygon
            .iter()
            .zip(polygon.iter().cycle().skip(1))
            .filter(|(from, to)| from.y == to.y && from.x != to.x)
            .map(|(from, to)| (*from, *to))
            .collect();
        let xs: BTreeSet<i32> = polygon.iter().map(|point| point.x).collect();
        let xs: Vec<i32> = xs.into_iter().collect();

        let mut rectangles: Vec<Rect> = Vec::new();
        for slab in xs.windows(2) {
            let (left, right) = (slab[0], slab[1]);
            let mut crossings: Vec<i32> = edges
                .iter()
                .filter(|(from, to)| from.x.min(to.x) <= left && from.x.max(to.x) >= right)
                .map(|(from, _)| from.y)
                .collect();
            crossings.sort_unstable();
            for span in crossings.chunks_exact(2) {
                extend_or_push(&mut rectangles, left, right, span[0], span[1]);
            }
        }
        rectangles
    }
}

fn extend_or_push(rectangles: &mut Vec<Rect>, left: i32, right: i32, top: i32, bottom: i32) {
    let height = bottom - top;
    let adjoining = rectangles
        .iter_mut()
        .find(|rect| rect.x() + rect.width() == left && rect.y() == top && rect.height() == height);
    match adjoining {
        Some(rect) => *rect = Rect::new(rect.x(), top, right - rect.x(), height),
        None => rectangles.push(Rect::new(left, top, right - left, height)),
    }
}
