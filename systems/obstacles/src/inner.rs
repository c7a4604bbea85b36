//! Inner polygon of a closed obstacle, ready for rectangle decomposition.

use glam::IVec2;

use crate::obstacle::ObstacleSegment;

/// Axis-aligned polygon enclosed by the segments, corners in drawing order.
///
/// Arc diagonals are replaced by their two axis-aligned legs, zero-area spurs
/// are cancelled and collinear edges merged. The result does not repeat its
/// first point and is empty when nothing is enclosed.
pub(crate) fn inner_polygon(start_point: IVec2, segments: &[ObstacleSegment]) -> Vec<IVec2> {
    let edges = cancel_inverse_pairs(split_diagonals(segments));
    let (start_point, edges) = trim_wrap_around(start_point, edges);
    let edges = merge_same_direction(edges);

    let mut points = Vec::with_capacity(edges.len() + 1);
    let mut point = start_point;
    points.push(point);
    for edge in edges {
        point += edge;
        points.push(point);
    }
    if points.len() > 1 && points.last() == points.first() {
        let _ = points.pop();
    }
    if points.len() < 4 {
        points.clear();
    }
    points
}

fn split_diagonals(segments: &[ObstacleSegment]) -> Vec<IVec2> {
    let mut edges = Vec::with_capacity(segments.len() * 2);
    for segment in segments {
        let vector = segment.vector();
        if segment.is_straight() {
            edges.push(vector);
        } else if segment.is_vertical_first() {
            edges.push(IVec2::new(0, vector.y));
            edges.push(IVec2::new(vector.x, 0));
        } else {
            edges.push(IVec2::new(vector.x, 0));
            edges.push(IVec2::new(0, vector.y));
        }
    }
    edges
}

fn cancel_inverse_pairs(edges: Vec<IVec2>) -> Vec<IVec2> {
    let mut stack: Vec<IVec2> = Vec::with_capacity(edges.len());
    for edge in edges {
        if stack.last() == Some(&-edge) {
            let _ = stack.pop();
        } else {
            stack.push(edge);
        }
    }
    stack
}

fn trim_wrap_around(mut start_point: IVec2, mut edges: Vec<IVec2>) -> (IVec2, Vec<IVec2>) {
    while edges.len() >= 2 && edges[edges.len() - 1] == -edges[0] {
        start_point += edges[0];
        let _ = edges.pop();
        let _ = edges.remove(0);
    }
    (start_point, edges)
}

fn merge_same_direction(edges: Vec<IVec2>) -> Vec<IVec2> {
    let mut merged: Vec<IVec2> = Vec::with_capacity(edges.len());
    for edge in edges {
        match merged.last_mut() {
            Some(last) if last.signum() == edge.signum() => *last += edge,
            _ => merged.push(edge),
        }
    }
    merged
}
