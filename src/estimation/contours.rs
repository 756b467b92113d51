//! Contour extraction and roof-segment filtering on a binary edge mask

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::point::Point;
use log::debug;

use crate::config::EstimatorConfig;

/// Outcome of scanning one edge mask
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContourSummary {
    /// Borders found, outer and hole alike
    pub total: usize,
    /// Borders that passed the vertex and area filters
    pub qualifying: usize,
    /// Summed area of qualifying borders, in square pixels
    pub pixel_area: f64,
}

/// Enclosed area of a closed polygon (shoelace), orientation ignored
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut twice_area: i64 = 0;
    let n = points.len();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice_area += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }

    twice_area.abs() as f64 * 0.5
}

fn distance_sq(a: Point<i32>, b: Point<i32>) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

fn farthest_from(points: &[Point<i32>], from: usize) -> usize {
    let origin = points[from];
    let mut best = from;
    let mut best_dist = 0;
    for (i, p) in points.iter().enumerate() {
        let d = distance_sq(origin, *p);
        if d > best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

/// Douglas-Peucker simplification of a closed curve
///
/// The curve is split at two mutually distant points and each half is
/// simplified as an open chain, so the arbitrary tracing start point does not
/// survive as a vertex. The returned polygon does not repeat its first point.
pub fn simplify_closed(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    if points.len() < 3 || epsilon <= 0.0 {
        return points.to_vec();
    }

    let mut a = 0;
    let mut b = farthest_from(points, a);
    for _ in 0..2 {
        let next = farthest_from(points, b);
        if next == a {
            break;
        }
        a = b;
        b = next;
    }
    if a == b {
        return vec![points[a]];
    }

    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let forward = &points[lo..=hi];
    let wrapped: Vec<Point<i32>> = points[hi..]
        .iter()
        .chain(points[..=lo].iter())
        .copied()
        .collect();

    let mut polygon = approximate_polygon_dp(forward, epsilon, false);
    let mut back = approximate_polygon_dp(&wrapped, epsilon, false);

    // Both halves share the split points.
    polygon.pop();
    back.pop();
    polygon.append(&mut back);
    polygon
}

/// Sums the areas of roof-like borders in an edge mask
///
/// Every border of the full hierarchy is considered. Outer and hole borders
/// of the same edge loop are both counted, so closed loops contribute twice.
pub fn sum_rooftop_pixels(edges: &GrayImage, config: &EstimatorConfig) -> ContourSummary {
    let contours = find_contours::<i32>(edges);
    let mut summary = ContourSummary {
        total: contours.len(),
        ..Default::default()
    };

    let mut holes = 0usize;
    for contour in &contours {
        if matches!(contour.border_type, BorderType::Hole) {
            holes += 1;
        }

        let points = &contour.points;
        if points.len() < config.min_vertices.max(3) {
            continue;
        }

        let perimeter = arc_length(points, true);
        let epsilon = config.approx_epsilon_ratio * perimeter;
        if epsilon <= 0.0 {
            continue;
        }

        let polygon = simplify_closed(points, epsilon);
        if polygon.len() < config.min_vertices {
            continue;
        }

        let area = contour_area(points);
        if area > config.min_contour_area_px {
            summary.qualifying += 1;
            summary.pixel_area += area;
        }
    }

    debug!(
        "contours: {} found ({} hole borders), {} qualifying, {:.1} px²",
        summary.total, holes, summary.qualifying, summary.pixel_area
    );

    summary
}
