//! Point containment and scanline queries against polygon boundaries.
//!
//! These run once per candidate seat position, so they stay allocation-free
//! where possible.

use crate::geometry::Point;

/// Test if a point is inside a polygon using ray casting.
///
/// Casts a ray to the right and counts edge crossings.
/// Odd crossings = inside, even = outside.
#[inline]
pub fn point_in_polygon(px: f64, py: f64, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }

        j = i;
    }

    inside
}

/// All X coordinates where the horizontal line at `y` crosses the polygon
/// boundary, sorted ascending.
pub fn scanline_crossings(y: f64, polygon: &[Point]) -> Vec<f64> {
    let n = polygon.len();
    if n < 3 {
        return Vec::new();
    }

    let mut crossings = Vec::with_capacity(4);
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        // Half-open test avoids double-counting a crossing at a shared vertex.
        if (yi > y) != (yj > y) {
            crossings.push(xi + (y - yi) * (xj - xi) / (yj - yi));
        }

        j = i;
    }

    crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    crossings
}

/// Usable horizontal span of the polygon at height `y`.
///
/// Returns the leftmost/rightmost boundary crossings, so concave shapes get
/// their full extent rather than one lobe. None means the scanline misses
/// the polygon entirely.
pub fn span_at_y(y: f64, polygon: &[Point]) -> Option<(f64, f64)> {
    let crossings = scanline_crossings(y, polygon);
    if crossings.len() < 2 {
        return None;
    }
    Some((crossings[0], crossings[crossings.len() - 1]))
}
