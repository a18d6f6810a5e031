//! Core geometry types for seat placement.
//!
//! Coordinates are section-local Cartesian values in the venue's coordinate
//! space; the engine attaches no fixed unit to them. Y grows away from the
//! stage, so "toward the stage" means negative Y.

use serde::{Deserialize, Serialize};

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Rotate this point about a pivot by an angle in radians.
    #[inline]
    pub fn rotated_about(&self, pivot: Point, radians: f64) -> Point {
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point::new(
            pivot.x + dx * radians.cos() - dy * radians.sin(),
            pivot.y + dx * radians.sin() + dy * radians.cos(),
        )
    }
}

/// An axis-aligned rectangle defined by two corner points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Create a rectangle from any two opposite corners.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min.x && x <= self.max.x && y >= self.min.y && y <= self.max.y
    }
}

/// A simple polygon: an ordered outer boundary with no holes.
///
/// Obstructions are modeled as separate regions on the section rather than
/// as polygon holes, so a plain vertex list is all a section shape needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub outer: Vec<Point>,
}

impl Polygon {
    pub fn new(outer: Vec<Point>) -> Self {
        Self { outer }
    }

    /// A polygon needs at least 3 vertices to bound any area.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.outer.len() < 3
    }

    /// Axis-aligned bounding box, or None for an empty vertex list.
    pub fn bounding_box(&self) -> Option<Rect> {
        if self.outer.is_empty() {
            return None;
        }

        let min_x = self.outer.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = self.outer.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = self.outer.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = self.outer.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        Some(Rect {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        })
    }

    /// Signed area via the shoelace formula.
    ///
    /// Positive for counter-clockwise winding, negative for clockwise;
    /// the absolute value is the enclosed area.
    pub fn signed_area(&self) -> f64 {
        let n = self.outer.len();
        if n < 3 {
            return 0.0;
        }

        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.outer[i].x * self.outer[j].y;
            area -= self.outer[j].x * self.outer[i].y;
        }
        area / 2.0
    }

    /// Area-weighted centroid, falling back to the vertex mean when the
    /// polygon encloses no area.
    pub fn centroid(&self) -> Option<Point> {
        let n = self.outer.len();
        if n == 0 {
            return None;
        }

        let area = self.signed_area();
        if area.abs() < 1e-10 {
            let sx: f64 = self.outer.iter().map(|p| p.x).sum();
            let sy: f64 = self.outer.iter().map(|p| p.y).sum();
            return Some(Point::new(sx / n as f64, sy / n as f64));
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            let cross = self.outer[i].x * self.outer[j].y - self.outer[j].x * self.outer[i].y;
            cx += (self.outer[i].x + self.outer[j].x) * cross;
            cy += (self.outer[i].y + self.outer[j].y) * cross;
        }
        Some(Point::new(cx / (6.0 * area), cy / (6.0 * area)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0); // 3-4-5 triangle
    }

    #[test]
    fn point_rotation_quarter_turn() {
        let p = Point::new(10.0, 0.0);
        let r = p.rotated_about(Point::new(0.0, 0.0), std::f64::consts::FRAC_PI_2);
        assert!((r.x - 0.0).abs() < 1e-10, "x should be ~0, got {}", r.x);
        assert!((r.y - 10.0).abs() < 1e-10, "y should be ~10, got {}", r.y);
    }

    #[test]
    fn rect_normalizes_corners() {
        let r = Rect::new(Point::new(10.0, 20.0), Point::new(0.0, 5.0));
        assert_eq!(r.min, Point::new(0.0, 5.0));
        assert_eq!(r.max, Point::new(10.0, 20.0));
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 15.0);
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(r.contains(0.0, 0.0), "corner is inside");
        assert!(r.contains(5.0, 10.0), "edge is inside");
        assert!(!r.contains(10.1, 5.0));
    }

    #[test]
    fn polygon_bbox() {
        let poly = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(0.0, 5.0),
        ]);
        let bbox = poly.bounding_box().unwrap();
        assert_eq!(bbox.min, Point::new(0.0, 0.0));
        assert_eq!(bbox.max, Point::new(10.0, 5.0));
    }

    #[test]
    fn empty_polygon_bbox() {
        let poly = Polygon::new(vec![]);
        assert_eq!(poly.bounding_box(), None);
        assert!(poly.is_degenerate());
    }

    #[test]
    fn signed_area_square() {
        let ccw = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        assert!((ccw.signed_area() - 100.0).abs() < 1e-10);

        let cw = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ]);
        assert!((cw.signed_area() + 100.0).abs() < 1e-10);
    }

    #[test]
    fn centroid_of_square() {
        let poly = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        let c = poly.centroid().unwrap();
        assert!((c.x - 5.0).abs() < 1e-10);
        assert!((c.y - 5.0).abs() < 1e-10);
    }

    #[test]
    fn centroid_of_triangle() {
        let poly = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(9.0, 0.0),
            Point::new(0.0, 9.0),
        ]);
        let c = poly.centroid().unwrap();
        assert!((c.x - 3.0).abs() < 1e-10);
        assert!((c.y - 3.0).abs() < 1e-10);
    }
}
