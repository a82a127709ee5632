// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit areas: geometric predicates tested in a node's local space.

use kurbo::{Circle, Point, Rect, Size};

/// Shape used to decide whether a local point hits a node.
///
/// Boundaries are excluded from both shapes: rectangles are half-open on their far
/// edges and circles contain only points strictly inside the radius.
#[derive(Clone, Debug, PartialEq)]
pub enum HitArea {
    /// Axis-aligned rectangle in local coordinates.
    Rect(Rect),
    /// Circle in local coordinates.
    Circle(Circle),
}

impl HitArea {
    /// Rectangle with its origin at (`x`, `y`) and the given size.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::Rect(Rect::from_origin_size((x, y), Size::new(width, height)))
    }

    /// Circle centered at (`cx`, `cy`).
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Self::Circle(Circle::new((cx, cy), radius))
    }

    /// Containment test in local space.
    pub fn contains_point(&self, p: Point) -> bool {
        match self {
            Self::Rect(r) => r.x0 <= p.x && p.x < r.x1 && r.y0 <= p.y && p.y < r.y1,
            Self::Circle(c) => (p - c.center).hypot2() < c.radius * c.radius,
        }
    }

    /// Axis-aligned bounds of the shape in local space.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect(r) => *r,
            Self::Circle(c) => Rect::new(
                c.center.x - c.radius,
                c.center.y - c.radius,
                c.center.x + c.radius,
                c.center.y + c.radius,
            ),
        }
    }
}

impl From<Rect> for HitArea {
    fn from(r: Rect) -> Self {
        Self::Rect(r.abs())
    }
}

impl From<Circle> for HitArea {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_half_open() {
        let r = HitArea::rect(0.0, 0.0, 100.0, 100.0);
        assert!(r.contains_point(Point::new(0.0, 0.0)));
        assert!(r.contains_point(Point::new(99.0, 99.0)));
        assert!(r.contains_point(Point::new(99.999, 0.0)));
        assert!(!r.contains_point(Point::new(100.0, 0.0)));
        assert!(!r.contains_point(Point::new(0.0, 100.0)));
        assert!(!r.contains_point(Point::new(-0.001, 50.0)));
    }

    #[test]
    fn circle_excludes_its_boundary() {
        let c = HitArea::circle(50.0, 50.0, 20.0);
        assert!(c.contains_point(Point::new(69.9, 50.0)));
        assert!(c.contains_point(Point::new(50.0, 50.0)));
        assert!(!c.contains_point(Point::new(70.0, 50.0)));
        assert!(!c.contains_point(Point::new(50.0, 30.0)));
    }

    #[test]
    fn negative_sizes_normalize() {
        let r = HitArea::rect(10.0, 10.0, -10.0, -10.0);
        assert!(r.contains_point(Point::new(0.0, 0.0)));
        assert!(!r.contains_point(Point::new(10.0, 5.0)));
        let from: HitArea = Rect::new(10.0, 10.0, 0.0, 0.0).into();
        assert_eq!(from.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn circle_bounds() {
        let c = HitArea::circle(5.0, 5.0, 2.0);
        assert_eq!(c.bounds(), Rect::new(3.0, 3.0, 7.0, 7.0));
    }
}
