//! Uniform B-spline ("basis") interpolation to SVG path data.
//!
//! Produces the same path a basis-curve line generator emits: the curve
//! starts at the first point, ends at the last, and is pulled toward (but
//! does not pass through) the interior points.

#[cfg(test)]
#[path = "curve_test.rs"]
mod curve_test;

use crate::geometry::Point;

/// Build SVG path data for a basis curve through `points`.
///
/// Zero points yield an empty string, one point a closed zero-length path,
/// two points a straight segment.
#[must_use]
pub fn basis_path(points: &[Point]) -> String {
    let mut path = PathBuilder::default();
    let Some(first) = points.first() else {
        return String::new();
    };
    path.move_to(*first);

    match points {
        [_] => path.close(),
        [_, b] => path.line_to(*b),
        _ => {
            let (mut p0, mut p1) = (points[0], points[1]);
            path.line_to(Point::new((5.0 * p0.x + p1.x) / 6.0, (5.0 * p0.y + p1.y) / 6.0));
            for &p in &points[2..] {
                path.basis_segment(p0, p1, p);
                p0 = p1;
                p1 = p;
            }
            path.basis_segment(p0, p1, p1);
            path.line_to(p1);
        }
    }
    path.finish()
}

#[derive(Default)]
struct PathBuilder {
    d: String,
}

impl PathBuilder {
    fn move_to(&mut self, p: Point) {
        self.d.push_str(&format!("M{},{}", p.x, p.y));
    }

    fn line_to(&mut self, p: Point) {
        self.d.push_str(&format!("L{},{}", p.x, p.y));
    }

    fn close(&mut self) {
        self.d.push('Z');
    }

    /// One cubic segment of the uniform B-spline defined by three
    /// consecutive control points.
    fn basis_segment(&mut self, p0: Point, p1: Point, p: Point) {
        let c1 = Point::new((2.0 * p0.x + p1.x) / 3.0, (2.0 * p0.y + p1.y) / 3.0);
        let c2 = Point::new((p0.x + 2.0 * p1.x) / 3.0, (p0.y + 2.0 * p1.y) / 3.0);
        let end = Point::new((p0.x + 4.0 * p1.x + p.x) / 6.0, (p0.y + 4.0 * p1.y + p.y) / 6.0);
        self.d.push_str(&format!("C{},{},{},{},{},{}", c1.x, c1.y, c2.x, c2.y, end.x, end.y));
    }

    fn finish(self) -> String {
        self.d
    }
}
