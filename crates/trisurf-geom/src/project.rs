//! Projection of surface points into 2D view coordinates.

use trisurf_math::{homogeneous, Point2, Point3, Transform};

/// View coordinates of a single point: the first two components of
/// `T · [p, 1]`.
pub fn project_point(p: &Point3, forward: &Transform) -> Point2 {
    let v = forward.matrix * homogeneous(p);
    Point2::new(v.x, v.y)
}

/// View coordinates of every point, in input order.
pub fn project_points(points: &[Point3], forward: &Transform) -> Vec<Point2> {
    points.iter().map(|p| project_point(p, forward)).collect()
}
