//! Point/circle and point/segment primitives used by hit-testing.

/// Euclidean distance between two points.
pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
	let (dx, dy) = (bx - ax, by - ay);
	(dx * dx + dy * dy).sqrt()
}

/// True if `(px, py)` lies inside or on the circle.
pub fn point_in_circle(px: f64, py: f64, cx: f64, cy: f64, radius: f64) -> bool {
	distance(px, py, cx, cy) <= radius
}

/// Shortest distance from a point to the finite segment `a..b`.
///
/// The projection parameter is clamped to `[0, 1]`, so points past either end
/// measure to the nearest endpoint. A zero-length segment degenerates to the
/// distance to `a`.
pub fn point_segment_distance(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
	let (dx, dy) = (bx - ax, by - ay);
	let len_sq = dx * dx + dy * dy;
	if len_sq < f64::EPSILON {
		return distance(px, py, ax, ay);
	}
	let t = (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0);
	distance(px, py, ax + t * dx, ay + t * dy)
}
