//! Planar geometry helpers shared by cells, searches and corridors
//!
//! The navigation surface is treated as a height map over the xz plane, so
//! most containment and funnel tests drop the y-axis and work in 2d
//!

use bevy::prelude::*;

/// General purpose tolerance for planar area and containment tests
pub const TOLERANCE: f32 = 0.0001;
/// Smallest vertical tolerance allowed when snapping a point onto a surface
pub const MIN_PLANE_TOLERANCE: f32 = f32::EPSILON;
/// Upper bound of the corner offset scale, past this corner cutting would
/// overshoot the midline of a wall
pub const MAX_OFFSET_SCALE: f32 = 0.5;

/// Project a point onto the xz plane
pub fn planar(point: Vec3) -> Vec2 {
	Vec2::new(point.x, point.z)
}

/// Twice the signed area of the triangle `(a, b, c)`. Positive when `c` sits
/// counter-clockwise of the ray `a -> b`
pub fn signed_area_x2(a: Vec2, b: Vec2, c: Vec2) -> f32 {
	(b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Find the point on the segment `start -> end` nearest to `point`, measured in 3d
pub fn closest_point_on_segment(point: Vec3, start: Vec3, end: Vec3) -> Vec3 {
	let edge = end - start;
	let length_squared = edge.length_squared();
	if length_squared <= f32::EPSILON {
		return start;
	}
	let t = ((point - start).dot(edge) / length_squared).clamp(0.0, 1.0);
	start + edge * t
}

/// Find the point on the segment `start -> end` nearest to `point` when both
/// are projected onto the xz plane. The y of the result is interpolated along
/// the segment
pub fn closest_point_on_segment_planar(point: Vec3, start: Vec3, end: Vec3) -> Vec3 {
	let edge = planar(end) - planar(start);
	let length_squared = edge.length_squared();
	if length_squared <= f32::EPSILON {
		return start;
	}
	let t = ((planar(point) - planar(start)).dot(edge) / length_squared).clamp(0.0, 1.0);
	start.lerp(end, t)
}

/// Move `from` toward `to` by `factor` of the distance between them
pub fn translate_toward(from: Vec3, to: Vec3, factor: f32) -> Vec3 {
	from + (to - from) * factor
}

/// Whether two points coincide on the xz plane
pub fn planar_eq(a: Vec3, b: Vec3) -> bool {
	(a.x - b.x).abs() <= TOLERANCE && (a.z - b.z).abs() <= TOLERANCE
}
