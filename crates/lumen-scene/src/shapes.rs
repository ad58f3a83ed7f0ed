//! Ray intersection against collider shapes.
//!
//! All queries take a normalized direction and a maximum distance and
//! return the nearest entry point with its unit surface normal. Rays that
//! start inside a solid shape miss (the surface has already been passed).

use glam::Vec2;

use lumen_core::types::ColliderShape;

/// Parallel-line rejection threshold for segment intersection.
const PARALLEL_EPSILON: f32 = 1e-9;

/// Result of a successful raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the intersection point.
    pub distance: f32,
    /// World-space intersection point.
    pub point: Vec2,
    /// Unit surface normal at the intersection, facing the ray origin.
    pub normal: Vec2,
}

/// Cast a ray against a shape positioned at `center`.
///
/// `dir` must be normalized. Returns `None` for degenerate directions,
/// misses, and hits beyond `max_dist`.
pub fn raycast_shape(
    shape: &ColliderShape,
    center: Vec2,
    origin: Vec2,
    dir: Vec2,
    max_dist: f32,
) -> Option<RayHit> {
    if !dir.is_finite() || dir.length_squared() < PARALLEL_EPSILON {
        return None;
    }

    match *shape {
        ColliderShape::Circle { radius } => raycast_circle(center, radius, origin, dir, max_dist),
        ColliderShape::Rect { half } => raycast_rect(center, half, origin, dir, max_dist),
        ColliderShape::Segment { a, b } => {
            raycast_segment(center + a, center + b, origin, dir, max_dist)
        }
    }
}

fn raycast_circle(
    center: Vec2,
    radius: f32,
    origin: Vec2,
    dir: Vec2,
    max_dist: f32,
) -> Option<RayHit> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    // Nearest root; negative means the entry point is behind the origin
    // (or the origin is inside the circle).
    let t = -b - discriminant.sqrt();
    if t < 0.0 || t > max_dist {
        return None;
    }

    let point = origin + dir * t;
    Some(RayHit {
        distance: t,
        point,
        normal: (point - center) / radius,
    })
}

fn raycast_rect(
    center: Vec2,
    half: Vec2,
    origin: Vec2,
    dir: Vec2,
    max_dist: f32,
) -> Option<RayHit> {
    let min = center - half;
    let max = center + half;

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec2::ZERO;

    for axis in 0..2 {
        let (o, d, lo, hi) = if axis == 0 {
            (origin.x, dir.x, min.x, max.x)
        } else {
            (origin.y, dir.y, min.y, max.y)
        };

        if d.abs() < PARALLEL_EPSILON {
            // Parallel to this slab: must already be within it.
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let (t1, t2) = {
            let a = (lo - o) * inv;
            let b = (hi - o) * inv;
            if a < b {
                (a, b)
            } else {
                (b, a)
            }
        };

        if t1 > t_enter {
            t_enter = t1;
            normal = if axis == 0 {
                Vec2::new(-d.signum(), 0.0)
            } else {
                Vec2::new(0.0, -d.signum())
            };
        }
        t_exit = t_exit.min(t2);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_enter < 0.0 || t_enter > max_dist {
        return None;
    }

    Some(RayHit {
        distance: t_enter,
        point: origin + dir * t_enter,
        normal,
    })
}

fn raycast_segment(p: Vec2, q: Vec2, origin: Vec2, dir: Vec2, max_dist: f32) -> Option<RayHit> {
    let v = q - p;
    let denom = dir.perp_dot(v);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let w = p - origin;
    let t = w.perp_dot(v) / denom;
    let s = w.perp_dot(dir) / denom;
    if t < 0.0 || t > max_dist || !(0.0..=1.0).contains(&s) {
        return None;
    }

    // Segments are two-sided; orient the normal against the ray.
    let mut normal = v.perp().normalize();
    if normal.dot(dir) > 0.0 {
        normal = -normal;
    }

    Some(RayHit {
        distance: t,
        point: origin + dir * t,
        normal,
    })
}
