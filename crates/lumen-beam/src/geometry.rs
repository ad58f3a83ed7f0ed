//! Geometry synthesizer — builds the per-tick ray fan from beam parameters.
//!
//! Ray spacing is controlled by a density exponent: a linear angular sweep
//! is warped through `sign(l) * |l|^d / w^(d-1)`, which leaves the extremes
//! in place while compressing spacing toward the beam center for `d > 1`.
//! Start points are spread across the emitting face along the source's
//! rotation vector, warped the same way.

use glam::Vec2;
use thiserror::Error;

use lumen_core::types::{BeamParams, SourcePose};

/// A cast segment. Immutable once generated; the fan is rebuilt every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub start: Vec2,
    pub end: Vec2,
}

impl Ray {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Normalized direction, or `None` for a degenerate zero-length ray.
    pub fn direction(&self) -> Option<Vec2> {
        let d = self.end - self.start;
        if d.length_squared() > 0.0 {
            Some(d.normalize())
        } else {
            None
        }
    }
}

/// Beam parameters the synthesizer refuses to run with.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BeamError {
    #[error("beam needs at least 2 rays, got {0}")]
    TooFewRays(u32),
    #[error("beam density must be positive, got {0}")]
    NonPositiveDensity(f32),
}

/// Produce exactly `ray_count` rays for the given pose.
///
/// Pure and deterministic: identical inputs yield identical fans.
pub fn synthesize_rays(params: &BeamParams, pose: &SourcePose) -> Result<Vec<Ray>, BeamError> {
    if params.ray_count < 2 {
        return Err(BeamError::TooFewRays(params.ray_count));
    }
    if params.density <= 0.0 {
        return Err(BeamError::NonPositiveDensity(params.density));
    }

    let rot = pose.rotation_vector();
    let count = params.ray_count as f32;
    let mut rays = Vec::with_capacity(params.ray_count as usize);

    for i in 0..params.ray_count {
        let i = i as f32;

        // Start point: linear sweep across the emitting face, density-warped,
        // offset along the rotation vector.
        let start_linear = params.aperture - 2.0 * i * (params.aperture / count);
        let start_offset = density_warp(start_linear, params.aperture, params.density);
        let start = pose.position + rot * start_offset;

        // End point: the warped angular value becomes a local-frame offset
        // (sin a, cos a) * range, rotated into world space.
        let end_linear = params.width_deg - 2.0 * i * (params.width_deg / count);
        let angle = density_warp(end_linear, params.width_deg, params.density).to_radians();
        let bend = Vec2::new(angle.sin() * params.range, angle.cos() * params.range);
        let end = start + Vec2::new(bend.x * rot.x - bend.y * rot.y, bend.x * rot.y + bend.y * rot.x);

        rays.push(Ray { start, end });
    }

    Ok(rays)
}

/// Sign-preserving density warp. `density = 1` is the identity; higher
/// values compress spacing toward zero while fixing the endpoints at
/// `±width`.
fn density_warp(linear: f32, width: f32, density: f32) -> f32 {
    // A zero-width sweep collapses onto the axis.
    if width <= 0.0 {
        return 0.0;
    }
    linear.signum() * linear.abs().powf(density) / width.powf(density - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(ray_count: u32, width_deg: f32, density: f32) -> BeamParams {
        BeamParams {
            aperture: 0.0,
            width_deg,
            ray_count,
            range: 10.0,
            density,
        }
    }

    /// Recover a ray's angular offset in the beam's local frame (pose
    /// rotation 0: local x = world x, local forward = world +Y).
    fn local_angle(ray: &Ray) -> f32 {
        let d = ray.end - ray.start;
        d.x.atan2(d.y)
    }

    #[test]
    fn test_synthesizer_is_pure() {
        let p = BeamParams {
            aperture: 45.0,
            width_deg: 20.0,
            ray_count: 100,
            range: 10.0,
            density: 1.5,
        };
        let pose = SourcePose::new(Vec2::new(3.0, -2.0), 0.7);
        let a = synthesize_rays(&p, &pose).unwrap();
        let b = synthesize_rays(&p, &pose).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ray_count_and_range() {
        let p = params(17, 20.0, 1.0);
        let rays = synthesize_rays(&p, &SourcePose::default()).unwrap();
        assert_eq!(rays.len(), 17);
        for ray in &rays {
            assert!((ray.length() - p.range).abs() < 1e-3);
        }
    }

    #[test]
    fn test_config_rejected() {
        let pose = SourcePose::default();
        assert_eq!(
            synthesize_rays(&params(1, 20.0, 1.0), &pose),
            Err(BeamError::TooFewRays(1))
        );
        assert_eq!(
            synthesize_rays(&params(0, 20.0, 1.0), &pose),
            Err(BeamError::TooFewRays(0))
        );
        assert_eq!(
            synthesize_rays(&params(10, 20.0, 0.0), &pose),
            Err(BeamError::NonPositiveDensity(0.0))
        );
        assert_eq!(
            synthesize_rays(&params(10, 20.0, -1.5), &pose),
            Err(BeamError::NonPositiveDensity(-1.5))
        );
    }

    /// density = 1 yields uniform angular spacing.
    #[test]
    fn test_density_one_uniform_spacing() {
        let rays = synthesize_rays(&params(9, 30.0, 1.0), &SourcePose::default()).unwrap();
        let angles: Vec<f32> = rays.iter().map(local_angle).collect();
        let first_gap = angles[0] - angles[1];
        for pair in angles.windows(2) {
            let gap = pair[0] - pair[1];
            assert!(
                (gap - first_gap).abs() < 1e-4,
                "spacing should be uniform, got {gap} vs {first_gap}"
            );
        }
    }

    /// density > 1 bunches rays toward the beam center: gaps grow
    /// monotonically from the center out.
    #[test]
    fn test_density_clusters_center() {
        let rays = synthesize_rays(&params(12, 30.0, 2.0), &SourcePose::default()).unwrap();
        let angles: Vec<f32> = rays.iter().map(local_angle).collect();
        let gaps: Vec<f32> = angles.windows(2).map(|p| p[0] - p[1]).collect();

        // Gaps on the positive side of the sweep shrink toward the center...
        let center = gaps.len() / 2;
        for i in 0..center {
            assert!(
                gaps[i] >= gaps[i + 1] - 1e-5,
                "gap {i} should not be smaller than the next toward center"
            );
        }
        // ...and grow again past it.
        for i in center..gaps.len() - 1 {
            assert!(
                gaps[i] <= gaps[i + 1] + 1e-5,
                "gap {i} should not be larger than the next toward the edge"
            );
        }
    }

    /// Start points spread along the rotation vector, not across it.
    #[test]
    fn test_aperture_spread() {
        let p = BeamParams {
            aperture: 45.0,
            width_deg: 20.0,
            ray_count: 10,
            range: 10.0,
            density: 1.0,
        };
        let rays = synthesize_rays(&p, &SourcePose::default()).unwrap();
        let mut last_x = f32::INFINITY;
        for ray in &rays {
            assert!(ray.start.y.abs() < 1e-5);
            assert!(ray.start.x < last_x, "start offsets should sweep downward");
            last_x = ray.start.x;
        }
        assert!((rays[0].start.x - 45.0).abs() < 1e-3);
    }

    /// The whole fan rotates with the source.
    #[test]
    fn test_rotation_carries_fan() {
        let p = params(5, 10.0, 1.0);
        // Rotation -90 degrees points the beam along +X.
        let pose = SourcePose::new(Vec2::ZERO, -std::f32::consts::FRAC_PI_2);
        let rays = synthesize_rays(&p, &pose).unwrap();
        let mid = &rays[2];
        let dir = mid.direction().unwrap();
        assert!(
            dir.x > 0.99,
            "central ray should point along +X, got {dir:?}"
        );
    }
}
