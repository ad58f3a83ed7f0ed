//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D world position (meters). x = right, y = up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// 2D velocity (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Distance to another position in meters.
    pub fn range_to(&self, other: &Position) -> f32 {
        self.0.distance(other.0)
    }
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Speed magnitude (m/s).
    pub fn speed(&self) -> f32 {
        self.0.length()
    }
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f32 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Pose of the beam source: world position plus rotation.
///
/// Rotation is measured so that the beam's forward direction is
/// `(-sin r, cos r)` — rotation 0 points straight up, matching the local
/// beam frame in which an angular offset `a` maps to `(sin a, cos a)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcePose {
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
}

impl SourcePose {
    pub fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }

    /// Rotation expressed as the basis vector `(cos r, sin r)` used to
    /// rotate local beam offsets into world space.
    pub fn rotation_vector(&self) -> Vec2 {
        Vec2::new(self.rotation.cos(), self.rotation.sin())
    }

    /// World-space forward direction of the beam.
    pub fn forward(&self) -> Vec2 {
        Vec2::new(-self.rotation.sin(), self.rotation.cos())
    }
}

/// Tunable parameters describing the shape of the beam fan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamParams {
    /// Spread of ray start points along the rotation vector (the width of
    /// the emitting face, world units).
    pub aperture: f32,
    /// Angular width of the beam in degrees.
    pub width_deg: f32,
    /// Number of rays synthesized per tick. Must be >= 2.
    pub ray_count: u32,
    /// Maximum ray length (world units).
    pub range: f32,
    /// Density exponent biasing ray spacing toward the beam center.
    /// 1.0 = uniform spacing; > 1.0 clusters rays centrally. Must be > 0.
    pub density: f32,
}

/// Collider shapes supported by scene raycasts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum ColliderShape {
    /// Circle of the given radius around the entity position.
    Circle { radius: f32 },
    /// Axis-aligned box with the given half extents around the entity position.
    Rect { half: Vec2 },
    /// Line segment with endpoints relative to the entity position
    /// (used for walls and mirror surfaces; intersectable from both sides).
    Segment { a: Vec2, b: Vec2 },
}

/// Wrap an angle to the range (-PI, PI].
pub fn wrap_angle(a: f32) -> f32 {
    let tau = std::f32::consts::TAU;
    let wrapped = a.rem_euclid(tau);
    if wrapped > std::f32::consts::PI {
        wrapped - tau
    } else {
        wrapped
    }
}

/// Move `current` toward `target` by `factor` of the shortest angular arc.
pub fn approach_angle(current: f32, target: f32, factor: f32) -> f32 {
    current + wrap_angle(target - current) * factor
}
