//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{FlashlightKind, SurfaceKind};
use crate::types::ColliderShape;

/// Health pool of a damageable entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }
}

/// A beam-intersectable surface: shape plus its classification tag.
///
/// The tag is what the scene query reports to the beam pipeline; systems
/// may rewrite it (a closed weak point is reclassified as `Obstacle`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub shape: ColliderShape,
    pub kind: SurfaceKind,
}

/// The flashlight carried by the player: aim state only. Beam parameters
/// live in the engine-owned rig so they can settle between presets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Flashlight {
    /// Current rotation in radians (forward = `(-sin r, cos r)`).
    pub rotation: f32,
    /// World point the beam is steering toward.
    pub aim_target: Vec2,
}

/// Enemy behavior state. Timers advance once per tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyAi {
    pub base_speed: f32,
    pub detection_range: f32,
    pub facing_right: bool,
    pub chasing: bool,
    /// Accumulates while a chasing enemy is held at a wall; teleports when
    /// it reaches the cooldown.
    pub teleport_timer: f32,
    pub teleport_cooldown: f32,
}

/// Boss weak point rotation state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Boss {
    /// Seconds between weak point rotations.
    pub change_interval: f32,
    /// Seconds since the last rotation.
    pub since_change: f32,
}

/// Marks a weak point collider and whether it is currently exposed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeakPoint {
    pub open: bool,
}

/// A rectangular area that spawns enemies on an interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnArea {
    /// Half the horizontal extent of the area.
    pub half_width: f32,
    pub interval: f32,
    pub since_spawn: f32,
}

/// A flashlight preset the live beam parameters settle toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlashlightPreset {
    pub kind: FlashlightKind,
    pub density: f32,
    pub width_deg: f32,
    pub range: f32,
    pub intensity: f32,
    pub color: [f32; 4],
}

/// Preset for the default wide cone.
pub const WIDE_PRESET: FlashlightPreset = FlashlightPreset {
    kind: FlashlightKind::Wide,
    density: 1.5,
    width_deg: 20.0,
    range: 10.0,
    intensity: 7.0,
    color: [1.0, 0.94, 0.55, 1.0],
};

/// Preset for the focused laser.
pub const LASER_PRESET: FlashlightPreset = FlashlightPreset {
    kind: FlashlightKind::Laser,
    density: 1.5,
    width_deg: 0.1,
    range: 100.0,
    intensity: 20.0,
    color: [1.0, 0.0, 0.0, 1.0],
};

impl FlashlightKind {
    pub fn preset(&self) -> FlashlightPreset {
        match self {
            FlashlightKind::Wide => WIDE_PRESET,
            FlashlightKind::Laser => LASER_PRESET,
        }
    }
}

/// Marks the player entity (its colliders are excluded from beam casts).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks an enemy entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;
