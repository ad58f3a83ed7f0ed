//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Classification of a surface struck by a beam ray.
///
/// Decided once at the scene-query boundary; the beam pipeline matches on
/// this tag and never re-inspects the struck entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// A regular enemy: damage routes to the entity's own health.
    Enemy,
    /// An exposed boss weak point: damage routes to the owning boss.
    WeakPoint,
    /// A mirror surface: the ray reflects instead of depositing exposure.
    Mirror,
    /// Anything else (walls, closed weak points, scenery): absorbs the ray.
    Obstacle,
}

impl SurfaceKind {
    /// Whether exposure to this surface deals damage.
    pub fn is_damageable(&self) -> bool {
        matches!(self, SurfaceKind::Enemy | SurfaceKind::WeakPoint)
    }
}

/// Which flashlight preset is equipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashlightKind {
    /// Wide cone: short range, broad coverage.
    #[default]
    Wide,
    /// Laser: near-zero width, long range, high intensity.
    Laser,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    MissionComplete,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}
