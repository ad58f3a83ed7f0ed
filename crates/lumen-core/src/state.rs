//! Game state snapshot — the complete visible state sent to the frontend each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{FlashlightKind, GamePhase};
use crate::events::{Alert, GameEvent};
use crate::types::SimTime;

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub flashlight: FlashlightView,
    /// Ray segments cast this tick (primary fan plus walked reflections),
    /// for beam rendering. Not part of the gameplay contract.
    pub rays: Vec<RaySegmentView>,
    pub enemies: Vec<EnemyView>,
    pub boss: Option<BossView>,
    pub score: ScoreView,
    pub events: Vec<GameEvent>,
    pub alerts: Vec<Alert>,
}

/// Flashlight pose and settled beam parameters for rendering the light cone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlashlightView {
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    pub kind: FlashlightKind,
    pub enabled: bool,
    pub width_deg: f32,
    pub range: f32,
    pub density: f32,
    pub intensity: f32,
    pub color: [f32; 4],
}

/// One cast ray segment for debug/beam visualization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RaySegmentView {
    pub start: Vec2,
    pub end: Vec2,
}

/// A visible enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub facing_right: bool,
    pub chasing: bool,
}

/// The boss and its weak point states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub weak_points: Vec<WeakPointView>,
}

/// One boss weak point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeakPointView {
    pub position: Vec2,
    pub open: bool,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub enemies_killed: u32,
    pub enemies_spawned: u32,
    pub damage_dealt: f32,
    pub boss_defeated: bool,
}
