//! Events emitted by the simulation for audio and UI feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{AlertLevel, FlashlightKind};

/// Gameplay events for the frontend sound/effect system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new enemy entered the arena.
    EnemySpawned { position: Vec2 },
    /// An enemy was burned down to zero health.
    EnemyKilled { position: Vec2 },
    /// An enemy teleported past a wall while chasing.
    EnemyTeleported { from: Vec2, to: Vec2 },
    /// The boss rotated its exposed weak point.
    WeakPointShifted,
    /// The boss was destroyed.
    BossDefeated,
    /// The player swapped flashlight presets.
    FlashlightEquipped { kind: FlashlightKind },
}

/// Alert for the UI alert queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
