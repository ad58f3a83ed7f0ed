//! Player commands sent from the frontend to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::FlashlightKind;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Flashlight control ---
    /// Steer the flashlight toward a world point (rotation settles over
    /// several ticks).
    AimFlashlight { target: Vec2 },
    /// Swap to a different flashlight preset.
    EquipFlashlight { kind: FlashlightKind },
    /// Switch the beam on or off. While off, no rays are cast.
    SetFlashlightEnabled { enabled: bool },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = paused).
    SetTimeScale { scale: f32 },
    /// Start a new mission.
    StartMission,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
