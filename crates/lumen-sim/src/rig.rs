//! Engine-owned session state: the flashlight rig and the running score.

use lumen_core::components::FlashlightPreset;
use lumen_core::constants::{BEAM_APERTURE, BEAM_RAY_COUNT, MAX_REFLECTIONS, PRESET_SETTLE_RATE};
use lumen_core::enums::FlashlightKind;
use lumen_core::types::BeamParams;

/// Live flashlight state. The equipped preset is a target; the live
/// parameters settle toward it over a few frames so swapping lights reads
/// as a smooth morph rather than a pop.
#[derive(Debug, Clone)]
pub struct FlashlightRig {
    pub equipped: FlashlightKind,
    pub enabled: bool,
    pub density: f32,
    pub width_deg: f32,
    pub range: f32,
    pub intensity: f32,
    pub color: [f32; 4],
    pub max_reflections: u32,
}

impl Default for FlashlightRig {
    fn default() -> Self {
        let kind = FlashlightKind::Wide;
        let mut rig = Self {
            equipped: kind,
            enabled: true,
            density: 0.0,
            width_deg: 0.0,
            range: 0.0,
            intensity: 0.0,
            color: [0.0; 4],
            max_reflections: MAX_REFLECTIONS,
        };
        rig.snap_to_preset();
        rig
    }
}

impl FlashlightRig {
    pub fn equip(&mut self, kind: FlashlightKind) {
        self.equipped = kind;
    }

    /// Exponentially settle the live parameters toward the equipped preset.
    pub fn settle(&mut self, dt: f32) {
        let k = (dt * PRESET_SETTLE_RATE).min(1.0);
        let target = self.equipped.preset();
        self.density += (target.density - self.density) * k;
        self.width_deg += (target.width_deg - self.width_deg) * k;
        self.range += (target.range - self.range) * k;
        self.intensity += (target.intensity - self.intensity) * k;
        for (live, want) in self.color.iter_mut().zip(target.color) {
            *live += (want - *live) * k;
        }
    }

    /// Jump the live parameters straight to the equipped preset.
    pub fn snap_to_preset(&mut self) {
        let FlashlightPreset {
            kind: _,
            density,
            width_deg,
            range,
            intensity,
            color,
        } = self.equipped.preset();
        self.density = density;
        self.width_deg = width_deg;
        self.range = range;
        self.intensity = intensity;
        self.color = color;
    }

    pub fn beam_params(&self) -> BeamParams {
        BeamParams {
            aperture: BEAM_APERTURE,
            width_deg: self.width_deg,
            ray_count: BEAM_RAY_COUNT,
            range: self.range,
            density: self.density,
        }
    }
}

/// Running mission tally, reset on mission start.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub enemies_killed: u32,
    pub enemies_spawned: u32,
    pub damage_dealt: f32,
    pub boss_defeated: bool,
}
