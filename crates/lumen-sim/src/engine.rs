//! Simulation engine: owns the world and all per-session state, consumes
//! player commands, and steps the systems at a fixed tick rate.
//!
//! `tick()` is the only entry point that mutates the simulation. Given the
//! same seed and the same command stream, the snapshot stream is identical
//! run to run.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lumen_beam::Ray;
use lumen_core::commands::PlayerCommand;
use lumen_core::components::Flashlight;
use lumen_core::enums::GamePhase;
use lumen_core::events::{Alert, GameEvent};
use lumen_core::state::GameStateSnapshot;
use lumen_core::types::SimTime;

use crate::rig::{FlashlightRig, ScoreState};
use crate::systems;
use crate::world_setup;

/// Engine construction parameters.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub seed: u64,
    pub time_scale: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
        }
    }
}

pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f32,
    step_accum: f32,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    alerts: Vec<Alert>,
    rig: FlashlightRig,
    score: ScoreState,
    beam_trace: Vec<Ray>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::MainMenu,
            time_scale: config.time_scale.clamp(0.0, 4.0),
            step_accum: 0.0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            alerts: Vec::new(),
            rig: FlashlightRig::default(),
            score: ScoreState::default(),
            beam_trace: Vec::new(),
        }
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advances the simulation by one tick and returns the resulting
    /// snapshot. Time scale above 1 runs extra fixed steps; below 1 it
    /// skips steps, accumulating the remainder.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.step_accum += self.time_scale;
            while self.step_accum >= 1.0 {
                self.step_accum -= 1.0;
                self.run_systems();
                self.time.advance();
            }
        }

        let events = std::mem::take(&mut self.events);
        let alerts = std::mem::take(&mut self.alerts);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.rig,
            &self.beam_trace,
            &self.score,
            events,
            alerts,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> &SimTime {
        &self.time
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn rig(&self) -> &FlashlightRig {
        &self.rig
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMission => {
                if matches!(self.phase, GamePhase::MainMenu | GamePhase::MissionComplete) {
                    self.start_mission();
                } else {
                    log::warn!("StartMission ignored in phase {:?}", self.phase);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::AimFlashlight { target } => {
                for (_, light) in self.world.query_mut::<&mut Flashlight>() {
                    light.aim_target = target;
                }
            }
            PlayerCommand::EquipFlashlight { kind } => {
                if self.rig.equipped != kind {
                    self.rig.equip(kind);
                    self.events.push(GameEvent::FlashlightEquipped { kind });
                }
            }
            PlayerCommand::SetFlashlightEnabled { enabled } => {
                self.rig.enabled = enabled;
            }
        }
    }

    fn start_mission(&mut self) {
        world_setup::setup_mission(&mut self.world);
        self.time = SimTime::default();
        self.step_accum = 0.0;
        self.rig = FlashlightRig::default();
        self.score = ScoreState::default();
        self.beam_trace.clear();
        self.despawn_buffer.clear();
        self.events.clear();
        self.alerts.clear();
        self.phase = GamePhase::Active;
        log::info!("mission started");
    }

    fn run_systems(&mut self) {
        systems::spawner::run(&mut self.world, &mut self.rng, &mut self.score, &mut self.events);
        systems::enemy_ai::run(&mut self.world, &mut self.events);
        systems::boss::run(&mut self.world, &mut self.rng, &mut self.events);
        systems::flashlight::run(
            &mut self.world,
            &mut self.rig,
            &mut self.score,
            &mut self.beam_trace,
            &mut self.alerts,
            self.time.tick,
        );
        systems::movement::run(&mut self.world);
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.score,
            &mut self.events,
            &mut self.phase,
        );
    }

    #[cfg(test)]
    pub(crate) fn start_empty(&mut self) {
        self.world.clear();
        world_setup::spawn_player(&mut self.world);
        self.phase = GamePhase::Active;
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn rig_mut(&mut self) -> &mut FlashlightRig {
        &mut self.rig
    }
}
