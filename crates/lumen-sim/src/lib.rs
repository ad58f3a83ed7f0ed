//! Headless simulation runtime: the engine, the ECS systems, and the
//! world/scene plumbing that feeds the beam pipeline.

pub mod engine;
pub mod rig;
pub mod scene;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use rig::{FlashlightRig, ScoreState};
pub use scene::{OwnedBy, WorldScene};
