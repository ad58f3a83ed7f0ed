//! Per-tick simulation systems.
//!
//! Each system is a free function taking `&mut World` plus whatever engine
//! state it needs. The engine runs them in a fixed order every tick.

pub mod boss;
pub mod cleanup;
pub mod enemy_ai;
pub mod flashlight;
pub mod movement;
pub mod snapshot;
pub mod spawner;
