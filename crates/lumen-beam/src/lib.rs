//! The per-tick beam pipeline for LUMEN.
//!
//! Four stages run synchronously each simulation tick: the geometry
//! synthesizer produces the ray fan, the primary cast pass classifies scene
//! hits, the reflection resolver propagates the beam through mirrors up to
//! a bounded depth, and the hit dispatcher converts accumulated exposure
//! into damage fractions.
//!
//! The pipeline is generic over the scene-query and damage-sink
//! capabilities, so it carries no ECS or frontend dependency and can be
//! driven against a mock scene in tests.

pub mod geometry;
pub mod pipeline;
pub mod reflect;

pub use geometry::{synthesize_rays, BeamError, Ray};
pub use pipeline::{cast_beam, BeamReport, CastConfig, DamageSink, SceneQuery, SurfaceHit};
