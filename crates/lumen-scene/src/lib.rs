//! Pure 2D collision geometry for the LUMEN scene.
//!
//! Analytic ray intersection against the collider shapes defined in
//! `lumen-core`. No ECS dependency; the sim crate adapts these queries
//! over its world.

pub mod shapes;

pub use shapes::{raycast_shape, RayHit};
