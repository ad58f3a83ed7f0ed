//! Scene adapters: raycast queries over the ECS world plus surface
//! ownership links.
//!
//! Entity-valued links live sim-side so `lumen-core` stays free of the ECS
//! runtime.

use glam::Vec2;
use hecs::{Entity, World};

use lumen_beam::{SceneQuery, SurfaceHit};
use lumen_core::components::{Collider, Player};
use lumen_core::types::Position;
use lumen_scene::raycast_shape;

/// Links a weak point collider to the boss whose health it exposes.
#[derive(Debug, Clone, Copy)]
pub struct OwnedBy(pub Entity);

/// Nearest-hit scene query over every collidable entity.
///
/// The player's own colliders never occlude anything; `exclude` lets a
/// caster additionally skip its own collider.
pub struct WorldScene<'w> {
    world: &'w World,
    exclude: Option<Entity>,
}

impl<'w> WorldScene<'w> {
    pub fn new(world: &'w World) -> Self {
        Self {
            world,
            exclude: None,
        }
    }

    pub fn excluding(world: &'w World, entity: Entity) -> Self {
        Self {
            world,
            exclude: Some(entity),
        }
    }
}

impl SceneQuery for WorldScene<'_> {
    type Handle = Entity;

    fn cast(&self, origin: Vec2, dir: Vec2, max_dist: f32) -> Option<SurfaceHit<Entity>> {
        let mut best: Option<SurfaceHit<Entity>> = None;

        let mut query = self
            .world
            .query::<(&Position, &Collider)>()
            .without::<&Player>();
        for (entity, (pos, collider)) in query.iter() {
            if self.exclude == Some(entity) {
                continue;
            }
            if let Some(hit) = raycast_shape(&collider.shape, pos.0, origin, dir, max_dist) {
                if best.map_or(true, |b| hit.distance < b.distance) {
                    best = Some(SurfaceHit {
                        point: hit.point,
                        normal: hit.normal,
                        distance: hit.distance,
                        surface: entity,
                        kind: collider.kind,
                    });
                }
            }
        }

        best
    }
}
