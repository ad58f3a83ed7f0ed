//! Boss weak point rotation.
//!
//! On an interval every weak point owned by the boss closes and one,
//! chosen from the seeded RNG, opens. Open weak points carry the
//! `WeakPoint` surface tag; closed ones read as plain obstacles.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use lumen_core::components::{Boss, Collider, WeakPoint};
use lumen_core::constants::DT;
use lumen_core::enums::SurfaceKind;
use lumen_core::events::GameEvent;

use crate::scene::OwnedBy;

pub fn run(world: &mut World, rng: &mut ChaCha8Rng, events: &mut Vec<GameEvent>) {
    let mut due: Vec<Entity> = Vec::new();
    for (entity, boss) in world.query_mut::<&mut Boss>() {
        boss.since_change += DT;
        if boss.since_change >= boss.change_interval {
            boss.since_change = 0.0;
            due.push(entity);
        }
    }

    for boss_entity in due {
        let mut owned: Vec<Entity> = Vec::new();
        {
            let mut query = world.query::<(&WeakPoint, &OwnedBy)>();
            for (entity, (_wp, owner)) in query.iter() {
                if owner.0 == boss_entity {
                    owned.push(entity);
                }
            }
        }
        if owned.is_empty() {
            continue;
        }

        let open_idx = rng.gen_range(0..owned.len());
        for (i, entity) in owned.iter().enumerate() {
            let open = i == open_idx;
            if let Ok(mut wp) = world.get::<&mut WeakPoint>(*entity) {
                wp.open = open;
            }
            if let Ok(mut collider) = world.get::<&mut Collider>(*entity) {
                collider.kind = if open {
                    SurfaceKind::WeakPoint
                } else {
                    SurfaceKind::Obstacle
                };
            }
        }
        events.push(GameEvent::WeakPointShifted);
    }
}
