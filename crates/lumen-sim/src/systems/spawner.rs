//! Spawn areas: emit enemies on an interval up to a global population cap.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use lumen_core::components::{Enemy, SpawnArea};
use lumen_core::constants::{DT, MAX_ENEMIES};
use lumen_core::events::GameEvent;
use lumen_core::types::Position;

use crate::rig::ScoreState;
use crate::world_setup;

pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
) {
    let mut live = {
        let mut query = world.query::<&Enemy>();
        query.iter().count() as u32
    };

    let mut spawns: Vec<Vec2> = Vec::new();
    for (_entity, (area, pos)) in world.query_mut::<(&mut SpawnArea, &Position)>() {
        area.since_spawn += DT;
        if area.since_spawn < area.interval {
            continue;
        }
        // At the cap the timer keeps running, so a freed slot fills at once.
        if live >= MAX_ENEMIES {
            continue;
        }
        area.since_spawn = 0.0;
        let x = pos.0.x + rng.gen_range(-area.half_width..=area.half_width);
        spawns.push(Vec2::new(x, pos.0.y));
        live += 1;
    }

    for at in spawns {
        world_setup::spawn_enemy(world, at);
        score.enemies_spawned += 1;
        events.push(GameEvent::EnemySpawned { position: at });
    }
}
