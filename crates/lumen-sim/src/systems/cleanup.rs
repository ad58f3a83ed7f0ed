//! Removes spent entities: dead enemies, strays outside the world bound,
//! and a defeated boss together with its weak points.

use hecs::{Entity, World};

use lumen_core::components::{Boss, Enemy, Health};
use lumen_core::constants::WORLD_HALF_EXTENT;
use lumen_core::enums::GamePhase;
use lumen_core::events::GameEvent;
use lumen_core::types::Position;

use crate::rig::ScoreState;
use crate::scene::OwnedBy;

pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
    phase: &mut GamePhase,
) {
    despawn_buffer.clear();

    for (entity, (health, pos, _enemy)) in world.query_mut::<(&Health, &Position, &Enemy)>() {
        if health.current <= 0.0 {
            despawn_buffer.push(entity);
            score.enemies_killed += 1;
            events.push(GameEvent::EnemyKilled { position: pos.0 });
        }
    }

    for (entity, (pos, _enemy)) in world.query_mut::<(&Position, &Enemy)>() {
        if pos.0.length() > WORLD_HALF_EXTENT && !despawn_buffer.contains(&entity) {
            despawn_buffer.push(entity);
        }
    }

    let mut dead_bosses: Vec<Entity> = Vec::new();
    for (entity, (health, _boss)) in world.query_mut::<(&Health, &Boss)>() {
        if health.current <= 0.0 {
            dead_bosses.push(entity);
        }
    }
    for boss in dead_bosses {
        despawn_buffer.push(boss);
        score.boss_defeated = true;
        events.push(GameEvent::BossDefeated);
        *phase = GamePhase::MissionComplete;
        for (entity, owner) in world.query_mut::<&OwnedBy>() {
            if owner.0 == boss {
                despawn_buffer.push(entity);
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
