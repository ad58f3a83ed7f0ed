//! Enemy behavior: patrol, chase, wall slow-down, and wall teleport.
//!
//! Decisions are collected under a shared world borrow (the forward probe
//! raycasts the scene), then applied in a second pass.

use glam::Vec2;
use hecs::{Entity, World};

use lumen_beam::SceneQuery;
use lumen_core::components::{Enemy, EnemyAi, Player};
use lumen_core::constants::{
    DT, ENEMY_CHASE_FACTOR, ENEMY_SLOW_DISTANCE, ENEMY_SLOW_FACTOR, TELEPORT_CLEARANCE,
    WALL_CHECK_DISTANCE,
};
use lumen_core::enums::SurfaceKind;
use lumen_core::events::GameEvent;
use lumen_core::types::{Position, Velocity};

use crate::scene::WorldScene;

struct AiUpdate {
    entity: Entity,
    velocity_x: f32,
    facing_right: bool,
    chasing: bool,
    teleport_timer: f32,
    teleport_to: Option<Vec2>,
}

pub fn run(world: &mut World, events: &mut Vec<GameEvent>) {
    let player_pos = {
        let mut query = world.query::<(&Player, &Position)>();
        query.iter().next().map(|(_, (_, pos))| pos.0)
    };

    let mut updates = Vec::new();
    {
        let mut query = world.query::<(&Enemy, &Position, &EnemyAi)>();
        for (entity, (_enemy, pos, ai)) in query.iter() {
            let mut facing_right = ai.facing_right;
            let mut chasing = false;
            let mut speed = ai.base_speed;
            let mut timer = ai.teleport_timer;
            let mut teleport_to = None;

            if let Some(player) = player_pos {
                if pos.0.distance(player) <= ai.detection_range {
                    chasing = true;
                    facing_right = player.x > pos.0.x;
                    speed = ai.base_speed * ENEMY_CHASE_FACTOR;
                }
            }

            // Forward probe, skipping our own collider. Only solid obstacles
            // count; another enemy in the way is not a wall.
            let dir = if facing_right { Vec2::X } else { -Vec2::X };
            let scene = WorldScene::excluding(world, entity);
            let ahead = scene
                .cast(pos.0, dir, ENEMY_SLOW_DISTANCE)
                .filter(|hit| hit.kind == SurfaceKind::Obstacle);

            match ahead {
                Some(hit) if chasing => {
                    speed *= ENEMY_SLOW_FACTOR;
                    if hit.distance <= WALL_CHECK_DISTANCE {
                        // Held at the wall: stop and wind up a teleport past it.
                        speed = 0.0;
                        timer += DT;
                        if timer >= ai.teleport_cooldown {
                            teleport_to = Some(pos.0 + dir * (hit.distance + TELEPORT_CLEARANCE));
                            timer = 0.0;
                        }
                    }
                }
                Some(hit) if hit.distance <= WALL_CHECK_DISTANCE => {
                    // Patrolling into a wall: turn around.
                    facing_right = !facing_right;
                    timer = 0.0;
                }
                _ => {
                    timer = 0.0;
                }
            }

            let sign = if facing_right { 1.0 } else { -1.0 };
            updates.push(AiUpdate {
                entity,
                velocity_x: sign * speed,
                facing_right,
                chasing,
                teleport_timer: timer,
                teleport_to,
            });
        }
    }

    for update in updates {
        if let Ok(mut ai) = world.get::<&mut EnemyAi>(update.entity) {
            ai.facing_right = update.facing_right;
            ai.chasing = update.chasing;
            ai.teleport_timer = update.teleport_timer;
        }
        if let Ok(mut vel) = world.get::<&mut Velocity>(update.entity) {
            vel.0.x = update.velocity_x;
        }
        if let Some(to) = update.teleport_to {
            if let Ok(mut pos) = world.get::<&mut Position>(update.entity) {
                events.push(GameEvent::EnemyTeleported { from: pos.0, to });
                pos.0 = to;
            }
        }
    }
}
