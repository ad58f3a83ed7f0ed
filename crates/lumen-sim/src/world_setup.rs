//! Mission world construction: player, arena, mirrors, boss, spawn areas.

use glam::Vec2;
use hecs::{Entity, World};

use lumen_core::components::{
    Boss, Collider, Enemy, EnemyAi, Flashlight, Health, Player, SpawnArea, WeakPoint,
};
use lumen_core::constants::{
    BOSS_MAX_HEALTH, ENEMY_BASE_SPEED, ENEMY_DETECTION_RANGE, ENEMY_MAX_HEALTH, ENEMY_RADIUS,
    PLAYER_RADIUS, SPAWN_INTERVAL, TELEPORT_COOLDOWN, WEAKPOINT_CHANGE_INTERVAL, WEAKPOINT_RADIUS,
};
use lumen_core::enums::SurfaceKind;
use lumen_core::types::{ColliderShape, Position, Velocity};

use crate::scene::OwnedBy;

/// Clears the world and builds the standard mission arena.
pub fn setup_mission(world: &mut World) {
    world.clear();

    spawn_player(world);

    // Arena shell: floor, ceiling, and end walls.
    spawn_wall(world, Vec2::new(-30.0, -1.0), Vec2::new(30.0, -1.0));
    spawn_wall(world, Vec2::new(-30.0, 12.0), Vec2::new(30.0, 12.0));
    spawn_wall(world, Vec2::new(-30.0, -1.0), Vec2::new(-30.0, 12.0));
    spawn_wall(world, Vec2::new(30.0, -1.0), Vec2::new(30.0, 12.0));

    // A pair of angled mirrors for routing the beam around cover.
    spawn_mirror(world, Vec2::new(8.0, 5.0), Vec2::new(-1.5, -1.5), Vec2::new(1.5, 1.5));
    spawn_mirror(world, Vec2::new(-10.0, 4.0), Vec2::new(-1.5, 1.5), Vec2::new(1.5, -1.5));

    spawn_boss(
        world,
        Vec2::new(22.0, 2.0),
        &[
            Vec2::new(-2.2, -1.0),
            Vec2::new(-2.2, 1.0),
            Vec2::new(0.0, 2.6),
        ],
    );

    spawn_area(world, Vec2::new(-18.0, 0.0), 5.0);
    spawn_area(world, Vec2::new(14.0, 0.0), 4.0);
}

pub fn spawn_player(world: &mut World) -> Entity {
    world.spawn((
        Player,
        Position(Vec2::ZERO),
        Flashlight {
            rotation: 0.0,
            aim_target: Vec2::new(0.0, 10.0),
        },
        Collider {
            shape: ColliderShape::Circle {
                radius: PLAYER_RADIUS,
            },
            kind: SurfaceKind::Obstacle,
        },
    ))
}

pub fn spawn_enemy(world: &mut World, at: Vec2) -> Entity {
    world.spawn((
        Enemy,
        Position(at),
        Velocity(Vec2::ZERO),
        Health::full(ENEMY_MAX_HEALTH),
        EnemyAi {
            base_speed: ENEMY_BASE_SPEED,
            detection_range: ENEMY_DETECTION_RANGE,
            facing_right: at.x < 0.0,
            chasing: false,
            teleport_timer: 0.0,
            teleport_cooldown: TELEPORT_COOLDOWN,
        },
        Collider {
            shape: ColliderShape::Circle {
                radius: ENEMY_RADIUS,
            },
            kind: SurfaceKind::Enemy,
        },
    ))
}

/// Spawns a boss body plus one weak point collider per offset. Weak points
/// start closed; the boss system opens one on its first rotation.
pub fn spawn_boss(world: &mut World, at: Vec2, weak_point_offsets: &[Vec2]) -> Entity {
    let boss = world.spawn((
        Boss {
            change_interval: WEAKPOINT_CHANGE_INTERVAL,
            // Due immediately, so one weak point opens on the first tick.
            since_change: WEAKPOINT_CHANGE_INTERVAL,
        },
        Position(at),
        Health::full(BOSS_MAX_HEALTH),
        Collider {
            shape: ColliderShape::Rect {
                half: Vec2::new(1.5, 2.0),
            },
            kind: SurfaceKind::Obstacle,
        },
    ));

    for offset in weak_point_offsets {
        world.spawn((
            WeakPoint { open: false },
            OwnedBy(boss),
            Position(at + *offset),
            Collider {
                shape: ColliderShape::Circle {
                    radius: WEAKPOINT_RADIUS,
                },
                kind: SurfaceKind::Obstacle,
            },
        ));
    }

    boss
}

pub fn spawn_wall(world: &mut World, a: Vec2, b: Vec2) -> Entity {
    let center = (a + b) * 0.5;
    world.spawn((
        Position(center),
        Collider {
            shape: ColliderShape::Segment {
                a: a - center,
                b: b - center,
            },
            kind: SurfaceKind::Obstacle,
        },
    ))
}

/// Mirror segment centered at `center`, endpoints given as local offsets.
pub fn spawn_mirror(world: &mut World, center: Vec2, a: Vec2, b: Vec2) -> Entity {
    world.spawn((
        Position(center),
        Collider {
            shape: ColliderShape::Segment { a, b },
            kind: SurfaceKind::Mirror,
        },
    ))
}

pub fn spawn_area(world: &mut World, at: Vec2, half_width: f32) -> Entity {
    world.spawn((
        Position(at),
        SpawnArea {
            half_width,
            interval: SPAWN_INTERVAL,
            since_spawn: 0.0,
        },
    ))
}
