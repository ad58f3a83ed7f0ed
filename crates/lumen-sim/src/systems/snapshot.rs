//! Builds the per-tick [`GameStateSnapshot`] from the world. Read-only.

use hecs::World;

use lumen_beam::Ray;
use lumen_core::components::{Boss, Enemy, EnemyAi, Flashlight, Health, Player, WeakPoint};
use lumen_core::enums::GamePhase;
use lumen_core::events::{Alert, GameEvent};
use lumen_core::state::{
    BossView, EnemyView, FlashlightView, GameStateSnapshot, RaySegmentView, ScoreView,
    WeakPointView,
};
use lumen_core::types::{Position, SimTime};

use crate::rig::{FlashlightRig, ScoreState};
use crate::scene::OwnedBy;

#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    rig: &FlashlightRig,
    trace: &[Ray],
    score: &ScoreState,
    events: Vec<GameEvent>,
    alerts: Vec<Alert>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        flashlight: build_flashlight(world, rig),
        rays: trace
            .iter()
            .map(|ray| RaySegmentView {
                start: ray.start,
                end: ray.end,
            })
            .collect(),
        enemies: build_enemies(world),
        boss: build_boss(world),
        score: ScoreView {
            enemies_killed: score.enemies_killed,
            enemies_spawned: score.enemies_spawned,
            damage_dealt: score.damage_dealt,
            boss_defeated: score.boss_defeated,
        },
        events,
        alerts,
    }
}

fn build_flashlight(world: &World, rig: &FlashlightRig) -> FlashlightView {
    let mut view = FlashlightView {
        kind: rig.equipped,
        enabled: rig.enabled,
        width_deg: rig.width_deg,
        range: rig.range,
        density: rig.density,
        intensity: rig.intensity,
        color: rig.color,
        ..FlashlightView::default()
    };
    let mut query = world.query::<(&Player, &Position, &Flashlight)>();
    if let Some((_, (_, pos, light))) = query.iter().next() {
        view.position = pos.0;
        view.rotation = light.rotation;
    }
    view
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut query = world.query::<(&Enemy, &Position, &Health, &EnemyAi)>();
    query
        .iter()
        .map(|(_, (_, pos, health, ai))| EnemyView {
            position: pos.0,
            health: health.current,
            max_health: health.max,
            facing_right: ai.facing_right,
            chasing: ai.chasing,
        })
        .collect()
}

fn build_boss(world: &World) -> Option<BossView> {
    let mut query = world.query::<(&Boss, &Position, &Health)>();
    let (boss_entity, (_, pos, health)) = query.iter().next()?;

    let mut weak_points = Vec::new();
    let mut wp_query = world.query::<(&WeakPoint, &OwnedBy, &Position)>();
    for (_, (wp, owner, wp_pos)) in wp_query.iter() {
        if owner.0 == boss_entity {
            weak_points.push(WeakPointView {
                position: wp_pos.0,
                open: wp.open,
            });
        }
    }

    Some(BossView {
        position: pos.0,
        health: health.current,
        max_health: health.max,
        weak_points,
    })
}
