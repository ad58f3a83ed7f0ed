//! Flashlight system: settles the rig, steers the aim, then runs the
//! synthesize / cast / reflect / dispatch pipeline against the world.
//!
//! Health mutation is deferred: while the beam pipeline holds the world
//! immutably, struck surfaces are resolved to their health owner and
//! buffered; the buffered damage is applied after the borrow is released.

use std::f32::consts::FRAC_PI_2;

use hecs::{Entity, World};

use lumen_beam::{cast_beam, synthesize_rays, CastConfig, DamageSink, Ray};
use lumen_core::components::{Flashlight, Health, Player};
use lumen_core::constants::{AIM_SMOOTHING, DT, REFLECTION_ORIGIN_OFFSET};
use lumen_core::enums::{AlertLevel, SurfaceKind};
use lumen_core::events::Alert;
use lumen_core::types::{approach_angle, Position, SourcePose};

use crate::rig::{FlashlightRig, ScoreState};
use crate::scene::{OwnedBy, WorldScene};

struct DamageLedger<'w, 'a> {
    world: &'w World,
    pending: Vec<(Entity, f32)>,
    alerts: &'a mut Vec<Alert>,
    tick: u64,
}

impl DamageSink<Entity> for DamageLedger<'_, '_> {
    fn apply(&mut self, surface: Entity, kind: SurfaceKind, fraction: f32) {
        let target = match kind {
            SurfaceKind::Enemy => Some(surface),
            SurfaceKind::WeakPoint => self.world.get::<&OwnedBy>(surface).ok().map(|o| o.0),
            SurfaceKind::Mirror | SurfaceKind::Obstacle => None,
        };
        let target = target.filter(|t| self.world.get::<&Health>(*t).is_ok());
        match target {
            Some(t) => self.pending.push((t, fraction)),
            None => {
                log::warn!(
                    "beam struck {surface:?} ({kind:?}) with no reachable health pool; dropping"
                );
                self.alerts.push(Alert {
                    level: AlertLevel::Warning,
                    message: format!("struck {kind:?} surface has no health pool"),
                    tick: self.tick,
                });
            }
        }
    }
}

pub fn run(
    world: &mut World,
    rig: &mut FlashlightRig,
    score: &mut ScoreState,
    trace: &mut Vec<Ray>,
    alerts: &mut Vec<Alert>,
    current_tick: u64,
) {
    rig.settle(DT);
    trace.clear();

    // Steer toward the aim point by a fixed fraction of the remaining arc.
    let mut pose = None;
    for (_entity, (_player, pos, light)) in
        world.query_mut::<(&Player, &Position, &mut Flashlight)>()
    {
        let to_target = light.aim_target - pos.0;
        if to_target.length_squared() > 1e-6 {
            let desired = to_target.y.atan2(to_target.x) - FRAC_PI_2;
            light.rotation = approach_angle(light.rotation, desired, AIM_SMOOTHING);
        }
        pose = Some(SourcePose::new(pos.0, light.rotation));
    }
    let Some(pose) = pose else {
        log::warn!("no player flashlight in world; skipping beam tick");
        return;
    };

    if !rig.enabled {
        return;
    }

    let params = rig.beam_params();
    let rays = match synthesize_rays(&params, &pose) {
        Ok(rays) => rays,
        Err(err) => {
            log::warn!("rejected beam configuration: {err}");
            alerts.push(Alert {
                level: AlertLevel::Warning,
                message: format!("rejected beam configuration: {err}"),
                tick: current_tick,
            });
            return;
        }
    };

    let cfg = CastConfig {
        range: params.range,
        max_reflections: rig.max_reflections,
        surface_offset: REFLECTION_ORIGIN_OFFSET,
    };

    let (pending, report) = {
        let scene = WorldScene::new(world);
        let mut sink = DamageLedger {
            world,
            pending: Vec::new(),
            alerts,
            tick: current_tick,
        };
        let report = cast_beam(&rays, &cfg, &scene, &mut sink);
        (sink.pending, report)
    };

    for (entity, fraction) in pending {
        if let Ok(mut health) = world.get::<&mut Health>(entity) {
            health.current -= fraction;
            score.damage_dealt += fraction;
        }
    }

    trace.extend(rays);
    trace.extend(report.walked);
}
