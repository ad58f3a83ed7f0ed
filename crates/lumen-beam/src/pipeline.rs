//! Primary cast pass and hit dispatch.
//!
//! `cast_beam` runs the whole per-tick pipeline: every ray of the fan is
//! cast against the scene, damageable hits accumulate per-surface exposure
//! counts, mirror hits become reflection candidates, and the dispatcher
//! converts exposure into damage fractions — once after the primary pass
//! and once more after reflection resolution. All pipeline state is
//! tick-scoped; nothing survives the call.

use glam::Vec2;

use lumen_core::enums::SurfaceKind;

use crate::geometry::Ray;
use crate::reflect::{self, CandidateSet};

/// Nearest scene intersection for a single cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit<H> {
    pub point: Vec2,
    /// Unit surface normal at the intersection.
    pub normal: Vec2,
    pub distance: f32,
    /// Opaque handle to the struck surface, used for identity comparisons.
    pub surface: H,
    /// Classification decided at the query boundary.
    pub kind: SurfaceKind,
}

/// Scene intersection capability. Implementations exclude the beam
/// source's own occupancy and return the nearest hit.
pub trait SceneQuery {
    type Handle: Copy + PartialEq;

    /// Cast from `origin` along the normalized `dir`, up to `max_dist`.
    fn cast(&self, origin: Vec2, dir: Vec2, max_dist: f32) -> Option<SurfaceHit<Self::Handle>>;
}

/// Damage application capability.
///
/// `fraction` is in `[0, 1]`. Implementations resolve the handle to the
/// actual health owner (weak points route to their owning boss) and must
/// treat unresolvable handles as a dropped entry, never a failure.
pub trait DamageSink<H> {
    fn apply(&mut self, surface: H, kind: SurfaceKind, fraction: f32);
}

/// Cast-pass tunables.
#[derive(Debug, Clone, Copy)]
pub struct CastConfig {
    /// Length of reflected rays.
    pub range: f32,
    /// Reflection expansion budget per tick.
    pub max_reflections: u32,
    /// Surface clearance offset for spawned reflection rays.
    pub surface_offset: f32,
}

/// What the pipeline did this tick, for visualization and tests.
#[derive(Debug, Clone, Default)]
pub struct BeamReport {
    /// Number of reflection candidates expanded (bounded by the budget).
    pub reflection_expansions: u32,
    /// Reflected ray segments walked, for beam rendering.
    pub walked: Vec<Ray>,
}

/// Tick-scoped exposure counts, keyed by struck-surface handle.
///
/// Insertion-ordered so dispatch order is deterministic (a hash map here
/// would make event ordering, and thus snapshots, run-dependent).
#[derive(Debug)]
pub(crate) struct HitAccumulator<H> {
    entries: Vec<(H, SurfaceKind, u32)>,
}

impl<H: Copy + PartialEq> HitAccumulator<H> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, surface: H, kind: SurfaceKind) {
        match self.entries.iter_mut().find(|(h, _, _)| *h == surface) {
            Some((_, _, count)) => *count += 1,
            None => self.entries.push((surface, kind, 1)),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert counts to damage fractions and invoke the sink, clearing
    /// the accumulator. Every entry is dispatched at most once per tick.
    pub(crate) fn dispatch<D: DamageSink<H>>(&mut self, ray_count: usize, sink: &mut D) {
        for (surface, kind, count) in self.entries.drain(..) {
            let fraction = (count as f32 / ray_count.max(1) as f32).min(1.0);
            sink.apply(surface, kind, fraction);
        }
    }
}

/// Run the full beam pipeline for one tick.
pub fn cast_beam<S, D>(rays: &[Ray], cfg: &CastConfig, scene: &S, sink: &mut D) -> BeamReport
where
    S: SceneQuery,
    D: DamageSink<S::Handle>,
{
    let mut report = BeamReport::default();
    let mut hits = HitAccumulator::new();
    let mut candidates = CandidateSet::new();

    // Primary pass: classify the nearest hit of every fan ray.
    for ray in rays {
        let Some(dir) = ray.direction() else {
            continue;
        };
        let Some(hit) = scene.cast(ray.start, dir, ray.length()) else {
            continue;
        };
        match hit.kind {
            SurfaceKind::Obstacle => {}
            SurfaceKind::Mirror => candidates.register(&hit, ray.start),
            SurfaceKind::Enemy | SurfaceKind::WeakPoint => hits.record(hit.surface, hit.kind),
        }
    }

    hits.dispatch(rays.len(), sink);

    reflect::resolve(candidates, cfg, scene, &mut hits, &mut report);
    hits.dispatch(rays.len(), sink);

    debug_assert!(hits.is_empty(), "accumulator must be drained by dispatch");
    report
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use glam::Vec2;

    use lumen_core::types::{BeamParams, ColliderShape, SourcePose};
    use lumen_scene::raycast_shape;

    use super::*;
    use crate::geometry::synthesize_rays;

    /// A scene of positioned shapes; handles are indices.
    struct MockScene {
        surfaces: Vec<(ColliderShape, Vec2, SurfaceKind)>,
        casts: Cell<u32>,
    }

    impl MockScene {
        fn new(surfaces: Vec<(ColliderShape, Vec2, SurfaceKind)>) -> Self {
            Self {
                surfaces,
                casts: Cell::new(0),
            }
        }
    }

    impl SceneQuery for MockScene {
        type Handle = usize;

        fn cast(&self, origin: Vec2, dir: Vec2, max_dist: f32) -> Option<SurfaceHit<usize>> {
            self.casts.set(self.casts.get() + 1);
            let mut best: Option<SurfaceHit<usize>> = None;
            for (i, (shape, center, kind)) in self.surfaces.iter().enumerate() {
                if let Some(hit) = raycast_shape(shape, *center, origin, dir, max_dist) {
                    if best.map_or(true, |b| hit.distance < b.distance) {
                        best = Some(SurfaceHit {
                            point: hit.point,
                            normal: hit.normal,
                            distance: hit.distance,
                            surface: i,
                            kind: *kind,
                        });
                    }
                }
            }
            best
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<(usize, SurfaceKind, f32)>,
    }

    impl DamageSink<usize> for RecordingSink {
        fn apply(&mut self, surface: usize, kind: SurfaceKind, fraction: f32) {
            self.calls.push((surface, kind, fraction));
        }
    }

    fn cfg(max_reflections: u32) -> CastConfig {
        CastConfig {
            range: 20.0,
            max_reflections,
            surface_offset: 0.01,
        }
    }

    fn fan(ray_count: u32, width_deg: f32, range: f32) -> Vec<crate::geometry::Ray> {
        let params = BeamParams {
            aperture: 0.0,
            width_deg,
            ray_count,
            range,
            density: 1.0,
        };
        synthesize_rays(&params, &SourcePose::default()).unwrap()
    }

    /// 5 rays, width 10: a target straddling the central 3 rays at
    /// distance 5 receives a single dispatch of 3/5.
    #[test]
    fn test_three_of_five_rays_single_dispatch() {
        // End angles are 10, 6, 2, -2, -6 degrees; at y = 5 the ray x
        // offsets are 0.88, 0.53, 0.17, -0.17, -0.53. A span covering
        // [-0.6, 0.2] catches exactly the central three.
        let scene = MockScene::new(vec![(
            ColliderShape::Segment {
                a: Vec2::new(-0.6, 0.0),
                b: Vec2::new(0.2, 0.0),
            },
            Vec2::new(0.0, 5.0),
            SurfaceKind::Enemy,
        )]);
        let mut sink = RecordingSink::default();

        cast_beam(&fan(5, 10.0, 10.0), &cfg(3), &scene, &mut sink);

        assert_eq!(sink.calls.len(), 1, "exactly one dispatch per target");
        let (surface, kind, fraction) = sink.calls[0];
        assert_eq!(surface, 0);
        assert_eq!(kind, SurfaceKind::Enemy);
        assert!((fraction - 0.6).abs() < 1e-6, "expected 3/5, got {fraction}");
    }

    /// A mirror at 45 degrees bends the beam onto a target beside it —
    /// but only if the reflection budget allows a bounce. Coincident
    /// mirror hits collapse into one candidate.
    #[test]
    fn test_mirror_routes_damage_within_budget() {
        let surfaces = vec![
            (
                // 45-degree mirror through (0, 5).
                ColliderShape::Segment {
                    a: Vec2::new(-2.0, -2.0),
                    b: Vec2::new(2.0, 2.0),
                },
                Vec2::new(0.0, 5.0),
                SurfaceKind::Mirror,
            ),
            (
                ColliderShape::Circle { radius: 0.5 },
                Vec2::new(5.0, 5.0),
                SurfaceKind::Enemy,
            ),
        ];

        // Zero-width fan: both rays travel straight up and strike the
        // mirror at the same point.
        let rays = fan(2, 0.0, 10.0);

        let scene = MockScene::new(surfaces.clone());
        let mut sink = RecordingSink::default();
        let report = cast_beam(&rays, &cfg(1), &scene, &mut sink);

        assert_eq!(
            report.reflection_expansions, 1,
            "coincident hits should dedup to one candidate"
        );
        assert_eq!(sink.calls.len(), 1);
        let (surface, kind, fraction) = sink.calls[0];
        assert_eq!(surface, 1);
        assert_eq!(kind, SurfaceKind::Enemy);
        assert!(
            (fraction - 0.5).abs() < 1e-6,
            "one deduped hit of a two-ray fan, got {fraction}"
        );

        // With the budget at zero the chain is never followed.
        let scene = MockScene::new(surfaces);
        let mut sink = RecordingSink::default();
        let report = cast_beam(&rays, &cfg(0), &scene, &mut sink);
        assert_eq!(report.reflection_expansions, 0);
        assert!(sink.calls.is_empty());
    }

    /// Two facing mirrors bounce the beam back and forth; the budget stops
    /// the chain after exactly `max_reflections` expansions.
    #[test]
    fn test_facing_mirrors_bounded_by_budget() {
        let scene = MockScene::new(vec![
            (
                ColliderShape::Segment {
                    a: Vec2::new(-2.0, 0.0),
                    b: Vec2::new(2.0, 0.0),
                },
                Vec2::new(0.0, 5.0),
                SurfaceKind::Mirror,
            ),
            (
                ColliderShape::Segment {
                    a: Vec2::new(-2.0, 0.0),
                    b: Vec2::new(2.0, 0.0),
                },
                Vec2::new(0.0, -5.0),
                SurfaceKind::Mirror,
            ),
        ]);
        let mut sink = RecordingSink::default();

        let rays = fan(2, 0.0, 10.0);
        let report = cast_beam(&rays, &cfg(3), &scene, &mut sink);

        assert_eq!(report.reflection_expansions, 3);
        assert!(sink.calls.is_empty());
        // 2 primary casts plus one cast per expansion.
        assert_eq!(scene.casts.get(), 5);
    }

    /// A scripted scene that replays canned responses, for exercising the
    /// same-surface termination guard directly.
    struct ScriptedScene {
        responses: RefCell<VecDeque<Option<SurfaceHit<usize>>>>,
    }

    impl SceneQuery for ScriptedScene {
        type Handle = usize;

        fn cast(&self, _origin: Vec2, _dir: Vec2, _max: f32) -> Option<SurfaceHit<usize>> {
            self.responses.borrow_mut().pop_front().flatten()
        }
    }

    /// A reflected ray that lands back on its own mirror terminates the
    /// chain instead of re-queuing it.
    #[test]
    fn test_rehit_of_source_surface_terminates() {
        let mirror_hit = SurfaceHit {
            point: Vec2::new(0.0, 5.0),
            normal: -Vec2::Y,
            distance: 5.0,
            surface: 7,
            kind: SurfaceKind::Mirror,
        };
        let scene = ScriptedScene {
            responses: RefCell::new(VecDeque::from(vec![
                Some(mirror_hit),       // primary ray strikes the mirror
                Some(mirror_hit),       // reflection lands on the same surface
                None,                   // must never be consumed
            ])),
        };
        let mut sink = RecordingSink::default();

        let rays = vec![crate::geometry::Ray {
            start: Vec2::ZERO,
            end: Vec2::new(0.0, 10.0),
        }];
        let report = cast_beam(&rays, &cfg(5), &scene, &mut sink);

        assert_eq!(report.reflection_expansions, 1);
        assert!(sink.calls.is_empty());
        assert_eq!(
            scene.responses.borrow().len(),
            1,
            "chain must stop after the self re-hit"
        );
    }

    /// An obstacle in front of a target absorbs the beam.
    #[test]
    fn test_obstacle_shadows_target() {
        let scene = MockScene::new(vec![
            (
                ColliderShape::Rect {
                    half: Vec2::new(2.0, 0.2),
                },
                Vec2::new(0.0, 3.0),
                SurfaceKind::Obstacle,
            ),
            (
                ColliderShape::Circle { radius: 1.0 },
                Vec2::new(0.0, 6.0),
                SurfaceKind::Enemy,
            ),
        ]);
        let mut sink = RecordingSink::default();

        cast_beam(&fan(5, 10.0, 10.0), &cfg(3), &scene, &mut sink);
        assert!(sink.calls.is_empty());
    }

    /// An empty scene produces no dispatches and leaves nothing behind.
    #[test]
    fn test_empty_scene_is_inert() {
        let scene = MockScene::new(vec![]);
        let mut sink = RecordingSink::default();

        let report = cast_beam(&fan(10, 20.0, 10.0), &cfg(3), &scene, &mut sink);

        assert!(sink.calls.is_empty());
        assert_eq!(report.reflection_expansions, 0);
        assert!(report.walked.is_empty());
    }

    /// Primary and reflected exposure share one accumulator: a target hit
    /// both ways still gets at most one dispatch per wave.
    #[test]
    fn test_accumulator_orders_and_merges() {
        let mut acc: HitAccumulator<usize> = HitAccumulator::new();
        acc.record(3, SurfaceKind::Enemy);
        acc.record(9, SurfaceKind::WeakPoint);
        acc.record(3, SurfaceKind::Enemy);
        acc.record(3, SurfaceKind::Enemy);

        let mut sink = RecordingSink::default();
        acc.dispatch(5, &mut sink);

        assert!(acc.is_empty());
        assert_eq!(sink.calls.len(), 2);
        assert_eq!(sink.calls[0], (3, SurfaceKind::Enemy, 0.6));
        assert_eq!(sink.calls[1], (9, SurfaceKind::WeakPoint, 0.2));
    }

    /// A count above the fan size still dispatches a fraction of exactly
    /// 1.0, honoring the sink's `[0, 1]` contract.
    #[test]
    fn test_dispatch_clamps_fraction() {
        let mut acc: HitAccumulator<usize> = HitAccumulator::new();
        for _ in 0..5 {
            acc.record(2, SurfaceKind::Enemy);
        }

        let mut sink = RecordingSink::default();
        acc.dispatch(3, &mut sink);

        assert_eq!(sink.calls, vec![(2, SurfaceKind::Enemy, 1.0)]);
    }
}
