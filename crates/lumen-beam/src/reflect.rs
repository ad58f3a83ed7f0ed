//! Reflection resolver — bounded breadth-first propagation through mirrors.
//!
//! Mirror hits from the primary pass become candidates; each candidate is
//! expanded into one reflected cast, and reflected casts that strike
//! further mirrors re-enter the worklist one depth deeper. An explicit
//! queue with a per-entry depth replaces chain recursion: ordering is
//! breadth-first and the depth budget is checked in exactly one place.

use std::collections::VecDeque;

use glam::Vec2;

use lumen_core::enums::SurfaceKind;

use crate::geometry::Ray;
use crate::pipeline::{BeamReport, CastConfig, HitAccumulator, SceneQuery, SurfaceHit};

/// A pending reflection event.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReflectionCandidate<H> {
    /// Where the incident ray struck the mirror.
    pub point: Vec2,
    /// Mirror surface normal (unit).
    pub normal: Vec2,
    /// Origin of the incident ray.
    pub origin: Vec2,
    /// The mirror that produced this candidate; an immediate re-hit of it
    /// terminates the chain.
    pub source: H,
    pub depth: u32,
}

/// Tick-scoped candidate set with keep-first dedup per mirror point.
///
/// Many fan rays converging on the same spot of a mirror must not multiply
/// reflections, so registration keyed by exact `(point, normal)` keeps the
/// first candidate and drops the rest.
#[derive(Debug)]
pub(crate) struct CandidateSet<H> {
    pending: Vec<ReflectionCandidate<H>>,
}

impl<H: Copy + PartialEq> CandidateSet<H> {
    pub(crate) fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub(crate) fn register(&mut self, hit: &SurfaceHit<H>, ray_origin: Vec2) {
        let seen = self
            .pending
            .iter()
            .any(|c| c.point == hit.point && c.normal == hit.normal);
        if seen {
            return;
        }
        self.pending.push(ReflectionCandidate {
            point: hit.point,
            normal: hit.normal,
            origin: ray_origin,
            source: hit.surface,
            depth: 0,
        });
    }
}

/// Mirror the incident direction about the surface normal.
/// Both inputs are unit vectors; the result preserves length.
pub fn reflect_direction(incident: Vec2, normal: Vec2) -> Vec2 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Drain the candidate set breadth-first, feeding damageable hits into the
/// shared accumulator. Expansion stops at the depth budget; budget
/// exhaustion is silent truncation, not an error.
pub(crate) fn resolve<S: SceneQuery>(
    candidates: CandidateSet<S::Handle>,
    cfg: &CastConfig,
    scene: &S,
    hits: &mut HitAccumulator<S::Handle>,
    report: &mut BeamReport,
) {
    let mut queue: VecDeque<ReflectionCandidate<S::Handle>> = candidates.pending.into();

    while let Some(candidate) = queue.pop_front() {
        if candidate.depth >= cfg.max_reflections {
            continue;
        }

        let incident = candidate.point - candidate.origin;
        if incident.length_squared() <= 0.0 {
            continue;
        }
        let reflected = reflect_direction(incident.normalize(), candidate.normal);

        // Step clear of the reflecting surface so the new ray cannot
        // intersect it at distance zero.
        let origin =
            candidate.point + candidate.normal * cfg.surface_offset + reflected * cfg.surface_offset;

        report.reflection_expansions += 1;

        let hit = scene.cast(origin, reflected, cfg.range);
        report.walked.push(Ray {
            start: origin,
            end: hit
                .as_ref()
                .map_or(origin + reflected * cfg.range, |h| h.point),
        });

        let Some(hit) = hit else {
            continue;
        };
        if hit.surface == candidate.source {
            continue;
        }

        match hit.kind {
            SurfaceKind::Obstacle => {}
            SurfaceKind::Mirror => queue.push_back(ReflectionCandidate {
                point: hit.point,
                normal: hit.normal,
                origin,
                source: hit.surface,
                depth: candidate.depth + 1,
            }),
            SurfaceKind::Enemy | SurfaceKind::WeakPoint => hits.record(hit.surface, hit.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflection_law() {
        let cases = [
            // 45-degree mirror: up becomes right.
            (Vec2::Y, Vec2::new(1.0, -1.0).normalize(), Vec2::X),
            // Head-on: direction inverts.
            (Vec2::Y, -Vec2::Y, -Vec2::Y),
            // Grazing a vertical surface flips only x.
            (
                Vec2::new(0.6, 0.8),
                -Vec2::X,
                Vec2::new(-0.6, 0.8),
            ),
        ];
        for (incident, normal, expected) in cases {
            let r = reflect_direction(incident, normal);
            assert!(
                r.abs_diff_eq(expected, 1e-6),
                "reflect({incident:?}, {normal:?}) = {r:?}, expected {expected:?}"
            );
        }
    }

    #[test]
    fn test_reflection_preserves_length() {
        let incident = Vec2::new(0.3, -0.95).normalize();
        let normal = Vec2::new(0.7, 0.2).normalize();
        let r = reflect_direction(incident, normal);
        assert!((r.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_candidate_dedup_keeps_first() {
        let mut set: CandidateSet<usize> = CandidateSet::new();
        let hit = SurfaceHit {
            point: Vec2::new(1.0, 2.0),
            normal: Vec2::Y,
            distance: 2.0,
            surface: 4,
            kind: SurfaceKind::Mirror,
        };

        set.register(&hit, Vec2::ZERO);
        set.register(&hit, Vec2::new(9.0, 9.0));

        assert_eq!(set.pending.len(), 1);
        assert_eq!(set.pending[0].origin, Vec2::ZERO, "first origin wins");

        // A different strike point on the same mirror is a new candidate.
        let other = SurfaceHit {
            point: Vec2::new(1.5, 2.0),
            ..hit
        };
        set.register(&other, Vec2::ZERO);
        assert_eq!(set.pending.len(), 2);
    }
}
