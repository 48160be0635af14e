use std::cmp::Reverse;
use std::collections::BTreeMap;

use tracing::trace;

use super::types::{ChangeSummary, Changeset, CycleEvent, SimplexMove};
use crate::cmap::{BoundaryCycle, CycleKey};
use crate::complex::{Complex, Simplex};
use crate::error::{EvasionError, Result};
use crate::state::{CycleLabel, TopologicalState, Topology};

/// Edge and triangle differences between two complexes.
pub fn diff_complexes(before: &Complex, after: &Complex) -> ChangeSummary {
    ChangeSummary {
        edges_added: after.edges().difference(before.edges()).copied().collect(),
        edges_removed: before.edges().difference(after.edges()).copied().collect(),
        triangles_added: after
            .triangles()
            .difference(before.triangles())
            .copied()
            .collect(),
        triangles_removed: before
            .triangles()
            .difference(after.triangles())
            .copied()
            .collect(),
        cycles_added: 0,
        cycles_removed: 0,
    }
}

/// Recognise `d` as one atomic move, or `None`.
pub fn classify_move(before: &Complex, after: &Complex, d: &ChangeSummary) -> Option<SimplexMove> {
    use SimplexMove::*;
    match d.counts() {
        (0, 0, 0, 0) => Some(Trivial),
        (1, 0, 0, 0) => Some(EdgeInserted(d.edges_added[0])),
        (0, 1, 0, 0) => Some(EdgeRemoved(d.edges_removed[0])),
        (0, 0, 1, 0) => Some(TriangleCovered(d.triangles_added[0])),
        (0, 0, 0, 1) => Some(TriangleUncovered(d.triangles_removed[0])),
        (1, 0, 1, 0) if d.edges_added[0].is_face_of(&d.triangles_added[0]) => Some(PairInserted {
            edge: d.edges_added[0],
            triangle: d.triangles_added[0],
        }),
        (0, 1, 0, 1) if d.edges_removed[0].is_face_of(&d.triangles_removed[0]) => {
            Some(PairRemoved {
                edge: d.edges_removed[0],
                triangle: d.triangles_removed[0],
            })
        }
        (1, 1, ta, tr) if ta <= 2 && tr <= 2 => edge_flip(before, after, d),
        _ => None,
    }
}

/// One edge out, one in: accepted only when they are the two diagonals of a
/// Delaunay quadrilateral and every changed triangle lies inside it.
fn edge_flip(before: &Complex, after: &Complex, d: &ChangeSummary) -> Option<SimplexMove> {
    let old = d.edges_removed[0];
    let new = d.edges_added[0];
    let (p, q) = (old.vertices()[0], old.vertices()[1]);
    let (r, s) = (new.vertices()[0], new.vertices()[1]);
    if new.contains(p) || new.contains(q) {
        return None;
    }
    let quad = [p, q, r, s];
    let in_quad = |t: &Simplex| t.vertices().iter().all(|v| quad.contains(v));
    let before_dt = before.delaunay_triangles();
    let after_dt = after.delaunay_triangles();
    let ok = before_dt.contains(&Simplex::triangle(p, q, r))
        && before_dt.contains(&Simplex::triangle(p, q, s))
        && after_dt.contains(&Simplex::triangle(r, s, p))
        && after_dt.contains(&Simplex::triangle(r, s, q))
        && d.triangles_removed
            .iter()
            .all(|t| in_quad(t) && old.is_face_of(t))
        && d.triangles_added
            .iter()
            .all(|t| in_quad(t) && new.is_face_of(t));
    ok.then_some(SimplexMove::EdgeFlip {
        removed: old,
        inserted: new,
    })
}

/// Which child of a split keeps the parent label.
///
/// The fence label stays with the child carrying the fence dart. Otherwise the
/// longer child wins; ties go to the lower minimum vertex, then the smaller key.
fn split_heir<'a>(
    parent: CycleLabel,
    a: &'a BoundaryCycle,
    b: &'a BoundaryCycle,
    fence_key: &CycleKey,
) -> Option<(&'a BoundaryCycle, &'a BoundaryCycle)> {
    let a_fence = a.key == *fence_key;
    let b_fence = b.key == *fence_key;
    if parent.is_fence() {
        return match (a_fence, b_fence) {
            (true, false) => Some((a, b)),
            (false, true) => Some((b, a)),
            _ => None,
        };
    }
    if a_fence || b_fence {
        return None;
    }
    let rank = |c: &'a BoundaryCycle| (Reverse(c.len()), c.min_vertex(), &c.key);
    if rank(a) <= rank(b) {
        Some((a, b))
    } else {
        Some((b, a))
    }
}

/// Classify the step from `before` to `after` against the current labels.
///
/// Returns `AmbiguousTransition` when the simplicial change is not one atomic
/// move or when its effect on tracked cycles is not a single birth, death,
/// merge, split or relabel-free reshape.
pub fn detect(
    before: &Topology,
    after: &Topology,
    state: &TopologicalState,
    time: f64,
) -> Result<Changeset> {
    if before.complex().num_vertices() != after.complex().num_vertices() {
        return Err(EvasionError::invalid(format!(
            "sensor count changed from {} to {}",
            before.complex().num_vertices(),
            after.complex().num_vertices()
        )));
    }
    let mut change = diff_complexes(before.complex(), after.complex());

    let after_tracked: BTreeMap<&CycleKey, &BoundaryCycle> =
        after.tracked().map(|c| (&c.key, c)).collect();
    let removed: Vec<(&CycleKey, CycleLabel)> = state
        .assignment()
        .iter()
        .filter(|(k, _)| !after_tracked.contains_key(k))
        .map(|(k, l)| (k, *l))
        .collect();
    let added: Vec<&BoundaryCycle> = after_tracked
        .iter()
        .filter(|(k, _)| state.label_of(k).is_none())
        .map(|(_, c)| *c)
        .collect();
    change.cycles_added = added.len();
    change.cycles_removed = removed.len();

    let Some(simplex_move) = classify_move(before.complex(), after.complex(), &change) else {
        trace!("no atomic move: {change}");
        return Err(EvasionError::AmbiguousTransition { change });
    };

    let fence_key = &after.fence_cycle().key;
    let is_fence = |c: &BoundaryCycle| c.key == *fence_key;
    let consequence = match (removed.as_slice(), added.as_slice()) {
        ([], []) => Some((CycleEvent::Unchanged, Vec::new())),
        ([(_, l)], [c]) if l.is_fence() == is_fence(*c) => {
            Some((CycleEvent::Unchanged, vec![(c.key.clone(), *l)]))
        }
        ([(_, l)], []) if !l.is_fence() => Some((CycleEvent::Death { label: *l }, Vec::new())),
        ([], [c]) if !is_fence(*c) => {
            let label = state.next_label();
            Some((CycleEvent::Birth { label }, vec![(c.key.clone(), label)]))
        }
        ([(_, la), (_, lb)], [c]) => {
            let into = (*la).min(*lb);
            (into.is_fence() == is_fence(*c)).then(|| {
                (
                    CycleEvent::Merge {
                        from: (*la, *lb),
                        into,
                    },
                    vec![(c.key.clone(), into)],
                )
            })
        }
        ([(_, parent)], [a, b]) => split_heir(*parent, a, b, fence_key).map(|(keep, fresh)| {
            let label = state.next_label();
            (
                CycleEvent::Split {
                    from: *parent,
                    into: (*parent, label),
                },
                vec![(keep.key.clone(), *parent), (fresh.key.clone(), label)],
            )
        }),
        _ => None,
    };
    let Some((cycle_event, assigned)) = consequence else {
        trace!("{simplex_move:?} with compound cycle change: {change}");
        return Err(EvasionError::AmbiguousTransition { change });
    };

    Ok(Changeset {
        time,
        simplex_move,
        cycle_event,
        retired_keys: removed.into_iter().map(|(k, _)| k.clone()).collect(),
        assigned,
    })
}
