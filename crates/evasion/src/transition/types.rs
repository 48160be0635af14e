use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cmap::CycleKey;
use crate::complex::Simplex;
use crate::state::CycleLabel;

/// One atomic change of the coverage complex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimplexMove {
    /// No simplex changed.
    Trivial,
    EdgeInserted(Simplex),
    EdgeRemoved(Simplex),
    TriangleCovered(Simplex),
    TriangleUncovered(Simplex),
    /// An edge and a triangle having it as a face appear together.
    PairInserted { edge: Simplex, triangle: Simplex },
    PairRemoved { edge: Simplex, triangle: Simplex },
    /// The two diagonals of one quadrilateral swap.
    EdgeFlip { removed: Simplex, inserted: Simplex },
}

/// The single cycle-level consequence of a classified step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleEvent {
    /// Labels carry over; at most one tracked cycle changed shape.
    Unchanged,
    Birth { label: CycleLabel },
    Death { label: CycleLabel },
    Merge {
        from: (CycleLabel, CycleLabel),
        into: CycleLabel,
    },
    /// `into.0` inherits `from`; `into.1` is fresh.
    Split {
        from: CycleLabel,
        into: (CycleLabel, CycleLabel),
    },
}

/// Structural events in the order they were discovered within one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructuralEvent {
    EdgeFlip {
        removed: Simplex,
        inserted: Simplex,
    },
    CycleSplit {
        from: CycleLabel,
        into: (CycleLabel, CycleLabel),
    },
    CycleMerge {
        from: (CycleLabel, CycleLabel),
        into: CycleLabel,
    },
    CycleBirth {
        label: CycleLabel,
    },
    CycleDeath {
        label: CycleLabel,
    },
}

/// A classified transition, ready to be applied to a `TopologicalState`.
#[derive(Clone, Debug, PartialEq)]
pub struct Changeset {
    pub time: f64,
    pub simplex_move: SimplexMove,
    pub cycle_event: CycleEvent,
    /// Tracked cycle keys that no longer exist.
    pub retired_keys: Vec<CycleKey>,
    /// New tracked cycle keys and the label each one carries.
    pub assigned: Vec<(CycleKey, CycleLabel)>,
}

impl Changeset {
    pub fn is_trivial(&self) -> bool {
        self.simplex_move == SimplexMove::Trivial
            && self.cycle_event == CycleEvent::Unchanged
            && self.retired_keys.is_empty()
    }

    pub fn events(&self) -> Vec<StructuralEvent> {
        let mut out = Vec::with_capacity(2);
        if let SimplexMove::EdgeFlip { removed, inserted } = self.simplex_move {
            out.push(StructuralEvent::EdgeFlip { removed, inserted });
        }
        match self.cycle_event {
            CycleEvent::Unchanged => {}
            CycleEvent::Birth { label } => out.push(StructuralEvent::CycleBirth { label }),
            CycleEvent::Death { label } => out.push(StructuralEvent::CycleDeath { label }),
            CycleEvent::Merge { from, into } => {
                out.push(StructuralEvent::CycleMerge { from, into })
            }
            CycleEvent::Split { from, into } => {
                out.push(StructuralEvent::CycleSplit { from, into })
            }
        }
        out
    }
}

/// What changed between two complexes, for diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub edges_added: Vec<Simplex>,
    pub edges_removed: Vec<Simplex>,
    pub triangles_added: Vec<Simplex>,
    pub triangles_removed: Vec<Simplex>,
    pub cycles_added: usize,
    pub cycles_removed: usize,
}

impl ChangeSummary {
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.edges_added.len(),
            self.edges_removed.len(),
            self.triangles_added.len(),
            self.triangles_removed.len(),
        )
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, sign: char, xs: &[Simplex]) -> fmt::Result {
    for s in xs {
        write!(f, " {sign}{s}")?;
    }
    Ok(())
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (ea, er, ta, tr) = self.counts();
        write!(
            f,
            "edges +{ea}/-{er}, triangles +{ta}/-{tr}, tracked cycles +{}/-{}",
            self.cycles_added, self.cycles_removed
        )?;
        if ea + er + ta + tr > 0 && ea + er + ta + tr <= 8 {
            f.write_str(" [")?;
            write_list(f, '+', &self.edges_added)?;
            write_list(f, '-', &self.edges_removed)?;
            write_list(f, '+', &self.triangles_added)?;
            write_list(f, '-', &self.triangles_removed)?;
            f.write_str(" ]")?;
        }
        Ok(())
    }
}
