use std::collections::BTreeMap;

use tracing::debug;

use super::labels::{CycleLabel, LabelRecord, RetireCause};
use super::topology::Topology;
use crate::cmap::CycleKey;
use crate::error::{EvasionError, Result};
use crate::transition::{Changeset, CycleEvent};

/// Labels of the current tracked cycles plus the full label history.
///
/// Mutated only through [`TopologicalState::apply`]. Retired labels stay in
/// the history and are never revived.
#[derive(Clone, Debug, PartialEq)]
pub struct TopologicalState {
    assignment: BTreeMap<CycleKey, CycleLabel>,
    records: BTreeMap<CycleLabel, LabelRecord>,
    next: u64,
    time: f64,
    version: u64,
}

impl TopologicalState {
    /// Fence gets `CycleLabel::FENCE`; holes get fresh labels in key order.
    /// Everything present at `t0` may hide an evader.
    pub fn initialize(topology: &Topology, t0: f64) -> Self {
        let mut assignment = BTreeMap::new();
        let mut records = BTreeMap::new();
        let initial = |label: CycleLabel| LabelRecord {
            initial: true,
            ..LabelRecord::fresh(label, t0, true)
        };
        assignment.insert(topology.fence_cycle().key.clone(), CycleLabel::FENCE);
        records.insert(CycleLabel::FENCE, initial(CycleLabel::FENCE));

        let mut keys: Vec<&CycleKey> = topology.holes().map(|c| &c.key).collect();
        keys.sort();
        let mut next = 1;
        for key in keys {
            let label = CycleLabel(next);
            next += 1;
            assignment.insert(key.clone(), label);
            records.insert(label, initial(label));
        }
        debug!(holes = next - 1, t0, "initialized topological state");
        Self {
            assignment,
            records,
            next,
            time: t0,
            version: 0,
        }
    }

    /// Label the next birth or split will receive.
    #[inline]
    pub fn next_label(&self) -> CycleLabel {
        CycleLabel(self.next)
    }

    pub fn label_of(&self, key: &CycleKey) -> Option<CycleLabel> {
        self.assignment.get(key).copied()
    }

    pub fn assignment(&self) -> &BTreeMap<CycleKey, CycleLabel> {
        &self.assignment
    }

    pub fn record(&self, label: CycleLabel) -> Option<&LabelRecord> {
        self.records.get(&label)
    }

    /// Every label ever allocated, in allocation order.
    pub fn records(&self) -> impl Iterator<Item = &LabelRecord> + '_ {
        self.records.values()
    }

    pub fn alive(&self) -> impl Iterator<Item = &LabelRecord> + '_ {
        self.records.values().filter(|r| r.is_alive())
    }

    pub fn is_alive(&self, label: CycleLabel) -> bool {
        self.records.get(&label).is_some_and(|r| r.is_alive())
    }

    /// Lifetime of `label` up to `now` (or up to its retirement).
    pub fn survival(&self, label: CycleLabel, now: f64) -> Option<f64> {
        self.records.get(&label).map(|r| r.lifetime(now))
    }

    /// Some live hole may still contain an evader.
    pub fn has_intruder(&self) -> bool {
        self.alive().any(|r| !r.label.is_fence() && r.intruder)
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of changesets applied so far.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a classified changeset. Checks first, then mutates, so a
    /// rejected changeset leaves the state untouched.
    pub fn apply(&mut self, cs: &Changeset) -> Result<()> {
        self.check(cs)?;
        let t = cs.time;
        match cs.cycle_event {
            CycleEvent::Unchanged => {}
            CycleEvent::Birth { label } => {
                self.records.insert(label, LabelRecord::fresh(label, t, false));
                self.next += 1;
            }
            CycleEvent::Death { label } => self.retire(label, t, RetireCause::Death),
            CycleEvent::Merge { from, into } => {
                let gone = if from.0 == into { from.1 } else { from.0 };
                let carried = self.records.get(&gone).is_some_and(|r| r.intruder);
                if let Some(r) = self.records.get_mut(&into) {
                    r.intruder |= carried;
                }
                let cause = if into.is_fence() {
                    RetireCause::FenceAbsorbed
                } else {
                    RetireCause::Merged { into }
                };
                self.retire(gone, t, cause);
            }
            CycleEvent::Split { from, into } => {
                let intruder = self.records.get(&from).is_some_and(|r| r.intruder);
                let mut rec = LabelRecord::fresh(into.1, t, intruder);
                rec.parent = Some(from);
                self.records.insert(into.1, rec);
                self.next += 1;
            }
        }
        for key in &cs.retired_keys {
            self.assignment.remove(key);
        }
        for (key, label) in &cs.assigned {
            self.assignment.insert(key.clone(), *label);
        }
        self.time = t;
        self.version += 1;
        if cs.cycle_event != CycleEvent::Unchanged {
            debug!(t, event = ?cs.cycle_event, simplex = ?cs.simplex_move, "committed cycle event");
        }
        Ok(())
    }

    fn retire(&mut self, label: CycleLabel, t: f64, cause: RetireCause) {
        if let Some(r) = self.records.get_mut(&label) {
            r.retired_at = Some(t);
            r.cause = Some(cause);
        }
    }

    fn check(&self, cs: &Changeset) -> Result<()> {
        let reject = |why: String| Err(EvasionError::invalid(format!("changeset rejected: {why}")));
        if cs.time < self.time {
            return reject(format!("t={} precedes state time {}", cs.time, self.time));
        }
        for key in &cs.retired_keys {
            if !self.assignment.contains_key(key) {
                return reject(format!("unknown cycle {key:?}"));
            }
        }
        let alive = |l: CycleLabel| self.is_alive(l);
        let fresh_ok = |l: CycleLabel| l == self.next_label();
        let ok = match cs.cycle_event {
            CycleEvent::Unchanged => true,
            CycleEvent::Birth { label } => fresh_ok(label),
            CycleEvent::Death { label } => alive(label) && !label.is_fence(),
            CycleEvent::Merge { from, into } => {
                alive(from.0) && alive(from.1) && from.0 != from.1 && (into == from.0 || into == from.1)
            }
            CycleEvent::Split { from, into } => alive(from) && into.0 == from && fresh_ok(into.1),
        };
        if !ok {
            return reject(format!("{:?} does not match live labels", cs.cycle_event));
        }
        for (_, label) in &cs.assigned {
            let known = alive(*label) || fresh_ok(*label);
            if !known {
                return reject(format!("assigns unknown label {label}"));
            }
        }
        Ok(())
    }
}
