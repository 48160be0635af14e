use std::fmt;

use serde::{Deserialize, Serialize};

/// Persistent name of a tracked cycle. Allocated monotonically, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CycleLabel(pub u64);

impl CycleLabel {
    /// The fence exterior always carries label 0.
    pub const FENCE: CycleLabel = CycleLabel(0);

    #[inline]
    pub fn is_fence(self) -> bool {
        self == Self::FENCE
    }
}

impl fmt::Display for CycleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Why a label stopped being alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetireCause {
    /// The hole was covered.
    Death,
    /// Merged into another hole, which kept its label.
    Merged { into: CycleLabel },
    /// Merged into the fence exterior.
    FenceAbsorbed,
}

/// Lifetime history of one label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub label: CycleLabel,
    pub created_at: f64,
    pub retired_at: Option<f64>,
    pub cause: Option<RetireCause>,
    /// Label this one split off from.
    pub parent: Option<CycleLabel>,
    /// The region may still hold an undetected evader.
    pub intruder: bool,
    /// Present at initialization.
    pub initial: bool,
}

impl LabelRecord {
    pub(crate) fn fresh(label: CycleLabel, created_at: f64, intruder: bool) -> Self {
        Self {
            label,
            created_at,
            retired_at: None,
            cause: None,
            parent: None,
            intruder,
            initial: false,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.retired_at.is_none()
    }

    /// Time alive up to retirement, or up to `now` for a live label.
    pub fn lifetime(&self, now: f64) -> f64 {
        self.retired_at.unwrap_or(now) - self.created_at
    }
}
