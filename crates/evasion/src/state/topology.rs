use serde::{Deserialize, Serialize};

use crate::cmap::{BoundaryCycle, CMap, CycleKey, Orientation};
use crate::complex::{build_complex, Complex, CoverageCfg, Simplex};
use crate::error::{EvasionError, Result};
use crate::geom2::{signed_area, GeomCfg, Sensor};

/// The fixed outer ring: sensors `0..len`, counter-clockwise.
///
/// The fence cycle is the boundary cycle containing dart `1→0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fence {
    len: usize,
}

impl Fence {
    pub fn new(len: usize) -> Result<Self> {
        if len < 3 {
            return Err(EvasionError::invalid(format!(
                "fence needs at least 3 sensors, got {len}"
            )));
        }
        Ok(Self { len })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        v < self.len
    }

    /// Dart on the outside of the fence polygon.
    #[inline]
    pub fn anchor(&self) -> (usize, usize) {
        (1, 0)
    }
}

/// Everything derived from one sensor snapshot: complex, map, cycles, and
/// which cycles are tracked (the fence plus every hole).
#[derive(Clone, Debug)]
pub struct Topology {
    sensors: Vec<Sensor>,
    complex: Complex,
    cmap: CMap,
    cycles: Vec<BoundaryCycle>,
    fence_cycle: usize,
    holes: Vec<usize>,
}

impl Topology {
    pub fn build(sensors: &[Sensor], fence: Fence, geom: &GeomCfg, cov: &CoverageCfg) -> Result<Self> {
        if sensors.len() < fence.len() {
            return Err(EvasionError::invalid(format!(
                "fence of {} sensors but only {} sensors given",
                fence.len(),
                sensors.len()
            )));
        }
        let ring = signed_area(sensors[..fence.len()].iter().map(|s| s.pos));
        if ring <= 0.0 {
            return Err(EvasionError::invalid(
                "fence sensors are not in counter-clockwise order",
            ));
        }

        let complex = build_complex(sensors, geom, cov)?;
        let cmap = CMap::new(&complex);
        let cycles = cmap.boundary_cycles()?;
        let (a, b) = fence.anchor();
        let fence_cycle = cycles
            .iter()
            .position(|c| c.contains_dart(a, b))
            .ok_or_else(|| {
                EvasionError::invalid(format!("fence edge {b}-{a} is not in the complex"))
            })?;
        let holes = (0..cycles.len())
            .filter(|&k| k != fence_cycle && !is_covered_face(&complex, &cycles[k]))
            .collect();

        Ok(Self {
            sensors: sensors.to_vec(),
            complex,
            cmap,
            cycles,
            fence_cycle,
            holes,
        })
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn complex(&self) -> &Complex {
        &self.complex
    }

    pub fn cmap(&self) -> &CMap {
        &self.cmap
    }

    /// All boundary cycles, tracked or not.
    pub fn cycles(&self) -> &[BoundaryCycle] {
        &self.cycles
    }

    pub fn fence_cycle(&self) -> &BoundaryCycle {
        &self.cycles[self.fence_cycle]
    }

    pub fn holes(&self) -> impl Iterator<Item = &BoundaryCycle> + '_ {
        self.holes.iter().map(move |&k| &self.cycles[k])
    }

    pub fn num_holes(&self) -> usize {
        self.holes.len()
    }

    /// Fence first, then holes.
    pub fn tracked(&self) -> impl Iterator<Item = &BoundaryCycle> + '_ {
        std::iter::once(self.fence_cycle()).chain(self.holes())
    }

    pub fn tracked_cycle(&self, key: &CycleKey) -> Option<&BoundaryCycle> {
        self.tracked().find(|c| &c.key == key)
    }

    #[inline]
    pub fn is_fence(&self, cycle: &BoundaryCycle) -> bool {
        cycle.key == self.fence_cycle().key
    }
}

/// A cycle that is just the counter-clockwise walk around a retained triangle.
fn is_covered_face(complex: &Complex, cycle: &BoundaryCycle) -> bool {
    cycle.orientation == Orientation::Ccw
        && cycle.len() == 3
        && Simplex::from_vertices(&cycle.vertices).is_some_and(|t| complex.contains(&t))
}
