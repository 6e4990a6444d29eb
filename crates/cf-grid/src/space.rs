//! Padded node space: extents, spacings, and per-node classification flags.

use crate::error::{GridError, GridResult};
use cf_core::{ensure_finite, Real};

/// Index of an embedded body, used by solid and ghost flags.
pub type BodyId = u32;

/// Per-node classification.
///
/// Interior nodes are fluid, solid, or ghost; everything outside the
/// interior box (domain-boundary layers and the exterior padding) is
/// `Exterior`. Solid and ghost nodes remember which body claimed them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeFlag {
    /// Interior node inside an embedded body.
    Solid(BodyId),
    /// Interior node in the flow.
    Fluid,
    /// Interior solid node with at least one fluid 6-neighbor.
    Ghost(BodyId),
    /// Domain-boundary layer or exterior padding.
    Exterior,
}

impl NodeFlag {
    /// Numeric view of the flag: solid -1, fluid 0, ghost 1, exterior 2.
    ///
    /// The exporter's iblank rule is `numeric().abs() < offset`.
    pub fn numeric(self) -> i32 {
        match self {
            NodeFlag::Solid(_) => -1,
            NodeFlag::Fluid => 0,
            NodeFlag::Ghost(_) => 1,
            NodeFlag::Exterior => 2,
        }
    }

    /// Body id carried by solid and ghost nodes.
    pub fn body(self) -> Option<BodyId> {
        match self {
            NodeFlag::Solid(b) | NodeFlag::Ghost(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_fluid(self) -> bool {
        matches!(self, NodeFlag::Fluid)
    }
}

/// Coordinate axis, ordered to match the (k, j, i) index convention:
/// `X` varies fastest (index i), `Z` slowest (index k).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Cyclic successor: X -> Y -> Z -> X.
    pub fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Component index into a (u, v, w) velocity triple.
    pub fn component(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// User-facing grid description, in cells.
#[derive(Clone, Copy, Debug)]
pub struct GridSpec {
    pub ncx: usize,
    pub ncy: usize,
    pub ncz: usize,
    /// Ghost (exterior padding) layer width.
    pub ng: usize,
    pub x: (Real, Real),
    pub y: (Real, Real),
    pub z: (Real, Real),
}

/// The padded node space.
///
/// Cell counts resolve to node counts as `nx = ncx + 2` (interior nodes plus
/// the two domain-boundary layers); the padded extent per axis adds `ng`
/// exterior layers on each side.
#[derive(Clone, Debug)]
pub struct Space {
    pub ncx: usize,
    pub ncy: usize,
    pub ncz: usize,
    pub ng: usize,
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub i_max: usize,
    pub j_max: usize,
    pub k_max: usize,
    /// Flat node count, `i_max * j_max * k_max`.
    pub n_max: usize,
    pub x_min: Real,
    pub x_max: Real,
    pub y_min: Real,
    pub y_max: Real,
    pub z_min: Real,
    pub z_max: Real,
    pub dx: Real,
    pub dy: Real,
    pub dz: Real,
    pub ddx: Real,
    pub ddy: Real,
    pub ddz: Real,
    /// Geometric tolerance, `1e-3 * min(dx, dy, dz)`.
    pub tiny_l: Real,
    flags: Vec<NodeFlag>,
}

impl Space {
    pub fn new(spec: GridSpec) -> GridResult<Self> {
        if spec.ncx < 1 || spec.ncy < 1 || spec.ncz < 1 {
            return Err(GridError::OutOfRange {
                what: "cell counts must be >= 1",
            });
        }
        if spec.ng < 1 {
            return Err(GridError::OutOfRange {
                what: "ghost width must be >= 1",
            });
        }
        for (lo, hi, what) in [
            (spec.x.0, spec.x.1, "x extent"),
            (spec.y.0, spec.y.1, "y extent"),
            (spec.z.0, spec.z.1, "z extent"),
        ] {
            ensure_finite(lo, what)?;
            ensure_finite(hi, what)?;
            if hi <= lo {
                return Err(GridError::DegenerateExtent { what });
            }
        }

        let nx = spec.ncx + 2;
        let ny = spec.ncy + 2;
        let nz = spec.ncz + 2;
        let i_max = nx + 2 * spec.ng;
        let j_max = ny + 2 * spec.ng;
        let k_max = nz + 2 * spec.ng;
        let n_max = i_max * j_max * k_max;

        let dx = (spec.x.1 - spec.x.0) / (nx - 1) as Real;
        let dy = (spec.y.1 - spec.y.0) / (ny - 1) as Real;
        let dz = (spec.z.1 - spec.z.0) / (nz - 1) as Real;

        Ok(Self {
            ncx: spec.ncx,
            ncy: spec.ncy,
            ncz: spec.ncz,
            ng: spec.ng,
            nx,
            ny,
            nz,
            i_max,
            j_max,
            k_max,
            n_max,
            x_min: spec.x.0,
            x_max: spec.x.1,
            y_min: spec.y.0,
            y_max: spec.y.1,
            z_min: spec.z.0,
            z_max: spec.z.1,
            dx,
            dy,
            dz,
            ddx: 1.0 / dx,
            ddy: 1.0 / dy,
            ddz: 1.0 / dz,
            tiny_l: 1e-3 * dx.min(dy).min(dz),
            flags: vec![NodeFlag::Exterior; n_max],
        })
    }

    /// Flat offset of node (k, j, i).
    #[inline]
    pub fn idx(&self, k: usize, j: usize, i: usize) -> usize {
        (k * self.j_max + j) * self.i_max + i
    }

    /// Padded node count along an axis.
    pub fn len(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.i_max,
            Axis::Y => self.j_max,
            Axis::Z => self.k_max,
        }
    }

    /// Unpadded node count along an axis (`nx`, `ny`, `nz`).
    pub fn node_count(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.nx,
            Axis::Y => self.ny,
            Axis::Z => self.nz,
        }
    }

    /// Flat stride of a unit step along an axis.
    #[inline]
    pub fn stride(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => 1,
            Axis::Y => self.i_max,
            Axis::Z => self.i_max * self.j_max,
        }
    }

    pub fn spacing(&self, axis: Axis) -> Real {
        match axis {
            Axis::X => self.dx,
            Axis::Y => self.dy,
            Axis::Z => self.dz,
        }
    }

    pub fn rspacing(&self, axis: Axis) -> Real {
        match axis {
            Axis::X => self.ddx,
            Axis::Y => self.ddy,
            Axis::Z => self.ddz,
        }
    }

    pub fn min_coord(&self, axis: Axis) -> Real {
        match axis {
            Axis::X => self.x_min,
            Axis::Y => self.y_min,
            Axis::Z => self.z_min,
        }
    }

    /// Physical coordinate of node `n` along an axis: `min + (n - ng) * ds`.
    #[inline]
    pub fn coord_of(&self, axis: Axis, n: usize) -> Real {
        self.min_coord(axis) + (n as Real - self.ng as Real) * self.spacing(axis)
    }

    /// Nearest node index to coordinate `x`, half-cell rounding, clamped to
    /// the padded range. Fails only on non-finite input.
    pub fn node_of(&self, axis: Axis, x: Real) -> GridResult<usize> {
        ensure_finite(x, "node coordinate")?;
        let n = ((x - self.min_coord(axis)) * self.rspacing(axis) + 0.5).floor() as isize
            + self.ng as isize;
        Ok(n.clamp(0, self.len(axis) as isize - 1) as usize)
    }

    #[inline]
    pub fn flag(&self, n: usize) -> NodeFlag {
        self.flags[n]
    }

    #[inline]
    pub fn set_flag(&mut self, n: usize, f: NodeFlag) {
        self.flags[n] = f;
    }

    pub fn flags(&self) -> &[NodeFlag] {
        &self.flags
    }

    /// Reset every node to the exterior sentinel.
    pub fn reset_flags(&mut self) {
        self.flags.fill(NodeFlag::Exterior);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small_space() -> Space {
        Space::new(GridSpec {
            ncx: 10,
            ncy: 6,
            ncz: 4,
            ng: 2,
            x: (0.0, 1.0),
            y: (0.0, 1.0),
            z: (0.0, 1.0),
        })
        .unwrap()
    }

    #[test]
    fn derived_counts() {
        let s = small_space();
        assert_eq!(s.nx, 12);
        assert_eq!(s.i_max, 16);
        assert_eq!(s.j_max, 12);
        assert_eq!(s.k_max, 10);
        assert_eq!(s.n_max, 16 * 12 * 10);
        assert!((s.dx - 1.0 / 11.0).abs() < 1e-15);
        assert!((s.ddx - 11.0).abs() < 1e-12);
        assert!(s.tiny_l > 0.0);
    }

    #[test]
    fn rejects_bad_spec() {
        assert!(Space::new(GridSpec {
            ncx: 0,
            ncy: 1,
            ncz: 1,
            ng: 2,
            x: (0.0, 1.0),
            y: (0.0, 1.0),
            z: (0.0, 1.0),
        })
        .is_err());
        assert!(Space::new(GridSpec {
            ncx: 1,
            ncy: 1,
            ncz: 1,
            ng: 0,
            x: (0.0, 1.0),
            y: (0.0, 1.0),
            z: (0.0, 1.0),
        })
        .is_err());
        assert!(Space::new(GridSpec {
            ncx: 1,
            ncy: 1,
            ncz: 1,
            ng: 1,
            x: (1.0, 1.0),
            y: (0.0, 1.0),
            z: (0.0, 1.0),
        })
        .is_err());
    }

    #[test]
    fn idx_is_bijective() {
        let s = small_space();
        let mut seen = vec![false; s.n_max];
        for k in 0..s.k_max {
            for j in 0..s.j_max {
                for i in 0..s.i_max {
                    let n = s.idx(k, j, i);
                    assert!(n < s.n_max);
                    assert!(!seen[n], "offset {n} hit twice");
                    seen[n] = true;
                }
            }
        }
        assert!(seen.iter().all(|&v| v));
    }

    #[test]
    fn node_of_rejects_nan() {
        let s = small_space();
        assert!(s.node_of(Axis::X, Real::NAN).is_err());
    }

    #[test]
    fn node_of_clamps_out_of_range() {
        let s = small_space();
        assert_eq!(s.node_of(Axis::X, -1e9).unwrap(), 0);
        assert_eq!(s.node_of(Axis::X, 1e9).unwrap(), s.i_max - 1);
    }

    proptest! {
        #[test]
        fn coord_round_trip(x0 in 0.0f64..=1.0f64) {
            let s = small_space();
            let i = s.node_of(Axis::X, x0).unwrap();
            let x = s.coord_of(Axis::X, i);
            prop_assert!((x - x0).abs() <= 0.5 * s.dx + 1e-12);
        }
    }
}
