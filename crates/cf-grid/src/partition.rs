//! Fixed partition of the padded index space into labeled regions.
//!
//! Thirteen boxes cover the domain: the whole padded space, six
//! boundary-condition slabs (one per face, spanning the boundary-node layer
//! plus its exterior padding), five edge layers peeling the interior shell,
//! and the innermost region. Callers reach regions through the role-based
//! accessors, never through raw indices.

use crate::space::{Axis, Space};
use cf_core::Real;

/// Domain face, named from the axis directions: West/East are -x/+x,
/// South/North -y/+y, Bottom/Top -z/+z.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    West,
    East,
    South,
    North,
    Bottom,
    Top,
}

impl Face {
    /// Visit order of the boundary driver; later faces win where slabs
    /// overlap in the exterior corners.
    pub const ALL: [Face; 6] = [
        Face::West,
        Face::East,
        Face::South,
        Face::North,
        Face::Bottom,
        Face::Top,
    ];

    /// Axis this face is normal to.
    pub fn axis(self) -> Axis {
        match self {
            Face::West | Face::East => Axis::X,
            Face::South | Face::North => Axis::Y,
            Face::Bottom | Face::Top => Axis::Z,
        }
    }

    /// True for the +axis face of the pair.
    pub fn is_positive(self) -> bool {
        matches!(self, Face::East | Face::North | Face::Top)
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::West => Face::East,
            Face::East => Face::West,
            Face::South => Face::North,
            Face::North => Face::South,
            Face::Bottom => Face::Top,
            Face::Top => Face::Bottom,
        }
    }

    /// Outward normal in (nz, ny, nx) order matching the (k, j, i) index
    /// convention.
    pub fn normal(self) -> [i32; 3] {
        match self {
            Face::West => [0, 0, -1],
            Face::East => [0, 0, 1],
            Face::South => [0, -1, 0],
            Face::North => [0, 1, 0],
            Face::Bottom => [-1, 0, 0],
            Face::Top => [1, 0, 0],
        }
    }
}

/// Boundary-condition kind carried by a slab region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BcKind {
    Inlet,
    Outlet,
    SlipWall,
    NoSlipWall,
    Periodic,
    /// Interior regions: no boundary condition applies.
    Fluid,
}

/// Primitive boundary value (rho, u, v, w, p, T). Only the components a
/// given BC kind consumes are meaningful.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BcValue {
    pub rho: Real,
    pub u: Real,
    pub v: Real,
    pub w: Real,
    pub p: Real,
    pub t: Real,
}

/// Per-face boundary request used to build the partition.
#[derive(Clone, Copy, Debug)]
pub struct SlabBc {
    pub kind: BcKind,
    pub value: BcValue,
}

impl Default for SlabBc {
    fn default() -> Self {
        Self {
            kind: BcKind::Outlet,
            value: BcValue::default(),
        }
    }
}

/// Half-open index box; `sub` inclusive, `sup` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Box3 {
    pub k_sub: usize,
    pub k_sup: usize,
    pub j_sub: usize,
    pub j_sup: usize,
    pub i_sub: usize,
    pub i_sup: usize,
}

impl Box3 {
    pub fn count(&self) -> usize {
        (self.k_sup - self.k_sub) * (self.j_sup - self.j_sub) * (self.i_sup - self.i_sub)
    }

    pub fn contains(&self, k: usize, j: usize, i: usize) -> bool {
        k >= self.k_sub
            && k < self.k_sup
            && j >= self.j_sub
            && j < self.j_sup
            && i >= self.i_sub
            && i < self.i_sup
    }

    pub fn range(&self, axis: Axis) -> (usize, usize) {
        match axis {
            Axis::X => (self.i_sub, self.i_sup),
            Axis::Y => (self.j_sub, self.j_sup),
            Axis::Z => (self.k_sub, self.k_sup),
        }
    }
}

/// Role of a region within the partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The entire padded domain.
    Whole,
    /// Boundary slab of a face: boundary-node layer plus exterior padding.
    Slab(Face),
    /// One of the five layers peeling the interior shell.
    Edge(u8),
    /// The innermost region.
    Interior,
}

/// One labeled index box.
#[derive(Clone, Copy, Debug)]
pub struct Region {
    pub role: Role,
    pub bounds: Box3,
    pub bc: BcKind,
    pub value: BcValue,
    /// Outward normal in (nz, ny, nx); zero for non-slab regions.
    pub normal: [i32; 3],
}

/// The fixed set of thirteen regions, plus the derived interior and
/// computational-domain boxes.
#[derive(Clone, Debug)]
pub struct Partition {
    regions: Vec<Region>,
    interior: Box3,
    domain: Box3,
}

impl Partition {
    /// Number of regions; fixed.
    pub const NREGION: usize = 13;

    pub fn build(space: &Space, slabs: [SlabBc; 6]) -> Self {
        let ng = space.ng;
        let whole = Box3 {
            k_sub: 0,
            k_sup: space.k_max,
            j_sub: 0,
            j_sup: space.j_max,
            i_sub: 0,
            i_sup: space.i_max,
        };
        // Computational domain: interior plus the boundary-node layers.
        let domain = Box3 {
            k_sub: ng,
            k_sup: ng + space.nz,
            j_sub: ng,
            j_sup: ng + space.ny,
            i_sub: ng,
            i_sup: ng + space.nx,
        };
        // Interior: strictly inside the boundary-node layers.
        let interior = Box3 {
            k_sub: ng + 1,
            k_sup: ng + space.nz - 1,
            j_sub: ng + 1,
            j_sup: ng + space.ny - 1,
            i_sub: ng + 1,
            i_sup: ng + space.nx - 1,
        };

        let mut regions = Vec::with_capacity(Self::NREGION);
        regions.push(Region {
            role: Role::Whole,
            bounds: whole,
            bc: BcKind::Fluid,
            value: BcValue::default(),
            normal: [0, 0, 0],
        });

        for (face, slab) in Face::ALL.into_iter().zip(slabs) {
            let mut b = whole;
            let axis = face.axis();
            let (lo, hi) = domain.range(axis);
            let (sub, sup) = if face.is_positive() {
                // Boundary-node layer and everything beyond it.
                (hi - 1, space.len(axis))
            } else {
                (0, lo + 1)
            };
            match axis {
                Axis::X => {
                    b.i_sub = sub;
                    b.i_sup = sup;
                }
                Axis::Y => {
                    b.j_sub = sub;
                    b.j_sup = sup;
                }
                Axis::Z => {
                    b.k_sub = sub;
                    b.k_sup = sup;
                }
            }
            regions.push(Region {
                role: Role::Slab(face),
                bounds: b,
                bc: slab.kind,
                value: slab.value,
                normal: face.normal(),
            });
        }

        // Five edge layers peel the interior shell; the remainder is the
        // innermost region. Peeling order: bottom, top, south, north, west.
        // On a degenerate 1-node axis the later layers collapse to empty
        // boxes instead of underflowing.
        let ib = interior;
        let kb1 = (ib.k_sub + 1).min(ib.k_sup);
        let kt0 = ib.k_sup.saturating_sub(1).max(kb1);
        let jb1 = (ib.j_sub + 1).min(ib.j_sup);
        let jt0 = ib.j_sup.saturating_sub(1).max(jb1);
        let iw1 = (ib.i_sub + 1).min(ib.i_sup);
        let edges = [
            Box3 {
                k_sub: ib.k_sub,
                k_sup: kb1,
                ..ib
            },
            Box3 {
                k_sub: kt0,
                k_sup: ib.k_sup,
                ..ib
            },
            Box3 {
                k_sub: kb1,
                k_sup: kt0,
                j_sub: ib.j_sub,
                j_sup: jb1,
                ..ib
            },
            Box3 {
                k_sub: kb1,
                k_sup: kt0,
                j_sub: jt0,
                j_sup: ib.j_sup,
                ..ib
            },
            Box3 {
                k_sub: kb1,
                k_sup: kt0,
                j_sub: jb1,
                j_sup: jt0,
                i_sub: ib.i_sub,
                i_sup: iw1,
            },
        ];
        for (e, b) in edges.into_iter().enumerate() {
            regions.push(Region {
                role: Role::Edge(e as u8),
                bounds: b,
                bc: BcKind::Fluid,
                value: BcValue::default(),
                normal: [0, 0, 0],
            });
        }
        regions.push(Region {
            role: Role::Interior,
            bounds: Box3 {
                k_sub: kb1,
                k_sup: kt0,
                j_sub: jb1,
                j_sup: jt0,
                i_sub: iw1,
                i_sup: ib.i_sup,
            },
            bc: BcKind::Fluid,
            value: BcValue::default(),
            normal: [0, 0, 0],
        });

        Self {
            regions,
            interior,
            domain,
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The boundary slab of a face.
    pub fn slab(&self, face: Face) -> &Region {
        // Slabs are stored in Face::ALL order right after the whole region.
        &self.regions[1 + Face::ALL.iter().position(|&f| f == face).unwrap_or(0)]
    }

    /// Slab regions in visit order.
    pub fn slabs(&self) -> impl Iterator<Item = &Region> {
        self.regions
            .iter()
            .filter(|r| matches!(r.role, Role::Slab(_)))
    }

    /// The full interior box (every node the classifier visits).
    pub fn interior_box(&self) -> Box3 {
        self.interior
    }

    /// The computational domain: interior plus boundary-node layers.
    pub fn domain_box(&self) -> Box3 {
        self.domain
    }

    /// The whole padded domain.
    pub fn whole_box(&self) -> Box3 {
        self.regions[0].bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::GridSpec;

    fn space() -> Space {
        Space::new(GridSpec {
            ncx: 8,
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
    fn thirteen_regions() {
        let s = space();
        let p = Partition::build(&s, [SlabBc::default(); 6]);
        assert_eq!(p.regions().len(), Partition::NREGION);
        assert_eq!(p.whole_box().count(), s.n_max);
    }

    #[test]
    fn interior_layers_partition_the_interior() {
        let s = space();
        let p = Partition::build(&s, [SlabBc::default(); 6]);
        let ib = p.interior_box();
        let inner: Vec<&Region> = p
            .regions()
            .iter()
            .filter(|r| matches!(r.role, Role::Edge(_) | Role::Interior))
            .collect();
        assert_eq!(inner.len(), 6);
        let total: usize = inner.iter().map(|r| r.bounds.count()).sum();
        assert_eq!(total, ib.count());
        // Disjoint and covering.
        for k in ib.k_sub..ib.k_sup {
            for j in ib.j_sub..ib.j_sup {
                for i in ib.i_sub..ib.i_sup {
                    let hits = inner
                        .iter()
                        .filter(|r| r.bounds.contains(k, j, i))
                        .count();
                    assert_eq!(hits, 1, "node ({k},{j},{i}) in {hits} regions");
                }
            }
        }
    }

    #[test]
    fn slab_bounds_and_normals() {
        let s = space();
        let p = Partition::build(&s, [SlabBc::default(); 6]);
        let west = p.slab(Face::West);
        assert_eq!(west.bounds.i_sub, 0);
        assert_eq!(west.bounds.i_sup, s.ng + 1);
        assert_eq!(west.normal, [0, 0, -1]);

        let top = p.slab(Face::Top);
        assert_eq!(top.bounds.k_sub, s.ng + s.nz - 1);
        assert_eq!(top.bounds.k_sup, s.k_max);
        assert_eq!(top.normal, [1, 0, 0]);
    }

    #[test]
    fn degenerate_axes_collapse_edges() {
        // One-cell x and z axes (the 2D convention) leave a 1-node-thick
        // interior; the peeled layers must collapse instead of underflow.
        let s = Space::new(GridSpec {
            ncx: 1,
            ncy: 8,
            ncz: 1,
            ng: 2,
            x: (0.0, 1.0),
            y: (0.0, 1.0),
            z: (0.0, 0.125),
        })
        .unwrap();
        let p = Partition::build(&s, [SlabBc::default(); 6]);
        let ib = p.interior_box();
        assert_eq!(ib.count(), 8);
        let total: usize = p
            .regions()
            .iter()
            .filter(|r| matches!(r.role, Role::Edge(_) | Role::Interior))
            .map(|r| r.bounds.count())
            .sum();
        assert_eq!(total, ib.count());
    }

    #[test]
    fn face_opposites() {
        for f in Face::ALL {
            assert_eq!(f.opposite().opposite(), f);
            assert_ne!(f.opposite().is_positive(), f.is_positive());
        }
    }
}
