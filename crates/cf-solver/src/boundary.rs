//! Boundary-condition driver over the partition slabs.
//!
//! Each slab spans its boundary-node layer plus the exterior padding
//! behind it; the driver fills the layer and then works outward so every
//! exterior node ends up with a defined state. Slabs overlap in the padded
//! corners; the fixed visit order (west, east, south, north, bottom, top)
//! decides who wins there.

use crate::error::{SolverError, SolverResult};
use cf_core::Real;
use cf_fluids::{Conservative, GasModel, Primitive};
use cf_grid::{field, Axis, BcKind, Face, Partition, Region, Role, Space};

/// Build (k, j, i) from a normal-axis index and two tangential indices.
#[inline]
fn kji(n_axis: Axis, q: usize, t1: Axis, a: usize, t2: Axis, b: usize) -> (usize, usize, usize) {
    let mut out = [0usize; 3];
    for (axis, val) in [(n_axis, q), (t1, a), (t2, b)] {
        out[axis.component()] = val;
    }
    let [i, j, k] = out;
    (k, j, i)
}

fn primitive_at(
    space: &Space,
    model: &GasModel,
    buf: &[Real],
    k: usize,
    j: usize,
    i: usize,
) -> SolverResult<Primitive> {
    let n = space.idx(k, j, i);
    model
        .primitive(&Conservative::from_slice(field::node(buf, n)))
        .map_err(|source| SolverError::NonPhysical {
            k,
            j,
            i,
            step: 0,
            source,
        })
}

/// Apply every slab boundary condition to a buffer.
pub fn apply_boundaries(
    space: &Space,
    partition: &Partition,
    model: &GasModel,
    buf: &mut [Real],
) -> SolverResult<()> {
    for region in partition.slabs() {
        let Role::Slab(face) = region.role else {
            continue;
        };
        match region.bc {
            BcKind::Inlet => fill_inlet(space, region, model, buf),
            BcKind::Outlet => extrapolate(space, face, region, buf),
            BcKind::SlipWall => wall(space, face, region, model, buf, false)?,
            BcKind::NoSlipWall => wall(space, face, region, model, buf, true)?,
            BcKind::Periodic => periodic(space, face, region, buf),
            BcKind::Fluid => {}
        }
    }
    Ok(())
}

/// Normal-axis indices of a slab, ordered so every copy source is already
/// final: outward from the boundary node.
fn normal_indices(face: Face, region: &Region) -> Vec<usize> {
    let (lo, hi) = region.bounds.range(face.axis());
    if face.is_positive() {
        (lo..hi).collect()
    } else {
        (lo..hi).rev().collect()
    }
}

fn fill_inlet(space: &Space, region: &Region, model: &GasModel, buf: &mut [Real]) {
    let v = region.value;
    let cons = model.conservative(&Primitive {
        rho: v.rho,
        u: v.u,
        v: v.v,
        w: v.w,
        p: v.p,
        t: v.t,
    });
    let b = region.bounds;
    for k in b.k_sub..b.k_sup {
        for j in b.j_sub..b.j_sup {
            for i in b.i_sub..b.i_sup {
                cons.write_to(field::node_mut(buf, space.idx(k, j, i)));
            }
        }
    }
}

/// Zero-gradient extrapolation from the first interior layer outward.
fn extrapolate(space: &Space, face: Face, region: &Region, buf: &mut [Real]) {
    let axis = face.axis();
    let t1 = axis.next();
    let t2 = t1.next();
    let (a_lo, a_hi) = region.bounds.range(t1);
    let (b_lo, b_hi) = region.bounds.range(t2);
    let inward: isize = if face.is_positive() { -1 } else { 1 };

    for q in normal_indices(face, region) {
        let src_q = (q as isize + inward) as usize;
        for a in a_lo..a_hi {
            for b in b_lo..b_hi {
                let (k, j, i) = kji(axis, q, t1, a, t2, b);
                let (ks, js, is) = kji(axis, src_q, t1, a, t2, b);
                let src = Conservative::from_slice(field::node(buf, space.idx(ks, js, is)));
                src.write_to(field::node_mut(buf, space.idx(k, j, i)));
            }
        }
    }
}

/// Periodic copy from the opposite interior band. The period is the cell
/// count, `n - 2` node layers.
fn periodic(space: &Space, face: Face, region: &Region, buf: &mut [Real]) {
    let axis = face.axis();
    let t1 = axis.next();
    let t2 = t1.next();
    let (a_lo, a_hi) = region.bounds.range(t1);
    let (b_lo, b_hi) = region.bounds.range(t2);
    let period = space.node_count(axis) as isize - 2;
    let shift = if face.is_positive() { -period } else { period };

    for q in normal_indices(face, region) {
        let src_q = (q as isize + shift) as usize;
        for a in a_lo..a_hi {
            for b in b_lo..b_hi {
                let (k, j, i) = kji(axis, q, t1, a, t2, b);
                let (ks, js, is) = kji(axis, src_q, t1, a, t2, b);
                let src = Conservative::from_slice(field::node(buf, space.idx(ks, js, is)));
                src.write_to(field::node_mut(buf, space.idx(k, j, i)));
            }
        }
    }
}

/// Wall condition: the boundary node takes the wall velocity (no-slip) or
/// keeps its tangential flow with zero normal velocity (slip); padding
/// nodes mirror the matching interior layer with the velocity reflected.
fn wall(
    space: &Space,
    face: Face,
    region: &Region,
    model: &GasModel,
    buf: &mut [Real],
    no_slip: bool,
) -> SolverResult<()> {
    let axis = face.axis();
    let nc = axis.component();
    let t1 = axis.next();
    let t2 = t1.next();
    let (a_lo, a_hi) = region.bounds.range(t1);
    let (b_lo, b_hi) = region.bounds.range(t2);
    let inward: isize = if face.is_positive() { -1 } else { 1 };
    let q_wall = if face.is_positive() {
        region.bounds.range(axis).0
    } else {
        region.bounds.range(axis).1 - 1
    };
    let wall_vel = [region.value.u, region.value.v, region.value.w];

    for a in a_lo..a_hi {
        for b in b_lo..b_hi {
            // Boundary node from its interior neighbor.
            let (ks, js, is) = {
                let q = (q_wall as isize + inward) as usize;
                kji(axis, q, t1, a, t2, b)
            };
            let interior = primitive_at(space, model, buf, ks, js, is)?;
            let mut vel = [interior.u, interior.v, interior.w];
            if no_slip {
                vel = wall_vel;
            } else {
                vel[nc] = 0.0;
            }
            let (k, j, i) = kji(axis, q_wall, t1, a, t2, b);
            let bc = Primitive {
                rho: interior.rho,
                u: vel[0],
                v: vel[1],
                w: vel[2],
                p: interior.p,
                t: interior.p / (interior.rho * model.gas_r),
            };
            model
                .conservative(&bc)
                .write_to(field::node_mut(buf, space.idx(k, j, i)));

            // Padding mirrors the interior, reflected about the wall.
            for m in 1..=space.ng as isize {
                let q_ghost = (q_wall as isize - inward * m) as usize;
                let q_mirror = (q_wall as isize + inward * m) as usize;
                let (km, jm, im) = kji(axis, q_mirror, t1, a, t2, b);
                let mirror = primitive_at(space, model, buf, km, jm, im)?;
                let mut gvel = [mirror.u, mirror.v, mirror.w];
                if no_slip {
                    for c in 0..3 {
                        gvel[c] = 2.0 * wall_vel[c] - gvel[c];
                    }
                } else {
                    gvel[nc] = -gvel[nc];
                }
                let (kg, jg, ig) = kji(axis, q_ghost, t1, a, t2, b);
                let ghost = Primitive {
                    rho: mirror.rho,
                    u: gvel[0],
                    v: gvel[1],
                    w: gvel[2],
                    p: mirror.p,
                    t: mirror.p / (mirror.rho * model.gas_r),
                };
                model
                    .conservative(&ghost)
                    .write_to(field::node_mut(buf, space.idx(kg, jg, ig)));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_fluids::RefScales;
    use cf_grid::{BcValue, Field, GridSpec, SlabBc, NCONS};

    fn space() -> Space {
        Space::new(GridSpec {
            ncx: 4,
            ncy: 4,
            ncz: 4,
            ng: 2,
            x: (0.0, 1.0),
            y: (0.0, 1.0),
            z: (0.0, 1.0),
        })
        .unwrap()
    }

    fn model() -> GasModel {
        GasModel::from_reference(1.4, RefScales::unit()).unwrap()
    }

    /// Fill the computational domain with a recognizable linear ramp and the
    /// padding with garbage that the BC pass must overwrite.
    fn ramp_field(space: &Space, model: &GasModel) -> Field {
        let mut f = Field::new(space.n_max);
        let buf = f.now_mut();
        for k in 0..space.k_max {
            for j in 0..space.j_max {
                for i in 0..space.i_max {
                    let prim = Primitive {
                        rho: 1.0 + 0.01 * i as Real,
                        u: 0.1,
                        v: 0.2,
                        w: 0.3,
                        p: 1.0,
                        t: 1.0 / model.gas_r,
                    };
                    let n = space.idx(k, j, i);
                    model
                        .conservative(&prim)
                        .write_to(&mut buf[NCONS * n..NCONS * (n + 1)]);
                }
            }
        }
        f
    }

    fn prim_at(
        space: &Space,
        model: &GasModel,
        buf: &[Real],
        k: usize,
        j: usize,
        i: usize,
    ) -> Primitive {
        model
            .primitive(&Conservative::from_slice(field::node(
                buf,
                space.idx(k, j, i),
            )))
            .unwrap()
    }

    fn slabs_with(kind: BcKind, value: BcValue) -> [SlabBc; 6] {
        [SlabBc { kind, value }; 6]
    }

    #[test]
    fn outlet_extrapolates_outward() {
        let space = space();
        let model = model();
        let partition = Partition::build(&space, slabs_with(BcKind::Outlet, BcValue::default()));
        let mut f = ramp_field(&space, &model);
        apply_boundaries(&space, &partition, &model, f.now_mut()).unwrap();

        let (kc, jc) = (space.k_max / 2, space.j_max / 2);
        // Everything west of the first interior node copies its density.
        let first = prim_at(&space, &model, f.now(), kc, jc, space.ng + 1);
        for i in 0..=space.ng {
            let p = prim_at(&space, &model, f.now(), kc, jc, i);
            assert!((p.rho - first.rho).abs() < 1e-12);
        }
    }

    #[test]
    fn periodic_copies_opposite_interior() {
        let space = space();
        let model = model();
        let partition = Partition::build(&space, slabs_with(BcKind::Periodic, BcValue::default()));
        let mut f = ramp_field(&space, &model);
        apply_boundaries(&space, &partition, &model, f.now_mut()).unwrap();

        let (kc, jc) = (space.k_max / 2, space.j_max / 2);
        let period = space.nx - 2;
        // West boundary node matches the interior node one period east.
        let west = prim_at(&space, &model, f.now(), kc, jc, space.ng);
        let src = prim_at(&space, &model, f.now(), kc, jc, space.ng + period);
        assert!((west.rho - src.rho).abs() < 1e-12);
    }

    #[test]
    fn no_slip_wall_reflects_velocity() {
        let space = space();
        let model = model();
        let partition =
            Partition::build(&space, slabs_with(BcKind::NoSlipWall, BcValue::default()));
        let mut f = ramp_field(&space, &model);
        apply_boundaries(&space, &partition, &model, f.now_mut()).unwrap();

        let (kc, jc) = (space.k_max / 2, space.j_max / 2);
        // Boundary node carries the (zero) wall velocity.
        let bc = prim_at(&space, &model, f.now(), kc, jc, space.ng);
        assert!(bc.u.abs() < 1e-12 && bc.v.abs() < 1e-12 && bc.w.abs() < 1e-12);

        // First padding node is the reflection of the first interior node.
        let pad = prim_at(&space, &model, f.now(), kc, jc, space.ng - 1);
        let mirror = prim_at(&space, &model, f.now(), kc, jc, space.ng + 1);
        assert!((pad.u + mirror.u).abs() < 1e-12);
        assert!((pad.v + mirror.v).abs() < 1e-12);
        assert!((pad.rho - mirror.rho).abs() < 1e-12);
    }

    #[test]
    fn slip_wall_keeps_tangential_velocity() {
        let space = space();
        let model = model();
        let partition = Partition::build(&space, slabs_with(BcKind::SlipWall, BcValue::default()));
        let mut f = ramp_field(&space, &model);
        apply_boundaries(&space, &partition, &model, f.now_mut()).unwrap();

        let (kc, jc) = (space.k_max / 2, space.j_max / 2);
        let pad = prim_at(&space, &model, f.now(), kc, jc, space.ng - 1);
        let mirror = prim_at(&space, &model, f.now(), kc, jc, space.ng + 1);
        // Normal (x) component flips, tangential components survive.
        assert!((pad.u + mirror.u).abs() < 1e-12);
        assert!((pad.v - mirror.v).abs() < 1e-12);
        assert!((pad.w - mirror.w).abs() < 1e-12);
    }

    #[test]
    fn inlet_fixes_value_over_slab() {
        let space = space();
        let model = model();
        let value = BcValue {
            rho: 2.0,
            u: 1.5,
            v: 0.0,
            w: 0.0,
            p: 3.0,
            t: 3.0 / (2.0 * model.gas_r),
        };
        let mut slabs = slabs_with(BcKind::Outlet, BcValue::default());
        slabs[0] = SlabBc {
            kind: BcKind::Inlet,
            value,
        };
        let partition = Partition::build(&space, slabs);
        let mut f = ramp_field(&space, &model);
        apply_boundaries(&space, &partition, &model, f.now_mut()).unwrap();

        let (kc, jc) = (space.k_max / 2, space.j_max / 2);
        for i in 0..=space.ng {
            let p = prim_at(&space, &model, f.now(), kc, jc, i);
            assert!((p.rho - 2.0).abs() < 1e-12);
            assert!((p.u - 1.5).abs() < 1e-12);
            assert!((p.p - 3.0).abs() < 1e-12);
        }
    }
}
