//! Directional flux sweep.
//!
//! One stage evaluates, for every interior fluid node, the accumulated
//! divergence of the split convective flux and the viscous flux over all
//! three directions, and blends it into the write buffer:
//!
//! `write[n] = a * write[n] + b * (read[n] + dt * L(read)[n])`
//!
//! Forward Euler is `(a, b) = (0, 1)`; the second TVD RK2 stage is
//! `(1/2, 1/2)` with the roles of the buffers reversed. Non-fluid interior
//! nodes copy through so the write buffer stays fully defined.
//!
//! The write buffer is partitioned into k-planes for rayon; the read buffer
//! is shared immutably, so stencils never observe partial updates.

use crate::error::{SolverError, SolverResult};
use cf_case::Scheme;
use cf_core::Real;
use cf_fluids::{Conservative, FluidResult, GasModel};
use cf_grid::{field, Axis, Partition, Space, NCONS};
use cf_kernels::{split_face_flux, viscous_face_flux};
use rayon::prelude::*;

/// Spatial operator at one fluid node: minus the convective divergence plus
/// the viscous divergence, all three directions accumulated.
fn rhs_at(
    space: &Space,
    model: &GasModel,
    scheme: &Scheme,
    read: &[Real],
    k: usize,
    j: usize,
    i: usize,
) -> FluidResult<[Real; 5]> {
    let n = space.idx(k, j, i);
    let u_c = Conservative::from_slice(field::node(read, n));
    let mut rhs = [0.0; 5];

    for axis in Axis::ALL {
        let s = space.stride(axis);
        let dds = space.rspacing(axis);
        let u_m = Conservative::from_slice(field::node(read, n - s));
        let u_p = Conservative::from_slice(field::node(read, n + s));

        let f_plus = split_face_flux(&u_c, &u_p, model, axis, scheme.average, scheme.splitter)?;
        let f_minus = split_face_flux(&u_m, &u_c, model, axis, scheme.average, scheme.splitter)?;
        for c in 0..NCONS {
            rhs[c] -= (f_plus[c] - f_minus[c]) * dds;
        }

        if !scheme.inviscid {
            let (km, jm, im) = match axis {
                Axis::X => (k, j, i - 1),
                Axis::Y => (k, j - 1, i),
                Axis::Z => (k - 1, j, i),
            };
            let fv_plus = viscous_face_flux(space, model, read, axis, k, j, i)?;
            let fv_minus = viscous_face_flux(space, model, read, axis, km, jm, im)?;
            for c in 0..NCONS {
                rhs[c] += (fv_plus[c] - fv_minus[c]) * dds;
            }
        }
    }
    Ok(rhs)
}

/// Run one stage over the interior box.
#[allow(clippy::too_many_arguments)]
pub fn sweep_stage(
    space: &Space,
    partition: &Partition,
    model: &GasModel,
    scheme: &Scheme,
    dt: Real,
    a: Real,
    b: Real,
    step: u64,
    read: &[Real],
    write: &mut [Real],
) -> SolverResult<()> {
    let ib = partition.interior_box();
    let plane = space.j_max * space.i_max * NCONS;

    write
        .par_chunks_mut(plane)
        .enumerate()
        .try_for_each(|(k, out_plane)| -> SolverResult<()> {
            if k < ib.k_sub || k >= ib.k_sup {
                return Ok(());
            }
            for j in ib.j_sub..ib.j_sup {
                for i in ib.i_sub..ib.i_sup {
                    let n = space.idx(k, j, i);
                    let local = j * space.i_max + i;
                    let out = &mut out_plane[NCONS * local..NCONS * (local + 1)];

                    if !space.flag(n).is_fluid() {
                        out.copy_from_slice(field::node(read, n));
                        continue;
                    }

                    let rhs = rhs_at(space, model, scheme, read, k, j, i).map_err(|source| {
                        SolverError::NonPhysical {
                            k,
                            j,
                            i,
                            step,
                            source,
                        }
                    })?;
                    let u_c = field::node(read, n);
                    for c in 0..NCONS {
                        out[c] = a * out[c] + b * (u_c[c] + dt * rhs[c]);
                    }
                }
            }
            Ok(())
        })
}
