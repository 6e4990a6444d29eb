//! Ghost-node state reconstruction.
//!
//! Flux stencils difference across the one-cell ghost band, so each ghost
//! node carries a conservative state that imposes the no-slip wall: density
//! and pressure mirrored from the adjacent fluid, velocity reflected about
//! the body surface velocity.

use crate::body::ImplicitBody;
use cf_core::{Real, Vec3};
use cf_fluids::{Conservative, FluidResult, GasModel, Primitive};
use cf_grid::{field, Axis, NodeFlag, Partition, Space};

/// Populate every ghost node in the interior box from its fluid 6-neighbors.
///
/// Must run after [`crate::classify`] and the boundary fill, before the flux
/// sweep reads the buffer.
pub fn apply_wall_model<B: ImplicitBody>(
    space: &Space,
    partition: &Partition,
    model: &GasModel,
    bodies: &[B],
    buf: &mut [Real],
) -> FluidResult<()> {
    let ib = partition.interior_box();
    let strides = [
        space.stride(Axis::X),
        space.stride(Axis::Y),
        space.stride(Axis::Z),
    ];

    for k in ib.k_sub..ib.k_sup {
        for j in ib.j_sub..ib.j_sup {
            for i in ib.i_sub..ib.i_sup {
                let n = space.idx(k, j, i);
                let NodeFlag::Ghost(b) = space.flag(n) else {
                    continue;
                };

                let mut rho = 0.0;
                let mut vel = Vec3::zeros();
                let mut p = 0.0;
                let mut count = 0usize;
                for &s in &strides {
                    for m in [n + s, n - s] {
                        if space.flag(m).is_fluid() {
                            let prim =
                                model.primitive(&Conservative::from_slice(field::node(buf, m)))?;
                            rho += prim.rho;
                            vel += Vec3::new(prim.u, prim.v, prim.w);
                            p += prim.p;
                            count += 1;
                        }
                    }
                }
                // Classification guarantees at least one fluid neighbor.
                let r = 1.0 / count as Real;
                rho *= r;
                vel *= r;
                p *= r;

                let pos = Vec3::new(
                    space.coord_of(Axis::X, i),
                    space.coord_of(Axis::Y, j),
                    space.coord_of(Axis::Z, k),
                );
                let wall = bodies[b as usize].surface_velocity(&pos);
                let reflected = 2.0 * wall - vel;

                let ghost = Primitive {
                    rho,
                    u: reflected.x,
                    v: reflected.y,
                    w: reflected.z,
                    p,
                    t: p / (rho * model.gas_r),
                };
                model
                    .conservative(&ghost)
                    .write_to(field::node_mut(buf, n));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Sphere;
    use crate::classify::classify;
    use cf_fluids::RefScales;
    use cf_grid::{Field, GridSpec, SlabBc, NCONS};

    #[test]
    fn ghost_velocity_reflects_about_wall() {
        let mut space = Space::new(GridSpec {
            ncx: 16,
            ncy: 16,
            ncz: 16,
            ng: 2,
            x: (0.0, 1.0),
            y: (0.0, 1.0),
            z: (0.0, 1.0),
        })
        .unwrap();
        let partition = Partition::build(&space, [SlabBc::default(); 6]);
        let model = GasModel::from_reference(1.4, RefScales::unit()).unwrap();
        let body = Sphere::stationary(Vec3::new(0.5, 0.5, 0.5), 0.2);
        classify(&mut space, &partition, &[body]);

        // Uniform rightward stream everywhere.
        let mut f = Field::new(space.n_max);
        let stream = Primitive {
            rho: 1.0,
            u: 2.0,
            v: 0.0,
            w: 0.0,
            p: 1.0,
            t: 1.0 / model.gas_r,
        };
        let cons = model.conservative(&stream);
        for n in 0..space.n_max {
            cons.write_to(&mut f.now_mut()[NCONS * n..NCONS * (n + 1)]);
        }

        apply_wall_model(&space, &partition, &model, &[body], f.now_mut()).unwrap();

        let ib = partition.interior_box();
        let mut checked = 0;
        for k in ib.k_sub..ib.k_sup {
            for j in ib.j_sub..ib.j_sup {
                for i in ib.i_sub..ib.i_sup {
                    let n = space.idx(k, j, i);
                    if let NodeFlag::Ghost(_) = space.flag(n) {
                        let u = Conservative::from_slice(field::node(f.now(), n));
                        let prim = model.primitive(&u).unwrap();
                        // Stationary wall: ghost velocity is the negated
                        // fluid average; rho and p mirror unchanged.
                        assert!((prim.u + 2.0).abs() < 1e-12);
                        assert!(prim.v.abs() < 1e-12);
                        assert!(prim.w.abs() < 1e-12);
                        assert!((prim.rho - 1.0).abs() < 1e-12);
                        assert!((prim.p - 1.0).abs() < 1e-12);
                        checked += 1;
                    }
                }
            }
        }
        assert!(checked > 0, "no ghost nodes exercised");
    }
}
