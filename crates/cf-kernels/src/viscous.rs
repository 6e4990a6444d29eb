//! Face-centered viscous flux stencil.
//!
//! At a face between a node and its +axis neighbor, the face-normal
//! derivatives are two-point central differences and the two tangential
//! derivatives are four-point averages across the face. The three directions
//! run through one code path via cyclic axis permutation.

use cf_core::Real;
use cf_fluids::{Conservative, FluidResult, GasModel};
use cf_grid::{field, Axis, Space};

/// Velocity triple and temperature at a node.
#[inline]
fn vel_t(model: &GasModel, buf: &[Real], n: usize) -> FluidResult<([Real; 3], Real)> {
    let prim = model.primitive(&Conservative::from_slice(field::node(buf, n)))?;
    Ok(([prim.u, prim.v, prim.w], prim.t))
}

/// Viscous flux through the face between node (k, j, i) and its +axis
/// neighbor.
///
/// The full stencil (the two face nodes and their eight tangential
/// neighbors) must exist and hold physical states; the caller only asks for
/// faces whose neighbors lie inside the padded domain.
pub fn viscous_face_flux(
    space: &Space,
    model: &GasModel,
    buf: &[Real],
    axis: Axis,
    k: usize,
    j: usize,
    i: usize,
) -> FluidResult<[Real; 5]> {
    let a0 = axis;
    let a1 = axis.next();
    let a2 = a1.next();
    let s0 = space.stride(a0);
    let s1 = space.stride(a1);
    let s2 = space.stride(a2);
    let n = space.idx(k, j, i);
    let ne = n + s0;

    let (v_o, t_o) = vel_t(model, buf, n)?;
    let (v_e, t_e) = vel_t(model, buf, ne)?;

    let dd0 = space.rspacing(a0);
    let dd1 = space.rspacing(a1);
    let dd2 = space.rspacing(a2);

    // grad[c][a]: derivative of global velocity component c along the
    // rotated frame axis a (0 = face normal).
    let mut grad = [[0.0; 3]; 3];
    for c in 0..3 {
        grad[c][0] = (v_e[c] - v_o[c]) * dd0;
    }
    let dt_n = (t_e - t_o) * dd0;

    let (v_p1, _) = vel_t(model, buf, n + s1)?;
    let (v_p1e, _) = vel_t(model, buf, n + s1 + s0)?;
    let (v_m1, _) = vel_t(model, buf, n - s1)?;
    let (v_m1e, _) = vel_t(model, buf, n - s1 + s0)?;
    for c in 0..3 {
        grad[c][1] = 0.25 * (v_p1[c] + v_p1e[c] - v_m1[c] - v_m1e[c]) * dd1;
    }

    let (v_p2, _) = vel_t(model, buf, n + s2)?;
    let (v_p2e, _) = vel_t(model, buf, n + s2 + s0)?;
    let (v_m2, _) = vel_t(model, buf, n - s2)?;
    let (v_m2e, _) = vel_t(model, buf, n - s2 + s0)?;
    for c in 0..3 {
        grad[c][2] = 0.25 * (v_p2[c] + v_p2e[c] - v_m2[c] - v_m2e[c]) * dd2;
    }

    let c0 = a0.component();
    let c1 = a1.component();
    let c2 = a2.component();

    let t_hat = 0.5 * (t_o + t_e);
    let mu = model.viscosity(t_hat);
    let kappa = model.conductivity(mu);
    let div_v = grad[c0][0] + grad[c1][1] + grad[c2][2];

    let tau_n = mu * (2.0 * grad[c0][0] - 2.0 / 3.0 * div_v);
    let tau_t1 = mu * (grad[c0][1] + grad[c1][0]);
    let tau_t2 = mu * (grad[c0][2] + grad[c2][0]);

    let hat = |c: usize| 0.5 * (v_o[c] + v_e[c]);

    let mut f = [0.0; 5];
    f[1 + c0] = tau_n;
    f[1 + c1] = tau_t1;
    f[1 + c2] = tau_t2;
    f[4] = kappa * dt_n + tau_n * hat(c0) + tau_t1 * hat(c1) + tau_t2 * hat(c2);
    Ok(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_fluids::{Primitive, RefScales};
    use cf_grid::{Field, GridSpec, NCONS};

    fn setup() -> (Space, GasModel) {
        let space = Space::new(GridSpec {
            ncx: 4,
            ncy: 4,
            ncz: 4,
            ng: 2,
            x: (0.0, 1.0),
            y: (0.0, 1.0),
            z: (0.0, 1.0),
        })
        .unwrap();
        let model = GasModel::from_reference(1.4, RefScales::unit()).unwrap();
        (space, model)
    }

    /// Fill the whole padded buffer with a linear shear u = a*y at uniform
    /// density and pressure.
    fn fill_shear(space: &Space, model: &GasModel, a: Real) -> Field {
        let mut field = Field::new(space.n_max);
        let buf = field.now_mut();
        for k in 0..space.k_max {
            for j in 0..space.j_max {
                for i in 0..space.i_max {
                    let y = space.coord_of(Axis::Y, j);
                    let prim = Primitive {
                        rho: 1.0,
                        u: a * y,
                        v: 0.0,
                        w: 0.0,
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
        field
    }

    #[test]
    fn shear_stress_on_y_face() {
        let (space, model) = setup();
        let a = 3.0;
        let field = fill_shear(&space, &model, a);
        let (k, j, i) = (space.k_max / 2, space.j_max / 2, space.i_max / 2);

        let f = viscous_face_flux(&space, &model, field.now(), Axis::Y, k, j, i).unwrap();

        let t = 1.0 / model.gas_r;
        let mu = model.viscosity(t);
        let y_face = 0.5 * (space.coord_of(Axis::Y, j) + space.coord_of(Axis::Y, j + 1));
        let u_hat = a * y_face;

        // du/dy = a is the only nonzero gradient: the x-momentum slot
        // carries mu*a and the energy slot its work against u_hat.
        assert!(f[0].abs() < 1e-14);
        assert!((f[1] - mu * a).abs() < 1e-12 * mu.max(1.0) * a);
        assert!(f[2].abs() < 1e-12);
        assert!(f[3].abs() < 1e-14);
        assert!((f[4] - mu * a * u_hat).abs() < 1e-12);
    }

    #[test]
    fn shear_stress_on_x_face() {
        let (space, model) = setup();
        let a = 2.0;
        let field = fill_shear(&space, &model, a);
        let (k, j, i) = (space.k_max / 2, space.j_max / 2, space.i_max / 2);

        let f = viscous_face_flux(&space, &model, field.now(), Axis::X, k, j, i).unwrap();

        let t = 1.0 / model.gas_r;
        let mu = model.viscosity(t);

        // On an x-face the same shear shows up as the tangential stress
        // tau_xy in the y-momentum slot; its work term vanishes because the
        // face-averaged v is zero.
        assert!(f[1].abs() < 1e-12, "normal stress should vanish: {}", f[1]);
        assert!((f[2] - mu * a).abs() < 1e-12 * mu.max(1.0) * a);
        assert!(f[3].abs() < 1e-14);
        assert!(f[4].abs() < 1e-12);
    }

    #[test]
    fn uniform_field_has_zero_viscous_flux() {
        let (space, model) = setup();
        let field = fill_shear(&space, &model, 0.0);
        for axis in Axis::ALL {
            let f = viscous_face_flux(
                &space,
                &model,
                field.now(),
                axis,
                space.k_max / 2,
                space.j_max / 2,
                space.i_max / 2,
            )
            .unwrap();
            for c in f {
                assert!(c.abs() < 1e-14);
            }
        }
    }
}
