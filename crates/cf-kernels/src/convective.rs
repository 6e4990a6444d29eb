//! Inviscid flux vector.

use cf_core::Real;
use cf_fluids::Conservative;
use cf_grid::Axis;

/// Closed-form inviscid flux along an axis.
///
/// The three directions are component rotations of each other: the normal
/// momentum slot carries `rho*u_s^2 + p`, the tangential slots the advected
/// momenta, and the energy slot `(rho*E + p)*u_s`.
pub fn convective_flux(u: &Conservative, p: Real, axis: Axis) -> [Real; 5] {
    let c = axis.component();
    let un = u.momentum(c) / u.rho;
    let mut f = [
        u.momentum(c),
        u.rho_u * un,
        u.rho_v * un,
        u.rho_w * un,
        (u.rho_e + p) * un,
    ];
    f[1 + c] += p;
    f
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_fluids::{GasModel, Primitive, RefScales};

    fn model() -> GasModel {
        GasModel::from_reference(1.4, RefScales::unit()).unwrap()
    }

    fn cons(rho: Real, u: Real, v: Real, w: Real, p: Real) -> Conservative {
        let m = model();
        m.conservative(&Primitive {
            rho,
            u,
            v,
            w,
            p,
            t: p / (rho * m.gas_r),
        })
    }

    #[test]
    fn x_flux_matches_table() {
        let m = model();
        let u = cons(1.2, 0.8, -0.5, 0.3, 2.0);
        let p = m.pressure(&u);
        let f = convective_flux(&u, p, Axis::X);
        let rho = 1.2;
        assert!((f[0] - rho * 0.8).abs() < 1e-12);
        assert!((f[1] - (rho * 0.8 * 0.8 + p)).abs() < 1e-12);
        assert!((f[2] - rho * 0.8 * -0.5).abs() < 1e-12);
        assert!((f[3] - rho * 0.8 * 0.3).abs() < 1e-12);
        assert!((f[4] - (u.rho_e + p) * 0.8).abs() < 1e-12);
    }

    #[test]
    fn rotational_symmetry_y() {
        // F_y of the u<->v swapped state equals F_x with momentum slots
        // 1 and 2 exchanged.
        let m = model();
        let u = cons(1.1, 0.6, -0.9, 0.4, 1.5);
        let p = m.pressure(&u);
        let swapped = Conservative {
            rho: u.rho,
            rho_u: u.rho_v,
            rho_v: u.rho_u,
            rho_w: u.rho_w,
            rho_e: u.rho_e,
        };
        let fx = convective_flux(&u, p, Axis::X);
        let fy = convective_flux(&swapped, p, Axis::Y);
        assert!((fy[0] - fx[0]).abs() < 1e-12);
        assert!((fy[1] - fx[2]).abs() < 1e-12);
        assert!((fy[2] - fx[1]).abs() < 1e-12);
        assert!((fy[3] - fx[3]).abs() < 1e-12);
        assert!((fy[4] - fx[4]).abs() < 1e-12);
    }

    #[test]
    fn rotational_symmetry_z() {
        let m = model();
        let u = cons(0.9, 0.2, 0.7, -1.1, 2.4);
        let p = m.pressure(&u);
        let swapped = Conservative {
            rho: u.rho,
            rho_u: u.rho_w,
            rho_v: u.rho_v,
            rho_w: u.rho_u,
            rho_e: u.rho_e,
        };
        let fx = convective_flux(&u, p, Axis::X);
        let fz = convective_flux(&swapped, p, Axis::Z);
        assert!((fz[0] - fx[0]).abs() < 1e-12);
        assert!((fz[1] - fx[3]).abs() < 1e-12);
        assert!((fz[2] - fx[2]).abs() < 1e-12);
        assert!((fz[3] - fx[1]).abs() < 1e-12);
        assert!((fz[4] - fx[4]).abs() < 1e-12);
    }
}
