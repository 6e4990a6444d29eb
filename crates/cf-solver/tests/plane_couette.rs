//! Integration test: viscous plane Couette flow.
//!
//! One cell in x and z with periodic pairs, 6 cells across the gap in y,
//! no-slip walls: the bottom at rest, the top sliding at u = 0.5. The gas
//! is kept at a low Mach number through dimensional reference scales, and
//! the reference viscosity is tuned for a diffusion time short against the
//! run length. The converged profile is linear, u(y) = y * u_wall, exact
//! for the discrete operator at any resolution.

use cf_case::{resolve, Case};
use cf_case::{
    BcKindDef, BoundariesDef, BoundaryDef, DomainDef, FlowDef, InitialDef, IntegratorDef,
    OutputDef, PrimDef, ReferenceDef, TimeDef,
};
use cf_fluids::Conservative;
use cf_grid::{field, Axis};
use cf_solver::run;

const U_WALL: f64 = 0.5;
const T_REF: f64 = 300.0;

fn couette_case() -> Case {
    // With unit velocity/density/length scales, gas_r resolves to
    // R_dim * T_ref and the background pressure below pins T = T_ref.
    let p0 = 8.314462175 * T_REF;
    let periodic = BoundaryDef {
        kind: BcKindDef::Periodic,
        value: None,
    };
    Case {
        version: 1,
        name: "couette".into(),
        domain: DomainDef {
            cells: [1, 6, 1],
            ghost: 2,
            x: [0.0, 1.0],
            y: [0.0, 1.0],
            z: [0.0, 0.5],
        },
        reference: ReferenceDef {
            temperature: T_REF,
            // Scales the Sutherland value at T_REF up to a normalized
            // viscosity of about 0.1, for a diffusion time of a few units.
            viscosity: 5417.0,
            ..ReferenceDef::default()
        },
        time: TimeDef {
            total: 50.0,
            max_steps: -1,
            cfl: 0.5,
            integrator: IntegratorDef::Rk2,
        },
        flow: FlowDef {
            gamma: 1.4,
            inviscid: false,
            ..FlowDef::default()
        },
        boundaries: BoundariesDef {
            west: periodic.clone(),
            east: periodic.clone(),
            south: BoundaryDef {
                kind: BcKindDef::NoSlipWall,
                value: None,
            },
            north: BoundaryDef {
                kind: BcKindDef::NoSlipWall,
                value: Some(PrimDef {
                    rho: 1.0,
                    u: U_WALL,
                    v: 0.0,
                    w: 0.0,
                    p: p0,
                }),
            },
            bottom: periodic.clone(),
            top: periodic,
        },
        initial: InitialDef {
            background: PrimDef {
                rho: 1.0,
                u: 0.0,
                v: 0.0,
                w: 0.0,
                p: p0,
            },
            regions: vec![],
        },
        bodies: vec![],
        output: OutputDef::default(),
    }
}

#[test]
fn couette_converges_to_linear_profile() {
    let setup = resolve(&couette_case()).unwrap();
    let state = run(&setup, |_, _, _| Ok(())).unwrap();

    let space = &setup.space;
    let (kc, ic) = (space.k_max / 2, space.i_max / 2);
    for j in (space.ng)..(space.ng + space.ny) {
        let u = Conservative::from_slice(field::node(state.field.now(), space.idx(kc, j, ic)));
        let prim = setup.model.primitive(&u).unwrap();
        let y = space.coord_of(Axis::Y, j);
        assert!(
            (prim.u - y * U_WALL).abs() < 1e-4 * U_WALL,
            "u({y}) = {} vs {}",
            prim.u,
            y * U_WALL
        );
        assert!(prim.v.abs() < 1e-5 * U_WALL, "v({y}) = {}", prim.v);
        assert!(prim.w.abs() < 1e-5 * U_WALL, "w({y}) = {}", prim.w);
    }
}
