//! Resolution of a validated case into a normalized runtime setup.
//!
//! All dimensional inputs are divided by the reference scales here, once;
//! the solver then runs the same equations for dimensional and
//! nondimensional cases alike.

use crate::schema::{
    AverageDef, BcKindDef, BodyDef, Case, IntegratorDef, PrimDef, ReferenceDef, ShapeDef,
    SplitterDef,
};
use crate::CaseResult;
use cf_core::{Real, Vec3};
use cf_fluids::{GasModel, Primitive, RefScales};
use cf_grid::{field, Axis, BcKind, BcValue, Field, GridSpec, Partition, SlabBc, Space};
use cf_ibm::Sphere;
use cf_kernels::{Average, Splitter};

/// Step cap substituted for a negative user cap.
pub const STEP_CAP_SENTINEL: u64 = 9_000_000;

/// Numerical scheme selection.
#[derive(Clone, Copy, Debug)]
pub struct Scheme {
    pub average: Average,
    pub splitter: Splitter,
    pub inviscid: bool,
}

/// Time integrator variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Integrator {
    Euler,
    /// Two-stage TVD Runge-Kutta.
    #[default]
    Rk2,
}

/// Normalized time-loop control.
#[derive(Clone, Copy, Debug)]
pub struct TimeControl {
    pub total_time: Real,
    pub max_steps: u64,
    pub cfl: Real,
    pub integrator: Integrator,
}

/// Export cadence.
#[derive(Clone, Debug)]
pub struct OutputControl {
    pub count: usize,
    pub prefix: String,
}

/// Initial condition in normalized primitives.
#[derive(Clone, Debug)]
struct Initial {
    background: Primitive,
    regions: Vec<(Shape, Primitive)>,
}

#[derive(Clone, Copy, Debug)]
enum Shape {
    Box { x: [Real; 2], y: [Real; 2], z: [Real; 2] },
    Sphere { center: Vec3, r: Real },
}

impl Shape {
    fn contains(&self, p: &Vec3) -> bool {
        match *self {
            Shape::Box { x, y, z } => {
                p.x >= x[0] && p.x <= x[1] && p.y >= y[0] && p.y <= y[1] && p.z >= z[0]
                    && p.z <= z[1]
            }
            Shape::Sphere { center, r } => (p - center).norm_squared() <= r * r,
        }
    }
}

/// Everything the solver needs, fully normalized.
#[derive(Clone, Debug)]
pub struct Setup {
    pub name: String,
    pub space: Space,
    pub model: GasModel,
    pub partition: Partition,
    pub bodies: Vec<Sphere>,
    pub scheme: Scheme,
    pub time: TimeControl,
    pub output: OutputControl,
    initial: Initial,
}

fn norm_prim(p: &PrimDef, r: &ReferenceDef, model: &GasModel) -> Primitive {
    let rho = p.rho / r.density;
    let press = p.p / (r.density * r.velocity * r.velocity);
    Primitive {
        rho,
        u: p.u / r.velocity,
        v: p.v / r.velocity,
        w: p.w / r.velocity,
        p: press,
        t: press / (rho * model.gas_r),
    }
}

fn norm_body(b: &BodyDef, r: &ReferenceDef) -> Sphere {
    Sphere {
        center: Vec3::new(b.x / r.length, b.y / r.length, b.z / r.length),
        radius: b.r / r.length,
        velocity: Vec3::new(b.u, b.v, b.w) / r.velocity,
        omega: b.omega / (r.velocity / r.length),
    }
}

fn slab_bc(def: &crate::schema::BoundaryDef, r: &ReferenceDef, model: &GasModel) -> SlabBc {
    let kind = match def.kind {
        BcKindDef::Inlet => BcKind::Inlet,
        BcKindDef::Outlet => BcKind::Outlet,
        BcKindDef::SlipWall => BcKind::SlipWall,
        BcKindDef::NoSlipWall => BcKind::NoSlipWall,
        BcKindDef::Periodic => BcKind::Periodic,
    };
    let value = match &def.value {
        Some(v) => {
            let prim = norm_prim(v, r, model);
            BcValue {
                rho: prim.rho,
                u: prim.u,
                v: prim.v,
                w: prim.w,
                p: prim.p,
                t: prim.t,
            }
        }
        None => BcValue::default(),
    };
    SlabBc { kind, value }
}

/// Resolve a validated case.
pub fn resolve(case: &Case) -> CaseResult<Setup> {
    let r = &case.reference;
    let model = GasModel::from_reference(
        case.flow.gamma,
        RefScales {
            length: r.length,
            velocity: r.velocity,
            density: r.density,
            temperature: r.temperature,
            viscosity: r.viscosity,
        },
    )?;

    let d = &case.domain;
    let space = Space::new(GridSpec {
        ncx: d.cells[0],
        ncy: d.cells[1],
        ncz: d.cells[2],
        ng: d.ghost,
        x: (d.x[0] / r.length, d.x[1] / r.length),
        y: (d.y[0] / r.length, d.y[1] / r.length),
        z: (d.z[0] / r.length, d.z[1] / r.length),
    })?;

    let slabs = [
        slab_bc(&case.boundaries.west, r, &model),
        slab_bc(&case.boundaries.east, r, &model),
        slab_bc(&case.boundaries.south, r, &model),
        slab_bc(&case.boundaries.north, r, &model),
        slab_bc(&case.boundaries.bottom, r, &model),
        slab_bc(&case.boundaries.top, r, &model),
    ];
    let partition = Partition::build(&space, slabs);

    let time = TimeControl {
        total_time: case.time.total * r.velocity / r.length,
        max_steps: if case.time.max_steps < 0 {
            STEP_CAP_SENTINEL
        } else {
            case.time.max_steps as u64
        },
        cfl: case.time.cfl,
        integrator: match case.time.integrator {
            IntegratorDef::Euler => Integrator::Euler,
            IntegratorDef::Rk2 => Integrator::Rk2,
        },
    };

    let scheme = Scheme {
        average: match case.flow.average {
            AverageDef::Arithmetic => Average::Arithmetic,
            AverageDef::Roe => Average::Roe,
        },
        splitter: match case.flow.splitter {
            SplitterDef::LaxFriedrichs => Splitter::LaxFriedrichs,
            SplitterDef::StegerWarming => Splitter::StegerWarming,
        },
        inviscid: case.flow.inviscid,
    };

    let initial = Initial {
        background: norm_prim(&case.initial.background, r, &model),
        regions: case
            .initial
            .regions
            .iter()
            .map(|region| {
                let shape = match region.shape {
                    ShapeDef::Box { x, y, z } => Shape::Box {
                        x: [x[0] / r.length, x[1] / r.length],
                        y: [y[0] / r.length, y[1] / r.length],
                        z: [z[0] / r.length, z[1] / r.length],
                    },
                    ShapeDef::Sphere { x, y, z, r: rad } => Shape::Sphere {
                        center: Vec3::new(x / r.length, y / r.length, z / r.length),
                        r: rad / r.length,
                    },
                };
                (shape, norm_prim(&region.value, r, &model))
            })
            .collect(),
    };

    Ok(Setup {
        name: case.name.clone(),
        space,
        model,
        partition,
        bodies: case.bodies.iter().map(|b| norm_body(b, r)).collect(),
        scheme,
        time,
        output: OutputControl {
            count: case.output.count,
            prefix: case.output.prefix.clone(),
        },
        initial,
    })
}

impl Setup {
    /// Build the initial conservative field over the whole padded domain.
    ///
    /// Overrides apply in file order; the last region containing a node
    /// wins.
    pub fn initial_field(&self) -> Field {
        let mut f = Field::new(self.space.n_max);
        let buf = f.now_mut();
        for k in 0..self.space.k_max {
            for j in 0..self.space.j_max {
                for i in 0..self.space.i_max {
                    let p = Vec3::new(
                        self.space.coord_of(Axis::X, i),
                        self.space.coord_of(Axis::Y, j),
                        self.space.coord_of(Axis::Z, k),
                    );
                    let mut prim = self.initial.background;
                    for (shape, value) in &self.initial.regions {
                        if shape.contains(&p) {
                            prim = *value;
                        }
                    }
                    let n = self.space.idx(k, j, i);
                    self.model.conservative(&prim).write_to(field::node_mut(buf, n));
                }
            }
        }
        f
    }
}
