//! Case validation: every config error is caught before any allocation.

use crate::schema::{BcKindDef, Case, PrimDef, ShapeDef};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Unsupported case version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("Domain out of range: {what}")]
    Domain { what: &'static str },

    #[error("Reference scale out of range: {what}")]
    Reference { what: &'static str },

    #[error("Time control out of range: {what}")]
    Time { what: &'static str },

    #[error("Flow model out of range: {what}")]
    Flow { what: &'static str },

    #[error("Boundary {face}: {what}")]
    Boundary { face: &'static str, what: &'static str },

    #[error("Initial condition: {what}")]
    Initial { what: &'static str },

    #[error("Body {index}: {what}")]
    Body { index: usize, what: &'static str },
}

const VERSION: u32 = 1;

fn check_prim(p: &PrimDef, what: &'static str) -> Result<(), ValidationError> {
    if !(p.rho.is_finite() && p.rho > 0.0 && p.p.is_finite() && p.p > 0.0) {
        return Err(ValidationError::Initial { what });
    }
    Ok(())
}

pub fn validate_case(case: &Case) -> Result<(), ValidationError> {
    if case.version != VERSION {
        return Err(ValidationError::Version {
            found: case.version,
            expected: VERSION,
        });
    }

    let d = &case.domain;
    if d.cells.iter().any(|&c| c < 1) {
        return Err(ValidationError::Domain {
            what: "cell counts must be >= 1",
        });
    }
    if d.ghost < 1 {
        return Err(ValidationError::Domain {
            what: "ghost width must be >= 1",
        });
    }
    for (ext, what) in [(d.x, "x extent"), (d.y, "y extent"), (d.z, "z extent")] {
        if !(ext[0].is_finite() && ext[1].is_finite() && ext[1] > ext[0]) {
            return Err(ValidationError::Domain { what });
        }
    }

    let r = &case.reference;
    for (v, what) in [
        (r.length, "length"),
        (r.velocity, "velocity"),
        (r.density, "density"),
        (r.temperature, "temperature"),
        (r.viscosity, "viscosity"),
    ] {
        if !(v.is_finite() && v > 0.0) {
            return Err(ValidationError::Reference { what });
        }
    }

    if !(case.time.total.is_finite() && case.time.total > 0.0) {
        return Err(ValidationError::Time {
            what: "total time must be positive",
        });
    }
    if !(case.time.cfl.is_finite() && case.time.cfl > 0.0 && case.time.cfl <= 1.0) {
        return Err(ValidationError::Time {
            what: "cfl must lie in (0, 1]",
        });
    }

    if !(case.flow.gamma.is_finite() && case.flow.gamma > 1.0) {
        return Err(ValidationError::Flow {
            what: "gamma must exceed 1",
        });
    }

    let faces = [
        ("west", &case.boundaries.west),
        ("east", &case.boundaries.east),
        ("south", &case.boundaries.south),
        ("north", &case.boundaries.north),
        ("bottom", &case.boundaries.bottom),
        ("top", &case.boundaries.top),
    ];
    for (face, bc) in faces {
        if bc.kind == BcKindDef::Inlet {
            let Some(v) = &bc.value else {
                return Err(ValidationError::Boundary {
                    face,
                    what: "inlet requires a primitive value",
                });
            };
            if !(v.rho > 0.0 && v.p > 0.0) {
                return Err(ValidationError::Boundary {
                    face,
                    what: "inlet value must have positive rho and p",
                });
            }
        }
    }
    // Periodic faces must pair up.
    for (a, b, what) in [
        (
            case.boundaries.west.kind,
            case.boundaries.east.kind,
            "west/east periodic pair mismatch",
        ),
        (
            case.boundaries.south.kind,
            case.boundaries.north.kind,
            "south/north periodic pair mismatch",
        ),
        (
            case.boundaries.bottom.kind,
            case.boundaries.top.kind,
            "bottom/top periodic pair mismatch",
        ),
    ] {
        if (a == BcKindDef::Periodic) != (b == BcKindDef::Periodic) {
            return Err(ValidationError::Boundary {
                face: "pair",
                what,
            });
        }
    }

    check_prim(&case.initial.background, "background must have positive rho and p")?;
    for region in &case.initial.regions {
        check_prim(&region.value, "region value must have positive rho and p")?;
        if let ShapeDef::Sphere { r, .. } = region.shape {
            if !(r.is_finite() && r > 0.0) {
                return Err(ValidationError::Initial {
                    what: "region sphere radius must be positive",
                });
            }
        }
    }

    for (index, body) in case.bodies.iter().enumerate() {
        if !(body.r.is_finite() && body.r > 0.0) {
            return Err(ValidationError::Body {
                index,
                what: "radius must be positive",
            });
        }
        if ![body.x, body.y, body.z, body.u, body.v, body.w, body.omega]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ValidationError::Body {
                index,
                what: "state must be finite",
            });
        }
    }
    for i in 0..case.bodies.len() {
        for j in (i + 1)..case.bodies.len() {
            let a = &case.bodies[i];
            let b = &case.bodies[j];
            let d2 = (a.x - b.x).powi(2) + (a.y - b.y).powi(2) + (a.z - b.z).powi(2);
            if d2 < (a.r + b.r).powi(2) {
                // Overlap is legal (last body wins on shared nodes) but
                // usually unintended.
                tracing::warn!(first = i, second = j, "embedded bodies overlap");
            }
        }
    }

    Ok(())
}
