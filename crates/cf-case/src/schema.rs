//! Case-file schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub version: u32,
    pub name: String,
    pub domain: DomainDef,
    #[serde(default)]
    pub reference: ReferenceDef,
    pub time: TimeDef,
    #[serde(default)]
    pub flow: FlowDef,
    #[serde(default)]
    pub boundaries: BoundariesDef,
    pub initial: InitialDef,
    #[serde(default)]
    pub bodies: Vec<BodyDef>,
    #[serde(default)]
    pub output: OutputDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainDef {
    /// Cell counts per axis (x, y, z).
    pub cells: [usize; 3],
    /// Exterior padding width in node layers.
    #[serde(default = "default_ghost")]
    pub ghost: usize,
    pub x: [f64; 2],
    pub y: [f64; 2],
    pub z: [f64; 2],
}

fn default_ghost() -> usize {
    2
}

/// Reference scales; a fully nondimensional case keeps the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReferenceDef {
    pub length: f64,
    pub velocity: f64,
    pub density: f64,
    pub temperature: f64,
    pub viscosity: f64,
}

impl Default for ReferenceDef {
    fn default() -> Self {
        Self {
            length: 1.0,
            velocity: 1.0,
            density: 1.0,
            temperature: 1.0,
            viscosity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeDef {
    /// Total physical time; normalized during resolution.
    pub total: f64,
    /// Step cap; negative means unlimited.
    #[serde(default = "default_max_steps")]
    pub max_steps: i64,
    pub cfl: f64,
    #[serde(default)]
    pub integrator: IntegratorDef,
}

fn default_max_steps() -> i64 {
    -1
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorDef {
    Euler,
    #[default]
    Rk2,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlowDef {
    pub gamma: f64,
    /// Skip the viscous fluxes entirely.
    pub inviscid: bool,
    pub average: AverageDef,
    pub splitter: SplitterDef,
}

impl Default for FlowDef {
    fn default() -> Self {
        Self {
            gamma: 1.4,
            inviscid: false,
            average: AverageDef::Roe,
            splitter: SplitterDef::LaxFriedrichs,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AverageDef {
    Arithmetic,
    Roe,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SplitterDef {
    LaxFriedrichs,
    StegerWarming,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct BoundariesDef {
    pub west: BoundaryDef,
    pub east: BoundaryDef,
    pub south: BoundaryDef,
    pub north: BoundaryDef,
    pub bottom: BoundaryDef,
    pub top: BoundaryDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundaryDef {
    pub kind: BcKindDef,
    /// Primitive value consumed by inlet and moving-wall kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<PrimDef>,
}

impl Default for BoundaryDef {
    fn default() -> Self {
        Self {
            kind: BcKindDef::Outlet,
            value: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BcKindDef {
    Inlet,
    Outlet,
    SlipWall,
    NoSlipWall,
    Periodic,
}

/// Primitive state literal as written in case files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PrimDef {
    pub rho: f64,
    #[serde(default)]
    pub u: f64,
    #[serde(default)]
    pub v: f64,
    #[serde(default)]
    pub w: f64,
    pub p: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitialDef {
    pub background: PrimDef,
    #[serde(default)]
    pub regions: Vec<InitRegionDef>,
}

/// Initial-condition override; applied in file order, last wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitRegionDef {
    pub shape: ShapeDef,
    pub value: PrimDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ShapeDef {
    Box {
        x: [f64; 2],
        y: [f64; 2],
        z: [f64; 2],
    },
    Sphere {
        x: f64,
        y: f64,
        z: f64,
        r: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyDef {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub r: f64,
    #[serde(default)]
    pub u: f64,
    #[serde(default)]
    pub v: f64,
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub omega: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputDef {
    /// Number of field exports over the run; 0 disables them.
    pub count: usize,
    pub prefix: String,
}

impl Default for OutputDef {
    fn default() -> Self {
        Self {
            count: 0,
            prefix: "field".to_string(),
        }
    }
}
