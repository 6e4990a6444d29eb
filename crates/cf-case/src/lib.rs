//! cf-case: canonical case-file format, validation, and resolution.

pub mod resolve;
pub mod schema;
pub mod validate;

pub use resolve::{
    resolve, Integrator, OutputControl, Scheme, Setup, TimeControl, STEP_CAP_SENTINEL,
};
pub use schema::*;
pub use validate::{validate_case, ValidationError};

pub type CaseResult<T> = Result<T, CaseError>;

#[derive(thiserror::Error, Debug)]
pub enum CaseError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Grid error: {0}")]
    Grid(#[from] cf_grid::GridError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] cf_fluids::FluidError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn load_yaml(path: &std::path::Path) -> CaseResult<Case> {
    let content = std::fs::read_to_string(path)?;
    let case: Case = serde_yaml::from_str(&content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn save_yaml(path: &std::path::Path, case: &Case) -> CaseResult<()> {
    validate_case(case)?;
    let content = serde_yaml::to_string(case)?;
    std::fs::write(path, content)?;
    Ok(())
}
