use cf_fluids::FluidError;
use thiserror::Error;

pub type SolverResult<T> = Result<T, SolverError>;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Non-physical state at node ({k},{j},{i}) in step {step}: {source}")]
    NonPhysical {
        k: usize,
        j: usize,
        i: usize,
        step: u64,
        source: FluidError,
    },

    #[error("Numerical divergence: non-finite field value after step {step}")]
    Diverged { step: u64 },

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Export failed: {what}")]
    Export { what: String },
}
