use thiserror::Error;

pub type FluidResult<T> = Result<T, FluidError>;

#[derive(Error, Debug)]
pub enum FluidError {
    #[error("Non-physical state: {what} (rho={rho}, p={p})")]
    NonPhysical {
        what: &'static str,
        rho: f64,
        p: f64,
    },

    #[error("Invalid reference scale: {what}")]
    BadReference { what: &'static str },
}
