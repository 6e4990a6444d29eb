use thiserror::Error;

pub type CfResult<T> = Result<T, CfError>;

/// Failure modes of the shared primitives: bad scalar inputs reaching the
/// grid layer, and degenerate vector operations in geometry.
#[derive(Error, Debug)]
pub enum CfError {
    #[error("{what} is not finite (got {value})")]
    NonFinite { what: &'static str, value: f64 },

    #[error("cannot build a unit vector from a zero-length input")]
    ZeroLength,
}
