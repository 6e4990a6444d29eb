use cf_core::CfError;
use thiserror::Error;

pub type GridResult<T> = Result<T, GridError>;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Grid dimension out of range: {what}")]
    OutOfRange { what: &'static str },

    #[error("Degenerate extent: {what}")]
    DegenerateExtent { what: &'static str },

    #[error("Core error: {0}")]
    Core(#[from] CfError),
}
