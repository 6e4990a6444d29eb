//! cf-solver: boundary driver, flux sweeps, and the time loop.
//!
//! The solver owns the double-buffered field: each stage reads one time
//! level and writes the other, the boundary driver and the ghost-node wall
//! model refresh the written level, and the step ends with an O(1) buffer
//! swap (forward Euler) or a second blended stage (TVD RK2).

pub mod boundary;
pub mod error;
pub mod sweep;
pub mod time;

pub use boundary::apply_boundaries;
pub use error::{SolverError, SolverResult};
pub use sweep::sweep_stage;
pub use time::{run, stable_dt, RunState};
