//! cf-ibm: ghost-cell immersed boundary for cartflow.
//!
//! Embedded rigid bodies are described implicitly by signed distance; the
//! classifier marks each node of the padded space as fluid, solid, ghost, or
//! exterior, and the wall model reconstructs conservative states on the
//! ghost band so flux stencils can difference across it.

pub mod body;
pub mod classify;
pub mod wall;

pub use body::{ImplicitBody, Sphere};
pub use classify::classify;
pub use wall::apply_wall_model;
