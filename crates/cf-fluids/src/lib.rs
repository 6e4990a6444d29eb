//! cf-fluids: gamma-law gas thermodynamics for cartflow.
//!
//! Conservative/primitive conversions, pressure and temperature from the
//! conserved state, Sutherland viscosity, and the normalized gas model
//! derived from reference scales.

pub mod error;
pub mod model;
pub mod state;

pub use error::{FluidError, FluidResult};
pub use model::{GasModel, RefScales, GAS_CONSTANT_SI, PRANDTL};
pub use state::{Conservative, Primitive};
