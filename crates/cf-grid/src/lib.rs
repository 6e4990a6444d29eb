//! cf-grid: uniform Cartesian grid storage for cartflow.
//!
//! Provides the padded node space with per-node classification flags, the
//! double-buffered conservative-variable field, and the fixed partition of
//! the padded index space into boundary and interior regions.

pub mod error;
pub mod field;
pub mod partition;
pub mod space;

pub use error::{GridError, GridResult};
pub use field::{Field, NCONS};
pub use partition::{BcKind, BcValue, Box3, Face, Partition, Region, Role, SlabBc};
pub use space::{Axis, BodyId, GridSpec, NodeFlag, Space};
