//! cf-export: field snapshots and restart state.
//!
//! Field output follows the EnSight Gold binary convention: a `.case`
//! descriptor per snapshot plus a transient `ensight.case`, a `.geo` block
//! geometry with iblank flags, one scalar file per variable and one vector
//! file for velocity. Body states go to a plain-text `.particle` sidecar,
//! and the solver state needed for restart to a JSON manifest with a raw
//! binary field dump.

pub mod ensight;
pub mod particle;
pub mod restart;

pub use ensight::EnsightExporter;
pub use particle::write_particle_file;
pub use restart::{load_restart, save_restart, BodyState, RestartManifest};

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Restart field truncated: expected {expected} values, found {found}")]
    Truncated { expected: usize, found: usize },
}
