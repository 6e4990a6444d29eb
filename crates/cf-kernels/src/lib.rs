//! cf-kernels: finite-difference flux kernels for cartflow.
//!
//! Characteristic decomposition of the Euler flux Jacobian with eigenvalue
//! splitting, the inviscid flux vector, and the face-centered viscous flux
//! stencil. All three spatial directions share one code path through cyclic
//! axis permutation; direction and splitter variants dispatch through enums.

pub mod convective;
pub mod eigen;
pub mod viscous;

pub use convective::convective_flux;
pub use eigen::{
    eigenvalues, face_state, left_matrix, right_matrix, split_face_flux, Average, FaceState,
    Splitter,
};
pub use viscous::viscous_face_flux;
