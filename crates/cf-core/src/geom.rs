//! 3-vector algebra used by the grid, bodies and boundary treatment.

use crate::numeric::Real;
use crate::CfError;
use nalgebra::Vector3;

/// Physical-space vector.
pub type Vec3 = Vector3<Real>;

pub fn dot(a: &Vec3, b: &Vec3) -> Real {
    a.dot(b)
}

pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    a.cross(b)
}

pub fn norm(a: &Vec3) -> Real {
    a.norm()
}

/// Unit vector in the direction of `a`.
///
/// Fails on the zero vector (and anything within 1e-300 of it) rather than
/// returning NaN components.
pub fn normalize(a: &Vec3) -> Result<Vec3, CfError> {
    let n = a.norm();
    if n < 1e-300 {
        return Err(CfError::ZeroLength);
    }
    Ok(a / n)
}

/// Build two unit tangents completing `n` to a right-handed orthonormal frame.
///
/// `n` must be a unit vector. The first tangent is chosen against the axis
/// least aligned with `n`, which keeps the frame stable for axis-aligned
/// normals.
pub fn orthonormal_frame(n: &Vec3) -> Result<(Vec3, Vec3), CfError> {
    let ax = n.x.abs();
    let ay = n.y.abs();
    let az = n.z.abs();
    let seed = if ax <= ay && ax <= az {
        Vec3::x()
    } else if ay <= az {
        Vec3::y()
    } else {
        Vec3::z()
    };
    let t1 = normalize(&n.cross(&seed))?;
    let t2 = n.cross(&t1);
    Ok((t1, t2))
}
