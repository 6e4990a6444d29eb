//! Embedded rigid bodies.

use cf_core::{Real, Vec3};

/// A body described by a signed distance, negative inside.
pub trait ImplicitBody {
    fn signed_distance(&self, p: &Vec3) -> Real;

    /// Inside test; bodies with a cheaper membership predicate than the
    /// full distance override this.
    fn contains(&self, p: &Vec3) -> bool {
        self.signed_distance(p) < 0.0
    }

    /// Velocity of the body surface at a point (rigid motion).
    fn surface_velocity(&self, p: &Vec3) -> Vec3;

    /// True when the body moves and the domain must be re-classified each
    /// step.
    fn is_moving(&self) -> bool;
}

/// Spherical body with optional translation and spin about the z axis.
#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: Real,
    pub velocity: Vec3,
    /// Angular rate about the z axis through the center.
    pub omega: Real,
}

impl Sphere {
    pub fn stationary(center: Vec3, radius: Real) -> Self {
        Self {
            center,
            radius,
            velocity: Vec3::zeros(),
            omega: 0.0,
        }
    }
}

impl ImplicitBody for Sphere {
    fn signed_distance(&self, p: &Vec3) -> Real {
        (p - self.center).norm() - self.radius
    }

    fn contains(&self, p: &Vec3) -> bool {
        // Squared form; no square root on the classifier hot path.
        let d = p - self.center;
        d.norm_squared() - self.radius * self.radius < 0.0
    }

    fn surface_velocity(&self, p: &Vec3) -> Vec3 {
        let r = p - self.center;
        self.velocity + self.omega * Vec3::z().cross(&r)
    }

    fn is_moving(&self) -> bool {
        self.velocity != Vec3::zeros() || self.omega != 0.0
    }
}
