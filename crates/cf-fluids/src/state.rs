//! Conservative and primitive variable sets.

use cf_core::Real;
use nalgebra::SVector;

/// Conserved state per node: (rho, rho*u, rho*v, rho*w, rho*E).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Conservative {
    pub rho: Real,
    pub rho_u: Real,
    pub rho_v: Real,
    pub rho_w: Real,
    pub rho_e: Real,
}

impl Conservative {
    /// Load from a 5-component node slice.
    #[inline]
    pub fn from_slice(s: &[Real]) -> Self {
        Self {
            rho: s[0],
            rho_u: s[1],
            rho_v: s[2],
            rho_w: s[3],
            rho_e: s[4],
        }
    }

    #[inline]
    pub fn to_array(self) -> [Real; 5] {
        [self.rho, self.rho_u, self.rho_v, self.rho_w, self.rho_e]
    }

    #[inline]
    pub fn as_vector(self) -> SVector<Real, 5> {
        SVector::from(self.to_array())
    }

    /// Store into a 5-component node slice.
    #[inline]
    pub fn write_to(self, s: &mut [Real]) {
        s[0] = self.rho;
        s[1] = self.rho_u;
        s[2] = self.rho_v;
        s[3] = self.rho_w;
        s[4] = self.rho_e;
    }

    /// Momentum component along axis `c` (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn momentum(self, c: usize) -> Real {
        match c {
            0 => self.rho_u,
            1 => self.rho_v,
            _ => self.rho_w,
        }
    }
}

/// Primitive state: (rho, u, v, w, p, T).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitive {
    pub rho: Real,
    pub u: Real,
    pub v: Real,
    pub w: Real,
    pub p: Real,
    pub t: Real,
}

impl Primitive {
    /// Velocity component along axis `c` (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn velocity(self, c: usize) -> Real {
        match c {
            0 => self.u,
            1 => self.v,
            _ => self.w,
        }
    }

    /// Squared velocity magnitude.
    #[inline]
    pub fn speed2(self) -> Real {
        self.u * self.u + self.v * self.v + self.w * self.w
    }
}
