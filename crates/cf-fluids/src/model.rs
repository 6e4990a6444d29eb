//! Normalized gamma-law gas model.

use crate::error::{FluidError, FluidResult};
use crate::state::{Conservative, Primitive};
use cf_core::Real;

/// Dimensional gas constant used to derive the reference Mach number.
pub const GAS_CONSTANT_SI: Real = 8.314462175;

/// Laminar Prandtl number.
pub const PRANDTL: Real = 0.71;

/// Sutherland's law for air, dimensional temperature in Kelvin.
pub fn sutherland(t_dim: Real) -> Real {
    1.458e-6 * t_dim.powf(1.5) / (t_dim + 110.4)
}

/// Reference scales used to normalize all dimensional inputs. A fully
/// nondimensional case sets every scale to 1.
#[derive(Clone, Copy, Debug)]
pub struct RefScales {
    pub length: Real,
    pub velocity: Real,
    pub density: Real,
    pub temperature: Real,
    pub viscosity: Real,
}

impl RefScales {
    pub fn unit() -> Self {
        Self {
            length: 1.0,
            velocity: 1.0,
            density: 1.0,
            temperature: 1.0,
            viscosity: 1.0,
        }
    }
}

/// Gas model in normalized variables.
///
/// After construction, `gas_r = 1/(gamma * Ma^2)` and `cv = gas_r/(gamma-1)`;
/// the same equations then serve dimensional and nondimensional runs.
#[derive(Clone, Copy, Debug)]
pub struct GasModel {
    pub gamma: Real,
    pub gas_r: Real,
    pub cv: Real,
    /// Normalized reference viscosity, `mu_ref / (rho_ref * u_ref * l_ref)`.
    pub mu_ref: Real,
    /// Dimensional reference temperature, for Sutherland evaluation.
    pub t_ref: Real,
    /// Reference Mach number.
    pub mach: Real,
}

impl GasModel {
    /// Derive the normalized model from reference scales.
    pub fn from_reference(gamma: Real, scales: RefScales) -> FluidResult<Self> {
        for (v, what) in [
            (scales.length, "reference length"),
            (scales.velocity, "reference velocity"),
            (scales.density, "reference density"),
            (scales.temperature, "reference temperature"),
            (scales.viscosity, "reference viscosity"),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(FluidError::BadReference { what });
            }
        }
        if !(gamma.is_finite() && gamma > 1.0) {
            return Err(FluidError::BadReference { what: "gamma" });
        }

        let mach = scales.velocity / (gamma * GAS_CONSTANT_SI * scales.temperature).sqrt();
        let gas_r = 1.0 / (gamma * mach * mach);
        Ok(Self {
            gamma,
            gas_r,
            cv: gas_r / (gamma - 1.0),
            mu_ref: scales.viscosity / (scales.density * scales.velocity * scales.length),
            t_ref: scales.temperature,
            mach,
        })
    }

    /// Pressure from the conserved state. No positivity check.
    #[inline]
    pub fn pressure(&self, u: &Conservative) -> Real {
        let ke = 0.5 * (u.rho_u * u.rho_u + u.rho_v * u.rho_v + u.rho_w * u.rho_w) / u.rho;
        (self.gamma - 1.0) * (u.rho_e - ke)
    }

    /// Primitive variables from the conserved state.
    ///
    /// Fails with a non-physical-state error when `rho <= 0` or `p <= 0`.
    pub fn primitive(&self, u: &Conservative) -> FluidResult<Primitive> {
        if !(u.rho > 0.0) {
            return Err(FluidError::NonPhysical {
                what: "density not positive",
                rho: u.rho,
                p: 0.0,
            });
        }
        let vel_u = u.rho_u / u.rho;
        let vel_v = u.rho_v / u.rho;
        let vel_w = u.rho_w / u.rho;
        let p = (self.gamma - 1.0)
            * (u.rho_e - 0.5 * u.rho * (vel_u * vel_u + vel_v * vel_v + vel_w * vel_w));
        if !(p > 0.0) {
            return Err(FluidError::NonPhysical {
                what: "pressure not positive",
                rho: u.rho,
                p,
            });
        }
        Ok(Primitive {
            rho: u.rho,
            u: vel_u,
            v: vel_v,
            w: vel_w,
            p,
            t: p / (u.rho * self.gas_r),
        })
    }

    /// Conserved state from primitive variables.
    #[inline]
    pub fn conservative(&self, p: &Primitive) -> Conservative {
        Conservative {
            rho: p.rho,
            rho_u: p.rho * p.u,
            rho_v: p.rho * p.v,
            rho_w: p.rho * p.w,
            rho_e: 0.5 * p.rho * p.speed2() + p.p / (self.gamma - 1.0),
        }
    }

    /// Normalized temperature from the conserved state.
    #[inline]
    pub fn temperature(&self, u: &Conservative) -> Real {
        self.pressure(u) / (u.rho * self.gas_r)
    }

    /// Normalized dynamic viscosity at normalized temperature `t`.
    #[inline]
    pub fn viscosity(&self, t: Real) -> Real {
        self.mu_ref * sutherland(t * self.t_ref)
    }

    /// Thermal conductivity for a given viscosity.
    #[inline]
    pub fn conductivity(&self, mu: Real) -> Real {
        self.gamma * self.cv * mu / PRANDTL
    }

    /// Sound speed for a primitive state.
    #[inline]
    pub fn sound_speed(&self, p: &Primitive) -> Real {
        (self.gamma * p.p / p.rho).sqrt()
    }
}
