//! Solver-state persistence for restart.
//!
//! A JSON manifest carries the step counter, current time and body states;
//! the conservative field of the current time level goes to a raw
//! little-endian f64 dump next to it. The loader re-checks the field length
//! against the grid so a truncated dump is caught before the solver runs.

use crate::{ExportError, ExportResult};
use cf_core::{Real, Vec3};
use cf_ibm::Sphere;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub r: f64,
    pub u: f64,
    pub v: f64,
    pub w: f64,
    pub omega: f64,
}

impl From<&Sphere> for BodyState {
    fn from(b: &Sphere) -> Self {
        Self {
            x: b.center.x,
            y: b.center.y,
            z: b.center.z,
            r: b.radius,
            u: b.velocity.x,
            v: b.velocity.y,
            w: b.velocity.z,
            omega: b.omega,
        }
    }
}

impl From<&BodyState> for Sphere {
    fn from(s: &BodyState) -> Self {
        Self {
            center: Vec3::new(s.x, s.y, s.z),
            radius: s.r,
            velocity: Vec3::new(s.u, s.v, s.w),
            omega: s.omega,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestartManifest {
    pub name: String,
    pub step: u64,
    pub time: f64,
    pub bodies: Vec<BodyState>,
}

const MANIFEST_FILE: &str = "restart.json";
const FIELD_FILE: &str = "field.bin";

pub fn save_restart(dir: &Path, manifest: &RestartManifest, buf: &[Real]) -> ExportResult<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(dir.join(MANIFEST_FILE), json)?;

    let mut w = std::io::BufWriter::new(std::fs::File::create(dir.join(FIELD_FILE))?);
    for v in buf {
        w.write_all(&v.to_le_bytes())?;
    }
    w.flush()?;
    tracing::info!(step = manifest.step, time = manifest.time, "wrote restart state");
    Ok(())
}

/// Load a restart pair; `expected_len` is the buffer length the grid
/// demands (`NCONS * n_max`).
pub fn load_restart(dir: &Path, expected_len: usize) -> ExportResult<(RestartManifest, Vec<Real>)> {
    let json = std::fs::read_to_string(dir.join(MANIFEST_FILE))?;
    let manifest: RestartManifest = serde_json::from_str(&json)?;

    let mut bytes = Vec::new();
    std::fs::File::open(dir.join(FIELD_FILE))?.read_to_end(&mut bytes)?;
    if bytes.len() != expected_len * 8 {
        return Err(ExportError::Truncated {
            expected: expected_len,
            found: bytes.len() / 8,
        });
    }
    let buf = bytes
        .chunks_exact(8)
        .map(|c| Real::from_le_bytes(c.try_into().unwrap_or([0; 8])))
        .collect();
    Ok((manifest, buf))
}
