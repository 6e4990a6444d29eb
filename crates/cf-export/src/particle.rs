//! Plain-text body-state sidecar.

use crate::ExportResult;
use cf_ibm::Sphere;
use std::path::Path;

/// One line per body: `x y z r u v w omega`.
pub fn write_particle_file(path: &Path, bodies: &[Sphere]) -> ExportResult<()> {
    let mut text = String::new();
    for b in bodies {
        text.push_str(&format!(
            "{:.12e} {:.12e} {:.12e} {:.12e} {:.12e} {:.12e} {:.12e} {:.12e}\n",
            b.center.x,
            b.center.y,
            b.center.z,
            b.radius,
            b.velocity.x,
            b.velocity.y,
            b.velocity.z,
            b.omega,
        ));
    }
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::Vec3;

    #[test]
    fn particle_file_round_trips_by_eye() {
        let dir = std::env::temp_dir().join("cartflow-particle-test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("t.particle");

        let mut body = Sphere::stationary(Vec3::new(0.5, 0.25, 0.75), 0.2);
        body.omega = 3.0;
        write_particle_file(&path, &[body]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let fields: Vec<f64> = text
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(fields.len(), 8);
        assert!((fields[0] - 0.5).abs() < 1e-12);
        assert!((fields[3] - 0.2).abs() < 1e-12);
        assert!((fields[7] - 3.0).abs() < 1e-12);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
