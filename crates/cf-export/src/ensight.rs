//! EnSight Gold binary writers.

use crate::particle::write_particle_file;
use crate::ExportResult;
use cf_core::Real;
use cf_fluids::{Conservative, GasModel};
use cf_grid::{field, Axis, Box3, NodeFlag, Partition, Space};
use cf_ibm::Sphere;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Length of an EnSight character record.
const RECORD: usize = 80;

fn write_record<W: Write>(w: &mut W, s: &str) -> ExportResult<()> {
    let mut buf = [0u8; RECORD];
    let bytes = s.as_bytes();
    let n = bytes.len().min(RECORD);
    buf[..n].copy_from_slice(&bytes[..n]);
    w.write_all(&buf)?;
    Ok(())
}

fn write_i32<W: Write>(w: &mut W, v: i32) -> ExportResult<()> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_f32<W: Write>(w: &mut W, v: f32) -> ExportResult<()> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// A node is used (iblank 1) when the flow solves there: interior fluid or
/// the ghost band. Solid interiors and everything outside the domain are
/// blanked.
fn iblank(flag: NodeFlag) -> i32 {
    match flag {
        NodeFlag::Fluid | NodeFlag::Ghost(_) => 1,
        NodeFlag::Solid(_) | NodeFlag::Exterior => 0,
    }
}

/// Transient EnSight Gold writer rooted at one directory.
pub struct EnsightExporter {
    dir: PathBuf,
    prefix: String,
    times: Vec<Real>,
}

/// Variables exported per snapshot, in file order.
const SCALARS: [&str; 6] = ["rho", "u", "v", "w", "p", "T"];

impl EnsightExporter {
    pub fn new(dir: &Path, prefix: &str) -> ExportResult<Self> {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            times: Vec::new(),
        })
    }

    fn stem(&self, index: usize) -> String {
        format!("{}{:04}", self.prefix, index)
    }

    /// Write one snapshot: geometry, variables, particle sidecar, snapshot
    /// case file, and the refreshed transient case.
    #[allow(clippy::too_many_arguments)]
    pub fn write_snapshot(
        &mut self,
        space: &Space,
        partition: &Partition,
        model: &GasModel,
        buf: &[Real],
        bodies: &[Sphere],
        index: usize,
        time: Real,
    ) -> ExportResult<()> {
        let part = partition.domain_box();
        let stem = self.stem(index);

        self.write_geometry(space, part, &format!("{stem}.geo"))?;
        self.write_variables(space, part, model, buf, &stem)?;
        write_particle_file(&self.dir.join(format!("{stem}.particle")), bodies)?;
        self.write_case(&stem)?;

        self.times.push(time);
        self.write_transient_case()?;
        tracing::info!(index, time, "wrote field snapshot");
        Ok(())
    }

    fn write_geometry(&self, space: &Space, part: Box3, name: &str) -> ExportResult<()> {
        let mut w = BufWriter::new(File::create(self.dir.join(name))?);
        write_record(&mut w, "C Binary")?;
        write_record(&mut w, "cartflow field geometry")?;
        write_record(&mut w, "uniform cartesian block")?;
        write_record(&mut w, "node id off")?;
        write_record(&mut w, "element id off")?;
        write_record(&mut w, "part")?;
        write_i32(&mut w, 1)?;
        write_record(&mut w, "computational domain")?;
        write_record(&mut w, "block iblank")?;

        let ni = part.i_sup - part.i_sub;
        let nj = part.j_sup - part.j_sub;
        let nk = part.k_sup - part.k_sub;
        write_i32(&mut w, ni as i32)?;
        write_i32(&mut w, nj as i32)?;
        write_i32(&mut w, nk as i32)?;

        // Coordinates component by component, IJK order (i fastest).
        for axis in Axis::ALL {
            for k in part.k_sub..part.k_sup {
                for j in part.j_sub..part.j_sup {
                    for i in part.i_sub..part.i_sup {
                        let n = match axis {
                            Axis::X => i,
                            Axis::Y => j,
                            Axis::Z => k,
                        };
                        write_f32(&mut w, space.coord_of(axis, n) as f32)?;
                    }
                }
            }
        }

        for k in part.k_sub..part.k_sup {
            for j in part.j_sub..part.j_sup {
                for i in part.i_sub..part.i_sup {
                    write_i32(&mut w, iblank(space.flag(space.idx(k, j, i))))?;
                }
            }
        }
        w.flush()?;
        Ok(())
    }

    fn write_variables(
        &self,
        space: &Space,
        part: Box3,
        model: &GasModel,
        buf: &[Real],
        stem: &str,
    ) -> ExportResult<()> {
        // Gather primitives once, in IJK order.
        let mut prim = Vec::with_capacity(part.count());
        for k in part.k_sub..part.k_sup {
            for j in part.j_sub..part.j_sup {
                for i in part.i_sub..part.i_sup {
                    let u = Conservative::from_slice(field::node(buf, space.idx(k, j, i)));
                    let vel_u = u.rho_u / u.rho;
                    let vel_v = u.rho_v / u.rho;
                    let vel_w = u.rho_w / u.rho;
                    let p = model.pressure(&u);
                    let t = p / (u.rho * model.gas_r);
                    prim.push([u.rho, vel_u, vel_v, vel_w, p, t]);
                }
            }
        }

        for (c, name) in SCALARS.iter().enumerate() {
            let mut w =
                BufWriter::new(File::create(self.dir.join(format!("{stem}.{name}")))?);
            write_record(&mut w, name)?;
            write_record(&mut w, "part")?;
            write_i32(&mut w, 1)?;
            write_record(&mut w, "block")?;
            for row in &prim {
                write_f32(&mut w, row[c] as f32)?;
            }
            w.flush()?;
        }

        let mut w = BufWriter::new(File::create(self.dir.join(format!("{stem}.vel")))?);
        write_record(&mut w, "Vel")?;
        write_record(&mut w, "part")?;
        write_i32(&mut w, 1)?;
        write_record(&mut w, "block")?;
        for c in 1..=3 {
            for row in &prim {
                write_f32(&mut w, row[c] as f32)?;
            }
        }
        w.flush()?;
        Ok(())
    }

    fn write_case(&self, stem: &str) -> ExportResult<()> {
        let mut text = String::new();
        text.push_str("FORMAT\ntype: ensight gold\n");
        text.push_str(&format!("GEOMETRY\nmodel: {stem}.geo\n"));
        text.push_str("VARIABLE\n");
        for name in SCALARS {
            text.push_str(&format!("scalar per node: {name} {stem}.{name}\n"));
        }
        text.push_str(&format!("vector per node: Vel {stem}.vel\n"));
        std::fs::write(self.dir.join(format!("{stem}.case")), text)?;
        Ok(())
    }

    /// Rewrite the transient case covering every snapshot so far.
    fn write_transient_case(&self) -> ExportResult<()> {
        let wild = format!("{}****", self.prefix);
        let mut text = String::new();
        text.push_str("FORMAT\ntype: ensight gold\n");
        text.push_str(&format!("GEOMETRY\nmodel: 1 {wild}.geo\n"));
        text.push_str("VARIABLE\n");
        for name in SCALARS {
            text.push_str(&format!("scalar per node: 1 {name} {wild}.{name}\n"));
        }
        text.push_str(&format!("vector per node: 1 Vel {wild}.vel\n"));
        text.push_str("TIME\ntime set: 1\n");
        text.push_str(&format!("number of steps: {}\n", self.times.len()));
        text.push_str("filename start number: 0\nfilename increment: 1\n");
        text.push_str("time values:");
        for t in &self.times {
            text.push_str(&format!(" {t:.6e}"));
        }
        text.push('\n');
        std::fs::write(self.dir.join("ensight.case"), text)?;
        Ok(())
    }
}
