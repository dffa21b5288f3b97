//! CSV writers, one per panel scene, each with a header row.

use std::io::{self, Write};

use crate::constants::TESLA_TO_MICROTESLA;
use crate::fields::{ScalarField2, VectorField2};
use crate::panels::biot_savart::BiotSavartScene;
use crate::panels::conductor::ConductorScene;
use crate::panels::coulomb::CoulombScene;
use crate::panels::fiber::FiberScene;
use crate::panels::loop_dipole::LoopDipoleScene;
use crate::panels::point_charge::PointChargeScene;
use crate::panels::potential::PotentialScene;
use crate::panels::rlc::RlcScene;
use crate::panels::ring_torque::RingTorqueScene;
use crate::panels::waveguide::WaveguideScene;
use crate::panels::wires::WiresScene;

fn write_vector_rows<W: Write>(w: &mut W, field: &VectorField2, extra: Option<&ScalarField2>) -> io::Result<()> {
    for (k, p) in field.grid.points() {
        let (u, v) = (field.u[k], field.v[k]);
        write!(w, "{:.16e},{:.16e},{:.16e},{:.16e},{:.16e}", p.x, p.y, u, v, u.hypot(v))?;
        match extra {
            Some(s) => writeln!(w, ",{:.16e}", s.values[k])?,
            None => writeln!(w)?,
        }
    }
    Ok(())
}

/// Writes both charges and the force on each.
pub fn write_coulomb_csv<W: Write>(mut w: W, scene: &CoulombScene) -> io::Result<()> {
    writeln!(w, "charge,x,y,q,fx,fy")?;
    for (k, (c, f)) in scene.charges.iter().zip(&scene.forces).enumerate() {
        writeln!(
            w,
            "{},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e}",
            k + 1,
            c.position.x,
            c.position.y,
            c.charge_c,
            f.x,
            f.y
        )?;
    }
    Ok(())
}

/// Writes the field (N/C) and potential (V) at every mesh point.
pub fn write_point_charge_csv<W: Write>(mut w: W, scene: &PointChargeScene) -> io::Result<()> {
    writeln!(w, "x,y,ex,ey,e_mag,potential")?;
    write_vector_rows(&mut w, &scene.field, Some(&scene.potential))
}

/// Writes the potential (V) at every mesh point.
pub fn write_potential_csv<W: Write>(mut w: W, scene: &PotentialScene) -> io::Result<()> {
    writeln!(w, "x,y,potential")?;
    for (k, p) in scene.potential.grid.points() {
        writeln!(w, "{:.16e},{:.16e},{:.16e}", p.x, p.y, scene.potential.values[k])?;
    }
    Ok(())
}

/// Writes the x–z plane field (V/m) and potential (V).
pub fn write_conductor_csv<W: Write>(mut w: W, scene: &ConductorScene) -> io::Result<()> {
    writeln!(w, "x,z,ex,ez,e_mag,potential")?;
    write_vector_rows(&mut w, &scene.field, Some(&scene.potential))
}

/// Writes the flux density (μT) at every mesh point.
pub fn write_wires_csv<W: Write>(mut w: W, scene: &WiresScene) -> io::Result<()> {
    writeln!(w, "x,y,bx_ut,by_ut,b_mag_ut")?;
    write_vector_rows(&mut w, &scene.field, None)
}

/// Writes the radial profile of the discretized, exact and infinite-wire fields (μT).
pub fn write_biot_savart_csv<W: Write>(mut w: W, scene: &BiotSavartScene) -> io::Result<()> {
    writeln!(w, "rho,b_discrete_ut,b_exact_ut,b_infinite_ut")?;
    let p = &scene.profile;
    for k in 0..p.rho.len() {
        writeln!(
            w,
            "{:.16e},{:.16e},{:.16e},{:.16e}",
            p.rho[k],
            p.discrete[k] * TESLA_TO_MICROTESLA,
            p.exact[k] * TESLA_TO_MICROTESLA,
            p.infinite[k] * TESLA_TO_MICROTESLA
        )?;
    }
    Ok(())
}

/// Writes every field-line vertex with its line number and |B| (μT).
pub fn write_loop_dipole_csv<W: Write>(mut w: W, scene: &LoopDipoleScene) -> io::Result<()> {
    writeln!(w, "line,vertex,x,y,z,b_ut")?;
    for (n, line) in scene.lines.iter().enumerate() {
        for (k, (p, b)) in line.points.iter().zip(&line.magnitudes).enumerate() {
            writeln!(w, "{n},{k},{:.16e},{:.16e},{:.16e},{:.16e}", p.x, p.y, p.z, b)?;
        }
    }
    Ok(())
}

/// Writes the ring samples with their charge density (C/m).
pub fn write_ring_torque_csv<W: Write>(mut w: W, scene: &RingTorqueScene) -> io::Result<()> {
    writeln!(w, "x,y,z,lambda")?;
    for (p, lambda) in &scene.samples {
        writeln!(w, "{:.16e},{:.16e},{:.16e},{:.16e}", p.x, p.y, p.z, lambda)?;
    }
    Ok(())
}

/// Writes the sampled transient.
pub fn write_rlc_csv<W: Write>(mut w: W, scene: &RlcScene) -> io::Result<()> {
    let t = &scene.transient;
    writeln!(w, "time,v_in,current,v_c,v_r,v_l,energy_l,energy_c,energy_total")?;
    for k in 0..t.len() {
        writeln!(
            w,
            "{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e}",
            t.time[k],
            t.input_voltage[k],
            t.current[k],
            t.capacitor_voltage[k],
            t.resistor_voltage[k],
            t.inductor_voltage[k],
            t.inductor_energy[k],
            t.capacitor_energy[k],
            t.total_energy[k]
        )?;
    }
    Ok(())
}

/// Writes the mode's field components over the cross-section (cm).
pub fn write_waveguide_csv<W: Write>(mut w: W, scene: &WaveguideScene) -> io::Result<()> {
    let f = &scene.fields;
    let total = f.total_magnitude();
    writeln!(w, "x_cm,y_cm,ex,ey,ez,e_transverse,e_total")?;
    for (k, p) in f.grid.points() {
        writeln!(
            w,
            "{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e}",
            p.x, p.y, f.ex[k], f.ey[k], f.ez[k], scene.transverse_magnitude[k], total[k]
        )?;
    }
    Ok(())
}

/// Writes the ray's vertices (μm); `reflection` marks total-reflection hits.
pub fn write_fiber_csv<W: Write>(mut w: W, scene: &FiberScene) -> io::Result<()> {
    writeln!(w, "vertex,x_um,y_um,z_um,reflection")?;
    for (k, p) in scene.path.points.iter().enumerate() {
        let reflected = scene.path.reflections.contains(p);
        writeln!(w, "{k},{:.16e},{:.16e},{:.16e},{}", p.x, p.y, p.z, u8::from(reflected))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels;

    fn lines(buf: &[u8]) -> Vec<String> {
        String::from_utf8(buf.to_vec())
            .expect("utf8")
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn coulomb_rows_are_equal_and_opposite() {
        let scene = panels::coulomb::compute(&Default::default());
        let mut buf = Vec::new();
        write_coulomb_csv(&mut buf, &scene).expect("write");
        let rows = lines(&buf);
        assert_eq!(rows[0], "charge,x,y,q,fx,fy");
        assert_eq!(rows.len(), 3);
        let fx = |row: &str| row.split(',').nth(4).and_then(|s| s.parse::<f64>().ok()).expect("fx");
        assert_eq!(fx(&rows[1]), -fx(&rows[2]));
    }

    #[test]
    fn rlc_has_one_row_per_sample() {
        let scene = panels::rlc::compute(&Default::default()).expect("integrates");
        let mut buf = Vec::new();
        write_rlc_csv(&mut buf, &scene).expect("write");
        let rows = lines(&buf);
        assert_eq!(rows.len(), panels::rlc::TIME_SAMPLES + 1);
        assert_eq!(rows[1].split(',').count(), 9);
    }

    #[test]
    fn fiber_marks_reflections() {
        let scene = panels::fiber::compute(&panels::fiber::FiberParams {
            angle_deg: 80.0,
            ..Default::default()
        });
        assert!(!scene.path.reflections.is_empty());
        let mut buf = Vec::new();
        write_fiber_csv(&mut buf, &scene).expect("write");
        let marked = lines(&buf).iter().skip(1).filter(|r| r.ends_with(",1")).count();
        assert_eq!(marked, scene.path.reflections.len());
    }
}
