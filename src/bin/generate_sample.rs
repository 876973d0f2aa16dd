use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// One simulation sample, in the regression suite's column order.
#[derive(Debug, Clone, Copy, Default, Serialize)]
struct Record {
    time: f64,
    id: f64,
    iq: f64,
    vd: f64,
    vq: f64,
    theta_e: f64,
    omega_e: f64,
    omega_m: f64,
    torque: f64,
}

// Small surface-mount PMSM, roughly matching the simulated test motor.
const POLE_PAIRS: f64 = 7.0;
const FLUX_LINKAGE: f64 = 0.0035;
const RESISTANCE: f64 = 0.05;
const INDUCTANCE: f64 = 20e-6;
const INERTIA: f64 = 1e-4;

const DT: f64 = 1e-4;
const DURATION: f64 = 0.2;
const STEP_AT: f64 = 0.05;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

/// Integrate the dq model one step given current references and load.
fn step(prev: &Record, id: f64, iq: f64, load: f64) -> Record {
    let torque = 1.5 * POLE_PAIRS * FLUX_LINKAGE * iq;
    let omega_m = prev.omega_m + (torque - load) / INERTIA * DT;
    let omega_e = omega_m * POLE_PAIRS;
    let did = (id - prev.id) / DT;
    let diq = (iq - prev.iq) / DT;
    Record {
        time: prev.time + DT,
        id,
        iq,
        vd: RESISTANCE * id + INDUCTANCE * did - omega_e * INDUCTANCE * iq,
        vq: RESISTANCE * iq + INDUCTANCE * diq + omega_e * (INDUCTANCE * id + FLUX_LINKAGE),
        theta_e: (prev.theta_e + omega_e * DT).rem_euclid(2.0 * PI),
        omega_e,
        omega_m,
        torque,
    }
}

fn simulate(mut currents: impl FnMut(&Record) -> (f64, f64, f64), rng: &mut SimpleRng) -> Vec<Record> {
    let n = (DURATION / DT).round() as usize;
    let mut out = Vec::with_capacity(n + 1);
    let mut rec = Record::default();
    out.push(rec);
    for _ in 0..n {
        let (id, iq, load) = currents(&rec);
        rec = step(&rec, id + rng.gauss(0.0, 0.02), iq + rng.gauss(0.0, 0.02), load);
        out.push(rec);
    }
    out
}

/// Speed loop: PI on mechanical speed, reference steps to 300 rad/s.
fn speed_step(rng: &mut SimpleRng) -> Vec<Record> {
    let (kp, ki) = (0.05, 2.0);
    let mut integral = 0.0;
    simulate(
        |rec| {
            let target = if rec.time >= STEP_AT { 300.0 } else { 0.0 };
            let err = target - rec.omega_m;
            integral += err * DT;
            let iq = (kp * err + ki * integral).clamp(-20.0, 20.0);
            (0.0, iq, 0.002)
        },
        rng,
    )
}

/// Current loop: iq reference steps to 8 A with a first-order response.
fn torque_step(rng: &mut SimpleRng) -> Vec<Record> {
    let tau = 1e-3;
    let mut iq = 0.0;
    simulate(
        |rec| {
            let target = if rec.time >= STEP_AT { 8.0 } else { 0.0 };
            iq += (target - iq) * DT / tau;
            (0.0, iq, 0.01 + 1e-4 * rec.omega_m)
        },
        rng,
    )
}

/// Standstill high-frequency injection on the d axis.
fn hfi(rng: &mut SimpleRng) -> Vec<Record> {
    let f_inj = 1000.0;
    simulate(
        |rec| {
            let id = 0.5 * (2.0 * PI * f_inj * rec.time).sin();
            let iq = 0.3 * (2.0 * PI * f_inj * rec.time + 2.0 * rec.theta_e).cos();
            (id, iq, 0.0)
        },
        rng,
    )
}

fn write_csv(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for rec in records {
        writer.serialize(rec).context("writing record")?;
    }
    writer.flush().context("flushing CSV")?;
    println!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = Path::new("results");
    fs::create_dir_all(out_dir).context("creating results directory")?;

    let mut rng = SimpleRng::new(42);

    write_csv(&out_dir.join("speed_step_test.csv"), &speed_step(&mut rng))?;
    write_csv(&out_dir.join("torque_step_test.csv"), &torque_step(&mut rng))?;
    write_csv(&out_dir.join("hfi_test.csv"), &hfi(&mut rng))?;

    Ok(())
}
