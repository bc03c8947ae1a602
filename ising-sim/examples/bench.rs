use std::sync::atomic::AtomicBool;
use std::time::Instant;

use ising_sim::{sweep_temperatures, SimConfig};

const L: usize = 64;
const N_TEMPS: usize = 16;
const N_EQUIL: usize = 200;
const N_SAMPLE: usize = 200;

fn main() {
    let temps: Vec<f64> = (0..N_TEMPS)
        .map(|i| 1.0 + 3.0 * i as f64 / (N_TEMPS - 1) as f64)
        .collect();

    let config = SimConfig {
        n_equil_sweeps: N_EQUIL,
        n_sample_sweeps: N_SAMPLE,
        ..SimConfig::new(L)
    };
    let interrupted = AtomicBool::new(false);

    println!(
        "Lattice: {}x{}  |  Temps: {}  |  Sweeps: {} + {}",
        L, L, N_TEMPS, N_EQUIL, N_SAMPLE
    );
    println!("{}", "-".repeat(70));

    for sequential in [true, false] {
        let config = SimConfig {
            sequential,
            ..config.clone()
        };
        let t0 = Instant::now();
        let result = sweep_temperatures(&config, &temps, &interrupted, &|| {}).unwrap();
        let elapsed = t0.elapsed().as_secs_f64();

        let n_sweeps = (N_TEMPS * config.sweeps_per_run()) as f64;
        let per_flip_ns = elapsed / (n_sweeps * (L * L) as f64) * 1e9;
        println!(
            "{:<10}  total: {:.3} s  |  {:.2} ns/attempt  |  C peak at T = {:.3}",
            if sequential { "sequential" } else { "parallel" },
            elapsed,
            per_flip_ns,
            result.heat_capacity_peak().unwrap_or(f64::NAN),
        );
    }
}
