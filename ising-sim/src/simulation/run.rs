use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;

use crate::config::SimConfig;
use crate::error::{check_temperature, IsingError, IsingResult};
use crate::mcmc::{metropolis_sweep, Metropolis};
use crate::spins::{magnetization_per_spin, total_energy, Lattice};
use crate::statistics::ObservableSeries;

/// Everything one temperature run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub temperature: f64,
    pub series: ObservableSeries,
    pub final_lattice: Lattice,
    /// Accepted flips during the sampling phase.
    pub accepted: usize,
    /// Flip attempts during the sampling phase (`n_sample_sweeps * L * L`).
    pub attempts: usize,
}

impl RunOutput {
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.attempts as f64
    }
}

/// Equilibrate then sample a fresh random lattice at one temperature.
///
/// 1. A new `L x L` lattice is drawn from `rng`.
/// 2. `n_equil_sweeps` sweeps are run without measurement.
/// 3. `n_sample_sweeps` sweeps follow; total energy and |m| are recorded
///    after each one.
///
/// `beta = 1 / T` for the whole run. `interrupted` is polled before every
/// sweep and `on_sweep` is called once per sweep (useful for progress bars).
pub fn run_at_temperature<R: Rng + ?Sized>(
    config: &SimConfig,
    temperature: f64,
    rng: &mut R,
    interrupted: &AtomicBool,
    on_sweep: &(dyn Fn() + Sync),
) -> IsingResult<RunOutput> {
    config.check()?;
    check_temperature(temperature)?;

    let kernel = Metropolis::new(1.0 / temperature, config.coupling)?;
    let mut lattice = Lattice::random(config.lattice_size, rng)?;

    let n_equil = config.n_equil_sweeps;
    let n_sample = config.n_sample_sweeps;
    let mut energies = Vec::with_capacity(n_sample);
    let mut mags = Vec::with_capacity(n_sample);
    let mut accepted = 0usize;

    for sweep_id in 0..n_equil + n_sample {
        if interrupted.load(Ordering::Relaxed) {
            return Err(IsingError::Interrupted {
                completed_sweeps: sweep_id,
            });
        }
        on_sweep();

        let flips = metropolis_sweep(&mut lattice, &kernel, rng)?;
        if sweep_id >= n_equil {
            accepted += flips;
            energies.push(total_energy(&lattice, config.coupling));
            mags.push(magnetization_per_spin(&lattice));
        }
    }

    Ok(RunOutput {
        temperature,
        series: ObservableSeries { energies, mags },
        attempts: n_sample * lattice.n_spins(),
        final_lattice: lattice,
        accepted,
    })
}
