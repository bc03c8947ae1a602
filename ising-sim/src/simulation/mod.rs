pub mod run;

pub use run::{run_at_temperature, RunOutput};

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use log::{debug, info, warn};

use crate::config::SimConfig;
use crate::error::{check_temperature, IsingError, IsingResult};
use crate::parallel::par_over_temperatures;
use crate::statistics::{
    autocorrelation, heat_capacity, sokal_tau, SizeScan, Statistics, TemperatureResult,
    TemperatureSweep,
};

/// Reduce one run to its `(L, T)` aggregates.
pub fn summarize_run(
    config: &SimConfig,
    output: RunOutput,
    elapsed_secs: f64,
) -> TemperatureResult {
    let mags = Statistics::from_series(&output.series.mags);
    let energies = Statistics::from_series(&output.series.energies);
    let temperature = output.temperature;

    let mag_tau = config.autocorrelation_max_lag.map(|max_lag| {
        let max_lag = max_lag.min(output.series.mags.len() / 4).max(1);
        sokal_tau(&autocorrelation(&output.series.mags, max_lag))
    });

    TemperatureResult {
        temperature,
        mag_mean: mags.mean(),
        mag_error: mags.std_error(),
        energy_mean: energies.mean(),
        energy_sq_mean: energies.mean_sq(),
        heat_capacity: heat_capacity(
            energies.mean(),
            energies.mean_sq(),
            temperature,
            config.lattice_size,
        ),
        acceptance_rate: output.acceptance_rate(),
        elapsed_secs,
        mag_tau,
        series: config.keep_series.then_some(output.series),
        final_lattice: config.keep_final_lattice.then_some(output.final_lattice),
    }
}

fn check_temperatures(temperatures: &[f64]) -> IsingResult<()> {
    for (index, &temperature) in temperatures.iter().enumerate() {
        check_temperature(temperature).map_err(|e| IsingError::TemperatureFailed {
            index,
            temperature,
            source: Box::new(e),
        })?;
    }
    Ok(())
}

/// Simulate every temperature in `temperatures` and aggregate each run.
///
/// Output follows input order (no sorting, no dedup). Temperatures are
/// independent runs on fresh lattices and are dispatched over the rayon pool
/// unless `config.sequential` is set; temperature `k` uses seed
/// `config.seed + k` either way.
///
/// All temperatures are validated before any run starts, and the first
/// failing run aborts the whole sweep.
pub fn sweep_temperatures(
    config: &SimConfig,
    temperatures: &[f64],
    interrupted: &AtomicBool,
    on_sweep: &(dyn Fn() + Sync),
) -> IsingResult<TemperatureSweep> {
    config.check()?;
    check_temperatures(temperatures)?;

    info!(
        "sweeping {} temperatures on a {}x{} lattice ({} + {} sweeps each)",
        temperatures.len(),
        config.lattice_size,
        config.lattice_size,
        config.n_equil_sweeps,
        config.n_sample_sweeps,
    );
    let t0 = Instant::now();

    let results = par_over_temperatures(
        temperatures,
        config.seed,
        config.sequential,
        |index, temperature, rng| {
            let start = Instant::now();
            let output = run_at_temperature(config, temperature, rng, interrupted, on_sweep)
                .map_err(|e| {
                    if matches!(e, IsingError::Interrupted { .. }) {
                        warn!("run at T = {temperature} interrupted");
                    }
                    IsingError::TemperatureFailed {
                        index,
                        temperature,
                        source: Box::new(e),
                    }
                })?;
            let elapsed = start.elapsed().as_secs_f64();
            let point = summarize_run(config, output, elapsed);
            debug!(
                "L={} T={:.4}: <|m|>={:.4} +- {:.4}, C={:.4}, {:.3}s",
                config.lattice_size,
                temperature,
                point.mag_mean,
                point.mag_error,
                point.heat_capacity,
                elapsed,
            );
            Ok(point)
        },
    );

    let points = results.into_iter().collect::<IsingResult<Vec<_>>>()?;
    info!(
        "L={} done in {:.3}s",
        config.lattice_size,
        t0.elapsed().as_secs_f64()
    );

    Ok(TemperatureSweep {
        lattice_size: config.lattice_size,
        points,
    })
}

/// Run [`sweep_temperatures`] for each lattice size in order, sharing every
/// other parameter of `config`.
pub fn scan_sizes(
    config: &SimConfig,
    sizes: &[usize],
    temperatures: &[f64],
    interrupted: &AtomicBool,
    on_sweep: &(dyn Fn() + Sync),
) -> IsingResult<SizeScan> {
    let configs: Vec<SimConfig> = sizes
        .iter()
        .map(|&lattice_size| SimConfig {
            lattice_size,
            ..config.clone()
        })
        .collect();
    for cfg in &configs {
        cfg.check()?;
    }
    check_temperatures(temperatures)?;

    let mut sweeps = Vec::with_capacity(configs.len());
    for cfg in &configs {
        let sweep = sweep_temperatures(cfg, temperatures, interrupted, on_sweep)?;
        sweeps.push(sweep);
    }
    Ok(SizeScan { sweeps })
}
