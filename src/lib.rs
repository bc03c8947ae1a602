use std::sync::atomic::AtomicBool;

use indicatif::{ProgressBar, ProgressStyle};
use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use ising_sim::{IsingError, SimConfig, TemperatureSweep};

fn value_error(e: IsingError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn progress_bar(total: u64, msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
        )
        .unwrap()
        .progress_chars("=> "),
    );
    pb.set_message(msg);
    pb
}

#[allow(clippy::too_many_arguments)]
fn build_config(
    lattice_size: usize,
    n_equil_sweeps: usize,
    n_sample_sweeps: usize,
    coupling: f64,
    seed: Option<u64>,
    sequential: bool,
    keep_series: bool,
    autocorrelation_max_lag: Option<usize>,
) -> PyResult<SimConfig> {
    let config = SimConfig {
        lattice_size,
        n_equil_sweeps,
        n_sample_sweeps,
        coupling,
        seed: seed.unwrap_or(42),
        sequential,
        keep_series,
        keep_final_lattice: false,
        autocorrelation_max_lag,
    };
    config.check().map_err(value_error)?;
    Ok(config)
}

/// Stack equal-length rows into a 2D array.
fn stack_rows(rows: Vec<Vec<f64>>) -> PyResult<Array2<f64>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, |r| r.len());
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

fn sweep_to_dict<'py>(
    py: Python<'py>,
    sweep: &TemperatureSweep,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("lattice_size", sweep.lattice_size)?;
    dict.set_item(
        "temperatures",
        Array1::from(sweep.temperatures()).into_pyarray(py),
    )?;
    dict.set_item("mag_mean", Array1::from(sweep.mag_means()).into_pyarray(py))?;
    dict.set_item("mag_err", Array1::from(sweep.mag_errors()).into_pyarray(py))?;
    dict.set_item(
        "heat_capacity",
        Array1::from(sweep.heat_capacities()).into_pyarray(py),
    )?;
    dict.set_item(
        "elapsed",
        Array1::from(sweep.elapsed_secs()).into_pyarray(py),
    )?;
    dict.set_item(
        "energy_mean",
        Array1::from(sweep.energy_means()).into_pyarray(py),
    )?;
    dict.set_item(
        "energy_sq_mean",
        Array1::from(sweep.energy_sq_means()).into_pyarray(py),
    )?;
    dict.set_item(
        "acceptance_rate",
        Array1::from(sweep.acceptance_rates()).into_pyarray(py),
    )?;

    if sweep.points.iter().any(|p| p.mag_tau.is_some()) {
        dict.set_item("mag_tau", Array1::from(sweep.mag_taus()).into_pyarray(py))?;
    }

    let series: Option<Vec<_>> = sweep.points.iter().map(|p| p.series.as_ref()).collect();
    if let Some(series) = series.filter(|s| !s.is_empty()) {
        let energies = series.iter().map(|s| s.energies.clone()).collect();
        let mags = series.iter().map(|s| s.mags.clone()).collect();
        dict.set_item("energy_series", stack_rows(energies)?.into_pyarray(py))?;
        dict.set_item("mag_series", stack_rows(mags)?.into_pyarray(py))?;
    }

    Ok(dict)
}

/// Run the Metropolis simulation at every temperature and aggregate.
///
/// Arguments:
///   lattice_size: side length L of the periodic L x L lattice
///   temperatures: numpy array of shape (n_temps,), float64, kept in order
///   n_equil_sweeps: unmeasured sweeps per temperature (default 1000)
///   n_sample_sweeps: measured sweeps per temperature (default 1000)
///   coupling: J (default 1.0)
///   seed: temperature k is seeded with seed + k (default 42)
///   sequential: run temperatures on one thread
///   keep_series: also return per-sweep energy / |m| series
///   autocorrelation_max_lag: if set, return the |m| autocorrelation time
///
/// Returns: dict of numpy arrays of shape (n_temps,) with keys "temperatures",
///   "mag_mean", "mag_err", "heat_capacity", "elapsed", "energy_mean",
///   "energy_sq_mean", "acceptance_rate"; plus "mag_tau" and
///   "energy_series" / "mag_series" of shape (n_temps, n_sample_sweeps) when
///   requested.
#[pyfunction]
#[pyo3(signature = (lattice_size, temperatures, n_equil_sweeps=1000, n_sample_sweeps=1000, coupling=1.0, seed=None, sequential=false, keep_series=false, autocorrelation_max_lag=None))]
#[allow(clippy::too_many_arguments)]
fn sweep_temperatures<'py>(
    py: Python<'py>,
    lattice_size: usize,
    temperatures: PyReadonlyArray1<'py, f64>,
    n_equil_sweeps: usize,
    n_sample_sweeps: usize,
    coupling: f64,
    seed: Option<u64>,
    sequential: bool,
    keep_series: bool,
    autocorrelation_max_lag: Option<usize>,
) -> PyResult<Bound<'py, PyDict>> {
    let config = build_config(
        lattice_size,
        n_equil_sweeps,
        n_sample_sweeps,
        coupling,
        seed,
        sequential,
        keep_series,
        autocorrelation_max_lag,
    )?;
    let temps = temperatures.as_slice()?.to_vec();

    let pb = progress_bar((temps.len() * config.sweeps_per_run()) as u64, "sweeps");
    let interrupted = AtomicBool::new(false);
    let sweep = py
        .allow_threads(|| {
            ising_sim::sweep_temperatures(&config, &temps, &interrupted, &|| pb.inc(1))
        })
        .map_err(value_error)?;
    pb.finish();

    sweep_to_dict(py, &sweep)
}

/// Same as `sweep_temperatures`, repeated for each lattice size.
///
/// Returns: dict with "sizes" (n_sizes,), "temperatures" (n_temps,) and 2D
///   arrays of shape (n_sizes, n_temps) under "mag_mean", "mag_err",
///   "heat_capacity", "elapsed", "energy_mean", "energy_sq_mean",
///   "acceptance_rate".
#[pyfunction]
#[pyo3(signature = (sizes, temperatures, n_equil_sweeps=1000, n_sample_sweeps=1000, coupling=1.0, seed=None, sequential=false))]
#[allow(clippy::too_many_arguments)]
fn scan_sizes<'py>(
    py: Python<'py>,
    sizes: Vec<usize>,
    temperatures: PyReadonlyArray1<'py, f64>,
    n_equil_sweeps: usize,
    n_sample_sweeps: usize,
    coupling: f64,
    seed: Option<u64>,
    sequential: bool,
) -> PyResult<Bound<'py, PyDict>> {
    let first = sizes.first().copied().unwrap_or(1);
    let config = build_config(
        first,
        n_equil_sweeps,
        n_sample_sweeps,
        coupling,
        seed,
        sequential,
        false,
        None,
    )?;
    let temps = temperatures.as_slice()?.to_vec();

    let total = sizes.len() * temps.len() * config.sweeps_per_run();
    let pb = progress_bar(total as u64, "sweeps");
    let interrupted = AtomicBool::new(false);
    let scan = py
        .allow_threads(|| {
            ising_sim::scan_sizes(&config, &sizes, &temps, &interrupted, &|| pb.inc(1))
        })
        .map_err(value_error)?;
    pb.finish();

    let dict = PyDict::new(py);
    let sizes_out: Vec<u64> = scan.sizes().into_iter().map(|s| s as u64).collect();
    dict.set_item("sizes", Array1::from(sizes_out).into_pyarray(py))?;
    dict.set_item("temperatures", Array1::from(temps).into_pyarray(py))?;

    let columns: [(&str, fn(&TemperatureSweep) -> Vec<f64>); 7] = [
        ("mag_mean", TemperatureSweep::mag_means),
        ("mag_err", TemperatureSweep::mag_errors),
        ("heat_capacity", TemperatureSweep::heat_capacities),
        ("elapsed", TemperatureSweep::elapsed_secs),
        ("energy_mean", TemperatureSweep::energy_means),
        ("energy_sq_mean", TemperatureSweep::energy_sq_means),
        ("acceptance_rate", TemperatureSweep::acceptance_rates),
    ];
    for (key, column) in columns {
        dict.set_item(key, stack_rows(scan.table(column))?.into_pyarray(py))?;
    }

    Ok(dict)
}

/// Equilibrate and sample a single temperature.
///
/// Returns: dict with "energies" and "mags" of shape (n_sample_sweeps,),
///   "spins" of shape (L, L) int8 holding the final configuration, and
///   "accepted" (flips accepted during sampling).
#[pyfunction]
#[pyo3(signature = (lattice_size, temperature, n_equil_sweeps=1000, n_sample_sweeps=1000, coupling=1.0, seed=None))]
fn run_at_temperature<'py>(
    py: Python<'py>,
    lattice_size: usize,
    temperature: f64,
    n_equil_sweeps: usize,
    n_sample_sweeps: usize,
    coupling: f64,
    seed: Option<u64>,
) -> PyResult<Bound<'py, PyDict>> {
    let config = build_config(
        lattice_size,
        n_equil_sweeps,
        n_sample_sweeps,
        coupling,
        seed,
        true,
        true,
        None,
    )?;

    let interrupted = AtomicBool::new(false);
    let out = py
        .allow_threads(|| {
            let mut rng = Xoshiro256StarStar::seed_from_u64(config.seed);
            ising_sim::run_at_temperature(&config, temperature, &mut rng, &interrupted, &|| {})
        })
        .map_err(value_error)?;

    let spins = Array2::from_shape_vec(
        (lattice_size, lattice_size),
        out.final_lattice.spins().to_vec(),
    )
    .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let dict = PyDict::new(py);
    dict.set_item(
        "energies",
        Array1::from(out.series.energies).into_pyarray(py),
    )?;
    dict.set_item("mags", Array1::from(out.series.mags).into_pyarray(py))?;
    dict.set_item("spins", spins.into_pyarray(py))?;
    dict.set_item("accepted", out.accepted)?;
    Ok(dict)
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();
    m.add_function(wrap_pyfunction!(sweep_temperatures, m)?)?;
    m.add_function(wrap_pyfunction!(scan_sizes, m)?)?;
    m.add_function(wrap_pyfunction!(run_at_temperature, m)?)?;
    Ok(())
}
