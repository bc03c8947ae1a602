use validator::{Validate, ValidationError};

use crate::error::{IsingError, IsingResult};

fn validate_sim_config(cfg: &SimConfig) -> Result<(), ValidationError> {
    if cfg.lattice_size < 1 {
        return Err(ValidationError::new(
            "lattice_size must be a positive integer",
        ));
    }
    if cfg.n_sample_sweeps < 1 {
        return Err(ValidationError::new("n_sample_sweeps must be >= 1"));
    }
    if !cfg.coupling.is_finite() {
        return Err(ValidationError::new(
            "coupling constant J must be a finite real number",
        ));
    }
    if cfg.autocorrelation_max_lag == Some(0) {
        return Err(ValidationError::new("autocorrelation_max_lag must be >= 1"));
    }
    Ok(())
}

/// Parameters shared by every run of a temperature sweep.
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = "validate_sim_config"))]
pub struct SimConfig {
    /// Side length L of the square lattice.
    pub lattice_size: usize,
    /// Unmeasured sweeps before sampling starts.
    pub n_equil_sweeps: usize,
    /// Measured sweeps; one sample per sweep.
    pub n_sample_sweeps: usize,
    /// Coupling constant J.
    pub coupling: f64,
    /// Temperature index `k` is simulated with seed `seed + k`.
    pub seed: u64,
    /// Run temperatures on the current thread instead of the rayon pool.
    pub sequential: bool,
    pub keep_series: bool,
    pub keep_final_lattice: bool,
    /// Largest lag for the |m| autocorrelation time; `None` skips it.
    pub autocorrelation_max_lag: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            lattice_size: 10,
            n_equil_sweeps: 1000,
            n_sample_sweeps: 1000,
            coupling: 1.0,
            seed: 42,
            sequential: false,
            keep_series: false,
            keep_final_lattice: false,
            autocorrelation_max_lag: None,
        }
    }
}

impl SimConfig {
    pub fn new(lattice_size: usize) -> Self {
        Self {
            lattice_size,
            ..Self::default()
        }
    }

    /// Validate and map failures onto [`IsingError::InvalidArgument`].
    pub fn check(&self) -> IsingResult<()> {
        self.validate()
            .map_err(|e| IsingError::InvalidArgument(format!("{e}")))
    }

    /// Number of sweeps one temperature run performs.
    pub fn sweeps_per_run(&self) -> usize {
        self.n_equil_sweeps + self.n_sample_sweeps
    }
}
