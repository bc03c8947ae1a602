use serde::Serialize;

use crate::spins::Lattice;

/// Per-sweep samples of one run, in sweep order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservableSeries {
    /// Total energy after each sampling sweep.
    pub energies: Vec<f64>,
    /// Magnetization per spin `|M| / N` after each sampling sweep.
    pub mags: Vec<f64>,
}

/// Aggregates for a single `(L, T)` point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureResult {
    pub temperature: f64,
    /// ⟨|m|⟩ over the sampling sweeps.
    pub mag_mean: f64,
    /// Population std of |m| divided by `sqrt(n_sample_sweeps)`.
    pub mag_error: f64,
    /// ⟨E⟩, total energy.
    pub energy_mean: f64,
    /// ⟨E²⟩.
    pub energy_sq_mean: f64,
    /// `(⟨E²⟩ − ⟨E⟩²) / (T² L²)`.
    pub heat_capacity: f64,
    /// Accepted flips per attempt over the sampling phase.
    pub acceptance_rate: f64,
    /// Wall-clock seconds spent in the run (equilibration + sampling).
    pub elapsed_secs: f64,
    /// Integrated autocorrelation time of |m| in sweeps, when requested.
    pub mag_tau: Option<f64>,
    /// Raw series, kept only when `keep_series` is set.
    pub series: Option<ObservableSeries>,
    /// Final configuration, kept only when `keep_final_lattice` is set.
    pub final_lattice: Option<Lattice>,
}

/// Results of one lattice size over an ordered temperature sequence.
///
/// `points[k]` belongs to the `k`-th input temperature; the column accessors
/// keep that alignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureSweep {
    pub lattice_size: usize,
    pub points: Vec<TemperatureResult>,
}

impl TemperatureSweep {
    fn column(&self, f: impl Fn(&TemperatureResult) -> f64) -> Vec<f64> {
        self.points.iter().map(f).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.column(|p| p.temperature)
    }

    pub fn mag_means(&self) -> Vec<f64> {
        self.column(|p| p.mag_mean)
    }

    pub fn mag_errors(&self) -> Vec<f64> {
        self.column(|p| p.mag_error)
    }

    pub fn heat_capacities(&self) -> Vec<f64> {
        self.column(|p| p.heat_capacity)
    }

    pub fn elapsed_secs(&self) -> Vec<f64> {
        self.column(|p| p.elapsed_secs)
    }

    pub fn energy_means(&self) -> Vec<f64> {
        self.column(|p| p.energy_mean)
    }

    pub fn energy_sq_means(&self) -> Vec<f64> {
        self.column(|p| p.energy_sq_mean)
    }

    pub fn acceptance_rates(&self) -> Vec<f64> {
        self.column(|p| p.acceptance_rate)
    }

    /// Autocorrelation times, `NaN` where they were not computed.
    pub fn mag_taus(&self) -> Vec<f64> {
        self.column(|p| p.mag_tau.unwrap_or(f64::NAN))
    }

    /// Temperature of the largest heat capacity (first one on ties).
    pub fn heat_capacity_peak(&self) -> Option<f64> {
        self.points
            .iter()
            .fold(None::<&TemperatureResult>, |best, p| match best {
                Some(b) if b.heat_capacity >= p.heat_capacity => Some(b),
                _ => Some(p),
            })
            .map(|p| p.temperature)
    }
}

/// Temperature sweeps for several lattice sizes, sizes as the outer axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeScan {
    pub sweeps: Vec<TemperatureSweep>,
}

impl SizeScan {
    pub fn sizes(&self) -> Vec<usize> {
        self.sweeps.iter().map(|s| s.lattice_size).collect()
    }

    /// `[size][temperature]` table built from one column accessor.
    pub fn table(&self, column: impl Fn(&TemperatureSweep) -> Vec<f64>) -> Vec<Vec<f64>> {
        self.sweeps.iter().map(column).collect()
    }
}
