//! Metropolis Monte Carlo for the 2D Ising model on a periodic square lattice.
//!
//! A [`Lattice`] holds the spins; [`mcmc`] mutates it one Metropolis attempt
//! at a time; [`simulation`] equilibrates, samples and aggregates runs across
//! temperatures and lattice sizes.

pub mod config;
pub mod error;
pub mod geometry;
pub mod mcmc;
pub mod parallel;
pub mod simulation;
pub mod spins;
pub mod statistics;

pub use config::SimConfig;
pub use error::{IsingError, IsingResult};
pub use mcmc::{attempt_flip, sweep};
pub use simulation::{run_at_temperature, scan_sizes, sweep_temperatures, RunOutput};
pub use spins::{local_energy, magnetization_per_spin, total_energy, Lattice};
pub use statistics::{SizeScan, TemperatureResult, TemperatureSweep};
