pub mod metropolis;
pub mod sweep;

pub use metropolis::{attempt_flip, attempt_flip_at, Metropolis};
pub use sweep::{metropolis_sweep, sweep};
