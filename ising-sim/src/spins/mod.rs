pub mod energy;
pub mod lattice;
pub mod observables;

pub use energy::{local_energy, total_energy};
pub use lattice::Lattice;
pub use observables::magnetization_per_spin;
