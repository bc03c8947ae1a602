use crate::spins::Lattice;

/// `|sum of spins| / (L * L)`, in `[0, 1]`.
pub fn magnetization_per_spin(lattice: &Lattice) -> f64 {
    let sum: i64 = lattice.spins().iter().map(|&s| s as i64).sum();
    sum.unsigned_abs() as f64 / lattice.n_spins() as f64
}
