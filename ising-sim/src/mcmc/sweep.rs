use rand::Rng;

use super::metropolis::Metropolis;
use crate::error::IsingResult;
use crate::spins::Lattice;

/// One Monte Carlo sweep: `L * L` independent Metropolis attempts at
/// uniformly random sites (repeats and omissions expected).
///
/// Returns the number of accepted flips.
#[cfg_attr(feature = "profile", inline(never))]
pub fn metropolis_sweep<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    kernel: &Metropolis,
    rng: &mut R,
) -> IsingResult<usize> {
    let mut accepted = 0usize;
    for _ in 0..lattice.n_spins() {
        if kernel.attempt(lattice, rng)? {
            accepted += 1;
        }
    }
    Ok(accepted)
}

/// Convenience form of [`metropolis_sweep`] taking `beta` and `J` directly.
pub fn sweep<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    beta: f64,
    coupling: f64,
    rng: &mut R,
) -> IsingResult<usize> {
    let kernel = Metropolis::new(beta, coupling)?;
    metropolis_sweep(lattice, &kernel, rng)
}
