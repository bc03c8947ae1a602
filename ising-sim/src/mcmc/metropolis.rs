use rand::Rng;

use crate::error::{check_coupling, IsingError, IsingResult};
use crate::spins::energy::local_energy_at;
use crate::spins::Lattice;

/// Metropolis single-spin-flip kernel for fixed `beta` and `J`.
///
/// On the square lattice `s * (neighbor sum)` takes only the values
/// `-4, -2, 0, 2, 4`, so the Boltzmann factors of the positive-cost moves are
/// tabulated once per run instead of calling `exp` per attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Metropolis {
    beta: f64,
    coupling: f64,
    /// `accept[(s*h + 4) / 2] = exp(-beta * dE)` for `dE > 0`, else `1.0`.
    accept: [f64; 5],
}

#[inline]
fn flip_cost(local: f64) -> f64 {
    -2.0 * local
}

/// `min(1, exp(-beta * dE))`.
#[inline]
fn acceptance(beta: f64, d_e: f64) -> f64 {
    if d_e <= 0.0 {
        1.0
    } else {
        (-beta * d_e).exp()
    }
}

impl Metropolis {
    pub fn new(beta: f64, coupling: f64) -> IsingResult<Self> {
        if !(beta.is_finite() && beta > 0.0) {
            return Err(IsingError::invalid(format!(
                "inverse temperature beta must be positive and finite, got {beta}"
            )));
        }
        check_coupling(coupling)?;

        let accept = std::array::from_fn(|slot| {
            let aligned = 2 * slot as i32 - 4;
            acceptance(beta, flip_cost(-coupling * aligned as f64))
        });

        Ok(Self {
            beta,
            coupling,
            accept,
        })
    }

    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    #[inline]
    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    /// Try to flip the spin at flat index `site`; returns whether it flipped.
    #[inline]
    pub(crate) fn attempt_site<R: Rng + ?Sized>(
        &self,
        lattice: &mut Lattice,
        site: usize,
        rng: &mut R,
    ) -> IsingResult<bool> {
        let d_e = flip_cost(local_energy_at(lattice, site, self.coupling)?);
        let accepted = if d_e <= 0.0 {
            true
        } else {
            let aligned = lattice.spin_at(site) as i32 * lattice.neighbor_sum(site);
            let p = self.accept[((aligned + 4) / 2) as usize];
            rng.gen::<f64>() < p
        };
        if accepted {
            lattice.flip_site(site);
        }
        Ok(accepted)
    }

    /// Pick a site uniformly at random and apply the Metropolis rule to it.
    #[inline]
    pub fn attempt<R: Rng + ?Sized>(
        &self,
        lattice: &mut Lattice,
        rng: &mut R,
    ) -> IsingResult<bool> {
        let site = rng.gen_range(0..lattice.n_spins());
        self.attempt_site(lattice, site, rng)
    }
}

/// Single Metropolis flip attempt at a uniformly random site.
///
/// `dE = -2 * local_energy`; moves with `dE <= 0` are always accepted, others
/// with probability `exp(-beta * dE)`.
pub fn attempt_flip<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    beta: f64,
    coupling: f64,
    rng: &mut R,
) -> IsingResult<bool> {
    Metropolis::new(beta, coupling)?.attempt(lattice, rng)
}

/// Same acceptance test as [`attempt_flip`] at a caller-chosen site.
pub fn attempt_flip_at<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    i: usize,
    j: usize,
    beta: f64,
    coupling: f64,
    rng: &mut R,
) -> IsingResult<bool> {
    let site = lattice.torus().site(i, j)?;
    Metropolis::new(beta, coupling)?.attempt_site(lattice, site, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn checkerboard(side: usize) -> Lattice {
        let spins = (0..side * side)
            .map(|k| 1 - 2 * ((k / side + k % side) % 2) as i8)
            .collect();
        Lattice::from_spins(side, spins).unwrap()
    }

    #[test]
    fn test_table_matches_direct_exponential() {
        let kernel = Metropolis::new(0.4, 1.0).unwrap();
        assert_eq!(kernel.accept[4], (-0.4f64 * 8.0).exp());
        assert_eq!(kernel.accept[3], (-0.4f64 * 4.0).exp());
        assert_eq!(kernel.accept[2], 1.0);
        assert_eq!(kernel.accept[0], 1.0);
    }

    #[test]
    fn test_every_slot_uses_the_acceptance_rule() {
        for (beta, coupling) in [(0.4, 1.0), (2.0, -0.5), (0.1, 0.0)] {
            let kernel = Metropolis::new(beta, coupling).unwrap();
            for (slot, &p) in kernel.accept.iter().enumerate() {
                let d_e = 2.0 * coupling * (2 * slot as i32 - 4) as f64;
                assert_eq!(p, acceptance(beta, d_e), "beta {beta}, J {coupling}");
                assert!(p > 0.0 && p <= 1.0);
            }
        }
        assert_eq!(acceptance(1.0, -4.0), 1.0);
        assert_eq!(acceptance(1.0, 0.0), 1.0);
        assert_eq!(acceptance(0.5, 4.0), (-2.0f64).exp());
    }

    #[test]
    fn test_antiferromagnetic_coupling_table() {
        // J < 0 makes anti-aligned neighborhoods the costly ones.
        let kernel = Metropolis::new(1.0, -1.0).unwrap();
        assert_eq!(kernel.accept[0], (-8.0f64).exp());
        assert_eq!(kernel.accept[4], 1.0);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(Metropolis::new(0.0, 1.0).is_err());
        assert!(Metropolis::new(-1.0, 1.0).is_err());
        assert!(Metropolis::new(f64::INFINITY, 1.0).is_err());
        assert!(Metropolis::new(1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_downhill_moves_always_accepted() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        for trial in 0..200 {
            let mut lat = checkerboard(4);
            let (i, j) = (trial % 4, (trial / 4) % 4);
            let before = lat.get(i, j).unwrap();
            let flipped = attempt_flip_at(&mut lat, i, j, 10.0, 1.0, &mut rng).unwrap();
            assert!(flipped);
            assert_eq!(lat.get(i, j).unwrap(), -before);
        }
        // random-site variant on a checkerboard: every site is downhill
        let mut lat = checkerboard(4);
        assert!(attempt_flip(&mut lat, 10.0, 1.0, &mut rng).unwrap());
    }

    #[test]
    fn test_uphill_acceptance_rate() {
        let beta = 0.25;
        let expected = (-beta * 8.0f64).exp();
        let mut rng = Xoshiro256StarStar::seed_from_u64(2024);
        let aligned = Lattice::uniform(4, 1).unwrap();
        let n_trials = 40_000;
        let mut accepted = 0usize;
        for _ in 0..n_trials {
            let mut lat = aligned.clone();
            if attempt_flip(&mut lat, beta, 1.0, &mut rng).unwrap() {
                accepted += 1;
                assert_eq!(lat.spins().iter().filter(|&&s| s == -1).count(), 1);
            } else {
                assert_eq!(lat, aligned);
            }
        }
        let rate = accepted as f64 / n_trials as f64;
        // sigma ~ 0.0017
        assert!((rate - expected).abs() < 0.01, "rate {rate} vs {expected}");
    }

    #[test]
    fn test_out_of_range_site() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let mut lat = Lattice::uniform(3, 1).unwrap();
        assert!(attempt_flip_at(&mut lat, 0, 3, 1.0, 1.0, &mut rng).is_err());
    }
}
