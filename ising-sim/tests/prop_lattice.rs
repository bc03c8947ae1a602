//! Property-based tests for lattice invariants, energies and the Metropolis rule.

use ising_sim::mcmc::attempt_flip_at;
use ising_sim::statistics::{heat_capacity, Statistics};
use ising_sim::{local_energy, magnetization_per_spin, total_energy, Lattice};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

fn random_lattice(side: usize, seed: u64) -> Lattice {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    Lattice::random(side, &mut rng).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Generated lattices are L×L with every cell ±1.
    #[test]
    fn lattice_shape_and_values(side in 1usize..40, seed in any::<u64>()) {
        let lat = random_lattice(side, seed);
        prop_assert_eq!(lat.side(), side);
        prop_assert_eq!(lat.spins().len(), side * side);
        prop_assert_eq!(lat.rows().len(), side);
        prop_assert!(lat.spins().iter().all(|&s| s == 1 || s == -1));
    }

    /// A single site never holds more than 4|J| of energy.
    #[test]
    fn local_energy_bounded(
        side in 1usize..20,
        seed in any::<u64>(),
        coupling in -3.0f64..3.0,
        i in 0usize..20,
        j in 0usize..20,
    ) {
        let lat = random_lattice(side, seed);
        let (i, j) = (i % side, j % side);
        let e = local_energy(&lat, i, j, coupling).unwrap();
        prop_assert!(e.abs() <= 4.0 * coupling.abs() + 1e-12);
    }

    /// Flipping a spin twice restores the total energy, and the first flip
    /// changes it by exactly -2 * local_energy. A 1x1 torus is its own
    /// neighbor, so the flip cost law starts at L = 2.
    #[test]
    fn flip_round_trip(
        side in 2usize..20,
        seed in any::<u64>(),
        i in 0usize..20,
        j in 0usize..20,
    ) {
        let mut lat = random_lattice(side, seed);
        let (i, j) = (i % side, j % side);
        let before = total_energy(&lat, 1.0);
        let delta = -2.0 * local_energy(&lat, i, j, 1.0).unwrap();
        lat.flip(i, j).unwrap();
        prop_assert_eq!(total_energy(&lat, 1.0) - before, delta);
        lat.flip(i, j).unwrap();
        prop_assert_eq!(total_energy(&lat, 1.0), before);
    }

    /// Each bond is counted exactly once by the total energy.
    #[test]
    fn total_energy_is_half_local_sum(
        side in 1usize..24,
        seed in any::<u64>(),
        coupling in -2.0f64..2.0,
    ) {
        let lat = random_lattice(side, seed);
        let mut sum = 0.0;
        for i in 0..side {
            for j in 0..side {
                sum += local_energy(&lat, i, j, coupling).unwrap();
            }
        }
        let total = total_energy(&lat, coupling);
        prop_assert!((total - 0.5 * sum).abs() < 1e-9 * (1.0 + sum.abs()));
    }

    #[test]
    fn magnetization_in_unit_interval(side in 1usize..40, seed in any::<u64>()) {
        let m = magnetization_per_spin(&random_lattice(side, seed));
        prop_assert!((0.0..=1.0).contains(&m));
    }

    /// Equal numbers of up and down spins give zero magnetization.
    #[test]
    fn balanced_lattice_has_zero_magnetization(half_side in 1usize..16, seed in any::<u64>()) {
        let side = 2 * half_side;
        let n = side * side;
        let mut spins: Vec<i8> = (0..n).map(|k| if k < n / 2 { 1 } else { -1 }).collect();
        spins.shuffle(&mut Xoshiro256StarStar::seed_from_u64(seed));
        let lat = Lattice::from_spins(side, spins).unwrap();
        prop_assert_eq!(magnetization_per_spin(&lat), 0.0);
    }

    /// A move that does not raise the energy is always taken.
    #[test]
    fn downhill_moves_accepted(
        side in 2usize..16,
        seed in any::<u64>(),
        beta in 0.01f64..10.0,
    ) {
        let mut lat = random_lattice(side, seed);
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed ^ 0x5eed);
        for i in 0..side {
            for j in 0..side {
                let d_e = -2.0 * local_energy(&lat, i, j, 1.0).unwrap();
                if d_e <= 0.0 {
                    let before = lat.get(i, j).unwrap();
                    prop_assert!(attempt_flip_at(&mut lat, i, j, beta, 1.0, &mut rng).unwrap());
                    prop_assert_eq!(lat.get(i, j).unwrap(), -before);
                }
            }
        }
    }

    /// Energy variance, hence heat capacity, is never negative.
    #[test]
    fn heat_capacity_non_negative(
        energies in prop::collection::vec(-2000.0f64..2000.0, 1..200),
        temperature in 0.05f64..100.0,
        side in 1usize..64,
    ) {
        let stats = Statistics::from_series(&energies);
        let c = heat_capacity(stats.mean(), stats.mean_sq(), temperature, side);
        prop_assert!(c >= 0.0);
        prop_assert!(c.is_finite());
    }
}
