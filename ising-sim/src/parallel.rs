use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rayon::prelude::*;

/// Dispatch a per-temperature closure over temperatures, optionally in
/// parallel.
///
/// Temperature `k` gets its own PRNG seeded `base_seed + k`, so the output
/// does not depend on scheduling. The closure receives `(k, temp, rng)`;
/// results come back in input order.
///
/// When `sequential` is true, temperatures are processed on the current
/// thread (no rayon overhead, best when the caller already parallelizes at an
/// outer level).
pub fn par_over_temperatures<T, F>(
    temperatures: &[f64],
    base_seed: u64,
    sequential: bool,
    body: F,
) -> Vec<T>
where
    T: Send,
    F: Fn(usize, f64, &mut Xoshiro256StarStar) -> T + Send + Sync,
{
    let work = |(k, &temp): (usize, &f64)| {
        let mut rng = Xoshiro256StarStar::seed_from_u64(base_seed.wrapping_add(k as u64));
        body(k, temp, &mut rng)
    };

    if sequential {
        temperatures.iter().enumerate().map(work).collect()
    } else {
        temperatures.par_iter().enumerate().map(work).collect()
    }
}
