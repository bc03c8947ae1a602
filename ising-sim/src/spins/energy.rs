use crate::error::{check_coupling, IsingError, IsingResult};
use crate::geometry::Direction;
use crate::spins::Lattice;

/// Energy contribution of the spin at `(i, j)`:
/// `-J * s(i,j) * (sum of its 4 periodic neighbors)`.
///
/// Must be evaluated on the current (un-flipped) spin. The flip cost of that
/// spin is `-2 * local_energy`.
pub fn local_energy(lattice: &Lattice, i: usize, j: usize, coupling: f64) -> IsingResult<f64> {
    check_coupling(coupling)?;
    let site = lattice.torus().site(i, j)?;
    local_energy_at(lattice, site, coupling)
}

#[inline]
pub(crate) fn local_energy_at(lattice: &Lattice, site: usize, coupling: f64) -> IsingResult<f64> {
    let s = lattice.spin_at(site);
    if s != 1 && s != -1 {
        let (i, j) = lattice.torus().coords(site);
        return Err(IsingError::invalid(format!(
            "spin at ({i}, {j}) must be +1 or -1, got {s}"
        )));
    }
    Ok(-coupling * (s as i32 * lattice.neighbor_sum(site)) as f64)
}

/// Total energy `-J * sum over bonds of s_a * s_b`, counting each bond once
/// by pairing every site only with its `Down` and `Right` neighbors.
pub fn total_energy(lattice: &Lattice, coupling: f64) -> f64 {
    let torus = lattice.torus();
    let spins = lattice.spins();
    let mut bonds = 0i64;

    #[allow(clippy::needless_range_loop)]
    for site in 0..torus.n_spins() {
        let si = spins[site] as i64;
        let mut forward = 0i64;
        for dir in Direction::FORWARD {
            forward += spins[torus.neighbor(site, dir)] as i64;
        }
        bonds += si * forward;
    }

    -coupling * bonds as f64
}
