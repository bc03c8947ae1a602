use rand::Rng;
use serde::Serialize;

use crate::error::{IsingError, IsingResult};
use crate::geometry::{Direction, Torus};

/// Spin configuration on a periodic L×L lattice.
///
/// Every cell holds exactly `+1` or `-1`. The only ways to change a cell are
/// [`Lattice::set`] (validated) and [`Lattice::flip`] (sign negation), so the
/// invariant holds for the lifetime of the value.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    torus: Torus,
    /// Row-major spins, length `side * side`.
    spins: Vec<i8>,
}

#[inline]
fn check_spin(value: i8) -> IsingResult<i8> {
    if value == 1 || value == -1 {
        Ok(value)
    } else {
        Err(IsingError::invalid(format!(
            "spin values must be +1 or -1, got {value}"
        )))
    }
}

impl Lattice {
    /// Fresh configuration with each spin drawn independently and uniformly
    /// from {+1, -1}.
    pub fn random<R: Rng + ?Sized>(side: usize, rng: &mut R) -> IsingResult<Self> {
        let torus = Torus::new(side)?;
        let spins = (0..torus.n_spins())
            .map(|_| if rng.gen::<bool>() { 1 } else { -1 })
            .collect();
        Ok(Self { torus, spins })
    }

    /// Fully aligned configuration.
    pub fn uniform(side: usize, spin: i8) -> IsingResult<Self> {
        let spin = check_spin(spin)?;
        let torus = Torus::new(side)?;
        let spins = vec![spin; torus.n_spins()];
        Ok(Self { torus, spins })
    }

    /// Build from row-major spins, rejecting wrong lengths and non-±1 cells.
    pub fn from_spins(side: usize, spins: Vec<i8>) -> IsingResult<Self> {
        let torus = Torus::new(side)?;
        if spins.len() != torus.n_spins() {
            return Err(IsingError::invalid(format!(
                "expected {} spins for a {side}x{side} lattice, got {}",
                torus.n_spins(),
                spins.len()
            )));
        }
        if let Some(pos) = spins.iter().position(|&s| s != 1 && s != -1) {
            let (i, j) = torus.coords(pos);
            return Err(IsingError::invalid(format!(
                "spin at ({i}, {j}) must be +1 or -1, got {}",
                spins[pos]
            )));
        }
        Ok(Self { torus, spins })
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.torus.side()
    }

    #[inline]
    pub fn n_spins(&self) -> usize {
        self.torus.n_spins()
    }

    #[inline]
    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    /// Row-major view of all spins.
    #[inline]
    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    pub fn get(&self, i: usize, j: usize) -> IsingResult<i8> {
        let site = self.torus.site(i, j)?;
        Ok(self.spins[site])
    }

    pub fn set(&mut self, i: usize, j: usize, value: i8) -> IsingResult<()> {
        let site = self.torus.site(i, j)?;
        self.spins[site] = check_spin(value)?;
        Ok(())
    }

    /// Negate the spin at `(i, j)`.
    pub fn flip(&mut self, i: usize, j: usize) -> IsingResult<()> {
        let site = self.torus.site(i, j)?;
        self.spins[site] = -self.spins[site];
        Ok(())
    }

    /// The four periodic neighbors of `(i, j)` as `(row, col)` pairs, in
    /// up, down, left, right order.
    pub fn neighbors(&self, i: usize, j: usize) -> IsingResult<[(usize, usize); 4]> {
        let site = self.torus.site(i, j)?;
        let neighbor = |dir| self.torus.coords(self.torus.neighbor(site, dir));
        Ok(Direction::ALL.map(neighbor))
    }

    /// Sum of the four neighbor spins of a flat site index.
    #[inline]
    pub(crate) fn neighbor_sum(&self, site: usize) -> i32 {
        self.torus
            .neighbors(site)
            .iter()
            .map(|&n| self.spins[n] as i32)
            .sum()
    }

    #[inline]
    pub(crate) fn spin_at(&self, site: usize) -> i8 {
        self.spins[site]
    }

    #[inline]
    pub(crate) fn flip_site(&mut self, site: usize) {
        self.spins[site] = -self.spins[site];
    }

    /// Copy of the configuration as nested rows, for snapshots.
    pub fn rows(&self) -> Vec<Vec<i8>> {
        self.spins
            .chunks(self.side())
            .map(|row| row.to_vec())
            .collect()
    }
}

impl Serialize for Lattice {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows().serialize(serializer)
    }
}
