use super::offsets::Direction;
use crate::error::{IsingError, IsingResult};

/// Periodic L×L square lattice with a precomputed neighbor table.
///
/// Sites are indexed in row-major order: site `(i, j)` has flat index
/// `i * side + j`. Wraparound uses `rem_euclid`, so the topology is a torus.
#[derive(Debug, Clone, PartialEq)]
pub struct Torus {
    side: usize,
    n_spins: usize,
    /// Layout: `neighbors[site * 4 + direction.slot()]`.
    neighbors: Vec<u32>,
}

impl Torus {
    pub fn new(side: usize) -> IsingResult<Self> {
        if side == 0 {
            return Err(IsingError::invalid(
                "lattice size L must be a positive integer, got 0",
            ));
        }
        let n_spins = match side.checked_mul(side) {
            Some(n) if n <= u32::MAX as usize => n,
            _ => {
                let msg = format!("lattice size L = {side} is too large");
                return Err(IsingError::invalid(msg));
            }
        };

        let mut neighbors = vec![0u32; n_spins * 4];
        for site in 0..n_spins {
            let (i, j) = (site / side, site % side);
            for dir in Direction::ALL {
                let (di, dj) = dir.offset();
                let ni = (i as isize + di).rem_euclid(side as isize) as usize;
                let nj = (j as isize + dj).rem_euclid(side as isize) as usize;
                neighbors[site * 4 + dir.slot()] = (ni * side + nj) as u32;
            }
        }

        Ok(Self {
            side,
            n_spins,
            neighbors,
        })
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn n_spins(&self) -> usize {
        self.n_spins
    }

    /// Flat index of `(i, j)`, or an error naming the offending pair.
    pub fn site(&self, i: usize, j: usize) -> IsingResult<usize> {
        if i < self.side && j < self.side {
            Ok(i * self.side + j)
        } else {
            Err(IsingError::invalid(format!(
                "site ({i}, {j}) out of range for a {0}x{0} lattice",
                self.side
            )))
        }
    }

    #[inline]
    pub fn coords(&self, site: usize) -> (usize, usize) {
        (site / self.side, site % self.side)
    }

    #[inline]
    pub fn neighbor(&self, site: usize, dir: Direction) -> usize {
        self.neighbors[site * 4 + dir.slot()] as usize
    }

    /// All four neighbors of `site` in [`Direction::ALL`] order.
    #[inline]
    pub fn neighbors(&self, site: usize) -> [usize; 4] {
        let base = site * 4;
        [
            self.neighbors[base] as usize,
            self.neighbors[base + 1] as usize,
            self.neighbors[base + 2] as usize,
            self.neighbors[base + 3] as usize,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_lattice() {
        assert!(matches!(Torus::new(0), Err(IsingError::InvalidArgument(_))));
    }

    #[test]
    fn test_4x4_neighbors() {
        let t = Torus::new(4).unwrap();
        assert_eq!(t.n_spins(), 16);

        // Site 0 = (0,0): up wraps to (3,0)=12, left wraps to (0,3)=3
        assert_eq!(t.neighbor(0, Direction::Up), 12);
        assert_eq!(t.neighbor(0, Direction::Down), 4);
        assert_eq!(t.neighbor(0, Direction::Left), 3);
        assert_eq!(t.neighbor(0, Direction::Right), 1);

        // Site 15 = (3,3): down wraps to (0,3)=3, right wraps to (3,0)=12
        assert_eq!(t.neighbors(15), [11, 3, 14, 12]);

        // Interior site 5 = (1,1)
        assert_eq!(t.neighbors(5), [1, 9, 4, 6]);
    }

    #[test]
    fn test_side_one_is_its_own_neighbor() {
        let t = Torus::new(1).unwrap();
        assert_eq!(t.neighbors(0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_side_two_double_bonds() {
        // On a 2x2 torus, up and down reach the same site.
        let t = Torus::new(2).unwrap();
        assert_eq!(t.neighbor(0, Direction::Up), t.neighbor(0, Direction::Down));
        assert_eq!(
            t.neighbor(0, Direction::Left),
            t.neighbor(0, Direction::Right)
        );
    }

    #[test]
    fn test_site_bounds() {
        let t = Torus::new(3).unwrap();
        assert_eq!(t.site(2, 1).unwrap(), 7);
        assert_eq!(t.coords(7), (2, 1));
        assert!(t.site(3, 0).is_err());
        assert!(t.site(0, 3).is_err());
    }

    #[test]
    fn test_neighbor_relation_is_symmetric() {
        let t = Torus::new(5).unwrap();
        for site in 0..t.n_spins() {
            let down = t.neighbor(site, Direction::Down);
            assert_eq!(t.neighbor(down, Direction::Up), site);
            assert_eq!(
                t.neighbor(t.neighbor(site, Direction::Right), Direction::Left),
                site
            );
        }
    }
}
