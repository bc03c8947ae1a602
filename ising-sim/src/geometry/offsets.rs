/// One of the four nearest-neighbor directions on the square lattice.
///
/// `Up`/`Down` move along rows (first index), `Left`/`Right` along columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order used by every neighbor table and by [`crate::Lattice::neighbors`].
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Forward directions: each bond is reached exactly once by walking
    /// `Down` and `Right` from every site.
    pub const FORWARD: [Direction; 2] = [Self::Down, Self::Right];

    /// `(d_row, d_col)` displacement.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}
