use std::fmt;
use std::ops::Sub;

use crate::error::{Error, Result};
use crate::NR_HOLES;

/// Number of rows of the triangle. Row `r` holds `r + 1` holes.
pub const NR_ROWS: i8 = 5;

/// A hole on the triangular board. The apex is `(0, 0)`, row `4` is the
/// bottom row with columns `0..=4`.
///
/// Invariant: can only represent valid holes
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Hole {
    row: i8,
    col: i8,
}

impl Sub for Hole {
    type Output = (i8, i8);

    fn sub(self, rhs: Self) -> Self::Output {
        (self.row - rhs.row, self.col - rhs.col)
    }
}

impl fmt::Display for Hole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

impl Hole {
    pub fn new(row: i8, col: i8) -> Option<Self> {
        let hole = Hole { row, col };
        if hole.is_valid() { Some(hole) } else { None }
    }

    /// Like [`Hole::new`], but reports the rejected coordinate.
    pub fn try_new(row: i8, col: i8) -> Result<Self> {
        Self::new(row, col).ok_or(Error::InvalidHole { row, col })
    }

    pub const fn apex() -> Self {
        Hole { row: 0, col: 0 }
    }

    /// Row-major position of the hole, `0` for the apex up to `14` for the
    /// bottom right corner.
    pub fn index(self) -> usize {
        let row = self.row as usize;
        row * (row + 1) / 2 + self.col as usize
    }

    /// Bit of this hole in a board code. The apex is the most significant of
    /// the 15 bits and the bottom right corner the least significant one.
    pub fn bitmask(self) -> u16 {
        1u16 << (NR_HOLES - 1 - self.index())
    }

    /// Turn the triangle by 120 degrees: apex -> bottom left -> bottom right.
    pub fn rotate(self) -> Hole {
        Hole {
            row: NR_ROWS - 1 - self.col,
            col: self.row - self.col,
        }
    }

    /// Reflect across the vertical axis through the apex.
    pub fn mirror(self) -> Hole {
        Hole {
            row: self.row,
            col: self.row - self.col,
        }
    }

    pub fn shift(self, row: i8, col: i8) -> Option<Hole> {
        Self::new(self.row + row, self.col + col)
    }

    fn is_valid(self) -> bool {
        (0..NR_ROWS).contains(&self.row) && (0..=self.row).contains(&self.col)
    }

    /// All holes, top row first and left to right within a row.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        (0..NR_ROWS).flat_map(|row| (0..=row).map(move |col| Hole { row, col }))
    }

    pub fn row(self) -> i8 {
        self.row
    }
    pub fn col(self) -> i8 {
        self.col
    }
}
