pub mod coord;
pub mod error;
pub mod moves;
pub mod solver;

use std::fmt;

use crate::{
    coord::{Hole, NR_ROWS},
    error::{Error, Result},
};

pub use crate::moves::{JUMP_TABLE, JumpTable, legal_moves};
pub use crate::solver::{SolutionPath, SolveResult, Solver, solve_all_starts};

pub const NR_HOLES: usize = 15;

const ALL_HOLES_MASK: u16 = (1 << NR_HOLES) - 1;

/// Peg occupancy of the 15 holes. The inner value is the board code: one bit
/// per hole, most significant bit first in row-major order (see
/// [`Hole::bitmask`]).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Board(u16);

/// A jump that the board geometry allows, independent of any pegs: the peg
/// in `src` jumps over `mid` and lands in `dst`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Jump {
    remove_bits: u16,
    add_bits: u16,
    src: Hole,
    mid: Hole,
    dst: Hole,
}

impl Jump {
    /// Build the jump from `src` to `dst`, if the two holes lie on a line two
    /// holes apart.
    pub fn between(src: Hole, dst: Hole) -> Option<Jump> {
        let (dr, dc) = dst - src;
        if !matches!((dr, dc), (0, 2) | (0, -2) | (2, 0) | (-2, 0) | (2, 2) | (-2, -2)) {
            return None;
        }

        let mid = src
            .shift(dr / 2, dc / 2)
            .expect("center between valid holes should be valid");

        Some(Jump {
            remove_bits: src.bitmask() | mid.bitmask(),
            add_bits: dst.bitmask(),
            src,
            mid,
            dst,
        })
    }

    pub fn src(&self) -> Hole {
        self.src
    }
    pub fn mid(&self) -> Hole {
        self.mid
    }
    pub fn dst(&self) -> Hole {
        self.dst
    }
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} over {} to {}", self.src, self.mid, self.dst)
    }
}

impl Board {
    pub fn full() -> Self {
        Self(ALL_HOLES_MASK)
    }

    pub fn empty() -> Self {
        Self(0)
    }

    /// Every hole holds a peg except `hole`.
    pub fn with_hole_emptied(hole: Hole) -> Self {
        Self(ALL_HOLES_MASK & !hole.bitmask())
    }

    /// Decode a board from its 15-bit code.
    ///
    /// Reading the code from the least significant bit upwards visits the
    /// holes from the bottom row to the apex, right to left within a row,
    /// which is the reverse of the order [`Board::to_code`] writes them in.
    pub fn from_code(code: u32) -> Result<Self> {
        if code > ALL_HOLES_MASK as u32 {
            return Err(Error::InvalidCode { code });
        }

        let mut rest = code;
        let mut board = 0;
        for hole in Hole::all().rev() {
            if rest & 1 == 1 {
                board |= hole.bitmask();
            }
            rest >>= 1;
        }
        Ok(Self(board))
    }

    /// Encode the board. Holes are visited top row first, left to right, and
    /// each one shifts the accumulator left before adding its peg bit.
    pub fn to_code(self) -> u16 {
        Hole::all().fold(0, |code, hole| {
            (code << 1) | u16::from(self.is_occupied(hole))
        })
    }

    /// Parse the triangular layout produced by [`Board::render`]. `#` is a
    /// peg, `.` an empty hole, whitespace is ignored and blank lines are
    /// skipped.
    pub fn from_ascii(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if rows.len() != NR_ROWS as usize {
            return Err(Error::InvalidAscii {
                reason: format!("expected {NR_ROWS} rows, found {}", rows.len()),
            });
        }

        let mut board = 0;
        let mut holes = Hole::all();
        for (row_idx, line) in rows.into_iter().enumerate() {
            let glyphs: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if glyphs.len() != row_idx + 1 {
                return Err(Error::InvalidAscii {
                    reason: format!(
                        "row {row_idx} should have {} holes, found {}",
                        row_idx + 1,
                        glyphs.len()
                    ),
                });
            }

            for c in glyphs {
                let hole = holes.next().expect("row lengths were checked");
                match c {
                    '#' => board |= hole.bitmask(),
                    '.' => {}
                    _ => {
                        return Err(Error::InvalidAscii {
                            reason: format!("invalid char {c:?} in row {row_idx}"),
                        });
                    }
                }
            }
        }
        Ok(Self(board))
    }

    pub fn is_occupied(self, hole: Hole) -> bool {
        self.0 & hole.bitmask() > 0
    }

    /// Number of occupied holes on this board
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// A board is solved when exactly one peg is left, wherever it sits.
    pub fn is_solved(self) -> bool {
        self.count() == 1
    }

    pub fn can_jump(self, jump: Jump) -> bool {
        (self.0 & jump.add_bits) == 0 && (self.0 & jump.remove_bits) == jump.remove_bits
    }

    /// Apply a jump without checking it. Only call this with jumps for which
    /// [`Board::can_jump`] holds.
    pub fn apply_jump(self, jump: Jump) -> Board {
        Board((self.0 & !jump.remove_bits) | jump.add_bits)
    }

    fn map_holes(self, f: impl Fn(Hole) -> Hole) -> Board {
        let bits = Hole::all()
            .filter(|&hole| self.is_occupied(hole))
            .fold(0, |acc, hole| acc | f(hole).bitmask());
        Board(bits)
    }

    pub fn rotate(self) -> Board {
        self.map_holes(Hole::rotate)
    }

    pub fn mirror(self) -> Board {
        self.map_holes(Hole::mirror)
    }

    /// Representative of the six symmetric images of this board: the one
    /// with the smallest code.
    pub fn normalize(self) -> Board {
        let mut candidates = [self; 6];
        for i in 1..3 {
            candidates[i] = candidates[i - 1].rotate();
        }
        for i in 3..6 {
            candidates[i] = candidates[i - 3].mirror();
        }

        candidates
            .into_iter()
            .min_by_key(|b| b.0)
            .expect("candidates are never empty")
    }

    /// Triangular text layout, apex first, one row per line.
    pub fn render(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..NR_ROWS {
            let line: Vec<&str> = (0..=row)
                .map(|col| {
                    let hole = Hole::new(row, col).expect("row-major holes are valid");
                    if self.is_occupied(hole) { "#" } else { "." }
                })
                .collect();
            writeln!(f, "{}{}", " ".repeat((NR_ROWS - 1 - row) as usize), line.join(" "))?;
        }
        Ok(())
    }
}
