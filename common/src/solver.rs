use bitvec::{bitbox, boxed::BitBox, prelude::Lsb0};

use crate::{
    Board, Jump, NR_HOLES,
    coord::Hole,
    error::{Error, Result},
    moves::legal_moves,
};

/// Default recursion cap. A board loses one peg per jump, so no search on 15
/// holes can get this deep.
pub const MAX_SEARCH_DEPTH: usize = NR_HOLES;

#[derive(Debug)]
pub enum SolveResult {
    Solved(SolutionPath),
    Unsolvable,
}

impl SolveResult {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveResult::Solved(_))
    }
}

/// A straight line of boards from the start to a one-peg board, together
/// with the jump between each pair of consecutive boards.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionPath {
    boards: Vec<Board>,
    jumps: Vec<Jump>,
}

impl SolutionPath {
    /// All boards in order, starting board included.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn jumps(&self) -> &[Jump] {
        &self.jumps
    }

    pub fn start(&self) -> Board {
        self.boards[0]
    }

    pub fn end(&self) -> Board {
        *self.boards.last().expect("a path always holds its start board")
    }

    /// Replay the jumps from the start board and check that each one is
    /// legal, lands on the recorded board, and that the last board is solved.
    pub fn verify(&self) -> bool {
        if self.boards.len() != self.jumps.len() + 1 {
            return false;
        }

        let replayed = self.jumps.iter().zip(&self.boards[1..]).try_fold(
            self.start(),
            |board, (&jump, &expected)| {
                let next = board.apply_jump(jump);
                (board.can_jump(jump) && next == expected).then_some(next)
            },
        );

        matches!(replayed, Some(board) if board.is_solved())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Boards visited by the search, the starting board included.
    pub explored: u64,
    /// Visits cut short because the board, or one of its symmetric images,
    /// was already known to be unsolvable.
    pub dead_skipped: u64,
}

/// Depth-first search for a sequence of jumps that leaves one peg.
///
/// At every board the jumps are tried in [`legal_moves`] order and the first
/// one leading to a solvable board is taken, so the same start always yields
/// the same path. Boards found to be unsolvable are remembered (by their
/// normalized code) for the lifetime of the solver.
pub struct Solver {
    dead: BitBox<u32>,
    max_depth: usize,
    stats: SearchStats,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::with_max_depth(MAX_SEARCH_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            dead: bitbox![u32, Lsb0; 0; 1usize << NR_HOLES],
            max_depth,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn solve(&mut self, start: Board) -> Result<SolveResult> {
        let before = self.stats;

        let result = match self.search(start, 0)? {
            Some(mut steps) => {
                steps.reverse();
                let (jumps, boards) = steps.into_iter().unzip::<_, _, Vec<_>, Vec<_>>();
                let mut path_boards = Vec::with_capacity(boards.len() + 1);
                path_boards.push(start);
                path_boards.extend(boards);
                SolveResult::Solved(SolutionPath {
                    boards: path_boards,
                    jumps,
                })
            }
            None => SolveResult::Unsolvable,
        };

        log::debug!(
            "searched {:#06x}: explored {} boards, skipped {} dead, solved {}",
            start.to_code(),
            self.stats.explored - before.explored,
            self.stats.dead_skipped - before.dead_skipped,
            result.is_solved(),
        );
        Ok(result)
    }

    /// Returns the winning steps in reverse order, last jump first.
    fn search(&mut self, board: Board, depth: usize) -> Result<Option<Vec<(Jump, Board)>>> {
        self.stats.explored += 1;

        if board.is_solved() {
            return Ok(Some(Vec::new()));
        }
        if depth >= self.max_depth {
            return Err(Error::SearchDepthExceeded {
                limit: self.max_depth,
            });
        }

        let key = board.normalize().to_code() as usize;
        if self.dead[key] {
            self.stats.dead_skipped += 1;
            log::trace!("skipping dead board {key:#06x}");
            return Ok(None);
        }

        for (jump, next) in legal_moves(board) {
            if let Some(mut steps) = self.search(next, depth + 1)? {
                steps.push((jump, next));
                return Ok(Some(steps));
            }
        }

        self.dead.set(key, true);
        Ok(None)
    }
}

/// Solve the 15 boards with a single empty hole, apex first and row-major
/// after that.
pub fn solve_all_starts(solver: &mut Solver) -> Result<Vec<(Hole, SolveResult)>> {
    Hole::all()
        .map(|hole| Ok((hole, solver.solve(Board::with_hole_emptied(hole))?)))
        .collect()
}
