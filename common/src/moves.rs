use std::sync::LazyLock;

use crate::{
    Board, Jump, NR_HOLES,
    coord::Hole,
    error::Result,
};

/// Unit steps of the triangular grid as `(row, col)` offsets, in the order
/// jumps are tried from each hole: up-left, up, left, right, down, down-right.
const DIRECTIONS: [(i8, i8); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, 0), (1, 1)];

/// Total number of jumps the board geometry allows.
pub const NR_JUMPS: usize = 36;

/// The geometrically possible jumps starting in each hole, indexed by
/// [`Hole::index`].
pub struct JumpTable {
    by_hole: [Vec<Jump>; NR_HOLES],
}

/// Built on first use and read-only afterwards.
pub static JUMP_TABLE: LazyLock<JumpTable> = LazyLock::new(JumpTable::new);

impl JumpTable {
    pub fn new() -> Self {
        let by_hole = std::array::from_fn(|idx| {
            let src = Hole::all()
                .nth(idx)
                .expect("index is below the number of holes");

            DIRECTIONS
                .iter()
                .filter_map(|&(dr, dc)| {
                    let dst = src.shift(2 * dr, 2 * dc)?;
                    Jump::between(src, dst)
                })
                .collect()
        });

        JumpTable { by_hole }
    }

    pub fn jumps_from(&self, hole: Hole) -> &[Jump] {
        &self.by_hole[hole.index()]
    }

    /// Look up the jumps from a raw coordinate.
    pub fn jumps_from_coord(&self, row: i8, col: i8) -> Result<&[Jump]> {
        Ok(self.jumps_from(Hole::try_new(row, col)?))
    }

    /// Every jump, grouped by starting hole in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Jump> + '_ {
        self.by_hole.iter().flatten().copied()
    }
}

impl Default for JumpTable {
    fn default() -> Self {
        Self::new()
    }
}

/// All jumps that can be made on `board`, each with the board it leads to.
///
/// Starting holes are scanned row-major, and the jumps of a hole in table
/// order. The solver relies on this order to pick its solution.
pub fn legal_moves(board: Board) -> Vec<(Jump, Board)> {
    Hole::all()
        .filter(|&hole| board.is_occupied(hole))
        .flat_map(|hole| JUMP_TABLE.jumps_from(hole))
        .filter(|&&jump| board.can_jump(jump))
        .map(|&jump| (jump, board.apply_jump(jump)))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::error::Error;

    use super::*;

    fn hole(row: i8, col: i8) -> Hole {
        Hole::new(row, col).unwrap()
    }

    #[rustfmt::skip]
    const CLASSIC_TABLE: [((i8, i8), (i8, i8), (i8, i8)); NR_JUMPS] = [
        ((0, 0), (1, 0), (2, 0)), ((0, 0), (1, 1), (2, 2)),
        ((1, 0), (2, 0), (3, 0)), ((1, 0), (2, 1), (3, 2)),
        ((1, 1), (2, 1), (3, 1)), ((1, 1), (2, 2), (3, 3)),
        ((2, 0), (1, 0), (0, 0)), ((2, 0), (2, 1), (2, 2)), ((2, 0), (3, 0), (4, 0)), ((2, 0), (3, 1), (4, 2)),
        ((2, 1), (3, 1), (4, 1)), ((2, 1), (3, 2), (4, 3)),
        ((2, 2), (1, 1), (0, 0)), ((2, 2), (2, 1), (2, 0)), ((2, 2), (3, 2), (4, 2)), ((2, 2), (3, 3), (4, 4)),
        ((3, 0), (2, 0), (1, 0)), ((3, 0), (3, 1), (3, 2)),
        ((3, 1), (2, 1), (1, 1)), ((3, 1), (3, 2), (3, 3)),
        ((3, 2), (2, 1), (1, 0)), ((3, 2), (3, 1), (3, 0)),
        ((3, 3), (2, 2), (1, 1)), ((3, 3), (3, 2), (3, 1)),
        ((4, 0), (3, 0), (2, 0)), ((4, 0), (4, 1), (4, 2)),
        ((4, 1), (3, 1), (2, 1)), ((4, 1), (4, 2), (4, 3)),
        ((4, 2), (3, 1), (2, 0)), ((4, 2), (3, 2), (2, 2)), ((4, 2), (4, 1), (4, 0)), ((4, 2), (4, 3), (4, 4)),
        ((4, 3), (3, 2), (2, 1)), ((4, 3), (4, 2), (4, 1)),
        ((4, 4), (3, 3), (2, 2)), ((4, 4), (4, 3), (4, 2)),
    ];

    #[test]
    fn test_table_matches_classic_layout() {
        let jumps: Vec<_> = JUMP_TABLE
            .iter()
            .map(|j| {
                (
                    (j.src().row(), j.src().col()),
                    (j.mid().row(), j.mid().col()),
                    (j.dst().row(), j.dst().col()),
                )
            })
            .collect();
        assert_eq!(jumps, CLASSIC_TABLE);
    }

    #[test]
    fn test_every_hole_has_two_to_four_jumps() {
        for h in Hole::all() {
            let jumps = JUMP_TABLE.jumps_from(h);
            assert!((2..=4).contains(&jumps.len()), "{h} has {} jumps", jumps.len());
            assert!(jumps.iter().all(|j| j.src() == h));
        }
    }

    #[test]
    fn test_table_contains_all_unique_jumps() {
        let jumps: Vec<_> = JUMP_TABLE.iter().collect();
        for i in 0..jumps.len() {
            for j in 0..i {
                assert_ne!(jumps[i], jumps[j]);
            }
        }
    }

    #[test]
    fn test_jumps_from_invalid_coord() {
        assert!(matches!(
            JUMP_TABLE.jumps_from_coord(1, 3),
            Err(Error::InvalidHole { row: 1, col: 3 })
        ));
        assert_eq!(JUMP_TABLE.jumps_from_coord(0, 0).unwrap().len(), 2);
    }

    #[test]
    fn test_legal_moves_from_apex_start() {
        let board = Board::with_hole_emptied(Hole::apex());
        let moves = legal_moves(board);
        let targets: Vec<_> = moves.iter().map(|(j, _)| (j.src(), j.dst())).collect();
        assert_eq!(
            targets,
            vec![(hole(2, 0), Hole::apex()), (hole(2, 2), Hole::apex())]
        );
    }

    #[test]
    fn test_legal_moves_remove_one_peg() {
        for start in Hole::all() {
            let board = Board::with_hole_emptied(start);
            let moves = legal_moves(board);
            assert!(!moves.is_empty());
            for (jump, next) in moves {
                assert_eq!(next.count(), 13);
                assert!(next.is_occupied(jump.dst()));
                assert!(!next.is_occupied(jump.src()));
                assert!(!next.is_occupied(jump.mid()));
            }
        }
    }

    #[test]
    fn test_no_moves_on_full_or_single_peg_board() {
        assert!(legal_moves(Board::full()).is_empty());
        assert!(legal_moves(Board::empty()).is_empty());
        let single = Board::from_code(hole(2, 1).bitmask().into()).unwrap();
        assert!(legal_moves(single).is_empty());
    }
}
