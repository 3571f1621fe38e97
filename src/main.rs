use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use common::{
    Board, Jump, SolveResult, Solver,
    coord::{Hole, NR_ROWS},
    solver::MAX_SEARCH_DEPTH,
};

/// Solve the 15-hole triangular peg solitaire board.
///
/// Without a starting position every board with a single empty hole is
/// solved in turn.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Only solve the board with this hole empty
    #[arg(long, value_name = "ROW,COL", value_parser = parse_hole, conflicts_with = "code")]
    start: Option<Hole>,
    /// Solve the board decoded from this 15-bit code
    #[arg(long, value_name = "CODE")]
    code: Option<u32>,
    /// Print the boards without highlighting the jumps
    #[arg(long)]
    plain: bool,
    /// Give up when a search goes deeper than this many jumps
    #[arg(long, default_value_t = MAX_SEARCH_DEPTH, value_name = "NUM")]
    max_depth: usize,
}

fn parse_hole(s: &str) -> Result<Hole, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row: i8 = row.trim().parse().map_err(|err| format!("bad row: {err}"))?;
    let col: i8 = col.trim().parse().map_err(|err| format!("bad column: {err}"))?;
    Hole::try_new(row, col).map_err(|err| err.to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if cli.plain {
        colored::control::set_override(false);
    }

    let starts = if let Some(hole) = cli.start {
        vec![Board::with_hole_emptied(hole)]
    } else if let Some(code) = cli.code {
        vec![Board::from_code(code).context("Failed to decode board")?]
    } else {
        Hole::all().map(Board::with_hole_emptied).collect()
    };

    let mut solver = Solver::with_max_depth(cli.max_depth);
    let mut solved = 0;
    for (round, start) in starts.iter().enumerate() {
        println!("=== {} ===", round + 1);

        let result = solver
            .solve(*start)
            .with_context(|| format!("Failed to solve board {:#06x}", start.to_code()))?;
        match result {
            SolveResult::Solved(path) => {
                solved += 1;
                println!("{start}");
                for (&jump, &board) in path.jumps().iter().zip(&path.boards()[1..]) {
                    println!("{jump}");
                    println!("{}", draw_with_jump(board, jump));
                }
            }
            SolveResult::Unsolvable => {
                println!("{start}");
                println!("no solution");
                println!();
            }
        }
    }

    let stats = solver.stats();
    log::info!(
        "solved {solved} of {} boards, explored {} boards, skipped {} dead",
        starts.len(),
        stats.explored,
        stats.dead_skipped,
    );

    Ok(())
}

/// Like the plain rendering, with the landing peg on red and the two holes
/// emptied by the jump on blue.
fn draw_with_jump(board: Board, jump: Jump) -> String {
    let mut out = String::new();
    for row in 0..NR_ROWS {
        out.push_str(&" ".repeat((NR_ROWS - 1 - row) as usize));
        let cells: Vec<String> = (0..=row)
            .filter_map(|col| Hole::new(row, col))
            .map(|hole| {
                if board.is_occupied(hole) {
                    if hole == jump.dst() {
                        "#".on_red().to_string()
                    } else {
                        "#".to_string()
                    }
                } else if hole == jump.src() || hole == jump.mid() {
                    ".".on_blue().to_string()
                } else {
                    ".".to_string()
                }
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hole() {
        assert_eq!(parse_hole("2,1"), Ok(Hole::new(2, 1).unwrap()));
        assert_eq!(parse_hole(" 4, 4"), Ok(Hole::new(4, 4).unwrap()));
        assert!(parse_hole("1,2").is_err());
        assert!(parse_hole("3").is_err());
        assert!(parse_hole("a,0").is_err());
    }

    #[test]
    fn test_draw_with_jump_matches_plain_render() {
        colored::control::set_override(false);
        let start = Board::with_hole_emptied(Hole::apex());
        let jump = common::legal_moves(start)[0].0;
        let board = start.apply_jump(jump);
        assert_eq!(draw_with_jump(board, jump), board.render());
    }

    #[test]
    fn test_cli_rejects_start_with_code() {
        assert!(Cli::try_parse_from(["crackerbarrel", "--start", "0,0", "--code", "7"]).is_err());
        let cli = Cli::try_parse_from(["crackerbarrel", "--start", "2,1"]).unwrap();
        assert_eq!(cli.start, Hole::new(2, 1));
        assert_eq!(cli.max_depth, MAX_SEARCH_DEPTH);
    }
}
