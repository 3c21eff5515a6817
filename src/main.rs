use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use eight_puzzle::puzzle::{BLANK, CELLS, SIZE};
use eight_puzzle::{Board, Heuristic, Outcome, Solver, SolverConfig};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Optimal solver for the 3x3 sliding-tile puzzle", long_about = None)]
struct Args {
    /// Start board, e.g. "572410386" or "5 7 2 4 1 0 3 8 6" (0 is the blank).
    /// Read from stdin when neither this nor --random is given.
    #[clap(short, long, conflicts_with = "random")]
    start: Option<Board>,

    /// Goal board
    #[clap(short, long, default_value = "123804765")]
    goal: Board,

    /// Start from a random board that can reach the goal
    #[clap(short, long)]
    random: bool,

    /// Seed for --random
    #[clap(long, requires = "random")]
    seed: Option<u64>,

    #[clap(long, value_enum, default_value_t = HeuristicArg::Manhattan)]
    heuristic: HeuristicArg,

    /// Stop after expanding this many boards
    #[clap(long)]
    max_expansions: Option<usize>,

    /// Print only the moves
    #[clap(short, long)]
    quiet: bool,

    /// Log search progress
    #[clap(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicArg {
    Manhattan,
    LinearConflict,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::LinearConflict => Heuristic::LinearConflict,
        }
    }
}

impl Args {
    fn solver_config(&self) -> SolverConfig {
        let defaults = SolverConfig::default();
        SolverConfig {
            heuristic: self.heuristic.into(),
            max_expansions: self.max_expansions.or(defaults.max_expansions),
        }
    }
}

/// Reads lines until they hold a whole board: nine numbers, or one run of
/// nine digits.
fn read_board<R: BufRead>(reader: R) -> Result<Board> {
    let mut text = String::new();
    for line in reader.lines() {
        let line = line.context("Failed to read the board from stdin")?;
        text.push(' ');
        text.push_str(&line);

        let trimmed = text.trim();
        let is_digit_run = trimmed.len() == CELLS && trimmed.bytes().all(|b| b.is_ascii_digit());
        let numbers = trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .count();
        if is_digit_run || numbers >= CELLS {
            break;
        }
    }

    if text.trim().is_empty() {
        bail!("No board given on stdin");
    }
    text.parse::<Board>()
        .with_context(|| format!("Invalid board '{}'", text.trim()))
}

/// One line per row. The blank is left empty; with `styled`, tiles that
/// already sit on their goal cell are highlighted.
fn render(board: &Board, goal: &Board, styled: bool) -> String {
    let mut out = String::new();
    for row in 0..SIZE {
        for col in 0..SIZE {
            let tile = board.get(row, col);
            let cell = if tile == BLANK {
                "   ".to_string()
            } else {
                format!("{:2} ", tile)
            };
            if styled && tile != BLANK && goal.get(row, col) == tile {
                out.push_str(&cell.green().bold().to_string());
            } else {
                out.push_str(&cell);
            }
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let goal = args.goal;
    let start = match args.start {
        Some(board) => board,
        None if args.random => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Board::random_solvable(&goal, &mut rng)
        }
        None => {
            print!("Enter the start board (nine numbers 0-8, 0 is the blank)\n-> ");
            io::stdout().flush().context("Failed to flush stdout")?;
            read_board(io::stdin().lock())?
        }
    };

    let styled = io::stdout().is_tty();
    if !args.quiet {
        println!("Start:\n{}", render(&start, &goal, styled));
        println!("Goal:\n{}", render(&goal, &goal, styled));
    }

    let config = args.solver_config();
    info!("Solving with {:?}", config);
    let outcome = Solver::new(config)
        .solve(&start, &goal)
        .context("Search failed")?;

    let solution = match outcome {
        Outcome::Solved(solution) => solution,
        Outcome::Unsolvable => {
            println!("No solution: the start and goal boards have different inversion parity.");
            return Ok(ExitCode::from(2));
        }
    };

    if args.quiet {
        let moves: Vec<String> = solution.moves.iter().map(|m| m.to_string()).collect();
        println!("{}", moves.join(" "));
        return Ok(ExitCode::SUCCESS);
    }

    if solution.moves.is_empty() {
        println!("Already solved.");
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "Found optimal solution with {} moves ({} boards expanded)\n",
        solution.move_count(),
        solution.expanded
    );
    for (step, (board, movement)) in solution.path.iter().skip(1).zip(&solution.moves).enumerate() {
        println!("Step {}: {}\n{}", step + 1, movement, render(board, &goal, styled));
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_board_split_over_lines() {
        let input = Cursor::new("5 7 2\n4 1 0\n3 8 6\nignored\n");
        assert_eq!(
            read_board(input).unwrap(),
            Board::new([5, 7, 2, 4, 1, 0, 3, 8, 6]).unwrap()
        );
    }

    #[test]
    fn reads_digit_run() {
        let input = Cursor::new("123804765\n");
        assert_eq!(read_board(input).unwrap(), Board::CENTER_GOAL);
    }

    #[test]
    fn rejects_invalid_or_missing_board() {
        assert!(read_board(Cursor::new("1 2 3 4 5 6 7 8 8\n")).is_err());
        assert!(read_board(Cursor::new("")).is_err());
    }

    #[test]
    fn render_leaves_blank_empty() {
        assert_eq!(
            render(&Board::CENTER_GOAL, &Board::SORTED_GOAL, false),
            " 1  2  3 \n 8     4 \n 7  6  5 \n"
        );
    }

    #[test]
    fn max_expansions_falls_back_to_default() {
        let args = Args::parse_from(["eight-puzzle", "--random"]);
        assert_eq!(args.solver_config(), SolverConfig::default());

        let args = Args::parse_from([
            "eight-puzzle",
            "--start",
            "103824765",
            "--heuristic",
            "linear-conflict",
            "--max-expansions",
            "10",
        ]);
        assert_eq!(args.start, Some("103824765".parse().unwrap()));
        assert_eq!(
            args.solver_config(),
            SolverConfig {
                heuristic: Heuristic::LinearConflict,
                max_expansions: Some(10),
            }
        );
    }
}
