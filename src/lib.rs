//! # Eight Puzzle Solver
//!
//! Optimal solver for the 3x3 sliding-tile puzzle. Given a start board and
//! a goal board it either returns a shortest sequence of blank slides
//! between them or reports, from inversion parity alone, that none exists.
//!
//! ## Modules
//! - `puzzle`: the `Board` value type, `Move`, neighbor generation and parsing.
//! - `heuristic`: inversion parity, the solvability check and the
//!   Manhattan / linear-conflict estimates.
//! - `solver`: A* search, its configuration and the `Solution` it returns.
//! - `error`: error types shared by the modules above.
//!
//! ```
//! use eight_puzzle::{solve, Board, Move, Outcome};
//!
//! let start: Board = "103824765".parse().unwrap();
//! match solve(&start, &Board::CENTER_GOAL).unwrap() {
//!     Outcome::Solved(solution) => assert_eq!(solution.moves, vec![Move::Down]),
//!     Outcome::Unsolvable => unreachable!(),
//! }
//! ```

pub mod error;
pub mod heuristic;
pub mod puzzle;
pub mod solver;

#[cfg(test)]
mod testutil;

pub use error::{BoardError, SolveError};
pub use heuristic::{is_solvable, Heuristic};
pub use puzzle::{Board, Move};
pub use solver::{solve, Outcome, Solution, Solver, SolverConfig};
