use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use log::{debug, error, trace, warn};

use crate::error::SolveError;
use crate::heuristic::{is_solvable, Heuristic};
use crate::puzzle::{Board, Move};

/// Expansion cap used by [`SolverConfig::default`]. A 3x3 search never
/// needs more than 9!/2 expansions, so the default only trips on a bug.
pub const DEFAULT_MAX_EXPANSIONS: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub heuristic: Heuristic,
    /// Give up with [`SolveError::ExpansionLimit`] after this many boards
    /// have been expanded. `None` searches until the frontier is empty.
    pub max_expansions: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Manhattan,
            max_expansions: Some(DEFAULT_MAX_EXPANSIONS),
        }
    }
}

/// A shortest sequence of slides from a start board to a goal board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Every board along the way, start and goal included.
    pub path: Vec<Board>,
    /// `moves[i]` turns `path[i]` into `path[i + 1]`.
    pub moves: Vec<Move>,
    /// Boards taken off the frontier and expanded.
    pub expanded: usize,
    /// Successor boards produced while expanding.
    pub generated: usize,
}

impl Solution {
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

/// Result of a solve that ran to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Solved(Solution),
    /// The boards have different inversion parity; no search was run.
    Unsolvable,
}

impl Outcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            Outcome::Unsolvable => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
}

/// Frontier entry. The heap pops the lowest `f`, and among equal `f` the
/// entry pushed first.
#[derive(Debug)]
struct SearchNode {
    f_score: usize,
    seq: u64,
    g_score: usize,
    board: Board,
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

/// A* search over boards.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Finds a minimum-length slide sequence from `start` to `goal`.
    ///
    /// Boards of opposite parity come back as [`Outcome::Unsolvable`]
    /// without searching.
    pub fn solve(&self, start: &Board, goal: &Board) -> Result<Outcome, SolveError> {
        if start == goal {
            return Ok(Outcome::Solved(Solution {
                path: vec![*start],
                moves: Vec::new(),
                expanded: 0,
                generated: 0,
            }));
        }

        if !is_solvable(start, goal) {
            debug!("{:?} cannot reach {:?}: inversion parity differs", start, goal);
            return Ok(Outcome::Unsolvable);
        }

        self.search(start, goal).map(Outcome::Solved)
    }

    /// Like [`Solver::solve`], for tile sequences that have not been
    /// validated yet.
    pub fn solve_tiles(&self, start: &[u8], goal: &[u8]) -> Result<Outcome, SolveError> {
        let start = Board::try_from(start)?;
        let goal = Board::try_from(goal)?;
        self.solve(&start, &goal)
    }

    fn search(&self, start: &Board, goal: &Board) -> Result<Solution, SolveError> {
        let heuristic = self.config.heuristic;
        debug!(
            "searching from {:?} to {:?} with {:?}",
            start, goal, heuristic
        );

        let mut frontier = BinaryHeap::new();
        let mut best_g: HashMap<Board, usize> = HashMap::new();
        let mut came_from: HashMap<Board, (Board, Move)> = HashMap::new();
        let mut seq = 0u64;
        let mut expanded = 0;
        let mut generated = 0;

        best_g.insert(*start, 0);
        frontier.push(SearchNode {
            f_score: heuristic.estimate(start, goal),
            seq,
            g_score: 0,
            board: *start,
        });

        while let Some(node) = frontier.pop() {
            // A cheaper route was found after this entry was pushed.
            if best_g.get(&node.board).is_some_and(|&g| g < node.g_score) {
                continue;
            }

            if node.board == *goal {
                let (path, moves) = reconstruct_path(&came_from, node.board);
                debug!(
                    "solved in {} moves ({} expanded, {} generated)",
                    moves.len(),
                    expanded,
                    generated
                );
                return Ok(Solution {
                    path,
                    moves,
                    expanded,
                    generated,
                });
            }

            if let Some(limit) = self.config.max_expansions {
                if expanded >= limit {
                    warn!("giving up after {} expansions", expanded);
                    return Err(SolveError::ExpansionLimit { limit });
                }
            }
            expanded += 1;
            trace!("expanding {:?} (g={}, f={})", node.board, node.g_score, node.f_score);

            let tentative_g = node.g_score + 1;
            for (movement, neighbor) in node.board.neighbors() {
                generated += 1;
                let improves = best_g
                    .get(&neighbor)
                    .map_or(true, |&known| tentative_g < known);
                if !improves {
                    continue;
                }

                best_g.insert(neighbor, tentative_g);
                came_from.insert(neighbor, (node.board, movement));
                seq += 1;
                frontier.push(SearchNode {
                    f_score: tentative_g + heuristic.estimate(&neighbor, goal),
                    seq,
                    g_score: tentative_g,
                    board: neighbor,
                });
            }
        }

        error!(
            "frontier exhausted after {} expansions although {:?} and {:?} share parity",
            expanded, start, goal
        );
        Err(SolveError::SearchExhausted { expanded })
    }
}

/// Finds a minimum-length slide sequence with the default configuration.
pub fn solve(start: &Board, goal: &Board) -> Result<Outcome, SolveError> {
    Solver::default().solve(start, goal)
}

/// Follows parent links back from `goal` to the board that has none (the
/// start) and returns the boards and moves in forward order.
fn reconstruct_path(
    came_from: &HashMap<Board, (Board, Move)>,
    goal: Board,
) -> (Vec<Board>, Vec<Move>) {
    let mut path = vec![goal];
    let mut moves = Vec::new();
    let mut current = goal;
    while let Some(&(parent, movement)) = came_from.get(&current) {
        path.push(parent);
        moves.push(movement);
        current = parent;
    }
    path.reverse();
    moves.reverse();
    (path, moves)
}
