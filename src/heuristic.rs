//! Cost-to-go estimates and the parity test that decides reachability.
//!
//! Both estimates are admissible: they never exceed the true number of
//! slides left. Manhattan distance is also consistent, so with it the
//! solver finalises every board the first time it is expanded.

use crate::puzzle::{Board, BLANK, CELLS, SIZE};

/// Which estimate the solver ranks the frontier by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Heuristic {
    #[default]
    Manhattan,
    /// Manhattan distance plus two slides for every tile that has to step
    /// out of its goal row or column to let another tile past.
    LinearConflict,
}

impl Heuristic {
    pub fn estimate(&self, board: &Board, goal: &Board) -> usize {
        match self {
            Heuristic::Manhattan => manhattan_distance(board, goal),
            Heuristic::LinearConflict => linear_conflict(board, goal),
        }
    }
}

/// Number of pairs of tiles, blank excluded, that appear in descending
/// order when the board is read row by row.
pub fn count_inversions(board: &Board) -> usize {
    let tiles = board.tiles();
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != BLANK)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != BLANK && next < val)
                .count()
        })
        .sum()
}

pub fn inversion_parity(board: &Board) -> usize {
    count_inversions(board) % 2
}

/// Whether `goal` can be reached from `start` by sliding the blank.
///
/// On an odd-width grid a slide never changes the parity of the inversion
/// count, so two boards are connected exactly when their parities agree.
/// Comparing against the goal's own parity matters: the centre goal has an
/// odd count, the sorted goal an even one.
pub fn is_solvable(start: &Board, goal: &Board) -> bool {
    start == goal || inversion_parity(start) == inversion_parity(goal)
}

/// Row-major index of each tile in `goal`, indexed by tile.
fn goal_positions(goal: &Board) -> [usize; CELLS] {
    let mut positions = [0; CELLS];
    for (index, &tile) in goal.tiles().iter().enumerate() {
        positions[tile as usize] = index;
    }
    positions
}

/// Sum over the tiles of the grid distance between their cell in `board`
/// and their cell in `goal`.
pub fn manhattan_distance(board: &Board, goal: &Board) -> usize {
    let targets = goal_positions(goal);
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != BLANK)
        .map(|(index, &tile)| {
            let target = targets[tile as usize];
            (index / SIZE).abs_diff(target / SIZE) + (index % SIZE).abs_diff(target % SIZE)
        })
        .sum()
}

/// Manhattan distance plus the linear-conflict penalty.
///
/// In each row, take the tiles whose goal cell is also in that row. Only
/// those forming the longest run already in goal order can stay; each of
/// the others must leave the row and come back, costing two extra slides.
/// Columns are treated the same way.
pub fn linear_conflict(board: &Board, goal: &Board) -> usize {
    let targets = goal_positions(goal);
    let mut penalty = 0;

    for line in 0..SIZE {
        let mut row_order = Vec::with_capacity(SIZE);
        let mut col_order = Vec::with_capacity(SIZE);

        for step in 0..SIZE {
            let in_row = board.get(line, step);
            if in_row != BLANK && targets[in_row as usize] / SIZE == line {
                row_order.push(targets[in_row as usize] % SIZE);
            }

            let in_col = board.get(step, line);
            if in_col != BLANK && targets[in_col as usize] % SIZE == line {
                col_order.push(targets[in_col as usize] / SIZE);
            }
        }

        penalty += row_order.len() - longest_increasing(&row_order);
        penalty += col_order.len() - longest_increasing(&col_order);
    }

    manhattan_distance(board, goal) + 2 * penalty
}

fn longest_increasing(values: &[usize]) -> usize {
    let mut best = vec![1; values.len()];
    for i in 0..values.len() {
        for j in 0..i {
            if values[j] < values[i] {
                best[i] = best[i].max(best[j] + 1);
            }
        }
    }
    best.into_iter().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::bfs_distances;

    fn board(tiles: [u8; CELLS]) -> Board {
        Board::new(tiles).unwrap()
    }

    #[test]
    fn sorted_goal_has_even_parity() {
        assert_eq!(count_inversions(&Board::SORTED_GOAL), 0);
    }

    #[test]
    fn center_goal_has_odd_parity() {
        // 8 > 4,7,6,5; 7 > 6,5; 6 > 5
        assert_eq!(count_inversions(&Board::CENTER_GOAL), 7);
        assert_eq!(inversion_parity(&Board::CENTER_GOAL), 1);
    }

    #[test]
    fn one_slide_away_is_solvable() {
        let start = board([1, 0, 3, 8, 2, 4, 7, 6, 5]);
        assert!(is_solvable(&start, &Board::CENTER_GOAL));
    }

    #[test]
    fn swapped_tiles_are_unsolvable() {
        let start = board([2, 1, 3, 8, 0, 4, 7, 6, 5]);
        assert!(!is_solvable(&start, &Board::CENTER_GOAL));
        assert!(!is_solvable(&Board::CENTER_GOAL, &start));
    }

    #[test]
    fn start_only_parity_check_would_reject_center_goal_instances() {
        let start = board([5, 7, 2, 4, 1, 0, 3, 8, 6]);
        assert_eq!(inversion_parity(&start), 1);
        assert!(is_solvable(&start, &Board::CENTER_GOAL));
        assert!(!is_solvable(&start, &Board::SORTED_GOAL));
    }

    #[test]
    fn manhattan_is_zero_at_goal() {
        assert_eq!(manhattan_distance(&Board::CENTER_GOAL, &Board::CENTER_GOAL), 0);
        assert_eq!(linear_conflict(&Board::SORTED_GOAL, &Board::SORTED_GOAL), 0);
    }

    #[test]
    fn manhattan_sums_tile_distances() {
        let start = board([5, 7, 2, 4, 1, 0, 3, 8, 6]);
        assert_eq!(manhattan_distance(&start, &Board::CENTER_GOAL), 19);
        let one_away = board([1, 0, 3, 8, 2, 4, 7, 6, 5]);
        assert_eq!(manhattan_distance(&one_away, &Board::CENTER_GOAL), 1);
    }

    #[test]
    fn linear_conflict_charges_reversed_pair() {
        let start = board([2, 1, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(manhattan_distance(&start, &Board::SORTED_GOAL), 2);
        assert_eq!(linear_conflict(&start, &Board::SORTED_GOAL), 4);
    }

    #[test]
    fn linear_conflict_keeps_longest_ordered_run() {
        // Goal columns 2, 0, 1: only tile 3 has to leave the row.
        let start = board([3, 1, 2, 4, 5, 6, 7, 8, 0]);
        assert_eq!(manhattan_distance(&start, &Board::SORTED_GOAL), 4);
        assert_eq!(linear_conflict(&start, &Board::SORTED_GOAL), 6);
    }

    #[test]
    fn parity_decides_reachability_exhaustively() {
        for goal in [Board::CENTER_GOAL, Board::SORTED_GOAL] {
            let distances = bfs_distances(&goal);
            // Half of the 9! arrangements.
            assert_eq!(distances.len(), 181_440);
            for state in distances.keys() {
                assert_eq!(inversion_parity(state), inversion_parity(&goal));
                assert!(is_solvable(state, &goal));
            }
        }
    }

    #[test]
    fn estimates_never_exceed_true_distance() {
        for goal in [Board::CENTER_GOAL, Board::SORTED_GOAL] {
            for (state, &distance) in &bfs_distances(&goal) {
                let manhattan = manhattan_distance(state, &goal);
                assert!(manhattan <= distance, "{state:?}: {manhattan} > {distance}");
                let conflict = linear_conflict(state, &goal);
                assert!(conflict <= distance, "{state:?}: {conflict} > {distance}");
                assert!(manhattan <= conflict);
            }
        }
    }

    #[test]
    fn manhattan_is_consistent_across_every_slide() {
        let goal = Board::CENTER_GOAL;
        for state in bfs_distances(&goal).keys() {
            let h = manhattan_distance(state, &goal);
            for (_, next) in state.neighbors() {
                assert!(h <= 1 + manhattan_distance(&next, &goal));
            }
        }
    }
}
