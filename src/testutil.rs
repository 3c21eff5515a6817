use std::collections::{HashMap, VecDeque};

use crate::puzzle::Board;

/// Exact slide count from every reachable board to `goal`, by plain
/// breadth-first search. Slides are reversible, so searching outward from
/// the goal gives the distance in both directions.
pub fn bfs_distances(goal: &Board) -> HashMap<Board, usize> {
    let mut distances = HashMap::new();
    let mut queue = VecDeque::new();
    distances.insert(*goal, 0);
    queue.push_back(*goal);

    while let Some(current) = queue.pop_front() {
        let next_distance = distances[&current] + 1;
        for (_, next) in current.neighbors() {
            if !distances.contains_key(&next) {
                distances.insert(next, next_distance);
                queue.push_back(next);
            }
        }
    }

    distances
}
