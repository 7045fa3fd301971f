use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashMap},
};

use arrayvec::ArrayVec;

use crate::{Cell, Direction, DistanceMetric, Grid, Pos};

/// Heap key: f-score with an insertion sequence number so that equal
/// f-scores pop in FIFO order.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OpenEntry {
    f_score: f32,
    sequence: u64,
    pos: Pos,
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score
            .total_cmp(&other.f_score)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* shortest path from `start` to `goal` over the free cells of `grid`.
///
/// The implicit graph is 4-connected; body cells are non-traversable, apple
/// and empty cells are traversable. `g` counts steps and `h` is the metric
/// distance between `start` and `goal`, computed once and reused for every
/// node. A constant heuristic adds nothing to the ordering, so the search
/// behaves as uniform-cost with FIFO tie-breaking; this matches the engine
/// this one replaces and keeps efficiency scores comparable, so it is kept
/// rather than upgraded to a per-node heuristic.
///
/// Returns the path excluding `start` (its length is the number of steps),
/// or an empty vector when `goal` is unreachable. Unreachable targets are a
/// normal outcome (the snake can wall itself in), never an error.
#[must_use]
pub fn shortest_path(grid: &Grid, start: Pos, goal: Pos, metric: DistanceMetric) -> Vec<Pos> {
    if !grid.contains(start) || !grid.contains(goal) {
        return Vec::new();
    }

    let h = metric.normalized(grid.rows(), grid.cols(), start, goal);
    let mut open = BinaryHeap::new();
    let mut sequence = 0_u64;
    let mut g_scores: HashMap<Pos, u32> = HashMap::new();
    let mut came_from: HashMap<Pos, Pos> = HashMap::new();

    g_scores.insert(start, 0);
    open.push(Reverse(OpenEntry {
        f_score: h,
        sequence,
        pos: start,
    }));

    while let Some(Reverse(entry)) = open.pop() {
        let pos = entry.pos;
        if pos == goal {
            return reconstruct(&came_from, start, goal);
        }
        let g = g_scores[&pos];
        // stale heap entry for an already-improved node
        #[expect(clippy::cast_precision_loss)]
        if entry.f_score > g as f32 + h {
            continue;
        }

        for neighbor in neighbors(grid, pos) {
            let tentative = g + 1;
            if g_scores
                .get(&neighbor)
                .is_none_or(|&known| tentative < known)
            {
                g_scores.insert(neighbor, tentative);
                came_from.insert(neighbor, pos);
                sequence += 1;
                #[expect(clippy::cast_precision_loss)]
                open.push(Reverse(OpenEntry {
                    f_score: tentative as f32 + h,
                    sequence,
                    pos: neighbor,
                }));
            }
        }
    }

    Vec::new()
}

fn neighbors(grid: &Grid, pos: Pos) -> ArrayVec<Pos, 4> {
    Direction::ALL
        .iter()
        .map(|&direction| pos.stepped(direction))
        .filter(|&next| grid.contains(next) && grid.get(next) != Cell::Body)
        .collect()
}

fn reconstruct(came_from: &HashMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = came_from[&current];
        path.push(current);
    }
    path.pop(); // drop the start cell
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manhattan_path(grid: &Grid, start: Pos, goal: Pos) -> Vec<Pos> {
        shortest_path(grid, start, goal, DistanceMetric::Manhattan)
    }

    #[test]
    fn test_obstacle_free_length_is_manhattan_distance() {
        let grid = Grid::new(10, 10);
        let start = Pos::new(1, 1);
        let goal = Pos::new(7, 4);
        let path = manhattan_path(&grid, start, goal);
        assert_eq!(path.len() as u32, start.manhattan(goal));
        assert_eq!(*path.last().unwrap(), goal);
        assert!(!path.contains(&start));
    }

    #[test]
    fn test_path_steps_are_adjacent() {
        let grid = Grid::new(10, 10);
        let start = Pos::new(0, 0);
        let path = manhattan_path(&grid, start, Pos::new(5, 5));
        let mut previous = start;
        for &pos in &path {
            assert_eq!(previous.manhattan(pos), 1);
            previous = pos;
        }
    }

    #[test]
    fn test_start_equals_goal_is_empty() {
        let grid = Grid::new(10, 10);
        assert!(manhattan_path(&grid, Pos::new(3, 3), Pos::new(3, 3)).is_empty());
    }

    #[test]
    fn test_body_cells_force_detour() {
        let mut grid = Grid::new(10, 10);
        // vertical wall with a gap at row 9
        for row in 0..9 {
            grid.set(Pos::new(row, 5), Cell::Body);
        }
        let start = Pos::new(0, 0);
        let goal = Pos::new(0, 9);
        let path = manhattan_path(&grid, start, goal);
        assert!(!path.is_empty());
        assert!(path.len() as u32 > start.manhattan(goal));
        assert!(path.iter().all(|&pos| grid.get(pos) != Cell::Body));
    }

    #[test]
    fn test_unreachable_goal_returns_empty() {
        let mut grid = Grid::new(10, 10);
        // box in the goal completely
        let goal = Pos::new(5, 5);
        for direction in Direction::ALL {
            grid.set(goal.stepped(direction), Cell::Body);
        }
        assert!(manhattan_path(&grid, Pos::new(0, 0), goal).is_empty());
    }

    #[test]
    fn test_apple_cell_is_traversable() {
        let mut grid = Grid::new(10, 10);
        grid.set(Pos::new(0, 1), Cell::Apple);
        let path = manhattan_path(&grid, Pos::new(0, 0), Pos::new(0, 2));
        assert_eq!(path, vec![Pos::new(0, 1), Pos::new(0, 2)]);
    }
}
