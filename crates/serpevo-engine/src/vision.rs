use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{Cell, Direction, Grid, Pos};

/// Distance value reported for a hit along a vision ray, and the fixed
/// heuristic value used by the path finder.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// `1 / steps` along the ray (rays are axis- or diagonal-aligned, so the
    /// step count is the Chebyshev distance).
    InverseStep,
    /// Euclidean distance normalized by the grid diagonal.
    Euclidean,
    /// Manhattan distance normalized by the maximum grid Manhattan distance.
    Manhattan,
    /// Constant `1.0` once a hit is detected; kept for compatibility with
    /// genomes evolved under the pure-detection encoding.
    Binary,
}

impl DistanceMetric {
    /// Normalized distance between two cells on a `rows x cols` grid.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn normalized(self, rows: usize, cols: usize, from: Pos, to: Pos) -> f32 {
        let d_row = from.row.abs_diff(to.row);
        let d_col = from.col.abs_diff(to.col);
        match self {
            Self::InverseStep => {
                let steps = d_row.max(d_col).max(1);
                1.0 / steps as f32
            }
            Self::Euclidean => {
                let max = ((rows - 1).pow(2) + (cols - 1).pow(2)) as f32;
                (((d_row.pow(2) + d_col.pow(2)) as f32) / max).sqrt()
            }
            Self::Manhattan => {
                let max = (rows - 1) + (cols - 1);
                (d_row + d_col) as f32 / max as f32
            }
            Self::Binary => 1.0,
        }
    }
}

/// Object class hit by a vision ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RayHit {
    Wall,
    Body,
    Apple,
}

/// `(row, col)` ray increments: the four cardinal axes in
/// [`Direction::ALL`] order, then the four diagonals.
const RAY_STEPS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// How the grid state is encoded into the network input vector.
///
/// The element order of each encoding is fixed, so any two networks built
/// for the same mode (and metric) have interchangeable genomes across
/// generations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum VisionMode {
    /// Adjacent-cell flags only: per cardinal axis one wall flag and one
    /// body flag, four apple-direction flags, head and tail one-hots.
    Binary,
    /// 8-ray march: per ray a `[wall, body, apple]` one-hot for the first
    /// obstacle plus its metric distance, then head and tail one-hots.
    Real,
}

impl VisionMode {
    /// Length of the encoded vector; architecture-stable per mode.
    #[must_use]
    pub fn input_len(self) -> usize {
        match self {
            // 4 wall + 4 body + 4 apple + head one-hot + tail one-hot
            Self::Binary => 20,
            // 8 rays * (wall, body, apple, distance) + head + tail one-hots
            Self::Real => 40,
        }
    }

    /// Encodes the current grid state into the network input vector.
    #[must_use]
    pub fn encode(
        self,
        grid: &Grid,
        head: Pos,
        head_direction: Direction,
        tail_direction: Direction,
        apple: Pos,
        metric: DistanceMetric,
    ) -> Vec<f32> {
        let mut vector = Vec::with_capacity(self.input_len());
        match self {
            Self::Binary => encode_binary(grid, head, apple, &mut vector),
            Self::Real => encode_rays(grid, head, metric, &mut vector),
        }
        vector.extend_from_slice(&head_direction.one_hot());
        vector.extend_from_slice(&tail_direction.one_hot());
        debug_assert_eq!(vector.len(), self.input_len());
        vector
    }
}

fn flag(condition: bool) -> f32 {
    if condition { 1.0 } else { 0.0 }
}

fn encode_binary(grid: &Grid, head: Pos, apple: Pos, vector: &mut Vec<f32>) {
    let neighbors: ArrayVec<Pos, 4> = Direction::ALL.iter().map(|&d| head.stepped(d)).collect();

    for &neighbor in &neighbors {
        vector.push(flag(!grid.contains(neighbor)));
    }
    for &neighbor in &neighbors {
        vector.push(flag(grid.contains(neighbor) && grid.get(neighbor).is_body()));
    }
    // apple north / south / east / west of the head, each independent
    vector.push(flag(apple.row < head.row));
    vector.push(flag(apple.row > head.row));
    vector.push(flag(apple.col > head.col));
    vector.push(flag(apple.col < head.col));
}

fn encode_rays(grid: &Grid, head: Pos, metric: DistanceMetric, vector: &mut Vec<f32>) {
    for &(d_row, d_col) in &RAY_STEPS {
        let (hit, pos) = march_ray(grid, head, d_row, d_col);
        vector.push(flag(hit == RayHit::Wall));
        vector.push(flag(hit == RayHit::Body));
        vector.push(flag(hit == RayHit::Apple));
        vector.push(metric.normalized(grid.rows(), grid.cols(), head, pos));
    }
}

/// Walks from `head` in `(d_row, d_col)` steps until the first obstacle.
///
/// The first off-grid position counts as a wall hit, so every ray reports
/// something.
fn march_ray(grid: &Grid, head: Pos, d_row: i32, d_col: i32) -> (RayHit, Pos) {
    let mut pos = head.offset(d_row, d_col);
    loop {
        if !grid.contains(pos) {
            return (RayHit::Wall, pos);
        }
        match grid.get(pos) {
            Cell::Body => return (RayHit::Body, pos),
            Cell::Apple => return (RayHit::Apple, pos),
            Cell::Empty | Cell::Head => pos = pos.offset(d_row, d_col),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_grid() -> Grid {
        Grid::new(10, 10)
    }

    mod metric {
        use super::*;

        #[test]
        fn test_inverse_step_uses_chebyshev_steps() {
            let m = DistanceMetric::InverseStep;
            assert_eq!(m.normalized(10, 10, Pos::new(5, 5), Pos::new(5, 9)), 0.25);
            // diagonal: 3 steps
            let d = m.normalized(10, 10, Pos::new(5, 5), Pos::new(8, 8));
            assert!((d - 1.0 / 3.0).abs() < 1e-6);
        }

        #[test]
        fn test_manhattan_normalized_by_grid_span() {
            let m = DistanceMetric::Manhattan;
            assert_eq!(m.normalized(10, 10, Pos::new(0, 0), Pos::new(9, 9)), 1.0);
            assert_eq!(m.normalized(10, 10, Pos::new(0, 0), Pos::new(0, 9)), 0.5);
        }

        #[test]
        fn test_euclidean_diagonal_is_one() {
            let m = DistanceMetric::Euclidean;
            let d = m.normalized(10, 10, Pos::new(0, 0), Pos::new(9, 9));
            assert!((d - 1.0).abs() < 1e-6);
        }

        #[test]
        fn test_binary_is_constant() {
            let m = DistanceMetric::Binary;
            assert_eq!(m.normalized(10, 10, Pos::new(0, 0), Pos::new(7, 3)), 1.0);
        }
    }

    mod binary_mode {
        use super::*;

        #[test]
        fn test_length() {
            let grid = empty_grid();
            let v = VisionMode::Binary.encode(
                &grid,
                Pos::new(5, 5),
                Direction::Up,
                Direction::Up,
                Pos::new(2, 2),
                DistanceMetric::Manhattan,
            );
            assert_eq!(v.len(), 20);
        }

        #[test]
        fn test_wall_flags_at_corner() {
            let grid = empty_grid();
            let v = VisionMode::Binary.encode(
                &grid,
                Pos::new(0, 0),
                Direction::Up,
                Direction::Up,
                Pos::new(5, 5),
                DistanceMetric::Manhattan,
            );
            // wall flags in [up, down, left, right] order
            assert_eq!(&v[0..4], &[1.0, 0.0, 1.0, 0.0]);
        }

        #[test]
        fn test_body_flag_and_apple_flags() {
            let mut grid = empty_grid();
            let head = Pos::new(5, 5);
            grid.set(head, Cell::Head);
            grid.set(Pos::new(6, 5), Cell::Body);
            let apple = Pos::new(2, 7);
            grid.set(apple, Cell::Apple);

            let v = VisionMode::Binary.encode(
                &grid,
                head,
                Direction::Up,
                Direction::Up,
                apple,
                DistanceMetric::Manhattan,
            );
            // body below the head
            assert_eq!(&v[4..8], &[0.0, 1.0, 0.0, 0.0]);
            // apple north and east
            assert_eq!(&v[8..12], &[1.0, 0.0, 1.0, 0.0]);
            // head one-hot (up), tail one-hot (up)
            assert_eq!(&v[12..16], &[1.0, 0.0, 0.0, 0.0]);
            assert_eq!(&v[16..20], &[1.0, 0.0, 0.0, 0.0]);
        }
    }

    mod real_mode {
        use super::*;

        #[test]
        fn test_length() {
            let grid = empty_grid();
            let v = VisionMode::Real.encode(
                &grid,
                Pos::new(5, 5),
                Direction::Up,
                Direction::Up,
                Pos::new(2, 2),
                DistanceMetric::InverseStep,
            );
            assert_eq!(v.len(), 40);
        }

        #[test]
        fn test_ray_reports_apple_before_wall() {
            let mut grid = empty_grid();
            let head = Pos::new(5, 5);
            grid.set(head, Cell::Head);
            let apple = Pos::new(5, 8);
            grid.set(apple, Cell::Apple);

            let v = VisionMode::Real.encode(
                &grid,
                head,
                Direction::Up,
                Direction::Up,
                apple,
                DistanceMetric::InverseStep,
            );
            // ray 3 is the rightward axis; slots [wall, body, apple, dist]
            let ray = &v[3 * 4..3 * 4 + 4];
            assert_eq!(&ray[0..3], &[0.0, 0.0, 1.0]);
            assert!((ray[3] - 1.0 / 3.0).abs() < 1e-6);
        }

        #[test]
        fn test_ray_hits_wall_past_boundary() {
            let grid = empty_grid();
            let head = Pos::new(0, 5);
            let v = VisionMode::Real.encode(
                &grid,
                head,
                Direction::Up,
                Direction::Up,
                Pos::new(9, 9),
                DistanceMetric::InverseStep,
            );
            // ray 0 is the upward axis; wall is one step away
            let ray = &v[0..4];
            assert_eq!(&ray[0..3], &[1.0, 0.0, 0.0]);
            assert_eq!(ray[3], 1.0);
        }
    }
}
