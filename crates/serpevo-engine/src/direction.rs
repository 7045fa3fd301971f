use serde::{Deserialize, Serialize};

/// Absolute movement direction on the grid.
///
/// Rows grow downward, so `Up` decrements the row index.
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
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Network output meaning: a turn relative to the current heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTurn {
    Left,
    Straight,
    Right,
}

impl RelativeTurn {
    /// Maps an arg-max output index to a turn (0 left, 1 straight, 2 right).
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Left,
            2 => Self::Right,
            _ => Self::Straight,
        }
    }
}

impl Direction {
    /// All directions in the fixed encoding order used by vision vectors.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// `(row, col)` increment of one step.
    #[must_use]
    pub fn step(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Heading after a 90-degree counter-clockwise turn.
    #[must_use]
    pub fn turned_left(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
        }
    }

    /// Heading after a 90-degree clockwise turn.
    #[must_use]
    pub fn turned_right(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Applies a relative turn against this heading.
    #[must_use]
    pub fn apply_turn(self, turn: RelativeTurn) -> Self {
        match turn {
            RelativeTurn::Left => self.turned_left(),
            RelativeTurn::Straight => self,
            RelativeTurn::Right => self.turned_right(),
        }
    }

    /// One-hot encoding in [`Direction::ALL`] order.
    #[must_use]
    pub fn one_hot(self) -> [f32; 4] {
        let mut encoding = [0.0; 4];
        let index = Self::ALL
            .iter()
            .position(|&d| d == self)
            .expect("direction is in ALL");
        encoding[index] = 1.0;
        encoding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_turns_cycle_counter_clockwise() {
        let mut direction = Direction::Up;
        for expected in [
            Direction::Left,
            Direction::Down,
            Direction::Right,
            Direction::Up,
        ] {
            direction = direction.turned_left();
            assert_eq!(direction, expected);
        }
    }

    #[test]
    fn test_right_turn_inverts_left_turn() {
        for direction in Direction::ALL {
            assert_eq!(direction.turned_left().turned_right(), direction);
        }
    }

    #[test]
    fn test_apply_turn() {
        assert_eq!(
            Direction::Up.apply_turn(RelativeTurn::Straight),
            Direction::Up
        );
        assert_eq!(
            Direction::Right.apply_turn(RelativeTurn::Left),
            Direction::Up
        );
        assert_eq!(
            Direction::Right.apply_turn(RelativeTurn::Right),
            Direction::Down
        );
    }

    #[test]
    fn test_one_hot_order_is_stable() {
        assert_eq!(Direction::Up.one_hot(), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(Direction::Down.one_hot(), [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(Direction::Left.one_hot(), [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(Direction::Right.one_hot(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_relative_turn_from_index() {
        assert_eq!(RelativeTurn::from_index(0), RelativeTurn::Left);
        assert_eq!(RelativeTurn::from_index(1), RelativeTurn::Straight);
        assert_eq!(RelativeTurn::from_index(2), RelativeTurn::Right);
    }
}
