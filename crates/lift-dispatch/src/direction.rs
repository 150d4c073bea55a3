//! Travel direction.

use std::fmt;

/// Direction of travel, always derived from the queue and never stored.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Direction {
    Up,
    Down,
    #[default]
    Still,
    /// Query wildcard: "either way".  Never produced by a car.
    Both,
}

impl Direction {
    /// Direction from floor `from` to floor `to`.
    #[inline]
    pub fn between(from: i32, to: i32) -> Direction {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less    => Direction::Down,
            std::cmp::Ordering::Equal   => Direction::Still,
        }
    }

    /// Can a car heading `self` serve a caller who wants to go `wanted`?
    ///
    /// An idle car serves everyone, and `Both` accepts any car.
    pub fn serves(self, wanted: Direction) -> bool {
        self == Direction::Still || wanted == Direction::Both || self == wanted
    }

    /// Does `floor` lie strictly past `from` when travelling `self`?
    #[inline]
    pub fn is_beyond(self, from: i32, floor: i32) -> bool {
        match self {
            Direction::Up   => floor > from,
            Direction::Down => floor < from,
            Direction::Still | Direction::Both => false,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up    => "up",
            Direction::Down  => "down",
            Direction::Still => "still",
            Direction::Both  => "both",
        };
        f.write_str(s)
    }
}
