//! Grid coordinates and distances

use serde::{Deserialize, Serialize};

/// A grid location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Loc {
    pub x: i32,
    pub y: i32,
}

/// The eight neighbouring offsets, clockwise from north
pub const DIRECTIONS: [Loc; 8] = [
    Loc::new(0, -1),
    Loc::new(1, -1),
    Loc::new(1, 0),
    Loc::new(1, 1),
    Loc::new(0, 1),
    Loc::new(-1, 1),
    Loc::new(-1, 0),
    Loc::new(-1, -1),
];

impl Loc {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub const fn sum(self, other: Loc) -> Self {
        self.offset(other.x, other.y)
    }

    /// The eight grids around this one
    pub fn adjacent(self) -> impl Iterator<Item = Loc> {
        DIRECTIONS.into_iter().map(move |d| self.sum(d))
    }

    pub fn is_adjacent(self, other: Loc) -> bool {
        self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }
}

/// Approximate distance: the longer axis plus half the shorter one
pub fn distance(a: Loc, b: Loc) -> i32 {
    let ay = (a.y - b.y).abs();
    let ax = (a.x - b.x).abs();
    if ay > ax { ay + (ax >> 1) } else { ax + (ay >> 1) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let origin = Loc::new(0, 0);
        assert_eq!(distance(origin, origin), 0);
        assert_eq!(distance(origin, Loc::new(5, 0)), 5);
        assert_eq!(distance(origin, Loc::new(0, -7)), 7);
        assert_eq!(distance(origin, Loc::new(4, 4)), 6);
        assert_eq!(distance(origin, Loc::new(3, 10)), 11);
        assert_eq!(distance(Loc::new(2, 3), Loc::new(7, 1)), distance(Loc::new(7, 1), Loc::new(2, 3)));
    }

    #[test]
    fn test_adjacent() {
        let center = Loc::new(5, 5);
        assert_eq!(center.adjacent().count(), 8);
        assert!(center.adjacent().all(|g| center.is_adjacent(g)));
        assert!(!center.is_adjacent(center));
        assert!(!center.is_adjacent(Loc::new(7, 5)));
    }
}
