//! Projection paths for missiles

use bitflags::bitflags;

use super::chunk::Chunk;
use super::grid::{Loc, distance};
use crate::consts::MAX_PATH;

bitflags! {
    /// Options for [`project_path`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PathFlags: u8 {
        /// Stop at the first grid holding an actor
        const STOP = 0x01;
        /// Keep going past the target grid
        const THRU = 0x02;
    }
}

/// Grids a projection from `from` towards `to` passes through
///
/// The origin is not included. The path ends at the target (unless
/// `THRU`), when it leaves the level, once it is `range` away from the
/// origin, or on the first grid that blocks projections, which is
/// included so the caller can see what was hit.
pub fn project_path(chunk: &Chunk, range: i32, from: Loc, to: Loc, flags: PathFlags) -> Vec<Loc> {
    let mut path = Vec::new();
    if from == to || range <= 0 {
        return path;
    }

    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);

    while path.len() < MAX_PATH {
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }

        let grid = Loc::new(x, y);
        if !chunk.in_bounds(grid) {
            break;
        }
        path.push(grid);

        if !chunk.is_projectable(grid) {
            break;
        }
        if distance(from, grid) >= range {
            break;
        }
        if flags.contains(PathFlags::STOP) && chunk.actor_at(grid).is_some() {
            break;
        }
        if grid == to && !flags.contains(PathFlags::THRU) {
            break;
        }
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Feature;
    use crate::monster::MonsterRace;

    #[test]
    fn test_straight_line_stops_at_target() {
        let chunk = Chunk::new(20, 20);
        let path = project_path(&chunk, 20, Loc::new(2, 5), Loc::new(6, 5), PathFlags::empty());
        assert_eq!(
            path,
            vec![Loc::new(3, 5), Loc::new(4, 5), Loc::new(5, 5), Loc::new(6, 5)]
        );
    }

    #[test]
    fn test_thru_continues_to_range() {
        let chunk = Chunk::new(30, 30);
        let path = project_path(&chunk, 10, Loc::new(2, 5), Loc::new(4, 5), PathFlags::THRU);
        assert_eq!(path.len(), 10);
        assert_eq!(path.last(), Some(&Loc::new(12, 5)));
    }

    #[test]
    fn test_diagonal() {
        let chunk = Chunk::new(20, 20);
        let path = project_path(&chunk, 20, Loc::new(1, 1), Loc::new(4, 4), PathFlags::empty());
        assert_eq!(path, vec![Loc::new(2, 2), Loc::new(3, 3), Loc::new(4, 4)]);
    }

    #[test]
    fn test_wall_ends_path() {
        let mut chunk = Chunk::new(20, 20);
        chunk.set_feature(Loc::new(5, 5), Feature::Wall);
        let path = project_path(&chunk, 20, Loc::new(2, 5), Loc::new(9, 5), PathFlags::empty());
        assert_eq!(path.last(), Some(&Loc::new(5, 5)));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_stop_at_actor() {
        let mut chunk = Chunk::new(20, 20);
        chunk.add_monster(MonsterRace::new("jackal", 1, 3, 8), Loc::new(4, 5));
        let path = project_path(&chunk, 20, Loc::new(2, 5), Loc::new(9, 5), PathFlags::STOP);
        assert_eq!(path.last(), Some(&Loc::new(4, 5)));
    }

    #[test]
    fn test_degenerate() {
        let chunk = Chunk::new(20, 20);
        assert!(project_path(&chunk, 20, Loc::new(2, 2), Loc::new(2, 2), PathFlags::empty()).is_empty());
        assert!(project_path(&chunk, 0, Loc::new(2, 2), Loc::new(5, 2), PathFlags::empty()).is_empty());
    }

    #[test]
    fn test_leaves_level() {
        let chunk = Chunk::new(5, 5);
        let path = project_path(&chunk, 20, Loc::new(2, 2), Loc::new(4, 2), PathFlags::THRU);
        assert_eq!(path, vec![Loc::new(3, 2), Loc::new(4, 2)]);
    }
}
