//! Dungeon geometry: grids, levels and projection paths

mod chunk;
mod grid;
mod path;

pub use chunk::{Actor, Chunk, Feature, FloorItem};
pub use grid::{DIRECTIONS, Loc, distance};
pub use path::{PathFlags, project_path};
