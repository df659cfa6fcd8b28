//! World state
//!
//! The combat context (RNG, constants, clock) and the level being fought
//! on, plus the per-tick countdown of timed effects.

pub mod config;
mod context;
pub mod errors;
pub mod timeout;

use serde::{Deserialize, Serialize};

pub use config::{CombatConstants, CriticalConfig, CriticalLevel, PvpHostility};
pub use context::CombatContext;
pub use errors::ConfigError;

use crate::dungeon::Chunk;

/// One simulated level and the context that drives it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub ctx: CombatContext,
    pub chunk: Chunk,
}

impl World {
    pub fn new(ctx: CombatContext, chunk: Chunk) -> Self {
        Self { ctx, chunk }
    }

    /// Advance one game turn, counting down every timed effect
    pub fn tick(&mut self) {
        self.ctx.advance(1);
        timeout::process_world(&mut self.chunk, &mut self.ctx);
    }
}
