//! Combat context: the state every combat routine reads or advances

use serde::{Deserialize, Serialize};

use super::config::CombatConstants;
use crate::rng::GameRng;

/// RNG, tunables and game clock for one world shard
///
/// Passed by `&mut` into every combat routine; nothing in the crate keeps
/// global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatContext {
    pub rng: GameRng,
    pub constants: CombatConstants,
    /// Game turn counter
    pub turn: u64,
}

impl CombatContext {
    /// Context with default constants and a fixed seed
    pub fn new(seed: u64) -> Self {
        Self::with_constants(CombatConstants::default(), seed)
    }

    pub fn with_constants(constants: CombatConstants, seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            constants,
            turn: 0,
        }
    }

    /// Daytime is the first half of each day/night cycle
    pub fn is_daytime(&self) -> bool {
        let cycle = 10 * self.constants.day_length.max(1);
        (self.turn % cycle) < cycle / 2
    }

    pub fn is_night(&self) -> bool {
        !self.is_daytime()
    }

    /// Move the clock forward
    pub fn advance(&mut self, turns: u64) {
        self.turn = self.turn.saturating_add(turns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_night_cycle() {
        let mut ctx = CombatContext::new(1);
        assert!(ctx.is_daytime());
        ctx.advance(49_999);
        assert!(ctx.is_daytime());
        ctx.advance(1);
        assert!(ctx.is_night());
        ctx.advance(50_000);
        assert!(ctx.is_daytime());
    }

    #[test]
    fn test_seed_survives_serde() {
        let ctx = CombatContext::new(99);
        let json = serde_json::to_string(&ctx).unwrap();
        let back: CombatContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rng.seed(), 99);
        assert_eq!(back.constants, ctx.constants);
    }
}
