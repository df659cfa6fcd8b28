//! Per-turn countdown of timed effects
//!
//! Poison and bleeding hurt once per turn before the countdown, so a
//! monster or player can die of them.

use strum::IntoEnumIterator;

use super::context::CombatContext;
use crate::dungeon::Chunk;
use crate::monster::{MonTimed, mon_dec_timed};
use crate::player::{Player, PlayerTimed, player_dec_timed};

fn process_player(p: &mut Player) {
    if p.is_dead {
        return;
    }
    if p.has_timed(PlayerTimed::Poisoned) {
        p.take_hit(1, "poison");
    }
    if p.has_timed(PlayerTimed::Cut) {
        p.take_hit(1, "a fatal wound");
    }
    for effect in PlayerTimed::iter() {
        player_dec_timed(p, effect, 1, true);
    }
}

/// Advance every timed effect on the level by one turn
pub fn process_world(chunk: &mut Chunk, ctx: &mut CombatContext) {
    for p in &mut chunk.players {
        process_player(p);
    }

    for mon in &mut chunk.monsters {
        let dot = [MonTimed::Poison, MonTimed::Bleed]
            .iter()
            .filter(|&&t| mon.timed(t) > 0)
            .count() as i32;
        if dot > 0 {
            mon.take_hit(dot, &mut ctx.rng);
        }
        for effect in MonTimed::iter() {
            if let Some(note) = mon_dec_timed(mon, effect, 1) {
                tracing::trace!(monster = %mon.race.name, note, "timed effect ended");
            }
        }
    }

    let dead = chunk.reap_dead();
    if !dead.is_empty() {
        tracing::debug!(count = dead.len(), turn = ctx.turn, "monsters died of their wounds");
    }
}
