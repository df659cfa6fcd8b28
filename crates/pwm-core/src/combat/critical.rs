//! Critical hits
//!
//! A critical first needs a successful chance roll, which grows with
//! weight, to-hit, level and skill. Its power then picks a tier from the
//! configured table.

use super::messages::MsgType;
use super::target::Target;
use crate::object::{Object, TVal};
use crate::player::{Player, PlayerTimed};
use crate::world::{CombatContext, CriticalConfig};

/// Which skill feeds a critical roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CritSkill {
    Melee,
    Launched,
    Thrown,
}

fn skill_term(cfg: &CriticalConfig, p: &Player, kind: CritSkill) -> i32 {
    let skills = &p.state.skills;
    match kind {
        CritSkill::Melee => cfg.chance_toh_skill_scl * skills.to_hit_melee,
        CritSkill::Launched => cfg.chance_launched_toh_skill_scl * skills.to_hit_bow,
        CritSkill::Thrown => cfg.chance_thrown_toh_skill_scl * skills.to_hit_throw,
    }
}

fn roll_critical(
    cfg: &CriticalConfig,
    kind: CritSkill,
    p: &Player,
    target: &Target<'_>,
    weight: i32,
    plus: i32,
    dam: i32,
    ctx: &mut CombatContext,
) -> (i32, MsgType) {
    if p.has_timed(PlayerTimed::TouchOfDeath)
        && ctx.rng.magik(ctx.constants.touch_of_death_chance)
    {
        tracing::debug!(dam = dam * 4, "touch of death");
        return (dam * 4, cfg.top_message());
    }

    let mut to_h = p.state.to_h + plus;
    if target.is_debuffed() {
        to_h += cfg.debuff_toh;
    }

    let chance = cfg.chance_weight_scl * weight
        + cfg.chance_toh_scl * to_h
        + cfg.chance_level_scl * p.lev
        + skill_term(cfg, p, kind)
        + cfg.chance_offset;

    if cfg.levels.is_empty() || ctx.rng.randint1(cfg.chance_range) > chance {
        return (dam, MsgType::Hit);
    }

    let power = cfg.power_weight_scl * weight + ctx.rng.randint1(cfg.power_random);
    let mut idx = 0;
    while idx + 1 < cfg.levels.len() && power >= cfg.levels[idx].cutoff {
        idx += 1;
    }
    let level = cfg.levels[idx];
    let new_dam = level.add + level.mult * dam;
    tracing::debug!(?kind, chance, power, tier = %level.msg, dam, new_dam, "critical hit");
    (new_dam, level.msg)
}

/// Critical hits by the player in melee
///
/// `weight` is the weapon's weight, `plus` its to-hit bonus. Returns the
/// new damage and the message category.
pub fn critical_melee(
    p: &Player,
    target: &Target<'_>,
    weight: i32,
    plus: i32,
    dam: i32,
    ctx: &mut CombatContext,
) -> (i32, MsgType) {
    let cfg = ctx.constants.melee_critical.clone();
    roll_critical(&cfg, CritSkill::Melee, p, target, weight, plus, dam, ctx)
}

/// Critical hits by missiles, fired when `launched`, thrown otherwise
pub fn critical_shot(
    p: &Player,
    target: &Target<'_>,
    weight: i32,
    plus: i32,
    dam: i32,
    launched: bool,
    ctx: &mut CombatContext,
) -> (i32, MsgType) {
    let cfg = ctx.constants.ranged_critical.clone();
    let kind = if launched {
        CritSkill::Launched
    } else {
        CritSkill::Thrown
    };
    roll_critical(&cfg, kind, p, target, weight, plus, dam, ctx)
}

/// Verb for a plain melee hit
pub fn melee_verb(weapon: Option<&Object>) -> &'static str {
    match weapon {
        None => "punch",
        Some(w) if w.name.contains("Whip") => "whip",
        Some(w) => match w.tval {
            TVal::Sword | TVal::Polearm => "slash",
            TVal::Hafted => "bash",
            _ => "hit",
        },
    }
}

/// Verb for a missile hitting, by how it was sent
pub fn ranged_verb(launcher: Option<&Object>) -> &'static str {
    match launcher.map(|l| l.tval) {
        Some(TVal::Sling) => "smacks",
        Some(TVal::Bow) => "pierces",
        Some(TVal::Crossbow) => "punctures",
        _ => "hits",
    }
}
