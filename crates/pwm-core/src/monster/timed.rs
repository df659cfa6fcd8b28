//! Monster timed effects
//!
//! Every increase goes through [`mon_inc_timed`], which applies flag
//! immunities and the level saving throw.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use super::monst::Monster;
use super::race::MonsterRaceFlags;
use crate::rng::GameRng;

/// Timed effects a monster can suffer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum MonTimed {
    Sleep = 0,
    Stun,
    Conf,
    Fear,
    Slow,
    Hold,
    Blind,
    Poison,
    Bleed,
}

pub const MON_TMD_MAX: usize = MonTimed::COUNT;

/// How a new timer combines with a running one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stacking {
    /// Keep the running timer
    No,
    /// Add to it
    Incr,
    /// Keep whichever is longer
    Max,
}

impl MonTimed {
    const fn stacking(self) -> Stacking {
        match self {
            MonTimed::Sleep | MonTimed::Hold => Stacking::No,
            MonTimed::Stun => Stacking::Max,
            _ => Stacking::Incr,
        }
    }

    pub const fn max_timer(self) -> i32 {
        match self {
            MonTimed::Sleep | MonTimed::Fear => 10_000,
            _ => 50,
        }
    }

    /// Race flag granting outright immunity
    pub fn immunity(self) -> MonsterRaceFlags {
        match self {
            MonTimed::Sleep => MonsterRaceFlags::NO_SLEEP,
            MonTimed::Stun => MonsterRaceFlags::NO_STUN,
            MonTimed::Conf => MonsterRaceFlags::NO_CONF,
            MonTimed::Fear => MonsterRaceFlags::NO_FEAR,
            MonTimed::Slow => MonsterRaceFlags::NO_SLOW,
            MonTimed::Hold => MonsterRaceFlags::NO_HOLD,
            MonTimed::Blind => MonsterRaceFlags::empty(),
            MonTimed::Poison => MonsterRaceFlags::IM_POIS,
            MonTimed::Bleed => MonsterRaceFlags::UNDEAD | MonsterRaceFlags::NONLIVING,
        }
    }

    /// Damage-over-time effects skip the level save
    const fn level_save(self) -> bool {
        !matches!(self, MonTimed::Poison | MonTimed::Bleed)
    }

    const fn on_begin(self) -> &'static str {
        match self {
            MonTimed::Sleep => "falls asleep.",
            MonTimed::Stun => "is dazed.",
            MonTimed::Conf => "looks confused.",
            MonTimed::Fear => "flees in terror!",
            MonTimed::Slow => "starts moving slower.",
            MonTimed::Hold => "is held in place.",
            MonTimed::Blind => "is blinded.",
            MonTimed::Poison => "is poisoned.",
            MonTimed::Bleed => "is bleeding.",
        }
    }

    const fn on_increase(self) -> &'static str {
        match self {
            MonTimed::Stun => "is more dazed.",
            MonTimed::Conf => "looks more confused.",
            MonTimed::Fear => "is more scared.",
            MonTimed::Slow => "is slowed further.",
            MonTimed::Poison => "is more poisoned.",
            MonTimed::Bleed => "is bleeding more strongly.",
            _ => "is unaffected.",
        }
    }

    /// Note shown when the effect wears off
    pub const fn on_end(self) -> &'static str {
        match self {
            MonTimed::Sleep => "wakes up.",
            MonTimed::Stun => "is no longer dazed.",
            MonTimed::Conf => "is no longer confused.",
            MonTimed::Fear => "recovers its courage.",
            MonTimed::Slow => "speeds up.",
            MonTimed::Hold => "can move again.",
            MonTimed::Blind => "can see again.",
            MonTimed::Poison => "is no longer poisoned.",
            MonTimed::Bleed => "stops bleeding.",
        }
    }
}

bitflags! {
    /// Options for [`mon_inc_timed`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MonTimedFlags: u8 {
        /// Produce a note for the message batch
        const NOTIFY = 0x01;
        /// Skip immunities and saving throws
        const NOFAIL = 0x02;
        /// Never produce a note
        const NOMESSAGE = 0x04;
    }
}

/// Result of trying to change a monster timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TimedResult {
    Applied,
    Resisted,
    Immune,
    Unchanged,
}

/// Result plus the note to batch, if one was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedChange {
    pub result: TimedResult,
    pub note: Option<&'static str>,
}

impl TimedChange {
    pub fn is_applied(&self) -> bool {
        self.result == TimedResult::Applied
    }
}

/// Level saving throw; uniques get two tries
fn does_resist(mon: &Monster, timer: i32, rng: &mut GameRng) -> bool {
    let resist_chance = mon.level() + 40 - timer / 2;
    if rng.randint0(100) < resist_chance {
        return true;
    }
    mon.race.is_unique() && rng.randint0(100) < resist_chance
}

/// Increase a monster timer
pub fn mon_inc_timed(
    mon: &mut Monster,
    effect: MonTimed,
    timer: i32,
    flags: MonTimedFlags,
    rng: &mut GameRng,
) -> TimedChange {
    let wants_note =
        flags.contains(MonTimedFlags::NOTIFY) && !flags.contains(MonTimedFlags::NOMESSAGE);
    let change = |result: TimedResult, note: &'static str| TimedChange {
        result,
        note: wants_note.then_some(note),
    };

    if timer <= 0 {
        return TimedChange {
            result: TimedResult::Unchanged,
            note: None,
        };
    }

    if !flags.contains(MonTimedFlags::NOFAIL) {
        if mon.race.flags.intersects(effect.immunity()) {
            tracing::trace!(monster = %mon.race.name, %effect, "immune to timed effect");
            return change(TimedResult::Immune, "is unaffected!");
        }
        if effect.level_save() && does_resist(mon, timer, rng) {
            tracing::trace!(monster = %mon.race.name, %effect, "resisted timed effect");
            return change(TimedResult::Resisted, "is unaffected.");
        }
    }

    let old = mon.timed(effect);
    let new = match effect.stacking() {
        Stacking::No if old > 0 => {
            return TimedChange {
                result: TimedResult::Unchanged,
                note: None,
            };
        }
        Stacking::No => timer,
        Stacking::Incr => old + timer,
        Stacking::Max => old.max(timer),
    }
    .min(effect.max_timer());

    if new == old {
        return TimedChange {
            result: TimedResult::Unchanged,
            note: None,
        };
    }

    mon.timed[effect as usize] = new;
    let note = if old == 0 {
        effect.on_begin()
    } else {
        effect.on_increase()
    };
    change(TimedResult::Applied, note)
}

/// Decrease a monster timer; returns the end note if it ran out
pub fn mon_dec_timed(mon: &mut Monster, effect: MonTimed, amount: i32) -> Option<&'static str> {
    let old = mon.timed(effect);
    if old <= 0 || amount <= 0 {
        return None;
    }
    let new = (old - amount).max(0);
    mon.timed[effect as usize] = new;
    (new == 0).then(|| effect.on_end())
}

/// Clear a monster timer outright
pub fn mon_clear_timed(mon: &mut Monster, effect: MonTimed) -> Option<&'static str> {
    let old = mon.timed(effect);
    mon_dec_timed(mon, effect, old)
}
