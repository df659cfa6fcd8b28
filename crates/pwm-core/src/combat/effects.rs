//! Side effects of a landed blow
//!
//! [`determine_side_effects`] works out what a blow is eligible for;
//! [`apply_side_effects`] then rolls each effect against the target.
//! Monsters get a saving throw through `mon_inc_timed`, players are
//! protected by their intrinsics and, against fear, their saving throw.

use bitflags::bitflags;

use super::element::Projection;
use super::messages::{MonsterMessages, MsgType};
use super::target::Target;
use crate::monster::{MonTimed, MonTimedFlags, Monster, MonsterRaceFlags, mon_inc_timed};
use crate::object::{AttackModifier, Object};
use crate::player::{ClassFlags, ClassId, Player, PlayerTimed, RaceId, player_clear_timed, player_inc_timed};
use crate::rng::GameRng;
use crate::world::CombatContext;

bitflags! {
    /// Side effects a blow can carry
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SideEffects: u16 {
        const POISON = 0x0001;
        const CUT = 0x0002;
        const STUN = 0x0004;
        const CONFUSE = 0x0008;
        const BLIND = 0x0010;
        const PARALYZE = 0x0020;
        const FEAR = 0x0040;
        const SLOW = 0x0080;
        const LEECH = 0x0100;
        const HALLU = 0x0200;
    }
}

/// What actually happened to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LandedEffects {
    pub effects: SideEffects,
    /// Hit points the attacker drained
    pub leeched: i32,
}

/// Where a life drain comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeechSource {
    /// Vampiric strike buff
    Vampiric,
    /// Vampire race
    Race,
    /// Unbelievers feed on spellcasters
    Unbeliever,
    /// Inquisitors feed on the fear of lesser foes
    Inquisitor,
}

impl LeechSource {
    const fn divisor(self) -> i32 {
        match self {
            LeechSource::Vampiric => 1,
            LeechSource::Race => 4,
            LeechSource::Unbeliever | LeechSource::Inquisitor => 2,
        }
    }

    /// Powerful monsters can shrug off everything but the buff
    const fn blockable(self) -> bool {
        !matches!(self, LeechSource::Vampiric)
    }
}

/// The drain `p` would get from hitting `target`, if any
pub fn leech_source(p: &Player, target: &Target<'_>) -> Option<LeechSource> {
    if !target.is_living() {
        return None;
    }
    if p.has_timed(PlayerTimed::AttVamp) {
        return Some(LeechSource::Vampiric);
    }
    if p.race == RaceId::Vampire {
        return Some(LeechSource::Race);
    }
    let Target::Monster(mon) = target else {
        return None;
    };
    match p.class {
        ClassId::Unbeliever if mon.race.is_spellcaster() => Some(LeechSource::Unbeliever),
        ClassId::Inquisitor if mon.is_afraid() && !mon.race.is_unique() => Some(LeechSource::Inquisitor),
        _ => None,
    }
}

/// Work out which side effects a blow is eligible for
///
/// `msg` is the message type of the blow, so critical tiers can be read
/// off it. A confusing touch is used up here.
pub fn determine_side_effects(
    p: &mut Player,
    weapon: Option<&Object>,
    modifier: &AttackModifier,
    msg: MsgType,
    target: &Target<'_>,
    ctx: &mut CombatContext,
) -> SideEffects {
    let mut effects = SideEffects::empty();

    if modifier.brand == Some(Projection::Pois) {
        effects |= SideEffects::POISON;
    }

    let tier = msg.crit_tier();
    match weapon {
        Some(w) if tier >= 2 && w.tval.is_sharp() => effects |= SideEffects::CUT,
        Some(w) if tier >= 2 && w.tval.is_blunt() => effects |= SideEffects::STUN,
        None if tier > 0 && p.class.has(ClassFlags::MARTIAL_ARTS) => effects |= SideEffects::STUN,
        _ => {}
    }

    if p.has_timed(PlayerTimed::AttConf) {
        player_clear_timed(p, PlayerTimed::AttConf, true);
        effects |= SideEffects::CONFUSE;
    } else if p.has_timed(PlayerTimed::ConfusingStance) && ctx.rng.magik(p.lev) {
        effects |= SideEffects::CONFUSE;
    }

    if p.has_timed(PlayerTimed::IcyAura) {
        effects |= SideEffects::SLOW;
    }

    if leech_source(p, target).is_some() {
        effects |= SideEffects::LEECH;
    }

    effects
}

/// Keep at most one of cut and stun
pub fn exclude_cut_and_stun(effects: &mut SideEffects, rng: &mut GameRng) {
    if effects.contains(SideEffects::CUT | SideEffects::STUN) {
        if rng.one_in(2) {
            effects.remove(SideEffects::CUT);
        } else {
            effects.remove(SideEffects::STUN);
        }
    }
}

/// Monster timer each side effect raises
const MONSTER_TIMERS: [(SideEffects, MonTimed); 9] = [
    (SideEffects::POISON, MonTimed::Poison),
    (SideEffects::CUT, MonTimed::Bleed),
    (SideEffects::STUN, MonTimed::Stun),
    (SideEffects::CONFUSE, MonTimed::Conf),
    (SideEffects::HALLU, MonTimed::Conf),
    (SideEffects::BLIND, MonTimed::Blind),
    (SideEffects::FEAR, MonTimed::Fear),
    (SideEffects::PARALYZE, MonTimed::Hold),
    (SideEffects::SLOW, MonTimed::Slow),
];

/// Player timer each side effect raises
const PLAYER_TIMERS: [(SideEffects, PlayerTimed); 9] = [
    (SideEffects::POISON, PlayerTimed::Poisoned),
    (SideEffects::CUT, PlayerTimed::Cut),
    (SideEffects::STUN, PlayerTimed::Stun),
    (SideEffects::CONFUSE, PlayerTimed::Confused),
    (SideEffects::HALLU, PlayerTimed::Image),
    (SideEffects::BLIND, PlayerTimed::Blind),
    (SideEffects::FEAR, PlayerTimed::Afraid),
    (SideEffects::PARALYZE, PlayerTimed::Paralyzed),
    (SideEffects::SLOW, PlayerTimed::Slow),
];

fn monster_duration(timed: MonTimed, lev: i32, mon: &Monster, dmg: i32, rng: &mut GameRng) -> Option<i32> {
    let dmg = dmg.max(1);
    let timer = match timed {
        MonTimed::Poison | MonTimed::Bleed => 5 + rng.randint1(dmg),
        MonTimed::Stun => 5 + rng.randint1(5),
        MonTimed::Conf | MonTimed::Blind | MonTimed::Fear => 10 + rng.randint0(lev) / 10,
        MonTimed::Hold => 3 + rng.randint1(5),
        MonTimed::Slow => {
            if !mon.race.can_be_crippled() || rng.randint1(mon.level().max(1)) > dmg {
                return None;
            }
            2
        }
        MonTimed::Sleep => return None,
    };
    Some(timer)
}

fn apply_to_monster(
    effects: SideEffects,
    lev: i32,
    mon: &mut Monster,
    dmg: i32,
    batch: &mut MonsterMessages,
    rng: &mut GameRng,
) -> SideEffects {
    let mut landed = SideEffects::empty();
    for (effect, timed) in MONSTER_TIMERS {
        if !effects.contains(effect) {
            continue;
        }
        let Some(timer) = monster_duration(timed, lev, mon, dmg, rng) else {
            continue;
        };
        let change = mon_inc_timed(mon, timed, timer, MonTimedFlags::NOTIFY, rng);
        if let Some(note) = change.note {
            batch.add_note(mon, note);
        }
        if change.is_applied() {
            landed |= effect;
        }
    }
    landed
}

/// Timer for a player side effect; `None` when the victim saves
fn player_duration(timed: PlayerTimed, lev: i32, q: &mut Player, dmg: i32, rng: &mut GameRng) -> Option<i32> {
    let timer = match timed {
        PlayerTimed::Poisoned => 10 + rng.randint1(dmg.max(1)),
        // Cuts and stuns scale with the damage taken
        PlayerTimed::Cut => dmg.max(1) / 2 + rng.randint1(10),
        PlayerTimed::Stun => (dmg / 5).max(1) + rng.randint1(5),
        PlayerTimed::Confused | PlayerTimed::Image => 3 + rng.randint1(lev),
        PlayerTimed::Blind => 10 + rng.randint1(lev),
        PlayerTimed::Paralyzed => (3 + rng.randint1(lev)).min(10),
        PlayerTimed::Slow => 2,
        PlayerTimed::Afraid => {
            if rng.randint0(100) < q.state.skills.save {
                q.msg("You stand your ground!");
                return None;
            }
            3 + rng.randint1(lev)
        }
        _ => return None,
    };
    Some(timer)
}

fn apply_to_player(effects: SideEffects, lev: i32, q: &mut Player, dmg: i32, rng: &mut GameRng) -> SideEffects {
    let mut landed = SideEffects::empty();
    let lev = lev.max(1);
    for (effect, timed) in PLAYER_TIMERS {
        if !effects.contains(effect) {
            continue;
        }
        let Some(timer) = player_duration(timed, lev, q, dmg, rng) else {
            continue;
        };
        if player_inc_timed(q, timed, timer, true, true) {
            landed |= effect;
        }
    }
    landed
}

/// Drain life from a blow that dealt `dealt` damage
fn apply_leech(p: &mut Player, source: LeechSource, target: &Target<'_>, dealt: i32, circle: bool, rng: &mut GameRng) -> i32 {
    if let Target::Monster(mon) = target {
        if source.blockable() && mon.race.has(MonsterRaceFlags::POWERFUL) && rng.one_in(2) {
            return 0;
        }
    }

    let mut amount = dealt.max(0) / source.divisor();
    if circle {
        amount /= 2;
    }
    if amount <= 0 {
        return 0;
    }

    let before = p.chp;
    p.heal(amount);
    let healed = p.chp - before;
    if healed > 0 {
        p.msg("You feel life flow into you.");
    }
    tracing::trace!(?source, amount, healed, "life leech");
    healed
}

/// Roll every eligible side effect against `target`
///
/// `base_dam` drives effect durations, `dealt` is what the target actually
/// lost and sizes any life drain. Circle attacks drain half as much. Notes
/// about monsters go into `batch`.
pub fn apply_side_effects(
    p: &mut Player,
    target: &mut Target<'_>,
    effects: SideEffects,
    base_dam: i32,
    dealt: i32,
    circle: bool,
    batch: &mut MonsterMessages,
    ctx: &mut CombatContext,
) -> LandedEffects {
    let mut effects = effects;
    exclude_cut_and_stun(&mut effects, &mut ctx.rng);

    let mut landed = LandedEffects::default();
    if target.is_dead() {
        return landed;
    }

    let lev = p.lev;
    landed.effects = match target {
        Target::Monster(mon) => apply_to_monster(effects, lev, mon, base_dam, batch, &mut ctx.rng),
        Target::Player(q) => apply_to_player(effects, lev, q, base_dam, &mut ctx.rng),
    };

    if effects.contains(SideEffects::LEECH) {
        if let Some(source) = leech_source(p, target) {
            landed.leeched = apply_leech(p, source, target, dealt, circle, &mut ctx.rng);
            if landed.leeched > 0 {
                landed.effects |= SideEffects::LEECH;
            }
        }
    }

    if !landed.effects.is_empty() {
        tracing::debug!(target = %target.name(), effects = ?landed.effects, "side effects landed");
    }
    landed
}
