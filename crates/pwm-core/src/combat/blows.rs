//! Blows of shapechanged players
//!
//! A player in monster form with no weapon fights with the form's own
//! blow table. Each blow effect is handled by [`blow_profile`], which says
//! how the damage is delivered and what rides along with it.

use super::effects::SideEffects;
use super::element::Projection;
use crate::consts::MAX_BLOW_AC;
use crate::monster::{BlowEffect, MonsterBlow};
use crate::player::{Player, PlayerFlags};
use crate::rng::GameRng;

/// How one kind of monster blow lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlowProfile {
    /// Damage is elemental and goes through resistances
    pub elem: Option<Projection>,
    pub effects: SideEffects,
    /// Armour soaks part of the damage
    pub armour_soaks: bool,
    /// Dice of experience drained from player victims
    pub exp_drain: i32,
    /// Can shake the dungeon on a heavy hit
    pub quake: bool,
}

impl BlowProfile {
    const fn physical() -> Self {
        Self {
            elem: None,
            effects: SideEffects::empty(),
            armour_soaks: true,
            exp_drain: 0,
            quake: false,
        }
    }

    const fn element(elem: Projection) -> Self {
        Self {
            elem: Some(elem),
            armour_soaks: false,
            ..Self::physical()
        }
    }

    const fn with_effects(mut self, effects: SideEffects) -> Self {
        self.effects = effects;
        self
    }

    const fn draining(dice: i32) -> Self {
        Self {
            exp_drain: dice,
            ..Self::physical()
        }
    }
}

/// Delivery of a monster blow effect
pub const fn blow_profile(effect: BlowEffect) -> BlowProfile {
    match effect {
        BlowEffect::None => BlowProfile {
            armour_soaks: false,
            ..BlowProfile::physical()
        },
        BlowEffect::Hurt
        | BlowEffect::DrainCharges
        | BlowEffect::EatGold
        | BlowEffect::EatItem
        | BlowEffect::EatFood
        | BlowEffect::EatLight
        | BlowEffect::LoseStr
        | BlowEffect::LoseAll
        | BlowEffect::DrainMana => BlowProfile::physical(),
        BlowEffect::Poison => BlowProfile::element(Projection::Pois).with_effects(SideEffects::POISON),
        BlowEffect::Disease => BlowProfile::physical().with_effects(SideEffects::POISON),
        BlowEffect::Disenchant => BlowProfile::element(Projection::Disen),
        BlowEffect::Acid => BlowProfile::element(Projection::Acid),
        BlowEffect::Elec => BlowProfile::element(Projection::Elec),
        BlowEffect::Fire => BlowProfile::element(Projection::Fire),
        BlowEffect::Cold => BlowProfile::element(Projection::Cold),
        BlowEffect::Time => BlowProfile::element(Projection::Time),
        BlowEffect::Blind => BlowProfile::physical().with_effects(SideEffects::BLIND),
        BlowEffect::Confuse => BlowProfile::physical().with_effects(SideEffects::CONFUSE),
        BlowEffect::Terrify => BlowProfile::physical().with_effects(SideEffects::FEAR),
        BlowEffect::Paralyze => BlowProfile::physical().with_effects(SideEffects::PARALYZE),
        BlowEffect::Hallu => BlowProfile::physical().with_effects(SideEffects::HALLU),
        BlowEffect::Shatter => BlowProfile {
            quake: true,
            ..BlowProfile::physical()
        },
        BlowEffect::Exp10 => BlowProfile::draining(10),
        BlowEffect::Exp20 => BlowProfile::draining(20),
        BlowEffect::Exp40 => BlowProfile::draining(40),
        BlowEffect::Exp80 => BlowProfile::draining(80),
        BlowEffect::DrainLife => BlowProfile::draining(40).with_effects(SideEffects::LEECH),
    }
}

/// Blow the form uses for the `index`th attack of a round
pub fn poly_blow(p: &Player, index: usize) -> Option<MonsterBlow> {
    if p.weapon().is_some() {
        return None;
    }
    p.poly_race.as_ref()?.blow(index).copied()
}

/// Armour class reduction of a physical blow against a player
pub fn armour_soak(dam: i32, ac: i32) -> i32 {
    dam - dam * ac.clamp(0, MAX_BLOW_AC) / 400
}

/// Drain experience from a player hit by a draining blow
///
/// Hold life saves most of the time. Returns the experience lost.
pub fn drain_exp(q: &mut Player, dice: i32, rng: &mut GameRng) -> i32 {
    if dice <= 0 {
        return 0;
    }
    if q.state.flags.contains(PlayerFlags::HOLD_LIFE) && rng.randint0(100) < 95 {
        q.msg("You feel your life force draining away, but keep hold of it!");
        return 0;
    }
    let amount = rng.damroll(dice, 6) + q.exp / 100;
    let before = q.exp;
    q.lose_exp(amount);
    q.msg("You feel your life draining away!");
    before - q.exp
}
