//! Player timed effects
//!
//! Increases go through [`player_inc_timed`], which honours the player's
//! protections when asked to.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use super::player::{Player, PlayerFlags};
use crate::combat::Projection;

/// Timed effects on a player
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum PlayerTimed {
    Fast = 0,
    Slow,
    Blind,
    Paralyzed,
    Confused,
    Afraid,
    Image,
    Poisoned,
    Cut,
    Stun,
    /// Halves damage from physical projectiles
    Biofeedback,
    /// Halves damage from missiles and ammo
    ReflectStance,
    /// Melee blows drain life
    AttVamp,
    /// Next blow confuses
    AttConf,
    AttFire,
    AttCold,
    AttAcid,
    AttElec,
    AttPois,
    /// Melee blows slow and chill
    IcyAura,
    TouchOfDeath,
    /// Missiles carry the brand in `Player::bow_brand`
    BowBrand,
    PiercingShots,
    /// Melee blows may confuse, scaling with level
    ConfusingStance,
    /// Cooldown after surviving a lethal hit at full health
    NarrowEscape,
}

pub const TMD_MAX: usize = PlayerTimed::COUNT;

impl PlayerTimed {
    pub const fn max_timer(self) -> i32 {
        match self {
            PlayerTimed::Cut => 1000,
            PlayerTimed::Stun => 100,
            _ => 10_000,
        }
    }

    const fn on_begin(self) -> Option<&'static str> {
        let text = match self {
            PlayerTimed::Fast => "You feel yourself moving faster!",
            PlayerTimed::Slow => "You feel yourself moving slower!",
            PlayerTimed::Blind => "You are blind.",
            PlayerTimed::Paralyzed => "You are paralysed!",
            PlayerTimed::Confused => "You are confused!",
            PlayerTimed::Afraid => "You are terrified!",
            PlayerTimed::Image => "Oh, wow! Everything looks so cosmic now!",
            PlayerTimed::Poisoned => "You are poisoned!",
            PlayerTimed::Cut => "You have been given a graze.",
            PlayerTimed::Stun => "You have been stunned.",
            PlayerTimed::Biofeedback => "Your pulse quickens.",
            PlayerTimed::ReflectStance => "You take up a reflective stance.",
            PlayerTimed::AttVamp => "Your hands thirst for blood.",
            PlayerTimed::AttConf => "Your hands begin to glow.",
            PlayerTimed::AttFire => "Your hands burst into flame.",
            PlayerTimed::AttCold => "Your hands are covered in frost.",
            PlayerTimed::AttAcid => "Your hands drip with acid.",
            PlayerTimed::AttElec => "Sparks dance across your hands.",
            PlayerTimed::AttPois => "Your hands drip with venom.",
            PlayerTimed::IcyAura => "You are surrounded by an icy aura.",
            PlayerTimed::TouchOfDeath => "Your hands are imbued with death.",
            PlayerTimed::BowBrand => "Your missiles are imbued with power.",
            PlayerTimed::PiercingShots => "Your shots become piercing.",
            PlayerTimed::ConfusingStance => "You adopt a bewildering stance.",
            PlayerTimed::NarrowEscape => return None,
        };
        Some(text)
    }

    const fn on_end(self) -> Option<&'static str> {
        let text = match self {
            PlayerTimed::Fast => "You feel yourself slow down.",
            PlayerTimed::Slow => "You feel yourself speed up.",
            PlayerTimed::Blind => "You blink and your eyes clear.",
            PlayerTimed::Paralyzed => "You can move again.",
            PlayerTimed::Confused => "You feel less confused now.",
            PlayerTimed::Afraid => "You feel bolder now.",
            PlayerTimed::Image => "You can see clearly again.",
            PlayerTimed::Poisoned => "You are no longer poisoned.",
            PlayerTimed::Cut => "You are no longer bleeding.",
            PlayerTimed::Stun => "You are no longer stunned.",
            PlayerTimed::Biofeedback => "Your pulse slows to normal.",
            PlayerTimed::ReflectStance => "You leave your reflective stance.",
            PlayerTimed::AttVamp => "Your hands no longer thirst for blood.",
            PlayerTimed::AttConf => "Your hands stop glowing.",
            PlayerTimed::AttFire => "Your hands stop burning.",
            PlayerTimed::AttCold => "Your hands thaw.",
            PlayerTimed::AttAcid => "Your hands stop dripping acid.",
            PlayerTimed::AttElec => "The sparks fade.",
            PlayerTimed::AttPois => "Your hands stop dripping venom.",
            PlayerTimed::IcyAura => "The icy aura fades.",
            PlayerTimed::TouchOfDeath => "The touch of death fades.",
            PlayerTimed::BowBrand => "Your missiles lose their power.",
            PlayerTimed::PiercingShots => "Your shots stop piercing.",
            PlayerTimed::ConfusingStance => "You leave your bewildering stance.",
            PlayerTimed::NarrowEscape => return None,
        };
        Some(text)
    }

    /// Protection that blocks this effect when checks are requested
    fn is_blocked(self, p: &Player) -> bool {
        match self {
            PlayerTimed::Poisoned => p.res_level(Projection::Pois) > 0,
            PlayerTimed::Paralyzed => p.state.flags.contains(PlayerFlags::FREE_ACT),
            PlayerTimed::Confused => p.state.flags.contains(PlayerFlags::PROT_CONF),
            PlayerTimed::Blind => p.state.flags.contains(PlayerFlags::PROT_BLIND),
            PlayerTimed::Stun => p.state.flags.contains(PlayerFlags::PROT_STUN),
            PlayerTimed::Afraid => p.state.flags.contains(PlayerFlags::PROT_FEAR),
            PlayerTimed::Cut => !p.is_living(),
            _ => false,
        }
    }
}

/// Set a timer outright, announcing starts and ends if `notify`
pub fn player_set_timed(p: &mut Player, effect: PlayerTimed, v: i32, notify: bool) -> bool {
    let v = v.clamp(0, effect.max_timer());
    let old = p.timed(effect);
    if v == old {
        return false;
    }

    p.timed[effect as usize] = v;
    if notify {
        let text = match (old, v) {
            (0, _) => effect.on_begin(),
            (_, 0) => effect.on_end(),
            _ => None,
        };
        if let Some(text) = text {
            p.msg(text);
        }
    }
    if v == 0 && effect == PlayerTimed::BowBrand {
        p.bow_brand = None;
    }
    true
}

/// Increase a timer
///
/// With `check`, the player's protections may block the effect outright.
/// Paralysis never stacks. Returns whether anything changed.
pub fn player_inc_timed(p: &mut Player, effect: PlayerTimed, v: i32, notify: bool, check: bool) -> bool {
    if v <= 0 {
        return false;
    }
    if check && effect.is_blocked(p) {
        tracing::trace!(player = %p.name, %effect, "timed effect blocked");
        return false;
    }

    let old = p.timed(effect);
    if effect == PlayerTimed::Paralyzed && old > 0 {
        return false;
    }
    player_set_timed(p, effect, old + v, notify)
}

/// Decrease a timer
pub fn player_dec_timed(p: &mut Player, effect: PlayerTimed, v: i32, notify: bool) -> bool {
    let old = p.timed(effect);
    if old <= 0 || v <= 0 {
        return false;
    }
    player_set_timed(p, effect, old - v, notify)
}

pub fn player_clear_timed(p: &mut Player, effect: PlayerTimed, notify: bool) -> bool {
    player_set_timed(p, effect, 0, notify)
}
