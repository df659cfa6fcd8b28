//! Projection types and the element data table
//!
//! The first [`ELEM_MAX`] projections are elements a player can resist;
//! the rest are special attacks that only some creatures are susceptible
//! to.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString};

use crate::rng::RandomValue;

/// What a hit or spell is made of (PROJ_*)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    EnumCount,
)]
#[repr(u8)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Projection {
    Acid = 0,
    Elec,
    Fire,
    Cold,
    Pois,
    Light,
    Dark,
    Sound,
    Shard,
    Nexus,
    Nether,
    Chaos,
    Disen,
    Water,
    Ice,
    Gravity,
    Inertia,
    Force,
    Time,
    Plasma,
    Meteor,
    Missile,
    Mana,
    HolyOrb,
    Arrow,

    // Not resistable
    LightWeak,
    DarkWeak,
    KillWall,
    DispEvil,
    DispUndead,
    DrainLife,
    DrainHealth,
    PsiDrain,
    Shot,
    Bolt,
    Boulder,
}

/// Number of resistable elements
pub const ELEM_MAX: usize = Projection::Arrow as usize + 1;

/// Static data for one projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementInfo {
    /// Resisted damage is multiplied by `numerator / denominator` per
    /// resist level
    pub numerator: i32,
    pub denominator: RandomValue,
    /// Breath damage is monster hp divided by this
    pub divisor: i32,
    /// Most damage a breath of this element can do
    pub damage_cap: i32,
}

const fn entry(numerator: i32, denominator: RandomValue, divisor: i32, damage_cap: i32) -> ElementInfo {
    ElementInfo {
        numerator,
        denominator,
        divisor,
        damage_cap,
    }
}

const THIRD: RandomValue = RandomValue::fixed(3);
const HALF: RandomValue = RandomValue::fixed(2);
const WHOLE: RandomValue = RandomValue::fixed(1);
const SIX_D6: RandomValue = RandomValue::new(6, 1, 6);

impl Projection {
    /// Slot in the player's resistance table, for resistable elements
    pub fn elem_index(self) -> Option<usize> {
        let idx = self as usize;
        (idx < ELEM_MAX).then_some(idx)
    }

    pub const fn info(self) -> ElementInfo {
        match self {
            Projection::Acid | Projection::Elec | Projection::Fire | Projection::Cold => {
                entry(1, THIRD, 3, 1600)
            }
            Projection::Pois => entry(1, THIRD, 3, 800),
            Projection::Light | Projection::Dark => entry(4, SIX_D6, 6, 400),
            Projection::Sound => entry(5, SIX_D6, 6, 500),
            Projection::Shard => entry(6, SIX_D6, 6, 500),
            Projection::Nexus => entry(6, SIX_D6, 6, 400),
            Projection::Nether => entry(6, SIX_D6, 6, 550),
            Projection::Chaos | Projection::Disen => entry(6, SIX_D6, 6, 500),
            Projection::Water => entry(1, WHOLE, 6, 250),
            Projection::Ice => entry(1, WHOLE, 6, 700),
            Projection::Gravity => entry(1, WHOLE, 3, 200),
            Projection::Inertia | Projection::Force => entry(1, WHOLE, 6, 200),
            Projection::Time => entry(1, HALF, 3, 150),
            Projection::Plasma => entry(1, WHOLE, 6, 150),
            Projection::Mana => entry(1, WHOLE, 3, 1600),
            _ => entry(1, WHOLE, 1, 0),
        }
    }

    /// Physical projectiles halved by biofeedback
    pub const fn is_physical_projectile(self) -> bool {
        matches!(
            self,
            Projection::Missile
                | Projection::Arrow
                | Projection::Shot
                | Projection::Bolt
                | Projection::Boulder
                | Projection::Shard
                | Projection::Sound
        )
    }

    /// Missiles a reflective stance deflects
    pub const fn is_deflectable(self) -> bool {
        matches!(
            self,
            Projection::Missile | Projection::Shot | Projection::Arrow | Projection::Bolt
        )
    }
}
