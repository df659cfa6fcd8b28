//! Monster races: flags, blow tables and the data the combat code reads

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::rng::RandomValue;

bitflags! {
    /// Race flags (RF_*)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MonsterRaceFlags: u64 {
        const UNIQUE = 1 << 0;
        const MALE = 1 << 1;
        const FEMALE = 1 << 2;
        const POWERFUL = 1 << 3;
        const NEVER_BLOW = 1 << 4;
        const NEVER_MOVE = 1 << 5;

        // Kind of creature
        const EVIL = 1 << 8;
        const ANIMAL = 1 << 9;
        const ORC = 1 << 10;
        const TROLL = 1 << 11;
        const GIANT = 1 << 12;
        const DRAGON = 1 << 13;
        const DEMON = 1 << 14;
        const UNDEAD = 1 << 15;
        const NONLIVING = 1 << 16;
        const METAL = 1 << 17;

        // Body plan, used by slowing blows
        const HUMANOID = 1 << 20;
        const HAS_LEGS = 1 << 21;

        // Vulnerabilities
        const HURT_LIGHT = 1 << 24;
        const HURT_ROCK = 1 << 25;
        const HURT_FIRE = 1 << 26;
        const HURT_COLD = 1 << 27;

        // Immunities
        const IM_ACID = 1 << 32;
        const IM_ELEC = 1 << 33;
        const IM_FIRE = 1 << 34;
        const IM_COLD = 1 << 35;
        const IM_POIS = 1 << 36;
        const IM_NETHER = 1 << 37;
        const IM_WATER = 1 << 38;
        const IM_PLASMA = 1 << 39;
        const IM_NEXUS = 1 << 40;
        const IM_DISEN = 1 << 41;

        // Status protections
        const NO_FEAR = 1 << 48;
        const NO_STUN = 1 << 49;
        const NO_CONF = 1 << 50;
        const NO_SLEEP = 1 << 51;
        const NO_HOLD = 1 << 52;
        const NO_SLOW = 1 << 53;
    }
}

impl Serialize for MonsterRaceFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MonsterRaceFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u64::deserialize(deserializer)?;
        Ok(MonsterRaceFlags::from_bits_truncate(bits))
    }
}

/// How a monster blow is delivered
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[repr(u8)]
#[strum(serialize_all = "UPPERCASE")]
pub enum BlowMethod {
    #[default]
    Hit = 0,
    Touch,
    Punch,
    Kick,
    Claw,
    Bite,
    Sting,
    Butt,
    Crush,
    Engulf,
    Crawl,
    Drool,
    Spit,
    Gaze,
    Wail,
    Spore,
    Beg,
    Insult,
    Moan,
}

impl BlowMethod {
    /// Verb used when a polymorphed player lands this blow
    pub const fn verb(self) -> &'static str {
        match self {
            BlowMethod::Hit => "hit",
            BlowMethod::Touch => "touch",
            BlowMethod::Punch => "punch",
            BlowMethod::Kick => "kick",
            BlowMethod::Claw => "claw",
            BlowMethod::Bite => "bite",
            BlowMethod::Sting => "sting",
            BlowMethod::Butt => "butt",
            BlowMethod::Crush => "crush",
            BlowMethod::Engulf => "engulf",
            BlowMethod::Crawl => "crawl on",
            BlowMethod::Drool => "drool on",
            BlowMethod::Spit => "spit on",
            BlowMethod::Gaze => "gaze at",
            BlowMethod::Wail => "wail at",
            BlowMethod::Spore => "release spores at",
            BlowMethod::Beg => "beg",
            BlowMethod::Insult => "insult",
            BlowMethod::Moan => "moan at",
        }
    }

    /// Whether a critical with this method can cut
    pub const fn can_cut(self) -> bool {
        matches!(
            self,
            BlowMethod::Hit | BlowMethod::Claw | BlowMethod::Bite | BlowMethod::Sting
        )
    }

    /// Whether a critical with this method can stun
    pub const fn can_stun(self) -> bool {
        matches!(
            self,
            BlowMethod::Hit
                | BlowMethod::Punch
                | BlowMethod::Kick
                | BlowMethod::Butt
                | BlowMethod::Crush
        )
    }

    /// Methods that never deal damage on their own
    pub const fn is_harmless(self) -> bool {
        matches!(self, BlowMethod::Beg | BlowMethod::Insult | BlowMethod::Moan)
    }
}

/// What a monster blow does on contact
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[repr(u8)]
#[strum(serialize_all = "UPPERCASE")]
pub enum BlowEffect {
    None = 0,
    #[default]
    Hurt,
    Poison,
    Disenchant,
    DrainCharges,
    EatGold,
    EatItem,
    EatFood,
    EatLight,
    Acid,
    Elec,
    Fire,
    Cold,
    Blind,
    Confuse,
    Terrify,
    Paralyze,
    LoseStr,
    LoseAll,
    Shatter,
    Exp10,
    Exp20,
    Exp40,
    Exp80,
    Disease,
    Time,
    DrainLife,
    DrainMana,
    Hallu,
}

/// One entry of a race's blow table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterBlow {
    pub method: BlowMethod,
    pub effect: BlowEffect,
    pub dice: RandomValue,
}

impl MonsterBlow {
    pub const fn new(method: BlowMethod, effect: BlowEffect, dice: RandomValue) -> Self {
        Self {
            method,
            effect,
            dice,
        }
    }
}

/// Static data for one kind of monster
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonsterRace {
    pub name: String,
    pub level: i32,
    pub ac: i32,
    /// Average hit points
    pub hp: i32,
    pub flags: MonsterRaceFlags,
    pub blows: Vec<MonsterBlow>,
    /// One in `spell_freq` turns is spent casting; 0 never casts
    pub spell_freq: i32,
}

impl MonsterRace {
    pub fn new(name: &str, level: i32, ac: i32, hp: i32) -> Self {
        Self {
            name: name.to_string(),
            level,
            ac,
            hp,
            ..Default::default()
        }
    }

    pub fn with_flags(mut self, flags: MonsterRaceFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_blow(mut self, method: BlowMethod, effect: BlowEffect, dice: RandomValue) -> Self {
        self.blows.push(MonsterBlow::new(method, effect, dice));
        self
    }

    pub fn with_spell_freq(mut self, freq: i32) -> Self {
        self.spell_freq = freq;
        self
    }

    pub fn has(&self, flag: MonsterRaceFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_unique(&self) -> bool {
        self.has(MonsterRaceFlags::UNIQUE)
    }

    /// Undead, demons and nonliving things have no life to drain
    pub fn is_living(&self) -> bool {
        !self
            .flags
            .intersects(MonsterRaceFlags::UNDEAD | MonsterRaceFlags::NONLIVING | MonsterRaceFlags::DEMON)
    }

    pub fn is_spellcaster(&self) -> bool {
        self.spell_freq > 0
    }

    /// Can be slowed by a crippling blow
    pub fn can_be_crippled(&self) -> bool {
        !self.has(MonsterRaceFlags::NEVER_MOVE)
            && self
                .flags
                .intersects(MonsterRaceFlags::HUMANOID | MonsterRaceFlags::HAS_LEGS)
    }

    /// Blow at `index`, cycling through the table
    pub fn blow(&self, index: usize) -> Option<&MonsterBlow> {
        if self.blows.is_empty() {
            return None;
        }
        self.blows.get(index % self.blows.len())
    }
}
