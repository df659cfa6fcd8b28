//! Object instances

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::brand::{Brand, Slay};

/// Object type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TVal {
    #[default]
    Junk = 0,
    Shot,
    Arrow,
    Bolt,
    Sling,
    Bow,
    Crossbow,
    Digging,
    Hafted,
    Polearm,
    Sword,
    Mstaff,
    Boots,
    Gloves,
    Helm,
    Shield,
    Cloak,
    SoftArmour,
    HardArmour,
    Flask,
    Potion,
    Food,
    Light,
}

impl TVal {
    pub const fn is_ammo(self) -> bool {
        matches!(self, TVal::Shot | TVal::Arrow | TVal::Bolt)
    }

    pub const fn is_launcher(self) -> bool {
        matches!(self, TVal::Sling | TVal::Bow | TVal::Crossbow)
    }

    /// Edged weapons and ammo can cut
    pub const fn is_sharp(self) -> bool {
        matches!(self, TVal::Sword | TVal::Polearm | TVal::Arrow | TVal::Bolt)
    }

    /// Blunt weapons and ammo can stun
    pub const fn is_blunt(self) -> bool {
        matches!(
            self,
            TVal::Hafted | TVal::Mstaff | TVal::Digging | TVal::Shot
        )
    }

    /// Ammo fired by this launcher
    pub const fn ammo(self) -> Option<TVal> {
        match self {
            TVal::Sling => Some(TVal::Shot),
            TVal::Bow => Some(TVal::Arrow),
            TVal::Crossbow => Some(TVal::Bolt),
            _ => None,
        }
    }

    /// Percent chance to break on a hit
    pub const fn base_breakage(self) -> i32 {
        match self {
            TVal::Flask | TVal::Potion | TVal::Food => 100,
            TVal::Light => 50,
            TVal::Arrow => 35,
            TVal::Shot | TVal::Bolt => 25,
            TVal::Junk => 50,
            _ => 10,
        }
    }

    /// Default weight, in tenth-pounds
    const fn base_weight(self) -> i32 {
        match self {
            TVal::Shot => 4,
            TVal::Arrow => 2,
            TVal::Bolt => 3,
            TVal::Sling => 5,
            TVal::Bow => 30,
            TVal::Crossbow => 110,
            TVal::Flask | TVal::Potion => 10,
            TVal::Sword => 130,
            TVal::Hafted | TVal::Polearm | TVal::Digging => 150,
            TVal::Mstaff => 50,
            _ => 20,
        }
    }
}

bitflags! {
    /// Object property flags (OF_*)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ObjectFlags: u32 {
        /// Balanced for throwing
        const THROWING = 0x0001;
        /// Bursts on impact
        const EXPLODE = 0x0002;
        /// Conjured ammo, never used up
        const AMMO_MAGIC = 0x0004;
        /// Hits hard enough to shake the ground
        const IMPACT = 0x0008;
        /// Passes through targets
        const PIERCE = 0x0010;
        const IGNORE_ACID = 0x0020;
    }
}

impl Serialize for ObjectFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ObjectFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(ObjectFlags::from_bits_truncate(bits))
    }
}

/// Object instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    pub tval: TVal,
    pub dd: i32,
    pub ds: i32,
    pub to_h: i32,
    pub to_d: i32,
    pub ac: i32,
    pub to_a: i32,
    /// Weight in tenth-pounds
    pub weight: i32,
    /// Stack size
    pub number: i32,
    /// Launcher multiplier
    pub pmult: i32,
    /// Percent chance to break on a hit
    pub break_perc: i32,
    pub flags: ObjectFlags,
    pub brands: Vec<Brand>,
    pub slays: Vec<Slay>,
    pub artifact: bool,
    pub ego: bool,
}

impl Object {
    pub fn new(tval: TVal, name: &str) -> Self {
        Self {
            name: name.to_string(),
            tval,
            dd: 1,
            ds: 1,
            to_h: 0,
            to_d: 0,
            ac: 0,
            to_a: 0,
            weight: tval.base_weight(),
            number: 1,
            pmult: if tval.is_launcher() { 2 } else { 0 },
            break_perc: tval.base_breakage(),
            flags: ObjectFlags::empty(),
            brands: Vec::new(),
            slays: Vec::new(),
            artifact: false,
            ego: false,
        }
    }

    pub fn with_dice(mut self, dd: i32, ds: i32) -> Self {
        self.dd = dd;
        self.ds = ds;
        self
    }

    pub fn with_bonus(mut self, to_h: i32, to_d: i32) -> Self {
        self.to_h = to_h;
        self.to_d = to_d;
        self
    }

    pub fn with_armour(mut self, ac: i32, to_a: i32) -> Self {
        self.ac = ac;
        self.to_a = to_a;
        self
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_number(mut self, number: i32) -> Self {
        self.number = number;
        self
    }

    pub fn with_multiplier(mut self, pmult: i32) -> Self {
        self.pmult = pmult;
        self
    }

    pub fn with_flags(mut self, flags: ObjectFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_brand(mut self, brand: Brand) -> Self {
        self.brands.push(brand);
        self
    }

    pub fn with_slay(mut self, slay: Slay) -> Self {
        self.slays.push(slay);
        self
    }

    pub fn artifact(mut self) -> Self {
        self.artifact = true;
        self
    }

    pub fn has(&self, flag: ObjectFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_ammo(&self) -> bool {
        self.tval.is_ammo()
    }

    pub fn is_launcher(&self) -> bool {
        self.tval.is_launcher()
    }

    pub fn is_throwing_weapon(&self) -> bool {
        self.has(ObjectFlags::THROWING)
    }

    /// Can be fired from `launcher`
    pub fn fits(&self, launcher: &Object) -> bool {
        launcher.tval.ammo() == Some(self.tval)
    }

    /// A single item split off the stack
    pub fn split_one(&self) -> Object {
        let mut one = self.clone();
        one.number = 1;
        one
    }

    /// Name with article, for messages
    pub fn display_name(&self) -> String {
        if self.artifact {
            format!("the {}", self.name)
        } else {
            let article = match self.name.chars().next() {
                Some(c) if "aeiouAEIOU".contains(c) => "an",
                _ => "a",
            };
            format!("{article} {}", self.name)
        }
    }
}
