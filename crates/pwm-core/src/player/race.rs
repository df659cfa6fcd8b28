//! Player races

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Player race, resolved once when the character is loaded
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[repr(u8)]
pub enum RaceId {
    #[default]
    Human = 0,
    #[strum(serialize = "Half-Elf")]
    HalfElf,
    Elf,
    Hobbit,
    Gnome,
    Dwarf,
    #[strum(serialize = "Half-Orc")]
    HalfOrc,
    #[strum(serialize = "Half-Troll")]
    HalfTroll,
    Dunadan,
    #[strum(serialize = "High-Elf")]
    HighElf,
    Kobold,
    Yeek,
    Ent,
    Thunderlord,
    DarkElf,
    Dragon,
    Undead,
    Frostman,
    Wraith,
    Vampire,
}

impl RaceId {
    /// Takes extra damage from weak light attacks
    pub const fn light_weak(self) -> bool {
        matches!(self, RaceId::Vampire | RaceId::Undead | RaceId::Wraith)
    }

    /// Takes extra damage from weak darkness attacks
    pub const fn dark_weak(self) -> bool {
        matches!(self, RaceId::HighElf)
    }

    /// Bodies with blood to drain and flesh to poison
    pub const fn is_living(self) -> bool {
        !matches!(self, RaceId::Undead | RaceId::Wraith)
    }
}
