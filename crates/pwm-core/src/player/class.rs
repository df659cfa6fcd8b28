//! Player classes

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

bitflags! {
    /// Class features that change combat rules
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClassFlags: u16 {
        /// Fumbles launched missiles at low level
        const BAD_SHOOTER = 0x0001;
        /// Fumbles throwing weapons at low level
        const CLUMSY = 0x0002;
        /// Throwing weapons gain might with level
        const THROWING_MASTERY = 0x0004;
        /// Unarmed criticals stun
        const MARTIAL_ARTS = 0x0008;
    }
}

/// Base skills and their growth per ten levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSkills {
    pub melee: (i32, i32),
    pub bow: (i32, i32),
    pub throw: (i32, i32),
    pub save: (i32, i32),
}

/// Player class, resolved once when the character is loaded
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[repr(u8)]
pub enum ClassId {
    #[default]
    Warrior = 0,
    Mage,
    Druid,
    Priest,
    Necromancer,
    Paladin,
    Rogue,
    Ranger,
    Blackguard,
    Monk,
    Unbeliever,
    Inquisitor,
}

impl ClassId {
    pub fn flags(self) -> ClassFlags {
        match self {
            ClassId::Mage | ClassId::Necromancer => ClassFlags::BAD_SHOOTER | ClassFlags::CLUMSY,
            ClassId::Druid => ClassFlags::BAD_SHOOTER,
            ClassId::Priest => ClassFlags::CLUMSY,
            ClassId::Rogue => ClassFlags::THROWING_MASTERY,
            ClassId::Monk => ClassFlags::MARTIAL_ARTS,
            _ => ClassFlags::empty(),
        }
    }

    pub fn has(self, flag: ClassFlags) -> bool {
        self.flags().contains(flag)
    }

    pub const fn skills(self) -> ClassSkills {
        let (melee, bow, throw, save) = match self {
            ClassId::Warrior => ((70, 45), (55, 45), (55, 45), (18, 10)),
            ClassId::Mage => ((30, 15), (20, 15), (20, 15), (36, 30)),
            ClassId::Druid => ((35, 15), (20, 15), (50, 30), (30, 30)),
            ClassId::Priest => ((35, 20), (20, 20), (20, 20), (30, 30)),
            ClassId::Necromancer => ((30, 15), (20, 15), (20, 15), (36, 30)),
            ClassId::Paladin => ((65, 35), (40, 30), (40, 30), (25, 15)),
            ClassId::Rogue => ((35, 30), (66, 30), (66, 40), (30, 25)),
            ClassId::Ranger => ((56, 30), (72, 45), (56, 45), (30, 20)),
            ClassId::Blackguard => ((65, 40), (20, 15), (40, 30), (20, 10)),
            ClassId::Monk => ((65, 50), (30, 20), (40, 35), (30, 20)),
            ClassId::Unbeliever => ((70, 45), (50, 40), (55, 45), (40, 30)),
            ClassId::Inquisitor => ((60, 40), (40, 30), (40, 30), (30, 25)),
        };
        ClassSkills {
            melee,
            bow,
            throw,
            save,
        }
    }
}
