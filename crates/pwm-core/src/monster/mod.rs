//! Monsters
//!
//! Race templates, live instances, timed effects and pain narration.

mod monst;
mod pain;
mod race;
pub mod timed;

pub use monst::{DamageOutcome, Monster, MonsterId};
pub use pain::pain_note;
pub use race::{BlowEffect, BlowMethod, MonsterBlow, MonsterRace, MonsterRaceFlags};
pub use timed::{MonTimed, MonTimedFlags, TimedChange, TimedResult, mon_dec_timed, mon_inc_timed};
