//! Players
//!
//! Race and class identities, derived combat state, equipment and timed
//! effects.

mod class;
mod player;
mod race;
pub mod timed;

pub use class::{ClassFlags, ClassId, ClassSkills};
pub use player::{BowBrand, Equipment, Player, PlayerFlags, PlayerId, PlayerState, Skills};
pub use race::RaceId;
pub use timed::{
    PlayerTimed, player_clear_timed, player_dec_timed, player_inc_timed, player_set_timed,
};
