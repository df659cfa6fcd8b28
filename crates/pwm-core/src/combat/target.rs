//! The victim of an attack

use crate::monster::Monster;
use crate::player::Player;

/// A monster or a player on the receiving end of an attack
#[derive(Debug)]
pub enum Target<'a> {
    Monster(&'a mut Monster),
    Player(&'a mut Player),
}

impl Target<'_> {
    /// Name for messages, e.g. "the cave orc" or "Boromir"
    pub fn name(&self) -> String {
        match self {
            Target::Monster(mon) => mon.name(),
            Target::Player(q) => q.name.clone(),
        }
    }

    pub fn ac(&self) -> i32 {
        match self {
            Target::Monster(mon) => mon.race.ac,
            Target::Player(q) => q.state.ac + q.state.to_a,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Target::Monster(mon) => mon.visible,
            Target::Player(_) => true,
        }
    }

    pub fn is_debuffed(&self) -> bool {
        match self {
            Target::Monster(mon) => mon.is_debuffed(),
            Target::Player(q) => q.is_debuffed(),
        }
    }

    pub fn is_living(&self) -> bool {
        match self {
            Target::Monster(mon) => mon.race.is_living(),
            Target::Player(q) => q.is_living(),
        }
    }

    pub fn is_dead(&self) -> bool {
        match self {
            Target::Monster(mon) => mon.is_dead(),
            Target::Player(q) => q.is_dead,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Target::Player(_))
    }
}
