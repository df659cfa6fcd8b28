//! Message types and the per-monster message batch
//!
//! Ranged attacks collect what happened to each monster and narrate it
//! once, after every shot has been resolved.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::monster::{Monster, MonsterId, pain_note};
use crate::player::Player;

/// Message category, used for colouring and sound on the client
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum MsgType {
    #[default]
    Generic = 0,
    Hit,
    Miss,
    HitGood,
    HitGreat,
    HitSuperb,
    HitHiGreat,
    HitHiSuperb,
    Shoot,
    Kill,
    Flee,
    Death,
}

impl MsgType {
    /// Rank of a critical hit; 0 for anything that is not one
    pub const fn crit_tier(self) -> u8 {
        match self {
            MsgType::HitGood => 1,
            MsgType::HitGreat => 2,
            MsgType::HitSuperb => 3,
            MsgType::HitHiGreat => 4,
            MsgType::HitHiSuperb => 5,
            _ => 0,
        }
    }

    /// Trailer appended to critical hit messages
    pub const fn crit_text(self) -> Option<&'static str> {
        match self {
            MsgType::HitGood => Some(" It was a good hit!"),
            MsgType::HitGreat => Some(" It was a great hit!"),
            MsgType::HitSuperb => Some(" It was a superb hit!"),
            MsgType::HitHiGreat => Some(" It was a *GREAT* hit!"),
            MsgType::HitHiSuperb => Some(" It was a *SUPERB* hit!"),
            _ => None,
        }
    }
}

/// One line of narration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MsgType,
    pub text: String,
}

/// Damage suffix when the player wants numbers
pub fn damage_suffix(p: &Player, dam: i32) -> String {
    if p.show_damage {
        format!(" ({dam})")
    } else {
        String::new()
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: MonsterId,
    name: String,
    hit: bool,
    dam: i32,
    hp_after: i32,
    killed: Option<&'static str>,
    notes: Vec<&'static str>,
}

/// Delayed messages about monsters, keyed by monster in first-hit order
#[derive(Debug, Clone, Default)]
pub struct MonsterMessages {
    entries: Vec<Entry>,
}

impl MonsterMessages {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, mon: &Monster) -> &mut Entry {
        let idx = match self.entries.iter().position(|e| e.id == mon.id) {
            Some(idx) => idx,
            None => {
                self.entries.push(Entry {
                    id: mon.id,
                    name: mon.name_cap(),
                    hit: false,
                    dam: 0,
                    hp_after: mon.hp,
                    killed: None,
                    notes: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx]
    }

    /// Record damage already applied to `mon`
    pub fn add_damage(&mut self, mon: &Monster, dam: i32) {
        let entry = self.entry(mon);
        entry.hit = true;
        entry.dam += dam.max(0);
        entry.hp_after = mon.hp;
    }

    /// Record a status note such as "is dazed."
    pub fn add_note(&mut self, mon: &Monster, note: &'static str) {
        let entry = self.entry(mon);
        if !entry.notes.contains(&note) {
            entry.notes.push(note);
        }
    }

    pub fn mark_killed(&mut self, mon: &Monster) {
        let entry = self.entry(mon);
        entry.killed = Some(mon.death_note());
        entry.hp_after = mon.hp;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Narrate everything to `p`, one pain line per monster
    pub fn flush(self, p: &mut Player) {
        for entry in self.entries {
            if let Some(note) = entry.killed {
                p.msgt(MsgType::Kill, format!("{} {}", entry.name, note));
                continue;
            }
            if entry.hit {
                let pain = pain_note(entry.hp_after, entry.dam);
                p.msg(format!("{} {}", entry.name, pain));
            }
            for note in entry.notes {
                let kind = if note == "flees in terror!" {
                    MsgType::Flee
                } else {
                    MsgType::Generic
                };
                p.msgt(kind, format!("{} {}", entry.name, note));
            }
        }
    }
}
