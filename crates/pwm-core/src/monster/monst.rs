//! Monster instances

use serde::{Deserialize, Serialize};

use super::race::{MonsterRace, MonsterRaceFlags};
use super::timed::{MON_TMD_MAX, MonTimed, MonTimedFlags, mon_inc_timed};
use crate::dungeon::Loc;
use crate::rng::GameRng;

/// Unique identifier for monster instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

/// What happened to a monster after taking damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageOutcome {
    pub killed: bool,
    /// The blow scared it into fleeing
    pub fear: bool,
}

/// A live monster on a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub race: MonsterRace,
    pub grid: Loc,
    pub hp: i32,
    pub maxhp: i32,
    pub timed: [i32; MON_TMD_MAX],
    /// Currently seen by the attacker
    pub visible: bool,
}

impl Monster {
    pub fn new(id: MonsterId, race: MonsterRace, grid: Loc) -> Self {
        let hp = race.hp.max(1);
        Self {
            id,
            race,
            grid,
            hp,
            maxhp: hp,
            timed: [0; MON_TMD_MAX],
            visible: true,
        }
    }

    pub fn timed(&self, effect: MonTimed) -> i32 {
        self.timed[effect as usize]
    }

    pub fn level(&self) -> i32 {
        self.race.level
    }

    pub fn is_asleep(&self) -> bool {
        self.timed(MonTimed::Sleep) > 0
    }

    pub fn is_afraid(&self) -> bool {
        self.timed(MonTimed::Fear) > 0
    }

    pub fn is_dead(&self) -> bool {
        self.hp < 0
    }

    /// Confused, held, afraid, stunned or blind
    pub fn is_debuffed(&self) -> bool {
        [
            MonTimed::Conf,
            MonTimed::Hold,
            MonTimed::Fear,
            MonTimed::Stun,
            MonTimed::Blind,
        ]
        .iter()
        .any(|&t| self.timed(t) > 0)
    }

    /// Name for messages, e.g. "the cave orc" or "Grip, Farmer Maggot's Dog"
    pub fn name(&self) -> String {
        if self.race.is_unique() {
            self.race.name.clone()
        } else {
            format!("the {}", self.race.name)
        }
    }

    /// Capitalised name for the start of a sentence
    pub fn name_cap(&self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => name,
        }
    }

    /// Death message suffix
    pub fn death_note(&self) -> &'static str {
        if self.race.is_living() {
            "dies."
        } else {
            "is destroyed."
        }
    }

    /// Restore hit points, capped at the maximum
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount.max(0)).min(self.maxhp);
    }

    /// Apply damage, waking the monster and possibly scaring it
    ///
    /// The monster dies once its hit points drop below zero.
    pub fn take_hit(&mut self, dam: i32, rng: &mut GameRng) -> DamageOutcome {
        if dam <= 0 {
            return DamageOutcome::default();
        }

        self.timed[MonTimed::Sleep as usize] = 0;
        self.timed[MonTimed::Hold as usize] = 0;
        self.hp -= dam;

        if self.is_dead() {
            tracing::debug!(monster = %self.race.name, dam, "monster killed");
            return DamageOutcome {
                killed: true,
                fear: false,
            };
        }

        let fear = self.scared_by_damage(dam, rng);
        DamageOutcome {
            killed: false,
            fear,
        }
    }

    /// Hurt monsters may panic, more so after big hits
    fn scared_by_damage(&mut self, dam: i32, rng: &mut GameRng) -> bool {
        if self.is_afraid() || self.race.has(MonsterRaceFlags::NO_FEAR) {
            return false;
        }

        let percentage = 100 * self.hp.max(0) / self.maxhp.max(1);
        let low_hp = rng.randint1(10) >= percentage;
        let big_hit = dam >= self.hp && rng.randint0(100) < 80;
        if !low_hp && !big_hit {
            return false;
        }

        let bonus = if big_hit && percentage > 7 {
            20
        } else {
            (11 - percentage) * 5
        };
        let timer = rng.randint1(10) + bonus;
        mon_inc_timed(
            self,
            MonTimed::Fear,
            timer,
            MonTimedFlags::NOFAIL | MonTimedFlags::NOMESSAGE,
            rng,
        )
        .is_applied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orc() -> Monster {
        let race = MonsterRace::new("cave orc", 7, 36, 20)
            .with_flags(MonsterRaceFlags::ORC | MonsterRaceFlags::EVIL);
        Monster::new(MonsterId(1), race, Loc::new(5, 5))
    }

    #[test]
    fn test_names() {
        let mon = orc();
        assert_eq!(mon.name(), "the cave orc");
        assert_eq!(mon.name_cap(), "The cave orc");
        assert_eq!(mon.death_note(), "dies.");
    }

    #[test]
    fn test_take_hit_kills_below_zero() {
        let mut rng = GameRng::new(1);
        let mut mon = orc();
        let outcome = mon.take_hit(20, &mut rng);
        assert!(!outcome.killed);
        assert_eq!(mon.hp, 0);
        let outcome = mon.take_hit(1, &mut rng);
        assert!(outcome.killed);
        assert!(mon.is_dead());
    }

    #[test]
    fn test_take_hit_wakes() {
        let mut rng = GameRng::new(1);
        let mut mon = orc();
        mon.timed[MonTimed::Sleep as usize] = 50;
        mon.take_hit(1, &mut rng);
        assert!(!mon.is_asleep());
    }

    #[test]
    fn test_near_death_panics() {
        let mut rng = GameRng::new(3);
        let mut mon = orc();
        // At zero hp the low-health roll cannot fail
        let outcome = mon.take_hit(20, &mut rng);
        assert!(outcome.fear);
        assert!(mon.is_afraid());
    }

    #[test]
    fn test_fearless_never_panics() {
        let mut rng = GameRng::new(3);
        let mut mon = orc();
        mon.race.flags |= MonsterRaceFlags::NO_FEAR;
        assert!(!mon.take_hit(19, &mut rng).fear);
    }

    #[test]
    fn test_debuffed() {
        let mut mon = orc();
        assert!(!mon.is_debuffed());
        mon.timed[MonTimed::Stun as usize] = 3;
        assert!(mon.is_debuffed());
    }
}
