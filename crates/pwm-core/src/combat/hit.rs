//! Hit resolution
//!
//! Chances are fixed-point fractions over [`HUNDRED_PCT`]: a slice always
//! hits, a slice always misses, and the rest scales with how far the
//! attacker's skill exceeds two thirds of the armour class.

use crate::consts::{ALWAYS_HIT, ALWAYS_MISS, BTH_PLUS_ADJ, HUNDRED_PCT, MIN_TO_HIT};
use crate::dungeon::{Loc, distance};
use crate::object::Object;
use crate::player::Player;
use crate::rng::{GameRng, RandomChance};

/// Chance that an attack with skill `to_hit` hits armour class `ac`
pub fn hit_chance(to_hit: i32, ac: i32) -> RandomChance {
    let to_hit = to_hit.max(MIN_TO_HIT) as i64;
    let ac = ac.max(0) as i64;
    let hundred = HUNDRED_PCT as i64;

    let mut numerator = (to_hit - ac * 2 / 3).max(0) * hundred / to_hit;
    numerator = numerator * (hundred - ALWAYS_MISS as i64 - ALWAYS_HIT as i64) / hundred;
    numerator += ALWAYS_HIT as i64;

    RandomChance {
        numerator: numerator as i32,
        denominator: HUNDRED_PCT,
    }
}

/// Roll an attack with skill `to_hit` against armour class `ac`
pub fn test_hit(to_hit: i32, ac: i32, rng: &mut GameRng) -> bool {
    let chance = hit_chance(to_hit, ac);
    let hit = rng.check(chance);
    tracing::trace!(to_hit, ac, numerator = chance.numerator, hit, "hit roll");
    hit
}

/// Melee skill before visibility
pub fn chance_of_melee_hit_base(p: &Player, weapon: Option<&Object>) -> i32 {
    let bonus = p.state.to_h + weapon.map_or(0, |w| w.to_h);
    p.state.skills.to_hit_melee + bonus * BTH_PLUS_ADJ
}

/// Melee skill against a target, halved when it cannot be seen
pub fn chance_of_melee_hit(p: &Player, weapon: Option<&Object>, visible: bool) -> i32 {
    let chance = chance_of_melee_hit_base(p, weapon);
    if visible { chance } else { chance / 2 }
}

/// Missile skill before distance and visibility
///
/// Launched ammo uses bow skill with launcher and player bonuses. Throwing
/// weapons use throwing skill; anything else thrown gets half as much
/// again since it is usually aimed at the floor.
pub fn chance_of_missile_hit_base(p: &Player, missile: &Object, launcher: Option<&Object>) -> i32 {
    let bonus = missile.to_h;
    match launcher {
        Some(bow) => {
            let bonus = bonus + bow.to_h + p.state.to_h;
            p.state.skills.to_hit_bow + bonus * BTH_PLUS_ADJ
        }
        None if missile.is_throwing_weapon() => {
            let bonus = bonus + p.state.to_h;
            p.state.skills.to_hit_throw + bonus * BTH_PLUS_ADJ
        }
        None => 3 * p.state.skills.to_hit_throw / 2 + bonus * BTH_PLUS_ADJ,
    }
}

/// Missile skill against a target at `grid`
pub fn chance_of_missile_hit(
    p: &Player,
    missile: &Object,
    launcher: Option<&Object>,
    grid: Loc,
    visible: bool,
) -> i32 {
    let chance = chance_of_missile_hit_base(p, missile, launcher) - distance(p.grid, grid);
    if visible { chance } else { chance / 2 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ObjectFlags, TVal};
    use crate::player::{ClassId, PlayerId, RaceId};

    #[test]
    fn test_hit_chance_floor_values() {
        // Zero AC: full scaled chance plus the always-hit slice
        assert_eq!(hit_chance(9, 0).numerator, 10_000 - ALWAYS_MISS);
        // Hopeless: only the always-hit slice
        assert_eq!(hit_chance(9, 100).numerator, ALWAYS_HIT);
        assert_eq!(hit_chance(-50, 0), hit_chance(9, 0));
    }

    #[test]
    fn test_hit_chance_known_value() {
        // (60 - 20) / 60 of 8300, plus 1200
        assert_eq!(hit_chance(60, 30).numerator, 6666 * 8300 / 10000 + 1200);
    }

    #[test]
    fn test_melee_chance() {
        let mut p = Player::new(PlayerId(1), "Boromir", RaceId::Dunadan, ClassId::Warrior, 1);
        p.state.to_h = 2;
        let sword = Object::new(TVal::Sword, "Broad Sword").with_bonus(3, 0);
        let base = p.state.skills.to_hit_melee;
        assert_eq!(chance_of_melee_hit_base(&p, Some(&sword)), base + 15);
        assert_eq!(chance_of_melee_hit(&p, None, false), (base + 6) / 2);
    }

    #[test]
    fn test_missile_chance_paths() {
        let mut p = Player::new(PlayerId(1), "Bard", RaceId::Human, ClassId::Ranger, 10);
        p.state.to_h = 1;
        let bow = Object::new(TVal::Bow, "Long Bow").with_bonus(2, 0);
        let arrow = Object::new(TVal::Arrow, "Arrow").with_bonus(1, 0);
        let dagger = Object::new(TVal::Sword, "Dagger").with_flags(ObjectFlags::THROWING);
        let flask = Object::new(TVal::Flask, "Flask of Oil");
        let skills = p.state.skills;

        assert_eq!(chance_of_missile_hit_base(&p, &arrow, Some(&bow)), skills.to_hit_bow + 12);
        assert_eq!(chance_of_missile_hit_base(&p, &dagger, None), skills.to_hit_throw + 3);
        assert_eq!(chance_of_missile_hit_base(&p, &flask, None), 3 * skills.to_hit_throw / 2);

        p.grid = Loc::new(0, 0);
        let far = chance_of_missile_hit(&p, &arrow, Some(&bow), Loc::new(10, 0), true);
        assert_eq!(far, skills.to_hit_bow + 12 - 10);
        let unseen = chance_of_missile_hit(&p, &arrow, Some(&bow), Loc::new(10, 0), false);
        assert_eq!(unseen, far / 2);
    }
}
