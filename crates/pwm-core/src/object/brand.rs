//! Brands and slays

use serde::{Deserialize, Serialize};

use super::obj::Object;
use crate::combat::{Projection, Target};
use crate::monster::MonsterRaceFlags;

/// Elemental brand on a weapon or missile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub elem: Projection,
    pub mult: i32,
}

impl Brand {
    pub const fn new(elem: Projection, mult: i32) -> Self {
        Self { elem, mult }
    }

    /// Melee verb
    pub const fn verb(&self) -> &'static str {
        match self.elem {
            Projection::Acid => "dissolve",
            Projection::Elec => "shock",
            Projection::Fire => "burn",
            Projection::Cold => "freeze",
            Projection::Pois => "poison",
            _ => "hit",
        }
    }

    /// Race flag that shrugs off this brand
    pub fn resist_flag(&self) -> MonsterRaceFlags {
        match self.elem {
            Projection::Acid => MonsterRaceFlags::IM_ACID,
            Projection::Elec => MonsterRaceFlags::IM_ELEC,
            Projection::Fire => MonsterRaceFlags::IM_FIRE,
            Projection::Cold => MonsterRaceFlags::IM_COLD,
            Projection::Pois => MonsterRaceFlags::IM_POIS,
            _ => MonsterRaceFlags::empty(),
        }
    }

    /// Race flag that doubles this brand
    pub fn vuln_flag(&self) -> MonsterRaceFlags {
        match self.elem {
            Projection::Fire => MonsterRaceFlags::HURT_FIRE,
            Projection::Cold => MonsterRaceFlags::HURT_COLD,
            _ => MonsterRaceFlags::empty(),
        }
    }
}

/// Bonus against a kind of creature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slay {
    pub race_flag: MonsterRaceFlags,
    pub mult: i32,
}

impl Slay {
    pub const fn new(race_flag: MonsterRaceFlags, mult: i32) -> Self {
        Self { race_flag, mult }
    }

    pub const fn verb(&self) -> &'static str {
        if self.mult >= 5 { "fiercely smite" } else { "smite" }
    }
}

/// Best multiplier found for one attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackModifier {
    pub mult: i32,
    pub verb: &'static str,
    /// Element of the winning brand, if a brand won
    pub brand: Option<Projection>,
    /// A slay won
    pub slay: bool,
}

impl AttackModifier {
    pub const fn plain(verb: &'static str) -> Self {
        Self {
            mult: 1,
            verb,
            brand: None,
            slay: false,
        }
    }

    /// A brand or slay applies
    pub fn is_found(&self) -> bool {
        self.brand.is_some() || self.slay
    }
}

fn brand_mult(brand: &Brand, target: &Target<'_>) -> Option<i32> {
    match target {
        Target::Monster(mon) => {
            if mon.race.flags.intersects(brand.resist_flag()) {
                return None;
            }
            if mon.race.flags.intersects(brand.vuln_flag()) {
                Some(brand.mult * 2)
            } else {
                Some(brand.mult)
            }
        }
        Target::Player(q) => (q.res_level(brand.elem) <= 0).then_some(brand.mult),
    }
}

fn slay_applies(slay: &Slay, target: &Target<'_>) -> bool {
    match target {
        Target::Monster(mon) => mon.race.flags.intersects(slay.race_flag),
        // Players only count as a kind of creature while shapechanged
        Target::Player(q) => q
            .poly_race
            .as_ref()
            .is_some_and(|race| race.flags.intersects(slay.race_flag)),
    }
}

/// Pick the best brand or slay of `obj` (plus `extra` brands) against `target`
///
/// Ties keep the first candidate found; objects are checked before extra
/// brands.
pub fn improve_attack_modifier(
    obj: Option<&Object>,
    extra: &[Brand],
    target: &Target<'_>,
    default_verb: &'static str,
) -> AttackModifier {
    let mut best = AttackModifier::plain(default_verb);

    let obj_brands = obj.map(|o| o.brands.as_slice()).unwrap_or_default();
    for brand in obj_brands.iter().chain(extra) {
        match brand_mult(brand, target) {
            Some(mult) if mult > best.mult => {
                best = AttackModifier {
                    mult,
                    verb: brand.verb(),
                    brand: Some(brand.elem),
                    slay: false,
                };
            }
            _ => {}
        }
    }

    let obj_slays = obj.map(|o| o.slays.as_slice()).unwrap_or_default();
    for slay in obj_slays {
        if slay_applies(slay, target) && slay.mult > best.mult {
            best = AttackModifier {
                mult: slay.mult,
                verb: slay.verb(),
                brand: None,
                slay: true,
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Loc;
    use crate::monster::{Monster, MonsterId, MonsterRace};
    use crate::object::TVal;
    use crate::player::{ClassId, Player, PlayerId, RaceId};

    fn monster(flags: MonsterRaceFlags) -> Monster {
        Monster::new(
            MonsterId(1),
            MonsterRace::new("test monster", 10, 20, 30).with_flags(flags),
            Loc::new(1, 1),
        )
    }

    fn flaming_orc_bane() -> Object {
        Object::new(TVal::Sword, "Long Sword")
            .with_brand(Brand::new(Projection::Fire, 3))
            .with_slay(Slay::new(MonsterRaceFlags::ORC, 3))
            .with_slay(Slay::new(MonsterRaceFlags::DRAGON, 5))
    }

    #[test]
    fn test_no_modifier() {
        let mut mon = monster(MonsterRaceFlags::empty());
        let target = Target::Monster(&mut mon);
        let best = improve_attack_modifier(None, &[], &target, "hit");
        assert_eq!(best, AttackModifier::plain("hit"));
        assert!(!best.is_found());
    }

    #[test]
    fn test_immunity_blocks_brand() {
        let sword = flaming_orc_bane();
        let mut mon = monster(MonsterRaceFlags::IM_FIRE);
        let target = Target::Monster(&mut mon);
        let best = improve_attack_modifier(Some(&sword), &[], &target, "hit");
        assert_eq!(best.mult, 1);
    }

    #[test]
    fn test_vulnerability_doubles_brand() {
        let sword = flaming_orc_bane();
        let mut mon = monster(MonsterRaceFlags::HURT_FIRE);
        let target = Target::Monster(&mut mon);
        let best = improve_attack_modifier(Some(&sword), &[], &target, "hit");
        assert_eq!(best.mult, 6);
        assert_eq!(best.brand, Some(Projection::Fire));
        assert_eq!(best.verb, "burn");
    }

    #[test]
    fn test_best_slay_wins() {
        let sword = flaming_orc_bane();
        let mut mon = monster(MonsterRaceFlags::DRAGON);
        let target = Target::Monster(&mut mon);
        let best = improve_attack_modifier(Some(&sword), &[], &target, "hit");
        assert_eq!(best.mult, 5);
        assert!(best.slay);
        assert_eq!(best.verb, "fiercely smite");
    }

    #[test]
    fn test_extra_brand() {
        let mut mon = monster(MonsterRaceFlags::empty());
        let target = Target::Monster(&mut mon);
        let extra = [Brand::new(Projection::Pois, 3)];
        let best = improve_attack_modifier(None, &extra, &target, "punch");
        assert_eq!(best.brand, Some(Projection::Pois));
    }

    #[test]
    fn test_player_target() {
        let sword = flaming_orc_bane();
        let mut victim = Player::new(PlayerId(2), "Victim", RaceId::HalfOrc, ClassId::Warrior, 20);
        {
            let target = Target::Player(&mut victim);
            let best = improve_attack_modifier(Some(&sword), &[], &target, "hit");
            assert_eq!(best.brand, Some(Projection::Fire));
        }

        victim.state.el_info[Projection::Fire as usize] = 1;
        {
            let target = Target::Player(&mut victim);
            let best = improve_attack_modifier(Some(&sword), &[], &target, "hit");
            // Orc slays only bite while the victim is shaped like an orc
            assert_eq!(best.mult, 1);
        }

        victim.poly_race = Some(MonsterRace::new("cave orc", 7, 36, 11).with_flags(MonsterRaceFlags::ORC));
        let target = Target::Player(&mut victim);
        let best = improve_attack_modifier(Some(&sword), &[], &target, "hit");
        assert!(best.slay);
    }
}
