//! End-to-end combat scenarios

use pwm_core::combat::{
    ItemRef, Projection, adjust_dam, chance_of_melee_hit, do_cmd_fire, hit_chance, py_attack,
    test_hit,
};
use pwm_core::dungeon::{Chunk, Loc};
use pwm_core::monster::MonsterRace;
use pwm_core::object::{Object, ObjectFlags, TVal};
use pwm_core::player::{ClassId, Player, PlayerId, PlayerTimed, RaceId};
use pwm_core::{Aspect, CombatConstants, CombatContext, GameRng, World};

#[test]
fn unarmed_novice_hits_as_often_as_predicted() {
    let p = Player::new(PlayerId(1), "Novice", RaceId::Human, ClassId::Warrior, 1);
    let skill = chance_of_melee_hit(&p, None, true);
    let predicted = hit_chance(skill, 0).as_fraction();

    let mut rng = GameRng::new(2024);
    let trials = 20_000;
    let hits = (0..trials).filter(|_| test_hit(skill, 0, &mut rng)).count();
    let observed = hits as f64 / trials as f64;
    assert!((observed - predicted).abs() < 0.02, "observed {observed}, predicted {predicted}");
}

#[test]
fn floored_skill_against_light_armour() {
    assert_eq!(hit_chance(9, 10).numerator, 3966);
    assert_eq!(hit_chance(0, 10), hit_chance(9, 10));
    assert_eq!(hit_chance(-25, 10), hit_chance(9, 10));

    let predicted = hit_chance(9, 10).as_fraction();
    let trials = 10_000;
    for skill in [9, 0, -25] {
        let mut rng = GameRng::new(77);
        let hits = (0..trials).filter(|_| test_hit(skill, 10, &mut rng)).count();
        let observed = hits as f64 / trials as f64;
        assert!((observed - predicted).abs() < 0.02, "skill {skill}: observed {observed}");
    }
}

#[test]
fn clumsy_novice_punches_an_armoured_lizard() {
    let mut chunk = Chunk::walled(8, 8);
    let mut p = Player::new(PlayerId(1), "Novice", RaceId::Human, ClassId::Mage, 1);
    p.grid = Loc::new(3, 3);
    p.state.skills.to_hit_melee = 0;
    p.state.to_h = 0;
    p.state.num_blows = 100;
    let id = chunk.add_player(p);
    chunk.add_monster(MonsterRace::new("rock lizard", 1, 10, 1_000_000), Loc::new(4, 3));

    let mut ctx = CombatContext::new(2025);
    let (mut blows, mut hits) = (0, 0);
    for _ in 0..10_000 {
        let outcome = py_attack(&mut chunk, id, Loc::new(4, 3), &mut ctx);
        blows += outcome.blows;
        hits += outcome.hits;
    }
    assert_eq!(blows, 10_000);
    let observed = hits as f64 / blows as f64;
    let predicted = hit_chance(9, 10).as_fraction();
    assert!((observed - predicted).abs() < 0.02, "observed {observed}, predicted {predicted}");
}

#[test]
fn narrow_escape_then_cooldown() {
    let mut ctx = CombatContext::new(5);
    let mut p = Player::new(PlayerId(1), "Pippin", RaceId::Hobbit, ClassId::Rogue, 10);
    let full = p.chp;

    let dealt = adjust_dam(Some(&mut p), Projection::Mana, 5000, Aspect::Randomise, 0, &mut ctx);
    assert_eq!(dealt, full - 1);
    assert_eq!(p.last_message(), Some("You barely escape a deadly blow!"));
    assert_eq!(
        p.timed(PlayerTimed::NarrowEscape),
        ctx.constants.narrow_escape_cooldown
    );

    p.chp = p.mhp;
    let dealt = adjust_dam(Some(&mut p), Projection::Mana, 5000, Aspect::Randomise, 0, &mut ctx);
    assert_eq!(dealt, 5000);
}

#[test]
fn form_without_light_sensitivity_ignores_light_weak() {
    let mut ctx = CombatContext::new(6);
    let mut p = Player::new(PlayerId(1), "Beorn", RaceId::Human, ClassId::Druid, 30);
    p.poly_race = Some(MonsterRace::new("bear", 20, 30, 100));
    assert_eq!(adjust_dam(Some(&mut p), Projection::LightWeak, 40, Aspect::Randomise, 0, &mut ctx), 0);
}

#[test]
fn magic_ammo_survives_a_long_fight() {
    let mut chunk = Chunk::walled(20, 11);
    let mut p = Player::new(PlayerId(1), "Bard", RaceId::Human, ClassId::Ranger, 35);
    p.grid = Loc::new(2, 5);
    p.wield_bow(Object::new(TVal::Bow, "Yew Bow").with_multiplier(3));
    p.quiver.push(
        Object::new(TVal::Arrow, "Black Arrow")
            .with_dice(3, 6)
            .with_flags(ObjectFlags::AMMO_MAGIC),
    );
    let id = chunk.add_player(p);
    chunk.add_monster(MonsterRace::new("dragon", 40, 60, 3000), Loc::new(8, 5));
    let mut ctx = CombatContext::new(7);

    for _ in 0..50 {
        do_cmd_fire(&mut chunk, id, ItemRef::Quiver(0), Loc::new(8, 5), &mut ctx);
    }
    let p = chunk.player(id).unwrap();
    assert_eq!(p.quiver.len(), 1);
    assert_eq!(p.quiver[0].number, 1);
    assert!(chunk.objects.is_empty());
}

#[test]
fn duel_to_the_death() {
    let mut chunk = Chunk::walled(10, 10);
    let mut p = Player::new(PlayerId(1), "Turin", RaceId::Human, ClassId::Warrior, 30);
    p.grid = Loc::new(4, 4);
    p.wield(Object::new(TVal::Sword, "Long Sword").with_dice(2, 5).with_bonus(5, 5));
    let id = chunk.add_player(p);
    let orc = chunk.add_monster(MonsterRace::new("cave orc", 7, 36, 60), Loc::new(5, 4));

    let mut world = World::new(CombatContext::with_constants(CombatConstants::default(), 8), chunk);
    let mut rounds = 0;
    while world.chunk.monster(orc).is_some() && rounds < 200 {
        py_attack(&mut world.chunk, id, Loc::new(5, 4), &mut world.ctx);
        world.tick();
        rounds += 1;
    }
    assert!(world.chunk.monster(orc).is_none());
    let p = world.chunk.player(id).unwrap();
    assert!(p.messages().iter().any(|m| m.text.starts_with("You slash the cave orc.")));
}
