//! Property tests for the arithmetic at the heart of combat

use proptest::prelude::*;
use strum::IntoEnumIterator;

use pwm_core::combat::{
    Projection, SideEffects, adjust_dam, breakage_chance, exclude_cut_and_stun, hit_chance,
    scale_by_resist,
};
use pwm_core::object::{Object, TVal};
use pwm_core::{ALWAYS_HIT, ALWAYS_MISS, Aspect, CombatContext, GameRng, HUNDRED_PCT};

fn projections() -> impl Strategy<Value = Projection> {
    let all: Vec<Projection> = Projection::iter().collect();
    proptest::sample::select(all)
}

fn missile_tvals() -> impl Strategy<Value = TVal> {
    proptest::sample::select(vec![
        TVal::Shot,
        TVal::Arrow,
        TVal::Bolt,
        TVal::Flask,
        TVal::Potion,
        TVal::Light,
        TVal::Sword,
        TVal::Junk,
    ])
}

proptest! {
    #[test]
    fn hit_chance_stays_in_bounds(to_hit in -100i32..5000, ac in -50i32..1000) {
        let chance = hit_chance(to_hit, ac);
        prop_assert_eq!(chance.denominator, HUNDRED_PCT);
        prop_assert!(chance.numerator >= ALWAYS_HIT);
        prop_assert!(chance.numerator <= HUNDRED_PCT - ALWAYS_MISS);
    }

    #[test]
    fn hit_chance_falls_with_armour(to_hit in 0i32..3000, ac in 0i32..800, extra in 0i32..200) {
        prop_assert!(hit_chance(to_hit, ac).numerator >= hit_chance(to_hit, ac + extra).numerator);
    }

    #[test]
    fn hit_chance_rises_with_skill(to_hit in 0i32..3000, ac in 0i32..800, extra in 0i32..200) {
        prop_assert!(hit_chance(to_hit + extra, ac).numerator >= hit_chance(to_hit, ac).numerator);
    }

    #[test]
    fn artifacts_never_break(tval in missile_tvals(), hit in any::<bool>()) {
        let obj = Object::new(tval, "Relic").artifact();
        prop_assert_eq!(breakage_chance(&obj, hit), 0);
    }

    #[test]
    fn misses_break_less(tval in missile_tvals()) {
        let obj = Object::new(tval, "Missile");
        let on_hit = breakage_chance(&obj, true);
        prop_assert_eq!(breakage_chance(&obj, false), on_hit * on_hit / 100);
    }

    #[test]
    fn no_damage_stays_no_damage(
        proj in projections(),
        dam in -100i32..=0,
        resist in -1i32..=3,
        seed in any::<u64>(),
    ) {
        let mut ctx = CombatContext::new(seed);
        prop_assert_eq!(adjust_dam(None, proj, dam, Aspect::Randomise, resist, &mut ctx), 0);
    }

    #[test]
    fn adjusted_damage_is_never_negative(
        proj in projections(),
        dam in 1i32..2000,
        resist in -1i32..=3,
        seed in any::<u64>(),
    ) {
        let mut ctx = CombatContext::new(seed);
        prop_assert!(adjust_dam(None, proj, dam, Aspect::Randomise, resist, &mut ctx) >= 0);
    }

    #[test]
    fn resistance_never_increases_damage(dam in 0i32..5000, resist in 0i32..=3, den in 1i32..12) {
        prop_assert!(scale_by_resist(dam, 1, den, resist) <= dam);
    }

    #[test]
    fn cut_and_stun_never_both_survive(seed in any::<u64>(), extra in 0u16..0x400) {
        let mut rng = GameRng::new(seed);
        let mut effects = SideEffects::CUT | SideEffects::STUN | SideEffects::from_bits_truncate(extra);
        exclude_cut_and_stun(&mut effects, &mut rng);
        prop_assert!(!effects.contains(SideEffects::CUT | SideEffects::STUN));
        prop_assert!(effects.intersects(SideEffects::CUT | SideEffects::STUN));
    }
}

#[test]
fn double_resistance_truncates_each_step() {
    assert_eq!(scale_by_resist(7, 2, 3, 2), 2);
    assert_eq!(7 * 4 / 9, 3);
}
