//! Firing and throwing
//!
//! [`ranged_helper`] flies a number of missiles from one stack along a
//! projection path. Each missile may pierce several targets, bounce off
//! metal monsters, and then breaks or lands near where it stopped. What
//! happens to monsters is collected and narrated once at the end.

use serde::{Deserialize, Serialize};

use super::critical::{critical_shot, ranged_verb};
use super::damage::{breakage_chance, pvp_scale, ranged_damage};
use super::effects::{SideEffects, apply_side_effects};
use super::element::Projection;
use super::hit::{chance_of_missile_hit, test_hit};
use super::messages::{MonsterMessages, MsgType, damage_suffix};
use super::resist::{adjust_dam, monster_resist_level};
use super::target::Target;
use crate::consts::{BOW_BRAND_BALL_RADIUS, MOVE_ENERGY};
use crate::dungeon::{Actor, Chunk, Loc, PathFlags, distance, project_path};
use crate::monster::MonsterRaceFlags;
use crate::object::{Object, ObjectFlags, improve_attack_modifier};
use crate::player::{BowBrand, PlayerId, PlayerTimed, player_clear_timed};
use crate::rng::Aspect;
use crate::world::CombatContext;

/// Where the missiles come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemRef {
    Quiver(usize),
    Inventory(usize),
}

/// Fired from a launcher or thrown by hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangedKind {
    Fire,
    Throw,
}

/// Totals for one fire or throw command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangedOutcome {
    pub shots: i32,
    pub hits: i32,
    pub damage: i32,
    pub kills: i32,
    /// Missiles bounced off metal monsters
    pub reflected: i32,
    pub broken: i32,
    pub dropped: i32,
    /// Energy spent
    pub energy: i32,
}

#[derive(Debug, Clone, Copy, Default)]
struct Strike {
    hit: bool,
    dmg: i32,
    killed: bool,
}

/// Take one missile off the stack
///
/// Magic ammo is copied rather than removed. The flag is set when the
/// stack ran out and its slot is gone.
fn take_missile(chunk: &mut Chunk, shooter: PlayerId, item: ItemRef) -> Option<(Object, bool)> {
    let p = chunk.player_mut(shooter)?;
    let (stack, idx) = match item {
        ItemRef::Quiver(idx) => (&mut p.quiver, idx),
        ItemRef::Inventory(idx) => (&mut p.inventory, idx),
    };
    let obj = stack.get_mut(idx)?;
    if obj.number <= 0 {
        return None;
    }

    let missile = obj.split_one();
    if obj.has(ObjectFlags::AMMO_MAGIC) {
        return Some((missile, false));
    }
    obj.number -= 1;
    let exhausted = obj.number == 0;
    if exhausted {
        stack.remove(idx);
    }
    Some((missile, exhausted))
}

/// Decide whether the missile will interact with what stands on `grid`
///
/// Returns false for players out of reach of PvP and for missiles that
/// bounce off a metal hide.
fn engage(
    chunk: &mut Chunk,
    shooter: PlayerId,
    victim: Actor,
    missile: &Object,
    outcome: &mut RangedOutcome,
    ctx: &mut CombatContext,
) -> bool {
    match victim {
        Actor::Player(qid) => match (chunk.player(shooter), chunk.player(qid)) {
            (Some(p), Some(q)) => p.pvx_check(q, ctx.constants.pvp_hostility),
            _ => false,
        },
        Actor::Monster(mid) => {
            let Some(mon) = chunk.monster(mid) else {
                return false;
            };
            if !mon.race.has(MonsterRaceFlags::METAL) || !ctx.rng.one_in(2) {
                return true;
            }
            let text = format!("The {} bounces off {}!", missile.name, mon.name());
            tracing::debug!(monster = %mon.race.name, "missile reflected");
            if let Some(p) = chunk.player_mut(shooter) {
                p.msg(text);
            }
            outcome.reflected += 1;
            false
        }
    }
}

/// Resolve a missile reaching `victim` on `grid`
fn strike(
    chunk: &mut Chunk,
    shooter: PlayerId,
    victim: Actor,
    grid: Loc,
    missile: &Object,
    launcher: Option<&Object>,
    batch: &mut MonsterMessages,
    ctx: &mut CombatContext,
) -> Strike {
    let Some((p, mut target)) = chunk.combatants(shooter, victim) else {
        return Strike::default();
    };
    let name = target.name();

    let chance = chance_of_missile_hit(p, missile, launcher, grid, target.is_visible());
    if !test_hit(chance, target.ac(), &mut ctx.rng) {
        p.msgt(MsgType::Miss, format!("The {} misses {name}.", missile.name));
        return Strike::default();
    }

    let launcher_brands = launcher.map(|l| l.brands.clone()).unwrap_or_default();
    let modifier = improve_attack_modifier(Some(missile), &launcher_brands, &target, "hit");
    let dmg = ranged_damage(p, missile, launcher, &modifier, ctx);
    let (mut dmg, msg) = critical_shot(p, &target, missile.weight, missile.to_h, dmg, launcher.is_some(), ctx);
    if target.is_player() {
        dmg = pvp_scale(dmg, ctx);
    }
    let dmg = dmg.max(0);

    let verb = if modifier.is_found() {
        format!("{}s", modifier.verb)
    } else {
        ranged_verb(launcher).to_string()
    };
    let kind = if msg.crit_tier() > 0 { msg } else { MsgType::Shoot };
    let crit = msg.crit_text().unwrap_or("");
    let suffix = damage_suffix(p, dmg);
    p.msgt(kind, format!("The {} {verb} {name}.{crit}{suffix}", missile.name));

    let mut result = Strike {
        hit: true,
        dmg,
        killed: false,
    };
    match &mut target {
        Target::Monster(mon) => {
            let outcome = mon.take_hit(dmg, &mut ctx.rng);
            batch.add_damage(mon, dmg);
            if outcome.killed {
                batch.mark_killed(mon);
                result.killed = true;
            } else if outcome.fear {
                batch.add_note(mon, "flees in terror!");
            }
        }
        Target::Player(q) => {
            q.msg(format!("{} shoots you.", p.name));
            if q.take_hit(dmg, &p.name) {
                p.msgt(MsgType::Kill, format!("You have slain {}.", q.name));
                result.killed = true;
            }
        }
    }

    if !result.killed && modifier.brand == Some(Projection::Pois) {
        apply_side_effects(p, &mut target, SideEffects::POISON, dmg, dmg, false, batch, ctx);
    }
    result
}

/// Burst of a ball-type bow brand around `center`
///
/// Damage falls off with distance as `(dam + d) / (d + 1)`.
fn brand_explosion(
    chunk: &mut Chunk,
    shooter: PlayerId,
    center: Loc,
    brand: BowBrand,
    batch: &mut MonsterMessages,
    ctx: &mut CombatContext,
) -> i32 {
    let victims: Vec<(Actor, i32)> = (center.y - BOW_BRAND_BALL_RADIUS..=center.y + BOW_BRAND_BALL_RADIUS)
        .flat_map(|y| {
            (center.x - BOW_BRAND_BALL_RADIUS..=center.x + BOW_BRAND_BALL_RADIUS).map(move |x| Loc::new(x, y))
        })
        .filter(|grid| chunk.is_projectable(*grid))
        .filter_map(|grid| chunk.actor_at(grid).map(|a| (a, distance(center, grid))))
        .collect();

    if let Some(p) = chunk.player_mut(shooter) {
        p.msg("The missile explodes!");
    }

    let mut total = 0;
    for (victim, dist) in victims {
        let dam = (brand.dam + dist) / (dist + 1);
        if let Actor::Player(qid) = victim {
            let allowed = match (chunk.player(shooter), chunk.player(qid)) {
                (Some(p), Some(q)) => p.pvx_check(q, ctx.constants.pvp_hostility),
                _ => false,
            };
            if !allowed {
                continue;
            }
        }
        let Some((p, mut target)) = chunk.combatants(shooter, victim) else {
            continue;
        };
        match &mut target {
            Target::Monster(mon) => {
                let resist = monster_resist_level(&mon.race, brand.elem);
                let dam = adjust_dam(None, brand.elem, dam, Aspect::Randomise, resist, ctx);
                let outcome = mon.take_hit(dam, &mut ctx.rng);
                batch.add_damage(mon, dam);
                if outcome.killed {
                    batch.mark_killed(mon);
                }
                total += dam;
            }
            Target::Player(q) => {
                let dam = adjust_dam(Some(&mut **q), brand.elem, dam, Aspect::Randomise, 0, ctx);
                let dam = pvp_scale(dam, ctx);
                q.msg(format!("You are hit by {}!", brand.elem));
                if q.take_hit(dam, &p.name) {
                    p.msgt(MsgType::Kill, format!("You have slain {}.", q.name));
                }
                total += dam;
            }
        }
    }
    total
}

/// Fly up to `shots` missiles from `item` at `target`
///
/// Every missile costs energy whether it hits or not; a miss does not end
/// the volley. A missing shooter or an empty slot does nothing.
pub fn ranged_helper(
    chunk: &mut Chunk,
    shooter: PlayerId,
    item: ItemRef,
    target: Loc,
    range: i32,
    shots: i32,
    kind: RangedKind,
    ctx: &mut CombatContext,
) -> RangedOutcome {
    let mut outcome = RangedOutcome::default();
    let Some(p) = chunk.player(shooter) else {
        return outcome;
    };
    let origin = p.grid;
    let launcher = match kind {
        RangedKind::Fire => p.bow().cloned(),
        RangedKind::Throw => None,
    };
    let energy = match kind {
        RangedKind::Fire => MOVE_ENERGY * 10 / p.state.num_shots.max(10),
        RangedKind::Throw => MOVE_ENERGY,
    };
    let piercing_buff = p.has_timed(PlayerTimed::PiercingShots);
    let pierce_budget = 1 + p.state.num_shots / 10;
    let ball = match (&launcher, p.bow_brand) {
        (Some(_), Some(brand)) if brand.ball && p.has_timed(PlayerTimed::BowBrand) => Some(brand),
        _ => None,
    };

    let mut batch = MonsterMessages::new();
    let mut last_impact = None;

    for _ in 0..shots.max(1) {
        let Some((missile, exhausted)) = take_missile(chunk, shooter, item) else {
            break;
        };
        if let Some(p) = chunk.player_mut(shooter) {
            p.energy -= energy;
        }
        outcome.shots += 1;
        outcome.energy += energy;

        let mut pierce = if piercing_buff || missile.has(ObjectFlags::PIERCE) {
            pierce_budget
        } else {
            1
        };
        let flags = if pierce > 1 {
            PathFlags::THRU
        } else {
            PathFlags::empty()
        };

        let mut landing = origin;
        let mut hit_any = false;
        for grid in project_path(chunk, range, origin, target, flags) {
            if !chunk.is_projectable(grid) {
                break;
            }
            landing = grid;

            let Some(victim) = chunk.actor_at(grid) else {
                continue;
            };
            if !engage(chunk, shooter, victim, &missile, &mut outcome, ctx) {
                continue;
            }

            let result = strike(chunk, shooter, victim, grid, &missile, launcher.as_ref(), &mut batch, ctx);
            if result.hit {
                hit_any = true;
                last_impact = Some(grid);
                outcome.hits += 1;
                outcome.damage += result.dmg;
            }
            if result.killed {
                outcome.kills += 1;
            }
            pierce -= 1;
            if pierce <= 0 {
                break;
            }
        }

        if !missile.has(ObjectFlags::AMMO_MAGIC) {
            let chance = breakage_chance(&missile, hit_any);
            if ctx.rng.randint0(100) < chance {
                outcome.broken += 1;
            } else if chunk.drop_near(missile, landing, &mut ctx.rng).is_some() {
                outcome.dropped += 1;
            }
        }

        if exhausted {
            break;
        }
    }

    if let (Some(brand), Some(center)) = (ball, last_impact) {
        outcome.damage += brand_explosion(chunk, shooter, center, brand, &mut batch, ctx);
    }

    if let Some(p) = chunk.player_mut(shooter) {
        if piercing_buff && outcome.shots > 0 {
            player_clear_timed(p, PlayerTimed::PiercingShots, true);
        }
        batch.flush(p);
    }
    let dead = chunk.reap_dead();
    outcome.kills = outcome.kills.max(dead.len() as i32);

    tracing::debug!(
        ?kind,
        shots = outcome.shots,
        hits = outcome.hits,
        damage = outcome.damage,
        broken = outcome.broken,
        "ranged attack"
    );
    outcome
}

/// Fire ammunition from the quiver with the wielded launcher
pub fn do_cmd_fire(chunk: &mut Chunk, shooter: PlayerId, item: ItemRef, target: Loc, ctx: &mut CombatContext) -> RangedOutcome {
    let Some(p) = chunk.player_mut(shooter) else {
        return RangedOutcome::default();
    };
    if p.bow().is_none() {
        p.msg("You have nothing to fire with.");
        return RangedOutcome::default();
    }
    let stack = match item {
        ItemRef::Quiver(idx) => p.quiver.get(idx),
        ItemRef::Inventory(idx) => p.inventory.get(idx),
    };
    let fits = stack.map(|ammo| p.bow().is_some_and(|bow| ammo.fits(bow)));
    match fits {
        Some(true) => {}
        Some(false) => {
            p.msg("You cannot fire that!");
            return RangedOutcome::default();
        }
        None => return RangedOutcome::default(),
    }

    let shots = (p.state.num_shots / 10).max(1);
    let range = (6 + 2 * p.state.ammo_mult).min(ctx.constants.max_range);
    ranged_helper(chunk, shooter, item, target, range, shots, RangedKind::Fire, ctx)
}

/// Throw one object from the inventory
///
/// Heavy objects do not fly far.
pub fn do_cmd_throw(chunk: &mut Chunk, shooter: PlayerId, item: ItemRef, target: Loc, ctx: &mut CombatContext) -> RangedOutcome {
    let Some(p) = chunk.player(shooter) else {
        return RangedOutcome::default();
    };
    let stack = match item {
        ItemRef::Quiver(idx) => p.quiver.get(idx),
        ItemRef::Inventory(idx) => p.inventory.get(idx),
    };
    let Some(obj) = stack else {
        return RangedOutcome::default();
    };

    let range = ((20 + p.lev / 2) * 10 / obj.weight.max(10)).clamp(1, 10);
    ranged_helper(chunk, shooter, item, target, range, 1, RangedKind::Throw, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Feature;
    use crate::monster::MonsterRace;
    use crate::object::TVal;
    use crate::player::{ClassId, Player, RaceId, player_inc_timed};
    use crate::world::PvpHostility;

    fn archer(chunk: &mut Chunk, arrows: Object) -> PlayerId {
        let mut p = Player::new(PlayerId(1), "Legolas", RaceId::HighElf, ClassId::Ranger, 30);
        p.grid = Loc::new(2, 5);
        p.wield_bow(Object::new(TVal::Bow, "Long Bow").with_multiplier(3));
        p.quiver.push(arrows);
        chunk.add_player(p)
    }

    fn arrows(number: i32) -> Object {
        Object::new(TVal::Arrow, "Arrow").with_dice(1, 9).with_number(number)
    }

    #[test]
    fn test_fire_uses_up_an_arrow() {
        let mut chunk = Chunk::walled(20, 11);
        let id = archer(&mut chunk, arrows(10));
        chunk.add_monster(MonsterRace::new("orc", 10, 0, 200), Loc::new(6, 5));
        let mut ctx = CombatContext::new(5);

        let outcome = do_cmd_fire(&mut chunk, id, ItemRef::Quiver(0), Loc::new(6, 5), &mut ctx);
        assert_eq!(outcome.shots, 1);
        assert_eq!(outcome.energy, MOVE_ENERGY);
        assert_eq!(outcome.broken + outcome.dropped, 1);
        assert_eq!(chunk.objects.len() as i32, outcome.dropped);
        let p = chunk.player(id).unwrap();
        assert_eq!(p.quiver[0].number, 9);
        assert_eq!(p.energy, -MOVE_ENERGY);
    }

    #[test]
    fn test_last_arrow_empties_slot() {
        let mut chunk = Chunk::walled(20, 11);
        let id = archer(&mut chunk, arrows(1));
        chunk.player_mut(id).unwrap().state.num_shots = 30;
        let mut ctx = CombatContext::new(6);

        let outcome = do_cmd_fire(&mut chunk, id, ItemRef::Quiver(0), Loc::new(10, 5), &mut ctx);
        assert_eq!(outcome.shots, 1);
        assert!(chunk.player(id).unwrap().quiver.is_empty());
    }

    #[test]
    fn test_magic_ammo_is_never_consumed() {
        let mut chunk = Chunk::walled(20, 11);
        let magic = arrows(1).with_flags(ObjectFlags::AMMO_MAGIC);
        let id = archer(&mut chunk, magic);
        chunk.player_mut(id).unwrap().state.num_shots = 30;
        chunk.add_monster(MonsterRace::new("orc", 10, 0, 500), Loc::new(6, 5));
        let mut ctx = CombatContext::new(7);

        let outcome = do_cmd_fire(&mut chunk, id, ItemRef::Quiver(0), Loc::new(6, 5), &mut ctx);
        assert_eq!(outcome.shots, 3);
        assert_eq!(outcome.broken + outcome.dropped, 0);
        assert!(chunk.objects.is_empty());
        assert_eq!(chunk.player(id).unwrap().quiver[0].number, 1);
    }

    #[test]
    fn test_wall_blocks_flight() {
        let mut chunk = Chunk::walled(20, 11);
        let id = archer(&mut chunk, arrows(5));
        chunk.set_feature(Loc::new(4, 5), Feature::Wall);
        let mid = chunk.add_monster(MonsterRace::new("orc", 10, 0, 30), Loc::new(6, 5));
        let mut ctx = CombatContext::new(8);

        let outcome = do_cmd_fire(&mut chunk, id, ItemRef::Quiver(0), Loc::new(6, 5), &mut ctx);
        assert_eq!(outcome.hits, 0);
        assert_eq!(chunk.monster(mid).unwrap().hp, 30);
        if outcome.dropped == 1 {
            assert!(chunk.objects[0].grid.x < 4);
        }
    }

    #[test]
    fn test_metal_monsters_reflect() {
        let mut chunk = Chunk::walled(20, 11);
        let id = archer(&mut chunk, arrows(99));
        let golem = MonsterRace::new("iron golem", 20, 0, 5000).with_flags(MonsterRaceFlags::METAL);
        chunk.add_monster(golem, Loc::new(6, 5));
        let mut ctx = CombatContext::new(9);

        let mut reflected = 0;
        for _ in 0..40 {
            reflected += do_cmd_fire(&mut chunk, id, ItemRef::Quiver(0), Loc::new(6, 5), &mut ctx).reflected;
        }
        assert!(reflected > 0);
        assert!(chunk.player(id).unwrap().messages().iter().any(|m| m.text == "The Arrow bounces off the iron golem!"));
    }

    #[test]
    fn test_piercing_reaches_second_monster() {
        let mut chunk = Chunk::walled(20, 11);
        let id = archer(&mut chunk, arrows(99).with_flags(ObjectFlags::PIERCE));
        chunk.add_monster(MonsterRace::new("orc", 10, 0, 5000), Loc::new(4, 5));
        let second = chunk.add_monster(MonsterRace::new("orc", 10, 0, 5000), Loc::new(6, 5));
        let mut ctx = CombatContext::new(10);

        for _ in 0..20 {
            do_cmd_fire(&mut chunk, id, ItemRef::Quiver(0), Loc::new(4, 5), &mut ctx);
        }
        assert!(chunk.monster(second).unwrap().hp < 5000);
    }

    #[test]
    fn test_piercing_buff_wears_off() {
        let mut chunk = Chunk::walled(20, 11);
        let id = archer(&mut chunk, arrows(5));
        player_inc_timed(chunk.player_mut(id).unwrap(), PlayerTimed::PiercingShots, 10, false, false);
        let mut ctx = CombatContext::new(11);

        do_cmd_fire(&mut chunk, id, ItemRef::Quiver(0), Loc::new(10, 5), &mut ctx);
        let p = chunk.player(id).unwrap();
        assert!(!p.has_timed(PlayerTimed::PiercingShots));
        assert_eq!(p.last_message(), Some("Your shots stop piercing."));
    }

    #[test]
    fn test_requires_matching_launcher() {
        let mut chunk = Chunk::walled(20, 11);
        let id = archer(&mut chunk, Object::new(TVal::Shot, "Iron Shot").with_number(5));
        let mut ctx = CombatContext::new(12);

        let outcome = do_cmd_fire(&mut chunk, id, ItemRef::Quiver(0), Loc::new(6, 5), &mut ctx);
        assert_eq!(outcome, RangedOutcome::default());
        assert_eq!(chunk.player(id).unwrap().last_message(), Some("You cannot fire that!"));

        chunk.player_mut(id).unwrap().equipment.bow = None;
        do_cmd_fire(&mut chunk, id, ItemRef::Quiver(0), Loc::new(6, 5), &mut ctx);
        assert_eq!(chunk.player(id).unwrap().last_message(), Some("You have nothing to fire with."));
    }

    #[test]
    fn test_stale_reference() {
        let mut chunk = Chunk::walled(20, 11);
        let id = archer(&mut chunk, arrows(5));
        let mut ctx = CombatContext::new(13);
        let outcome = ranged_helper(&mut chunk, id, ItemRef::Quiver(4), Loc::new(6, 5), 10, 1, RangedKind::Fire, &mut ctx);
        assert_eq!(outcome, RangedOutcome::default());
        assert_eq!(chunk.player(id).unwrap().energy, 0);
    }

    #[test]
    fn test_safe_pvp_arrows_pass_by() {
        let mut chunk = Chunk::walled(20, 11);
        let id = archer(&mut chunk, arrows(5));
        let mut q = Player::new(PlayerId(2), "Gimli", RaceId::Dwarf, ClassId::Warrior, 30);
        q.grid = Loc::new(6, 5);
        let qid = chunk.add_player(q);
        let mut ctx = CombatContext::new(14);
        ctx.constants.pvp_hostility = PvpHostility::Safe;

        let outcome = do_cmd_fire(&mut chunk, id, ItemRef::Quiver(0), Loc::new(6, 5), &mut ctx);
        assert_eq!(outcome.shots, 1);
        assert_eq!(outcome.hits, 0);
        let q = chunk.player(qid).unwrap();
        assert_eq!(q.chp, q.mhp);
    }

    #[test]
    fn test_throw_from_inventory() {
        let mut chunk = Chunk::walled(20, 11);
        let id = archer(&mut chunk, arrows(5));
        let dagger = Object::new(TVal::Sword, "Dagger")
            .with_dice(1, 4)
            .with_weight(12)
            .with_flags(ObjectFlags::THROWING);
        chunk.player_mut(id).unwrap().inventory.push(dagger);
        chunk.add_monster(MonsterRace::new("orc", 10, 0, 200), Loc::new(5, 5));
        let mut ctx = CombatContext::new(15);

        let outcome = do_cmd_throw(&mut chunk, id, ItemRef::Inventory(0), Loc::new(5, 5), &mut ctx);
        assert_eq!(outcome.shots, 1);
        assert_eq!(outcome.energy, MOVE_ENERGY);
        assert!(chunk.player(id).unwrap().inventory.is_empty());
        assert_eq!(outcome.broken + outcome.dropped, 1);
    }
}
