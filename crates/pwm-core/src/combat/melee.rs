//! Melee attacks
//!
//! [`py_attack`] spends a round of blows on one target; [`py_attack_circle`]
//! swings once at everything hostile around the player. Each blow runs the
//! whole pipeline: hit roll, damage, criticals, resistances for elemental
//! blows, side effects and narration.

use super::blows::{armour_soak, blow_profile, drain_exp, poly_blow};
use super::critical::{critical_melee, melee_verb};
use super::damage::{melee_damage, pvp_scale};
use super::effects::{SideEffects, apply_side_effects, determine_side_effects};
use super::hit::{chance_of_melee_hit, test_hit};
use super::messages::{MonsterMessages, MsgType, damage_suffix};
use super::resist::{adjust_dam, monster_resist_level};
use super::target::Target;
use crate::consts::{IMPACT_QUAKE_DAMAGE, IMPACT_QUAKE_RADIUS, MOVE_ENERGY};
use crate::dungeon::{Actor, Chunk, Loc};
use crate::object::{ObjectFlags, improve_attack_modifier};
use crate::player::PlayerId;
use crate::rng::Aspect;
use crate::world::CombatContext;

/// What a single blow did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlowResult {
    pub hit: bool,
    pub dmg: i32,
    pub killed: bool,
    /// The target panicked; the round carries on
    pub fear: bool,
    /// No further blows this round
    pub stop: bool,
}

/// Totals for a round of melee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeleeOutcome {
    pub blows: i32,
    pub hits: i32,
    pub damage: i32,
    pub kills: i32,
}

impl MeleeOutcome {
    fn record(&mut self, blow: BlowResult) {
        self.blows += 1;
        if blow.hit {
            self.hits += 1;
            self.damage += blow.dmg;
        }
        if blow.killed {
            self.kills += 1;
        }
    }
}

fn actor_name(chunk: &Chunk, actor: Actor) -> Option<String> {
    match actor {
        Actor::Monster(id) => chunk.monster(id).map(|m| m.name()),
        Actor::Player(id) => chunk.player(id).map(|q| q.name.clone()),
    }
}

/// Monsters are always fair game; players only when hostility allows
fn can_attack(chunk: &Chunk, attacker: PlayerId, victim: Actor, ctx: &CombatContext) -> bool {
    match victim {
        Actor::Monster(_) => true,
        Actor::Player(qid) => match (chunk.player(attacker), chunk.player(qid)) {
            (Some(p), Some(q)) => p.pvx_check(q, ctx.constants.pvp_hostility),
            _ => false,
        },
    }
}

/// Frightened players cannot bring themselves to attack
fn too_afraid(chunk: &mut Chunk, attacker: PlayerId, victim: Option<Actor>) -> bool {
    let name = victim.and_then(|v| actor_name(chunk, v));
    let Some(p) = chunk.player_mut(attacker) else {
        return true;
    };
    if !p.is_afraid() {
        return false;
    }
    match name {
        Some(name) => p.msg(format!("You are too afraid to attack {name}!")),
        None => p.msg("You are too afraid to attack!"),
    }
    true
}

/// Resolve one blow against `victim`
fn py_attack_real(
    chunk: &mut Chunk,
    attacker: PlayerId,
    victim: Actor,
    index: usize,
    circle: bool,
    batch: &mut MonsterMessages,
    ctx: &mut CombatContext,
) -> BlowResult {
    let Some((p, mut target)) = chunk.combatants(attacker, victim) else {
        return BlowResult {
            stop: true,
            ..Default::default()
        };
    };
    let weapon = p.weapon().cloned();
    let blow = poly_blow(p, index);
    let origin = p.grid;
    let name = target.name();

    let chance = chance_of_melee_hit(p, weapon.as_ref(), target.is_visible());
    if !test_hit(chance, target.ac(), &mut ctx.rng) {
        p.msgt(MsgType::Miss, format!("You miss {name}."));
        return BlowResult::default();
    }

    let default_verb = match &blow {
        Some(b) => b.method.verb(),
        None => melee_verb(weapon.as_ref()),
    };
    let modifier = improve_attack_modifier(weapon.as_ref(), &p.temp_brands(), &target, default_verb);

    let (mut dmg, msg) = match &blow {
        Some(b) => {
            let base = if b.method.is_harmless() {
                0
            } else {
                ctx.rng.randcalc(b.dice, Aspect::Randomise) * modifier.mult
            };
            let (dmg, msg) = critical_melee(p, &target, 0, 0, base, ctx);
            (dmg + p.state.to_d, msg)
        }
        None => melee_damage(p, weapon.as_ref(), &modifier, &target, ctx),
    };

    let mut effects = determine_side_effects(p, weapon.as_ref(), &modifier, msg, &target, ctx);
    let profile = blow.map(|b| blow_profile(b.effect));
    if let (Some(b), Some(profile)) = (&blow, &profile) {
        if msg.crit_tier() >= 2 && b.method.can_cut() {
            effects |= SideEffects::CUT;
        }
        if msg.crit_tier() >= 2 && b.method.can_stun() {
            effects |= SideEffects::STUN;
        }
        effects |= profile.effects;

        match (profile.elem, &mut target) {
            (Some(elem), Target::Monster(mon)) => {
                let resist = monster_resist_level(&mon.race, elem);
                dmg = adjust_dam(None, elem, dmg, Aspect::Randomise, resist, ctx);
            }
            (Some(elem), Target::Player(q)) => {
                dmg = adjust_dam(Some(&mut **q), elem, dmg, Aspect::Randomise, 0, ctx);
            }
            (None, Target::Player(q)) if profile.armour_soaks => {
                dmg = armour_soak(dmg, q.state.ac + q.state.to_a);
            }
            _ => {}
        }
    }

    if target.is_player() {
        dmg = pvp_scale(dmg, ctx);
    }
    let dmg = dmg.max(0);

    let kind = if msg.crit_tier() > 0 { msg } else { MsgType::Hit };
    let crit = msg.crit_text().unwrap_or("");
    let suffix = damage_suffix(p, dmg);
    p.msgt(kind, format!("You {} {name}.{crit}{suffix}", modifier.verb));

    let mut result = BlowResult {
        hit: true,
        dmg,
        ..Default::default()
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
                result.fear = true;
            }
        }
        Target::Player(q) => {
            q.msg(format!("{} hits you.", p.name));
            if q.take_hit(dmg, &p.name) {
                p.msgt(MsgType::Kill, format!("You have slain {}.", q.name));
                result.killed = true;
            } else if let Some(profile) = &profile {
                drain_exp(q, profile.exp_drain, &mut ctx.rng);
            }
        }
    }

    if !result.killed {
        apply_side_effects(p, &mut target, effects, dmg, dmg, circle, batch, ctx);
    }

    let impact = weapon.as_ref().is_some_and(|w| w.has(ObjectFlags::IMPACT))
        || profile.is_some_and(|pr| pr.quake);
    let quake = impact && !result.killed && dmg > IMPACT_QUAKE_DAMAGE;
    if quake {
        p.msg("The ground shakes!");
    }

    if quake {
        let moved = chunk.earthquake(origin, IMPACT_QUAKE_RADIUS, &mut ctx.rng);
        if let Actor::Monster(id) = victim {
            result.stop |= moved.contains(&id);
        }
    }
    result.stop |= result.killed;
    result
}

/// Narrate the batch and clear away the dead
fn finish_round(chunk: &mut Chunk, attacker: PlayerId, batch: MonsterMessages) {
    if let Some(p) = chunk.player_mut(attacker) {
        batch.flush(p);
    }
    let dead = chunk.reap_dead();
    if !dead.is_empty() {
        tracing::debug!(count = dead.len(), "monsters slain in melee");
    }
}

/// Attack whatever stands at `grid` with a full round of blows
///
/// The round ends early once the target dies, the attacker loses their
/// nerve, or an earthquake throws the target away. A panicking target keeps
/// taking blows. Costs a turn of energy whatever happens.
pub fn py_attack(chunk: &mut Chunk, attacker: PlayerId, grid: Loc, ctx: &mut CombatContext) -> MeleeOutcome {
    let mut outcome = MeleeOutcome::default();
    let Some(victim) = chunk.actor_at(grid) else {
        return outcome;
    };
    if !can_attack(chunk, attacker, victim, ctx) {
        return outcome;
    }

    let afraid = too_afraid(chunk, attacker, Some(victim));
    let Some(p) = chunk.player_mut(attacker) else {
        return outcome;
    };
    p.energy -= MOVE_ENERGY;
    if afraid {
        return outcome;
    }
    let blows = (p.state.num_blows / 100).max(1);

    let mut batch = MonsterMessages::new();
    for index in 0..blows as usize {
        if index > 0 && chunk.player(attacker).is_some_and(|p| p.is_afraid()) {
            break;
        }
        let blow = py_attack_real(chunk, attacker, victim, index, false, &mut batch, ctx);
        outcome.record(blow);
        if blow.stop {
            break;
        }
    }
    finish_round(chunk, attacker, batch);

    tracing::debug!(?victim, blows = outcome.blows, hits = outcome.hits, damage = outcome.damage, "melee round");
    outcome
}

/// Hit every hostile neighbour once
///
/// Life drained by circle attacks is halved.
pub fn py_attack_circle(chunk: &mut Chunk, attacker: PlayerId, ctx: &mut CombatContext) -> MeleeOutcome {
    let mut outcome = MeleeOutcome::default();
    let Some(origin) = chunk.player(attacker).map(|p| p.grid) else {
        return outcome;
    };

    let afraid = too_afraid(chunk, attacker, None);
    if let Some(p) = chunk.player_mut(attacker) {
        p.energy -= MOVE_ENERGY;
    }
    if afraid {
        return outcome;
    }

    let view: &Chunk = chunk;
    let rules: &CombatContext = ctx;
    let victims: Vec<Actor> = origin
        .adjacent()
        .filter_map(|grid| view.actor_at(grid))
        .filter(|victim| can_attack(view, attacker, *victim, rules))
        .collect();

    let mut batch = MonsterMessages::new();
    for (index, victim) in victims.into_iter().enumerate() {
        let blow = py_attack_real(chunk, attacker, victim, index, true, &mut batch, ctx);
        outcome.record(blow);
    }
    finish_round(chunk, attacker, batch);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::{BlowEffect, BlowMethod, MonsterRace, MonsterRaceFlags};
    use crate::player::{ClassId, Player, PlayerTimed, RaceId};
    use crate::rng::RandomValue;
    use crate::world::PvpHostility;

    fn arena() -> (Chunk, PlayerId) {
        let mut chunk = Chunk::walled(12, 12);
        let mut p = Player::new(PlayerId(1), "Tester", RaceId::Human, ClassId::Warrior, 50);
        p.grid = Loc::new(5, 5);
        let id = chunk.add_player(p);
        (chunk, id)
    }

    fn kobold() -> MonsterRace {
        MonsterRace::new("kobold", 2, 0, 1)
    }

    #[test]
    fn test_kills_and_stops() {
        let (mut chunk, id) = arena();
        let mut ctx = CombatContext::new(11);
        if let Some(p) = chunk.player_mut(id) {
            p.state.num_blows = 1000;
            p.state.to_d = 5;
        }
        chunk.add_monster(kobold(), Loc::new(6, 5));

        let outcome = py_attack(&mut chunk, id, Loc::new(6, 5), &mut ctx);
        assert_eq!(outcome.kills, 1);
        assert!(outcome.blows < 10);
        assert!(chunk.monsters.is_empty());

        let p = chunk.player(id).unwrap();
        assert_eq!(p.energy, -MOVE_ENERGY);
        assert!(p.messages().iter().any(|m| m.text.starts_with("You punch the kobold.")));
        assert_eq!(p.last_message(), Some("The kobold dies."));
    }

    #[test]
    fn test_panicking_target_takes_every_blow() {
        let mut panicked = 0;
        for seed in 0..40 {
            let (mut chunk, id) = arena();
            let mut ctx = CombatContext::new(seed);
            chunk.player_mut(id).unwrap().state.num_blows = 600;
            let mid = chunk.add_monster(MonsterRace::new("hill orc", 8, 0, 100_000), Loc::new(6, 5));
            chunk.monster_mut(mid).unwrap().hp = 2_000;

            let outcome = py_attack(&mut chunk, id, Loc::new(6, 5), &mut ctx);
            let mon = chunk.monster(mid).unwrap();
            assert_eq!(outcome.blows, 6, "seed {seed}");
            assert_eq!(outcome.kills, 0);
            if mon.is_afraid() {
                panicked += 1;
            }
        }
        assert!(panicked > 0);
    }

    #[test]
    fn test_nothing_there() {
        let (mut chunk, id) = arena();
        let mut ctx = CombatContext::new(1);
        assert_eq!(py_attack(&mut chunk, id, Loc::new(6, 5), &mut ctx), MeleeOutcome::default());
        assert_eq!(chunk.player(id).unwrap().energy, 0);
    }

    #[test]
    fn test_too_afraid() {
        let (mut chunk, id) = arena();
        let mut ctx = CombatContext::new(1);
        chunk.player_mut(id).unwrap().timed[PlayerTimed::Afraid as usize] = 10;
        chunk.add_monster(kobold(), Loc::new(6, 5));

        let outcome = py_attack(&mut chunk, id, Loc::new(6, 5), &mut ctx);
        assert_eq!(outcome.blows, 0);
        assert_eq!(chunk.monsters.len(), 1);
        assert_eq!(
            chunk.player(id).unwrap().last_message(),
            Some("You are too afraid to attack the kobold!")
        );
    }

    #[test]
    fn test_pvp_respects_hostility() {
        let (mut chunk, id) = arena();
        let mut q = Player::new(PlayerId(2), "Boromir", RaceId::Human, ClassId::Warrior, 50);
        q.grid = Loc::new(6, 5);
        let qid = chunk.add_player(q);

        let mut ctx = CombatContext::new(3);
        ctx.constants.pvp_hostility = PvpHostility::Safe;
        assert_eq!(py_attack(&mut chunk, id, Loc::new(6, 5), &mut ctx).blows, 0);

        ctx.constants.pvp_hostility = PvpHostility::Brutal;
        chunk.player_mut(id).unwrap().state.num_blows = 400;
        let outcome = py_attack(&mut chunk, id, Loc::new(6, 5), &mut ctx);
        assert_eq!(outcome.blows, 4);
        let q = chunk.player(qid).unwrap();
        assert_eq!(q.mhp - q.chp, outcome.damage);
    }

    #[test]
    fn test_circle_hits_each_neighbour_once() {
        let (mut chunk, id) = arena();
        let mut ctx = CombatContext::new(4);
        chunk.add_monster(MonsterRace::new("jackal", 1, 0, 50), Loc::new(4, 4));
        chunk.add_monster(MonsterRace::new("jackal", 1, 0, 50), Loc::new(6, 6));
        chunk.add_monster(MonsterRace::new("jackal", 1, 0, 50), Loc::new(8, 8));

        let outcome = py_attack_circle(&mut chunk, id, &mut ctx);
        assert_eq!(outcome.blows, 2);
    }

    #[test]
    fn test_fire_form_against_fire_immune() {
        let (mut chunk, id) = arena();
        let mut ctx = CombatContext::new(6);
        if let Some(p) = chunk.player_mut(id) {
            p.state.num_blows = 500;
            p.poly_race = Some(
                MonsterRace::new("fire vortex", 21, 30, 32)
                    .with_blow(BlowMethod::Engulf, BlowEffect::Fire, RandomValue::new(0, 3, 8)),
            );
        }
        let race = MonsterRace::new("fire hound", 20, 0, 40).with_flags(MonsterRaceFlags::IM_FIRE);
        let mid = chunk.add_monster(race, Loc::new(6, 5));

        let outcome = py_attack(&mut chunk, id, Loc::new(6, 5), &mut ctx);
        assert_eq!(outcome.blows, 5);
        assert_eq!(outcome.damage, 0);
        assert_eq!(chunk.monster(mid).unwrap().hp, 40);
    }
}
