//! Damage assembly for melee blows and missiles, plus breakage

use super::critical::critical_melee;
use super::messages::MsgType;
use super::target::Target;
use crate::object::{AttackModifier, Object, ObjectFlags};
use crate::player::{ClassFlags, Player, PlayerTimed, RaceId};
use crate::world::CombatContext;

/// Damage of one melee blow, critical included
///
/// Dice (1 when unarmed) times the best slay or brand. Sleeping monsters
/// are stabbed for `3 + lev/40` times that and fleeing ones for half as
/// much again. Vampires with no other multiplier double their damage at
/// night. Then the weapon's to-dam, the critical roll and the player's
/// to-dam are added in that order.
pub fn melee_damage(
    p: &Player,
    weapon: Option<&Object>,
    modifier: &AttackModifier,
    target: &Target<'_>,
    ctx: &mut CombatContext,
) -> (i32, MsgType) {
    let mut dmg = match weapon {
        Some(w) => ctx.rng.damroll(w.dd, w.ds),
        None => 1,
    };
    dmg *= modifier.mult;

    if let Target::Monster(mon) = target {
        if mon.is_asleep() {
            dmg *= 3 + p.lev / 40;
        } else if mon.is_afraid() {
            dmg = dmg * 3 / 2;
        }
    }

    if p.race == RaceId::Vampire && modifier.mult == 1 && ctx.is_night() {
        dmg *= 2;
    }

    let (weight, plus) = weapon.map_or((0, 0), |w| (w.weight, w.to_h));
    dmg += weapon.map_or(0, |w| w.to_d);
    let (mut dmg, msg) = critical_melee(p, target, weight, plus, dmg, ctx);
    dmg += p.state.to_d;

    (dmg.max(0), msg)
}

/// Might of a thrown throwing weapon
pub fn throwing_might(p: &Player, missile: &Object) -> i32 {
    let mut might = 2 + missile.weight / 12;
    if p.class.has(ClassFlags::THROWING_MASTERY) {
        might += p.lev / 10;
    }
    might
}

/// Damage of one missile before criticals
///
/// Launched missiles add the launcher's to-dam and multiply by its might
/// plus any slay or brand; thrown throwing weapons multiply by their own
/// might. Fumbling classes lose half the damage half the time while below
/// the configured level.
pub fn ranged_damage(
    p: &Player,
    missile: &Object,
    launcher: Option<&Object>,
    modifier: &AttackModifier,
    ctx: &mut CombatContext,
) -> i32 {
    let mut mult = if launcher.is_some() { p.state.ammo_mult } else { 1 };
    if modifier.is_found() {
        mult += modifier.mult;
    }

    let mut dam = ctx.rng.damroll(missile.dd, missile.ds) + missile.to_d;
    match launcher {
        Some(bow) => {
            dam += bow.to_d;
            if p.class.has(ClassFlags::BAD_SHOOTER)
                && p.lev < ctx.constants.bad_shooter_level
                && ctx.rng.one_in(2)
            {
                dam /= 2;
            }
        }
        None if missile.is_throwing_weapon() => {
            dam *= throwing_might(p, missile);
            if p.class.has(ClassFlags::CLUMSY)
                && p.lev < ctx.constants.clumsy_thrower_level
                && ctx.rng.one_in(2)
            {
                dam /= 2;
            }
        }
        None => {}
    }
    dam *= mult;

    if launcher.is_some() && p.has_timed(PlayerTimed::BowBrand) {
        if let Some(brand) = p.bow_brand.filter(|b| !b.ball) {
            dam += brand.dam;
        }
    }

    dam.max(0)
}

/// Scale damage dealt by one player to another
pub fn pvp_scale(dam: i32, ctx: &CombatContext) -> i32 {
    dam * ctx.constants.pvp_damage_percent / 100
}

/// Percent chance that a missile breaks
///
/// Artifacts never break. Throwing weapons that are neither ammo nor
/// explosive almost never do. Anything else uses its kind's percentage
/// when it hits and the square of that (over 100) when it misses.
pub fn breakage_chance(obj: &Object, hit_target: bool) -> i32 {
    if obj.artifact {
        return 0;
    }
    if obj.is_throwing_weapon() && !obj.has(ObjectFlags::EXPLODE) && !obj.is_ammo() {
        return 1;
    }

    let perc = obj.break_perc;
    if hit_target { perc } else { perc * perc / 100 }
}
