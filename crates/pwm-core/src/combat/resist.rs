//! Elemental resistance and vulnerability
//!
//! [`adjust_dam`] turns raw elemental damage into what a target actually
//! takes. With no player it works as a generic preview, which is also how
//! monster targets are handled (see [`monster_resist_level`]).

use super::element::{ElementInfo, Projection};
use crate::consts::COVERED_VULN_LEVEL;
use crate::monster::{MonsterRace, MonsterRaceFlags};
use crate::object::ObjectFlags;
use crate::player::{Player, PlayerTimed, RaceId, player_set_timed};
use crate::rng::{Aspect, GameRng};
use crate::world::CombatContext;

/// Racial weaknesses that high-level characters have learned to cover
///
/// `(race, element, divisor)`: such a character takes an extra
/// `dam / divisor` instead of being outright vulnerable.
const COVERED_VULNERABILITIES: &[(RaceId, Projection, i32)] = &[
    (RaceId::Ent, Projection::Fire, 8),
    (RaceId::Undead, Projection::Fire, 8),
    (RaceId::Frostman, Projection::Fire, 8),
    (RaceId::Wraith, Projection::Fire, 8),
    (RaceId::Vampire, Projection::Light, 8),
];

/// Whether a creature of `race` can be hurt at all by a special projection
///
/// `None` for ordinary elements, which every creature is susceptible to.
fn race_susceptible(race: &MonsterRace, proj: Projection) -> Option<bool> {
    let susceptible = match proj {
        Projection::LightWeak => race.has(MonsterRaceFlags::HURT_LIGHT),
        Projection::KillWall => race.has(MonsterRaceFlags::HURT_ROCK),
        Projection::DispEvil => race.has(MonsterRaceFlags::EVIL),
        Projection::DispUndead => race.has(MonsterRaceFlags::UNDEAD),
        Projection::DrainLife | Projection::DrainHealth | Projection::PsiDrain => {
            !race.has(MonsterRaceFlags::NONLIVING)
        }
        _ => return None,
    };
    Some(susceptible)
}

/// Whether a shapechanged form is hurt extra by `proj`
fn race_vulnerable(race: &MonsterRace, proj: Projection) -> bool {
    match proj {
        Projection::Fire => race.has(MonsterRaceFlags::HURT_FIRE),
        Projection::Cold => race.has(MonsterRaceFlags::HURT_COLD),
        Projection::Light => race.has(MonsterRaceFlags::HURT_LIGHT),
        _ => false,
    }
}

/// Resistance level of a monster race, in the player's -1..=3 scale
pub fn monster_resist_level(race: &MonsterRace, proj: Projection) -> i32 {
    if let Some(susceptible) = race_susceptible(race, proj) {
        return if susceptible { 0 } else { 3 };
    }

    let has = |flag| race.has(flag);
    match proj {
        Projection::Acid if has(MonsterRaceFlags::IM_ACID) => 3,
        Projection::Elec if has(MonsterRaceFlags::IM_ELEC) => 3,
        Projection::Fire if has(MonsterRaceFlags::IM_FIRE) => 3,
        Projection::Cold | Projection::Ice if has(MonsterRaceFlags::IM_COLD) => 3,
        Projection::Pois if has(MonsterRaceFlags::IM_POIS) => 3,
        Projection::Fire if has(MonsterRaceFlags::HURT_FIRE) => -1,
        Projection::Cold if has(MonsterRaceFlags::HURT_COLD) => -1,
        Projection::Light if has(MonsterRaceFlags::HURT_LIGHT) => -1,
        Projection::Nether if has(MonsterRaceFlags::UNDEAD) => 3,
        Projection::Nether if has(MonsterRaceFlags::IM_NETHER) => 1,
        Projection::Water if has(MonsterRaceFlags::IM_WATER) => 1,
        Projection::Nexus if has(MonsterRaceFlags::IM_NEXUS) => 1,
        Projection::Disen if has(MonsterRaceFlags::IM_DISEN) => 1,
        Projection::Plasma if has(MonsterRaceFlags::IM_PLASMA) => 1,
        Projection::DarkWeak => 3,
        _ => 0,
    }
}

/// Acid eats into a random piece of armour
///
/// Returns true if the armour took the blow, whether or not it was
/// damaged by it.
pub fn minus_ac(p: &mut Player, rng: &mut GameRng) -> bool {
    let count = p.equipment.armour.len() as i32;
    if count == 0 {
        return false;
    }
    let idx = rng.randint0(count) as usize;
    let armour = &mut p.equipment.armour[idx];
    if armour.ac + armour.to_a <= 0 {
        return false;
    }

    let name = armour.name.clone();
    if armour.has(ObjectFlags::IGNORE_ACID) {
        p.msg(format!("Your {name} is unaffected!"));
        return true;
    }
    armour.to_a -= 1;
    p.msg(format!("Your {name} is damaged!"));
    p.update_bonuses();
    true
}

/// Extra damage from light against the light-sensitive, shrinking with level
fn light_vulnerability(dam: i32, lev: i32, info: &ElementInfo) -> i32 {
    let extra = if lev < 20 {
        dam
    } else if lev < 35 {
        dam / 2
    } else {
        dam / 3
    };
    (dam + extra).min(dam.max(info.damage_cap))
}

fn wont_kill(p: &Player, dam: i32, extra: i32) -> bool {
    p.chp - (dam + extra) >= 1
}

/// Apply `numerator / denominator` once per resistance level
///
/// Truncates after every step, so double resistance is not the same as
/// squaring the ratio.
pub fn scale_by_resist(dam: i32, numerator: i32, denominator: i32, resist: i32) -> i32 {
    let denominator = denominator.max(1);
    (0..resist.max(0)).fold(dam, |dam, _| dam * numerator / denominator)
}

/// Adjust elemental damage for resistances and vulnerabilities
///
/// With a player, `resist` is replaced by the player's own resistance for
/// tracked elements, and the element becomes known to them. Without one,
/// immunity means no damage at all. A player at full health who is not
/// cooling down from a previous narrow escape always survives the hit.
pub fn adjust_dam(
    mut p: Option<&mut Player>,
    proj: Projection,
    dam: i32,
    aspect: Aspect,
    resist: i32,
    ctx: &mut CombatContext,
) -> i32 {
    let mut resist = resist;
    if let Some(p) = p.as_deref_mut() {
        let slot = if proj == Projection::Ice {
            Projection::Cold
        } else {
            proj
        };
        if slot.elem_index().is_some() {
            resist = p.res_level(slot);
            p.notice_element(slot);
        }
    }

    if dam <= 0 {
        return 0;
    }
    let info = proj.info();
    let mut dam = dam;

    if let Some(p) = p.as_deref_mut() {
        if proj == Projection::Acid && minus_ac(p, &mut ctx.rng) {
            dam = (dam + 1) / 2;
        }

        if p.has_timed(PlayerTimed::Biofeedback) {
            if proj.is_physical_projectile() {
                dam /= 2;
            }
        } else if p.has_timed(PlayerTimed::ReflectStance) && proj.is_deflectable() {
            dam /= 2;
        }

        if let Some(race) = &p.poly_race {
            if race_susceptible(race, proj) == Some(false) {
                tracing::trace!(player = %p.name, %proj, form = %race.name, "form not susceptible");
                return 0;
            }
        }
    }

    let poly_vulnerable = p
        .as_deref()
        .and_then(|p| p.poly_race.as_ref())
        .is_some_and(|race| race_vulnerable(race, proj));

    if resist == -1 {
        dam = match p.as_deref() {
            Some(p) if proj == Projection::Light => light_vulnerability(dam, p.lev, &info),
            Some(_) if proj == Projection::Time => (dam * 3 / 2).min(dam.max(info.damage_cap)),
            _ => dam * 4 / 3,
        };
    } else if poly_vulnerable {
        let lev = p.as_deref().map_or(0, |p| p.lev);
        dam = if proj == Projection::Light {
            light_vulnerability(dam, lev, &info)
        } else {
            dam * 4 / 3
        };
    } else if resist == 3 && p.is_none() {
        return 0;
    } else if let Some(p) = p.as_deref() {
        if p.lev >= COVERED_VULN_LEVEL && resist != 3 {
            let covered = COVERED_VULNERABILITIES
                .iter()
                .find(|(race, elem, _)| *race == p.race && *elem == proj);
            if let Some(&(_, _, divisor)) = covered {
                let extra = dam / divisor;
                if wont_kill(p, dam, extra) {
                    dam += extra;
                }
            }
        }
    }

    if let Some(p) = p.as_deref() {
        let weak = (proj == Projection::LightWeak && p.race.light_weak())
            || (proj == Projection::DarkWeak && p.race.dark_weak());
        if weak {
            let extra = p.mhp / 10;
            if wont_kill(p, dam, extra) {
                dam += extra;
            }
        }
    }

    let denominator = ctx.rng.randcalc(info.denominator, aspect.inverted());
    dam = scale_by_resist(dam, info.numerator, denominator, resist);

    if let Some(p) = p {
        if p.chp == p.mhp && !p.has_timed(PlayerTimed::NarrowEscape) && dam >= p.chp {
            tracing::debug!(player = %p.name, dam, chp = p.chp, "narrow escape");
            dam = p.chp - 1;
            p.msg("You barely escape a deadly blow!");
            let cooldown = ctx.constants.narrow_escape_cooldown;
            player_set_timed(p, PlayerTimed::NarrowEscape, cooldown, false);
        }
    }

    dam.max(0)
}
