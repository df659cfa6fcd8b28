//! Combat resolution
//!
//! Hit rolls, critical hits, damage assembly, elemental adjustment and
//! side effects, tied together by the melee and ranged orchestrators.

mod blows;
mod critical;
mod damage;
mod effects;
mod element;
mod hit;
pub mod melee;
mod messages;
pub mod ranged;
mod resist;
mod target;

pub use blows::{BlowProfile, armour_soak, blow_profile, drain_exp, poly_blow};
pub use critical::{critical_melee, critical_shot, melee_verb, ranged_verb};
pub use damage::{breakage_chance, melee_damage, pvp_scale, ranged_damage, throwing_might};
pub use effects::{
    LandedEffects, LeechSource, SideEffects, apply_side_effects, determine_side_effects,
    exclude_cut_and_stun, leech_source,
};
pub use element::{ELEM_MAX, ElementInfo, Projection};
pub use hit::{
    chance_of_melee_hit, chance_of_melee_hit_base, chance_of_missile_hit,
    chance_of_missile_hit_base, hit_chance, test_hit,
};
pub use melee::{BlowResult, MeleeOutcome, py_attack, py_attack_circle};
pub use messages::{Message, MonsterMessages, MsgType, damage_suffix};
pub use ranged::{ItemRef, RangedKind, RangedOutcome, do_cmd_fire, do_cmd_throw, ranged_helper};
pub use resist::{adjust_dam, minus_ac, monster_resist_level, scale_by_resist};
pub use target::Target;
