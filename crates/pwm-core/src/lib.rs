//! pwm-core: combat and damage resolution for a multiplayer Angband variant
//!
//! This crate contains the melee/ranged attack pipeline, critical tables,
//! elemental damage adjustment and the post-hit side-effect machinery.
//! It performs no I/O apart from loading the combat constants file.
//!
//! Everything runs synchronously inside one actor's turn: callers hand the
//! routines a `&mut` [`world::CombatContext`] and the [`dungeon::Chunk`]
//! the fight happens on, and all mutation goes through those borrows.

pub mod combat;
pub mod dungeon;
pub mod monster;
pub mod object;
pub mod player;
pub mod world;

mod consts;
mod rng;

pub use consts::*;
pub use rng::{Aspect, GameRng, RandomChance, RandomValue};
pub use world::{CombatConstants, CombatContext, ConfigError, World};
