//! Objects: weapons, missiles, launchers and armour

mod brand;
mod obj;

pub use brand::{AttackModifier, Brand, Slay, improve_attack_modifier};
pub use obj::{Object, ObjectFlags, TVal};
