//! The player record as the combat code sees it

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::class::ClassId;
use super::race::RaceId;
use super::timed::{PlayerTimed, TMD_MAX};
use crate::combat::{ELEM_MAX, Message, MsgType, Projection};
use crate::dungeon::Loc;
use crate::monster::MonsterRace;
use crate::object::{Brand, Object};
use crate::world::PvpHostility;

/// Unique identifier for players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

bitflags! {
    /// Intrinsic and equipment-granted protections
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PlayerFlags: u32 {
        const FREE_ACT = 0x0001;
        const PROT_CONF = 0x0002;
        const PROT_BLIND = 0x0004;
        const PROT_STUN = 0x0008;
        const PROT_FEAR = 0x0010;
        const HOLD_LIFE = 0x0020;
    }
}

impl Serialize for PlayerFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PlayerFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(PlayerFlags::from_bits_truncate(bits))
    }
}

/// Combat skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Skills {
    pub to_hit_melee: i32,
    pub to_hit_bow: i32,
    pub to_hit_throw: i32,
    pub save: i32,
}

/// Derived state: bonuses, skills, attack rates and resistances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub to_h: i32,
    pub to_d: i32,
    /// Base armour class from worn items
    pub ac: i32,
    /// Magical armour bonus from worn items
    pub to_a: i32,
    pub skills: Skills,
    /// Blows per round, times 100
    pub num_blows: i32,
    /// Shots per round, times 10
    pub num_shots: i32,
    /// Multiplier of the wielded launcher
    pub ammo_mult: i32,
    pub flags: PlayerFlags,
    /// Resistance level per element: -1 vulnerable .. 3 immune
    pub el_info: [i32; ELEM_MAX],
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            to_h: 0,
            to_d: 0,
            ac: 0,
            to_a: 0,
            skills: Skills::default(),
            num_blows: 100,
            num_shots: 10,
            ammo_mult: 0,
            flags: PlayerFlags::empty(),
            el_info: [0; ELEM_MAX],
        }
    }
}

/// Worn and wielded items
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Object>,
    pub bow: Option<Object>,
    pub armour: Vec<Object>,
}

/// Temporary missile brand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowBrand {
    pub elem: Projection,
    /// Flat damage added to each missile
    pub dam: i32,
    /// Explodes at the end of the flight instead of adding damage
    pub ball: bool,
}

impl BowBrand {
    pub const fn new(elem: Projection, dam: i32, ball: bool) -> Self {
        Self { elem, dam, ball }
    }
}

/// A player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub race: RaceId,
    pub class: ClassId,
    pub lev: i32,
    pub exp: i32,
    pub chp: i32,
    pub mhp: i32,
    pub grid: Loc,
    pub energy: i32,
    pub state: PlayerState,
    pub timed: [i32; TMD_MAX],
    pub equipment: Equipment,
    pub quiver: Vec<Object>,
    pub inventory: Vec<Object>,
    /// Monster form while shapechanged
    pub poly_race: Option<MonsterRace>,
    pub bow_brand: Option<BowBrand>,
    /// Elements whose resistance the player has learned about
    pub known_elements: [bool; ELEM_MAX],
    /// Players this one has declared hostility to
    pub hostile: Vec<PlayerId>,
    /// Append damage numbers to hit messages
    pub show_damage: bool,
    pub is_dead: bool,
    pub died_from: Option<String>,
    outbox: Vec<Message>,
}

impl Player {
    pub fn new(id: PlayerId, name: &str, race: RaceId, class: ClassId, lev: i32) -> Self {
        let lev = lev.clamp(1, crate::consts::PY_MAX_LEVEL);
        let base = class.skills();
        let grow = |(start, per_ten): (i32, i32)| start + per_ten * lev / 10;
        let state = PlayerState {
            skills: Skills {
                to_hit_melee: grow(base.melee),
                to_hit_bow: grow(base.bow),
                to_hit_throw: grow(base.throw),
                save: grow(base.save),
            },
            ..Default::default()
        };
        let mhp = 10 + 10 * lev;

        Self {
            id,
            name: name.to_string(),
            race,
            class,
            lev,
            exp: 0,
            chp: mhp,
            mhp,
            grid: Loc::default(),
            energy: 0,
            state,
            timed: [0; TMD_MAX],
            equipment: Equipment::default(),
            quiver: Vec::new(),
            inventory: Vec::new(),
            poly_race: None,
            bow_brand: None,
            known_elements: [false; ELEM_MAX],
            hostile: Vec::new(),
            show_damage: false,
            is_dead: false,
            died_from: None,
            outbox: Vec::new(),
        }
    }

    pub fn timed(&self, effect: PlayerTimed) -> i32 {
        self.timed[effect as usize]
    }

    pub fn has_timed(&self, effect: PlayerTimed) -> bool {
        self.timed(effect) > 0
    }

    pub fn weapon(&self) -> Option<&Object> {
        self.equipment.weapon.as_ref()
    }

    pub fn bow(&self) -> Option<&Object> {
        self.equipment.bow.as_ref()
    }

    pub fn wield(&mut self, weapon: Object) {
        self.equipment.weapon = Some(weapon);
        self.update_bonuses();
    }

    pub fn wield_bow(&mut self, bow: Object) {
        self.equipment.bow = Some(bow);
        self.update_bonuses();
    }

    pub fn wear(&mut self, armour: Object) {
        self.equipment.armour.push(armour);
        self.update_bonuses();
    }

    /// Recompute the equipment-derived parts of the state
    pub fn update_bonuses(&mut self) {
        self.state.ac = self.equipment.armour.iter().map(|o| o.ac).sum();
        self.state.to_a = self.equipment.armour.iter().map(|o| o.to_a).sum();
        self.state.ammo_mult = self.bow().map_or(0, |b| b.pmult);
    }

    /// Resistance level to `elem`; untracked projections are neutral
    pub fn res_level(&self, elem: Projection) -> i32 {
        elem.elem_index().map_or(0, |idx| self.state.el_info[idx])
    }

    /// Remember that the player has felt `elem`
    pub fn notice_element(&mut self, elem: Projection) {
        if let Some(idx) = elem.elem_index() {
            self.known_elements[idx] = true;
        }
    }

    pub fn is_afraid(&self) -> bool {
        self.has_timed(PlayerTimed::Afraid)
    }

    /// Confused, paralyzed, afraid or blind
    pub fn is_debuffed(&self) -> bool {
        [
            PlayerTimed::Confused,
            PlayerTimed::Paralyzed,
            PlayerTimed::Afraid,
            PlayerTimed::Blind,
        ]
        .iter()
        .any(|&t| self.has_timed(t))
    }

    pub fn is_living(&self) -> bool {
        match &self.poly_race {
            Some(race) => race.is_living(),
            None => self.race.is_living(),
        }
    }

    /// Brands granted by temporary melee buffs
    pub fn temp_brands(&self) -> Vec<Brand> {
        [
            (PlayerTimed::AttAcid, Projection::Acid),
            (PlayerTimed::AttElec, Projection::Elec),
            (PlayerTimed::AttFire, Projection::Fire),
            (PlayerTimed::AttCold, Projection::Cold),
            (PlayerTimed::AttPois, Projection::Pois),
        ]
        .into_iter()
        .filter(|(t, _)| self.has_timed(*t))
        .map(|(_, elem)| Brand::new(elem, 3))
        .collect()
    }

    /// May this player harm `other`?
    pub fn pvx_check(&self, other: &Player, hostility: PvpHostility) -> bool {
        if other.id == self.id || other.is_dead {
            return false;
        }
        match hostility {
            PvpHostility::Safe => false,
            PvpHostility::Hostile => self.hostile.contains(&other.id),
            PvpHostility::Brutal => true,
        }
    }

    pub fn heal(&mut self, amount: i32) {
        self.chp = (self.chp + amount.max(0)).min(self.mhp);
    }

    /// Apply damage; returns true if it killed the player
    pub fn take_hit(&mut self, dam: i32, killer: &str) -> bool {
        if dam <= 0 || self.is_dead {
            return false;
        }
        self.chp -= dam;
        if self.chp < 0 {
            self.is_dead = true;
            self.died_from = Some(killer.to_string());
            self.msgt(MsgType::Death, "You die.");
            tracing::debug!(player = %self.name, killer, "player killed");
        }
        self.is_dead
    }

    /// Drain experience, unless life is held
    pub fn lose_exp(&mut self, amount: i32) {
        self.exp = (self.exp - amount.max(0)).max(0);
    }

    pub fn msg(&mut self, text: impl Into<String>) {
        self.msgt(MsgType::Generic, text);
    }

    pub fn msgt(&mut self, kind: MsgType, text: impl Into<String>) {
        self.outbox.push(Message {
            kind,
            text: text.into(),
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.outbox
    }

    pub fn last_message(&self) -> Option<&str> {
        self.outbox.last().map(|m| m.text.as_str())
    }

    /// Take every queued message, leaving the outbox empty
    pub fn drain_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::TVal;

    fn player(id: u32) -> Player {
        Player::new(PlayerId(id), "Aragorn", RaceId::Dunadan, ClassId::Ranger, 30)
    }

    #[test]
    fn test_new_scales_skills() {
        let p = player(1);
        assert_eq!(p.state.skills.to_hit_bow, 72 + 45 * 3);
        assert_eq!(p.chp, p.mhp);
        assert_eq!(p.state.num_blows, 100);
    }

    #[test]
    fn test_equipment_bonuses() {
        let mut p = player(1);
        p.wield_bow(Object::new(TVal::Bow, "Long Bow").with_multiplier(3));
        p.wear(Object::new(TVal::SoftArmour, "Soft Leather Armour").with_armour(8, 2));
        p.wear(Object::new(TVal::Helm, "Hard Leather Cap").with_armour(2, 0));
        assert_eq!(p.state.ammo_mult, 3);
        assert_eq!(p.state.ac, 10);
        assert_eq!(p.state.to_a, 2);
    }

    #[test]
    fn test_take_hit() {
        let mut p = player(1);
        let mhp = p.mhp;
        assert!(!p.take_hit(mhp, "a kobold"));
        assert_eq!(p.chp, 0);
        assert!(p.take_hit(1, "a kobold"));
        assert_eq!(p.died_from.as_deref(), Some("a kobold"));
        assert_eq!(p.last_message(), Some("You die."));
    }

    #[test]
    fn test_pvx_check() {
        let mut a = player(1);
        let b = player(2);
        assert!(!a.pvx_check(&b, PvpHostility::Safe));
        assert!(!a.pvx_check(&b, PvpHostility::Hostile));
        assert!(a.pvx_check(&b, PvpHostility::Brutal));
        a.hostile.push(b.id);
        assert!(a.pvx_check(&b, PvpHostility::Hostile));
        assert!(!a.pvx_check(&a.clone(), PvpHostility::Brutal));
    }

    #[test]
    fn test_res_level_untracked() {
        let mut p = player(1);
        p.state.el_info[Projection::Fire as usize] = 2;
        assert_eq!(p.res_level(Projection::Fire), 2);
        assert_eq!(p.res_level(Projection::LightWeak), 0);
        p.notice_element(Projection::Fire);
        p.notice_element(Projection::KillWall);
        assert!(p.known_elements[Projection::Fire as usize]);
    }

    #[test]
    fn test_temp_brands() {
        let mut p = player(1);
        assert!(p.temp_brands().is_empty());
        p.timed[PlayerTimed::AttFire as usize] = 10;
        assert_eq!(p.temp_brands(), vec![Brand::new(Projection::Fire, 3)]);
    }

    #[test]
    fn test_drain_messages() {
        let mut p = player(1);
        p.msg("one");
        p.msgt(MsgType::Hit, "two");
        let msgs = p.drain_messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[1].kind, MsgType::Hit);
        assert!(p.messages().is_empty());
    }
}
