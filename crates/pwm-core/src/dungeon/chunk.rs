//! A level of the dungeon: terrain, actors and floor objects

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::grid::{Loc, distance};
use crate::combat::Target;
use crate::monster::{Monster, MonsterId, MonsterRace};
use crate::object::Object;
use crate::player::{Player, PlayerId};
use crate::rng::GameRng;

/// Terrain feature of one grid
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Feature {
    #[default]
    Floor = 0,
    Wall,
    Rubble,
    PassRubble,
    ClosedDoor,
    OpenDoor,
    /// Entrance to a player house
    HomeDoor,
    Tree,
}

impl Feature {
    /// Missiles and bolts can travel through this grid
    pub const fn is_projectable(self) -> bool {
        matches!(self, Feature::Floor | Feature::OpenDoor | Feature::Tree)
    }

    /// Actors can stand here
    pub const fn is_passable(self) -> bool {
        matches!(
            self,
            Feature::Floor | Feature::OpenDoor | Feature::PassRubble | Feature::Tree
        )
    }
}

/// Something standing on a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    Monster(MonsterId),
    Player(PlayerId),
}

/// An object lying on the floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorItem {
    pub grid: Loc,
    pub obj: Object,
}

/// One level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub width: i32,
    pub height: i32,
    features: Vec<Feature>,
    pub monsters: Vec<Monster>,
    pub players: Vec<Player>,
    pub objects: Vec<FloorItem>,
    next_monster_id: u32,
}

impl Chunk {
    /// An open level of plain floor
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            features: vec![Feature::Floor; (width * height) as usize],
            monsters: Vec::new(),
            players: Vec::new(),
            objects: Vec::new(),
            next_monster_id: 1,
        }
    }

    /// Floor surrounded by a ring of permanent wall
    pub fn walled(width: i32, height: i32) -> Self {
        let mut chunk = Self::new(width, height);
        for x in 0..chunk.width {
            chunk.set_feature(Loc::new(x, 0), Feature::Wall);
            chunk.set_feature(Loc::new(x, chunk.height - 1), Feature::Wall);
        }
        for y in 0..chunk.height {
            chunk.set_feature(Loc::new(0, y), Feature::Wall);
            chunk.set_feature(Loc::new(chunk.width - 1, y), Feature::Wall);
        }
        chunk
    }

    pub fn in_bounds(&self, grid: Loc) -> bool {
        grid.x >= 0 && grid.y >= 0 && grid.x < self.width && grid.y < self.height
    }

    fn index(&self, grid: Loc) -> Option<usize> {
        self.in_bounds(grid)
            .then(|| (grid.y * self.width + grid.x) as usize)
    }

    /// Feature at `grid`; everything outside the level is wall
    pub fn feature(&self, grid: Loc) -> Feature {
        self.index(grid)
            .map_or(Feature::Wall, |idx| self.features[idx])
    }

    pub fn set_feature(&mut self, grid: Loc, feat: Feature) {
        if let Some(idx) = self.index(grid) {
            self.features[idx] = feat;
        }
    }

    pub fn is_projectable(&self, grid: Loc) -> bool {
        self.feature(grid).is_projectable()
    }

    /// Passable and unoccupied
    pub fn is_empty(&self, grid: Loc) -> bool {
        self.feature(grid).is_passable() && self.actor_at(grid).is_none()
    }

    /// Place a new monster of `race`, returning its id
    pub fn add_monster(&mut self, race: MonsterRace, grid: Loc) -> MonsterId {
        let id = MonsterId(self.next_monster_id);
        self.next_monster_id += 1;
        self.monsters.push(Monster::new(id, race, grid));
        id
    }

    pub fn add_player(&mut self, player: Player) -> PlayerId {
        let id = player.id;
        self.players.push(player);
        id
    }

    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.id == id)
    }

    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|m| m.id == id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Living monster standing on `grid`
    pub fn monster_at(&self, grid: Loc) -> Option<MonsterId> {
        self.monsters
            .iter()
            .find(|m| m.grid == grid && !m.is_dead())
            .map(|m| m.id)
    }

    /// Living player standing on `grid`
    pub fn player_at(&self, grid: Loc) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.grid == grid && !p.is_dead)
            .map(|p| p.id)
    }

    pub fn actor_at(&self, grid: Loc) -> Option<Actor> {
        self.monster_at(grid)
            .map(Actor::Monster)
            .or_else(|| self.player_at(grid).map(Actor::Player))
    }

    /// Borrow an attacking player and its victim at the same time
    ///
    /// Returns `None` if either is missing or a player would attack itself.
    pub fn combatants(&mut self, attacker: PlayerId, victim: Actor) -> Option<(&mut Player, Target<'_>)> {
        let pidx = self.players.iter().position(|p| p.id == attacker)?;
        match victim {
            Actor::Monster(mid) => {
                let player = &mut self.players[pidx];
                let mon = self.monsters.iter_mut().find(|m| m.id == mid)?;
                Some((player, Target::Monster(mon)))
            }
            Actor::Player(qid) => {
                let qidx = self.players.iter().position(|p| p.id == qid)?;
                if qidx == pidx {
                    return None;
                }
                let (player, victim) = if pidx < qidx {
                    let (lo, hi) = self.players.split_at_mut(qidx);
                    (&mut lo[pidx], &mut hi[0])
                } else {
                    let (lo, hi) = self.players.split_at_mut(pidx);
                    (&mut hi[0], &mut lo[qidx])
                };
                Some((player, Target::Player(victim)))
            }
        }
    }

    /// Remove monsters whose hit points dropped below zero
    pub fn reap_dead(&mut self) -> Vec<Monster> {
        let (dead, alive): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.monsters).into_iter().partition(Monster::is_dead);
        self.monsters = alive;
        dead
    }

    pub fn objects_at(&self, grid: Loc) -> impl Iterator<Item = &Object> {
        self.objects
            .iter()
            .filter(move |item| item.grid == grid)
            .map(|item| &item.obj)
    }

    /// Drop an object at or next to `grid`
    ///
    /// Returns where it landed, or `None` if there was no room and it was
    /// lost.
    pub fn drop_near(&mut self, obj: Object, grid: Loc, rng: &mut GameRng) -> Option<Loc> {
        let landing = if self.feature(grid).is_passable() {
            Some(grid)
        } else {
            let candidates: Vec<Loc> = grid
                .adjacent()
                .filter(|g| self.feature(*g).is_passable())
                .collect();
            if candidates.is_empty() {
                None
            } else {
                Some(candidates[rng.randint0(candidates.len() as i32) as usize])
            }
        };

        match landing {
            Some(spot) => {
                self.objects.push(FloorItem { grid: spot, obj });
                Some(spot)
            }
            None => {
                tracing::debug!(?grid, "no room to drop object");
                None
            }
        }
    }

    /// Shake the area around `center`
    ///
    /// Each monster in range (other than at the centre) has an even
    /// chance of being thrown to a random empty grid in range. Returns the
    /// monsters that moved.
    pub fn earthquake(&mut self, center: Loc, radius: i32, rng: &mut GameRng) -> Vec<MonsterId> {
        let mut moved = Vec::new();
        let ids: Vec<MonsterId> = self
            .monsters
            .iter()
            .filter(|m| !m.is_dead() && m.grid != center && distance(center, m.grid) <= radius)
            .map(|m| m.id)
            .collect();

        for id in ids {
            if !rng.one_in(2) {
                continue;
            }
            let spots: Vec<Loc> = (center.y - radius..=center.y + radius)
                .flat_map(|y| (center.x - radius..=center.x + radius).map(move |x| Loc::new(x, y)))
                .filter(|g| *g != center && distance(center, *g) <= radius && self.is_empty(*g))
                .collect();
            if spots.is_empty() {
                continue;
            }
            let spot = spots[rng.randint0(spots.len() as i32) as usize];
            if let Some(mon) = self.monster_mut(id) {
                mon.grid = spot;
                moved.push(id);
            }
        }

        tracing::debug!(?center, radius, moved = moved.len(), "earthquake");
        moved
    }
}
