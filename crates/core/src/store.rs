//! Record persistence used by floor assembly, plus an in-memory implementation.
//!
//! `create_*` inserts a new row and writes the assigned id back into the record,
//! the way an ORM create call does. `save_*` overwrites an existing row.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::floorgen::model::{Chest, Enemy, Floor, Game, Player, Room, Weapon};
use crate::types::{ChestId, EnemyId, FloorId, GameId, PlayerId, RoomId, WeaponId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{table} row {id} does not exist")]
    NotFound { table: &'static str, id: u64 },
    #[error("{table} row has no id; create it before saving")]
    Unsaved { table: &'static str },
    #[error("store backend failed: {0}")]
    Backend(String),
}

pub trait FloorStore {
    fn create_floor(&mut self, floor: &mut Floor) -> Result<(), StoreError>;
    fn create_weapon(&mut self, weapon: &mut Weapon) -> Result<(), StoreError>;
    fn create_room(&mut self, room: &mut Room) -> Result<(), StoreError>;
    fn create_chest(&mut self, chest: &mut Chest) -> Result<(), StoreError>;
    fn create_enemy(&mut self, enemy: &mut Enemy) -> Result<(), StoreError>;
    fn create_player(&mut self, player: &mut Player) -> Result<(), StoreError>;
    fn create_game(&mut self, game: &mut Game) -> Result<(), StoreError>;
    fn save_room(&mut self, room: &Room) -> Result<(), StoreError>;
    fn save_floor(&mut self, floor: &Floor) -> Result<(), StoreError>;
}

/// Auto-increment table. Ids start at 1.
#[derive(Clone, Debug)]
struct Table<T> {
    name: &'static str,
    last_id: u64,
    rows: BTreeMap<u64, T>,
}

impl<T: Clone> Table<T> {
    fn new(name: &'static str) -> Self {
        Self { name, last_id: 0, rows: BTreeMap::new() }
    }

    fn create(&mut self, row: &mut T, set_id: impl FnOnce(&mut T, u64)) {
        self.last_id += 1;
        set_id(row, self.last_id);
        self.rows.insert(self.last_id, row.clone());
    }

    fn replace(&mut self, id: u64, row: &T) -> Result<(), StoreError> {
        if id == 0 {
            return Err(StoreError::Unsaved { table: self.name });
        }
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound { table: self.name, id }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MemoryStore {
    floors: Table<Floor>,
    rooms: Table<Room>,
    weapons: Table<Weapon>,
    chests: Table<Chest>,
    enemies: Table<Enemy>,
    players: Table<Player>,
    games: Table<Game>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Row count per table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub floors: usize,
    pub rooms: usize,
    pub weapons: usize,
    pub chests: usize,
    pub enemies: usize,
    pub players: usize,
    pub games: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            floors: Table::new("floors"),
            rooms: Table::new("rooms"),
            weapons: Table::new("weapons"),
            chests: Table::new("chests"),
            enemies: Table::new("enemies"),
            players: Table::new("players"),
            games: Table::new("games"),
        }
    }

    pub fn counts(&self) -> TableCounts {
        TableCounts {
            floors: self.floors.rows.len(),
            rooms: self.rooms.rows.len(),
            weapons: self.weapons.rows.len(),
            chests: self.chests.rows.len(),
            enemies: self.enemies.rows.len(),
            players: self.players.rows.len(),
            games: self.games.rows.len(),
        }
    }

    pub fn floor(&self, id: FloorId) -> Option<&Floor> {
        self.floors.rows.get(&id.0)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.rows.get(&id.0)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.rows.values()
    }

    pub fn weapon(&self, id: WeaponId) -> Option<&Weapon> {
        self.weapons.rows.get(&id.0)
    }

    pub fn chest(&self, id: ChestId) -> Option<&Chest> {
        self.chests.rows.get(&id.0)
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.rows.get(&id.0)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.rows.values()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.rows.get(&id.0)
    }

    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.games.rows.get(&id.0)
    }
}

impl FloorStore for MemoryStore {
    fn create_floor(&mut self, floor: &mut Floor) -> Result<(), StoreError> {
        self.floors.create(floor, |row, id| row.id = FloorId(id));
        Ok(())
    }

    fn create_weapon(&mut self, weapon: &mut Weapon) -> Result<(), StoreError> {
        self.weapons.create(weapon, |row, id| row.id = WeaponId(id));
        Ok(())
    }

    fn create_room(&mut self, room: &mut Room) -> Result<(), StoreError> {
        self.rooms.create(room, |row, id| row.id = RoomId(id));
        Ok(())
    }

    fn create_chest(&mut self, chest: &mut Chest) -> Result<(), StoreError> {
        self.chests.create(chest, |row, id| row.id = ChestId(id));
        Ok(())
    }

    fn create_enemy(&mut self, enemy: &mut Enemy) -> Result<(), StoreError> {
        self.enemies.create(enemy, |row, id| row.id = EnemyId(id));
        Ok(())
    }

    fn create_player(&mut self, player: &mut Player) -> Result<(), StoreError> {
        self.players.create(player, |row, id| row.id = PlayerId(id));
        Ok(())
    }

    fn create_game(&mut self, game: &mut Game) -> Result<(), StoreError> {
        self.games.create(game, |row, id| row.id = GameId(id));
        Ok(())
    }

    fn save_room(&mut self, room: &Room) -> Result<(), StoreError> {
        self.rooms.replace(room.id.0, room)
    }

    fn save_floor(&mut self, floor: &Floor) -> Result<(), StoreError> {
        self.floors.replace(floor.id.0, floor)
    }
}
