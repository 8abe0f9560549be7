//! Persisted floor aggregate: floors, rooms, enemies, weapons, chests, and the player.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{
    ChestId, Direction, EnemyId, FloorId, GameId, PlayerId, Pos, RoomId, RoomType, WeaponId,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: WeaponId,
    pub damage: f32,
    pub sprite: String,
    #[serde(rename = "type")]
    pub kind: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chest {
    pub id: ChestId,
    pub room_id: Option<RoomId>,
    pub weapon_id: Option<WeaponId>,
    pub weapon: Option<Weapon>,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub room_id: RoomId,
    /// Tier tag (1..=3), unrelated to the floor level.
    pub level: u8,
    pub damage: f32,
    pub max_health: f32,
    pub current_health: f32,
    pub pos: Pos,
    pub sprite: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    pub top: Option<RoomId>,
    pub bottom: Option<RoomId>,
    pub left: Option<RoomId>,
    pub right: Option<RoomId>,
}

impl Neighbors {
    pub fn get(&self, direction: Direction) -> Option<RoomId> {
        match direction {
            Direction::Top => self.top,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn set(&mut self, direction: Direction, room: Option<RoomId>) {
        match direction {
            Direction::Top => self.top = room,
            Direction::Bottom => self.bottom = room,
            Direction::Left => self.left = room,
            Direction::Right => self.right = room,
        }
    }

    pub fn count(&self) -> usize {
        Direction::ALL.iter().filter(|&&direction| self.get(direction).is_some()).count()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub floor_id: FloorId,
    /// Cell of this room inside the floor grid.
    pub grid_pos: Pos,
    pub tiles: String,
    pub room_type: RoomType,
    pub neighbors: Neighbors,
    pub enemies: Vec<Enemy>,
    pub chest: Option<Chest>,
    pub stair: Option<Pos>,
    pub cleared: bool,
}

impl Room {
    pub fn new(floor_id: FloorId, grid_pos: Pos, tiles: &str) -> Self {
        Self {
            id: RoomId::default(),
            floor_id,
            grid_pos,
            tiles: tiles.to_string(),
            room_type: RoomType::Normal,
            neighbors: Neighbors::default(),
            enemies: Vec::new(),
            chest: None,
            stair: None,
            cleared: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    /// Grid as JSON text, the way it is stored alongside the floor row.
    pub floor_map: String,
    pub adjacency: String,
    pub rooms: Vec<Room>,
    pub story: String,
    pub theme: String,
}

impl Floor {
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn room_at(&self, grid_pos: Pos) -> Option<&Room> {
        self.rooms.iter().find(|room| room.grid_pos == grid_pos)
    }

    pub fn stair_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|room| room.room_type == RoomType::Stair)
    }

    pub fn enemy_count(&self) -> usize {
        self.rooms.iter().map(|room| room.enemies.len()).sum()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.id.0.to_le_bytes());
        push_str(&mut bytes, &self.floor_map);
        push_str(&mut bytes, &self.adjacency);
        push_str(&mut bytes, &self.story);
        push_str(&mut bytes, &self.theme);

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend(room.id.0.to_le_bytes());
            bytes.extend(room.grid_pos.y.to_le_bytes());
            bytes.extend(room.grid_pos.x.to_le_bytes());
            push_str(&mut bytes, &room.tiles);
            bytes.push(room.room_type.code());
            for direction in Direction::ALL {
                bytes.extend(room.neighbors.get(direction).map_or(0, |id| id.0).to_le_bytes());
            }
            match room.stair {
                Some(pos) => {
                    bytes.push(1);
                    bytes.extend(pos.y.to_le_bytes());
                    bytes.extend(pos.x.to_le_bytes());
                }
                None => bytes.push(0),
            }
            match &room.chest {
                Some(chest) => {
                    bytes.push(1);
                    bytes.extend(chest.id.0.to_le_bytes());
                    bytes.extend(chest.pos.y.to_le_bytes());
                    bytes.extend(chest.pos.x.to_le_bytes());
                    match &chest.weapon {
                        Some(weapon) => {
                            bytes.push(1);
                            bytes.extend(weapon.id.0.to_le_bytes());
                            bytes.extend(weapon.damage.to_le_bytes());
                            push_str(&mut bytes, &weapon.sprite);
                            bytes.extend(weapon.kind.to_le_bytes());
                        }
                        None => bytes.push(0),
                    }
                }
                None => bytes.push(0),
            }
            bytes.extend((room.enemies.len() as u32).to_le_bytes());
            for enemy in &room.enemies {
                bytes.extend(enemy.id.0.to_le_bytes());
                bytes.push(enemy.level);
                bytes.extend(enemy.damage.to_le_bytes());
                bytes.extend(enemy.max_health.to_le_bytes());
                bytes.extend(enemy.current_health.to_le_bytes());
                bytes.extend(enemy.pos.y.to_le_bytes());
                bytes.extend(enemy.pos.x.to_le_bytes());
            }
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_str(bytes: &mut Vec<u8>, text: &str) {
    bytes.extend((text.len() as u32).to_le_bytes());
    bytes.extend(text.as_bytes());
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub max_health: f32,
    pub current_health: f32,
    pub sprite: String,
    pub pos: Pos,
    pub primary_weapon_id: Option<WeaponId>,
    pub primary_weapon: Option<Weapon>,
    pub secondary_weapon_id: Option<WeaponId>,
    pub secondary_weapon: Option<Weapon>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub level: u32,
    pub floor_id: FloorId,
    pub floor: Floor,
    pub player_id: PlayerId,
    pub player: Player,
}

/// Formats a fingerprint as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_fingerprint(hash: u64) -> String {
    format!("0x{hash:016x}")
}
