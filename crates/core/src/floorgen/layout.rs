//! Decoding of the content generator's floor output into a validated layout.
//!
//! The generator emits one JSON object:
//!
//! ```json
//! {
//!   "floors": {
//!     "rooms": { "room1": [["w", "."], ...], ... },
//!     "floorMap": [[0, 1], [2, 3]],
//!     "adjacencyMatrix": [["", "E"], ...],
//!     "floorTiles": "stone",
//!     "wallTiles": "brick"
//!   },
//!   "enemies": [{ "attack": 5, "health": 5, "sprite": "goblin" }],
//!   "weapons": [{ "attack": 4, "type": 1, "sprite": "sword" }],
//!   "story": "..."
//! }
//! ```
//!
//! Room tiles may also arrive as a list of row strings or a single flat string.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Pos, ROOM_COLS, ROOM_ROWS, WALKABLE_TILE};

use super::grid::Grid;

/// The generator output does not match the expected shape.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("generator output is not valid floor JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("floor grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid { row: usize, expected: usize, found: usize },
    #[error("no tiles provided for room slot '{slot}'")]
    MissingRoomSlot { slot: String },
    #[error("room slot '{slot}' has {found} tiles, expected {expected}")]
    BadTileCount { slot: String, expected: usize, found: usize },
    #[error("weapon pool is empty but the floor has {rooms} rooms")]
    EmptyWeaponPool { rooms: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub attack: f32,
    #[serde(default)]
    pub health: f32,
    #[serde(default)]
    pub sprite: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponTemplate {
    pub attack: f32,
    #[serde(default, rename = "type")]
    pub kind: i32,
    #[serde(default)]
    pub sprite: String,
}

/// Flattened `ROOM_ROWS * ROOM_COLS` tile string for one room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomTemplate {
    text: String,
    walkable: Vec<bool>,
}

impl RoomTemplate {
    pub fn parse(slot: &str, text: String) -> Result<Self, ContractError> {
        let walkable: Vec<bool> = text.chars().map(|tile| tile == WALKABLE_TILE).collect();
        let expected = ROOM_ROWS * ROOM_COLS;
        if walkable.len() != expected {
            return Err(ContractError::BadTileCount {
                slot: slot.to_string(),
                expected,
                found: walkable.len(),
            });
        }
        Ok(Self { text, walkable })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= ROOM_COLS || pos.y as usize >= ROOM_ROWS {
            return false;
        }
        self.walkable[pos.y as usize * ROOM_COLS + pos.x as usize]
    }
}

/// Validated generator output, ready for assembly.
#[derive(Clone, Debug)]
pub struct FloorLayout {
    pub grid: Grid,
    pub room_tiles: BTreeMap<String, RoomTemplate>,
    /// Direction letters between room ids; carried through, never consulted.
    pub adjacency_hint: Vec<Vec<String>>,
    pub enemy_pool: Vec<EnemyTemplate>,
    pub weapon_pool: Vec<WeaponTemplate>,
    pub narrative: String,
    pub floor_tiles: Option<String>,
    pub wall_tiles: Option<String>,
}

impl FloorLayout {
    /// Tiles for the room created `ordinal`-th (1-based) in scan order.
    pub fn room_template(&self, ordinal: usize) -> Result<&RoomTemplate, ContractError> {
        let slot = room_slot_name(ordinal);
        self.room_tiles.get(&slot).ok_or(ContractError::MissingRoomSlot { slot })
    }

    /// Checks everything assembly relies on before anything is written.
    pub fn check_contract(&self) -> Result<(), ContractError> {
        let rooms = self.grid.room_count();
        for ordinal in 1..=rooms {
            self.room_template(ordinal)?;
        }
        if rooms > 0 && self.weapon_pool.is_empty() {
            return Err(ContractError::EmptyWeaponPool { rooms });
        }
        Ok(())
    }
}

pub fn room_slot_name(ordinal: usize) -> String {
    format!("room{ordinal}")
}

#[derive(Deserialize)]
struct RawFloorData {
    floors: RawFloors,
    #[serde(default)]
    enemies: Vec<EnemyTemplate>,
    #[serde(default)]
    weapons: Vec<WeaponTemplate>,
    #[serde(default)]
    story: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFloors {
    #[serde(default)]
    rooms: BTreeMap<String, RawRoomTiles>,
    floor_map: Vec<Vec<u32>>,
    #[serde(default)]
    adjacency_matrix: Vec<Vec<String>>,
    #[serde(default)]
    floor_tiles: Option<String>,
    #[serde(default)]
    wall_tiles: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRoomTiles {
    Matrix(Vec<Vec<String>>),
    Lines(Vec<String>),
    Flat(String),
}

impl RawRoomTiles {
    fn flatten(self) -> String {
        match self {
            Self::Matrix(rows) => rows.into_iter().flatten().collect(),
            Self::Lines(lines) => lines.concat(),
            Self::Flat(text) => text,
        }
    }
}

pub fn parse_layout(raw: &str) -> Result<FloorLayout, ContractError> {
    let data: RawFloorData = serde_json::from_str(raw.trim())?;
    let grid = Grid::from_rows(data.floors.floor_map)?;

    let mut room_tiles = BTreeMap::new();
    for (slot, tiles) in data.floors.rooms {
        let template = RoomTemplate::parse(&slot, tiles.flatten())?;
        room_tiles.insert(slot, template);
    }

    let layout = FloorLayout {
        grid,
        room_tiles,
        adjacency_hint: data.floors.adjacency_matrix,
        enemy_pool: data.enemies,
        weapon_pool: data.weapons,
        narrative: data.story,
        floor_tiles: data.floors.floor_tiles,
        wall_tiles: data.floors.wall_tiles,
    };
    layout.check_contract()?;

    debug!(
        "parsed layout: {}x{} grid, {} rooms, {} weapon templates",
        layout.grid.width(),
        layout.grid.height(),
        layout.grid.room_count(),
        layout.weapon_pool.len()
    );
    Ok(layout)
}
