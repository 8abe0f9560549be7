//! Generator-shaped JSON fixtures shared by the integration suites.

#![allow(dead_code)]

use delve_core::{ROOM_COLS, ROOM_ROWS};
use serde_json::{Map, Value, json};

pub const SEVEN_ROOMS: [[u32; 3]; 3] = [[1, 2, 3], [0, 4, 5], [6, 7, 0]];
/// Same shape as `SEVEN_ROOMS` with ids shuffled the way the generator emits them.
pub const SEVEN_ROOMS_SHUFFLED: [[u32; 3]; 3] = [[4, 7, 1], [0, 2, 6], [5, 3, 0]];

/// Walled room rows with a pillar whose position identifies the slot.
pub fn room_rows(slot: usize) -> Vec<Vec<String>> {
    let pillar = (1 + (slot - 1) % (ROOM_COLS - 2), 2 + (slot - 1) / (ROOM_COLS - 2));
    (0..ROOM_ROWS)
        .map(|y| {
            (0..ROOM_COLS)
                .map(|x| {
                    let border = x == 0 || y == 0 || x == ROOM_COLS - 1 || y == ROOM_ROWS - 1;
                    let tile = if border || (x, y) == pillar { "w" } else { "." };
                    tile.to_string()
                })
                .collect()
        })
        .collect()
}

pub fn room_text(slot: usize) -> String {
    room_rows(slot).into_iter().flatten().collect()
}

pub fn grid_rows<const W: usize>(rows: &[[u32; W]]) -> Vec<Vec<u32>> {
    rows.iter().map(|row| row.to_vec()).collect()
}

pub fn generator_output(floor_map: &[Vec<u32>]) -> String {
    let room_count = floor_map.iter().flatten().filter(|&&cell| cell != 0).count();
    let rooms: Map<String, Value> =
        (1..=room_count).map(|slot| (format!("room{slot}"), json!(room_rows(slot)))).collect();

    json!({
        "floors": {
            "rooms": rooms,
            "floorMap": floor_map,
            "adjacencyMatrix": [["", "E"], ["W", ""]],
            "floorTiles": "stone",
            "wallTiles": "brick"
        },
        "enemies": [
            { "attack": 5, "health": 5, "sprite": "goblin" },
            { "attack": 7, "health": 9, "sprite": "bat" }
        ],
        "weapons": [
            { "attack": 4, "type": 1, "sprite": "\"sword\"" },
            { "attack": 3, "type": 2, "sprite": "\"bow\"" }
        ],
        "story": "The torches gutter as you descend."
    })
    .to_string()
}
