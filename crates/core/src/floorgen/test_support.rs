//! Shared fixtures for the `floorgen` test suites.
//! Builds layouts directly so tests do not go through generator JSON.

use std::collections::BTreeMap;

use super::grid::Grid;
use super::layout::{FloorLayout, RoomTemplate, WeaponTemplate, room_slot_name};
use crate::types::{ROOM_COLS, ROOM_ROWS};

/// Walled room with an open interior and open doorways.
pub(crate) fn open_room_tiles() -> String {
    let mut text = String::with_capacity(ROOM_ROWS * ROOM_COLS);
    for y in 0..ROOM_ROWS {
        for x in 0..ROOM_COLS {
            let border = x == 0 || y == 0 || x == ROOM_COLS - 1 || y == ROOM_ROWS - 1;
            let doorway = (x == ROOM_COLS / 2 && (y == 0 || y == ROOM_ROWS - 1))
                || (y == ROOM_ROWS / 2 && (x == 0 || x == ROOM_COLS - 1));
            text.push(if border && !doorway { 'w' } else { '.' });
        }
    }
    text
}

pub(crate) fn solid_room_tiles() -> String {
    "w".repeat(ROOM_ROWS * ROOM_COLS)
}

pub(crate) fn weapon_pool() -> Vec<WeaponTemplate> {
    vec![
        WeaponTemplate { attack: 4.0, kind: 1, sprite: "\"sword\"".to_string() },
        WeaponTemplate { attack: 6.0, kind: 2, sprite: "spear".to_string() },
    ]
}

pub(crate) fn layout_with_rooms(rows: Vec<Vec<u32>>, tiles: Vec<String>) -> FloorLayout {
    let room_tiles: BTreeMap<String, RoomTemplate> = tiles
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let slot = room_slot_name(index + 1);
            let template = RoomTemplate::parse(&slot, text).unwrap();
            (slot, template)
        })
        .collect();
    FloorLayout {
        grid: Grid::from_rows(rows).unwrap(),
        room_tiles,
        adjacency_hint: Vec::new(),
        enemy_pool: Vec::new(),
        weapon_pool: weapon_pool(),
        narrative: "Water drips somewhere below.".to_string(),
        floor_tiles: None,
        wall_tiles: None,
    }
}

/// Layout whose every room slot gets the open room.
pub(crate) fn open_layout(rows: Vec<Vec<u32>>) -> FloorLayout {
    let rooms = rows.iter().flatten().filter(|&&cell| cell != 0).count();
    layout_with_rooms(rows, vec![open_room_tiles(); rooms])
}

/// 3x3 grid with seven rooms numbered in scan order.
pub(crate) fn seven_room_rows() -> Vec<Vec<u32>> {
    vec![vec![1, 2, 3], vec![0, 4, 5], vec![6, 7, 0]]
}
