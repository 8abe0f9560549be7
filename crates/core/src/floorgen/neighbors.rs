//! Four-directional adjacency between occupied grid cells.

use std::collections::BTreeMap;

use crate::types::Direction;

use super::grid::Grid;

/// Neighboring grid room ids of one room, keyed by the ids stored in the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoomNeighbors {
    pub room_id: u32,
    pub top: Option<u32>,
    pub bottom: Option<u32>,
    pub left: Option<u32>,
    pub right: Option<u32>,
}

impl RoomNeighbors {
    pub fn get(&self, direction: Direction) -> Option<u32> {
        match direction {
            Direction::Top => self.top,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Present neighbors in `Direction::ALL` order.
    pub fn present(&self) -> impl Iterator<Item = (Direction, u32)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.get(direction).map(|room_id| (direction, room_id)))
    }
}

pub fn compute_neighbors(grid: &Grid) -> BTreeMap<u32, RoomNeighbors> {
    let mut neighbors = BTreeMap::new();
    for (pos, room_id) in grid.occupied() {
        let entry = RoomNeighbors {
            room_id,
            top: grid.neighbor(pos, Direction::Top),
            bottom: grid.neighbor(pos, Direction::Bottom),
            left: grid.neighbor(pos, Direction::Left),
            right: grid.neighbor(pos, Direction::Right),
        };
        neighbors.insert(room_id, entry);
    }
    neighbors
}
