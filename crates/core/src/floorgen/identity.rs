//! Mapping from grid room ids to the scan-order index of the room created for them.

use std::collections::BTreeMap;

use log::warn;
use thiserror::Error;

use crate::types::Pos;

use super::grid::Grid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityDesync {
    #[error("grid room id {room_id} appears at both {first:?} and {second:?}")]
    DuplicateId { room_id: u32, first: Pos, second: Pos },
    #[error("grid room id {room_id} has no created room")]
    UnknownId { room_id: u32 },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomIdentityMap {
    index_by_id: BTreeMap<u32, (usize, Pos)>,
}

impl RoomIdentityMap {
    pub fn build(grid: &Grid) -> Result<Self, IdentityDesync> {
        let mut index_by_id = BTreeMap::new();
        for (index, (pos, room_id)) in grid.occupied().enumerate() {
            if let Some(&(_, first)) = index_by_id.get(&room_id) {
                return Err(IdentityDesync::DuplicateId { room_id, first, second: pos });
            }
            index_by_id.insert(room_id, (index, pos));
        }

        let map = Self { index_by_id };
        if !map.is_positional() {
            warn!("grid room ids do not follow scan order; linking through explicit id mapping");
        }
        Ok(map)
    }

    /// Scan-order index (0-based) of the room created for `room_id`.
    pub fn index_of(&self, room_id: u32) -> Result<usize, IdentityDesync> {
        self.index_by_id
            .get(&room_id)
            .map(|&(index, _)| index)
            .ok_or(IdentityDesync::UnknownId { room_id })
    }

    pub fn len(&self) -> usize {
        self.index_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_by_id.is_empty()
    }

    /// True when every grid value equals its 1-based scan-order position.
    pub fn is_positional(&self) -> bool {
        self.index_by_id.iter().all(|(&room_id, &(index, _))| room_id as usize == index + 1)
    }
}
