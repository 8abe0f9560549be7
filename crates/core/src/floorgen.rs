//! Floor assembly from generator output, split into coherent submodules.

pub mod assembler;
pub mod grid;
pub mod identity;
pub mod layout;
pub mod model;
pub mod neighbors;
pub mod scaling;
pub mod tiles;

mod roll;
#[cfg(test)]
pub(crate) mod test_support;

pub use assembler::{AssemblyError, FloorAssembler, STAIR_ROOM_ORDINAL, assemble_floor};
pub use grid::Grid;
pub use identity::{IdentityDesync, RoomIdentityMap};
pub use layout::{ContractError, FloorLayout, RoomTemplate, parse_layout};
pub use model::{Chest, Enemy, Floor, Game, Neighbors, Player, Room, Weapon, format_fingerprint};
pub use neighbors::{RoomNeighbors, compute_neighbors};
pub use scaling::{Difficulty, EntityScaler, difficulty_factor, scale_enemy, scale_weapon};
pub use tiles::{PlacementError, TileLocator, pick_location};
