//! Two-phase floor assembly.
//!
//! Phase one walks the grid in row-major order and creates one room per occupied
//! cell together with its weapon roll, optional chest, stair marker, and enemies.
//! Phase two links every room to its grid neighbors once all room ids exist. Only
//! the linked floor is handed back to callers.

use log::{debug, info};
use rand_chacha::rand_core::Rng;
use thiserror::Error;

use crate::config::FloorConfig;
use crate::store::{FloorStore, StoreError};
use crate::types::{Direction, FloorId, Pos, ROOM_COLS, ROOM_ROWS, RoomId, RoomType};

use super::grid::Grid;
use super::identity::{IdentityDesync, RoomIdentityMap};
use super::layout::{ContractError, FloorLayout, RoomTemplate, WeaponTemplate};
use super::model::{Chest, Enemy, Floor, Room, Weapon};
use super::neighbors::compute_neighbors;
use super::roll::{roll_below, roll_between};
use super::scaling::{ENEMY_TIERS, EntityScaler};
use super::tiles::{PlacementError, TileLocator};

/// Creation-order position of the room that receives the stairs.
pub const STAIR_ROOM_ORDINAL: usize = 6;
const CHEST_DIE_SIDES: usize = 4;
const CHEST_FACE: usize = 1;
/// Enemy count per room is uniform in `0..ENEMY_COUNT_SIDES`.
const ENEMY_COUNT_SIDES: usize = 4;

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),
    #[error("room {ordinal}: {source}")]
    Placement { ordinal: usize, source: PlacementError },
    #[error("identity desync: {0}")]
    IdentityDesync(#[from] IdentityDesync),
    #[error("could not encode floor field: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("floor has no rooms")]
    EmptyFloor,
}

/// Rooms created but not yet linked to each other.
struct PendingFloor {
    floor: Floor,
}

pub struct FloorAssembler<'a, S: FloorStore + ?Sized, R: Rng + ?Sized> {
    store: &'a mut S,
    rng: &'a mut R,
    scaler: EntityScaler,
    theme: String,
}

impl<'a, S, R> FloorAssembler<'a, S, R>
where
    S: FloorStore + ?Sized,
    R: Rng + ?Sized,
{
    pub fn new(store: &'a mut S, rng: &'a mut R, config: &FloorConfig) -> Self {
        Self {
            store,
            rng,
            scaler: EntityScaler::from_labels(config.level, &config.difficulty),
            theme: config.theme.clone(),
        }
    }

    pub fn assemble(mut self, layout: &FloorLayout) -> Result<Floor, AssemblyError> {
        layout.check_contract()?;
        let identity = RoomIdentityMap::build(&layout.grid)?;

        let pending = self.create_rooms(layout)?;
        let floor = self.link_rooms(pending, &identity, &layout.grid)?;

        info!(
            "assembled floor {} ({}): {} rooms, {} enemies, level {}, difficulty factor {}",
            floor.id.0,
            floor.theme,
            floor.rooms.len(),
            floor.enemy_count(),
            self.scaler.level(),
            self.scaler.difficulty_factor()
        );
        Ok(floor)
    }

    fn create_rooms(&mut self, layout: &FloorLayout) -> Result<PendingFloor, AssemblyError> {
        let mut floor = Floor {
            id: FloorId::default(),
            floor_map: serde_json::to_string(&layout.grid.to_rows())?,
            adjacency: serde_json::to_string(&layout.adjacency_hint)?,
            rooms: Vec::with_capacity(layout.grid.room_count()),
            story: layout.narrative.clone(),
            theme: self.theme.clone(),
        };
        self.store.create_floor(&mut floor)?;

        for (index, (grid_pos, grid_id)) in layout.grid.occupied().enumerate() {
            let ordinal = index + 1;
            let template = layout.room_template(ordinal)?;
            let room =
                self.create_room(floor.id, ordinal, grid_pos, template, &layout.weapon_pool)?;
            debug!(
                "room {ordinal} (grid id {grid_id}) at {grid_pos:?}: {:?}, {} enemies, chest: {}",
                room.room_type,
                room.enemies.len(),
                room.chest.is_some()
            );
            floor.rooms.push(room);
        }

        Ok(PendingFloor { floor })
    }

    fn create_room(
        &mut self,
        floor_id: FloorId,
        ordinal: usize,
        grid_pos: Pos,
        template: &RoomTemplate,
        weapon_pool: &[WeaponTemplate],
    ) -> Result<Room, AssemblyError> {
        let weapon = self.roll_weapon(weapon_pool)?;

        let mut room = Room::new(floor_id, grid_pos, template.as_str());
        self.store.create_room(&mut room)?;

        let locator = TileLocator::new(template);
        if roll_below(self.rng, CHEST_DIE_SIDES) == CHEST_FACE {
            let pos = locator
                .pick(self.rng)
                .map_err(|source| AssemblyError::Placement { ordinal, source })?;
            let mut chest = Chest {
                id: Default::default(),
                room_id: Some(room.id),
                weapon_id: Some(weapon.id),
                weapon: Some(weapon),
                pos,
            };
            self.store.create_chest(&mut chest)?;
            room.chest = Some(chest);
            room.room_type = RoomType::Chest;
        }

        // The type tag is reset here either way; a rolled chest stays attached.
        if ordinal == STAIR_ROOM_ORDINAL {
            let stair = locator
                .pick(self.rng)
                .map_err(|source| AssemblyError::Placement { ordinal, source })?;
            room.room_type = RoomType::Stair;
            room.stair = Some(stair);
        } else {
            room.room_type = RoomType::Normal;
        }

        let enemy_count = roll_below(self.rng, ENEMY_COUNT_SIDES);
        for _ in 0..enemy_count {
            let enemy = self.spawn_enemy(room.id)?;
            room.enemies.push(enemy);
        }

        self.store.save_room(&room)?;
        Ok(room)
    }

    fn roll_weapon(&mut self, weapon_pool: &[WeaponTemplate]) -> Result<Weapon, AssemblyError> {
        let template = &weapon_pool[roll_below(self.rng, weapon_pool.len())];
        let mut weapon = Weapon {
            id: Default::default(),
            damage: self.scaler.scale_weapon(template.attack),
            sprite: template.sprite.trim_matches('"').to_string(),
            kind: template.kind,
        };
        self.store.create_weapon(&mut weapon)?;
        Ok(weapon)
    }

    fn spawn_enemy(&mut self, room_id: RoomId) -> Result<Enemy, AssemblyError> {
        let tier_index = roll_below(self.rng, ENEMY_TIERS.len());
        let stats = self.scaler.scale_tier(ENEMY_TIERS[tier_index]);
        let x = roll_between(self.rng, 1, ROOM_COLS - 2);
        let y = roll_between(self.rng, 1, ROOM_ROWS - 2);

        let mut enemy = Enemy {
            id: Default::default(),
            room_id,
            level: tier_index as u8 + 1,
            damage: stats.damage,
            max_health: stats.max_health,
            current_health: stats.max_health,
            pos: Pos { y: y as i32, x: x as i32 },
            sprite: self.theme.clone(),
        };
        self.store.create_enemy(&mut enemy)?;
        Ok(enemy)
    }

    fn link_rooms(
        &mut self,
        pending: PendingFloor,
        identity: &RoomIdentityMap,
        grid: &Grid,
    ) -> Result<Floor, AssemblyError> {
        let PendingFloor { mut floor } = pending;
        let room_ids: Vec<RoomId> = floor.rooms.iter().map(|room| room.id).collect();
        let resolve = |grid_id: u32| -> Result<RoomId, IdentityDesync> {
            let index = identity.index_of(grid_id)?;
            room_ids.get(index).copied().ok_or(IdentityDesync::UnknownId { room_id: grid_id })
        };

        for (grid_id, neighbors) in compute_neighbors(grid) {
            let index = identity.index_of(grid_id)?;
            let Some(room) = floor.rooms.get_mut(index) else {
                return Err(IdentityDesync::UnknownId { room_id: grid_id }.into());
            };
            for direction in Direction::ALL {
                let linked = neighbors.get(direction).map(resolve).transpose()?;
                room.neighbors.set(direction, linked);
            }
            self.store.save_room(room)?;
        }

        self.store.save_floor(&floor)?;
        Ok(floor)
    }
}

/// Assembles one floor from `layout` with a fresh assembler.
pub fn assemble_floor<S, R>(
    layout: &FloorLayout,
    config: &FloorConfig,
    store: &mut S,
    rng: &mut R,
) -> Result<Floor, AssemblyError>
where
    S: FloorStore + ?Sized,
    R: Rng + ?Sized,
{
    FloorAssembler::new(store, rng, config).assemble(layout)
}
