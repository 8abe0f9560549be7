//! New-run construction: the first floor, the starting weapon, and the player.
//! Later floors go through `next_floor` and keep the caller's level.

use log::info;
use rand_chacha::rand_core::Rng;

use crate::config::{FloorConfig, STARTING_LEVEL};
use crate::floorgen::{
    AssemblyError, Floor, FloorLayout, Game, Player, TileLocator, Weapon, assemble_floor,
};
use crate::store::FloorStore;

pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_SPRITE: &str = "Knight";
pub const PRIMARY_WEAPON_DAMAGE: f32 = 10.0;
pub const PRIMARY_WEAPON_SPRITE: &str = "Primary";
pub const PRIMARY_WEAPON_KIND: i32 = 1;

pub fn start_game<S, R>(
    layout: &FloorLayout,
    config: &FloorConfig,
    store: &mut S,
    rng: &mut R,
) -> Result<Game, AssemblyError>
where
    S: FloorStore + ?Sized,
    R: Rng + ?Sized,
{
    if layout.grid.room_count() == 0 {
        return Err(AssemblyError::EmptyFloor);
    }

    let config = FloorConfig { level: STARTING_LEVEL, ..config.clone() };
    let floor = assemble_floor(layout, &config, store, rng)?;

    let mut weapon = Weapon {
        id: Default::default(),
        damage: PRIMARY_WEAPON_DAMAGE,
        sprite: PRIMARY_WEAPON_SPRITE.to_string(),
        kind: PRIMARY_WEAPON_KIND,
    };
    store.create_weapon(&mut weapon)?;

    let start = TileLocator::new(layout.room_template(1)?)
        .pick(rng)
        .map_err(|source| AssemblyError::Placement { ordinal: 1, source })?;
    let mut player = Player {
        id: Default::default(),
        max_health: PLAYER_MAX_HEALTH,
        current_health: PLAYER_MAX_HEALTH,
        sprite: PLAYER_SPRITE.to_string(),
        pos: start,
        primary_weapon_id: Some(weapon.id),
        primary_weapon: Some(weapon),
        secondary_weapon_id: None,
        secondary_weapon: None,
    };
    store.create_player(&mut player)?;

    let mut game = Game {
        id: Default::default(),
        level: STARTING_LEVEL,
        floor_id: floor.id,
        floor,
        player_id: player.id,
        player,
    };
    store.create_game(&mut game)?;

    info!(
        "started game {} on floor {} with player at {:?}",
        game.id.0, game.floor_id.0, game.player.pos
    );
    Ok(game)
}

/// Assembles a follow-up floor at `config.level`.
pub fn next_floor<S, R>(
    layout: &FloorLayout,
    config: &FloorConfig,
    store: &mut S,
    rng: &mut R,
) -> Result<Floor, AssemblyError>
where
    S: FloorStore + ?Sized,
    R: Rng + ?Sized,
{
    assemble_floor(layout, config, store, rng)
}
