mod support;

use delve_core::floorgen::{Chest, Enemy, Player, Room, Weapon};
use delve_core::{
    AssemblyError, Floor, FloorConfig, FloorStore, Game, MemoryStore, StoreError, assemble_floor,
    parse_layout,
};
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use support::*;

/// Memory store that starts failing after a fixed number of writes.
struct FlakyStore {
    inner: MemoryStore,
    writes_left: usize,
}

impl FlakyStore {
    fn new(writes_left: usize) -> Self {
        Self { inner: MemoryStore::new(), writes_left }
    }

    fn spend(&mut self) -> Result<(), StoreError> {
        if self.writes_left == 0 {
            return Err(StoreError::Backend("connection reset".to_string()));
        }
        self.writes_left -= 1;
        Ok(())
    }
}

impl FloorStore for FlakyStore {
    fn create_floor(&mut self, floor: &mut Floor) -> Result<(), StoreError> {
        self.spend()?;
        self.inner.create_floor(floor)
    }

    fn create_weapon(&mut self, weapon: &mut Weapon) -> Result<(), StoreError> {
        self.spend()?;
        self.inner.create_weapon(weapon)
    }

    fn create_room(&mut self, room: &mut Room) -> Result<(), StoreError> {
        self.spend()?;
        self.inner.create_room(room)
    }

    fn create_chest(&mut self, chest: &mut Chest) -> Result<(), StoreError> {
        self.spend()?;
        self.inner.create_chest(chest)
    }

    fn create_enemy(&mut self, enemy: &mut Enemy) -> Result<(), StoreError> {
        self.spend()?;
        self.inner.create_enemy(enemy)
    }

    fn create_player(&mut self, player: &mut Player) -> Result<(), StoreError> {
        self.spend()?;
        self.inner.create_player(player)
    }

    fn create_game(&mut self, game: &mut Game) -> Result<(), StoreError> {
        self.spend()?;
        self.inner.create_game(game)
    }

    fn save_room(&mut self, room: &Room) -> Result<(), StoreError> {
        self.spend()?;
        self.inner.save_room(room)
    }

    fn save_floor(&mut self, floor: &Floor) -> Result<(), StoreError> {
        self.spend()?;
        self.inner.save_floor(floor)
    }
}

fn writes_needed(seed: u64) -> usize {
    let layout = parse_layout(&generator_output(&grid_rows(&SEVEN_ROOMS))).unwrap();
    let mut store = FlakyStore::new(usize::MAX);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    assemble_floor(&layout, &FloorConfig::default(), &mut store, &mut rng).unwrap();
    usize::MAX - store.writes_left
}

#[test]
fn any_failed_write_aborts_with_a_persistence_error() {
    let layout = parse_layout(&generator_output(&grid_rows(&SEVEN_ROOMS))).unwrap();
    let total = writes_needed(31);

    for budget in 0..total {
        let mut store = FlakyStore::new(budget);
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let err = assemble_floor(&layout, &FloorConfig::default(), &mut store, &mut rng)
            .expect_err("assembly should stop at the failing write");
        assert!(
            matches!(err, AssemblyError::Persistence(StoreError::Backend(_))),
            "budget {budget}: {err}"
        );
    }
}

#[test]
fn exact_write_budget_is_enough() {
    let layout = parse_layout(&generator_output(&grid_rows(&SEVEN_ROOMS))).unwrap();
    let total = writes_needed(31);
    let mut store = FlakyStore::new(total);
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let floor = assemble_floor(&layout, &FloorConfig::default(), &mut store, &mut rng).unwrap();
    assert_eq!(store.writes_left, 0);
    assert_eq!(store.inner.floor(floor.id), Some(&floor));
}

#[test]
fn first_write_failure_leaves_the_store_empty() {
    let layout = parse_layout(&generator_output(&grid_rows(&SEVEN_ROOMS))).unwrap();
    let mut store = FlakyStore::new(0);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert!(assemble_floor(&layout, &FloorConfig::default(), &mut store, &mut rng).is_err());
    assert_eq!(store.inner.counts().floors, 0);
}
