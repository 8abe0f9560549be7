use anyhow::{Result, bail};
use clap::Parser;
use delve_core::floorgen::tiles::is_entrance;
use delve_core::floorgen::{AssemblyError, PlacementError, RoomTemplate};
use delve_core::{
    Direction, FloorConfig, MemoryStore, Pos, ROOM_COLS, ROOM_ROWS, RoomType, assemble_floor,
    parse_layout,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde_json::{Map, Value, json};

#[derive(Parser)]
#[command(author, version, about = "Assemble random layouts and check floor invariants", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    runs: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_grid(rng: &mut ChaCha8Rng) -> Vec<Vec<u32>> {
    let width = 1 + rng.next_u64() as usize % 5;
    let height = 1 + rng.next_u64() as usize % 5;
    let mut next_id = 0;
    let mut rows = vec![vec![0; width]; height];
    for cell in rows.iter_mut().flatten() {
        if rng.next_u64() % 3 != 0 {
            next_id += 1;
            *cell = next_id;
        }
    }

    // Shuffle ids so they stop matching scan order.
    let mut ids: Vec<u32> = (1..=next_id).collect();
    for index in (1..ids.len()).rev() {
        ids.swap(index, rng.next_u64() as usize % (index + 1));
    }
    for cell in rows.iter_mut().flatten().filter(|cell| **cell != 0) {
        *cell = ids[*cell as usize - 1];
    }
    rows
}

/// Mostly open room; one in sixteen has no usable interior at all.
fn random_room(rng: &mut ChaCha8Rng) -> String {
    let solid = rng.next_u64() % 16 == 0;
    let mut text = String::with_capacity(ROOM_ROWS * ROOM_COLS);
    for y in 0..ROOM_ROWS {
        for x in 0..ROOM_COLS {
            let border = x == 0 || y == 0 || x == ROOM_COLS - 1 || y == ROOM_ROWS - 1;
            let open = !solid && !border && rng.next_u64() % 4 != 0;
            text.push(if open { '.' } else { 'w' });
        }
    }
    text
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    println!("Starting floor fuzz on seed {} for {} runs...", args.seed, args.runs);

    let mut placement_failures = 0;
    for run in 0..args.runs {
        let rows = random_grid(&mut rng);
        let room_count = rows.iter().flatten().filter(|&&cell| cell != 0).count();
        let tiles: Vec<String> = (0..room_count).map(|_| random_room(&mut rng)).collect();
        let rooms: Map<String, Value> = tiles
            .iter()
            .enumerate()
            .map(|(index, text)| (format!("room{}", index + 1), json!(text)))
            .collect();
        let raw = json!({
            "floors": { "rooms": rooms, "floorMap": rows },
            "weapons": [{ "attack": 4, "type": 1, "sprite": "sword" }]
        })
        .to_string();

        let config = FloorConfig {
            difficulty: choose(&mut rng, &["easy", "medium", "hard", "nightmare"]).to_string(),
            level: 1 + rng.next_u64() as u32 % 20,
            ..FloorConfig::default()
        };
        let layout = parse_layout(&raw)?;
        let mut store = MemoryStore::new();
        let mut floor_rng = ChaCha8Rng::seed_from_u64(rng.next_u64());

        let floor = match assemble_floor(&layout, &config, &mut store, &mut floor_rng) {
            Ok(floor) => floor,
            Err(AssemblyError::Placement { source: PlacementError::NoWalkableTile, .. }) => {
                placement_failures += 1;
                continue;
            }
            Err(err) => bail!("run {run}: unexpected assembly error: {err}"),
        };

        // Assert invariants
        assert_eq!(floor.rooms.len(), room_count, "run {run}: room count");
        let stairs = floor.rooms.iter().filter(|room| room.room_type == RoomType::Stair).count();
        assert_eq!(stairs, usize::from(room_count >= 6), "run {run}: stair count");

        for (index, room) in floor.rooms.iter().enumerate() {
            assert_eq!(room.tiles, tiles[index], "run {run}: room{} tiles", index + 1);
            let template = RoomTemplate::parse("room", room.tiles.clone())?;
            for pos in room.chest.iter().map(|chest| chest.pos).chain(room.stair) {
                assert!(template.is_walkable(pos) && !is_entrance(pos), "run {run}: {pos:?}");
            }
            for direction in Direction::ALL {
                let (dx, dy) = direction.offset();
                let beside = Pos::new(room.grid_pos.x + dx, room.grid_pos.y + dy);
                let expected = floor.room_at(beside).map(|other| other.id);
                assert_eq!(room.neighbors.get(direction), expected, "run {run}: {direction:?}");
            }
        }
    }

    println!(
        "Fuzz completed: {} runs, {} stopped on rooms without free tiles",
        args.runs, placement_failures
    );
    Ok(())
}
