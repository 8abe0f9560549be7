//! Walkable tile selection inside a single room template.

use rand_chacha::rand_core::Rng;
use thiserror::Error;

use crate::types::{Pos, ROOM_COLS, ROOM_ROWS};

use super::layout::RoomTemplate;
use super::roll::roll_below;

const MID_X: i32 = (ROOM_COLS / 2) as i32;
const MID_Y: i32 = (ROOM_ROWS / 2) as i32;

/// Door tiles at the middle of each room side. Never used for placement.
pub const ENTRANCES: [Pos; 4] = [
    Pos { y: 0, x: MID_X },
    Pos { y: ROOM_ROWS as i32 - 1, x: MID_X },
    Pos { y: MID_Y, x: 0 },
    Pos { y: MID_Y, x: ROOM_COLS as i32 - 1 },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("room has no walkable interior tile outside its entrances")]
    NoWalkableTile,
}

pub fn is_entrance(pos: Pos) -> bool {
    ENTRANCES.contains(&pos)
}

/// Interior tiles that can hold a chest, stair, or player.
#[derive(Clone, Debug)]
pub struct TileLocator {
    candidates: Vec<Pos>,
}

impl TileLocator {
    pub fn new(template: &RoomTemplate) -> Self {
        let mut candidates = Vec::new();
        for y in 1..(ROOM_ROWS - 1) {
            for x in 1..(ROOM_COLS - 1) {
                let pos = Pos { y: y as i32, x: x as i32 };
                if !is_entrance(pos) && template.is_walkable(pos) {
                    candidates.push(pos);
                }
            }
        }
        Self { candidates }
    }

    pub fn candidates(&self) -> &[Pos] {
        &self.candidates
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Pos, PlacementError> {
        if self.candidates.is_empty() {
            return Err(PlacementError::NoWalkableTile);
        }
        Ok(self.candidates[roll_below(rng, self.candidates.len())])
    }
}

pub fn pick_location<R: Rng + ?Sized>(
    template: &RoomTemplate,
    rng: &mut R,
) -> Result<Pos, PlacementError> {
    TileLocator::new(template).pick(rng)
}
