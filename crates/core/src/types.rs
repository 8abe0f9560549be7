use serde::{Deserialize, Serialize};

/// Tile rows in every room interior template.
pub const ROOM_ROWS: usize = 9;
/// Tile columns in every room interior template.
pub const ROOM_COLS: usize = 13;
/// Character marking a walkable tile in a room template.
pub const WALKABLE_TILE: char = '.';

macro_rules! record_id {
    ($($name:ident),* $(,)?) => {
        $(
            /// Store-assigned identity. Zero means the record has not been created yet.
            #[derive(
                Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
                Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(pub u64);

            impl $name {
                pub fn is_persisted(self) -> bool {
                    self.0 != 0
                }
            }
        )*
    };
}

record_id!(FloorId, RoomId, EnemyId, WeaponId, ChestId, PlayerId, GameId);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    #[default]
    Normal,
    Chest,
    Stair,
}

impl RoomType {
    /// Numeric tag used by persisted rows and canonical encodings.
    pub fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Chest => 1,
            Self::Stair => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Top => (0, -1),
            Self::Bottom => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}
