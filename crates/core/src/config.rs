use serde::{Deserialize, Serialize};

use crate::floorgen::scaling::{Difficulty, difficulty_factor};

pub const DEFAULT_THEME: &str = "cave";
pub const DEFAULT_DIFFICULTY: &str = "easy";
pub const STARTING_LEVEL: u32 = 1;

/// Inputs that shape one floor: the theme tag, the difficulty label, and the level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub theme: String,
    /// Free-form label; unknown values scale like `easy`.
    pub difficulty: String,
    pub level: u32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            difficulty: DEFAULT_DIFFICULTY.to_string(),
            level: STARTING_LEVEL,
        }
    }
}

impl FloorConfig {
    pub fn difficulty_factor(&self) -> f32 {
        difficulty_factor(&self.difficulty)
    }

    pub fn known_difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_label(&self.difficulty)
    }

    /// Same theme and difficulty one level deeper.
    pub fn descend(&self) -> Self {
        Self { level: self.level + 1, ..self.clone() }
    }
}
