//! Level and difficulty scaling for weapon and enemy stats.

use log::warn;
use serde::{Deserialize, Serialize};

/// Growth per character level applied to base stats.
pub const LEVEL_MULTIPLIER: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn factor(self) -> f32 {
        match self {
            Self::Easy => 1.0,
            Self::Medium => 1.5,
            Self::Hard => 2.0,
        }
    }
}

/// Factor for a difficulty label. Unknown labels fall back to `1.0`.
pub fn difficulty_factor(label: &str) -> f32 {
    match Difficulty::from_label(label) {
        Some(difficulty) => difficulty.factor(),
        None => {
            warn!("unknown difficulty '{label}', using factor 1.0");
            1.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyTier {
    pub attack: f32,
    pub health: f32,
}

pub const ENEMY_TIERS: [EnemyTier; 3] = [
    EnemyTier { attack: 5.0, health: 5.0 },
    EnemyTier { attack: 7.5, health: 7.5 },
    EnemyTier { attack: 10.0, health: 10.0 },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub damage: f32,
    pub max_health: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityScaler {
    level: u32,
    difficulty_factor: f32,
}

impl EntityScaler {
    pub fn new(level: u32, difficulty_factor: f32) -> Self {
        Self { level, difficulty_factor }
    }

    pub fn from_labels(level: u32, difficulty: &str) -> Self {
        Self::new(level, difficulty_factor(difficulty))
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn difficulty_factor(&self) -> f32 {
        self.difficulty_factor
    }

    fn growth(&self) -> f32 {
        1.0 + self.level as f32 * LEVEL_MULTIPLIER
    }

    pub fn scale_weapon(&self, base_attack: f32) -> f32 {
        let growth = self.growth();
        f64::from(base_attack * growth * growth * self.difficulty_factor).ceil() as f32
    }

    pub fn scale_enemy(&self, base_attack: f32, base_health: f32) -> EnemyStats {
        let growth = self.growth();
        EnemyStats {
            damage: base_attack * growth * self.difficulty_factor,
            max_health: base_health * growth * growth * self.difficulty_factor,
        }
    }

    pub fn scale_tier(&self, tier: EnemyTier) -> EnemyStats {
        self.scale_enemy(tier.attack, tier.health)
    }
}

pub fn scale_weapon(base_attack: f32, level: u32, difficulty_factor: f32) -> f32 {
    EntityScaler::new(level, difficulty_factor).scale_weapon(base_attack)
}

pub fn scale_enemy(
    base_attack: f32,
    base_health: f32,
    level: u32,
    difficulty_factor: f32,
) -> EnemyStats {
    EntityScaler::new(level, difficulty_factor).scale_enemy(base_attack, base_health)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn known_labels_map_to_fixed_factors() {
        assert_eq!(difficulty_factor("easy"), 1.0);
        assert_eq!(difficulty_factor("medium"), 1.5);
        assert_eq!(difficulty_factor("hard"), 2.0);
    }

    #[test]
    fn unknown_label_falls_back_to_one() {
        assert_eq!(difficulty_factor("nightmare"), 1.0);
        assert_eq!(difficulty_factor(""), 1.0);
        assert_eq!(difficulty_factor("Hard"), 1.0);
    }

    #[test]
    fn weapon_damage_rounds_up() {
        // 4 * 1.1^2 * 1.5 = 7.26
        assert_eq!(scale_weapon(4.0, 1, 1.5), 8.0);
        assert_eq!(scale_weapon(10.0, 0, 1.0), 10.0);
    }

    #[test]
    fn enemy_health_grows_quadratically_and_damage_linearly() {
        let stats = scale_enemy(10.0, 10.0, 10, 1.0);
        assert!((stats.damage - 20.0).abs() < 1e-4);
        assert!((stats.max_health - 40.0).abs() < 1e-3);
    }

    #[test]
    fn level_zero_easy_keeps_base_stats() {
        let scaler = EntityScaler::from_labels(0, "easy");
        for tier in ENEMY_TIERS {
            let stats = scaler.scale_tier(tier);
            assert_eq!(stats.damage, tier.attack);
            assert_eq!(stats.max_health, tier.health);
        }
    }

    proptest! {
        #[test]
        fn outputs_do_not_decrease_with_level(
            base in 0.0_f32..100.0,
            level in 0_u32..200,
            difficulty in prop_oneof![Just(1.0_f32), Just(1.5), Just(2.0)]
        ) {
            let low = EntityScaler::new(level, difficulty);
            let high = EntityScaler::new(level + 1, difficulty);
            prop_assert!(high.scale_weapon(base) >= low.scale_weapon(base));
            let (a, b) = (low.scale_enemy(base, base), high.scale_enemy(base, base));
            prop_assert!(b.damage >= a.damage);
            prop_assert!(b.max_health >= a.max_health);
        }

        #[test]
        fn outputs_do_not_decrease_with_difficulty_rank(
            base in 0.0_f32..100.0,
            level in 0_u32..200
        ) {
            let ranked = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
            for pair in ranked.windows(2) {
                let lower = EntityScaler::new(level, pair[0].factor());
                let higher = EntityScaler::new(level, pair[1].factor());
                prop_assert!(higher.scale_weapon(base) >= lower.scale_weapon(base));
                let (a, b) = (lower.scale_enemy(base, base), higher.scale_enemy(base, base));
                prop_assert!(b.damage >= a.damage);
                prop_assert!(b.max_health >= a.max_health);
            }
        }
    }
}
