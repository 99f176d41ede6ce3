use crate::character::attributes::AttributeType;
use crate::character::stats::StatProvider;
use crate::core::constants::BASE_ATTRIBUTE_VALUE;
use crate::spells::aspect::Element;
use serde::{Deserialize, Serialize};

/// World theme, chosen from the difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorldTheme {
    Grassland,
    Ice,
    Shadow,
    Elemental,
    Cosmic,
}

impl WorldTheme {
    pub fn all() -> [WorldTheme; 5] {
        [
            WorldTheme::Grassland,
            WorldTheme::Ice,
            WorldTheme::Shadow,
            WorldTheme::Elemental,
            WorldTheme::Cosmic,
        ]
    }

    /// Theme for a (clamped) difficulty level.
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=4 => WorldTheme::Grassland,
            5..=8 => WorldTheme::Ice,
            9..=12 => WorldTheme::Shadow,
            13..=18 => WorldTheme::Elemental,
            _ => WorldTheme::Cosmic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WorldTheme::Grassland => "Grassland",
            WorldTheme::Ice => "Ice",
            WorldTheme::Shadow => "Shadow",
            WorldTheme::Elemental => "Elemental",
            WorldTheme::Cosmic => "Cosmic",
        }
    }
}

/// Enemy strength bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyTier {
    Basic,
    Elite,
    Champion,
    Ancient,
    Boss,
}

impl EnemyTier {
    pub fn all() -> [EnemyTier; 5] {
        [
            EnemyTier::Basic,
            EnemyTier::Elite,
            EnemyTier::Champion,
            EnemyTier::Ancient,
            EnemyTier::Boss,
        ]
    }

    /// Tier for a (clamped) difficulty level.
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=3 => EnemyTier::Basic,
            4..=6 => EnemyTier::Elite,
            7..=10 => EnemyTier::Champion,
            11..=15 => EnemyTier::Ancient,
            _ => EnemyTier::Boss,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyTier::Basic => "Basic",
            EnemyTier::Elite => "Elite",
            EnemyTier::Champion => "Champion",
            EnemyTier::Ancient => "Ancient",
            EnemyTier::Boss => "Boss",
        }
    }
}

/// Static enemy definition before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub hp_base: u32,
    pub aspect: Element,
}

/// A scaled opponent for one combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyInstance {
    pub name: String,
    pub hit_points: u32,
    pub max_hit_points: u32,
    pub aspect: Element,
    pub level: u32,
    pub tier: EnemyTier,
    pub theme: WorldTheme,
    pub difficulty_multiplier: f64,
}

impl EnemyInstance {
    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// Applies damage, flooring hit points at zero. Returns the damage taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.hit_points);
        self.hit_points -= taken;
        taken
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hit_points == 0 {
            0.0
        } else {
            self.hit_points as f64 / self.max_hit_points as f64
        }
    }
}

/// Enemies fight with untrained scores and no armor; their threat comes
/// from hit points and the fixed enemy damage range.
impl StatProvider for EnemyInstance {
    fn total_stat(&self, _attr: AttributeType) -> i32 {
        BASE_ATTRIBUTE_VALUE
    }

    fn armor_class(&self) -> Option<i32> {
        None
    }

    fn max_hp_for_level(&self, _level: u32) -> u32 {
        self.max_hit_points
    }

    fn max_mana_for_level(&self, _level: u32) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EnemyInstance {
        EnemyInstance {
            name: "Field Rat".to_string(),
            hit_points: 50,
            max_hit_points: 50,
            aspect: Element::Earth,
            level: 1,
            tier: EnemyTier::Basic,
            theme: WorldTheme::Grassland,
            difficulty_multiplier: 1.0,
        }
    }

    #[test]
    fn test_theme_ranges() {
        assert_eq!(WorldTheme::for_level(1), WorldTheme::Grassland);
        assert_eq!(WorldTheme::for_level(4), WorldTheme::Grassland);
        assert_eq!(WorldTheme::for_level(5), WorldTheme::Ice);
        assert_eq!(WorldTheme::for_level(8), WorldTheme::Ice);
        assert_eq!(WorldTheme::for_level(12), WorldTheme::Shadow);
        assert_eq!(WorldTheme::for_level(13), WorldTheme::Elemental);
        assert_eq!(WorldTheme::for_level(18), WorldTheme::Elemental);
        assert_eq!(WorldTheme::for_level(19), WorldTheme::Cosmic);
        assert_eq!(WorldTheme::for_level(25), WorldTheme::Cosmic);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(EnemyTier::for_level(3), EnemyTier::Basic);
        assert_eq!(EnemyTier::for_level(4), EnemyTier::Elite);
        assert_eq!(EnemyTier::for_level(6), EnemyTier::Elite);
        assert_eq!(EnemyTier::for_level(10), EnemyTier::Champion);
        assert_eq!(EnemyTier::for_level(15), EnemyTier::Ancient);
        assert_eq!(EnemyTier::for_level(16), EnemyTier::Boss);
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut enemy = sample();
        assert_eq!(enemy.take_damage(20), 20);
        assert_eq!(enemy.hit_points, 30);
        assert_eq!(enemy.take_damage(100), 30);
        assert_eq!(enemy.hit_points, 0);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_enemy_stats_are_baseline() {
        let enemy = sample();
        let stats = enemy.stats();
        assert_eq!(stats.dexterity, 10);
        assert_eq!(stats.armor_class, None);
    }
}
