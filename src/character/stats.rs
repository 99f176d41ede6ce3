//! Effective combat statistics.
//!
//! The combat core never reads base attributes directly. It asks a
//! [`StatProvider`] for totals (base plus equipment) and works on the
//! resulting [`CombatantStats`] snapshot, recomputed for every resolution.

use super::attributes::{score_modifier, AttributeType};

/// Source of a combatant's effective attributes.
pub trait StatProvider {
    /// Total score for `attr` including equipment bonuses.
    fn total_stat(&self, attr: AttributeType) -> i32;

    /// Armor class, or `None` for combatants that defend with dexterity alone.
    fn armor_class(&self) -> Option<i32>;

    fn max_hp_for_level(&self, level: u32) -> u32;

    fn max_mana_for_level(&self, level: u32) -> u32;

    /// Damage range of a basic physical attack.
    fn weapon_damage(&self) -> (u32, u32) {
        crate::core::constants::PLAYER_UNARMED_DAMAGE
    }

    /// Snapshot of every total, taken once per resolution call.
    fn stats(&self) -> CombatantStats {
        CombatantStats {
            strength: self.total_stat(AttributeType::Strength),
            dexterity: self.total_stat(AttributeType::Dexterity),
            constitution: self.total_stat(AttributeType::Constitution),
            intelligence: self.total_stat(AttributeType::Intelligence),
            wisdom: self.total_stat(AttributeType::Wisdom),
            charisma: self.total_stat(AttributeType::Charisma),
            armor_class: self.armor_class(),
        }
    }
}

/// Immutable view of one combatant's totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatantStats {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub armor_class: Option<i32>,
}

impl Default for CombatantStats {
    fn default() -> Self {
        Self::uniform(crate::core::constants::BASE_ATTRIBUTE_VALUE)
    }
}

impl CombatantStats {
    pub fn uniform(value: i32) -> Self {
        Self {
            strength: value,
            dexterity: value,
            constitution: value,
            intelligence: value,
            wisdom: value,
            charisma: value,
            armor_class: None,
        }
    }

    pub fn get(&self, attr: AttributeType) -> i32 {
        match attr {
            AttributeType::Strength => self.strength,
            AttributeType::Dexterity => self.dexterity,
            AttributeType::Constitution => self.constitution,
            AttributeType::Intelligence => self.intelligence,
            AttributeType::Wisdom => self.wisdom,
            AttributeType::Charisma => self.charisma,
        }
    }

    /// Floor-divided modifier, may be negative.
    pub fn modifier(&self, attr: AttributeType) -> i32 {
        score_modifier(self.get(attr))
    }

    /// Modifier clamped at zero, used for damage and healing bonuses.
    pub fn bonus(&self, attr: AttributeType) -> u32 {
        self.modifier(attr).max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(i32);

    impl StatProvider for Fixed {
        fn total_stat(&self, _attr: AttributeType) -> i32 {
            self.0
        }
        fn armor_class(&self) -> Option<i32> {
            Some(12)
        }
        fn max_hp_for_level(&self, level: u32) -> u32 {
            level * 10
        }
        fn max_mana_for_level(&self, level: u32) -> u32 {
            level * 2
        }
    }

    #[test]
    fn test_snapshot_reads_every_total() {
        let stats = Fixed(14).stats();
        for attr in AttributeType::all() {
            assert_eq!(stats.get(attr), 14);
        }
        assert_eq!(stats.armor_class, Some(12));
    }

    #[test]
    fn test_bonus_never_negative() {
        let stats = CombatantStats::uniform(6);
        assert_eq!(stats.modifier(AttributeType::Strength), -2);
        assert_eq!(stats.bonus(AttributeType::Strength), 0);

        let stats = CombatantStats::uniform(17);
        assert_eq!(stats.bonus(AttributeType::Intelligence), 3);
    }

    #[test]
    fn test_default_weapon_damage() {
        assert_eq!(Fixed(10).weapon_damage(), (6, 14));
    }
}
