use crate::core::constants::{BASE_ATTRIBUTE_VALUE, NUM_ATTRIBUTES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl AttributeType {
    pub fn all() -> [AttributeType; NUM_ATTRIBUTES] {
        [
            AttributeType::Strength,
            AttributeType::Dexterity,
            AttributeType::Constitution,
            AttributeType::Intelligence,
            AttributeType::Wisdom,
            AttributeType::Charisma,
        ]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            AttributeType::Strength => "STR",
            AttributeType::Dexterity => "DEX",
            AttributeType::Constitution => "CON",
            AttributeType::Intelligence => "INT",
            AttributeType::Wisdom => "WIS",
            AttributeType::Charisma => "CHA",
        }
    }
}

/// Modifier for an attribute score, rounding toward negative infinity:
/// 10-11 → 0, 12-13 → +1, 8-9 → -1.
pub fn score_modifier(score: i32) -> i32 {
    (score - BASE_ATTRIBUTE_VALUE).div_euclid(2)
}

/// Six ability scores. Serialized as a named map so hand-written character
/// files stay readable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Attributes {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new()
    }
}

impl Attributes {
    pub fn new() -> Self {
        Self::uniform(BASE_ATTRIBUTE_VALUE)
    }

    pub fn uniform(value: i32) -> Self {
        Self {
            strength: value,
            dexterity: value,
            constitution: value,
            intelligence: value,
            wisdom: value,
            charisma: value,
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

    pub fn set(&mut self, attr: AttributeType, value: i32) {
        match attr {
            AttributeType::Strength => self.strength = value,
            AttributeType::Dexterity => self.dexterity = value,
            AttributeType::Constitution => self.constitution = value,
            AttributeType::Intelligence => self.intelligence = value,
            AttributeType::Wisdom => self.wisdom = value,
            AttributeType::Charisma => self.charisma = value,
        }
    }

    pub fn modifier(&self, attr: AttributeType) -> i32 {
        score_modifier(self.get(attr))
    }

    /// Adds another set of values to this one (for equipment bonuses).
    pub fn add(&mut self, other: &Attributes) {
        for attr in AttributeType::all() {
            self.set(attr, self.get(attr) + other.get(attr));
        }
    }

    /// Attribute set with every score at zero, used as a bonus accumulator.
    pub fn zero() -> Self {
        Self::uniform(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_attributes() {
        let attrs = Attributes::new();
        for attr_type in AttributeType::all() {
            assert_eq!(attrs.get(attr_type), 10);
        }
    }

    #[test]
    fn test_get_set() {
        let mut attrs = Attributes::new();
        attrs.set(AttributeType::Strength, 16);
        assert_eq!(attrs.get(AttributeType::Strength), 16);
        assert_eq!(attrs.get(AttributeType::Dexterity), 10);
    }

    #[test]
    fn test_modifier_calculation() {
        let mut attrs = Attributes::new();

        attrs.set(AttributeType::Strength, 10);
        assert_eq!(attrs.modifier(AttributeType::Strength), 0);
        attrs.set(AttributeType::Strength, 11);
        assert_eq!(attrs.modifier(AttributeType::Strength), 0);
        attrs.set(AttributeType::Strength, 12);
        assert_eq!(attrs.modifier(AttributeType::Strength), 1);
        attrs.set(AttributeType::Strength, 20);
        assert_eq!(attrs.modifier(AttributeType::Strength), 5);
    }

    #[test]
    fn test_modifier_below_ten_floors() {
        // Floor, not truncation: 9 → -1, 7 → -2
        assert_eq!(score_modifier(9), -1);
        assert_eq!(score_modifier(8), -1);
        assert_eq!(score_modifier(7), -2);
    }

    #[test]
    fn test_add_bonuses() {
        let mut attrs = Attributes::new();
        let mut bonus = Attributes::zero();
        bonus.dexterity = 3;
        bonus.wisdom = 1;
        attrs.add(&bonus);
        assert_eq!(attrs.dexterity, 13);
        assert_eq!(attrs.wisdom, 11);
        assert_eq!(attrs.strength, 10);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let attrs: Attributes = serde_json::from_str(r#"{"strength": 14}"#).unwrap();
        assert_eq!(attrs.strength, 14);
        assert_eq!(attrs.dexterity, 10);
    }
}
