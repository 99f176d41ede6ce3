use super::attributes::Attributes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Helmet,
    Boots,
    Amulet,
    Ring,
}

/// Flat attribute bonuses granted by an item. Missing fields are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeBonuses {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub cha: i32,
}

impl AttributeBonuses {
    /// Converts to an Attributes value with zero base plus these bonuses.
    pub fn to_attributes(&self) -> Attributes {
        Attributes {
            strength: self.str,
            dexterity: self.dex,
            constitution: self.con,
            intelligence: self.int,
            wisdom: self.wis,
            charisma: self.cha,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub attributes: AttributeBonuses,
    /// Added to armor class.
    #[serde(default)]
    pub armor: i32,
    /// Physical damage range; only meaningful on weapons.
    #[serde(default)]
    pub damage: Option<(u32, u32)>,
}

/// Items currently worn, one per slot.
///
/// New slots must be `#[serde(default)]` so older character files still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub helmet: Option<Item>,
    pub boots: Option<Item>,
    pub amulet: Option<Item>,
    pub ring: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::Boots => &self.boots,
            EquipmentSlot::Amulet => &self.amulet,
            EquipmentSlot::Ring => &self.ring,
        }
    }

    /// Equips `item` in its own slot, returning whatever was there.
    pub fn equip(&mut self, item: Item) -> Option<Item> {
        let slot = match item.slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Helmet => &mut self.helmet,
            EquipmentSlot::Boots => &mut self.boots,
            EquipmentSlot::Amulet => &mut self.amulet,
            EquipmentSlot::Ring => &mut self.ring,
        };
        slot.replace(item)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [
            &self.weapon,
            &self.armor,
            &self.helmet,
            &self.boots,
            &self.amulet,
            &self.ring,
        ]
        .into_iter()
        .filter_map(|item| item.as_ref())
    }

    /// Sum of attribute bonuses over all equipped items.
    pub fn attribute_bonuses(&self) -> Attributes {
        let mut total = Attributes::zero();
        for item in self.iter_equipped() {
            total.add(&item.attributes.to_attributes());
        }
        total
    }

    pub fn armor_bonus(&self) -> i32 {
        self.iter_equipped().map(|item| item.armor).sum()
    }

    pub fn weapon_damage(&self) -> Option<(u32, u32)> {
        self.weapon.as_ref().and_then(|w| w.damage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Item {
        Item {
            name: "Iron Sword".to_string(),
            slot: EquipmentSlot::Weapon,
            attributes: AttributeBonuses {
                str: 2,
                ..Default::default()
            },
            armor: 0,
            damage: Some((8, 16)),
        }
    }

    fn mail() -> Item {
        Item {
            name: "Chain Mail".to_string(),
            slot: EquipmentSlot::Armor,
            attributes: AttributeBonuses {
                con: 1,
                dex: -1,
                ..Default::default()
            },
            armor: 4,
            damage: None,
        }
    }

    #[test]
    fn test_equip_returns_previous() {
        let mut equipment = Equipment::new();
        assert!(equipment.equip(sword()).is_none());
        let old = equipment.equip(sword());
        assert_eq!(old.map(|i| i.name), Some("Iron Sword".to_string()));
        assert!(equipment.get(EquipmentSlot::Weapon).is_some());
    }

    #[test]
    fn test_bonuses_sum_across_slots() {
        let mut equipment = Equipment::new();
        equipment.equip(sword());
        equipment.equip(mail());
        let bonus = equipment.attribute_bonuses();
        assert_eq!(bonus.strength, 2);
        assert_eq!(bonus.constitution, 1);
        assert_eq!(bonus.dexterity, -1);
        assert_eq!(equipment.armor_bonus(), 4);
        assert_eq!(equipment.weapon_damage(), Some((8, 16)));
    }

    #[test]
    fn test_empty_equipment_has_no_weapon_damage() {
        assert_eq!(Equipment::new().weapon_damage(), None);
        assert_eq!(Equipment::new().armor_bonus(), 0);
    }
}
