//! Character record and its load boundary.
//!
//! Files are validated once when loaded: legacy keys are accepted, missing
//! pools are filled to their level maximum and out-of-range pools are clamped.
//! Levels, attribute scores and item values outside their limits are rejected.
//! After that the combat core can rely on every field being present.

use super::attributes::{AttributeType, Attributes};
use super::equipment::Equipment;
use super::stats::StatProvider;
use crate::core::constants::*;
use crate::core::error::RecordError;
use crate::spells::aspect::Aspect;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub version: u32,
    pub name: String,
    pub level: u32,
    pub hit_points: u32,
    pub mana: u32,
    pub aspect: Aspect,
    pub attributes: Attributes,
    pub equipment: Equipment,
    /// Item name → quantity. Entries are removed when they reach zero.
    pub inventory: BTreeMap<String, u32>,
}

/// On-disk shape before validation. Every field is optional and the
/// capitalized keys of older files are accepted as aliases.
#[derive(Debug, Default, Deserialize)]
struct RawCharacterRecord {
    #[serde(default)]
    version: Option<u32>,
    #[serde(default, alias = "Name")]
    name: Option<String>,
    #[serde(default, alias = "Level")]
    level: Option<u32>,
    #[serde(default, alias = "Hit_Points")]
    hit_points: Option<i64>,
    #[serde(default, alias = "Aspect1_Mana")]
    mana: Option<i64>,
    #[serde(default, alias = "Aspect1")]
    aspect: Option<String>,
    #[serde(default)]
    attributes: Option<Attributes>,
    #[serde(default)]
    equipment: Option<Equipment>,
    #[serde(default, alias = "Inventory")]
    inventory: BTreeMap<String, i64>,
}

impl CharacterRecord {
    /// A fresh level-1 character at full hit points and mana.
    pub fn new(name: impl Into<String>, aspect: Aspect) -> Self {
        let mut record = Self {
            version: CHARACTER_RECORD_VERSION,
            name: name.into(),
            level: 1,
            hit_points: 0,
            mana: 0,
            aspect,
            attributes: Attributes::new(),
            equipment: Equipment::new(),
            inventory: BTreeMap::new(),
        };
        record.hit_points = record.max_hp();
        record.mana = record.max_mana();
        record
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp_for_level(self.level)
    }

    pub fn max_mana(&self) -> u32 {
        self.max_mana_for_level(self.level)
    }

    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// Applies damage, flooring at zero. Returns the damage taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.hit_points);
        self.hit_points -= taken;
        taken
    }

    /// Heals up to the level maximum. Returns the amount actually restored.
    pub fn restore_hp(&mut self, amount: u32) -> u32 {
        let max = self.max_hp();
        let restored = amount.min(max.saturating_sub(self.hit_points));
        self.hit_points += restored;
        restored
    }

    /// Restores mana up to the level maximum. Returns the amount restored.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let max = self.max_mana();
        let restored = amount.min(max.saturating_sub(self.mana));
        self.mana += restored;
        restored
    }

    pub fn item_quantity(&self, name: &str) -> u32 {
        self.inventory.get(name).copied().unwrap_or(0)
    }

    pub fn add_item(&mut self, name: impl Into<String>, quantity: u32) {
        if quantity == 0 {
            return;
        }
        *self.inventory.entry(name.into()).or_insert(0) += quantity;
    }

    /// Removes one of `name`. Returns false if none were held.
    pub fn remove_one(&mut self, name: &str) -> bool {
        match self.inventory.get_mut(name) {
            Some(quantity) if *quantity > 0 => {
                *quantity -= 1;
                if *quantity == 0 {
                    self.inventory.remove(name);
                }
                true
            }
            _ => false,
        }
    }

    /// Parses and validates a JSON character file.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let raw: RawCharacterRecord = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let json = fs::read_to_string(path)?;
        let record = Self::from_json(&json)?;
        info!(path = %path.display(), name = %record.name, "character loaded");
        Ok(record)
    }

    pub fn save(&self, path: &Path) -> Result<(), RecordError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Platform data directory location of the default character file.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "skirmish").map(|dirs| dirs.data_dir().join("character.json"))
    }

    fn from_raw(raw: RawCharacterRecord) -> Result<Self, RecordError> {
        let version = match raw.version {
            Some(v) if v > CHARACTER_RECORD_VERSION => {
                return Err(RecordError::UnsupportedVersion {
                    found: v,
                    supported: CHARACTER_RECORD_VERSION,
                })
            }
            Some(v) => v,
            None => {
                warn!("character record has no version, reading as legacy format");
                1
            }
        };

        let level = match raw.level {
            Some(0) => {
                return Err(RecordError::Invalid(
                    "level must be at least 1".to_string(),
                ))
            }
            Some(level) if level > MAX_CHARACTER_LEVEL => {
                return Err(RecordError::Invalid(format!(
                    "level {level} is above the maximum of {MAX_CHARACTER_LEVEL}"
                )))
            }
            Some(level) => level,
            None => 1,
        };

        let attributes = raw.attributes.unwrap_or_default();
        check_attributes(&attributes)?;
        let equipment = raw.equipment.unwrap_or_default();
        check_equipment(&equipment)?;

        let name = raw
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Adventurer".to_string());

        let mut inventory = BTreeMap::new();
        for (item, quantity) in raw.inventory {
            if quantity > 0 {
                inventory.insert(item, quantity.min(u32::MAX as i64) as u32);
            } else {
                warn!(item = %item, quantity, "dropping empty inventory entry");
            }
        }

        let mut record = Self {
            version: CHARACTER_RECORD_VERSION,
            name,
            level,
            hit_points: 0,
            mana: 0,
            aspect: raw.aspect.map(|a| Aspect::parse(&a)).unwrap_or_default(),
            attributes,
            equipment,
            inventory,
        };

        record.hit_points = clamp_pool("hit_points", raw.hit_points, record.max_hp());
        record.mana = clamp_pool("mana", raw.mana, record.max_mana());

        if version < CHARACTER_RECORD_VERSION {
            info!(from = version, to = CHARACTER_RECORD_VERSION, "character record migrated");
        }
        Ok(record)
    }
}

fn check_attributes(attributes: &Attributes) -> Result<(), RecordError> {
    for attr in AttributeType::all() {
        let score = attributes.get(attr);
        if !(MIN_ATTRIBUTE_SCORE..=MAX_ATTRIBUTE_SCORE).contains(&score) {
            return Err(RecordError::Invalid(format!(
                "{} {score} is outside {MIN_ATTRIBUTE_SCORE}..={MAX_ATTRIBUTE_SCORE}",
                attr.abbrev()
            )));
        }
    }
    Ok(())
}

fn check_equipment(equipment: &Equipment) -> Result<(), RecordError> {
    let bonus_range = -MAX_ITEM_BONUS..=MAX_ITEM_BONUS;
    for item in equipment.iter_equipped() {
        let bonuses = item.attributes.to_attributes();
        let bonuses_ok = AttributeType::all()
            .into_iter()
            .all(|attr| bonus_range.contains(&bonuses.get(attr)));
        if !bonuses_ok || !bonus_range.contains(&item.armor) {
            return Err(RecordError::Invalid(format!(
                "{} has bonuses outside -{MAX_ITEM_BONUS}..={MAX_ITEM_BONUS}",
                item.name
            )));
        }
        if let Some((min, max)) = item.damage {
            if min > max || max > MAX_WEAPON_DAMAGE {
                return Err(RecordError::Invalid(format!(
                    "{} has damage {min}-{max}, expected min <= max <= {MAX_WEAPON_DAMAGE}",
                    item.name
                )));
            }
        }
    }
    Ok(())
}

/// Missing pools start full; stored values are clamped into `0..=max`.
fn clamp_pool(field: &str, value: Option<i64>, max: u32) -> u32 {
    match value {
        None => max,
        Some(v) if v < 0 => {
            warn!(field, value = v, "negative pool clamped to 0");
            0
        }
        Some(v) if v > max as i64 => {
            warn!(field, value = v, max, "pool above maximum clamped");
            max
        }
        Some(v) => v as u32,
    }
}

impl StatProvider for CharacterRecord {
    fn total_stat(&self, attr: AttributeType) -> i32 {
        self.attributes.get(attr) + self.equipment.attribute_bonuses().get(attr)
    }

    fn armor_class(&self) -> Option<i32> {
        let dex_mod = super::attributes::score_modifier(self.total_stat(AttributeType::Dexterity));
        Some(BASE_ARMOR_CLASS + dex_mod + self.equipment.armor_bonus())
    }

    fn max_hp_for_level(&self, level: u32) -> u32 {
        let con_mod = super::attributes::score_modifier(self.total_stat(AttributeType::Constitution));
        let base = BASE_PLAYER_HP + level.saturating_sub(1) * HP_PER_LEVEL;
        (base as i32 + con_mod * HP_PER_CON_MODIFIER).max(1) as u32
    }

    fn max_mana_for_level(&self, level: u32) -> u32 {
        let int_mod = super::attributes::score_modifier(self.total_stat(AttributeType::Intelligence));
        let base = BASE_PLAYER_MANA + level.saturating_sub(1) * MANA_PER_LEVEL;
        (base as i32 + int_mod * MANA_PER_INT_MODIFIER).max(0) as u32
    }

    fn weapon_damage(&self) -> (u32, u32) {
        self.equipment.weapon_damage().unwrap_or(PLAYER_UNARMED_DAMAGE)
    }
}
