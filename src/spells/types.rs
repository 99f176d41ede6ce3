use super::aspect::Element;
use crate::combat::status::StatusEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellType {
    /// Hurts the enemy; may critically hit and may apply a status effect.
    Damage,
    /// Restores the caster's hit points.
    Heal,
    /// Hurts the enemy and returns part of the damage to the caster.
    Drain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spell {
    pub name: &'static str,
    pub mana_cost: u32,
    pub damage_min: u32,
    pub damage_max: u32,
    pub spell_type: SpellType,
    /// Percent chance (0-100) to apply `effect` on a damage cast.
    pub effect_chance: u32,
    pub effect: Option<StatusEffect>,
    /// Duration in ticks of the applied effect.
    pub effect_value: u32,
}

/// The three spells of one elemental family, ordered by tier.
#[derive(Debug, Clone)]
pub struct SpellLine {
    pub element: Element,
    pub tiers: [Spell; 3],
}

const fn damage(
    name: &'static str,
    mana_cost: u32,
    range: (u32, u32),
    effect: Option<StatusEffect>,
    effect_chance: u32,
    effect_value: u32,
) -> Spell {
    Spell {
        name,
        mana_cost,
        damage_min: range.0,
        damage_max: range.1,
        spell_type: SpellType::Damage,
        effect_chance,
        effect,
        effect_value,
    }
}

const fn support(name: &'static str, mana_cost: u32, range: (u32, u32), spell_type: SpellType) -> Spell {
    Spell {
        name,
        mana_cost,
        damage_min: range.0,
        damage_max: range.1,
        spell_type,
        effect_chance: 0,
        effect: None,
        effect_value: 0,
    }
}

use StatusEffect::{Burn, Freeze, Poison, Stun};

/// Built-in spell lines, one per element.
pub static SPELL_LINES: &[SpellLine] = &[
    SpellLine {
        element: Element::Fire,
        tiers: [
            damage("Fire Bolt", 5, (8, 14), Some(Burn), 25, 3),
            damage("Flame Wave", 10, (14, 22), Some(Burn), 35, 3),
            damage("Inferno", 18, (24, 36), Some(Burn), 50, 4),
        ],
    },
    SpellLine {
        element: Element::Ice,
        tiers: [
            damage("Frost Shard", 5, (7, 12), Some(Freeze), 20, 1),
            damage("Ice Lance", 10, (12, 20), Some(Freeze), 30, 2),
            damage("Blizzard", 18, (20, 32), Some(Freeze), 40, 2),
        ],
    },
    SpellLine {
        element: Element::Lightning,
        tiers: [
            damage("Spark", 4, (6, 13), Some(Stun), 15, 1),
            damage("Chain Lightning", 11, (13, 24), Some(Stun), 25, 1),
            damage("Thunderstorm", 20, (22, 38), Some(Stun), 35, 2),
        ],
    },
    SpellLine {
        element: Element::Earth,
        tiers: [
            damage("Stone Spike", 5, (9, 13), None, 0, 0),
            damage("Rockslide", 11, (15, 23), Some(Stun), 20, 1),
            damage("Earthquake", 19, (25, 35), Some(Stun), 30, 1),
        ],
    },
    SpellLine {
        element: Element::Shadow,
        tiers: [
            damage("Shadow Bolt", 5, (8, 15), None, 0, 0),
            support("Siphon Life", 9, (10, 16), SpellType::Drain),
            damage("Soul Rend", 18, (24, 38), Some(Stun), 25, 1),
        ],
    },
    SpellLine {
        element: Element::Light,
        tiers: [
            damage("Smite", 5, (7, 13), None, 0, 0),
            support("Holy Light", 8, (15, 25), SpellType::Heal),
            support("Radiant Lance", 16, (18, 30), SpellType::Drain),
        ],
    },
    SpellLine {
        element: Element::Nature,
        tiers: [
            damage("Thorn Lash", 5, (7, 12), Some(Poison), 30, 3),
            support("Regrowth", 8, (14, 22), SpellType::Heal),
            damage("Venom Bloom", 17, (20, 30), Some(Poison), 60, 4),
        ],
    },
];
