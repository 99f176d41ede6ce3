//! Pure combat math: hit chance, damage rolls, criticals, spell effects,
//! status ticking and escape rolls.
//!
//! Nothing here touches a session. Every function takes stat snapshots and
//! an injected RNG so results are reproducible under a seeded generator.

use super::status::{StatusEffect, StatusEffects};
use crate::character::attributes::AttributeType;
use crate::character::stats::CombatantStats;
use crate::core::constants::*;
use crate::spells::types::{Spell, SpellType};
use rand::Rng;
use tracing::debug;

/// Outcome of one damage roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRoll {
    pub amount: u32,
    pub critical: bool,
}

/// What happened to one effect during a status tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTickReport {
    pub effect: StatusEffect,
    /// Damage dealt this tick, 0 for effects that only report.
    pub damage: u32,
    /// True when the effect ran out and was removed.
    pub expired: bool,
}

/// Chance in percent that `attacker` lands a physical hit on `defender`.
///
/// Defenders with an armor class are penalized by it; others defend with
/// dexterity alone. Always within `[MIN_HIT_CHANCE, MAX_HIT_CHANCE]`.
pub fn hit_chance(attacker: &CombatantStats, defender: &CombatantStats) -> i32 {
    let accuracy = attacker.modifier(AttributeType::Dexterity);
    let penalty = match defender.armor_class {
        Some(ac) => (ac - BASE_ARMOR_CLASS) * ARMOR_CLASS_PENALTY_FACTOR,
        None => defender.dexterity - BASE_ATTRIBUTE_VALUE,
    };
    (BASE_HIT_CHANCE + accuracy - penalty).clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

/// Rolls 1-100 against [`hit_chance`].
pub fn roll_hit<R: Rng>(attacker: &CombatantStats, defender: &CombatantStats, rng: &mut R) -> bool {
    let chance = hit_chance(attacker, defender);
    let roll = rng.gen_range(1..=100);
    debug!(chance, roll, "hit roll");
    roll <= chance
}

/// Percent chance of a physical critical hit.
pub fn physical_crit_chance(attacker: &CombatantStats) -> i32 {
    (attacker.modifier(AttributeType::Dexterity) + PHYSICAL_CRIT_BASE).max(PHYSICAL_CRIT_FLOOR)
}

fn apply_crit<R: Rng>(base: u32, crit_chance: i32, rng: &mut R) -> DamageRoll {
    let critical = rng.gen_range(1..=100) <= crit_chance;
    let amount = if critical {
        (base as f64 * CRIT_MULTIPLIER) as u32
    } else {
        base
    };
    DamageRoll { amount, critical }
}

/// Physical damage: a roll in `[min, max]` plus the strength bonus, with a
/// dexterity-driven chance to critically hit.
pub fn physical_damage<R: Rng>(
    min: u32,
    max: u32,
    attacker: &CombatantStats,
    rng: &mut R,
) -> DamageRoll {
    let base = rng.gen_range(min..=max.max(min)) + attacker.bonus(AttributeType::Strength);
    let result = apply_crit(base, physical_crit_chance(attacker), rng);
    debug!(base, amount = result.amount, critical = result.critical, "physical damage");
    result
}

/// Rolls a spell's damage (or healing) for `caster`.
///
/// Heal adds the wisdom bonus and Drain the intelligence bonus; neither can
/// crit. Damage spells add the intelligence bonus and crit on
/// `max(SPELL_CRIT_FLOOR, int_bonus)`.
pub fn spell_damage<R: Rng>(spell: &Spell, caster: &CombatantStats, rng: &mut R) -> DamageRoll {
    let roll = rng.gen_range(spell.damage_min..=spell.damage_max.max(spell.damage_min));
    match spell.spell_type {
        SpellType::Heal => DamageRoll {
            amount: roll + caster.bonus(AttributeType::Wisdom),
            critical: false,
        },
        SpellType::Drain => DamageRoll {
            amount: roll + caster.bonus(AttributeType::Intelligence),
            critical: false,
        },
        SpellType::Damage => {
            let int_bonus = caster.bonus(AttributeType::Intelligence);
            let crit_chance = (int_bonus as i32).max(SPELL_CRIT_FLOOR);
            apply_crit(roll + int_bonus, crit_chance, rng)
        }
    }
}

/// Rolls a Damage spell's rider effect onto `target`.
///
/// Returns the effect when it landed. Re-application overwrites the
/// remaining duration.
pub fn apply_spell_effect<R: Rng>(
    spell: &Spell,
    target: &mut StatusEffects,
    rng: &mut R,
) -> Option<StatusEffect> {
    if spell.spell_type != SpellType::Damage || spell.effect_chance == 0 {
        return None;
    }
    let effect = spell.effect?;
    let roll = rng.gen_range(1..=100);
    if roll > spell.effect_chance {
        return None;
    }
    target.apply(effect, spell.effect_value);
    debug!(effect = effect.name(), duration = spell.effect_value, "status applied");
    Some(effect)
}

/// Runs one status tick: damaging effects roll their damage, then every
/// duration drops by one and expired effects are removed.
///
/// Reports come back in effect order so callers can apply damage and
/// write log lines.
pub fn tick_status_effects<R: Rng>(
    effects: &mut StatusEffects,
    rng: &mut R,
) -> Vec<StatusTickReport> {
    let mut reports: Vec<StatusTickReport> = effects
        .iter()
        .map(|(effect, _)| {
            let damage = effect
                .behavior()
                .tick_damage
                .map_or(0, |(min, max)| rng.gen_range(min..=max));
            StatusTickReport {
                effect,
                damage,
                expired: false,
            }
        })
        .collect();

    for effect in effects.decrement_all() {
        if let Some(report) = reports.iter_mut().find(|r| r.effect == effect) {
            report.expired = true;
        }
    }
    reports
}

/// Percent chance to flee for a given dexterity total.
pub fn escape_chance(dexterity: i32) -> i32 {
    (BASE_ESCAPE_CHANCE + (dexterity - BASE_ATTRIBUTE_VALUE) * ESCAPE_CHANCE_PER_DEX)
        .clamp(MIN_ESCAPE_CHANCE, MAX_ESCAPE_CHANCE)
}

pub fn roll_escape<R: Rng>(runner: &CombatantStats, rng: &mut R) -> bool {
    let chance = escape_chance(runner.dexterity);
    let roll = rng.gen_range(1..=100);
    debug!(chance, roll, "escape roll");
    roll <= chance
}
