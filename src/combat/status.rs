//! Timed status effects and the per-effect behavior table.

use crate::core::constants::{BURN_TICK_DAMAGE, POISON_TICK_DAMAGE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusEffect {
    Burn,
    Freeze,
    Stun,
    Poison,
}

/// What an effect does each time status effects tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectBehavior {
    pub effect: StatusEffect,
    /// Damage range rolled every tick, `None` for effects that only report.
    pub tick_damage: Option<(u32, u32)>,
    /// Phrase used in "{target} is {verb}!" style log lines.
    pub verb: &'static str,
}

/// Registered behaviors, one per effect.
pub const EFFECT_BEHAVIORS: [EffectBehavior; 4] = [
    EffectBehavior {
        effect: StatusEffect::Burn,
        tick_damage: Some(BURN_TICK_DAMAGE),
        verb: "burning",
    },
    EffectBehavior {
        effect: StatusEffect::Freeze,
        tick_damage: None,
        verb: "frozen",
    },
    EffectBehavior {
        effect: StatusEffect::Stun,
        tick_damage: None,
        verb: "stunned",
    },
    EffectBehavior {
        effect: StatusEffect::Poison,
        tick_damage: Some(POISON_TICK_DAMAGE),
        verb: "poisoned",
    },
];

impl StatusEffect {
    pub fn name(&self) -> &'static str {
        match self {
            StatusEffect::Burn => "burn",
            StatusEffect::Freeze => "freeze",
            StatusEffect::Stun => "stun",
            StatusEffect::Poison => "poison",
        }
    }

    pub fn behavior(&self) -> &'static EffectBehavior {
        match self {
            StatusEffect::Burn => &EFFECT_BEHAVIORS[0],
            StatusEffect::Freeze => &EFFECT_BEHAVIORS[1],
            StatusEffect::Stun => &EFFECT_BEHAVIORS[2],
            StatusEffect::Poison => &EFFECT_BEHAVIORS[3],
        }
    }
}

/// Remaining durations keyed by effect. A present entry always has a
/// duration above zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusEffects {
    remaining: BTreeMap<StatusEffect, u32>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duration for `effect`, replacing any existing one.
    /// Effects never stack; a zero duration removes the effect.
    pub fn apply(&mut self, effect: StatusEffect, duration: u32) {
        if duration == 0 {
            self.remaining.remove(&effect);
        } else {
            self.remaining.insert(effect, duration);
        }
    }

    pub fn remaining(&self, effect: StatusEffect) -> Option<u32> {
        self.remaining.get(&effect).copied()
    }

    pub fn has(&self, effect: StatusEffect) -> bool {
        self.remaining.contains_key(&effect)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatusEffect, u32)> + '_ {
        self.remaining.iter().map(|(e, d)| (*e, *d))
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn clear(&mut self) {
        self.remaining.clear();
    }

    /// Decrements every duration by one and returns the effects that ran out.
    pub(crate) fn decrement_all(&mut self) -> Vec<StatusEffect> {
        let mut expired = Vec::new();
        for (effect, duration) in self.remaining.iter_mut() {
            *duration = duration.saturating_sub(1);
            if *duration == 0 {
                expired.push(*effect);
            }
        }
        self.remaining.retain(|_, duration| *duration > 0);
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overwrites_instead_of_stacking() {
        let mut effects = StatusEffects::new();
        effects.apply(StatusEffect::Burn, 3);
        effects.apply(StatusEffect::Burn, 2);
        assert_eq!(effects.remaining(StatusEffect::Burn), Some(2));
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_zero_duration_is_never_stored() {
        let mut effects = StatusEffects::new();
        effects.apply(StatusEffect::Stun, 0);
        assert!(effects.is_empty());

        effects.apply(StatusEffect::Stun, 2);
        effects.apply(StatusEffect::Stun, 0);
        assert!(!effects.has(StatusEffect::Stun));
    }

    #[test]
    fn test_decrement_removes_expired() {
        let mut effects = StatusEffects::new();
        effects.apply(StatusEffect::Burn, 1);
        effects.apply(StatusEffect::Freeze, 2);

        let expired = effects.decrement_all();
        assert_eq!(expired, vec![StatusEffect::Burn]);
        assert_eq!(effects.remaining(StatusEffect::Freeze), Some(1));
        assert!(effects.iter().all(|(_, d)| d > 0));
    }

    #[test]
    fn test_behavior_table_matches_effects() {
        for behavior in EFFECT_BEHAVIORS.iter() {
            assert_eq!(behavior.effect.behavior(), behavior);
        }
        assert!(StatusEffect::Burn.behavior().tick_damage.is_some());
        assert!(StatusEffect::Freeze.behavior().tick_damage.is_none());
    }
}
