//! The auto-battle policy: picks one action whenever the session is
//! waiting for input.

use crate::character::record::CharacterRecord;
use crate::combat::effects::EffectsBus;
use crate::combat::session::{is_combat_consumable, CombatSession};
use crate::spells::types::SpellType;
use rand::Rng;

/// Hit point ratio under which the policy heals before attacking.
const HEAL_THRESHOLD: f64 = 0.35;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    Attack,
    Cast(usize),
    UseItem(String),
}

/// Chooses what to do this turn:
/// 1. Heal when low (heal spell first, then a health potion)
/// 2. Cast the strongest affordable offensive spell
/// 3. Otherwise attack
pub fn choose_action<B: EffectsBus, R: Rng>(
    session: &CombatSession<B, R>,
    player: &CharacterRecord,
) -> PlannedAction {
    let spells = session.available_spells(player);
    let hp_ratio = player.hit_points as f64 / player.max_hp().max(1) as f64;

    if hp_ratio < HEAL_THRESHOLD {
        let heal = spells
            .iter()
            .position(|s| s.spell_type == SpellType::Heal && s.mana_cost <= player.mana);
        if let Some(index) = heal {
            return PlannedAction::Cast(index);
        }
        let potion = player.inventory.iter().find(|(name, quantity)| {
            **quantity > 0 && is_combat_consumable(name) && !name.contains("Mana")
        });
        if let Some((name, _)) = potion {
            return PlannedAction::UseItem(name.clone());
        }
    }

    spells
        .iter()
        .enumerate()
        .filter(|(_, s)| s.spell_type != SpellType::Heal && s.mana_cost <= player.mana)
        .max_by_key(|(_, s)| s.damage_max)
        .map_or(PlannedAction::Attack, |(index, _)| PlannedAction::Cast(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::effects::NullEffects;
    use crate::spells::aspect::{Aspect, Element};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_session() -> CombatSession<NullEffects, ChaCha8Rng> {
        CombatSession::new(NullEffects, ChaCha8Rng::seed_from_u64(12345))
    }

    #[test]
    fn test_casts_when_mana_allows() {
        let session = create_session();
        let player = CharacterRecord::new("Sim", Aspect::new(Element::Fire, 1));
        assert_eq!(choose_action(&session, &player), PlannedAction::Cast(0));
    }

    #[test]
    fn test_attacks_without_mana() {
        let session = create_session();
        let mut player = CharacterRecord::new("Sim", Aspect::new(Element::Fire, 1));
        player.mana = 0;
        assert_eq!(choose_action(&session, &player), PlannedAction::Attack);
    }

    #[test]
    fn test_drinks_potion_when_low() {
        let session = create_session();
        let mut player = CharacterRecord::new("Sim", Aspect::new(Element::Fire, 1));
        player.hit_points = 10;
        player.add_item("Health Potion", 1);
        assert_eq!(
            choose_action(&session, &player),
            PlannedAction::UseItem("Health Potion".to_string())
        );
    }
}
