//! The turn-based combat state machine.
//!
//! A [`CombatSession`] owns the enemy, both status maps, the log, the
//! effects bus and its RNG. The character record stays with the caller and
//! is lent in for every call. `update` runs once per frame; player actions
//! come in between frames through `handle_input` or the direct operations.

use super::effects::{AnimationKind, Anchor, AudioCue, EffectsBus, TextKind};
use super::log::{CombatLog, LogColor};
use super::resolver::{
    apply_spell_effect, physical_damage, roll_escape, roll_hit, spell_damage, tick_status_effects,
    DamageRoll,
};
use super::status::{StatusEffect, StatusEffects};
use crate::character::record::CharacterRecord;
use crate::character::stats::StatProvider;
use crate::core::constants::*;
use crate::core::error::{CombatError, Resource};
use crate::enemies::types::EnemyInstance;
use crate::spells::catalog::SpellCatalog;
use crate::spells::types::{Spell, SpellType};
use rand::Rng;
use tracing::{debug, info, warn};

/// Which menu the player is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SelectAction,
    SelectSpell,
    SelectItem,
}

/// Entries of the main action menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Attack,
    CastSpell,
    UseItem,
    RunAway,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Attack,
        Action::CastSpell,
        Action::UseItem,
        Action::RunAway,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Action::Attack => "Attack",
            Action::CastSpell => "Cast Spell",
            Action::UseItem => "Use Item",
            Action::RunAway => "Run Away",
        }
    }
}

/// Result of a frame or an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatStatus {
    Continue,
    Victory,
    Defeat,
    Escaped,
}

impl CombatStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CombatStatus::Continue)
    }
}

/// What a successful player action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Hit {
        damage: u32,
        critical: bool,
        effect: Option<StatusEffect>,
    },
    Missed,
    Drained {
        damage: u32,
        healed: u32,
    },
    Healed(u32),
    RestoredMana(u32),
    Escaped,
    EscapeFailed,
}

/// Items offered in the item menu.
pub fn is_combat_consumable(name: &str) -> bool {
    name.contains("Potion") || name.contains("Restore")
}

/// How much a consumable restores, from the known-item table or the default.
pub fn consumable_restore_amount(name: &str) -> u32 {
    CONSUMABLE_RESTORE_AMOUNTS
        .iter()
        .find(|(known, _)| *known == name)
        .map_or(DEFAULT_POTION_RESTORE, |(_, amount)| *amount)
}

pub struct CombatSession<B: EffectsBus, R: Rng> {
    enemy: Option<EnemyInstance>,
    player_turn: bool,
    phase: Phase,
    action_cursor: usize,
    spell_cursor: usize,
    item_cursor: usize,
    action_delay: u32,
    player_status: StatusEffects,
    enemy_status: StatusEffects,
    log: CombatLog,
    outcome: Option<CombatStatus>,
    catalog: SpellCatalog,
    bus: B,
    rng: R,
}

impl<B: EffectsBus, R: Rng> CombatSession<B, R> {
    pub fn new(bus: B, rng: R) -> Self {
        Self::with_catalog(bus, rng, SpellCatalog::standard())
    }

    pub fn with_catalog(bus: B, rng: R, catalog: SpellCatalog) -> Self {
        Self {
            enemy: None,
            player_turn: true,
            phase: Phase::SelectAction,
            action_cursor: 0,
            spell_cursor: 0,
            item_cursor: 0,
            action_delay: 0,
            player_status: StatusEffects::new(),
            enemy_status: StatusEffects::new(),
            log: CombatLog::new(),
            outcome: None,
            catalog,
            bus,
            rng,
        }
    }

    /// Begins a fight against `enemy`, discarding anything left from the
    /// previous one.
    pub fn start_combat(&mut self, enemy: EnemyInstance) {
        self.player_turn = true;
        self.phase = Phase::SelectAction;
        self.action_cursor = 0;
        self.spell_cursor = 0;
        self.item_cursor = 0;
        self.action_delay = 0;
        self.player_status.clear();
        self.enemy_status.clear();
        self.log.clear();
        self.outcome = None;
        self.bus.clear();

        info!(
            enemy = %enemy.name,
            hp = enemy.hit_points,
            tier = enemy.tier.name(),
            theme = enemy.theme.name(),
            "combat started"
        );
        let message = format!("A wild {} appears!", enemy.name);
        self.enemy = Some(enemy);

        self.bus
            .animation(Anchor::Center, AnimationKind::Intro, INTRO_ANIMATION_TICKS);
        self.bus.audio_cue(AudioCue::CombatStart);
        self.push_log(message, LogColor::Neutral);
    }

    /// Advances the session by one frame.
    pub fn update(&mut self, player: &mut CharacterRecord) -> CombatStatus {
        if let Some(outcome) = self.outcome {
            return outcome;
        }

        self.bus.tick();

        let enemy_alive = match &self.enemy {
            Some(enemy) => enemy.is_alive(),
            None => {
                warn!("update called without an enemy");
                return CombatStatus::Continue;
            }
        };

        if !enemy_alive {
            return self.end_combat(CombatStatus::Victory);
        }
        if !player.is_alive() {
            return self.end_combat(CombatStatus::Defeat);
        }

        if self.action_delay > 0 {
            self.action_delay -= 1;
            return CombatStatus::Continue;
        }

        if !self.player_turn {
            self.enemy_turn(player);
        }
        CombatStatus::Continue
    }

    /// Basic physical attack with the equipped weapon (or fists).
    pub fn player_attack(
        &mut self,
        player: &mut CharacterRecord,
    ) -> Result<ActionOutcome, CombatError> {
        self.ensure_can_act()?;
        let player_stats = player.stats();
        let (min, max) = player.weapon_damage();

        let Some(enemy) = self.enemy.as_mut() else {
            return Err(CombatError::MissingCombatant);
        };
        let enemy_stats = enemy.stats();

        let outcome = if roll_hit(&player_stats, &enemy_stats, &mut self.rng) {
            let roll = physical_damage(min, max, &player_stats, &mut self.rng);
            enemy.take_damage(roll.amount);
            ActionOutcome::Hit {
                damage: roll.amount,
                critical: roll.critical,
                effect: None,
            }
        } else {
            ActionOutcome::Missed
        };
        let enemy_name = enemy.name.clone();

        self.bus
            .animation(Anchor::Enemy, AnimationKind::Slash, HIT_ANIMATION_TICKS);
        match outcome {
            ActionOutcome::Hit {
                damage, critical, ..
            } => {
                self.show_damage(Anchor::Enemy, DamageRoll { amount: damage, critical });
                let message = if critical {
                    format!("Critical hit! You strike {} for {} damage!", enemy_name, damage)
                } else {
                    format!("You hit {} for {} damage.", enemy_name, damage)
                };
                let color = if critical {
                    LogColor::Critical
                } else {
                    LogColor::PlayerAction
                };
                self.push_log(message, color);
            }
            _ => {
                self.show_miss(Anchor::Enemy);
                self.push_log(format!("You miss {}.", enemy_name), LogColor::PlayerAction);
            }
        }

        self.consume_turn();
        Ok(outcome)
    }

    /// Casts the spell at `index` of [`Self::available_spells`].
    pub fn player_cast_spell(
        &mut self,
        player: &mut CharacterRecord,
        index: usize,
    ) -> Result<ActionOutcome, CombatError> {
        self.ensure_can_act()?;
        let spells = self.available_spells(player);
        let Some(spell) = spells.get(index).copied() else {
            return self.reject(CombatError::InvalidSelection(format!(
                "no spell in slot {}",
                index + 1
            )));
        };
        if player.mana < spell.mana_cost {
            self.push_log(
                format!("Not enough mana to cast {}!", spell.name),
                LogColor::Warning,
            );
            return Err(CombatError::InsufficientResource {
                resource: Resource::Mana,
                needed: spell.mana_cost,
                available: player.mana,
            });
        }
        player.mana -= spell.mana_cost;
        debug!(spell = spell.name, cost = spell.mana_cost, mana = player.mana, "spell cast");
        self.bus.audio_cue(AudioCue::SpellCast);

        let outcome = match spell.spell_type {
            SpellType::Heal => self.cast_heal(player, spell),
            SpellType::Drain => self.cast_drain(player, spell),
            SpellType::Damage => self.cast_damage(player, spell),
        };

        self.consume_turn();
        Ok(outcome)
    }

    /// Uses one of `name` from the inventory.
    pub fn player_use_item(
        &mut self,
        player: &mut CharacterRecord,
        name: &str,
    ) -> Result<ActionOutcome, CombatError> {
        self.ensure_can_act()?;
        if !is_combat_consumable(name) {
            return self.reject(CombatError::InvalidSelection(format!(
                "{} cannot be used in combat",
                name
            )));
        }
        let available = player.item_quantity(name);
        if available == 0 {
            self.push_log(format!("You have no {} left!", name), LogColor::Warning);
            return Err(CombatError::InsufficientResource {
                resource: Resource::ItemQuantity,
                needed: 1,
                available,
            });
        }

        player.remove_one(name);
        let amount = consumable_restore_amount(name);
        self.bus.audio_cue(AudioCue::ItemUse);

        let outcome = if name.contains("Mana") {
            let restored = player.restore_mana(amount);
            self.bus
                .floating_text(Anchor::Player, format!("+{} MP", restored), TextKind::Mana);
            self.push_log(
                format!("You drink the {} and recover {} mana.", name, restored),
                LogColor::Heal,
            );
            ActionOutcome::RestoredMana(restored)
        } else {
            let restored = player.restore_hp(amount);
            self.bus
                .floating_text(Anchor::Player, format!("+{}", restored), TextKind::Heal);
            self.bus
                .animation(Anchor::Player, AnimationKind::Heal, SPELL_ANIMATION_TICKS);
            self.push_log(
                format!("You use the {} and recover {} HP.", name, restored),
                LogColor::Heal,
            );
            ActionOutcome::Healed(restored)
        };
        debug!(item = name, left = player.item_quantity(name), "item used");

        self.consume_turn();
        Ok(outcome)
    }

    /// Tries to flee. Success ends combat at no turn cost; failure spends
    /// the turn.
    pub fn attempt_run(
        &mut self,
        player: &mut CharacterRecord,
    ) -> Result<ActionOutcome, CombatError> {
        self.ensure_can_act()?;
        if roll_escape(&player.stats(), &mut self.rng) {
            self.bus
                .animation(Anchor::Player, AnimationKind::Flee, HIT_ANIMATION_TICKS);
            self.end_combat(CombatStatus::Escaped);
            Ok(ActionOutcome::Escaped)
        } else {
            self.push_log("You couldn't get away!", LogColor::Warning);
            self.consume_turn();
            Ok(ActionOutcome::EscapeFailed)
        }
    }

    /// Spells the player can cast right now, by aspect and level.
    pub fn available_spells(&self, player: &CharacterRecord) -> Vec<&'static Spell> {
        self.catalog.spells_for(&player.aspect, player.level)
    }

    /// Inventory entries offered in the item menu.
    pub fn combat_items(&self, player: &CharacterRecord) -> Vec<(String, u32)> {
        player
            .inventory
            .iter()
            .filter(|(name, quantity)| **quantity > 0 && is_combat_consumable(name))
            .map(|(name, quantity)| (name.clone(), *quantity))
            .collect()
    }

    pub fn enemy(&self) -> Option<&EnemyInstance> {
        self.enemy.as_ref()
    }

    pub fn is_player_turn(&self) -> bool {
        self.player_turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn action_cursor(&self) -> usize {
        self.action_cursor
    }

    pub fn spell_cursor(&self) -> usize {
        self.spell_cursor
    }

    pub fn item_cursor(&self) -> usize {
        self.item_cursor
    }

    pub fn action_delay(&self) -> u32 {
        self.action_delay
    }

    /// Whether input is accepted this frame.
    pub fn awaiting_input(&self) -> bool {
        self.outcome.is_none() && self.enemy.is_some() && self.player_turn && self.action_delay == 0
    }

    pub fn player_status(&self) -> &StatusEffects {
        &self.player_status
    }

    pub fn enemy_status(&self) -> &StatusEffects {
        &self.enemy_status
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    /// Terminal outcome, once combat has ended.
    pub fn outcome(&self) -> Option<CombatStatus> {
        self.outcome
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub(super) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(super) fn cursors_mut(&mut self) -> (&mut usize, &mut usize, &mut usize) {
        (
            &mut self.action_cursor,
            &mut self.spell_cursor,
            &mut self.item_cursor,
        )
    }

    pub(super) fn push_log(&mut self, message: impl Into<String>, color: LogColor) {
        let message = message.into();
        self.bus.append_log(&message, color);
        self.log.push(message, color);
    }

    fn ensure_can_act(&self) -> Result<(), CombatError> {
        if self.outcome.is_some() {
            return Err(CombatError::CombatOver);
        }
        if self.enemy.is_none() {
            return Err(CombatError::MissingCombatant);
        }
        if !self.player_turn || self.action_delay > 0 {
            return Err(CombatError::NotPlayerTurn);
        }
        Ok(())
    }

    fn reject<T>(&mut self, err: CombatError) -> Result<T, CombatError> {
        debug!(error = %err, "action rejected");
        self.push_log(capitalize(&err.to_string()), LogColor::Warning);
        Err(err)
    }

    fn consume_turn(&mut self) {
        self.player_turn = false;
        self.phase = Phase::SelectAction;
        self.action_delay = ACTION_DELAY_TICKS;
    }

    fn cast_heal(&mut self, player: &mut CharacterRecord, spell: &Spell) -> ActionOutcome {
        let roll = spell_damage(spell, &player.stats(), &mut self.rng);
        let healed = player.restore_hp(roll.amount);
        self.bus
            .animation(Anchor::Player, AnimationKind::Heal, SPELL_ANIMATION_TICKS);
        self.bus
            .floating_text(Anchor::Player, format!("+{}", healed), TextKind::Heal);
        self.bus.audio_cue(AudioCue::Heal);
        self.push_log(
            format!("You cast {} and recover {} HP.", spell.name, healed),
            LogColor::Heal,
        );
        ActionOutcome::Healed(healed)
    }

    fn cast_drain(&mut self, player: &mut CharacterRecord, spell: &Spell) -> ActionOutcome {
        let roll = spell_damage(spell, &player.stats(), &mut self.rng);
        let enemy_name = match self.enemy.as_mut() {
            Some(enemy) => {
                enemy.take_damage(roll.amount);
                enemy.name.clone()
            }
            None => String::new(),
        };
        let healed = player.restore_hp(roll.amount / DRAIN_HEAL_DIVISOR);

        self.bus
            .animation(Anchor::Enemy, AnimationKind::Spell, SPELL_ANIMATION_TICKS);
        self.show_damage(Anchor::Enemy, roll);
        if healed > 0 {
            self.bus
                .floating_text(Anchor::Player, format!("+{}", healed), TextKind::Heal);
        }
        self.push_log(
            format!(
                "{} drains {} HP from {} and restores {} HP.",
                spell.name, roll.amount, enemy_name, healed
            ),
            LogColor::PlayerAction,
        );
        ActionOutcome::Drained {
            damage: roll.amount,
            healed,
        }
    }

    fn cast_damage(&mut self, player: &mut CharacterRecord, spell: &Spell) -> ActionOutcome {
        let roll = spell_damage(spell, &player.stats(), &mut self.rng);
        let effect = apply_spell_effect(spell, &mut self.enemy_status, &mut self.rng);
        let enemy_name = match self.enemy.as_mut() {
            Some(enemy) => {
                enemy.take_damage(roll.amount);
                enemy.name.clone()
            }
            None => String::new(),
        };

        self.bus
            .animation(Anchor::Enemy, AnimationKind::Spell, SPELL_ANIMATION_TICKS);
        self.show_damage(Anchor::Enemy, roll);
        let (message, color) = if roll.critical {
            (
                format!(
                    "Critical! {} hits {} for {} damage!",
                    spell.name, enemy_name, roll.amount
                ),
                LogColor::Critical,
            )
        } else {
            (
                format!("{} hits {} for {} damage.", spell.name, enemy_name, roll.amount),
                LogColor::PlayerAction,
            )
        };
        self.push_log(message, color);

        if let Some(effect) = effect {
            let verb = effect.behavior().verb;
            self.bus
                .floating_text(Anchor::Enemy, effect.name().to_uppercase(), TextKind::Status);
            self.push_log(format!("{} is {}!", enemy_name, verb), LogColor::Status);
        }

        ActionOutcome::Hit {
            damage: roll.amount,
            critical: roll.critical,
            effect,
        }
    }

    fn enemy_turn(&mut self, player: &mut CharacterRecord) {
        let player_stats = player.stats();
        let Some(enemy) = self.enemy.as_ref() else {
            return;
        };
        let enemy_stats = enemy.stats();
        let enemy_name = enemy.name.clone();

        if roll_hit(&enemy_stats, &player_stats, &mut self.rng) {
            let (min, max) = ENEMY_ATTACK_DAMAGE;
            let roll = physical_damage(min, max, &enemy_stats, &mut self.rng);
            let taken = player.take_damage(roll.amount);
            self.bus
                .animation(Anchor::Player, AnimationKind::Hit, HIT_ANIMATION_TICKS);
            self.show_damage(Anchor::Player, DamageRoll { amount: taken, critical: roll.critical });
            let message = if roll.critical {
                format!("{} lands a critical hit for {} damage!", enemy_name, taken)
            } else {
                format!("{} hits you for {} damage.", enemy_name, taken)
            };
            self.push_log(message, LogColor::EnemyAction);
        } else {
            self.show_miss(Anchor::Player);
            self.push_log(format!("{} misses you.", enemy_name), LogColor::EnemyAction);
        }

        self.tick_enemy_status(&enemy_name);
        self.tick_player_status(player);

        self.player_turn = true;
        self.action_delay = ACTION_DELAY_TICKS;
        debug!(player_hp = player.hit_points, "enemy turn finished");
    }

    fn tick_enemy_status(&mut self, enemy_name: &str) {
        for report in tick_status_effects(&mut self.enemy_status, &mut self.rng) {
            if report.damage > 0 {
                let taken = self
                    .enemy
                    .as_mut()
                    .map_or(0, |enemy| enemy.take_damage(report.damage));
                self.bus
                    .floating_text(Anchor::Enemy, format!("-{}", taken), TextKind::Status);
                self.push_log(
                    format!(
                        "{} takes {} {} damage.",
                        enemy_name,
                        taken,
                        report.effect.name()
                    ),
                    LogColor::Status,
                );
            } else {
                self.push_log(
                    format!("{} is {}!", enemy_name, report.effect.behavior().verb),
                    LogColor::Status,
                );
            }
            if report.expired {
                self.push_log(
                    format!("{} recovers from {}.", enemy_name, report.effect.name()),
                    LogColor::Status,
                );
            }
        }
    }

    fn tick_player_status(&mut self, player: &mut CharacterRecord) {
        for report in tick_status_effects(&mut self.player_status, &mut self.rng) {
            if report.damage > 0 {
                let taken = player.take_damage(report.damage);
                self.bus
                    .floating_text(Anchor::Player, format!("-{}", taken), TextKind::Status);
                self.push_log(
                    format!("You take {} {} damage.", taken, report.effect.name()),
                    LogColor::Status,
                );
            } else {
                self.push_log(
                    format!("You are {}!", report.effect.behavior().verb),
                    LogColor::Status,
                );
            }
            if report.expired {
                self.push_log(
                    format!("You recover from {}.", report.effect.name()),
                    LogColor::Status,
                );
            }
        }
    }

    fn show_damage(&mut self, anchor: Anchor, roll: DamageRoll) {
        if roll.critical {
            self.bus.floating_text(
                anchor,
                format!("-{}!", roll.amount),
                TextKind::Critical,
            );
            self.bus.screen_shake(SHAKE_ON_CRIT);
            self.bus.audio_cue(AudioCue::CriticalHit);
        } else {
            self.bus
                .floating_text(anchor, format!("-{}", roll.amount), TextKind::Damage);
            self.bus.screen_shake(SHAKE_ON_HIT);
            self.bus.audio_cue(AudioCue::Hit);
        }
    }

    fn show_miss(&mut self, anchor: Anchor) {
        self.bus
            .floating_text(anchor, "Miss".to_string(), TextKind::Miss);
        self.bus.audio_cue(AudioCue::Miss);
    }

    /// Latches a terminal outcome and discards everything transient.
    fn end_combat(&mut self, status: CombatStatus) -> CombatStatus {
        debug_assert!(status.is_terminal(), "combat cannot end on {:?}", status);
        let enemy_name = self
            .enemy
            .as_ref()
            .map(|enemy| enemy.name.clone())
            .unwrap_or_default();

        let (cue, message, color) = match status {
            CombatStatus::Victory => (
                AudioCue::Victory,
                format!("{} is defeated!", enemy_name),
                LogColor::Victory,
            ),
            CombatStatus::Defeat => (
                AudioCue::Defeat,
                "You have been defeated...".to_string(),
                LogColor::Defeat,
            ),
            CombatStatus::Escaped => (
                AudioCue::Escape,
                format!("You escaped from {}!", enemy_name),
                LogColor::Neutral,
            ),
            CombatStatus::Continue => return status,
        };

        self.enemy = None;
        self.outcome = Some(status);
        self.player_status.clear();
        self.enemy_status.clear();
        self.phase = Phase::SelectAction;
        self.action_delay = 0;
        self.bus.clear();

        self.bus.audio_cue(cue);
        self.push_log(message, color);
        info!(outcome = ?status, enemy = %enemy_name, "combat ended");
        status
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::effects::{BusEvent, RecordingBus};
    use crate::enemies::types::{EnemyTier, WorldTheme};
    use crate::spells::aspect::{Aspect, Element};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_enemy(hit_points: u32) -> EnemyInstance {
        EnemyInstance {
            name: "Field Rat".to_string(),
            hit_points,
            max_hit_points: hit_points.max(1),
            aspect: Element::Earth,
            level: 1,
            tier: EnemyTier::Basic,
            theme: WorldTheme::Grassland,
            difficulty_multiplier: 1.0,
        }
    }

    fn create_session(enemy_hp: u32) -> CombatSession<RecordingBus, ChaCha8Rng> {
        let mut session = CombatSession::new(RecordingBus::new(), ChaCha8Rng::seed_from_u64(12345));
        session.start_combat(create_enemy(enemy_hp));
        session
    }

    fn create_player() -> CharacterRecord {
        CharacterRecord::new("Tester", Aspect::new(Element::Fire, 1))
    }

    /// Runs frames until the player may act again or combat ends.
    fn run_until_player_turn(
        session: &mut CombatSession<RecordingBus, ChaCha8Rng>,
        player: &mut CharacterRecord,
    ) -> CombatStatus {
        for _ in 0..200 {
            let status = session.update(player);
            if status.is_terminal() || session.awaiting_input() {
                return status;
            }
        }
        panic!("player never got the turn back");
    }

    #[test]
    fn test_start_combat_resets_state() {
        let session = create_session(50);
        assert!(session.is_player_turn());
        assert_eq!(session.phase(), Phase::SelectAction);
        assert_eq!(session.action_delay(), 0);
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.log().last().unwrap().message, "A wild Field Rat appears!");
        assert!(session.bus().events.contains(&BusEvent::Animation(
            Anchor::Center,
            AnimationKind::Intro,
            INTRO_ANIMATION_TICKS
        )));
    }

    #[test]
    fn test_update_without_enemy_is_a_no_op() {
        let mut session = CombatSession::new(RecordingBus::new(), ChaCha8Rng::seed_from_u64(1));
        let mut player = create_player();
        assert_eq!(session.update(&mut player), CombatStatus::Continue);
        assert!(session.log().is_empty());
        assert_eq!(
            session.player_attack(&mut player),
            Err(CombatError::MissingCombatant)
        );
    }

    #[test]
    fn test_killing_blow_reports_victory_on_next_update() {
        let mut session = create_session(1);
        let mut player = create_player();
        player.hit_points = 10_000;
        loop {
            // Keep swinging until something lands.
            if let Ok(ActionOutcome::Hit { .. }) = session.player_attack(&mut player) {
                break;
            }
            run_until_player_turn(&mut session, &mut player);
        }
        assert_eq!(session.update(&mut player), CombatStatus::Victory);
        assert!(session.enemy().is_none());
        assert!(session.enemy_status().is_empty());
        assert_eq!(session.update(&mut player), CombatStatus::Victory);
        assert!(session.bus().audio_cues().contains(&AudioCue::Victory));
        assert_eq!(
            session.player_attack(&mut player),
            Err(CombatError::CombatOver)
        );
    }

    #[test]
    fn test_player_at_zero_hp_is_defeated() {
        let mut session = create_session(50);
        let mut player = create_player();
        player.hit_points = 0;
        assert_eq!(session.update(&mut player), CombatStatus::Defeat);
        assert_eq!(session.outcome(), Some(CombatStatus::Defeat));
    }

    #[test]
    fn test_enemy_acts_after_action_delay() {
        let mut session = create_session(500);
        let mut player = create_player();
        session.player_attack(&mut player).unwrap();
        assert!(!session.is_player_turn());
        assert_eq!(session.action_delay(), ACTION_DELAY_TICKS);

        for _ in 0..ACTION_DELAY_TICKS {
            session.update(&mut player);
            assert!(!session.is_player_turn());
        }
        session.update(&mut player);
        assert!(session.is_player_turn());
        assert_eq!(session.action_delay(), ACTION_DELAY_TICKS);
        assert!(player.hit_points >= player.max_hp() - 27);
    }

    #[test]
    fn test_insufficient_mana_keeps_turn() {
        let mut session = create_session(50);
        let mut player = create_player();
        player.mana = 4;
        let result = session.player_cast_spell(&mut player, 0);
        assert_eq!(
            result,
            Err(CombatError::InsufficientResource {
                resource: Resource::Mana,
                needed: 5,
                available: 4
            })
        );
        assert_eq!(player.mana, 4);
        assert!(session.is_player_turn());
        assert_eq!(session.action_delay(), 0);
        assert_eq!(
            session.log().last().unwrap().message,
            "Not enough mana to cast Fire Bolt!"
        );
    }

    #[test]
    fn test_spell_spends_mana_and_damages() {
        let mut session = create_session(500);
        let mut player = create_player();
        let outcome = session.player_cast_spell(&mut player, 0).unwrap();
        assert_eq!(player.mana, player.max_mana() - 5);
        match outcome {
            ActionOutcome::Hit { damage, .. } => {
                assert!(damage >= 8);
                assert_eq!(session.enemy().unwrap().hit_points, 500 - damage);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(!session.is_player_turn());
    }

    #[test]
    fn test_invalid_spell_slot_is_rejected() {
        let mut session = create_session(50);
        let mut player = create_player();
        let result = session.player_cast_spell(&mut player, 7);
        assert!(matches!(result, Err(CombatError::InvalidSelection(_))));
        assert!(session.is_player_turn());
    }

    #[test]
    fn test_drain_heals_half_the_damage() {
        let mut session = create_session(500);
        let mut player = CharacterRecord::new("Tester", Aspect::new(Element::Shadow, 1));
        player.level = 3;
        player.mana = player.max_mana();
        player.hit_points = 10;
        let spells = session.available_spells(&player);
        let index = spells
            .iter()
            .position(|s| s.spell_type == SpellType::Drain)
            .unwrap();

        match session.player_cast_spell(&mut player, index).unwrap() {
            ActionOutcome::Drained { damage, healed } => {
                assert_eq!(healed, damage / DRAIN_HEAL_DIVISOR);
                assert_eq!(player.hit_points, 10 + healed);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_mana_potion_restores_mana() {
        let mut session = create_session(50);
        let mut player = create_player();
        player.mana = 0;
        player.add_item("Mana Potion", 2);
        let outcome = session.player_use_item(&mut player, "Mana Potion").unwrap();
        assert_eq!(outcome, ActionOutcome::RestoredMana(20));
        assert_eq!(player.mana, 20);
        assert_eq!(player.item_quantity("Mana Potion"), 1);
    }

    #[test]
    fn test_unknown_potion_uses_default_amount() {
        assert_eq!(consumable_restore_amount("Strange Potion"), DEFAULT_POTION_RESTORE);
        assert!(is_combat_consumable("Restore Tonic"));
        assert!(!is_combat_consumable("Iron Sword"));
    }

    #[test]
    fn test_missing_item_fails_without_cost() {
        let mut session = create_session(50);
        let mut player = create_player();
        let result = session.player_use_item(&mut player, "Health Potion");
        assert!(matches!(
            result,
            Err(CombatError::InsufficientResource {
                resource: Resource::ItemQuantity,
                ..
            })
        ));
        assert!(session.is_player_turn());
    }

    #[test]
    fn test_burn_ticks_then_recovers_on_enemy_turn() {
        let mut session = create_session(500);
        let mut player = create_player();
        session.enemy_status.apply(StatusEffect::Burn, 1);
        session.player_attack(&mut player).unwrap();
        let before = session.enemy().unwrap().hit_points;

        run_until_player_turn(&mut session, &mut player);
        let after = session.enemy().unwrap().hit_points;
        assert!((3..=8).contains(&(before - after)));
        assert!(!session.enemy_status().has(StatusEffect::Burn));
        assert!(session
            .log()
            .iter()
            .any(|e| e.message == "Field Rat recovers from burn."));
    }

    #[test]
    fn test_player_status_ticks_on_enemy_turn() {
        let mut session = create_session(500);
        let mut player = create_player();
        player.hit_points = 10_000;
        session.player_status.apply(StatusEffect::Poison, 1);
        session.player_status.apply(StatusEffect::Freeze, 2);

        session.player_attack(&mut player).unwrap();
        let hp_after_attack = player.hit_points;
        assert_eq!(
            run_until_player_turn(&mut session, &mut player),
            CombatStatus::Continue
        );

        assert!(!session.player_status().has(StatusEffect::Poison));
        assert_eq!(session.player_status().remaining(StatusEffect::Freeze), Some(1));
        assert!(player.hit_points < hp_after_attack);
        let messages: Vec<_> = session.log().iter().map(|e| e.message.clone()).collect();
        assert!(messages.iter().any(|m| m.starts_with("You take ") && m.ends_with(" poison damage.")));
        assert!(messages.iter().any(|m| m == "You recover from poison."));
        assert!(messages.iter().any(|m| m == "You are frozen!"));
    }

    #[test]
    fn test_escape_ends_combat_and_clears_statuses() {
        let mut session = create_session(50);
        session.enemy_status.apply(StatusEffect::Burn, 3);
        session.player_status.apply(StatusEffect::Stun, 2);

        assert_eq!(session.end_combat(CombatStatus::Escaped), CombatStatus::Escaped);
        assert_eq!(session.outcome(), Some(CombatStatus::Escaped));
        assert!(session.enemy().is_none());
        assert!(session.enemy_status().is_empty());
        assert!(session.player_status().is_empty());
        assert_eq!(session.log().last().unwrap().message, "You escaped from Field Rat!");
        assert!(session.bus().audio_cues().contains(&AudioCue::Escape));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "combat cannot end on Continue")]
    fn test_combat_cannot_end_on_continue() {
        let mut session = create_session(50);
        session.end_combat(CombatStatus::Continue);
    }

    #[test]
    fn test_enemy_hp_never_increases() {
        let mut session = create_session(400);
        let mut player = create_player();
        player.add_item("Health Potion", 5);
        let mut last = session.enemy().unwrap().hit_points;
        for turn in 0..12 {
            let _ = match turn % 3 {
                0 => session.player_attack(&mut player),
                1 => session.player_cast_spell(&mut player, 0),
                _ => session.player_use_item(&mut player, "Health Potion"),
            };
            if run_until_player_turn(&mut session, &mut player).is_terminal() {
                break;
            }
            let hp = session.enemy().unwrap().hit_points;
            assert!(hp <= last);
            last = hp;
        }
    }

    #[test]
    fn test_escape_rate_with_baseline_dexterity() {
        let mut player = create_player();
        let mut escapes = 0;
        let trials = 2000;
        for seed in 0..trials {
            let mut session = CombatSession::new(RecordingBus::new(), ChaCha8Rng::seed_from_u64(seed));
            session.start_combat(create_enemy(50));
            if session.attempt_run(&mut player) == Ok(ActionOutcome::Escaped) {
                assert_eq!(session.outcome(), Some(CombatStatus::Escaped));
                assert!(session.enemy().is_none());
                escapes += 1;
            } else {
                assert!(!session.is_player_turn());
            }
        }
        let rate = escapes as f64 / trials as f64;
        assert!((0.55..=0.65).contains(&rate), "escape rate {}", rate);
    }
}
