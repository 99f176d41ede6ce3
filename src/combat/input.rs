//! UI-agnostic input handling for the combat menus.

use super::effects::EffectsBus;
use super::log::LogColor;
use super::session::{Action, CombatSession, CombatStatus, Phase};
use crate::character::record::CharacterRecord;
use rand::Rng;

/// Input events for the combat screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatInput {
    /// Move the menu cursor up
    Up,
    /// Move the menu cursor down
    Down,
    /// Run the highlighted entry
    Confirm,
    /// Leave a sub-menu
    Back,
    /// Any other key
    Other,
}

fn wrap_up(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (cursor + len - 1) % len
    }
}

fn wrap_down(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (cursor + 1) % len
    }
}

impl<B: EffectsBus, R: Rng> CombatSession<B, R> {
    /// Process one input for the combat screen.
    ///
    /// Ignored unless it is the player's turn and no action delay is
    /// running. Failed actions leave the turn with the player.
    pub fn handle_input(
        &mut self,
        player: &mut CharacterRecord,
        input: CombatInput,
    ) -> CombatStatus {
        if let Some(outcome) = self.outcome() {
            return outcome;
        }
        if !self.awaiting_input() {
            return CombatStatus::Continue;
        }

        match self.phase() {
            Phase::SelectAction => self.handle_action_menu(player, input),
            Phase::SelectSpell => self.handle_spell_menu(player, input),
            Phase::SelectItem => self.handle_item_menu(player, input),
        }

        self.outcome().unwrap_or(CombatStatus::Continue)
    }

    fn handle_action_menu(&mut self, player: &mut CharacterRecord, input: CombatInput) {
        let len = Action::ALL.len();
        match input {
            CombatInput::Up => {
                let (action, _, _) = self.cursors_mut();
                *action = wrap_up(*action, len);
            }
            CombatInput::Down => {
                let (action, _, _) = self.cursors_mut();
                *action = wrap_down(*action, len);
            }
            CombatInput::Confirm => match Action::ALL[self.action_cursor() % len] {
                Action::Attack => {
                    let _ = self.player_attack(player);
                }
                Action::CastSpell => {
                    if self.available_spells(player).is_empty() {
                        self.push_log("You don't know any spells.", LogColor::Warning);
                    } else {
                        let (_, spell, _) = self.cursors_mut();
                        *spell = 0;
                        self.set_phase(Phase::SelectSpell);
                    }
                }
                Action::UseItem => {
                    if self.combat_items(player).is_empty() {
                        self.push_log("You have no usable items.", LogColor::Warning);
                    } else {
                        let (_, _, item) = self.cursors_mut();
                        *item = 0;
                        self.set_phase(Phase::SelectItem);
                    }
                }
                Action::RunAway => {
                    let _ = self.attempt_run(player);
                }
            },
            CombatInput::Back | CombatInput::Other => {}
        }
    }

    fn handle_spell_menu(&mut self, player: &mut CharacterRecord, input: CombatInput) {
        let len = self.available_spells(player).len();
        if len == 0 {
            self.set_phase(Phase::SelectAction);
            return;
        }
        match input {
            CombatInput::Up => {
                let (_, spell, _) = self.cursors_mut();
                *spell = wrap_up(*spell, len);
            }
            CombatInput::Down => {
                let (_, spell, _) = self.cursors_mut();
                *spell = wrap_down(*spell, len);
            }
            CombatInput::Confirm => {
                let index = self.spell_cursor().min(len - 1);
                let _ = self.player_cast_spell(player, index);
            }
            CombatInput::Back => self.set_phase(Phase::SelectAction),
            CombatInput::Other => {}
        }
    }

    fn handle_item_menu(&mut self, player: &mut CharacterRecord, input: CombatInput) {
        let items = self.combat_items(player);
        if items.is_empty() {
            self.set_phase(Phase::SelectAction);
            return;
        }
        let len = items.len();
        match input {
            CombatInput::Up => {
                let (_, _, item) = self.cursors_mut();
                *item = wrap_up(*item, len);
            }
            CombatInput::Down => {
                let (_, _, item) = self.cursors_mut();
                *item = wrap_down(*item, len);
            }
            CombatInput::Confirm => {
                let (name, _) = &items[self.item_cursor().min(len - 1)];
                let _ = self.player_use_item(player, name);
            }
            CombatInput::Back => self.set_phase(Phase::SelectAction),
            CombatInput::Other => {}
        }
    }
}
