//! Turn-based combat: resolver math, status effects, the session state
//! machine and the effects bus it reports through.

pub mod effects;
pub mod input;
pub mod log;
pub mod resolver;
pub mod session;
pub mod status;

pub use effects::{AnimationKind, Anchor, AudioCue, EffectsBus, NullEffects, RecordingBus, TextKind};
pub use input::CombatInput;
pub use log::{CombatLog, CombatLogEntry, LogColor};
pub use session::{
    is_combat_consumable, Action, ActionOutcome, CombatSession, CombatStatus, Phase,
};
pub use status::{StatusEffect, StatusEffects};
