//! Error types surfaced by the combat core and the character load boundary.

use thiserror::Error;

/// Resource a player action can run short of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Mana,
    ItemQuantity,
}

impl Resource {
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Mana => "mana",
            Resource::ItemQuantity => "item quantity",
        }
    }
}

/// Failures of a player action. Every variant is recovered inside the
/// session: the turn is not consumed and a log line is shown instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("not enough {}: need {needed}, have {available}", .resource.name())]
    InsufficientResource {
        resource: Resource,
        needed: u32,
        available: u32,
    },

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("no combatant loaded")]
    MissingCombatant,

    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("combat is already over")]
    CombatOver,
}

/// Failures while loading or saving a character record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported record version {found} (newest known is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid character record: {0}")]
    Invalid(String),
}
