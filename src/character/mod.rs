//! Player character: attributes, equipment, the persisted record and the
//! stat provider the combat core reads from.

pub mod attributes;
pub mod equipment;
pub mod record;
pub mod stats;

pub use record::CharacterRecord;
pub use stats::{CombatantStats, StatProvider};
