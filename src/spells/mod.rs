//! Spell data and the aspect-driven spell catalog.

pub mod aspect;
pub mod catalog;
pub mod types;

pub use aspect::*;
pub use catalog::*;
pub use types::*;
