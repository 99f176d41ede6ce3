//! Skirmish - turn-based RPG combat engine.
//!
//! The library holds the combat core, enemy scaling, spell catalog, the
//! character record and the headless simulator. The terminal front end
//! lives in the `skirmish` binary.

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod simulator;
pub mod spells;
