//! Headless balance simulator.
//!
//! Plays many seeded auto-battles through the same `CombatSession` API the
//! terminal front end uses, so results match real fights.

mod config;
mod policy;
mod report;
mod runner;

pub use config::SimConfig;
pub use policy::{choose_action, PlannedAction};
pub use report::{FightResult, SimReport};
pub use runner::{run_simulation, simulate_fight};
