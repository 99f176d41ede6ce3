//! Enemy templates and difficulty-driven scaling.

pub mod data;
pub mod scaler;
pub mod types;

pub use scaler::*;
pub use types::*;
