pub mod combat_effects;
mod combat_scene;

pub use combat_scene::draw_combat_scene;
