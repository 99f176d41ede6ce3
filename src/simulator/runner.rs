//! Runs seeded fights through the real combat session.

use super::config::SimConfig;
use super::policy::{choose_action, PlannedAction};
use super::report::{FightResult, SimReport};
use crate::character::record::CharacterRecord;
use crate::combat::effects::NullEffects;
use crate::combat::session::CombatSession;
use crate::enemies::scaler::EnemyScaler;
use crate::spells::aspect::Aspect;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Run every configured fight and aggregate the results.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let results = (0..config.num_runs)
        .map(|run_idx| simulate_fight(config, config.seed.wrapping_add(run_idx as u64)))
        .collect();
    SimReport::from_results(results)
}

/// Plays one fight to completion (or timeout) with the given seed.
pub fn simulate_fight(config: &SimConfig, seed: u64) -> FightResult {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut scaler = EnemyScaler::new();
    scaler.set_difficulty_level(config.effective_level());
    scaler.set_difficulty_multiplier(config.multiplier);
    let enemy = if config.boss {
        scaler.create_scaled_boss(&mut rng)
    } else {
        scaler.create_scaled_enemy(&mut rng)
    };
    let enemy_name = enemy.name.clone();
    let enemy_max_hp = enemy.max_hit_points;

    let mut player = CharacterRecord::new("Simulant", Aspect::new(config.element, 1));
    player.level = scaler.difficulty_level();
    player.hit_points = player.max_hp();
    player.mana = player.max_mana();
    player.add_item("Health Potion", config.health_potions);

    let mut session = CombatSession::new(NullEffects, rng);
    session.start_combat(enemy);

    let mut turns = 0;
    let mut frames = 0;
    let status = loop {
        let status = session.update(&mut player);
        if status.is_terminal() {
            break Some(status);
        }
        if frames >= config.max_frames_per_run {
            break None;
        }
        frames += 1;

        if session.awaiting_input() {
            turns += 1;
            let result = match choose_action(&session, &player) {
                PlannedAction::Attack => session.player_attack(&mut player),
                PlannedAction::Cast(index) => session.player_cast_spell(&mut player, index),
                PlannedAction::UseItem(name) => session.player_use_item(&mut player, &name),
            };
            if let Err(err) = result {
                debug!(error = %err, "planned action failed, attacking instead");
                let _ = session.player_attack(&mut player);
            }
        }
    };

    debug!(seed, enemy = %enemy_name, ?status, turns, "fight finished");
    FightResult {
        seed,
        enemy_name,
        enemy_max_hp,
        outcome: status,
        turns,
        player_hp_left: player.hit_points,
        player_max_hp: player.max_hp(),
        potions_used: config.health_potions - player.item_quantity("Health Potion"),
    }
}
