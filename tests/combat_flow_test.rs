//! Integration test: full combat flow
//!
//! Drives a scaled enemy and a loaded character through the public session
//! API, from the first frame to a terminal outcome.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish::character::CharacterRecord;
use skirmish::combat::{
    ActionOutcome, AudioCue, CombatInput, CombatSession, CombatStatus, Phase, RecordingBus,
};
use skirmish::enemies::{EnemyScaler, EnemyTier, WorldTheme};
use skirmish::spells::aspect::{Aspect, Element};

type TestSession = CombatSession<RecordingBus, ChaCha8Rng>;

fn create_session(seed: u64) -> TestSession {
    CombatSession::new(RecordingBus::new(), ChaCha8Rng::seed_from_u64(seed))
}

/// Advance frames until the player may act or the fight ends.
fn advance(session: &mut TestSession, player: &mut CharacterRecord) -> CombatStatus {
    for _ in 0..500 {
        let status = session.update(player);
        if status.is_terminal() || session.awaiting_input() {
            return status;
        }
    }
    panic!("session stalled");
}

#[test]
fn test_menu_driven_fight_reaches_an_outcome() {
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let enemy = EnemyScaler::new().create_scaled_enemy(&mut rng);
    assert_eq!(enemy.theme, WorldTheme::Grassland);
    assert_eq!(enemy.tier, EnemyTier::Basic);

    let mut player = CharacterRecord::new("Hero", Aspect::new(Element::Fire, 1));
    player.hit_points = 5_000;
    let mut session = create_session(99);
    session.start_combat(enemy);

    let mut outcome = CombatStatus::Continue;
    for _ in 0..200 {
        // Attack is the first entry of the action menu.
        session.handle_input(&mut player, CombatInput::Confirm);
        outcome = advance(&mut session, &mut player);
        if outcome.is_terminal() {
            break;
        }
    }

    assert_eq!(outcome, CombatStatus::Victory);
    assert!(session.enemy().is_none());
    assert_eq!(session.bus().audio_cues().last(), Some(&AudioCue::Victory));
    assert!(session.log().len() <= 8);
    assert!(session.log().visible().count() <= 6);
}

#[test]
fn test_spell_menu_casts_and_spends_mana() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut scaler = EnemyScaler::new();
    scaler.set_difficulty_multiplier(3.0);
    let enemy = scaler.create_scaled_enemy(&mut rng);

    let mut player = CharacterRecord::new("Mage", Aspect::new(Element::Ice, 1));
    player.level = 5;
    player.mana = player.max_mana();
    let mut session = create_session(3);
    session.start_combat(enemy);

    assert_eq!(session.available_spells(&player).len(), 3);

    session.handle_input(&mut player, CombatInput::Down);
    session.handle_input(&mut player, CombatInput::Confirm);
    assert_eq!(session.phase(), Phase::SelectSpell);
    session.handle_input(&mut player, CombatInput::Confirm);

    let cost = session.available_spells(&player)[0].mana_cost;
    assert_eq!(player.mana, player.max_mana() - cost);
    assert!(!session.is_player_turn());
    assert_eq!(session.phase(), Phase::SelectAction);
}

#[test]
fn test_loaded_character_fights_and_saves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hero.json");
    std::fs::write(
        &path,
        r#"{"Name": "Veteran", "Level": 4, "Hit_Points": 30, "Aspect1": "light_level_1",
            "Inventory": {"Health Potion": 1, "Old Boot": 3}}"#,
    )
    .unwrap();

    let mut player = CharacterRecord::load(&path).unwrap();
    assert_eq!(player.hit_points, 30);
    assert_eq!(player.mana, player.max_mana());

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let enemy = EnemyScaler::new().create_specific_enemy("boar", None, &mut rng);
    assert_eq!(enemy.name, "Thornback Boar");

    let mut session = create_session(5);
    session.start_combat(enemy);
    assert_eq!(session.combat_items(&player).len(), 1);

    let outcome = session.player_use_item(&mut player, "Health Potion").unwrap();
    assert!(matches!(outcome, ActionOutcome::Healed(_)));
    assert!(player.hit_points > 30);

    player.save(&path).unwrap();
    let reloaded = CharacterRecord::load(&path).unwrap();
    assert_eq!(reloaded.item_quantity("Health Potion"), 0);
    assert_eq!(reloaded.item_quantity("Old Boot"), 3);
    assert_eq!(reloaded.hit_points, player.hit_points);
}

#[test]
fn test_running_away_eventually_escapes() {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let enemy = EnemyScaler::new().create_scaled_enemy(&mut rng);
    let mut player = CharacterRecord::new("Coward", Aspect::default());
    player.hit_points = 5_000;
    let mut session = create_session(8);
    session.start_combat(enemy);

    let mut outcome = CombatStatus::Continue;
    for _ in 0..50 {
        match session.attempt_run(&mut player) {
            Ok(ActionOutcome::Escaped) => {
                outcome = session.update(&mut player);
                break;
            }
            _ => {
                advance(&mut session, &mut player);
            }
        }
    }

    assert_eq!(outcome, CombatStatus::Escaped);
    assert_eq!(session.update(&mut player), CombatStatus::Escaped);
    assert!(session.enemy_status().is_empty());
}

#[test]
fn test_defeat_when_player_falls() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut scaler = EnemyScaler::new();
    scaler.set_difficulty_level(25);
    let enemy = scaler.create_scaled_boss(&mut rng);
    assert_eq!(enemy.theme, WorldTheme::Cosmic);

    let mut player = CharacterRecord::new("Doomed", Aspect::default());
    player.hit_points = 1;
    let mut session = create_session(11);
    session.start_combat(enemy);

    let mut outcome = CombatStatus::Continue;
    for _ in 0..100 {
        let _ = session.player_attack(&mut player);
        outcome = advance(&mut session, &mut player);
        if outcome.is_terminal() {
            break;
        }
    }
    assert_eq!(outcome, CombatStatus::Defeat);
    assert_eq!(session.bus().audio_cues().last(), Some(&AudioCue::Defeat));
}
