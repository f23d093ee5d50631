//! Integration tests for headless scenario execution
//!
//! These tests run full combat scenarios through the real schedule: combo
//! attacks wearing a miniboss down to its finisher threshold, the QTE
//! sequence in both success and failure paths, and the restoration of
//! control and time scale afterwards.

use regex::Regex;

use slashdown::headless::config::{MinibossSetup, PlayerSetup, ScriptedInput};
use slashdown::headless::{run_scenario, HeadlessScenarioConfig};
use slashdown::CombatLogEventType;

/// Player pinned near the east wall, miniboss against it: knockback cannot
/// push the target out of attack range, so scripted swings land reliably.
fn wall_scenario(script: Vec<(f32, &str)>) -> HeadlessScenarioConfig {
    HeadlessScenarioConfig {
        duration_secs: 5.0,
        seed: Some(42),
        output_path: None,
        player: PlayerSetup {
            position: [460.0, 0.0],
            // Below any possible roll: crits disabled for exact damage math
            crit_chance: -1.0,
        },
        grunts: vec![],
        miniboss: Some(MinibossSetup {
            position: [520.0, 0.0],
            max_health: 100.0,
            qte_threshold: 0.2,
            move_speed: 0.0,
        }),
        script: script
            .into_iter()
            .map(|(at, action)| ScriptedInput {
                at,
                action: action.to_string(),
            })
            .collect(),
    }
}

/// Six light attacks with the starting weapon: 10+15+20+10+15+20 = 90 damage,
/// leaving a 100 hp miniboss at 10 hp, below its 20% finisher threshold.
fn wear_down_script() -> Vec<(f32, &'static str)> {
    vec![
        (0.1, "light"),
        (0.5, "light"),
        (0.9, "light"),
        (1.3, "light"),
        (1.7, "light"),
        (2.1, "light"),
    ]
}

fn log_matches(result: &slashdown::headless::ScenarioResult, pattern: &str) -> bool {
    let re = Regex::new(pattern).unwrap();
    result.log.iter().any(|entry| re.is_match(&entry.message))
}

#[test]
fn test_combo_wears_miniboss_to_threshold() {
    let config = wall_scenario(wear_down_script());
    let result = run_scenario(&config).unwrap();

    assert_eq!(result.total_attacks, 6);
    assert_eq!(result.total_crits, 0);
    assert!(result.miniboss_alive);
    assert_eq!(result.miniboss_health, 10.0);
    assert!(log_matches(&result, "staggered, finisher available"));
}

#[test]
fn test_ordinary_damage_cannot_kill_miniboss() {
    let mut config = wall_scenario(wear_down_script());
    // 90 scripted damage against a 20 hp miniboss
    config.miniboss.as_mut().unwrap().max_health = 20.0;
    let result = run_scenario(&config).unwrap();

    assert!(result.miniboss_alive);
    assert_eq!(result.miniboss_health, 1.0);
}

#[test]
fn test_full_qte_success_executes_miniboss() {
    let mut script = wear_down_script();
    script.push((2.6, "initiate"));
    script.push((2.9, "qte-correct"));
    script.push((3.2, "qte-correct"));
    script.push((3.5, "qte-correct"));
    script.push((3.8, "qte-correct"));
    let config = wall_scenario(script);
    let result = run_scenario(&config).unwrap();

    assert!(!result.miniboss_alive);
    assert!(!result.qte_active);
    assert!(result.control_enabled);
    assert!(result.attack_enabled);
    assert_eq!(result.time_scale, 1.0);
    assert_eq!(result.player_health, 100.0);
    assert!(log_matches(&result, "QTE finisher executed"));
}

#[test]
fn test_qte_timeout_restores_partial_health() {
    let mut script = wear_down_script();
    script.push((2.6, "initiate"));
    script.push((2.9, "qte-correct"));
    script.push((3.2, "qte-correct"));
    // Third stage window (0.75s from 3.2) expires with no further input
    let config = wall_scenario(script);
    let result = run_scenario(&config).unwrap();

    assert!(result.miniboss_alive);
    // failure pool: 20 threshold hp minus 5 per completed stage
    assert_eq!(result.miniboss_health, 10.0);
    assert!(!result.qte_active);
    assert!(result.control_enabled);
    assert!(result.attack_enabled);
    assert_eq!(result.time_scale, 1.0);
    assert!(log_matches(&result, "timed out after 2 stages"));
}

#[test]
fn test_qte_wrong_input_fails_immediately() {
    let mut script = wear_down_script();
    script.push((2.6, "initiate"));
    script.push((2.9, "qte-correct"));
    script.push((3.2, "qte-wrong"));
    let config = wall_scenario(script);
    let result = run_scenario(&config).unwrap();

    assert!(result.miniboss_alive);
    assert_eq!(result.miniboss_health, 15.0);
    assert!(result.control_enabled);
    assert_eq!(result.time_scale, 1.0);
    assert!(log_matches(&result, "failed on wrong input after 1 stages"));
}

#[test]
fn test_qte_locks_player_control_while_active() {
    let mut script = wear_down_script();
    script.push((2.6, "initiate"));
    // Two stages answered, scenario ends inside the third window
    script.push((2.9, "qte-correct"));
    // A second trigger while a sequence runs must be a no-op
    script.push((3.0, "initiate"));
    script.push((3.2, "qte-correct"));
    let mut config = wall_scenario(script);
    config.duration_secs = 3.5;
    let result = run_scenario(&config).unwrap();

    assert!(result.qte_active);
    assert!(!result.control_enabled);
    assert!(!result.attack_enabled);
    assert_eq!(result.time_scale, 0.25);
}

#[test]
fn test_player_death_during_qte_keeps_control_locked() {
    let mut script = wear_down_script();
    script.push((2.6, "initiate"));
    // No stage answers: the first window runs out at 3.35
    let mut config = wall_scenario(script);
    // A lethal grunt timed to reach the player inside that window. It covers
    // 286 units at full speed before the QTE starts at 2.6, then creeps the
    // last 8 units under slow motion and lands its hit around 2.9.
    config.grunts = vec![slashdown::headless::config::GruntSetup {
        position: [138.0, 0.0],
        max_health: 60.0,
        move_speed: 110.0,
        contact_damage: 200.0,
        contact_knockback: 0.0,
    }];
    let result = run_scenario(&config).unwrap();

    assert!(!result.player_alive);
    assert!(result.miniboss_alive);
    assert_eq!(result.miniboss_health, 20.0);
    // Time and the prompt recover, but a dead player's control does not
    assert!(!result.qte_active);
    assert_eq!(result.time_scale, 1.0);
    assert!(!result.control_enabled);
    assert!(!result.attack_enabled);
    assert!(log_matches(&result, "Player died"));
    assert!(log_matches(&result, "timed out after 0 stages"));
}

#[test]
fn test_initiate_without_eligible_target_is_ignored() {
    // Only two attacks: the miniboss stays far above its threshold
    let config = wall_scenario(vec![(0.1, "light"), (0.5, "light"), (1.0, "initiate")]);
    let result = run_scenario(&config).unwrap();

    assert!(!result.qte_active);
    assert!(result.control_enabled);
    assert_eq!(result.time_scale, 1.0);
    assert_eq!(result.miniboss_health, 75.0);
}

#[test]
fn test_grunt_contact_damages_player() {
    let config = HeadlessScenarioConfig {
        duration_secs: 3.0,
        seed: Some(7),
        output_path: None,
        player: PlayerSetup {
            position: [0.0, 0.0],
            crit_chance: -1.0,
        },
        grunts: vec![slashdown::headless::config::GruntSetup {
            position: [20.0, 0.0],
            max_health: 60.0,
            move_speed: 110.0,
            contact_damage: 8.0,
            contact_knockback: 260.0,
        }],
        miniboss: None,
        script: vec![],
    };
    let result = run_scenario(&config).unwrap();

    assert!(result.player_alive);
    assert!(result.player_health < 100.0);
    assert!(log_matches(&result, "takes 8 damage"));
}

#[test]
fn test_seeded_scenarios_are_deterministic() {
    let mut config = wall_scenario(wear_down_script());
    config.player.crit_chance = 20.0;
    config.seed = Some(1234);

    let first = run_scenario(&config).unwrap();
    let second = run_scenario(&config).unwrap();

    assert_eq!(first.total_crits, second.total_crits);
    assert_eq!(first.miniboss_health, second.miniboss_health);
    assert_eq!(first.log.len(), second.log.len());
}

#[test]
fn test_combat_log_records_qte_lifecycle() {
    let mut script = wear_down_script();
    script.push((2.6, "initiate"));
    script.push((2.9, "qte-correct"));
    script.push((3.2, "qte-correct"));
    script.push((3.5, "qte-correct"));
    script.push((3.8, "qte-correct"));
    let config = wall_scenario(script);
    let result = run_scenario(&config).unwrap();

    let qte_entries: Vec<_> = result
        .log
        .iter()
        .filter(|e| e.event_type == CombatLogEventType::Qte)
        .collect();
    // staggered + started + 3 stage advances + all-stages + finisher
    assert!(qte_entries.len() >= 6, "got {} entries", qte_entries.len());
    assert!(log_matches(&result, "QTE started against"));

    // Timestamps never go backwards
    for pair in result.log.windows(2) {
        assert!(pair[1].timestamp >= pair[0].timestamp);
    }
}
