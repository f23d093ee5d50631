//! Headless scenario execution
//!
//! Runs combat scenarios without any graphical output, suitable for
//! automated testing. Time is stepped manually at a fixed 60 Hz so a given
//! seed and script always replay identically.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::path::Path;
use std::time::Duration;

use crate::combat::attack::ComboAttack;
use crate::combat::components::{
    ControlGate, Enemy, GameRng, Health, Miniboss, MoveIntent, Player, PlayerMotion,
};
use crate::combat::constants::{
    CRIT_MULTIPLIER, PLAYER_DASH_COOLDOWN, PLAYER_DASH_DURATION, PLAYER_DASH_SPEED,
    PLAYER_MAX_HEALTH, PLAYER_MOVE_SPEED,
};
use crate::combat::events::{CombatCommand, QteAttempt};
use crate::combat::log::{CombatLog, CombatLogEntry, CombatLogEventType};
use crate::combat::qte::QteDirector;
use crate::combat::weapons::load_weapon_roster;
use crate::combat::{CombatPlugin, CombatSet};

use super::config::{HeadlessScenarioConfig, ScriptAction};

/// Simulation tick length: fixed 60 Hz.
const TICK: f64 = 1.0 / 60.0;

/// Result of a completed headless scenario
///
/// Provides programmatic access to the end state for testing and analysis.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Simulated real time in seconds
    pub elapsed: f32,
    pub player_health: f32,
    pub player_alive: bool,
    /// Miniboss health at scenario end (0 if dead or absent)
    pub miniboss_health: f32,
    pub miniboss_alive: bool,
    /// Player combo step at scenario end
    pub combo_step: usize,
    pub total_attacks: u32,
    pub total_crits: u32,
    /// Virtual clock speed at scenario end (1.0 unless a QTE is mid-flight)
    pub time_scale: f32,
    pub control_enabled: bool,
    pub attack_enabled: bool,
    pub qte_active: bool,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
    /// Full combat log of the scenario
    pub log: Vec<CombatLogEntry>,
}

/// The parsed input script, dispatched by elapsed real time.
#[derive(Resource)]
struct ScenarioScript {
    /// (time, action) pairs sorted by time
    actions: Vec<(f32, ScriptAction)>,
    cursor: usize,
}

/// Dispatch every script entry whose time has come. Runs in the input phase
/// so a scripted press lands before the same tick's windows decrement,
/// exactly like a keyboard press would.
fn drive_script(
    real_time: Res<Time<Real>>,
    mut script: ResMut<ScenarioScript>,
    director: Res<QteDirector>,
    mut intent: ResMut<MoveIntent>,
    mut commands_out: EventWriter<CombatCommand>,
    mut attempts: EventWriter<QteAttempt>,
) {
    let now = real_time.elapsed_secs();
    while script.cursor < script.actions.len() && script.actions[script.cursor].0 <= now {
        let (_, action) = script.actions[script.cursor];
        script.cursor += 1;
        match action {
            ScriptAction::LightAttack => {
                commands_out.send(CombatCommand::LightAttack);
            }
            ScriptAction::BurstAttack => {
                commands_out.send(CombatCommand::BurstAttack);
            }
            ScriptAction::Dash => {
                commands_out.send(CombatCommand::Dash);
            }
            ScriptAction::SwitchWeapon(slot) => {
                commands_out.send(CombatCommand::SwitchWeapon(slot));
            }
            ScriptAction::InitiateQte => {
                commands_out.send(CombatCommand::InitiateQte);
            }
            ScriptAction::QteCorrect => {
                // Read the expected symbol rather than guessing the shuffle
                if let Some(symbol) = director.current_prompt() {
                    attempts.send(QteAttempt {
                        symbol: Some(symbol),
                    });
                }
            }
            ScriptAction::QteWrong => {
                // An unmapped key press; always fails the stage
                attempts.send(QteAttempt { symbol: None });
            }
            ScriptAction::QteSymbol(symbol) => {
                attempts.send(QteAttempt {
                    symbol: Some(symbol),
                });
            }
            ScriptAction::Move(x, y) => {
                intent.direction = Vec2::new(x, y);
            }
            ScriptAction::Stop => {
                intent.direction = Vec2::ZERO;
            }
        }
    }
}

/// Run a scenario to completion and return the end state.
pub fn run_scenario(config: &HeadlessScenarioConfig) -> Result<ScenarioResult, String> {
    config.validate()?;
    let roster = load_weapon_roster()?;

    let mut actions: Vec<(f32, ScriptAction)> = config
        .script
        .iter()
        .map(|entry| {
            HeadlessScenarioConfig::parse_action(&entry.action).map(|action| (entry.at, action))
        })
        .collect::<Result<_, _>>()?;
    actions.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(TICK))),
    )
    .add_plugins(TransformPlugin)
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        TICK,
    )))
    .add_plugins(CombatPlugin)
    .insert_resource(roster)
    .insert_resource(ScenarioScript { actions, cursor: 0 })
    .add_systems(Update, drive_script.in_set(CombatSet::Input));

    match config.seed {
        Some(seed) => {
            app.insert_resource(GameRng::from_seed(seed));
        }
        None => {
            app.insert_resource(GameRng::from_entropy());
        }
    }

    let world = app.world_mut();
    world.resource_mut::<CombatLog>().log(
        CombatLogEventType::SessionEvent,
        "Scenario started (headless mode)".to_string(),
    );

    world.spawn((
        Player,
        Transform::from_xyz(config.player.position[0], config.player.position[1], 0.0),
        Health::new(PLAYER_MAX_HEALTH),
        PlayerMotion::new(
            PLAYER_MOVE_SPEED,
            PLAYER_DASH_SPEED,
            PLAYER_DASH_DURATION,
            PLAYER_DASH_COOLDOWN,
        ),
        ComboAttack::new(config.player.crit_chance, CRIT_MULTIPLIER),
    ));

    if let Some(boss) = &config.miniboss {
        world.spawn((
            Transform::from_xyz(boss.position[0], boss.position[1], 0.0),
            Enemy {
                move_speed: boss.move_speed,
                contact_damage: crate::combat::constants::MINIBOSS_CONTACT_DAMAGE,
                contact_knockback: crate::combat::constants::MINIBOSS_CONTACT_KNOCKBACK,
            },
            Miniboss::new(boss.qte_threshold),
            Health::new(boss.max_health),
        ));
    }

    for grunt in &config.grunts {
        world.spawn((
            Transform::from_xyz(grunt.position[0], grunt.position[1], 0.0),
            Enemy {
                move_speed: grunt.move_speed,
                contact_damage: grunt.contact_damage,
                contact_knockback: grunt.contact_knockback,
            },
            Health::new(grunt.max_health),
        ));
    }

    let ticks = (config.duration_secs as f64 / TICK).ceil() as u64;
    for _ in 0..ticks {
        app.update();
    }

    let result = build_scenario_result(&mut app, config, ticks);

    if let Some(path) = &config.output_path {
        app.world()
            .resource::<CombatLog>()
            .save_to_file(path)?;
    }

    Ok(result)
}

fn build_scenario_result(
    app: &mut App,
    config: &HeadlessScenarioConfig,
    ticks: u64,
) -> ScenarioResult {
    let world = app.world_mut();

    let mut player_query = world.query_filtered::<(&Health, &ComboAttack), With<Player>>();
    let (player_health, player_alive, combo_step, total_attacks, total_crits) =
        match player_query.iter(world).next() {
            Some((health, combo)) => (
                health.current(),
                health.is_alive(),
                combo.step(),
                combo.total_attacks,
                combo.total_crits,
            ),
            None => (0.0, false, 0, 0, 0),
        };

    let mut boss_query = world.query_filtered::<&Health, With<Miniboss>>();
    let (miniboss_health, miniboss_alive) = match boss_query.iter(world).next() {
        Some(health) => (health.current(), health.is_alive()),
        None => (0.0, false),
    };

    let gate = world.resource::<ControlGate>();
    let control_enabled = gate.control_enabled();
    let attack_enabled = gate.attack_enabled();

    ScenarioResult {
        elapsed: (ticks as f64 * TICK) as f32,
        player_health,
        player_alive,
        miniboss_health,
        miniboss_alive,
        combo_step,
        total_attacks,
        total_crits,
        time_scale: world.resource::<Time<Virtual>>().relative_speed(),
        control_enabled,
        attack_enabled,
        qte_active: world.resource::<QteDirector>().is_active(),
        random_seed: config.seed,
        log: world.resource::<CombatLog>().entries.clone(),
    }
}

/// Run a headless scenario from a JSON file, as invoked from the CLI.
pub fn run_headless_scenario(path: &Path, output: Option<String>) -> Result<(), String> {
    let mut config = HeadlessScenarioConfig::load_from_file(path)?;
    if output.is_some() {
        config.output_path = output;
    }

    println!("Starting headless scenario: {}", path.display());
    let result = run_scenario(&config)?;

    println!("Scenario complete after {:.1}s", result.elapsed);
    println!(
        "  Player: {:.0} hp ({})",
        result.player_health,
        if result.player_alive { "alive" } else { "dead" }
    );
    if config.miniboss.is_some() {
        println!(
            "  Miniboss: {:.0} hp ({})",
            result.miniboss_health,
            if result.miniboss_alive { "alive" } else { "dead" }
        );
    }
    println!(
        "  Attacks: {} ({} crits)",
        result.total_attacks, result.total_crits
    );
    if let Some(out) = &config.output_path {
        println!("  Combat log saved to: {}", out);
    }
    Ok(())
}
