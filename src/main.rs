//! Slashdown - Top-Down Hack-and-Slash Prototype
//!
//! A prototype implementation of a top-down brawler built around a weapon
//! combo system and a slow-motion Quick-Time-Event finisher.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

mod camera;
mod cli;
mod combat;
mod headless;
mod keybindings;
mod ui;

use camera::CameraPlugin;
use combat::spawn::WorldPlugin;
use combat::weapons::WeaponConfigPlugin;
use combat::CombatPlugin;
use keybindings::{Keybindings, KEYBINDINGS_PATH};
use ui::HudPlugin;

fn main() {
    let args = cli::parse_args();

    // Headless scenario mode: run a scripted combat scenario and exit
    if let Some(scenario_path) = args.headless {
        let output = args.output.map(|p| p.to_string_lossy().to_string());
        match headless::run_headless_scenario(&scenario_path, output) {
            Ok(()) => return,
            Err(e) => {
                eprintln!("Headless scenario failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    let keybindings = match Keybindings::load_or_default(std::path::Path::new(KEYBINDINGS_PATH)) {
        Ok(bindings) => bindings,
        Err(e) => {
            eprintln!("Keybindings configuration error: {}", e);
            std::process::exit(1);
        }
    };

    App::new()
        // Bevy default plugins with custom window settings
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Slashdown".to_string(),
                resolution: (1280.0, 720.0).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(keybindings)
        // Our game plugins
        .add_plugins((
            EguiPlugin,
            WeaponConfigPlugin,
            CombatPlugin,
            WorldPlugin,
            CameraPlugin,
            HudPlugin,
        ))
        .add_systems(
            Update,
            combat::input::sample_player_input.in_set(combat::CombatSet::Input),
        )
        .run();
}
