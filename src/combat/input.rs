//! Keyboard Input Sampling
//!
//! Translates raw keyboard state into [`MoveIntent`], [`CombatCommand`]s,
//! and QTE attempts, through the remappable keybindings. While a QTE
//! sequence is active the movement keys are repurposed as the QTE alphabet
//! and every other just-pressed key counts as a (failing) attempt.

use bevy::prelude::*;

use crate::keybindings::{GameAction, Keybindings};

use super::components::MoveIntent;
use super::events::{CombatCommand, QteAttempt};
use super::qte::{QteDirector, QteSymbol};

fn symbol_for_action(action: GameAction) -> Option<QteSymbol> {
    match action {
        GameAction::MoveUp => Some(QteSymbol::Up),
        GameAction::MoveDown => Some(QteSymbol::Down),
        GameAction::MoveLeft => Some(QteSymbol::Left),
        GameAction::MoveRight => Some(QteSymbol::Right),
        _ => None,
    }
}

pub fn sample_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<Keybindings>,
    director: Res<QteDirector>,
    mut intent: ResMut<MoveIntent>,
    mut commands_out: EventWriter<CombatCommand>,
    mut attempts: EventWriter<QteAttempt>,
) {
    if director.is_active() {
        intent.direction = Vec2::ZERO;
        // Any key press answers the current stage; unmapped keys fail it
        for key in keyboard.get_just_pressed() {
            let symbol = bindings
                .movement_action_for(*key)
                .and_then(symbol_for_action);
            attempts.send(QteAttempt { symbol });
        }
        return;
    }

    let mut direction = Vec2::ZERO;
    if bindings.action_pressed(GameAction::MoveUp, &keyboard) {
        direction.y += 1.0;
    }
    if bindings.action_pressed(GameAction::MoveDown, &keyboard) {
        direction.y -= 1.0;
    }
    if bindings.action_pressed(GameAction::MoveLeft, &keyboard) {
        direction.x -= 1.0;
    }
    if bindings.action_pressed(GameAction::MoveRight, &keyboard) {
        direction.x += 1.0;
    }
    intent.direction = direction;

    if bindings.action_just_pressed(GameAction::LightAttack, &keyboard) {
        commands_out.send(CombatCommand::LightAttack);
    }
    if bindings.action_just_pressed(GameAction::BurstAttack, &keyboard) {
        commands_out.send(CombatCommand::BurstAttack);
    }
    if bindings.action_just_pressed(GameAction::Dash, &keyboard) {
        commands_out.send(CombatCommand::Dash);
    }
    if bindings.action_just_pressed(GameAction::InitiateQte, &keyboard) {
        commands_out.send(CombatCommand::InitiateQte);
    }
    for (action, slot) in [
        (GameAction::Weapon1, 0),
        (GameAction::Weapon2, 1),
        (GameAction::Weapon3, 2),
    ] {
        if bindings.action_just_pressed(action, &keyboard) {
            commands_out.send(CombatCommand::SwitchWeapon(slot));
        }
    }
}
