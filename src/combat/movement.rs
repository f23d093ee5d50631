//! Movement and Contact
//!
//! Player walking/dashing, enemy chase AI, and contact damage. All movement
//! runs on scaled time and is suppressed while a knockback is in flight.

use bevy::prelude::*;

use super::components::{ControlGate, Enemy, Health, Miniboss, MoveIntent, Player, PlayerMotion};
use super::constants::{
    ARENA_HALF_SIZE, CONTACT_RADIUS, CONTACT_SHAKE_DURATION, CONTACT_SHAKE_MAGNITUDE,
};
use super::events::{CameraShakeEvent, CombatCommand, DamageEvent, KnockbackEvent};
use super::knockback::Knockback;

pub(super) fn clamp_to_arena(translation: &mut Vec3) {
    translation.x = translation.x.clamp(-ARENA_HALF_SIZE, ARENA_HALF_SIZE);
    translation.y = translation.y.clamp(-ARENA_HALF_SIZE, ARENA_HALF_SIZE);
}

/// Walk and dash the player from the current tick's [`MoveIntent`].
/// Suppressed while the control gate is closed or a knockback is active;
/// dash timers still advance so cooldowns don't freeze mid-sequence.
pub fn player_movement(
    time: Res<Time>,
    gate: Res<ControlGate>,
    intent: Res<MoveIntent>,
    mut commands_in: EventReader<CombatCommand>,
    mut query: Query<(&mut Transform, &mut PlayerMotion, &Health, Has<Knockback>), With<Player>>,
) {
    let Ok((mut transform, mut motion, health, knocked_back)) = query.get_single_mut() else {
        return;
    };
    let dt = time.delta_secs();
    motion.tick(dt);

    let wants_dash = commands_in
        .read()
        .any(|c| matches!(c, CombatCommand::Dash));

    if !health.is_alive() || !gate.control_enabled() || knocked_back {
        return;
    }

    let direction = intent.direction.normalize_or_zero();
    if direction != Vec2::ZERO {
        motion.facing = direction;
    }

    if wants_dash && motion.can_dash() {
        let dash_dir = if direction != Vec2::ZERO {
            direction
        } else {
            motion.facing
        };
        motion.start_dash(dash_dir);
    }

    let velocity = if motion.dashing {
        motion.dash_direction() * motion.dash_speed
    } else {
        direction * motion.move_speed
    };
    transform.translation.x += velocity.x * dt;
    transform.translation.y += velocity.y * dt;
    clamp_to_arena(&mut transform.translation);
}

/// Chase AI: enemies walk toward the player one axis at a time, preferring
/// the axis with the larger gap. Locked minibosses hold still.
pub fn enemy_chase(
    time: Res<Time>,
    player_query: Query<(&Transform, &Health), With<Player>>,
    mut enemy_query: Query<
        (&mut Transform, &Enemy, Option<&Miniboss>, &Health),
        (Without<Player>, Without<Knockback>),
    >,
) {
    let Ok((player_transform, player_health)) = player_query.get_single() else {
        return;
    };
    if !player_health.is_alive() {
        return;
    }
    let player_pos = player_transform.translation.truncate();
    let dt = time.delta_secs();

    for (mut transform, enemy, miniboss, health) in enemy_query.iter_mut() {
        if !health.is_alive() || miniboss.is_some_and(|boss| boss.locked) {
            continue;
        }
        let delta = player_pos - transform.translation.truncate();
        if delta.length() <= CONTACT_RADIUS {
            continue;
        }
        let step = if delta.x.abs() >= delta.y.abs() {
            Vec2::new(delta.x.signum(), 0.0)
        } else {
            Vec2::new(0.0, delta.y.signum())
        };
        transform.translation.x += step.x * enemy.move_speed * dt;
        transform.translation.y += step.y * enemy.move_speed * dt;
        clamp_to_arena(&mut transform.translation);
    }
}

/// Deal contact damage when an enemy closes to touch range. The player's
/// invulnerability window is checked here so one touch produces exactly one
/// damage-plus-knockback pair.
pub fn contact_damage(
    player_query: Query<(Entity, &Transform, &Health), With<Player>>,
    enemy_query: Query<(Entity, &Transform, &Enemy, Option<&Miniboss>, &Health), Without<Player>>,
    mut damage_events: EventWriter<DamageEvent>,
    mut knockback_events: EventWriter<KnockbackEvent>,
    mut shake_events: EventWriter<CameraShakeEvent>,
) {
    let Ok((player, player_transform, player_health)) = player_query.get_single() else {
        return;
    };
    if !player_health.is_alive() || player_health.is_invulnerable() {
        return;
    }
    let player_pos = player_transform.translation.truncate();

    for (enemy, transform, stats, miniboss, health) in enemy_query.iter() {
        if !health.is_alive() || miniboss.is_some_and(|boss| boss.locked) {
            continue;
        }
        let enemy_pos = transform.translation.truncate();
        if player_pos.distance(enemy_pos) > CONTACT_RADIUS {
            continue;
        }
        damage_events.send(DamageEvent {
            source: Some(enemy),
            target: player,
            amount: stats.contact_damage,
            is_crit: false,
        });
        knockback_events.send(KnockbackEvent {
            target: player,
            direction: (player_pos - enemy_pos).normalize_or_zero(),
            force: stats.contact_knockback,
        });
        shake_events.send(CameraShakeEvent {
            duration: CONTACT_SHAKE_DURATION,
            magnitude: CONTACT_SHAKE_MAGNITUDE,
        });
        // One hit per tick at most
        break;
    }
}
