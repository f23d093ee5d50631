//! Damage and Death Resolution
//!
//! Consumes [`DamageEvent`]s and applies them to health, honoring the
//! miniboss QTE gate (a miniboss can be worn down but never killed by
//! ordinary damage), player invulnerability windows, and the lock that
//! protects a QTE target mid-sequence.

use bevy::prelude::*;

use super::components::{ControlGate, Health, Miniboss, Player};
use super::constants::PLAYER_HIT_INVULNERABILITY;
use super::events::{DamageEvent, DamageNumberEvent, DeathEvent};
use super::log::{CombatLog, CombatLogEventType};
use super::qte::QteDirector;

/// Apply all damage events for this tick.
///
/// Ordering inside one event matters: the damage lands first, then the
/// miniboss threshold check runs against the new health value, so the hit
/// that crosses the threshold also performs the registration.
pub fn apply_damage_events(
    mut damage_events: EventReader<DamageEvent>,
    mut director: ResMut<QteDirector>,
    mut targets: Query<(
        &mut Health,
        &Transform,
        Option<&mut Miniboss>,
        Has<Player>,
    )>,
    mut death_events: EventWriter<DeathEvent>,
    mut number_events: EventWriter<DamageNumberEvent>,
    mut combat_log: ResMut<CombatLog>,
) {
    for event in damage_events.read() {
        let Ok((mut health, transform, miniboss, is_player)) = targets.get_mut(event.target)
        else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }
        if is_player && health.is_invulnerable() {
            continue;
        }
        if let Some(boss) = miniboss.as_ref() {
            if boss.locked {
                continue;
            }
        }

        let died = if let Some(mut boss) = miniboss {
            // A miniboss survives any ordinary hit with at least 1 health
            if event.amount >= health.current() {
                health.reset_to(1.0);
            } else {
                health.apply_damage(event.amount);
            }
            if !boss.qte_available && health.fraction() <= boss.qte_threshold {
                boss.qte_available = true;
                director.register(event.target);
                combat_log.log(
                    CombatLogEventType::Qte,
                    format!("{:?} staggered, finisher available", event.target),
                );
            }
            false
        } else {
            health.apply_damage(event.amount)
        };

        if is_player {
            health.invulnerable_left = PLAYER_HIT_INVULNERABILITY;
        }

        number_events.send(DamageNumberEvent {
            amount: event.amount,
            is_crit: event.is_crit,
            world_position: transform.translation.truncate(),
        });
        combat_log.log(
            CombatLogEventType::Damage,
            format!(
                "{:?} takes {:.0} damage{} ({:.0} left)",
                event.target,
                event.amount,
                if event.is_crit { " (CRIT)" } else { "" },
                health.current(),
            ),
        );

        if died {
            death_events.send(DeathEvent {
                entity: event.target,
            });
        }
    }
}

/// Resolve deaths. Enemies are removed from the world (and from the QTE
/// pool); a dead player keeps their entity but loses control for good.
pub fn handle_death_events(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    mut director: ResMut<QteDirector>,
    mut gate: ResMut<ControlGate>,
    player_query: Query<(), With<Player>>,
    mut combat_log: ResMut<CombatLog>,
) {
    for event in death_events.read() {
        if player_query.get(event.entity).is_ok() {
            gate.set_control_enabled(false);
            gate.set_attack_enabled(false);
            combat_log.log(CombatLogEventType::Death, "Player died".to_string());
        } else {
            director.unregister(event.entity);
            commands.entity(event.entity).despawn();
            combat_log.log(
                CombatLogEventType::Death,
                format!("{:?} died", event.entity),
            );
        }
    }
}

/// Count down invulnerability windows on scaled time, so slow motion
/// stretches the player's mercy window along with the rest of the scene.
pub fn tick_health_timers(time: Res<Time>, mut query: Query<&mut Health>) {
    let dt = time.delta_secs();
    for mut health in query.iter_mut() {
        if health.invulnerable_left > 0.0 {
            health.invulnerable_left = (health.invulnerable_left - dt).max(0.0);
        }
    }
}
