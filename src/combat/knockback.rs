//! Knockback
//!
//! A knockback temporarily replaces an entity's own movement with a fixed
//! velocity. Re-inserting the component on a fresh event preempts any
//! knockback already in flight: direction, force, and timer all restart.

use bevy::prelude::*;

use super::components::{Health, Miniboss};
use super::constants::KNOCKBACK_DURATION;
use super::events::KnockbackEvent;
use super::log::{CombatLog, CombatLogEventType};
use super::movement::clamp_to_arena;

/// Active knockback on an entity. Movement systems skip entities carrying
/// this component.
#[derive(Component, Debug)]
pub struct Knockback {
    pub velocity: Vec2,
    pub remaining: f32,
}

pub fn apply_knockback_events(
    mut commands: Commands,
    mut knockback_events: EventReader<KnockbackEvent>,
    targets: Query<(&Health, Option<&Miniboss>)>,
    mut combat_log: ResMut<CombatLog>,
) {
    for event in knockback_events.read() {
        let Ok((health, miniboss)) = targets.get(event.target) else {
            continue;
        };
        // Runs before damage application, so the hit that opens an
        // invulnerability window still lands its own knockback
        if !health.is_alive() || health.is_invulnerable() {
            continue;
        }
        if miniboss.is_some_and(|boss| boss.locked) {
            continue;
        }
        commands.entity(event.target).insert(Knockback {
            velocity: event.direction.normalize_or_zero() * event.force,
            remaining: KNOCKBACK_DURATION,
        });
        combat_log.log(
            CombatLogEventType::Knockback,
            format!("{:?} knocked back at {:.0}", event.target, event.force),
        );
    }
}

/// Advance knockbacks on scaled time, so slow motion stretches the shove
/// visibly. Removal happens on expiry; the displacement of the final partial
/// tick still applies.
pub fn tick_knockback(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut Knockback)>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, mut knockback) in query.iter_mut() {
        transform.translation.x += knockback.velocity.x * dt;
        transform.translation.y += knockback.velocity.y * dt;
        clamp_to_arena(&mut transform.translation);
        knockback.remaining -= dt;
        if knockback.remaining <= 0.0 {
            commands.entity(entity).remove::<Knockback>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knockback_app() -> App {
        let mut app = App::new();
        app.add_event::<KnockbackEvent>()
            .init_resource::<CombatLog>()
            .add_systems(Update, apply_knockback_events);
        app
    }

    fn shove(app: &mut App, target: Entity, direction: Vec2, force: f32) {
        app.world_mut().send_event(KnockbackEvent {
            target,
            direction,
            force,
        });
    }

    #[test]
    fn test_fresh_event_replaces_in_flight_knockback() {
        let mut app = knockback_app();
        let target = app.world_mut().spawn(Health::new(100.0)).id();

        shove(&mut app, target, Vec2::X, 200.0);
        app.update();
        {
            let mut knockback = app.world_mut().get_mut::<Knockback>(target).unwrap();
            assert_eq!(knockback.velocity, Vec2::new(200.0, 0.0));
            // Mid-flight: most of the timer already spent
            knockback.remaining = 0.05;
        }

        shove(&mut app, target, Vec2::NEG_Y, 400.0);
        app.update();
        let knockback = app.world().get::<Knockback>(target).unwrap();
        assert_eq!(knockback.velocity, Vec2::new(0.0, -400.0));
        assert_eq!(knockback.remaining, KNOCKBACK_DURATION);
    }

    #[test]
    fn test_invulnerable_and_dead_targets_are_not_shoved() {
        let mut app = knockback_app();
        let mut shielded_health = Health::new(100.0);
        shielded_health.invulnerable_left = 0.5;
        let shielded = app.world_mut().spawn(shielded_health).id();
        let mut dead_health = Health::new(100.0);
        dead_health.kill();
        let dead = app.world_mut().spawn(dead_health).id();

        shove(&mut app, shielded, Vec2::X, 200.0);
        shove(&mut app, dead, Vec2::X, 200.0);
        app.update();

        assert!(app.world().get::<Knockback>(shielded).is_none());
        assert!(app.world().get::<Knockback>(dead).is_none());
    }

    #[test]
    fn test_locked_miniboss_ignores_knockback() {
        let mut app = knockback_app();
        let mut boss = Miniboss::new(0.2);
        boss.locked = true;
        let target = app.world_mut().spawn((Health::new(100.0), boss)).id();

        shove(&mut app, target, Vec2::X, 200.0);
        app.update();
        assert!(app.world().get::<Knockback>(target).is_none());
    }
}
