//! Camera Follow and Shake
//!
//! The camera trails the player with a smoothed follow and layers a decaying
//! random shake on top when combat asks for one. The shake offset is applied
//! after the follow so it never accumulates into the camera's rest position.

use bevy::prelude::*;

use crate::combat::events::CameraShakeEvent;
use crate::combat::{GameRng, Player};

/// Follow smoothing factor per second. Higher snaps harder.
const FOLLOW_SPEED: f32 = 6.0;

#[derive(Resource, Default)]
pub struct ShakeState {
    time_left: f32,
    duration: f32,
    magnitude: f32,
}

impl ShakeState {
    /// Start a shake. A stronger or fresh shake replaces the current one;
    /// a weaker overlapping request is ignored.
    pub fn start(&mut self, duration: f32, magnitude: f32) {
        if self.time_left > 0.0 && magnitude < self.magnitude {
            return;
        }
        self.time_left = duration;
        self.duration = duration;
        self.magnitude = magnitude;
    }

    pub fn is_active(&self) -> bool {
        self.time_left > 0.0
    }

    /// Remaining strength fraction, decaying linearly to zero.
    fn strength(&self) -> f32 {
        if self.duration <= 0.0 {
            0.0
        } else {
            (self.time_left / self.duration).clamp(0.0, 1.0)
        }
    }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShakeState>()
            .add_systems(Update, (collect_shake_requests, move_camera).chain());
    }
}

fn collect_shake_requests(
    mut shake_events: EventReader<CameraShakeEvent>,
    mut shake: ResMut<ShakeState>,
) {
    for event in shake_events.read() {
        shake.start(event.duration, event.magnitude);
    }
}

/// Lerp toward the player and add the current shake offset. Runs on real
/// time so the camera stays responsive during slow motion.
fn move_camera(
    real_time: Res<Time<Real>>,
    mut shake: ResMut<ShakeState>,
    mut rng: ResMut<GameRng>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.get_single_mut() else {
        return;
    };
    let dt = real_time.delta_secs();

    let target = player_transform.translation.truncate();
    let current = camera_transform.translation.truncate();
    let followed = current.lerp(target, (FOLLOW_SPEED * dt).clamp(0.0, 1.0));

    let offset = if shake.is_active() {
        shake.time_left = (shake.time_left - dt).max(0.0);
        let strength = shake.strength() * shake.magnitude;
        Vec2::new(
            rng.random_range(-strength, strength),
            rng.random_range(-strength, strength),
        )
    } else {
        Vec2::ZERO
    };

    camera_transform.translation.x = followed.x + offset.x;
    camera_transform.translation.y = followed.y + offset.y;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weaker_overlapping_shake_is_ignored() {
        let mut shake = ShakeState::default();
        shake.start(0.2, 8.0);
        shake.start(0.5, 2.0);
        assert_eq!(shake.magnitude, 8.0);

        // A stronger request takes over
        shake.start(0.1, 10.0);
        assert_eq!(shake.magnitude, 10.0);
        assert_eq!(shake.time_left, 0.1);
    }

    #[test]
    fn test_strength_decays_with_time() {
        let mut shake = ShakeState::default();
        shake.start(1.0, 4.0);
        assert_eq!(shake.strength(), 1.0);
        shake.time_left = 0.25;
        assert_eq!(shake.strength(), 0.25);
        shake.time_left = 0.0;
        assert!(!shake.is_active());
    }
}
