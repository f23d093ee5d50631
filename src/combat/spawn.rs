//! Arena Setup and Enemy Spawning
//!
//! Spawns the graphical arena: backdrop, player, one miniboss, a starting
//! pack of grunts, and a timer that keeps trickling grunts in on a ring
//! around the player.

use bevy::prelude::*;

use super::attack::ComboAttack;
use super::components::{Enemy, GameRng, Health, Miniboss, Player, PlayerMotion};
use super::constants::{
    ARENA_HALF_SIZE, GRUNT_CONTACT_DAMAGE, GRUNT_CONTACT_KNOCKBACK, GRUNT_MAX_HEALTH,
    GRUNT_MOVE_SPEED, MINIBOSS_CONTACT_DAMAGE, MINIBOSS_CONTACT_KNOCKBACK, MINIBOSS_MAX_HEALTH,
    MINIBOSS_MOVE_SPEED, MINIBOSS_QTE_THRESHOLD, PLAYER_DASH_COOLDOWN, PLAYER_DASH_DURATION,
    PLAYER_DASH_SPEED, PLAYER_MAX_HEALTH, PLAYER_MOVE_SPEED, SPAWN_INTERVAL, SPAWN_MAX_RADIUS,
    SPAWN_MIN_RADIUS,
};

const PLAYER_COLOR: Color = Color::srgb(0.3, 0.8, 0.95);
const GRUNT_COLOR: Color = Color::srgb(0.85, 0.35, 0.3);
const MINIBOSS_COLOR: Color = Color::srgb(0.7, 0.2, 0.75);
const BACKDROP_COLOR: Color = Color::srgb(0.12, 0.12, 0.16);

#[derive(Resource)]
struct SpawnTimer(Timer);

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SpawnTimer(Timer::from_seconds(
            SPAWN_INTERVAL,
            TimerMode::Repeating,
        )))
        .add_systems(Startup, setup_world)
        .add_systems(Update, spawn_grunt_wave);
    }
}

pub fn spawn_grunt(commands: &mut Commands, position: Vec2) {
    commands.spawn((
        Name::new("Grunt"),
        Sprite::from_color(GRUNT_COLOR, Vec2::new(28.0, 28.0)),
        Transform::from_translation(position.extend(1.0)),
        Enemy {
            move_speed: GRUNT_MOVE_SPEED,
            contact_damage: GRUNT_CONTACT_DAMAGE,
            contact_knockback: GRUNT_CONTACT_KNOCKBACK,
        },
        Health::new(GRUNT_MAX_HEALTH),
    ));
}

fn setup_world(mut commands: Commands) {
    commands.spawn((Name::new("Camera"), Camera2d));

    commands.spawn((
        Name::new("Backdrop"),
        Sprite::from_color(
            BACKDROP_COLOR,
            Vec2::splat(ARENA_HALF_SIZE * 2.0 + 40.0),
        ),
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));

    commands.spawn((
        Name::new("Player"),
        Player,
        Sprite::from_color(PLAYER_COLOR, Vec2::new(30.0, 30.0)),
        Transform::from_xyz(0.0, 0.0, 2.0),
        Health::new(PLAYER_MAX_HEALTH),
        PlayerMotion::new(
            PLAYER_MOVE_SPEED,
            PLAYER_DASH_SPEED,
            PLAYER_DASH_DURATION,
            PLAYER_DASH_COOLDOWN,
        ),
        ComboAttack::default(),
    ));

    commands.spawn((
        Name::new("Miniboss"),
        Sprite::from_color(MINIBOSS_COLOR, Vec2::new(46.0, 46.0)),
        Transform::from_xyz(260.0, 180.0, 1.0),
        Enemy {
            move_speed: MINIBOSS_MOVE_SPEED,
            contact_damage: MINIBOSS_CONTACT_DAMAGE,
            contact_knockback: MINIBOSS_CONTACT_KNOCKBACK,
        },
        Miniboss::new(MINIBOSS_QTE_THRESHOLD),
        Health::new(MINIBOSS_MAX_HEALTH),
    ));

    for position in [Vec2::new(-320.0, 120.0), Vec2::new(180.0, -280.0)] {
        spawn_grunt(&mut commands, position);
    }
}

/// Spawn a grunt on a ring around the player every few seconds.
fn spawn_grunt_wave(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<SpawnTimer>,
    mut rng: ResMut<GameRng>,
    player_query: Query<(&Transform, &Health), With<Player>>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let Ok((player_transform, player_health)) = player_query.get_single() else {
        return;
    };
    if !player_health.is_alive() {
        return;
    }

    let angle = rng.random_range(0.0, std::f32::consts::TAU);
    let radius = rng.random_range(SPAWN_MIN_RADIUS, SPAWN_MAX_RADIUS);
    let offset = Vec2::from_angle(angle) * radius;
    let position = (player_transform.translation.truncate() + offset)
        .clamp(Vec2::splat(-ARENA_HALF_SIZE), Vec2::splat(ARENA_HALF_SIZE));
    spawn_grunt(&mut commands, position);
}
