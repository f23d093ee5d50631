//! Combat events
//!
//! The event contracts between input, the combat resolvers, and the
//! presentation collaborators. Input devices never talk to combat systems
//! directly; they emit these events once per tick.

use bevy::prelude::*;

use super::qte::QteSymbol;

/// A discrete player command, emitted by the input sampler or a scenario
/// script. Commands are only honored when the relevant gate/cooldown allows.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum CombatCommand {
    LightAttack,
    BurstAttack,
    Dash,
    /// Switch to the weapon at this roster index; out-of-range is ignored
    SwitchWeapon(usize),
    /// Attempt to start a QTE against the nearest eligible target
    InitiateQte,
}

/// A key press delivered while a QTE sequence is running. `symbol` is the
/// QTE alphabet symbol the key maps to, or None for any other key — which
/// still counts as an input (and fails the stage).
#[derive(Event, Debug, Clone, Copy)]
pub struct QteAttempt {
    pub symbol: Option<QteSymbol>,
}

/// Event fired to deal damage to a target
#[derive(Event, Debug)]
pub struct DamageEvent {
    /// Entity dealing the damage (None for environmental sources)
    pub source: Option<Entity>,
    /// Entity receiving the damage
    pub target: Entity,
    /// Damage amount after crit multiplication
    pub amount: f32,
    /// Whether this was a critical hit
    pub is_crit: bool,
}

/// Event fired to knock a target back. A new knockback on an entity with one
/// already in flight preempts it (restarts direction, force, and timer).
#[derive(Event, Debug)]
pub struct KnockbackEvent {
    pub target: Entity,
    /// Direction away from the attacker (normalized by the consumer)
    pub direction: Vec2,
    pub force: f32,
}

/// Event fired when an entity dies. Sent exactly once per entity.
#[derive(Event, Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

/// Fire-and-forget camera shake request
#[derive(Event, Debug, Clone, Copy)]
pub struct CameraShakeEvent {
    pub duration: f32,
    pub magnitude: f32,
}

/// Presentation-only request to spawn a floating damage number
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageNumberEvent {
    pub amount: f32,
    pub is_crit: bool,
    pub world_position: Vec2,
}
