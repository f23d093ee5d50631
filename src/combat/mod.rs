//! Combat
//!
//! Real-time hack-and-slash combat: weapon combos, crits, knockback, contact
//! damage, and the QTE finisher that gates miniboss deaths. The module is
//! organized around three chained phases per tick:
//!
//! 1. `Input` samples the keyboard (or a headless scenario script) into
//!    command events, before any timer moves.
//! 2. `Resolution` consumes commands and resolves damage, knockback, QTE
//!    stages, and deaths in a fixed order.
//! 3. `Timers` advances cooldowns, windows, movement, and cosmetics.
//!
//! QTE windows, attack cooldowns, and the combo reset run on unscaled real
//! time; movement, knockback, and invulnerability run on the scaled clock so
//! slow motion stretches them.

use bevy::prelude::*;

pub mod attack;
pub mod components;
pub mod constants;
pub mod damage;
pub mod events;
pub mod input;
pub mod knockback;
pub mod log;
pub mod movement;
pub mod qte;
pub mod spawn;
pub mod weapons;

pub use components::{
    ControlGate, Enemy, GameRng, Health, Miniboss, MoveIntent, Player, PlayerMotion,
};

/// Execution phases of one combat tick. Input is sampled before any window
/// or cooldown decrements, so a press on the last tick of a window counts.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Input,
    Resolution,
    Timers,
}

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<events::CombatCommand>()
            .add_event::<events::QteAttempt>()
            .add_event::<events::DamageEvent>()
            .add_event::<events::KnockbackEvent>()
            .add_event::<events::DeathEvent>()
            .add_event::<events::CameraShakeEvent>()
            .add_event::<events::DamageNumberEvent>()
            .init_resource::<ControlGate>()
            .init_resource::<MoveIntent>()
            .init_resource::<GameRng>()
            .init_resource::<qte::QteDirector>()
            .init_resource::<qte::QtePrompt>()
            .init_resource::<log::CombatLog>()
            .configure_sets(
                Update,
                (CombatSet::Input, CombatSet::Resolution, CombatSet::Timers).chain(),
            )
            .add_systems(
                Update,
                (
                    qte::qte_stage_input,
                    qte::qte_trigger,
                    attack::resolve_attack_commands,
                    movement::contact_damage,
                    knockback::apply_knockback_events,
                    damage::apply_damage_events,
                    damage::handle_death_events,
                )
                    .chain()
                    .in_set(CombatSet::Resolution),
            )
            .add_systems(
                Update,
                (
                    qte::qte_tick,
                    attack::tick_attack_timers,
                    damage::tick_health_timers,
                    knockback::tick_knockback,
                    movement::player_movement,
                    movement::enemy_chase,
                    qte::tick_qte_strike,
                    log::tick_combat_log_clock,
                )
                    .chain()
                    .in_set(CombatSet::Timers),
            );
    }
}
