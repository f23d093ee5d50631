//! Component and Resource Definitions
//!
//! Shared ECS components and resources used across the combat systems:
//! entity markers, health, movement state, the control gate, and the seeded
//! game RNG.

use bevy::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;

// ============================================================================
// RNG
// ============================================================================

/// Seeded random number generator for deterministic simulation.
///
/// When a seed is provided (e.g., via a headless scenario), the same seed will
/// always produce the same crit rolls and QTE sequences. Without a seed, uses
/// system entropy.
#[derive(Resource)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    /// Create a new GameRng with a specific seed for deterministic behavior
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a new GameRng with random entropy (non-deterministic)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Generate a random f32 in the range [0.0, 1.0)
    pub fn random_f32(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Generate a random f32 in the given range
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.random_f32() * (max - min)
    }

    /// Generate a random index in [0, bound)
    pub fn random_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

// ============================================================================
// Markers
// ============================================================================

/// Marker component for the player entity
#[derive(Component)]
pub struct Player;

/// Component for hostile entities that chase the player.
/// Minibosses carry this alongside [`Miniboss`].
#[derive(Component)]
pub struct Enemy {
    /// Movement speed in units per second
    pub move_speed: f32,
    /// Damage dealt to the player on contact
    pub contact_damage: f32,
    /// Knockback force applied to the player on contact
    pub contact_knockback: f32,
}

/// Component for miniboss enemies whose death is gated behind a QTE finisher.
#[derive(Component)]
pub struct Miniboss {
    /// Health fraction at/below which this target becomes QTE-eligible
    pub qte_threshold: f32,
    /// Set once when the threshold is first crossed; cleared by a failed
    /// attempt so the target can re-qualify on later damage
    pub qte_available: bool,
    /// While locked, the miniboss ignores damage, knockback, and AI movement.
    /// Only the QTE director sets and clears this.
    pub locked: bool,
}

impl Miniboss {
    pub fn new(qte_threshold: f32) -> Self {
        Self {
            qte_threshold,
            qte_available: false,
            locked: false,
        }
    }
}

// ============================================================================
// Health
// ============================================================================

/// Health state shared by the player and all enemy types.
///
/// `current` only decreases through [`Health::apply_damage`] and only
/// increases through explicit heals; the death transition fires exactly once.
#[derive(Component, Debug, Clone)]
pub struct Health {
    current: f32,
    max: f32,
    /// Remaining invulnerability window in seconds (0 = vulnerable)
    pub invulnerable_left: f32,
    dead: bool,
}

impl Health {
    pub fn new(max: f32) -> Self {
        debug_assert!(max > 0.0, "Health::new: max must be positive, got {}", max);
        Self {
            current: max,
            max,
            invulnerable_left: 0.0,
            dead: false,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn fraction(&self) -> f32 {
        (self.current / self.max).clamp(0.0, 1.0)
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_left > 0.0
    }

    /// Apply damage, clamping into [0, max]. Returns true if this call
    /// performed the death transition (health crossed from >0 to 0).
    /// Damage against an already-dead entity is a no-op.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        debug_assert!(amount >= 0.0, "damage cannot be negative, got {}", amount);
        if self.dead {
            return false;
        }
        self.current = (self.current - amount).clamp(0.0, self.max);
        if self.current <= 0.0 {
            self.dead = true;
            return true;
        }
        false
    }

    /// Heal up to max. No effect on a dead entity.
    pub fn heal(&mut self, amount: f32) {
        if self.dead {
            return;
        }
        self.current = (self.current + amount).min(self.max);
    }

    /// Reset health to an exact value (used by the QTE partial-failure path,
    /// which is a reset rather than a decrement). Clamped into [0, max].
    pub fn reset_to(&mut self, value: f32) {
        if self.dead {
            return;
        }
        self.current = value.clamp(0.0, self.max);
    }

    /// Kill outright. Returns true if this call performed the death
    /// transition. Used by the QTE director's success path.
    pub fn kill(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.current = 0.0;
        self.dead = true;
        true
    }
}

// ============================================================================
// Movement
// ============================================================================

/// Player movement state: walk speed, dash, and the facing direction that
/// orients the attack point.
#[derive(Component)]
pub struct PlayerMotion {
    pub move_speed: f32,
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    /// Last non-zero movement direction; orients the attack point
    pub facing: Vec2,
    pub dashing: bool,
    dash_time_left: f32,
    dash_cooldown_left: f32,
    dash_direction: Vec2,
}

impl PlayerMotion {
    pub fn new(move_speed: f32, dash_speed: f32, dash_duration: f32, dash_cooldown: f32) -> Self {
        Self {
            move_speed,
            dash_speed,
            dash_duration,
            dash_cooldown,
            facing: Vec2::X,
            dashing: false,
            dash_time_left: 0.0,
            dash_cooldown_left: 0.0,
            dash_direction: Vec2::ZERO,
        }
    }

    pub fn can_dash(&self) -> bool {
        !self.dashing && self.dash_cooldown_left <= 0.0
    }

    pub fn start_dash(&mut self, direction: Vec2) {
        self.dashing = true;
        self.dash_time_left = self.dash_duration;
        self.dash_cooldown_left = self.dash_cooldown;
        self.dash_direction = direction;
    }

    pub fn dash_direction(&self) -> Vec2 {
        self.dash_direction
    }

    /// Advance dash timers by one tick. Ends the dash when its duration runs out.
    pub fn tick(&mut self, dt: f32) {
        if self.dashing {
            self.dash_time_left -= dt;
            if self.dash_time_left <= 0.0 {
                self.dashing = false;
            }
        }
        if self.dash_cooldown_left > 0.0 {
            self.dash_cooldown_left = (self.dash_cooldown_left - dt).max(0.0);
        }
    }

    /// Fraction of the dash cooldown that has elapsed, clamped to [0, 1].
    pub fn dash_cooldown_fraction(&self) -> f32 {
        (1.0 - self.dash_cooldown_left / self.dash_cooldown).clamp(0.0, 1.0)
    }
}

/// Current frame's movement intent for the player, written by the input
/// sampler (graphical) or the scenario script (headless).
#[derive(Resource, Default)]
pub struct MoveIntent {
    pub direction: Vec2,
}

// ============================================================================
// Control gate
// ============================================================================

/// Gate over player movement and attack input. The QTE director closes both
/// while a sequence runs. Setters are idempotent and immediately effective.
#[derive(Resource)]
pub struct ControlGate {
    control_enabled: bool,
    attack_enabled: bool,
}

impl Default for ControlGate {
    fn default() -> Self {
        Self {
            control_enabled: true,
            attack_enabled: true,
        }
    }
}

impl ControlGate {
    pub fn control_enabled(&self) -> bool {
        self.control_enabled
    }

    pub fn attack_enabled(&self) -> bool {
        self.attack_enabled
    }

    pub fn set_control_enabled(&mut self, enabled: bool) {
        self.control_enabled = enabled;
    }

    pub fn set_attack_enabled(&mut self, enabled: bool) {
        self.attack_enabled = enabled;
    }
}
