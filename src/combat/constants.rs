//! Combat Constants
//!
//! Centralized location for magic numbers used throughout the combat system.
//! This makes it easier to tune balance and ensures consistency.

// ============================================================================
// Attack
// ============================================================================

/// Radius of the light/burst hit query around the attack point, in world units.
pub const ATTACK_RANGE: f32 = 60.0;

/// Distance from the player's center to the attack point, along the facing
/// direction. The original design hung the attack point off the player's side.
pub const ATTACK_POINT_OFFSET: f32 = 30.0;

/// Default critical strike chance for the player, in percent.
pub const CRIT_CHANCE: f32 = 20.0;

/// Damage multiplier applied on a critical strike.
pub const CRIT_MULTIPLIER: f32 = 2.0;

// ============================================================================
// Knockback
// ============================================================================

/// How long a knockback overrides an entity's velocity, in seconds.
/// A new knockback restarts this timer rather than queueing behind it.
pub const KNOCKBACK_DURATION: f32 = 0.2;

// ============================================================================
// QTE
// ============================================================================

/// Timing window per QTE stage, in unscaled seconds. Measured against real
/// time so the window feels identical regardless of the slow-motion scale.
pub const QTE_STAGE_WINDOW: f32 = 0.75;

/// Global time-scale multiplier while a QTE sequence is running.
pub const QTE_TIME_SCALE: f32 = 0.25;

/// Delay between the final successful stage and the target's death, in
/// unscaled seconds. Gives the finishing strike a beat to land.
pub const QTE_FINISHER_DELAY: f32 = 0.1;

/// Maximum distance from the player at which a QTE can be initiated.
pub const QTE_INITIATE_RANGE: f32 = 140.0;

/// Camera shake on each successful QTE stage.
pub const QTE_SHAKE_DURATION: f32 = 0.15;
pub const QTE_SHAKE_MAGNITUDE: f32 = 6.0;

/// Speed of the scripted dash-and-strike toward the locked target.
pub const QTE_STRIKE_SPEED: f32 = 900.0;

// ============================================================================
// Player
// ============================================================================

pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_MOVE_SPEED: f32 = 220.0;
pub const PLAYER_DASH_SPEED: f32 = 600.0;
pub const PLAYER_DASH_DURATION: f32 = 0.2;
pub const PLAYER_DASH_COOLDOWN: f32 = 1.0;

/// Invulnerability window after the player takes contact damage, in seconds.
/// Stands in for the physics engine's contact de-bounce.
pub const PLAYER_HIT_INVULNERABILITY: f32 = 0.5;

// ============================================================================
// Enemies
// ============================================================================

pub const GRUNT_MAX_HEALTH: f32 = 60.0;
pub const GRUNT_MOVE_SPEED: f32 = 110.0;
pub const GRUNT_CONTACT_DAMAGE: f32 = 8.0;
pub const GRUNT_CONTACT_KNOCKBACK: f32 = 260.0;

pub const MINIBOSS_MAX_HEALTH: f32 = 250.0;
pub const MINIBOSS_MOVE_SPEED: f32 = 90.0;
pub const MINIBOSS_CONTACT_DAMAGE: f32 = 15.0;
pub const MINIBOSS_CONTACT_KNOCKBACK: f32 = 340.0;

/// Health fraction at/below which a miniboss becomes a valid QTE target.
pub const MINIBOSS_QTE_THRESHOLD: f32 = 0.2;

/// Distance at which an enemy deals contact damage to the player.
pub const CONTACT_RADIUS: f32 = 28.0;

/// Camera shake when the player is hit by contact damage.
pub const CONTACT_SHAKE_DURATION: f32 = 0.15;
pub const CONTACT_SHAKE_MAGNITUDE: f32 = 4.0;

// ============================================================================
// World / Spawning
// ============================================================================

/// Arena half-size; movement is clamped inside this square.
pub const ARENA_HALF_SIZE: f32 = 520.0;

/// Seconds between grunt spawns in the graphical build.
pub const SPAWN_INTERVAL: f32 = 6.0;

/// Grunts spawn on a ring around the player between these radii.
pub const SPAWN_MIN_RADIUS: f32 = 300.0;
pub const SPAWN_MAX_RADIUS: f32 = 450.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_constants_are_positive() {
        assert!(ATTACK_RANGE > 0.0);
        assert!(ATTACK_POINT_OFFSET > 0.0);
        assert!(QTE_INITIATE_RANGE > 0.0);
        assert!(CONTACT_RADIUS > 0.0);
    }

    #[test]
    fn test_qte_threshold_is_a_valid_fraction() {
        assert!(MINIBOSS_QTE_THRESHOLD > 0.0 && MINIBOSS_QTE_THRESHOLD <= 1.0);
    }

    #[test]
    fn test_qte_time_scale_slows_time() {
        assert!(QTE_TIME_SCALE > 0.0 && QTE_TIME_SCALE < 1.0);
    }

    #[test]
    fn test_crit_chance_is_a_percentage() {
        assert!((0.0..=100.0).contains(&CRIT_CHANCE));
        assert!(CRIT_MULTIPLIER >= 1.0);
    }
}
