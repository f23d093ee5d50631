//! Combo Attack Resolver
//!
//! Tracks the player's weapon combo state and resolves light/burst attacks:
//! crit roll, damage computation, radial hit query, and knockback dispatch.
//! All hits from one swing are resolved synchronously within the tick.
//!
//! The combo/cooldown logic lives on [`ComboAttack`] as plain methods so it
//! can be exercised without an ECS world; the systems below are thin wiring.

use bevy::prelude::*;
use smallvec::SmallVec;

use super::components::{ControlGate, GameRng, Health, Player, PlayerMotion};
use super::constants::{ATTACK_POINT_OFFSET, ATTACK_RANGE, CRIT_CHANCE, CRIT_MULTIPLIER};
use super::events::{CombatCommand, DamageEvent, KnockbackEvent};
use super::log::{CombatLog, CombatLogEventType};
use super::weapons::{WeaponConfig, WeaponRoster};
use super::Enemy;

/// Roll a critical strike check: uniform draw in [0, 100), success iff the
/// roll lands at or below the configured chance.
pub fn roll_crit(crit_chance: f32, rng: &mut GameRng) -> bool {
    rng.random_range(0.0, 100.0) <= crit_chance
}

/// The resolved numbers for a single swing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackOutcome {
    /// Combo step the swing used (0-based; bursts report step 0)
    pub step_used: usize,
    /// Final damage after crit multiplication
    pub damage: f32,
    pub is_crit: bool,
    /// Knockback force to dispatch to every target hit
    pub knockback: f32,
}

/// Per-attacker combo and cooldown state.
///
/// Cooldown timers are shared across weapon slots: switching weapons resets
/// the combo step but leaves running cooldowns untouched.
#[derive(Component, Debug, Clone)]
pub struct ComboAttack {
    pub weapon_index: usize,
    step: usize,
    light_cooldown_left: f32,
    burst_cooldown_left: f32,
    /// Pending combo-reset countdown; None when no reset is armed
    combo_reset_left: Option<f32>,
    /// Critical strike chance in percent
    pub crit_chance: f32,
    pub crit_multiplier: f32,
    /// Monotonic session statistics, never reset
    pub total_attacks: u32,
    pub total_crits: u32,
}

impl Default for ComboAttack {
    fn default() -> Self {
        Self::new(CRIT_CHANCE, CRIT_MULTIPLIER)
    }
}

impl ComboAttack {
    pub fn new(crit_chance: f32, crit_multiplier: f32) -> Self {
        Self {
            weapon_index: 0,
            step: 0,
            light_cooldown_left: 0.0,
            burst_cooldown_left: 0.0,
            combo_reset_left: None,
            crit_chance,
            crit_multiplier,
            total_attacks: 0,
            total_crits: 0,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn can_light(&self) -> bool {
        self.light_cooldown_left <= 0.0
    }

    pub fn can_burst(&self) -> bool {
        self.burst_cooldown_left <= 0.0
    }

    /// Resolve a light attack. Caller must have checked [`Self::can_light`]
    /// and the attack gate. Cancels any pending combo reset, rolls the crit,
    /// advances the combo step, and arms cooldown and a fresh reset timer.
    pub fn begin_light(&mut self, weapon: &WeaponConfig, rng: &mut GameRng) -> AttackOutcome {
        debug_assert!(self.step < weapon.combo_length());
        self.combo_reset_left = None;

        let base = weapon.light_damage[self.step];
        let is_crit = roll_crit(self.crit_chance, rng);
        let damage = if is_crit {
            base * self.crit_multiplier
        } else {
            base
        };

        self.total_attacks += 1;
        if is_crit {
            self.total_crits += 1;
        }

        let step_used = self.step;
        self.step = (self.step + 1) % weapon.combo_length();
        self.light_cooldown_left = weapon.light_cooldown;
        self.combo_reset_left = Some(weapon.combo_reset_time);

        AttackOutcome {
            step_used,
            damage,
            is_crit,
            knockback: weapon.light_knockback,
        }
    }

    /// Resolve a burst attack. Bursts break the combo flow: the step is
    /// unconditionally reset to 0 afterward.
    pub fn begin_burst(&mut self, weapon: &WeaponConfig, rng: &mut GameRng) -> AttackOutcome {
        let is_crit = roll_crit(self.crit_chance, rng);
        let damage = if is_crit {
            weapon.burst_damage * self.crit_multiplier
        } else {
            weapon.burst_damage
        };

        self.total_attacks += 1;
        if is_crit {
            self.total_crits += 1;
        }

        self.step = 0;
        self.combo_reset_left = None;
        self.burst_cooldown_left = weapon.burst_cooldown;

        AttackOutcome {
            step_used: 0,
            damage,
            is_crit,
            knockback: weapon.burst_knockback,
        }
    }

    /// Switch the active weapon. An out-of-range index is ignored (returns
    /// false, no state change). Any accepted switch, including to the slot
    /// already in hand, resets the combo but not the shared cooldown timers.
    pub fn switch_weapon(&mut self, index: usize, roster_len: usize) -> bool {
        if index >= roster_len {
            return false;
        }
        self.weapon_index = index;
        self.step = 0;
        self.combo_reset_left = None;
        true
    }

    /// Advance cooldowns and the combo-reset countdown by one unscaled tick.
    /// If the reset countdown expires without an intervening light attack the
    /// combo drops back to step 0.
    pub fn tick(&mut self, dt: f32) {
        if self.light_cooldown_left > 0.0 {
            self.light_cooldown_left = (self.light_cooldown_left - dt).max(0.0);
        }
        if self.burst_cooldown_left > 0.0 {
            self.burst_cooldown_left = (self.burst_cooldown_left - dt).max(0.0);
        }
        if let Some(left) = self.combo_reset_left.as_mut() {
            *left -= dt;
            if *left <= 0.0 {
                self.step = 0;
                self.combo_reset_left = None;
            }
        }
    }

    /// Fraction of the light cooldown elapsed, clamped to [0, 1].
    pub fn light_cooldown_fraction(&self, weapon: &WeaponConfig) -> f32 {
        (1.0 - self.light_cooldown_left / weapon.light_cooldown).clamp(0.0, 1.0)
    }

    /// Fraction of the burst cooldown elapsed, clamped to [0, 1].
    pub fn burst_cooldown_fraction(&self, weapon: &WeaponConfig) -> f32 {
        (1.0 - self.burst_cooldown_left / weapon.burst_cooldown).clamp(0.0, 1.0)
    }

    /// How far the pending combo-reset countdown has progressed, clamped to
    /// [0, 1]. Zero when no reset is armed or the combo sits at step 0.
    pub fn combo_reset_fraction(&self, weapon: &WeaponConfig) -> f32 {
        match self.combo_reset_left {
            Some(left) if self.step > 0 => {
                (1.0 - left / weapon.combo_reset_time).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Observed crit rate over the session, in [0, 1].
    pub fn crit_rate(&self) -> f32 {
        if self.total_attacks == 0 {
            0.0
        } else {
            self.total_crits as f32 / self.total_attacks as f32
        }
    }
}

/// Radial hit query: all candidates within `range` of `origin`.
/// Zero hits is a normal no-op for the caller, not an error.
pub fn targets_in_range(
    origin: Vec2,
    range: f32,
    candidates: &[(Entity, Vec2)],
) -> SmallVec<[(Entity, Vec2); 8]> {
    candidates
        .iter()
        .copied()
        .filter(|(_, pos)| origin.distance(*pos) <= range)
        .collect()
}

/// Resolve light/burst/switch commands for the player. Hit queries and the
/// resulting damage/knockback dispatch happen synchronously in this system
/// so one swing can never double-trigger downstream bookkeeping.
pub fn resolve_attack_commands(
    mut commands_in: EventReader<CombatCommand>,
    gate: Res<ControlGate>,
    roster: Res<WeaponRoster>,
    mut rng: ResMut<GameRng>,
    mut player_query: Query<(Entity, &Transform, &PlayerMotion, &Health, &mut ComboAttack), With<Player>>,
    target_query: Query<(Entity, &Transform, &Health), (With<Enemy>, Without<Player>)>,
    mut damage_events: EventWriter<DamageEvent>,
    mut knockback_events: EventWriter<KnockbackEvent>,
    mut combat_log: ResMut<CombatLog>,
) {
    let Ok((player, transform, motion, health, mut combo)) = player_query.get_single_mut() else {
        return;
    };

    for command in commands_in.read() {
        if !health.is_alive() {
            continue;
        }

        match command {
            CombatCommand::LightAttack | CombatCommand::BurstAttack => {
                if !gate.attack_enabled() {
                    continue;
                }
                let Some(weapon) = roster.get(combo.weapon_index) else {
                    continue;
                };

                let is_burst = matches!(command, CombatCommand::BurstAttack);
                let outcome = if is_burst {
                    if !combo.can_burst() {
                        continue;
                    }
                    combo.begin_burst(weapon, &mut rng)
                } else {
                    if !combo.can_light() {
                        continue;
                    }
                    combo.begin_light(weapon, &mut rng)
                };

                let player_pos = transform.translation.truncate();
                let origin = player_pos + motion.facing * ATTACK_POINT_OFFSET;
                let candidates: Vec<(Entity, Vec2)> = target_query
                    .iter()
                    .filter(|(_, _, target_health)| target_health.is_alive())
                    .map(|(entity, t, _)| (entity, t.translation.truncate()))
                    .collect();

                for (target, target_pos) in targets_in_range(origin, ATTACK_RANGE, &candidates) {
                    damage_events.send(DamageEvent {
                        source: Some(player),
                        target,
                        amount: outcome.damage,
                        is_crit: outcome.is_crit,
                    });
                    knockback_events.send(KnockbackEvent {
                        target,
                        direction: (target_pos - player_pos).normalize_or_zero(),
                        force: outcome.knockback,
                    });
                }

                combat_log.log(
                    CombatLogEventType::Damage,
                    format!(
                        "Player swings {} for {:.0}{}{}",
                        weapon.name,
                        outcome.damage,
                        if outcome.is_crit { " (CRIT)" } else { "" },
                        if is_burst {
                            " [burst]".to_string()
                        } else {
                            format!(" [combo {}/{}]", outcome.step_used + 1, weapon.combo_length())
                        },
                    ),
                );
            }
            CombatCommand::SwitchWeapon(index) => {
                if combo.switch_weapon(*index, roster.len()) {
                    // Unwrap is fine: switch_weapon validated the index
                    let name = roster.get(*index).map(|w| w.name.as_str()).unwrap_or("?");
                    combat_log.log(
                        CombatLogEventType::WeaponSwitch,
                        format!("Player switches to {}", name),
                    );
                }
            }
            CombatCommand::Dash | CombatCommand::InitiateQte => {
                // Handled by the movement and QTE systems
            }
        }
    }
}

/// Advance attack cooldowns and the combo-reset countdown. Runs on unscaled
/// time so attack pacing is unaffected by QTE slow motion.
pub fn tick_attack_timers(
    real_time: Res<Time<Real>>,
    mut query: Query<&mut ComboAttack, With<Player>>,
) {
    let dt = real_time.delta_secs();
    for mut combo in query.iter_mut() {
        combo.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_weapon() -> WeaponConfig {
        WeaponConfig {
            name: "Test Sword".to_string(),
            light_damage: vec![10.0, 15.0, 20.0],
            light_knockback: 200.0,
            light_cooldown: 0.3,
            combo_reset_time: 2.0,
            burst_damage: 40.0,
            burst_knockback: 400.0,
            burst_cooldown: 2.0,
        }
    }

    /// Attacks with crits disabled so damage values are exact.
    fn no_crit_combo() -> ComboAttack {
        let mut combo = ComboAttack::new(0.0, 2.0);
        // A chance of exactly 0.0 could still match a roll of 0.0; push it
        // below any representable roll.
        combo.crit_chance = -1.0;
        combo
    }

    #[test]
    fn test_combo_steps_cycle_through_damage_sequence() {
        let weapon = test_weapon();
        let mut rng = GameRng::from_seed(1);
        let mut combo = no_crit_combo();

        let expected = [10.0, 15.0, 20.0, 10.0, 15.0];
        for (n, want) in expected.iter().enumerate() {
            combo.tick(1.0); // clear cooldown between swings
            let outcome = combo.begin_light(&weapon, &mut rng);
            assert_eq!(outcome.damage, *want);
            assert_eq!(combo.step(), (n + 1) % weapon.combo_length());
        }
    }

    #[test]
    fn test_combo_resets_after_timeout() {
        let weapon = test_weapon();
        let mut rng = GameRng::from_seed(1);
        let mut combo = no_crit_combo();

        combo.begin_light(&weapon, &mut rng);
        assert_eq!(combo.step(), 1);

        // Just under the reset time: combo holds
        combo.tick(1.9);
        assert_eq!(combo.step(), 1);

        // Crossing the reset time drops back to step 0 and stays there
        combo.tick(0.2);
        assert_eq!(combo.step(), 0);
        combo.tick(5.0);
        assert_eq!(combo.step(), 0);
    }

    #[test]
    fn test_burst_breaks_combo_flow() {
        let weapon = test_weapon();
        let mut rng = GameRng::from_seed(1);
        let mut combo = no_crit_combo();

        combo.begin_light(&weapon, &mut rng);
        combo.tick(0.4);
        combo.begin_light(&weapon, &mut rng);
        assert_eq!(combo.step(), 2);

        let outcome = combo.begin_burst(&weapon, &mut rng);
        assert_eq!(outcome.damage, 40.0);
        assert_eq!(combo.step(), 0);
        assert!(!combo.can_burst());
    }

    #[test]
    fn test_switch_keeps_shared_cooldowns() {
        let weapon = test_weapon();
        let mut rng = GameRng::from_seed(1);
        let mut combo = no_crit_combo();

        combo.begin_light(&weapon, &mut rng);
        assert!(!combo.can_light());
        assert!(combo.switch_weapon(1, 3));
        // Combo resets but the running light cooldown carries over
        assert_eq!(combo.step(), 0);
        assert!(!combo.can_light());
    }

    #[test]
    fn test_switch_out_of_range_is_ignored() {
        let mut combo = no_crit_combo();
        assert!(!combo.switch_weapon(7, 3));
        assert_eq!(combo.weapon_index, 0);
    }

    #[test]
    fn test_switch_to_current_slot_still_resets_combo() {
        let weapon = test_weapon();
        let mut rng = GameRng::from_seed(1);
        let mut combo = no_crit_combo();
        combo.begin_light(&weapon, &mut rng);
        assert_eq!(combo.step(), 1);

        assert!(combo.switch_weapon(0, 3));
        assert_eq!(combo.weapon_index, 0);
        assert_eq!(combo.step(), 0);
    }

    #[test]
    fn test_crit_multiplies_damage_exactly() {
        let weapon = test_weapon();
        let mut rng = GameRng::from_seed(99);
        // Always crit
        let mut combo = ComboAttack::new(100.0, 2.0);
        let outcome = combo.begin_light(&weapon, &mut rng);
        assert!(outcome.is_crit);
        assert_eq!(outcome.damage, 20.0);
        assert_eq!(combo.total_crits, 1);
    }

    #[test]
    fn test_crit_rate_converges_to_configured_chance() {
        let mut rng = GameRng::from_seed(7);
        let chance = 20.0;
        let rolls = 10_000;
        let crits = (0..rolls).filter(|_| roll_crit(chance, &mut rng)).count();
        let rate = crits as f32 / rolls as f32;
        assert!(
            (rate - 0.20).abs() < 0.04,
            "observed crit rate {} too far from 0.20",
            rate
        );
    }

    #[test]
    fn test_cooldown_fractions_clamp() {
        let weapon = test_weapon();
        let mut rng = GameRng::from_seed(1);
        let mut combo = no_crit_combo();

        assert_eq!(combo.light_cooldown_fraction(&weapon), 1.0);
        combo.begin_light(&weapon, &mut rng);
        assert_eq!(combo.light_cooldown_fraction(&weapon), 0.0);
        combo.tick(0.15);
        let fraction = combo.light_cooldown_fraction(&weapon);
        assert!(fraction > 0.0 && fraction < 1.0);
        combo.tick(10.0);
        assert_eq!(combo.light_cooldown_fraction(&weapon), 1.0);
    }

    #[test]
    fn test_attack_stats_accumulate_monotonically() {
        let weapon = test_weapon();
        let mut rng = GameRng::from_seed(5);
        let mut combo = ComboAttack::new(50.0, 2.0);
        for _ in 0..20 {
            combo.tick(1.0);
            combo.begin_light(&weapon, &mut rng);
        }
        combo.begin_burst(&weapon, &mut rng);
        assert_eq!(combo.total_attacks, 21);
        assert!(combo.total_crits <= combo.total_attacks);
        assert!(combo.crit_rate() > 0.0);
    }

    #[test]
    fn test_hit_query_filters_by_radius() {
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let candidates = vec![(a, Vec2::new(30.0, 0.0)), (b, Vec2::new(200.0, 0.0))];

        let hits = targets_in_range(Vec2::ZERO, 60.0, &candidates);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, a);

        // Zero targets in range is a normal empty result
        let none = targets_in_range(Vec2::new(1000.0, 0.0), 60.0, &candidates);
        assert!(none.is_empty());
    }
}
