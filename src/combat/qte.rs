//! QTE Finisher Director
//!
//! A miniboss whose health falls to its threshold cannot die to ordinary
//! damage. Instead it becomes eligible for a quick-time finisher: a randomized
//! four-symbol sequence the player must answer stage by stage, each within a
//! fixed real-time window, while the rest of the world runs in slow motion.
//! Full success executes the target after a short delay; any wrong input or
//! timeout aborts the sequence and restores the target to a partial-failure
//! health value.
//!
//! The director is a plain state machine so the timing and sequencing rules
//! can be tested without an ECS world. The systems at the bottom wire it to
//! input, time scaling, and the miniboss entities.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::components::{ControlGate, GameRng, Health, Miniboss, Player};
use super::constants::{
    QTE_FINISHER_DELAY, QTE_INITIATE_RANGE, QTE_SHAKE_DURATION, QTE_SHAKE_MAGNITUDE,
    QTE_STAGE_WINDOW, QTE_STRIKE_SPEED, QTE_TIME_SCALE,
};
use super::events::{CameraShakeEvent, CombatCommand, DeathEvent, QteAttempt};
use super::log::{CombatLog, CombatLogEventType};

/// Number of stages in a finisher sequence. The sequence is a permutation of
/// the full symbol alphabet, so every symbol appears exactly once.
pub const QTE_SEQUENCE_LEN: usize = 4;

/// The QTE input alphabet. Maps onto the four movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QteSymbol {
    Up,
    Left,
    Down,
    Right,
}

impl QteSymbol {
    pub const ALL: [QteSymbol; QTE_SEQUENCE_LEN] = [
        QteSymbol::Up,
        QteSymbol::Left,
        QteSymbol::Down,
        QteSymbol::Right,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QteSymbol::Up => "W",
            QteSymbol::Left => "A",
            QteSymbol::Down => "S",
            QteSymbol::Right => "D",
        }
    }
}

/// Health value a target is restored to after a failed sequence:
/// the threshold pool minus one quarter of it per completed stage, floored
/// at 1 so a failed QTE can never kill.
pub fn failure_health(max_health: f32, threshold: f32, stages_completed: usize) -> f32 {
    let pool = max_health * threshold;
    (pool - stages_completed as f32 * pool / QTE_SEQUENCE_LEN as f32).max(1.0)
}

/// Outcome of feeding one input into the active sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageOutcome {
    /// Correct input; the sequence moved to the next stage.
    Advanced { stage: usize, prompt: QteSymbol },
    /// Correct input on the final stage; the finisher delay is now running.
    Completed { target: Entity },
    /// Wrong (or unmapped) input; the sequence is over.
    Failed {
        target: Entity,
        stages_completed: usize,
    },
}

/// Outcome of advancing the active sequence's clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QteTick {
    /// The stage window expired without input; the sequence is over.
    TimedOut {
        target: Entity,
        stages_completed: usize,
    },
    /// The finisher delay elapsed; the target dies now.
    FinisherLanded { target: Entity },
}

#[derive(Debug, Clone, Copy)]
enum QtePhase {
    /// Waiting for the current stage's input.
    Window,
    /// All stages answered; counting down to the killing blow.
    ResolvingSuccess { delay_left: f32 },
}

#[derive(Debug, Clone)]
struct ActiveSequence {
    target: Entity,
    sequence: [QteSymbol; QTE_SEQUENCE_LEN],
    stage: usize,
    window_left: f32,
    phase: QtePhase,
}

/// Central registry and state machine for QTE finishers.
///
/// Eligible minibosses register here when they cross their health threshold;
/// at most one sequence runs at a time.
#[derive(Resource, Default)]
pub struct QteDirector {
    pool: Vec<Entity>,
    active: Option<ActiveSequence>,
}

impl QteDirector {
    /// Register an eligible target. Idempotent.
    pub fn register(&mut self, target: Entity) {
        if !self.pool.contains(&target) {
            self.pool.push(target);
        }
    }

    /// Remove a target from the pool (death, failed attempt). Unknown
    /// entities are a no-op.
    pub fn unregister(&mut self, target: Entity) {
        self.pool.retain(|e| *e != target);
    }

    pub fn is_registered(&self, target: Entity) -> bool {
        self.pool.contains(&target)
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_target(&self) -> Option<Entity> {
        self.active.as_ref().map(|a| a.target)
    }

    /// The symbol the player must answer next, if a stage window is open.
    pub fn current_prompt(&self) -> Option<QteSymbol> {
        match &self.active {
            Some(seq) => match seq.phase {
                QtePhase::Window => Some(seq.sequence[seq.stage]),
                QtePhase::ResolvingSuccess { .. } => None,
            },
            None => None,
        }
    }

    /// Pick the closest registered candidate within `max_range` of `from`.
    /// Candidates not in the pool are skipped; exact distance ties keep the
    /// first candidate seen.
    pub fn closest_eligible(
        &self,
        from: Vec2,
        max_range: f32,
        candidates: &[(Entity, Vec2)],
    ) -> Option<Entity> {
        let mut best: Option<(Entity, f32)> = None;
        for (entity, pos) in candidates {
            if !self.is_registered(*entity) {
                continue;
            }
            let dist = from.distance(*pos);
            if dist > max_range {
                continue;
            }
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((*entity, dist)),
            }
        }
        best.map(|(entity, _)| entity)
    }

    /// Start a sequence against `target` with a freshly shuffled symbol
    /// order. Must not be called while another sequence is active.
    pub fn begin(&mut self, target: Entity, rng: &mut GameRng) {
        debug_assert!(self.active.is_none(), "a QTE sequence is already active");
        // Eligibility is consumed the moment the sequence starts
        self.unregister(target);
        let mut sequence = QteSymbol::ALL;
        // Fisher-Yates
        for i in (1..sequence.len()).rev() {
            let j = rng.random_index(i + 1);
            sequence.swap(i, j);
        }
        self.active = Some(ActiveSequence {
            target,
            sequence,
            stage: 0,
            window_left: QTE_STAGE_WINDOW,
            phase: QtePhase::Window,
        });
    }

    /// Feed one input into the active sequence. Inputs while no stage window
    /// is open (no active sequence, or the finisher delay is running) are
    /// ignored.
    pub fn handle_input(&mut self, symbol: Option<QteSymbol>) -> Option<StageOutcome> {
        let seq = self.active.as_mut()?;
        if !matches!(seq.phase, QtePhase::Window) {
            return None;
        }

        if symbol == Some(seq.sequence[seq.stage]) {
            seq.stage += 1;
            if seq.stage == QTE_SEQUENCE_LEN {
                let target = seq.target;
                seq.phase = QtePhase::ResolvingSuccess {
                    delay_left: QTE_FINISHER_DELAY,
                };
                Some(StageOutcome::Completed { target })
            } else {
                seq.window_left = QTE_STAGE_WINDOW;
                Some(StageOutcome::Advanced {
                    stage: seq.stage,
                    prompt: seq.sequence[seq.stage],
                })
            }
        } else {
            let seq = self.active.take().expect("checked above");
            Some(StageOutcome::Failed {
                target: seq.target,
                stages_completed: seq.stage,
            })
        }
    }

    /// Advance the active sequence's clock by one unscaled tick.
    pub fn tick(&mut self, dt: f32) -> Option<QteTick> {
        let (expired, in_success_phase) = {
            let seq = self.active.as_mut()?;
            match &mut seq.phase {
                QtePhase::Window => {
                    seq.window_left -= dt;
                    (seq.window_left <= 0.0, false)
                }
                QtePhase::ResolvingSuccess { delay_left } => {
                    *delay_left -= dt;
                    (*delay_left <= 0.0, true)
                }
            }
        };
        if !expired {
            return None;
        }
        let seq = self.active.take().expect("checked above");
        if in_success_phase {
            Some(QteTick::FinisherLanded { target: seq.target })
        } else {
            Some(QteTick::TimedOut {
                target: seq.target,
                stages_completed: seq.stage,
            })
        }
    }
}

/// The symbol currently shown to the player, mirrored out of the director
/// for the HUD.
#[derive(Resource, Default)]
pub struct QtePrompt {
    pub symbol: Option<QteSymbol>,
}

/// Cosmetic dash toward the locked target, restarted on each successful stage.
#[derive(Component)]
pub struct QteStrike {
    pub destination: Vec2,
}

fn apply_failure(boss: &mut Miniboss, health: &mut Health, stages_completed: usize) {
    let restored = failure_health(health.max(), boss.qte_threshold, stages_completed);
    health.reset_to(restored);
    boss.locked = false;
    // Cleared so fresh damage at/below the threshold can re-register the target
    boss.qte_available = false;
}

/// Restore time scale and clear the prompt after a sequence ends. Control
/// only returns if the player survived the sequence; a player who died to
/// contact damage mid-QTE stays locked out.
fn restore_world(
    gate: &mut ControlGate,
    virtual_time: &mut Time<Virtual>,
    prompt: &mut QtePrompt,
    player_alive: bool,
) {
    if player_alive {
        gate.set_control_enabled(true);
        gate.set_attack_enabled(true);
    }
    virtual_time.set_relative_speed(1.0);
    prompt.symbol = None;
}

/// Handle `InitiateQte` commands: pick the closest eligible miniboss in
/// range, lock it, close the player control gate, and drop into slow motion.
pub fn qte_trigger(
    mut commands_in: EventReader<CombatCommand>,
    mut director: ResMut<QteDirector>,
    mut gate: ResMut<ControlGate>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut rng: ResMut<GameRng>,
    mut prompt: ResMut<QtePrompt>,
    player_query: Query<(&Transform, &Health), With<Player>>,
    mut boss_query: Query<(Entity, &Transform, &mut Miniboss, &Health), Without<Player>>,
    mut combat_log: ResMut<CombatLog>,
) {
    for command in commands_in.read() {
        if !matches!(command, CombatCommand::InitiateQte) || director.is_active() {
            continue;
        }
        let Ok((player_transform, player_health)) = player_query.get_single() else {
            continue;
        };
        if !player_health.is_alive() {
            continue;
        }
        let player_pos = player_transform.translation.truncate();

        let candidates: Vec<(Entity, Vec2)> = boss_query
            .iter()
            .filter(|(_, _, boss, health)| boss.qte_available && !boss.locked && health.is_alive())
            .map(|(entity, t, _, _)| (entity, t.translation.truncate()))
            .collect();

        let Some(target) = director.closest_eligible(player_pos, QTE_INITIATE_RANGE, &candidates)
        else {
            continue;
        };

        let Ok((_, _, mut boss, _)) = boss_query.get_mut(target) else {
            continue;
        };
        boss.locked = true;
        gate.set_control_enabled(false);
        gate.set_attack_enabled(false);
        virtual_time.set_relative_speed(QTE_TIME_SCALE);

        director.begin(target, &mut rng);
        prompt.symbol = director.current_prompt();
        combat_log.log(
            CombatLogEventType::Qte,
            format!(
                "QTE started against {:?}, first prompt {}",
                target,
                prompt.symbol.map(|s| s.label()).unwrap_or("?"),
            ),
        );
    }
}

/// Feed QTE inputs to the director. Only the first input of a tick counts;
/// later presses in the same tick are discarded, never queued into the next
/// stage.
pub fn qte_stage_input(
    mut commands: Commands,
    mut attempts: EventReader<QteAttempt>,
    mut director: ResMut<QteDirector>,
    mut gate: ResMut<ControlGate>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut prompt: ResMut<QtePrompt>,
    player_query: Query<(Entity, &Health), With<Player>>,
    mut boss_query: Query<(&Transform, &mut Miniboss, &mut Health), Without<Player>>,
    mut shake_events: EventWriter<CameraShakeEvent>,
    mut combat_log: ResMut<CombatLog>,
) {
    let mut pending = attempts.read();
    let Some(first) = pending.next().map(|a| a.symbol) else {
        return;
    };
    // Drain the rest; one input per tick
    pending.count();

    if !director.is_active() {
        return;
    }

    let Some(outcome) = director.handle_input(first) else {
        return;
    };

    match outcome {
        StageOutcome::Advanced { stage, prompt: next } => {
            prompt.symbol = Some(next);
            shake_events.send(CameraShakeEvent {
                duration: QTE_SHAKE_DURATION,
                magnitude: QTE_SHAKE_MAGNITUDE,
            });
            if let (Ok((player, player_health)), Some(target)) =
                (player_query.get_single(), director.active_target())
            {
                if player_health.is_alive() {
                    if let Ok((target_transform, _, _)) = boss_query.get(target) {
                        commands.entity(player).insert(QteStrike {
                            destination: target_transform.translation.truncate(),
                        });
                    }
                }
            }
            combat_log.log(
                CombatLogEventType::Qte,
                format!(
                    "QTE stage {} hit, next prompt {}",
                    stage,
                    next.label()
                ),
            );
        }
        StageOutcome::Completed { target } => {
            prompt.symbol = None;
            shake_events.send(CameraShakeEvent {
                duration: QTE_SHAKE_DURATION,
                magnitude: QTE_SHAKE_MAGNITUDE,
            });
            if let Ok((player, player_health)) = player_query.get_single() {
                if player_health.is_alive() {
                    if let Ok((target_transform, _, _)) = boss_query.get(target) {
                        commands.entity(player).insert(QteStrike {
                            destination: target_transform.translation.truncate(),
                        });
                    }
                }
            }
            combat_log.log(
                CombatLogEventType::Qte,
                format!("QTE all stages hit against {:?}", target),
            );
        }
        StageOutcome::Failed {
            target,
            stages_completed,
        } => {
            if let Ok((_, mut boss, mut health)) = boss_query.get_mut(target) {
                apply_failure(&mut boss, &mut health, stages_completed);
            }
            let player_alive = player_query
                .get_single()
                .map(|(_, health)| health.is_alive())
                .unwrap_or(false);
            restore_world(&mut gate, &mut virtual_time, &mut prompt, player_alive);
            combat_log.log(
                CombatLogEventType::Qte,
                format!(
                    "QTE failed on wrong input after {} stages against {:?}",
                    stages_completed, target
                ),
            );
        }
    }
}

/// Advance the active QTE clock on unscaled time and resolve timeouts and
/// landed finishers.
pub fn qte_tick(
    real_time: Res<Time<Real>>,
    mut director: ResMut<QteDirector>,
    mut gate: ResMut<ControlGate>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut prompt: ResMut<QtePrompt>,
    mut boss_query: Query<(&mut Miniboss, &mut Health), Without<Player>>,
    player_query: Query<&Health, With<Player>>,
    mut death_events: EventWriter<DeathEvent>,
    mut combat_log: ResMut<CombatLog>,
) {
    let Some(result) = director.tick(real_time.delta_secs()) else {
        return;
    };
    let player_alive = player_query
        .get_single()
        .map(Health::is_alive)
        .unwrap_or(false);

    match result {
        QteTick::TimedOut {
            target,
            stages_completed,
        } => {
            if let Ok((mut boss, mut health)) = boss_query.get_mut(target) {
                apply_failure(&mut boss, &mut health, stages_completed);
            }
            restore_world(&mut gate, &mut virtual_time, &mut prompt, player_alive);
            combat_log.log(
                CombatLogEventType::Qte,
                format!(
                    "QTE timed out after {} stages against {:?}",
                    stages_completed, target
                ),
            );
        }
        QteTick::FinisherLanded { target } => {
            if let Ok((mut boss, mut health)) = boss_query.get_mut(target) {
                boss.locked = false;
                if health.kill() {
                    death_events.send(DeathEvent { entity: target });
                }
            }
            restore_world(&mut gate, &mut virtual_time, &mut prompt, player_alive);
            combat_log.log(
                CombatLogEventType::Qte,
                format!("QTE finisher executed {:?}", target),
            );
        }
    }
}

/// Move the player along the cosmetic finisher strike. Runs on scaled time
/// so the dash reads as part of the slow-motion scene.
pub fn tick_qte_strike(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &QteStrike), With<Player>>,
) {
    for (entity, mut transform, strike) in query.iter_mut() {
        let pos = transform.translation.truncate();
        let to_target = strike.destination - pos;
        let step = QTE_STRIKE_SPEED * time.delta_secs();
        if to_target.length() <= step {
            transform.translation.x = strike.destination.x;
            transform.translation.y = strike.destination.y;
            commands.entity(entity).remove::<QteStrike>();
        } else {
            let delta = to_target.normalize_or_zero() * step;
            transform.translation.x += delta.x;
            transform.translation.y += delta.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn entity(id: u32) -> Entity {
        Entity::from_raw(id)
    }

    #[test]
    fn test_sequence_is_a_permutation_of_the_alphabet() {
        for seed in 0..50 {
            let mut rng = GameRng::from_seed(seed);
            let mut director = QteDirector::default();
            director.register(entity(1));
            director.begin(entity(1), &mut rng);

            let mut seen = HashSet::new();
            for _ in 0..QTE_SEQUENCE_LEN {
                let prompt = director.current_prompt().unwrap();
                assert!(seen.insert(prompt), "symbol repeated in sequence");
                director.handle_input(Some(prompt));
            }
            assert_eq!(seen.len(), QTE_SEQUENCE_LEN);
        }
    }

    #[test]
    fn test_shuffle_reaches_every_permutation() {
        let mut orders = HashSet::new();
        for seed in 0..2000 {
            let mut rng = GameRng::from_seed(seed);
            let mut director = QteDirector::default();
            director.begin(entity(1), &mut rng);
            let mut order = Vec::new();
            for _ in 0..QTE_SEQUENCE_LEN {
                let prompt = director.current_prompt().unwrap();
                order.push(prompt);
                director.handle_input(Some(prompt));
            }
            orders.insert(order);
        }
        // All 4! = 24 permutations appear over a large sample
        assert_eq!(orders.len(), 24, "got {} distinct orders", orders.len());
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut director = QteDirector::default();
        director.register(entity(1));
        director.register(entity(1));
        assert_eq!(director.pool_len(), 1);

        director.unregister(entity(1));
        assert_eq!(director.pool_len(), 0);
        // Unregistering an unknown entity is a no-op
        director.unregister(entity(9));
        assert_eq!(director.pool_len(), 0);
    }

    #[test]
    fn test_closest_eligible_picks_nearest_registered() {
        let mut director = QteDirector::default();
        let near = entity(1);
        let far = entity(2);
        let unregistered = entity(3);
        director.register(near);
        director.register(far);

        let candidates = vec![
            (unregistered, Vec2::new(10.0, 0.0)),
            (far, Vec2::new(100.0, 0.0)),
            (near, Vec2::new(50.0, 0.0)),
        ];
        assert_eq!(
            director.closest_eligible(Vec2::ZERO, 140.0, &candidates),
            Some(near)
        );

        // Out of range yields nothing even when registered
        assert_eq!(director.closest_eligible(Vec2::ZERO, 40.0, &candidates), None);
    }

    #[test]
    fn test_closest_eligible_tie_keeps_first_seen() {
        let mut director = QteDirector::default();
        let a = entity(1);
        let b = entity(2);
        director.register(a);
        director.register(b);

        let candidates = vec![(a, Vec2::new(60.0, 0.0)), (b, Vec2::new(0.0, 60.0))];
        assert_eq!(
            director.closest_eligible(Vec2::ZERO, 140.0, &candidates),
            Some(a)
        );
    }

    #[test]
    fn test_failure_health_steps() {
        // 100 max health, 0.2 threshold: pool of 20, quarter steps of 5
        assert_eq!(failure_health(100.0, 0.2, 0), 20.0);
        assert_eq!(failure_health(100.0, 0.2, 1), 15.0);
        assert_eq!(failure_health(100.0, 0.2, 2), 10.0);
        assert_eq!(failure_health(100.0, 0.2, 3), 5.0);
    }

    #[test]
    fn test_failure_health_floors_at_one() {
        // A tiny pool would otherwise restore to zero or below
        assert_eq!(failure_health(4.0, 0.2, 3), 1.0);
    }

    #[test]
    fn test_wrong_input_fails_and_drops_registration() {
        let mut rng = GameRng::from_seed(3);
        let mut director = QteDirector::default();
        let target = entity(1);
        director.register(target);
        director.begin(target, &mut rng);

        let expected = director.current_prompt().unwrap();
        let wrong = QteSymbol::ALL
            .iter()
            .copied()
            .find(|s| *s != expected)
            .unwrap();
        let outcome = director.handle_input(Some(wrong)).unwrap();
        assert_eq!(
            outcome,
            StageOutcome::Failed {
                target,
                stages_completed: 0
            }
        );
        assert!(!director.is_active());
        assert!(!director.is_registered(target));
    }

    #[test]
    fn test_unmapped_key_counts_as_wrong_input() {
        let mut rng = GameRng::from_seed(3);
        let mut director = QteDirector::default();
        let target = entity(1);
        director.register(target);
        director.begin(target, &mut rng);

        let outcome = director.handle_input(None).unwrap();
        assert!(matches!(outcome, StageOutcome::Failed { .. }));
    }

    #[test]
    fn test_window_timeout_reports_stages_completed() {
        let mut rng = GameRng::from_seed(11);
        let mut director = QteDirector::default();
        let target = entity(1);
        director.register(target);
        director.begin(target, &mut rng);

        // Clear two stages, then let the third window expire
        for _ in 0..2 {
            let prompt = director.current_prompt().unwrap();
            director.handle_input(Some(prompt));
        }
        assert!(director.tick(QTE_STAGE_WINDOW - 0.01).is_none());
        let result = director.tick(0.02).unwrap();
        assert_eq!(
            result,
            QteTick::TimedOut {
                target,
                stages_completed: 2
            }
        );
        assert!(!director.is_active());
    }

    #[test]
    fn test_correct_input_rearms_the_window() {
        let mut rng = GameRng::from_seed(11);
        let mut director = QteDirector::default();
        director.register(entity(1));
        director.begin(entity(1), &mut rng);

        director.tick(QTE_STAGE_WINDOW * 0.9);
        let prompt = director.current_prompt().unwrap();
        director.handle_input(Some(prompt));
        // The fresh window survives another near-full wait
        assert!(director.tick(QTE_STAGE_WINDOW * 0.9).is_none());
        assert!(director.is_active());
    }

    #[test]
    fn test_full_success_lands_finisher_after_delay() {
        let mut rng = GameRng::from_seed(21);
        let mut director = QteDirector::default();
        let target = entity(1);
        director.register(target);
        director.begin(target, &mut rng);

        for stage in 0..QTE_SEQUENCE_LEN {
            let prompt = director.current_prompt().unwrap();
            let outcome = director.handle_input(Some(prompt)).unwrap();
            if stage == QTE_SEQUENCE_LEN - 1 {
                assert_eq!(outcome, StageOutcome::Completed { target });
            } else {
                assert!(matches!(outcome, StageOutcome::Advanced { .. }));
            }
        }

        // No prompt and no input handling during the finisher delay
        assert_eq!(director.current_prompt(), None);
        assert!(director.handle_input(Some(QteSymbol::Up)).is_none());

        assert!(director.tick(QTE_FINISHER_DELAY / 2.0).is_none());
        let result = director.tick(QTE_FINISHER_DELAY).unwrap();
        assert_eq!(result, QteTick::FinisherLanded { target });
        assert!(!director.is_active());
    }

    #[test]
    fn test_input_without_active_sequence_is_ignored() {
        let mut director = QteDirector::default();
        assert!(director.handle_input(Some(QteSymbol::Up)).is_none());
        assert!(director.tick(1.0).is_none());
    }

    #[test]
    fn test_failed_target_can_requalify() {
        let mut rng = GameRng::from_seed(5);
        let mut director = QteDirector::default();
        let target = entity(1);
        director.register(target);
        director.begin(target, &mut rng);
        director.handle_input(None);
        assert!(!director.is_registered(target));

        // Later damage at the threshold registers it again
        director.register(target);
        assert!(director.is_registered(target));
        director.begin(target, &mut rng);
        assert!(director.is_active());
    }
}
