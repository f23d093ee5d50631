//! Combat logging
//!
//! Records typed combat events for the HUD and for post-scenario analysis.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// A single entry in the combat log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatLogEntry {
    /// Timestamp in session time (unscaled seconds since start)
    pub timestamp: f32,
    /// The type of event
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event
    pub message: String,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatLogEventType {
    /// Damage dealt
    Damage,
    /// Knockback applied
    Knockback,
    /// Entity died
    Death,
    /// QTE lifecycle (registration, start, stages, resolution)
    Qte,
    /// Weapon switched
    WeaponSwitch,
    /// Session event (start, scenario end, etc.)
    SessionEvent,
}

/// The combat log resource storing all events
#[derive(Resource, Default)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
    /// Current session time, advanced on unscaled time
    pub session_time: f32,
}

impl CombatLog {
    /// Clear the log for a new session
    pub fn clear(&mut self) {
        self.entries.clear();
        self.session_time = 0.0;
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: CombatLogEventType, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp: self.session_time,
            event_type,
            message,
        });
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Serialize all entries to a JSON report at `path`.
    pub fn save_to_file(&self, path: &str) -> Result<(), String> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| format!("Failed to serialize combat log: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path, e))?;
        Ok(())
    }
}

/// Advance the combat log clock on unscaled time. Runs every tick so entry
/// timestamps stay meaningful during slow motion.
pub fn tick_combat_log_clock(real_time: Res<Time<Real>>, mut combat_log: ResMut<CombatLog>) {
    combat_log.session_time += real_time.delta_secs();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_type() {
        let mut log = CombatLog::default();
        log.log(CombatLogEventType::Damage, "hit".to_string());
        log.log(CombatLogEventType::Qte, "window opened".to_string());
        log.log(CombatLogEventType::Damage, "hit again".to_string());

        assert_eq!(log.filter_by_type(CombatLogEventType::Damage).len(), 2);
        assert_eq!(log.filter_by_type(CombatLogEventType::Death).len(), 0);
    }

    #[test]
    fn test_recent_returns_newest_in_order() {
        let mut log = CombatLog::default();
        for i in 0..5 {
            log.log(CombatLogEventType::SessionEvent, format!("event {}", i));
        }
        let recent = log.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "event 3");
        assert_eq!(recent[1].message, "event 4");
    }
}
