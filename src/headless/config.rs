//! JSON configuration parsing for headless mode
//!
//! A headless scenario describes the arena population and a time-stamped
//! input script, so combat sequences can be replayed deterministically
//! without a window.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::combat::constants::{
    CRIT_CHANCE, GRUNT_CONTACT_DAMAGE, GRUNT_CONTACT_KNOCKBACK, GRUNT_MAX_HEALTH,
    GRUNT_MOVE_SPEED, MINIBOSS_MAX_HEALTH, MINIBOSS_MOVE_SPEED, MINIBOSS_QTE_THRESHOLD,
};

/// Headless scenario configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessScenarioConfig {
    /// Simulated duration in seconds
    #[serde(default = "default_duration")]
    pub duration_secs: f32,
    /// Random seed for deterministic crit rolls and QTE sequences
    #[serde(default)]
    pub seed: Option<u64>,
    /// Custom output path for the combat log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub player: PlayerSetup,
    #[serde(default)]
    pub grunts: Vec<GruntSetup>,
    #[serde(default)]
    pub miniboss: Option<MinibossSetup>,
    /// Time-stamped input script, dispatched in order of `at`
    #[serde(default)]
    pub script: Vec<ScriptedInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSetup {
    #[serde(default)]
    pub position: [f32; 2],
    /// Critical strike chance in percent
    #[serde(default = "default_crit_chance")]
    pub crit_chance: f32,
}

impl Default for PlayerSetup {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            crit_chance: default_crit_chance(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GruntSetup {
    pub position: [f32; 2],
    #[serde(default = "default_grunt_health")]
    pub max_health: f32,
    #[serde(default = "default_grunt_speed")]
    pub move_speed: f32,
    #[serde(default = "default_grunt_damage")]
    pub contact_damage: f32,
    #[serde(default = "default_grunt_knockback")]
    pub contact_knockback: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinibossSetup {
    pub position: [f32; 2],
    #[serde(default = "default_miniboss_health")]
    pub max_health: f32,
    #[serde(default = "default_qte_threshold")]
    pub qte_threshold: f32,
    #[serde(default = "default_miniboss_speed")]
    pub move_speed: f32,
}

/// One scripted input: `action` fires on the first tick at or after `at`
/// seconds of real time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedInput {
    pub at: f32,
    pub action: String,
}

fn default_duration() -> f32 {
    10.0
}

fn default_crit_chance() -> f32 {
    CRIT_CHANCE
}

fn default_grunt_health() -> f32 {
    GRUNT_MAX_HEALTH
}

fn default_grunt_speed() -> f32 {
    GRUNT_MOVE_SPEED
}

fn default_grunt_damage() -> f32 {
    GRUNT_CONTACT_DAMAGE
}

fn default_grunt_knockback() -> f32 {
    GRUNT_CONTACT_KNOCKBACK
}

fn default_miniboss_health() -> f32 {
    MINIBOSS_MAX_HEALTH
}

fn default_qte_threshold() -> f32 {
    MINIBOSS_QTE_THRESHOLD
}

fn default_miniboss_speed() -> f32 {
    MINIBOSS_MOVE_SPEED
}

/// A parsed scripted action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptAction {
    LightAttack,
    BurstAttack,
    Dash,
    SwitchWeapon(usize),
    InitiateQte,
    /// Answer the current QTE stage with its expected symbol
    QteCorrect,
    /// Answer the current QTE stage with an unmapped key
    QteWrong,
    /// Answer the current QTE stage with an explicit symbol
    QteSymbol(crate::combat::qte::QteSymbol),
    /// Hold a movement direction until the next move/stop
    Move(f32, f32),
    Stop,
}

impl HeadlessScenarioConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: HeadlessScenarioConfig = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.duration_secs <= 0.0 {
            return Err("duration_secs must be positive".to_string());
        }
        if let Some(boss) = &self.miniboss {
            if boss.max_health <= 0.0 {
                return Err("miniboss max_health must be positive".to_string());
            }
            if boss.qte_threshold <= 0.0 || boss.qte_threshold > 1.0 {
                return Err("miniboss qte_threshold must be in (0, 1]".to_string());
            }
        }
        for entry in &self.script {
            if entry.at < 0.0 {
                return Err(format!("script time {} must be non-negative", entry.at));
            }
            Self::parse_action(&entry.action)?;
        }
        Ok(())
    }

    /// Parse an action string from the script
    pub fn parse_action(action: &str) -> Result<ScriptAction, String> {
        match action {
            "light" => Ok(ScriptAction::LightAttack),
            "burst" => Ok(ScriptAction::BurstAttack),
            "dash" => Ok(ScriptAction::Dash),
            "initiate" => Ok(ScriptAction::InitiateQte),
            "qte-correct" => Ok(ScriptAction::QteCorrect),
            "qte-wrong" => Ok(ScriptAction::QteWrong),
            "stop" => Ok(ScriptAction::Stop),
            "qte:up" => Ok(ScriptAction::QteSymbol(crate::combat::qte::QteSymbol::Up)),
            "qte:left" => Ok(ScriptAction::QteSymbol(crate::combat::qte::QteSymbol::Left)),
            "qte:down" => Ok(ScriptAction::QteSymbol(crate::combat::qte::QteSymbol::Down)),
            "qte:right" => Ok(ScriptAction::QteSymbol(crate::combat::qte::QteSymbol::Right)),
            other => {
                if let Some(slot) = other.strip_prefix("switch:") {
                    let index: usize = slot
                        .parse()
                        .map_err(|_| format!("invalid weapon slot in '{}'", other))?;
                    return Ok(ScriptAction::SwitchWeapon(index));
                }
                if let Some(dir) = other.strip_prefix("move:") {
                    let parts: Vec<&str> = dir.split(',').collect();
                    if parts.len() != 2 {
                        return Err(format!("invalid move direction in '{}'", other));
                    }
                    let x: f32 = parts[0]
                        .trim()
                        .parse()
                        .map_err(|_| format!("invalid move direction in '{}'", other))?;
                    let y: f32 = parts[1]
                        .trim()
                        .parse()
                        .map_err(|_| format!("invalid move direction in '{}'", other))?;
                    return Ok(ScriptAction::Move(x, y));
                }
                Err(format!(
                    "Unknown action: '{}'. Valid actions: light, burst, dash, initiate, \
                     qte-correct, qte-wrong, qte:up/left/down/right, stop, switch:N, move:X,Y",
                    other
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_actions() {
        assert_eq!(
            HeadlessScenarioConfig::parse_action("light").unwrap(),
            ScriptAction::LightAttack
        );
        assert_eq!(
            HeadlessScenarioConfig::parse_action("qte-correct").unwrap(),
            ScriptAction::QteCorrect
        );
        assert_eq!(
            HeadlessScenarioConfig::parse_action("switch:2").unwrap(),
            ScriptAction::SwitchWeapon(2)
        );
        assert_eq!(
            HeadlessScenarioConfig::parse_action("move:1,-0.5").unwrap(),
            ScriptAction::Move(1.0, -0.5)
        );
        assert_eq!(
            HeadlessScenarioConfig::parse_action("qte:left").unwrap(),
            ScriptAction::QteSymbol(crate::combat::qte::QteSymbol::Left)
        );
    }

    #[test]
    fn test_parse_rejects_unknown_action() {
        assert!(HeadlessScenarioConfig::parse_action("teleport").is_err());
        assert!(HeadlessScenarioConfig::parse_action("switch:x").is_err());
        assert!(HeadlessScenarioConfig::parse_action("move:1").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let json = r#"{
            "miniboss": { "position": [50.0, 0.0], "qte_threshold": 1.5 }
        }"#;
        let config: HeadlessScenarioConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_fill_in() {
        let config: HeadlessScenarioConfig = serde_json::from_str("{}").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.duration_secs, 10.0);
        assert!(config.miniboss.is_none());
        assert!(config.script.is_empty());
    }
}
