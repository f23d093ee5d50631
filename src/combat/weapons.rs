//! Data-Driven Weapon Configuration
//!
//! Weapons are defined in `assets/config/weapons.ron` rather than hardcoded,
//! so balance changes don't require recompilation. The roster is validated at
//! startup; a roster with no weapons (or a weapon with no combo steps) is a
//! configuration error and fails fast.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// A single weapon definition. Immutable configuration, selected by index
/// from the roster.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Display name of the weapon
    pub name: String,

    // === Light attack combo ===
    /// Ordered damage per combo step; its length is the combo length
    pub light_damage: Vec<f32>,
    /// Knockback force applied per light hit
    pub light_knockback: f32,
    /// Cooldown between light attacks in seconds
    pub light_cooldown: f32,
    /// Seconds without a light attack before the combo resets to step 0
    pub combo_reset_time: f32,

    // === Burst attack ===
    /// Single burst attack damage
    pub burst_damage: f32,
    /// Knockback force applied per burst hit
    pub burst_knockback: f32,
    /// Cooldown after a burst attack in seconds
    pub burst_cooldown: f32,
}

impl WeaponConfig {
    pub fn combo_length(&self) -> usize {
        self.light_damage.len()
    }
}

/// The fixed weapon roster loaded from config.
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct WeaponRoster {
    pub weapons: Vec<WeaponConfig>,
}

impl WeaponRoster {
    pub fn get(&self, index: usize) -> Option<&WeaponConfig> {
        self.weapons.get(index)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// Validate the roster. An empty roster or a degenerate weapon is an
    /// invalid configuration, not a runtime condition.
    pub fn validate(&self) -> Result<(), String> {
        if self.weapons.is_empty() {
            return Err("weapon roster must contain at least one weapon".to_string());
        }
        for weapon in &self.weapons {
            if weapon.light_damage.is_empty() {
                return Err(format!(
                    "weapon '{}' must have at least one combo step",
                    weapon.name
                ));
            }
            if weapon.light_cooldown <= 0.0 || weapon.burst_cooldown <= 0.0 {
                return Err(format!(
                    "weapon '{}' must have positive cooldowns",
                    weapon.name
                ));
            }
            if weapon.combo_reset_time <= 0.0 {
                return Err(format!(
                    "weapon '{}' must have a positive combo reset time",
                    weapon.name
                ));
            }
            if weapon.light_damage.iter().any(|d| *d < 0.0) || weapon.burst_damage < 0.0 {
                return Err(format!(
                    "weapon '{}' must not have negative damage values",
                    weapon.name
                ));
            }
        }
        Ok(())
    }
}

impl Default for WeaponRoster {
    /// Load the roster from the default config file.
    /// Panics if the file cannot be loaded - use for tests only.
    fn default() -> Self {
        load_weapon_roster().expect("Failed to load weapon roster in Default impl")
    }
}

/// Load and validate the weapon roster from assets/config/weapons.ron
pub fn load_weapon_roster() -> Result<WeaponRoster, String> {
    let config_path = "assets/config/weapons.ron";

    let contents = std::fs::read_to_string(config_path)
        .map_err(|e| format!("Failed to read {}: {}", config_path, e))?;

    let roster: WeaponRoster =
        ron::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", config_path, e))?;

    roster.validate()?;
    Ok(roster)
}

/// Bevy plugin for weapon configuration loading
pub struct WeaponConfigPlugin;

impl Plugin for WeaponConfigPlugin {
    fn build(&self, app: &mut App) {
        match load_weapon_roster() {
            Ok(roster) => {
                info!("Loaded {} weapons from config", roster.len());
                app.insert_resource(roster);
            }
            Err(e) => {
                error!("Weapon configuration error: {}", e);
                panic!("Invalid weapon configuration: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> WeaponConfig {
        WeaponConfig {
            name: "Sword".to_string(),
            light_damage: vec![10.0, 15.0, 20.0],
            light_knockback: 200.0,
            light_cooldown: 0.3,
            combo_reset_time: 2.0,
            burst_damage: 40.0,
            burst_knockback: 400.0,
            burst_cooldown: 2.0,
        }
    }

    #[test]
    fn test_valid_roster_passes() {
        let roster = WeaponRoster {
            weapons: vec![sword()],
        };
        assert!(roster.validate().is_ok());
    }

    #[test]
    fn test_empty_roster_is_invalid() {
        let roster = WeaponRoster { weapons: vec![] };
        assert!(roster.validate().is_err());
    }

    #[test]
    fn test_empty_combo_is_invalid() {
        let mut weapon = sword();
        weapon.light_damage.clear();
        let roster = WeaponRoster {
            weapons: vec![weapon],
        };
        assert!(roster.validate().is_err());
    }

    #[test]
    fn test_out_of_range_index_returns_none() {
        let roster = WeaponRoster {
            weapons: vec![sword()],
        };
        assert!(roster.get(0).is_some());
        assert!(roster.get(5).is_none());
    }
}
