//! Keybinding system for remappable controls
//!
//! Maps game actions to keyboard keys. The defaults can be overridden by an
//! optional RON file mapping actions to key names; actions the file omits
//! keep their defaults.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Default location of the keybinding overrides file.
pub const KEYBINDINGS_PATH: &str = "assets/config/keybindings.ron";

/// All possible actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum GameAction {
    // Movement (doubles as the QTE input alphabet while a sequence runs)
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Dash,

    // Combat
    LightAttack,
    BurstAttack,
    InitiateQte,
    Weapon1,
    Weapon2,
    Weapon3,

    // Navigation
    Back,
}

/// Resolve a key name as written in the bindings file.
fn key_code_from_name(name: &str) -> Option<KeyCode> {
    Some(match name {
        "Escape" => KeyCode::Escape,
        "Enter" => KeyCode::Enter,
        "Space" => KeyCode::Space,
        "Tab" => KeyCode::Tab,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyZ" => KeyCode::KeyZ,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3,
        "Digit4" => KeyCode::Digit4,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        _ => return None,
    })
}

/// Resource mapping game actions to keyboard keys
#[derive(Resource, Debug, Clone)]
pub struct Keybindings {
    bindings: HashMap<GameAction, KeyCode>,
}

impl Default for Keybindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(GameAction::MoveUp, KeyCode::KeyW);
        bindings.insert(GameAction::MoveDown, KeyCode::KeyS);
        bindings.insert(GameAction::MoveLeft, KeyCode::KeyA);
        bindings.insert(GameAction::MoveRight, KeyCode::KeyD);
        bindings.insert(GameAction::Dash, KeyCode::ShiftLeft);
        bindings.insert(GameAction::LightAttack, KeyCode::KeyJ);
        bindings.insert(GameAction::BurstAttack, KeyCode::KeyK);
        bindings.insert(GameAction::InitiateQte, KeyCode::KeyF);
        bindings.insert(GameAction::Weapon1, KeyCode::Digit1);
        bindings.insert(GameAction::Weapon2, KeyCode::Digit2);
        bindings.insert(GameAction::Weapon3, KeyCode::Digit3);
        bindings.insert(GameAction::Back, KeyCode::Escape);
        Self { bindings }
    }
}

impl Keybindings {
    /// Load binding overrides from a RON file. A missing file keeps the
    /// defaults; an unreadable file or an unknown key name is a
    /// configuration error.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_ron_str(&contents).map_err(|e| format!("{}: {}", path.display(), e))
    }

    fn from_ron_str(contents: &str) -> Result<Self, String> {
        let overrides: HashMap<GameAction, String> =
            ron::from_str(contents).map_err(|e| format!("invalid keybindings: {}", e))?;
        let mut bindings = Self::default();
        for (action, name) in overrides {
            let key = key_code_from_name(&name)
                .ok_or_else(|| format!("unknown key '{}' bound to {:?}", name, action))?;
            bindings.bindings.insert(action, key);
        }
        Ok(bindings)
    }

    /// Get the key currently bound to an action
    pub fn key_for(&self, action: GameAction) -> Option<KeyCode> {
        self.bindings.get(&action).copied()
    }

    /// Check if the key bound to an action was just pressed this frame
    pub fn action_just_pressed(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.key_for(action)
            .map(|key| keyboard.just_pressed(key))
            .unwrap_or(false)
    }

    /// Check if the key bound to an action is held down
    pub fn action_pressed(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.key_for(action)
            .map(|key| keyboard.pressed(key))
            .unwrap_or(false)
    }

    /// Look up which movement action (if any) a raw key maps to.
    /// Used to translate key presses into QTE symbols while a sequence runs.
    pub fn movement_action_for(&self, key: KeyCode) -> Option<GameAction> {
        [
            GameAction::MoveUp,
            GameAction::MoveDown,
            GameAction::MoveLeft,
            GameAction::MoveRight,
        ]
        .into_iter()
        .find(|action| self.key_for(*action) == Some(key))
    }
}
