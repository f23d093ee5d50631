//! Slashdown - Top-Down Hack-and-Slash Prototype
//!
//! A prototype implementation of a top-down brawler built around a weapon
//! combo system and a slow-motion Quick-Time-Event finisher that gates the
//! death of miniboss enemies.
//!
//! This library exposes the core game modules for testing and reuse.

pub mod camera;
pub mod cli;
pub mod combat;
pub mod headless;
pub mod keybindings;
pub mod ui;

// Re-export commonly used types
pub use combat::log::{CombatLog, CombatLogEventType};
pub use combat::qte::{QteDirector, QteSymbol};
pub use combat::weapons::{WeaponConfig, WeaponRoster};
pub use headless::HeadlessScenarioConfig;
