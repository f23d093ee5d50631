//! Headless scenario mode: deterministic, windowless combat runs driven by
//! a JSON config and input script.

pub mod config;
pub mod runner;

pub use config::HeadlessScenarioConfig;
pub use runner::{run_headless_scenario, run_scenario, ScenarioResult};
