//! Configuration for the learnkit service.
//!
//! Settings are layered in this order, later layers winning:
//! - built-in defaults
//! - the JSON file at `~/.learnkit/config`
//! - environment variables
//!
//! `Config::load` validates the result so a missing API key stops the
//! process at startup instead of failing individual requests.

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use types::{Config, LlmProvider, LlmSettings, ModelSettings, PlanSettings};

#[cfg(test)]
mod tests;
