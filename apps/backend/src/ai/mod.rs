//! Automated players - make decisions for substituted or bot-occupied seats.
//!
//! This module provides:
//! - `BotPolicy` trait and the `BotAction` a policy returns
//! - `Conservative`: the default substitute, draws from the deck only
//! - `RandomPlayer`: random legal moves (seedable for tests and simulation)
//! - a static registry for looking policies up by name

mod conservative;
mod random;
pub mod registry;
mod trait_def;

#[cfg(test)]
mod tests_policies;

pub use conservative::Conservative;
pub use random::RandomPlayer;
pub use trait_def::{BotAction, BotError, BotPolicy};

use crate::error::AppError;

/// Create a policy from its registry name.
pub fn create_bot(name: &str, seed: Option<u64>) -> Result<Box<dyn BotPolicy>, AppError> {
    registry::by_name(name)
        .map(|factory| (factory.make)(seed))
        .ok_or_else(|| AppError::config(format!("no bot policy named '{name}'")))
}

/// Policy used when a seat falls back after a failing bot.
pub fn fallback_bot() -> Box<dyn BotPolicy> {
    Box::new(Conservative)
}
