use std::env;
use std::time::Duration;

use crate::ai::registry;
use crate::domain::hand_analysis::SearchBudget;
use crate::domain::rules::{valid_starting_points, DEFAULT_STARTING_POINTS};
use crate::error::AppError;

/// Table engine settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// How long a disconnected seat keeps human control.
    pub reconnect_grace: Duration,
    /// Pause before a bot applies each move.
    pub bot_think_delay: Duration,
    pub search_budget: SearchBudget,
    pub starting_points: i16,
    /// Registry name of the policy installed on substituted seats.
    pub substitute_bot: String,
    /// Fixed match seed; unset draws one from the OS per match.
    pub rng_seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            reconnect_grace: Duration::from_millis(20_000),
            bot_think_delay: Duration::from_millis(800),
            search_budget: SearchBudget::default(),
            starting_points: DEFAULT_STARTING_POINTS,
            substitute_bot: "Conservative".to_string(),
            rng_seed: None,
        }
    }
}

impl TableConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unset variables keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(ms) = parse_var::<u64>(&lookup, "OKEY_RECONNECT_GRACE_MS")? {
            config.reconnect_grace = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "OKEY_BOT_THINK_DELAY_MS")? {
            config.bot_think_delay = Duration::from_millis(ms);
        }
        if let Some(nodes) = parse_var::<u32>(&lookup, "OKEY_SEARCH_NODE_LIMIT")? {
            if nodes == 0 {
                return Err(AppError::config("OKEY_SEARCH_NODE_LIMIT must be positive"));
            }
            config.search_budget = SearchBudget::new(nodes);
        }
        if let Some(points) = parse_var::<i16>(&lookup, "OKEY_STARTING_POINTS")? {
            if !valid_starting_points(points) {
                return Err(AppError::config(format!(
                    "OKEY_STARTING_POINTS must be one of 5, 13, 20, got {points}"
                )));
            }
            config.starting_points = points;
        }
        if let Some(name) = lookup("OKEY_SUBSTITUTE_BOT") {
            if registry::by_name(&name).is_none() {
                return Err(AppError::config(format!(
                    "OKEY_SUBSTITUTE_BOT names unknown bot policy '{name}'"
                )));
            }
            config.substitute_bot = name;
        }
        config.rng_seed = parse_var::<u64>(&lookup, "OKEY_RNG_SEED")?;

        Ok(config)
    }

    /// Fast timers for tests.
    pub fn for_tests() -> Self {
        Self {
            reconnect_grace: Duration::from_millis(1_000),
            bot_think_delay: Duration::from_millis(10),
            rng_seed: Some(42),
            ..Self::default()
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<T>, AppError> {
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::config(format!("{name} has invalid value '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = TableConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, TableConfig::default());
        assert_eq!(config.reconnect_grace, Duration::from_secs(20));
        assert_eq!(config.starting_points, 20);
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn reads_every_variable() {
        let config = TableConfig::from_lookup(lookup(&[
            ("OKEY_RECONNECT_GRACE_MS", "5000"),
            ("OKEY_BOT_THINK_DELAY_MS", "0"),
            ("OKEY_SEARCH_NODE_LIMIT", "1000"),
            ("OKEY_STARTING_POINTS", "13"),
            ("OKEY_SUBSTITUTE_BOT", "RandomPlayer"),
            ("OKEY_RNG_SEED", "77"),
        ]))
        .unwrap();
        assert_eq!(config.reconnect_grace, Duration::from_secs(5));
        assert_eq!(config.bot_think_delay, Duration::ZERO);
        assert_eq!(config.search_budget.max_nodes, 1000);
        assert_eq!(config.starting_points, 13);
        assert_eq!(config.substitute_bot, "RandomPlayer");
        assert_eq!(config.rng_seed, Some(77));
    }

    #[test]
    fn rejects_bad_values() {
        for vars in [
            [("OKEY_RECONNECT_GRACE_MS", "soon")],
            [("OKEY_STARTING_POINTS", "7")],
            [("OKEY_SUBSTITUTE_BOT", "Genius")],
            [("OKEY_SEARCH_NODE_LIMIT", "0")],
        ] {
            let err = TableConfig::from_lookup(lookup(&vars)).unwrap_err();
            assert!(matches!(err, AppError::Config { .. }), "{vars:?} gave {err:?}");
        }
    }
}
