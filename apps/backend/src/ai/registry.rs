//! How to register a bot
//!
//! 1) Implement `BotPolicy` for your type in its module.
//! 2) Add a `BotFactory` entry to the static list with a stable `name` and `version`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same seed ⇒ same behavior (where applicable).

use crate::ai::{BotPolicy, Conservative, RandomPlayer};

/// Factory definition for constructing bot policies.
pub struct BotFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Box<dyn BotPolicy>,
}

static BOT_FACTORIES: &[BotFactory] = &[
    BotFactory {
        name: Conservative::NAME,
        version: Conservative::VERSION,
        make: make_conservative,
    },
    BotFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
];

/// Returns the statically registered bot factories.
pub fn registered_bots() -> &'static [BotFactory] {
    BOT_FACTORIES
}

/// Finds a registered bot factory by its name.
pub fn by_name(name: &str) -> Option<&'static BotFactory> {
    registered_bots().iter().find(|factory| factory.name == name)
}

fn make_conservative(seed: Option<u64>) -> Box<dyn BotPolicy> {
    Box::new(Conservative::new(seed))
}

fn make_random_player(seed: Option<u64>) -> Box<dyn BotPolicy> {
    Box::new(RandomPlayer::new(seed))
}
