//! How to register an AI
//!
//! 1) Implement `AiPlayer` for the type in its module.
//! 2) Add an `AiFactory` entry with a stable `name` and `version`.
//! 3) Same seed ⇒ same behavior.

use super::{AiPlayer, HeuristicPlayer, RandomPlayer};

/// Factory definition for constructing AI implementations.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Box<dyn AiPlayer>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
    AiFactory {
        name: HeuristicPlayer::NAME,
        version: HeuristicPlayer::VERSION,
        make: make_heuristic,
    },
];

/// Returns the statically registered AI factories.
pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

/// Finds a registered AI factory by its name.
pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_ais().iter().find(|factory| factory.name == name)
}

/// Build the named AI, `None` when unknown.
pub fn create_ai(name: &str, seed: Option<u64>) -> Option<Box<dyn AiPlayer>> {
    by_name(name).map(|factory| (factory.make)(seed))
}

fn make_random_player(seed: Option<u64>) -> Box<dyn AiPlayer> {
    Box::new(RandomPlayer::new(seed))
}

fn make_heuristic(seed: Option<u64>) -> Box<dyn AiPlayer> {
    Box::new(HeuristicPlayer::new(seed))
}
