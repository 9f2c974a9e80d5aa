//! Random AI player - makes random legal moves.
//!
//! Seedable, so a match seed replays the same choices.

use parking_lot::Mutex;
use rand::prelude::*;

use super::trait_def::{AiError, AiPlayer, PlayDecision};
use crate::domain::SeatView;

/// AI that makes random legal moves.
///
/// Bids and doubles are coin flips. In play, passing (when allowed) is one
/// more option next to every legal combination.
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "random";
    pub const VERSION: &'static str = "1.0.0";

    /// `Some(seed)` for reproducible play, `None` for OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl AiPlayer for RandomPlayer {
    fn choose_bid(&self, _view: &SeatView) -> Result<bool, AiError> {
        Ok(self.rng.lock().random_bool(0.5))
    }

    fn choose_double(&self, _view: &SeatView) -> Result<bool, AiError> {
        Ok(self.rng.lock().random_bool(0.25))
    }

    fn choose_play(&self, view: &SeatView) -> Result<PlayDecision, AiError> {
        let legal = view.legal_plays();
        let options = legal.len() + usize::from(view.can_pass());
        if options == 0 {
            return Err(AiError::InvalidMove("No legal plays available".into()));
        }

        let pick = self.rng.lock().random_range(0..options);
        match legal.get(pick) {
            Some(combo) => Ok(PlayDecision::Play(combo.cards.clone())),
            None => Ok(PlayDecision::Pass),
        }
    }
}
