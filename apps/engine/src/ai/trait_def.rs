//! AI player trait definition.

use std::fmt;

use crate::domain::{Card, SeatView};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Errors that can occur during AI decision-making.
#[derive(Debug)]
pub enum AiError {
    /// AI failed to make a decision within timeout
    Timeout,
    /// AI encountered an internal error
    Internal(String),
    /// AI produced an invalid move
    InvalidMove(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Timeout => write!(f, "AI decision timeout"),
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::InvalidMove(msg) => write!(f, "AI invalid move: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<AiError> for DomainError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::Timeout => DomainError::infra(InfraErrorKind::Timeout, "AI decision timeout"),
            other => DomainError::infra(InfraErrorKind::Other("ai".into()), other.to_string()),
        }
    }
}

/// A trick-play decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayDecision {
    Play(Vec<Card>),
    Pass,
}

/// Trait for AI players.
///
/// Implementations receive the seat's view and must choose a legal action.
/// Legality questions go through `SeatView::legal_plays` and
/// `SeatView::can_pass`.
pub trait AiPlayer: Send + Sync {
    /// Accept (`true`) or decline the landlord role.
    fn choose_bid(&self, view: &SeatView) -> Result<bool, AiError>;

    /// Double the score multiplier or not.
    fn choose_double(&self, view: &SeatView) -> Result<bool, AiError>;

    fn choose_play(&self, view: &SeatView) -> Result<PlayDecision, AiError>;
}
