//! Domain-level error type used across the engine, rating and match layers.
//!
//! Illegal player actions are `Validation` errors and never mutate state.
//! `Precondition` covers broken inputs that must abort match construction
//! (malformed deck, impossible seat layout). `Numerical` reports a rating
//! update that produced a non-finite value and was therefore skipped.

use thiserror::Error;

/// Reasons a command or input can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Seat acted when it was not its turn.
    OutOfTurn,
    /// Command does not apply to the current phase.
    PhaseMismatch,
    /// Seat index outside 0..=2.
    InvalidSeat,
    /// Submitted cards are not all held by the seat.
    CardsNotInHand,
    /// Submitted cards do not form a recognized combination.
    IllegalCombination,
    /// Combination does not beat the play on the table.
    InsufficientToBeat,
    /// Leading seat tried to pass.
    CannotPassOnLead,
    /// Card token could not be parsed.
    ParseCard,
    Other(String),
}

/// Infra error kinds to distinguish operational failures of collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    StoreUnavailable,
    DataCorruption,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Illegal player action or malformed user input
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    /// Broken precondition; the match cannot be constructed
    #[error("precondition violated: {0}")]
    Precondition(String),
    /// Bidding policy exhausted (every seat declined too many times)
    #[error("policy exhausted: {0}")]
    PolicyExhausted(String),
    /// Rating arithmetic produced a non-finite value; update skipped
    #[error("numerical anomaly: {0}")]
    Numerical(String),
    /// Infrastructure/operational failures (stores, channels)
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    pub fn precondition(detail: impl Into<String>) -> Self {
        Self::Precondition(detail.into())
    }

    pub fn numerical(detail: impl Into<String>) -> Self {
        Self::Numerical(detail.into())
    }

    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// The rejection kind, if this is a validation error.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }

    /// True for errors a caller may recover from by retrying or substituting
    /// an auto-action.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DomainError::Validation(..))
    }
}
