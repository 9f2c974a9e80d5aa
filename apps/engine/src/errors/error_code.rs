//! Stable error codes for engine rejections.
//!
//! Orchestrators and logs carry these strings instead of ad-hoc text.
//! All codes are SCREAMING_SNAKE_CASE.

use core::fmt;

use super::domain::{DomainError, InfraErrorKind, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Illegal player actions
    /// Seat acted out of turn
    OutOfTurn,
    /// Command not valid in the current phase
    PhaseMismatch,
    /// Seat index out of range
    InvalidSeat,
    /// Cards not held by the seat
    CardsNotInHand,
    /// Cards do not form a combination
    IllegalCombination,
    /// Combination fails to beat the table
    InsufficientToBeat,
    /// Leader may not pass
    CannotPassOnLead,
    /// Card token parse failure
    ParseCard,
    /// General validation error
    ValidationError,

    // Match construction / policy
    /// Malformed deck or seat layout
    PreconditionFailed,
    /// Too many re-deals
    PolicyExhausted,

    // Rating
    /// Non-finite rating arithmetic
    NumericalAnomaly,

    // Collaborators
    StoreTimeout,
    StoreUnavailable,
    DataCorruption,
    InfraError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::InvalidSeat => "INVALID_SEAT",
            Self::CardsNotInHand => "CARDS_NOT_IN_HAND",
            Self::IllegalCombination => "ILLEGAL_COMBINATION",
            Self::InsufficientToBeat => "INSUFFICIENT_TO_BEAT",
            Self::CannotPassOnLead => "CANNOT_PASS_ON_LEAD",
            Self::ParseCard => "PARSE_CARD",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::PreconditionFailed => "PRECONDITION_FAILED",
            Self::PolicyExhausted => "POLICY_EXHAUSTED",
            Self::NumericalAnomaly => "NUMERICAL_ANOMALY",
            Self::StoreTimeout => "STORE_TIMEOUT",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::InfraError => "INFRA_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&ValidationKind> for ErrorCode {
    fn from(kind: &ValidationKind) -> Self {
        match kind {
            ValidationKind::OutOfTurn => Self::OutOfTurn,
            ValidationKind::PhaseMismatch => Self::PhaseMismatch,
            ValidationKind::InvalidSeat => Self::InvalidSeat,
            ValidationKind::CardsNotInHand => Self::CardsNotInHand,
            ValidationKind::IllegalCombination => Self::IllegalCombination,
            ValidationKind::InsufficientToBeat => Self::InsufficientToBeat,
            ValidationKind::CannotPassOnLead => Self::CannotPassOnLead,
            ValidationKind::ParseCard => Self::ParseCard,
            ValidationKind::Other(_) => Self::ValidationError,
        }
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(kind, _) => kind.into(),
            DomainError::Precondition(_) => Self::PreconditionFailed,
            DomainError::PolicyExhausted(_) => Self::PolicyExhausted,
            DomainError::Numerical(_) => Self::NumericalAnomaly,
            DomainError::Infra(InfraErrorKind::Timeout, _) => Self::StoreTimeout,
            DomainError::Infra(InfraErrorKind::StoreUnavailable, _) => Self::StoreUnavailable,
            DomainError::Infra(InfraErrorKind::DataCorruption, _) => Self::DataCorruption,
            DomainError::Infra(_, _) => Self::InfraError,
        }
    }
}
