//! Domain-level error type used by the rule engine and state machine.
//!
//! Transport-agnostic; the ws/services layer decides which violations are
//! answered and which are silently dropped.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Why a move (or parsed input) was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleViolation {
    EmptyPlay,
    UnknownCombination,
    SizeMismatch,
    TypeMismatch,
    SuitLockMismatch,
    TooWeak,
    CannotBeatLoneJoker,
    OutOfTurn,
    PhaseMismatch,
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or rule violation.
    Validation(RuleViolation, String),
}

impl DomainError {
    pub fn validation(kind: RuleViolation, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn kind(&self) -> &RuleViolation {
        match self {
            DomainError::Validation(kind, _) => kind,
        }
    }
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "rule violation {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}
