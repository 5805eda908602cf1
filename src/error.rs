//! Error taxonomy and the recovered-versus-primary result wrapper.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntelError {
    /// Real mode requested without the credentials the collaborator needs.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A feed or generation collaborator was unreachable, timed out or answered badly.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// A structured response could not be read back.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("no recent articles survived filtering")]
    AggregateEmpty,

    /// Unexpected failure inside the pipeline. Never recovered.
    #[error("failed to generate marketing intelligence: {0}")]
    Pipeline(String),
}

impl IntelError {
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, IntelError::Pipeline(_))
    }
}

impl From<reqwest::Error> for IntelError {
    fn from(err: reqwest::Error) -> Self {
        IntelError::Fetch(err.to_string())
    }
}

/// Which execution path produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Real,
    Mock,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Real => write!(f, "real"),
            Mode::Mock => write!(f, "mock"),
        }
    }
}

/// A value together with the path that produced it.
///
/// `recovery` is `None` when the primary path produced the whole value and
/// holds the cause when a fallback substituted some or all of it. Fatal
/// failures never reach an `Outcome`; they travel as `Err(IntelError)`.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub mode: Mode,
    pub recovery: Option<IntelError>,
}

impl<T> Outcome<T> {
    pub fn primary(value: T, mode: Mode) -> Self {
        Self {
            value,
            mode,
            recovery: None,
        }
    }

    pub fn recovered(value: T, mode: Mode, cause: IntelError) -> Self {
        Self {
            value,
            mode,
            recovery: Some(cause),
        }
    }

    pub fn is_recovered(&self) -> bool {
        self.recovery.is_some()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Mode and recovery cause without the value, for the report trace.
    pub fn trace(&self) -> StepTrace {
        StepTrace {
            mode: self.mode,
            recovered_from: self.recovery.as_ref().map(|e| e.to_string()),
        }
    }
}

/// Serializable summary of how one pipeline step executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTrace {
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovered_from: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_errors_are_fatal() {
        assert!(IntelError::Configuration("no key".into()).is_recoverable());
        assert!(IntelError::Fetch("timeout".into()).is_recoverable());
        assert!(IntelError::Parse("HEADLINE".into()).is_recoverable());
        assert!(IntelError::AggregateEmpty.is_recoverable());
        assert!(!IntelError::Pipeline("boom".into()).is_recoverable());
    }

    #[test]
    fn test_outcome_trace() {
        let clean = Outcome::primary(1, Mode::Real);
        assert!(!clean.is_recovered());
        assert_eq!(clean.trace().recovered_from, None);

        let fallback = Outcome::recovered(2, Mode::Mock, IntelError::AggregateEmpty);
        assert!(fallback.is_recovered());
        assert_eq!(fallback.trace().mode, Mode::Mock);
        assert_eq!(
            fallback.trace().recovered_from.as_deref(),
            Some("no recent articles survived filtering")
        );
        assert_eq!(fallback.into_value(), 2);
    }
}
