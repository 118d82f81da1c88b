//! Use-case outcomes.
//!
//! Every use case returns `Result<Outcome<T>, DomainError>`. The outer
//! `Result` carries faults (store failures, dispatch faults); the `Outcome`
//! carries either the success payload or an expected rule violation.

use std::fmt;

use serde::Serialize;

/// Category of an expected rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The referenced resource does not exist.
    NotFound,
    /// The actor does not own the resource.
    NotAllowed,
    /// Request data was rejected before touching an aggregate.
    Validation,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not found",
            Self::NotAllowed => "not allowed",
            Self::Validation => "validation error",
        };
        f.write_str(label)
    }
}

/// An expected rule violation with a human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Violation category.
    pub kind: FailureKind,
    /// Human-readable detail.
    pub detail: String,
}

impl Failure {
    /// Creates a `NotFound` failure.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::NotFound,
            detail: detail.into(),
        }
    }

    /// Creates a `NotAllowed` failure.
    pub fn not_allowed(detail: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::NotAllowed,
            detail: detail.into(),
        }
    }

    /// Creates a `Validation` failure.
    pub fn validation(detail: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Validation,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

/// Success payload or expected failure of a use case.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The use case completed.
    Success(T),
    /// The use case was rejected by a domain rule.
    Failure(Failure),
}

impl<T> Outcome<T> {
    /// Returns `true` for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for `Failure`.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the success payload, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Maps the success payload, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Converts into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the `Failure` if this outcome is not a success.
    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(failure) => Err(failure),
        }
    }
}

impl<T> From<Failure> for Outcome<T> {
    fn from(failure: Failure) -> Self {
        Self::Failure(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_exposes_value_only() {
        let outcome: Outcome<u32> = Outcome::Success(7);

        assert!(outcome.is_success());
        assert!(!outcome.is_failure());
        assert_eq!(outcome.value(), Some(&7));
        assert!(outcome.failure().is_none());
    }

    #[test]
    fn test_failure_exposes_kind_and_detail_only() {
        let outcome: Outcome<u32> = Failure::not_allowed("not the author").into();

        assert!(outcome.is_failure());
        assert!(outcome.value().is_none());
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::NotAllowed);
        assert_eq!(failure.detail, "not the author");
    }

    #[test]
    fn test_map_preserves_failure() {
        let outcome: Outcome<u32> = Failure::not_found("question").into();

        let mapped = outcome.map(|n| n * 2);

        assert_eq!(mapped.into_result().unwrap_err().kind, FailureKind::NotFound);
    }

    #[test]
    fn test_failure_display_includes_kind() {
        assert_eq!(
            Failure::validation("title must not be empty").to_string(),
            "validation error: title must not be empty"
        );
    }
}
