//! Error types shared by every module of the crate.
//!
//! Construction problems (a missing collaborator, a range whose step can never
//! reach its right endpoint, an out-of-range argument) are reported when the
//! value is built. Failures raised by user supplied functions are carried by
//! [`EvaluationError`] and handed back to the caller unchanged.

use std::error::Error as StdError;

use thiserror::Error;

/// The error type returned by fallible constructors and operations.
///
/// # Examples
///
/// ```rust
/// use functors::FunctorError;
///
/// let error = FunctorError::NullArgument { argument: "aggregation function" };
/// assert_eq!(
///     error.to_string(),
///     "required argument `aggregation function` was not supplied"
/// );
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FunctorError {
    /// A required collaborator was not supplied before building.
    #[error("required argument `{argument}` was not supplied")]
    NullArgument {
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// A range was built with a step whose sign cannot reach the right endpoint.
    #[error(
        "invalid range from {left} to {right} with step {step}: the step can never reach the right endpoint"
    )]
    InvalidRange {
        /// Rendering of the left endpoint value.
        left: String,
        /// Rendering of the right endpoint value.
        right: String,
        /// Rendering of the step.
        step: String,
    },

    /// An argument was supplied but lies outside of its accepted domain.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// Human readable description of the accepted domain.
        reason: String,
    },

    /// A timer thread or runtime could not be started.
    #[error("failed to start timer: {0}")]
    TimerStart(#[from] std::io::Error),

    /// A user supplied function failed.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// A failure raised by a user supplied function during `add` or `run`.
///
/// The library never swallows this error: it is returned to the caller and
/// any state the failing call would have replaced is left untouched.
///
/// # Examples
///
/// ```rust
/// use functors::EvaluationError;
///
/// let error = EvaluationError::new("sum overflowed");
/// assert_eq!(error.to_string(), "evaluation failed: sum overflowed");
/// ```
#[derive(Debug, Error)]
#[error("evaluation failed: {message}")]
pub struct EvaluationError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl EvaluationError {
    /// Creates an error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping the underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the message describing the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
