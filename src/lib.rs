//! # functors
//!
//! Composable function objects, push-style generators, stepped ranges and
//! thread-safe time-windowed aggregators.
//!
//! ## Overview
//!
//! - **Functors**: [`Predicate`](functor::Predicate),
//!   [`UnaryFunction`](functor::UnaryFunction),
//!   [`BinaryFunction`](functor::BinaryFunction) and
//!   [`Procedure`](functor::Procedure), plus reusable predicates and adapters
//!   binding one argument of a binary function
//! - **Generators**: sources that push their elements into a consumer, with
//!   filtering, transforming and bounding wrappers compared structurally
//! - **Ranges**: numeric and character intervals with open or closed
//!   endpoints and an arbitrary step
//! - **Aggregators**: mean, median, percentile, count and custom folds over
//!   values added concurrently, reset on a timer that notifies listeners
//!
//! ## Feature Flags
//!
//! - `functor`: Function object traits and implementations
//! - `generator`: Generators and their wrappers (implies `functor`)
//! - `range`: Numeric and character ranges (implies `generator`)
//! - `aggregator`: Timed aggregators (implies `functor`)
//! - `serde`: Serialization of ranges and timer configuration
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use functors::prelude::*;
//!
//! let squares_of_odds = Range::between(1, 10)?
//!     .filter(Not(IsMultipleOf(2)))
//!     .map(|value: i32| value * value)
//!     .take_while(IsLessThan(50));
//! assert_eq!(squares_of_odds.to_collection(), vec![1, 9, 25, 49]);
//! # Ok::<(), functors::FunctorError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod error;

pub use error::{EvaluationError, FunctorError};

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use functors::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{EvaluationError, FunctorError};

    #[cfg(feature = "functor")]
    pub use crate::functor::*;

    #[cfg(feature = "generator")]
    pub use crate::generator::*;

    #[cfg(feature = "range")]
    pub use crate::range::*;

    #[cfg(feature = "aggregator")]
    pub use crate::aggregator::*;
}

#[cfg(feature = "functor")]
pub mod functor;

#[cfg(feature = "generator")]
pub mod generator;

#[cfg(feature = "range")]
pub mod range;

#[cfg(feature = "aggregator")]
pub mod aggregator;
