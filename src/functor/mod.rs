//! Functors: functions, predicates and procedures as first-class values.
//!
//! This module provides:
//!
//! - [`Predicate`], [`UnaryFunction`], [`BinaryFunction`], [`Procedure`]: the
//!   capabilities, implemented by every closure of the right shape
//! - Structural predicates: [`IsEqual`], [`IsGreaterThan`], [`IsLessThan`],
//!   [`IsMultipleOf`], [`Not`], [`And`], [`Or`]
//! - Structural functions: [`Constant`], [`Identity`], [`Offset`], [`Conditional`]
//! - Arity adapters: [`LeftBound`], [`RightBound`]
//!
//! The structural values compare and hash by their fields, so generator
//! pipelines assembled from them have structural equality too.
//!
//! # Examples
//!
//! ```rust
//! use functors::functor::{And, IsGreaterThan, IsMultipleOf, Not, Predicate};
//!
//! let odd_and_large = And(Not(IsMultipleOf(2)), IsGreaterThan(100));
//! assert!(odd_and_large.test(&101));
//! assert!(!odd_and_large.test(&102));
//! assert_eq!(odd_and_large, And(Not(IsMultipleOf(2)), IsGreaterThan(100)));
//! ```

mod adapters;
mod functions;
mod predicates;
mod traits;

pub use adapters::{LeftBound, RightBound};
pub use functions::{Conditional, Constant, Identity, Offset};
pub use predicates::{And, IsEqual, IsGreaterThan, IsLessThan, IsMultipleOf, Not, Or};
pub use traits::{BinaryFunction, Predicate, Procedure, UnaryFunction};
