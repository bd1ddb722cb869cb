//! Bounded intervals that generate their values.
//!
//! - [`Endpoint`] / [`BoundType`]: one edge of an interval, open or closed
//! - [`Range`]: a stepped numeric interval, left closed and right open unless
//!   stated otherwise
//! - [`CharRange`]: a stepped interval of `char`s, closed on both ends
//!
//! Both range types implement [`Generator`](crate::generator::Generator) and
//! are restartable.
//!
//! # Examples
//!
//! ```rust
//! use functors::functor::{IsMultipleOf, Not};
//! use functors::generator::Generator;
//! use functors::range::Range;
//!
//! let odds = Range::between(1, 10)?.filter(Not(IsMultipleOf(2)));
//! assert_eq!(odds.to_collection(), vec![1, 3, 5, 7, 9]);
//! # Ok::<(), functors::FunctorError>(())
//! ```

mod char_range;
mod endpoint;
mod numeric;

pub use char_range::CharRange;
pub use endpoint::{BoundType, Endpoint, EndpointDisplay};
pub use numeric::{Range, RangeValue};
