//! One edge of an interval.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether an endpoint's value belongs to the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BoundType {
    /// The value is excluded.
    Open,
    /// The value is included.
    Closed,
}

/// A boundary value together with its [`BoundType`].
///
/// # Examples
///
/// ```rust
/// use functors::range::{BoundType, Endpoint};
///
/// let left = Endpoint::closed(1);
/// let right = Endpoint::new(10, BoundType::Open);
/// assert_eq!(format!("{}, {}", left.left_display(), right.right_display()), "[1, 10)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Endpoint<T> {
    value: T,
    bound_type: BoundType,
}

impl<T> Endpoint<T> {
    /// Creates an endpoint.
    pub const fn new(value: T, bound_type: BoundType) -> Self {
        Self { value, bound_type }
    }

    /// Creates an endpoint excluding `value`.
    pub const fn open(value: T) -> Self {
        Self::new(value, BoundType::Open)
    }

    /// Creates an endpoint including `value`.
    pub const fn closed(value: T) -> Self {
        Self::new(value, BoundType::Closed)
    }

    /// Returns the boundary value.
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Returns the bound type.
    pub const fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    /// Returns `true` when the value is included.
    pub const fn is_closed(&self) -> bool {
        matches!(self.bound_type, BoundType::Closed)
    }

    /// Renders the endpoint as the left edge, e.g. `[1` or `(1`.
    pub const fn left_display(&self) -> EndpointDisplay<'_, T> {
        EndpointDisplay {
            endpoint: self,
            side: Side::Left,
        }
    }

    /// Renders the endpoint as the right edge, e.g. `10]` or `10)`.
    pub const fn right_display(&self) -> EndpointDisplay<'_, T> {
        EndpointDisplay {
            endpoint: self,
            side: Side::Right,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Helper returned by [`Endpoint::left_display`] and
/// [`Endpoint::right_display`].
#[derive(Debug, Clone, Copy)]
pub struct EndpointDisplay<'a, T> {
    endpoint: &'a Endpoint<T>,
    side: Side,
}

impl<T: fmt::Display> fmt::Display for EndpointDisplay<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let closed = self.endpoint.is_closed();
        match self.side {
            Side::Left => {
                let bracket = if closed { '[' } else { '(' };
                write!(formatter, "{bracket}{}", self.endpoint.value)
            }
            Side::Right => {
                let bracket = if closed { ']' } else { ')' };
                write!(formatter, "{}{bracket}", self.endpoint.value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_sides() {
        assert_eq!(Endpoint::open(2.5).left_display().to_string(), "(2.5");
        assert_eq!(Endpoint::closed('z').right_display().to_string(), "z]");
    }
}
