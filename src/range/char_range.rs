//! Ranges over Unicode scalar values.

use std::cmp::Ordering;
use std::fmt;
use std::ops::ControlFlow;

use super::endpoint::{BoundType, Endpoint};
use crate::error::FunctorError;
use crate::generator::Generator;

/// A range of `char`s stepping over code points.
///
/// Both ends are closed by default. Code points that are not Unicode scalar
/// values (the surrogate block) are stepped over without being produced.
///
/// # Examples
///
/// ```rust
/// use functors::generator::Generator;
/// use functors::range::CharRange;
///
/// let letters: String = CharRange::between('a', 'e')?.to_collection().into_iter().collect();
/// assert_eq!(letters, "abcde");
///
/// let backwards: String = CharRange::with_step('e', 'a', -2)?
///     .to_collection()
///     .into_iter()
///     .collect();
/// assert_eq!(backwards, "eca");
/// # Ok::<(), functors::FunctorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharRange {
    left: Endpoint<char>,
    right: Endpoint<char>,
    step: i32,
}

impl CharRange {
    /// Creates a range from explicit endpoints and a code point step.
    ///
    /// # Errors
    ///
    /// Returns [`FunctorError::InvalidRange`] when the step cannot reach the
    /// right endpoint.
    pub fn new(
        left: Endpoint<char>,
        right: Endpoint<char>,
        step: i32,
    ) -> Result<Self, FunctorError> {
        let valid = match left.value().cmp(right.value()) {
            Ordering::Equal => true,
            ordering => step.cmp(&0) == ordering.reverse(),
        };
        if !valid {
            return Err(FunctorError::InvalidRange {
                left: left.value().to_string(),
                right: right.value().to_string(),
                step: step.to_string(),
            });
        }
        Ok(Self { left, right, step })
    }

    /// Creates `[from, to]` with a unit step towards `to`.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches the other constructors.
    pub fn between(from: char, to: char) -> Result<Self, FunctorError> {
        let step = if from <= to { 1 } else { -1 };
        Self::with_step(from, to, step)
    }

    /// Creates `[from, to]` with the given step.
    ///
    /// # Errors
    ///
    /// Returns [`FunctorError::InvalidRange`] when `step` cannot reach `to`.
    pub fn with_step(from: char, to: char, step: i32) -> Result<Self, FunctorError> {
        Self::new(Endpoint::closed(from), Endpoint::closed(to), step)
    }

    /// Returns the left endpoint.
    pub const fn left(&self) -> &Endpoint<char> {
        &self.left
    }

    /// Returns the right endpoint.
    pub const fn right(&self) -> &Endpoint<char> {
        &self.right
    }

    /// Returns the step in code points.
    pub const fn step(&self) -> i32 {
        self.step
    }

    /// Returns `true` when `value` is one of the produced characters.
    ///
    /// Computed from code point distances without walking the range. A
    /// `char` is always a scalar value, so a reachable code point is always
    /// produced.
    pub fn contains(&self, value: char) -> bool {
        let left = *self.left.value();
        if self.step == 0 {
            return value == left && self.left.is_closed() && self.right.is_closed();
        }
        let first = if self.left.is_closed() {
            u32::from(left)
        } else {
            match u32::from(left).checked_add_signed(self.step) {
                Some(first) => first,
                None => return false,
            }
        };
        let code = u32::from(value);
        let after_first = if self.step > 0 { code >= first } else { code <= first };
        after_first
            && self.before_right(code)
            && first.abs_diff(code) % self.step.unsigned_abs() == 0
    }

    fn before_right(&self, code: u32) -> bool {
        let right = u32::from(*self.right.value());
        match (self.step > 0, self.right.bound_type()) {
            (true, BoundType::Closed) => code <= right,
            (true, BoundType::Open) => code < right,
            (false, BoundType::Closed) => code >= right,
            (false, BoundType::Open) => code > right,
        }
    }
}

impl Generator for CharRange {
    type Item = char;

    fn generate<B, C>(&self, mut consumer: C) -> ControlFlow<B>
    where
        C: FnMut(char) -> ControlFlow<B>,
    {
        let left = u32::from(*self.left.value());
        if self.step == 0 {
            if self.left.is_closed() && self.right.is_closed() {
                return consumer(*self.left.value());
            }
            return ControlFlow::Continue(());
        }
        let mut current = if self.left.is_closed() {
            Some(left)
        } else {
            left.checked_add_signed(self.step)
        };
        while let Some(code) = current {
            if !self.before_right(code) {
                break;
            }
            if let Some(character) = char::from_u32(code) {
                if let ControlFlow::Break(value) = consumer(character) {
                    return ControlFlow::Break(value);
                }
            }
            current = code.checked_add_signed(self.step);
        }
        ControlFlow::Continue(())
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "CharRange<{}, {}, {}>",
            self.left.left_display(),
            self.right.right_display(),
            self.step
        )
    }
}
