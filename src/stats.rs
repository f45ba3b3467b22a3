//! Running componentwise aggregates over fuzzy numbers.
//!
//! [`ComponentSums`] keeps the element count and the sums of the lower,
//! modal and upper components of every value fed into it, so that the
//! arithmetic mean is available in O(1) at any time.
//!
//! # Accuracy
//!
//! The sums are plain floating-point accumulators, not compensated ones:
//! for exactly representable inputs (integers, dyadic fractions within the
//! mantissa) every total is exact, and a value subtracted after being added
//! cancels exactly. For other inputs the usual O(nε) rounding drift applies.

use crate::fuzzy::FuzzyNumber;

/// Streaming accumulator of per-component sums.
///
/// # Examples
/// ```
/// use u_fuzzy::{stats::ComponentSums, FuzzyNumber};
///
/// let mut sums = ComponentSums::new();
/// sums.add(&FuzzyNumber::new(0.0, 1.0, 2.0), 1);
/// sums.add(&FuzzyNumber::new(2.0, 3.0, 4.0), 1);
/// assert_eq!(sums.count(), 2);
/// assert_eq!(sums.mean(), Some(FuzzyNumber::new(1.0, 2.0, 3.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSums {
    count: usize,
    lower: f64,
    modal: f64,
    upper: f64,
}

impl ComponentSums {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            lower: 0.0,
            modal: 0.0,
            upper: 0.0,
        }
    }

    /// Accounts for `times` occurrences of `value`.
    pub fn add(&mut self, value: &FuzzyNumber, times: usize) {
        if times == 0 {
            return;
        }
        let t = times as f64;
        self.lower += t * value.lower_value();
        self.modal += t * value.modal_value();
        self.upper += t * value.upper_value();
        self.count += times;
    }

    /// Withdraws `times` occurrences of `value`.
    ///
    /// The caller must only withdraw occurrences it previously added; the
    /// count saturates at zero otherwise.
    pub fn subtract(&mut self, value: &FuzzyNumber, times: usize) {
        if times == 0 {
            return;
        }
        debug_assert!(times <= self.count, "withdrawing more than was added");
        let t = times as f64;
        self.lower -= t * value.lower_value();
        self.modal -= t * value.modal_value();
        self.upper -= t * value.upper_value();
        self.count = self.count.saturating_sub(times);
    }

    /// Returns the number of occurrences accounted for.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns `true` if no occurrence is accounted for.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Sum of the lower components.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Sum of the modal components.
    pub fn modal(&self) -> f64 {
        self.modal
    }

    /// Sum of the upper components.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Returns the componentwise arithmetic mean, or `None` if empty.
    ///
    /// # Complexity
    /// O(1)
    pub fn mean(&self) -> Option<FuzzyNumber> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some(FuzzyNumber::new(
            self.lower / n,
            self.modal / n,
            self.upper / n,
        ))
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: &ComponentSums) {
        self.count += other.count;
        self.lower += other.lower;
        self.modal += other.modal;
        self.upper += other.upper;
    }

    /// Resets to the empty state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for ComponentSums {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
