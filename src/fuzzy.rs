//! Triangular fuzzy numbers.
//!
//! A triangular fuzzy number is a triple `(l, m, u)` with `l ≤ m ≤ u`
//! describing a piecewise-linear membership function that is zero outside
//! `[l, u]` and peaks at the modal value `m`.
//!
//! # Arithmetic
//!
//! | Operation | Result |
//! |---|---|
//! | `a + b` | `(a.l + b.l, a.m + b.m, a.u + b.u)` |
//! | `a − b` | `(a.l − b.u, a.m − b.m, a.u − b.l)` |
//! | `a × b` | `sort(a.l·b.l, a.m·b.m, a.u·b.u)` |
//!
//! Addition and subtraction preserve the ordering of the components on
//! their own. Multiplication does not (negative components can invert it),
//! so its result is re-sorted.
//!
//! # Ranking
//!
//! Fuzzy numbers are ordered by a defuzzification index. With
//! `d₁ = √(1 + (u − m)²)` and `d₂ = √(1 + (m − l)²)`:
//!
//! ```text
//! z = (u − l) + d₁ + d₂
//! y = (u − l) / z
//! x = ((u − l)·m + d₁·l + d₂·u) / z
//! key = (x − y/2, 1 − y, m)
//! ```
//!
//! Keys compare lexicographically. For a sorted triple `z ≥ 2`, so the
//! index is defined for every finite input, crisp numbers included.
//!
//! # Equality vs. rank
//!
//! [`PartialEq`] compares the raw components. The rank order is coarser:
//! distinct triples can share a key. Use [`FuzzyNumber::rank_cmp`] for the
//! total order and [`FuzzyNumber::is_rank_equivalent`] for rank ties.

use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use ordered_float::OrderedFloat;

/// The crisp number zero, `(0, 0, 0)`. Additive identity.
///
/// Each use yields a fresh value with an empty rank cache.
#[allow(clippy::declare_interior_mutable_const)]
pub const CRISP_ZERO: FuzzyNumber = crisp_number(0.0);

/// Embeds an ordinary real number as the degenerate fuzzy number `(v, v, v)`.
///
/// # Examples
/// ```
/// use u_fuzzy::{crisp_number, FuzzyNumber};
/// assert_eq!(crisp_number(2.5), FuzzyNumber::new(2.5, 2.5, 2.5));
/// ```
pub const fn crisp_number(value: f64) -> FuzzyNumber {
    FuzzyNumber {
        lower: value,
        modal: value,
        upper: value,
        rank: Cell::new(None),
    }
}

// ============================================================================
// Rank key
// ============================================================================

/// Ranking key of a fuzzy number: `(x − y/2, 1 − y, m)`.
///
/// Totally ordered, lexicographically over its three components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankKey {
    primary: OrderedFloat<f64>,
    secondary: OrderedFloat<f64>,
    modal: OrderedFloat<f64>,
}

impl RankKey {
    fn compute(l: f64, m: f64, u: f64) -> Self {
        let spread = u - l;
        let d1 = (1.0 + (u - m) * (u - m)).sqrt();
        let d2 = (1.0 + (m - l) * (m - l)).sqrt();
        let z = spread + d1 + d2;
        let y = spread / z;
        let x = (spread * m + d1 * l + d2 * u) / z;

        Self {
            primary: OrderedFloat(x - y / 2.0),
            secondary: OrderedFloat(1.0 - y),
            modal: OrderedFloat(m),
        }
    }

    /// The primary component, `x − y/2`.
    pub fn primary(&self) -> f64 {
        self.primary.0
    }

    /// The first tie-breaker, `1 − y`.
    pub fn secondary(&self) -> f64 {
        self.secondary.0
    }

    /// The last tie-breaker, the modal value.
    pub fn modal(&self) -> f64 {
        self.modal.0
    }
}

// ============================================================================
// Fuzzy number
// ============================================================================

/// Triangular fuzzy number `(lower, modal, upper)`.
///
/// The components are kept sorted. The rank key is computed on the first
/// comparison after construction or mutation and cached until the next
/// mutation. Because the cache is written from `&self`, comparing is not
/// free of side effects, and the type is not [`Sync`].
///
/// # Examples
/// ```
/// use u_fuzzy::FuzzyNumber;
///
/// let a = FuzzyNumber::new(3.0, 1.0, 2.0);
/// assert_eq!(a, FuzzyNumber::new(1.0, 2.0, 3.0));
///
/// let b = FuzzyNumber::new(0.0, 2.0, 4.0);
/// // Same modal value, wider spread: ranks lower.
/// assert!(b < a);
/// assert_eq!((&a - &b).to_string(), "(-3, 0, 3)");
/// ```
#[derive(Debug, Clone)]
pub struct FuzzyNumber {
    lower: f64,
    modal: f64,
    upper: f64,
    rank: Cell<Option<RankKey>>,
}

impl FuzzyNumber {
    /// Creates a fuzzy number from any three reals.
    ///
    /// The arguments are sorted, so their order does not matter:
    /// `new(a, b, c)` takes `min` as lower, the median as modal and `max`
    /// as upper.
    pub fn new(lower: f64, modal: f64, upper: f64) -> Self {
        let mut number = Self {
            lower,
            modal,
            upper,
            rank: Cell::new(None),
        };
        number.normalize();
        number
    }

    /// Returns the lower bound.
    pub fn lower_value(&self) -> f64 {
        self.lower
    }

    /// Returns the modal (peak) value.
    pub fn modal_value(&self) -> f64 {
        self.modal
    }

    /// Returns the upper bound.
    pub fn upper_value(&self) -> f64 {
        self.upper
    }

    /// Returns `true` if `lower == modal == upper`.
    pub fn is_crisp(&self) -> bool {
        self.lower == self.modal && self.modal == self.upper
    }

    /// Returns the ranking key, computing and caching it if needed.
    pub fn rank_key(&self) -> RankKey {
        if let Some(key) = self.rank.get() {
            return key;
        }
        let key = RankKey::compute(self.lower, self.modal, self.upper);
        self.rank.set(Some(key));
        key
    }

    /// Total order by rank key.
    ///
    /// Rank-equivalent numbers compare `Equal` here even when they are not
    /// `==`. Populates the rank cache of both operands.
    ///
    /// # Examples
    /// ```
    /// use std::cmp::Ordering;
    /// use u_fuzzy::FuzzyNumber;
    ///
    /// let a = FuzzyNumber::new(0.0, 1.0, 2.0);
    /// let b = FuzzyNumber::new(1e-20, 1.0, 2.0);
    /// assert_ne!(a, b);
    /// assert_eq!(a.rank_cmp(&b), Ordering::Equal);
    /// ```
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.rank_key().cmp(&other.rank_key())
    }

    /// Returns `true` if both numbers have the same rank key.
    pub fn is_rank_equivalent(&self, other: &Self) -> bool {
        self.rank_cmp(other) == Ordering::Equal
    }

    fn normalize(&mut self) {
        let mut values = [self.lower, self.modal, self.upper];
        values.sort_by(f64::total_cmp);
        [self.lower, self.modal, self.upper] = values;
    }

    fn invalidate_rank(&mut self) {
        *self.rank.get_mut() = None;
    }
}

impl PartialEq for FuzzyNumber {
    fn eq(&self, other: &Self) -> bool {
        self.lower == other.lower && self.modal == other.modal && self.upper == other.upper
    }
}

/// Orders by rank key.
///
/// `partial_cmp` is `Some(Equal)` only for `==` values. Rank-equivalent
/// values with different components are unordered (`None`): neither `<`
/// nor `>` holds between them.
impl PartialOrd for FuzzyNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.rank_cmp(other) {
            Ordering::Equal if self != other => None,
            ordering => Some(ordering),
        }
    }
}

impl fmt::Display for FuzzyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.lower, self.modal, self.upper)
    }
}

impl From<f64> for FuzzyNumber {
    fn from(value: f64) -> Self {
        crisp_number(value)
    }
}

impl From<(f64, f64, f64)> for FuzzyNumber {
    fn from((lower, modal, upper): (f64, f64, f64)) -> Self {
        Self::new(lower, modal, upper)
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

impl AddAssign<&FuzzyNumber> for FuzzyNumber {
    fn add_assign(&mut self, rhs: &FuzzyNumber) {
        self.lower += rhs.lower;
        self.modal += rhs.modal;
        self.upper += rhs.upper;
        self.invalidate_rank();
    }
}

impl SubAssign<&FuzzyNumber> for FuzzyNumber {
    fn sub_assign(&mut self, rhs: &FuzzyNumber) {
        self.lower -= rhs.upper;
        self.modal -= rhs.modal;
        self.upper -= rhs.lower;
        self.invalidate_rank();
    }
}

impl MulAssign<&FuzzyNumber> for FuzzyNumber {
    fn mul_assign(&mut self, rhs: &FuzzyNumber) {
        self.lower *= rhs.lower;
        self.modal *= rhs.modal;
        self.upper *= rhs.upper;
        self.normalize();
        self.invalidate_rank();
    }
}

/// Derives the owned and borrowed operator forms from the `OpAssign<&Self>`
/// implementation.
macro_rules! forward_binop {
    ($op:ident, $method:ident, $op_assign:ident, $method_assign:ident) => {
        impl $op_assign<FuzzyNumber> for FuzzyNumber {
            fn $method_assign(&mut self, rhs: FuzzyNumber) {
                self.$method_assign(&rhs);
            }
        }

        impl $op<&FuzzyNumber> for FuzzyNumber {
            type Output = FuzzyNumber;

            fn $method(mut self, rhs: &FuzzyNumber) -> FuzzyNumber {
                self.$method_assign(rhs);
                self
            }
        }

        impl $op<FuzzyNumber> for FuzzyNumber {
            type Output = FuzzyNumber;

            fn $method(mut self, rhs: FuzzyNumber) -> FuzzyNumber {
                self.$method_assign(&rhs);
                self
            }
        }

        impl $op<&FuzzyNumber> for &FuzzyNumber {
            type Output = FuzzyNumber;

            fn $method(self, rhs: &FuzzyNumber) -> FuzzyNumber {
                let mut result = self.clone();
                result.$method_assign(rhs);
                result
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(x: &FuzzyNumber) -> (f64, f64, f64) {
        (x.lower_value(), x.modal_value(), x.upper_value())
    }

    // --- construction ---

    #[test]
    fn test_new_sorts_components() {
        assert_eq!(triple(&FuzzyNumber::new(3.0, 1.0, 2.0)), (1.0, 2.0, 3.0));
        assert_eq!(triple(&FuzzyNumber::new(1.0, 2.0, 3.0)), (1.0, 2.0, 3.0));
        assert_eq!(triple(&FuzzyNumber::new(-1.0, -5.0, 0.5)), (-5.0, -1.0, 0.5));
    }

    #[test]
    fn test_crisp_number() {
        let c = crisp_number(4.0);
        assert!(c.is_crisp());
        assert_eq!(triple(&c), (4.0, 4.0, 4.0));
        assert_eq!(FuzzyNumber::from(4.0), c);
        assert!(!FuzzyNumber::new(1.0, 2.0, 2.0).is_crisp());
    }

    #[test]
    fn test_crisp_zero() {
        let zero = CRISP_ZERO;
        assert_eq!(triple(&zero), (0.0, 0.0, 0.0));
        assert_eq!(zero, crisp_number(0.0));
    }

    #[test]
    fn test_from_tuple() {
        let x: FuzzyNumber = (2.0, 0.0, 1.0).into();
        assert_eq!(triple(&x), (0.0, 1.0, 2.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(FuzzyNumber::new(1.0, 2.0, 3.0).to_string(), "(1, 2, 3)");
        assert_eq!(FuzzyNumber::new(-0.5, 0.25, 1.5).to_string(), "(-0.5, 0.25, 1.5)");
        assert_eq!(crisp_number(0.0).to_string(), "(0, 0, 0)");
    }

    // --- arithmetic ---

    #[test]
    fn test_add() {
        let a = FuzzyNumber::new(1.0, 2.0, 3.0);
        let b = FuzzyNumber::new(0.5, 1.0, 4.0);
        assert_eq!(triple(&(&a + &b)), (1.5, 3.0, 7.0));
        assert_eq!(a.clone() + CRISP_ZERO, a);
    }

    #[test]
    fn test_sub_crosses_bounds() {
        let a = FuzzyNumber::new(1.0, 2.0, 3.0);
        let b = FuzzyNumber::new(0.0, 1.0, 5.0);
        assert_eq!(triple(&(&a - &b)), (-4.0, 1.0, 3.0));
    }

    #[test]
    fn test_sub_self_is_not_zero() {
        let a = FuzzyNumber::new(1.0, 2.0, 3.0);
        assert_eq!(triple(&(&a - &a)), (-2.0, 0.0, 2.0));
    }

    #[test]
    fn test_mul_resorts_negative_components() {
        let a = FuzzyNumber::new(-3.0, -2.0, -1.0);
        let b = FuzzyNumber::new(1.0, 2.0, 3.0);
        // Raw products are (-3, -4, -3).
        assert_eq!(triple(&(&a * &b)), (-4.0, -3.0, -3.0));

        let c = FuzzyNumber::new(-2.0, 1.0, 2.0);
        let d = FuzzyNumber::new(-3.0, 1.0, 1.0);
        // Raw products are (6, 1, 2).
        assert_eq!(triple(&(c * d)), (1.0, 2.0, 6.0));
    }

    #[test]
    fn test_compound_assign() {
        let mut x = FuzzyNumber::new(1.0, 2.0, 3.0);
        x += FuzzyNumber::new(1.0, 1.0, 1.0);
        assert_eq!(triple(&x), (2.0, 3.0, 4.0));
        x -= &crisp_number(1.0);
        assert_eq!(triple(&x), (1.0, 2.0, 3.0));
        x *= crisp_number(-1.0);
        assert_eq!(triple(&x), (-3.0, -2.0, -1.0));
    }

    #[test]
    fn test_owned_and_borrowed_forms_agree() {
        let a = FuzzyNumber::new(1.0, 2.0, 3.0);
        let b = FuzzyNumber::new(-1.0, 0.0, 2.0);
        assert_eq!(a.clone() + b.clone(), &a + &b);
        assert_eq!(a.clone() - &b, &a - &b);
        assert_eq!(a.clone() * b.clone(), &a * &b);
    }

    // --- ranking ---

    #[test]
    fn test_rank_key_reference_values() {
        let key = FuzzyNumber::new(1.0, 2.0, 3.0).rank_key();
        assert!((key.primary() - 1.7928932188134525).abs() < 1e-12);
        assert!((key.secondary() - 0.5857864376269049).abs() < 1e-12);
        assert_eq!(key.modal(), 2.0);

        let key = FuzzyNumber::new(0.0, 2.0, 4.0).rank_key();
        assert!((key.primary() - 1.7639320225002102).abs() < 1e-12);
        assert!((key.secondary() - 0.5278640450004206).abs() < 1e-12);
    }

    #[test]
    fn test_rank_key_crisp() {
        let key = crisp_number(5.0).rank_key();
        assert_eq!(key.primary(), 5.0);
        assert_eq!(key.secondary(), 1.0);
        assert_eq!(key.modal(), 5.0);
    }

    #[test]
    fn test_ordering_by_rank() {
        let narrow = FuzzyNumber::new(1.0, 2.0, 3.0);
        let wide = FuzzyNumber::new(0.0, 2.0, 4.0);
        assert!(wide < narrow);
        assert!(narrow > wide);
        assert!(narrow >= narrow.clone());
        assert!(crisp_number(1.0) < crisp_number(2.0));
        assert_eq!(wide.rank_cmp(&narrow), Ordering::Less);
    }

    #[test]
    fn test_equality_differs_from_rank_equivalence() {
        let a = FuzzyNumber::new(0.0, 1.0, 2.0);
        let b = FuzzyNumber::new(1e-20, 1.0, 2.0);
        assert!(a != b);
        assert_eq!(a.rank_key(), b.rank_key());
        assert!(a.is_rank_equivalent(&b));
        assert!(!(a < b) && !(a > b));
        assert_eq!(a.partial_cmp(&b), None);
        assert_eq!(a.partial_cmp(&a.clone()), Some(Ordering::Equal));
    }

    #[test]
    fn test_rank_cache_invalidated_on_mutation() {
        let mut x = crisp_number(1.0);
        let before = x.rank_key();
        x += crisp_number(1.0);
        let after = x.rank_key();
        assert_ne!(before, after);
        assert_eq!(after, crisp_number(2.0).rank_key());

        x *= crisp_number(-1.0);
        assert_eq!(x.rank_key(), crisp_number(-2.0).rank_key());
        x -= crisp_number(1.0);
        assert_eq!(x.rank_key(), crisp_number(-3.0).rank_key());
    }

    #[test]
    fn test_clone_keeps_cached_key() {
        let x = FuzzyNumber::new(1.0, 2.0, 3.0);
        let key = x.rank_key();
        let y = x.clone();
        assert_eq!(y.rank.get(), Some(key));
    }
}
