//! # u-fuzzy
//!
//! Triangular fuzzy numbers for the U-Engine ecosystem.
//!
//! This crate provides a triangular fuzzy number type with fuzzy
//! arithmetic and a ranking-based order, and a multiset of such numbers
//! that keeps its arithmetic mean available in constant time.
//!
//! ## Modules
//!
//! - [`fuzzy`] — [`FuzzyNumber`], its rank key, and crisp embeddings
//! - [`stats`] — Running componentwise sums and means
//! - [`collections`] — [`FuzzyNumberMultiset`]
//!
//! ## Design Philosophy
//!
//! - **Values, not validation**: any three reals form a fuzzy number; they
//!   are sorted, never rejected
//! - **Two relations kept apart**: `==` compares components, the order
//!   compares rank keys
//! - **Property-based testing**: arithmetic and aggregate invariants
//!   verified via proptest
//!
//! ## Example
//!
//! ```
//! use u_fuzzy::{crisp_number, FuzzyNumber, FuzzyNumberMultiset, CRISP_ZERO};
//!
//! let a = FuzzyNumber::new(1.0, 2.0, 3.0);
//! let b = FuzzyNumber::new(0.0, 2.0, 4.0);
//! assert_eq!(a.clone() + CRISP_ZERO, a);
//! assert!(b < a);
//!
//! let set: FuzzyNumberMultiset = [a, b, crisp_number(2.0)].into();
//! assert_eq!(set.arithmetic_mean(), Ok(FuzzyNumber::new(1.0, 2.0, 3.0)));
//! ```

pub mod collections;
pub mod fuzzy;
pub mod stats;

pub use collections::{EmptyCollectionError, FuzzyNumberMultiset};
pub use fuzzy::{crisp_number, FuzzyNumber, RankKey, CRISP_ZERO};
