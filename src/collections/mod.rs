//! Collections of fuzzy numbers.

pub mod multiset;

pub use multiset::{EmptyCollectionError, FuzzyNumberMultiset};
