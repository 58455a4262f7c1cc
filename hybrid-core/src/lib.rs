//! Shared building blocks for the hybrid motor crates.
//!
//! - [`constraint`] validates numeric invariants once, at construction.
//! - [`units`] holds the quantity aliases the physics needs beyond `uom`'s
//!   built-in set, plus parsing of unit-bearing text such as `"1.75 in"`.

pub mod constraint;
pub mod units;
