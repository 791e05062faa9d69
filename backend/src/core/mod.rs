//! Core primitives shared by every component
//!
//! Currently just money: the currency representation and the two input
//! parsing paths (strict for store records, coercing for interactive
//! fields).

pub mod money;
