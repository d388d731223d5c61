//! Prelude module for repeat_rule crate.
//!
//! Re-exports the derive macros from derive_more that the rule types use.

pub use derive_more::Display;
