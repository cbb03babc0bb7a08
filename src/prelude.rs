//! Prelude module for bs_calendar crate.
//!
//! Re-exports the derive_more macros used across modules.

pub use derive_more::Display;
