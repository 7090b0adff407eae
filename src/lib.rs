//! Shared helpers for the Advent of Code 2021 day programs.
//!
//! Each `src/bin/dayNN.rs` is an independent program; this crate only
//! holds the leaf utilities they have in common.

pub mod error;
pub mod input;
pub mod logging;
pub mod scaffold;
pub mod stringset;

pub use error::Error;
pub use input::Inputs;
pub use stringset::StringSet;
