//! Core business logic module
//!
//! This module contains the pure split computation:
//! - `engine` - the split computation itself
//! - `settlement` - settlement transaction construction

pub mod engine;
pub mod settlement;

pub use engine::compute_split;
pub use settlement::build_transactions;
