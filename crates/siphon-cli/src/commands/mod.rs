//! CLI command implementations.

pub mod batch;
pub mod check;
pub mod extract;
