//! Terminal shell for the allocation calculator.
//!
//! Each run loads the saved state, applies at most one change, saves it
//! back (best effort) and renders the breakdown.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod render;
pub mod utils;
