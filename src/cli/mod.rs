//! Command line interface module
//!
//! Parses arguments and runs a single status request against a store snapshot.

pub mod args;
pub mod runner;

pub use args::Args;
pub use runner::Runner;
