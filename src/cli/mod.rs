//! Command Line Interface (CLI) layer for bandscale.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) that loads a band catalog and a
//! request, resolves scaling, and prints the result as JSON.
//!
//! If you are embedding bandscale into another application, prefer using
//! the high-level `bandscale::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
