//! Library interface for the `msgctl` command-line tool.
//!
//! Exposes argument parsing and command execution so they can be exercised
//! without spawning the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod telemetry;
