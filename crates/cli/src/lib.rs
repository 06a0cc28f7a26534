//! # Okta Role Manager CLI
//!
//! Subcommands for querying role inheritance from the command line.

pub mod commands;
