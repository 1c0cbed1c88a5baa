//! CLI subcommand implementations.

pub mod launches;
pub mod thumbnail;
