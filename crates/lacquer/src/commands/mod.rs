//! CLI subcommands.

pub mod lint;
pub mod rules;
