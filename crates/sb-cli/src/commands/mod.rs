//! CLI subcommand implementations.

pub mod check;
pub mod parse;
pub mod util;
