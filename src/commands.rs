//! Subcommands of the `jt` binary that do not parse a document.
pub mod generate;
