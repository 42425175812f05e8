//! Subcommands of the `boardgames` binary

pub mod evaluate;
pub mod play;
pub mod train;
