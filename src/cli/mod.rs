//! CLI commands

pub mod args;
pub mod context;

pub use args::Args;
pub use context::CommandContext;
