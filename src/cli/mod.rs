pub mod args;
pub mod commands;

pub use args::{Cli, Commands, FilterArgs, SourceArgs};
pub use commands::run;
