pub mod cli;
pub mod commands;
pub mod logging;
pub mod report;

pub use cli::{CalculateArgs, Cli, Command, SeedArgs};
pub use commands::{calculate, Calculation};
