mod args;
mod commands;
mod config_cmd;
mod output;
mod util;

pub use args::Cli;
