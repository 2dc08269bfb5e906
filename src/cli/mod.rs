//! Command line interface

pub mod cluster;
pub mod commands;
pub mod display;
pub mod prompt;

pub use commands::{CliArgs, Commands, GlobalArgs};
