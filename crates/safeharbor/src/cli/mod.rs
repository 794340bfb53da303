//! Command-line interface for safeharbor.
//!
//! This module provides the CLI structure for the `safeharbor` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, ContactsCommand, PlanCommand, PlanFieldArg, ResourcesCommand, StatusCommand,
};

/// safeharbor - Keep your emergency contacts and safety plan close
///
/// Everything is stored locally on this device. Nothing is sent anywhere.
#[derive(Debug, Parser)]
#[command(name = "safeharbor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage emergency contacts
    #[command(subcommand)]
    Contacts(ContactsCommand),

    /// View or edit your safety plan
    #[command(subcommand)]
    Plan(PlanCommand),

    /// List crisis hotlines
    Hotlines(ResourcesCommand),

    /// List support organizations
    Resources(ResourcesCommand),

    /// Learn about domestic violence and options for getting help
    Learn(ResourcesCommand),

    /// Show what is stored and where
    Status(StatusCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
