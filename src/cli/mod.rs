//! CLI module - Command-line interface for Betapool
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Betapool - Beta account signup service
/// Hands out pre-provisioned beta accounts to survey applicants
#[derive(Parser)]
#[command(name = "betapool")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the signup web service
    #[command(alias = "-d", alias = "--daemon")]
    Daemon,

    /// Show pool and submission counts
    #[command(alias = "st")]
    Status,

    /// List every beta account and its assignment
    #[command(alias = "ls")]
    Accounts,

    /// Show recent survey submissions
    #[command(alias = "sub")]
    Submissions {
        /// Number of entries to show
        #[arg(default_value = "50")]
        limit: u64,
    },

    /// Return every account to the pool
    Reset,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
