//! Command-line argument parsing for reportrag
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// reportrag - Retrieve reference reports similar to a query
#[derive(Parser, Debug)]
#[command(name = "reportrag")]
#[command(version)]
#[command(about = "Retrieve reference radiology reports by lexical similarity", long_about = None)]
pub struct Args {
    /// Free-text query (indication, findings, ...)
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Report type to search, or `all`
    #[arg(short = 't', long, default_value = "all")]
    pub report_type: String,

    /// Number of reports to return (configured default when omitted)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Knowledge base directory (overrides configuration)
    #[arg(long, value_name = "DIR")]
    pub kb: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only print results and errors)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List report categories in the knowledge base
    Categories,

    /// Show the category and parsed sections of one report file
    Inspect {
        /// Report file to parse
        file: PathBuf,
    },

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Check that a query and a subcommand are not mixed
    pub fn validate(&self) -> Result<(), String> {
        if self.command.is_some() && self.query.is_some() {
            return Err("Cannot specify a query with a subcommand.".to_string());
        }

        Ok(())
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Parse the configuration spelling
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Tracing filter directive for this level
    pub fn log_level(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }
}
