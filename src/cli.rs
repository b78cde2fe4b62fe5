//! Command-line interface definition for Moviedesk
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for authentication and the movie catalog.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Moviedesk - terminal client for the movie catalog
///
/// Log in, register, and browse or manage the catalog from the shell.
#[derive(Parser, Debug, Clone)]
#[command(name = "moviedesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/moviedesk.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the backend base URL (e.g. http://localhost:9012/api)
    #[arg(long, env = "MOVIEDESK_API_URL")]
    pub api_url: Option<String>,

    /// Store the session in this file instead of the configured backend
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Moviedesk
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in and store the session
    Login {
        /// Account name
        #[arg(short, long)]
        username: String,

        /// Password (prompted for when omitted)
        #[arg(short, long, env = "MOVIEDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        /// Account name
        #[arg(short, long)]
        username: String,

        /// Contact email address
        #[arg(short, long)]
        email: String,

        /// Password (prompted for when omitted)
        #[arg(short, long, env = "MOVIEDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show whether a session is active
    Status,

    /// List registered users
    Users {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse or manage the movie catalog
    Movies {
        /// Movie subcommand
        #[command(subcommand)]
        command: MovieCommand,
    },

    /// Navigate to a screen by path (login, register, movies)
    Open {
        /// Path of the screen, e.g. `/movies`
        #[arg(default_value = "/")]
        path: String,
    },
}

/// Movie catalog subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum MovieCommand {
    /// List the catalog
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one movie by backend id
    Show {
        /// Backend id of the movie
        id: String,

        /// Print JSON instead of details
        #[arg(long)]
        json: bool,
    },

    /// Import a movie by IMDb id (admin only)
    Add {
        /// IMDb id, e.g. tt0133093
        imdb_id: String,

        /// OMDb API key to forward instead of the configured one
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Delete a movie by backend id (admin only)
    Delete {
        /// Backend id of the movie
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
