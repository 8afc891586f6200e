//! Command-line arguments

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use unifind_domain::resources::{AccountKind, LostItemStatus};

/// Unifind - terminal client for the university lost & found and events API
#[derive(Parser, Debug)]
#[command(name = "unifind")]
#[command(author = "Unifind Team")]
#[command(version)]
#[command(about = "Lost & found and campus events from the terminal", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./unifind.toml and the user config dir)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// API base address, overriding the configuration
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Keep the session in memory only
    #[arg(long = "ephemeral", global = true)]
    pub ephemeral: bool,

    /// Page the command runs on, used for redirect decisions
    #[arg(long = "page", global = true)]
    pub page: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session
    Login {
        /// Account email
        #[arg(short = 'e', long = "email")]
        email: String,
        /// Account password
        #[arg(short = 'p', long = "password", env = "UNIFIND_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Drop the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// Ask the server whether the stored session is still valid
    Verify,
    /// Show whether a page would render for the current session
    Guard {
        /// Page path, e.g. /admin/usuarios
        #[arg(value_name = "PAGE")]
        target: String,
    },
    /// Found objects
    #[command(subcommand)]
    Lost(LostCommand),
    /// Calendar events
    #[command(subcommand)]
    Events(EventCommand),
    /// Account administration
    #[command(subcommand)]
    Users(UserCommand),
}

/// `lost` subcommands.
#[derive(Subcommand, Debug)]
pub enum LostCommand {
    /// List found objects
    List {
        /// Search text
        #[arg(short = 'q', long = "query")]
        query: Option<String>,
    },
    /// Show one object
    Show {
        /// Object id
        id: String,
    },
    /// Print the photo address of an object
    ImageUrl {
        /// Object id
        id: String,
    },
    /// Claim an object
    Claim {
        /// Object id
        id: String,
        /// Why the object is yours
        #[arg(short = 'n', long = "notes")]
        notes: String,
        /// Evidence files (repeatable)
        #[arg(short = 'f', long = "evidence", required = true)]
        evidence: Vec<PathBuf>,
    },
    /// Register a found object
    Create(LostFields),
    /// Edit an object
    Update {
        /// Object id
        id: String,
        /// Fields to change
        #[command(flatten)]
        fields: LostUpdateFields,
    },
    /// Delete an object
    Delete {
        /// Object id
        id: String,
    },
}

/// Fields of a new found object.
#[derive(Args, Debug)]
pub struct LostFields {
    /// Short title
    #[arg(long)]
    pub title: String,
    /// Where it was found
    #[arg(long = "location")]
    pub found_location: String,
    /// Description
    #[arg(long)]
    pub description: Option<String>,
    /// Contact information
    #[arg(long = "contact")]
    pub contact_info: Option<String>,
}

/// Optional fields of a found object.
#[derive(Args, Debug)]
pub struct LostUpdateFields {
    /// Short title
    #[arg(long)]
    pub title: Option<String>,
    /// Where it was found
    #[arg(long = "location")]
    pub found_location: Option<String>,
    /// Lifecycle status
    #[arg(long)]
    pub status: Option<LostItemStatus>,
    /// Description
    #[arg(long)]
    pub description: Option<String>,
    /// Contact information
    #[arg(long = "contact")]
    pub contact_info: Option<String>,
}

/// `events` subcommands.
#[derive(Subcommand, Debug)]
pub enum EventCommand {
    /// List events
    List,
    /// Show one event
    Show {
        /// Event id
        id: String,
    },
    /// Create an event
    Create(EventFields),
    /// Edit an event
    Update {
        /// Event id
        id: String,
        /// Fields to change
        #[command(flatten)]
        fields: EventUpdateFields,
    },
    /// Delete an event
    Delete {
        /// Event id
        id: String,
    },
}

/// Fields of a new event.
#[derive(Args, Debug)]
pub struct EventFields {
    /// Title
    #[arg(long)]
    pub title: String,
    /// Start, RFC 3339
    #[arg(long)]
    pub start: DateTime<Utc>,
    /// End, RFC 3339
    #[arg(long)]
    pub end: Option<DateTime<Utc>>,
    /// Venue
    #[arg(long)]
    pub location: Option<String>,
    /// Description
    #[arg(long)]
    pub description: Option<String>,
}

/// Optional fields of an event.
#[derive(Args, Debug)]
pub struct EventUpdateFields {
    /// Title
    #[arg(long)]
    pub title: Option<String>,
    /// Start, RFC 3339
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,
    /// End, RFC 3339
    #[arg(long)]
    pub end: Option<DateTime<Utc>>,
    /// Venue
    #[arg(long)]
    pub location: Option<String>,
    /// Description
    #[arg(long)]
    pub description: Option<String>,
}

/// `users` subcommands.
#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List accounts
    List,
    /// Show one account
    Show {
        /// Account id
        id: String,
    },
    /// Find an account by email
    Find {
        /// Email to look up
        #[arg(long)]
        email: String,
    },
    /// Create an account
    Create {
        /// Display name
        #[arg(long)]
        name: String,
        /// Login email
        #[arg(long)]
        email: String,
        /// Initial password
        #[arg(long, env = "UNIFIND_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        /// Account type: usuario or admin
        #[arg(long, default_value = "usuario")]
        kind: AccountKind,
    },
    /// Edit an account
    Update {
        /// Account id
        id: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Login email
        #[arg(long)]
        email: Option<String>,
        /// New password
        #[arg(long)]
        password: Option<String>,
        /// Account type
        #[arg(long)]
        kind: Option<AccountKind>,
    },
    /// Delete an account
    Delete {
        /// Account id
        id: String,
    },
}
