//! CLI argument definitions for the Userdesk binary.

use clap::{Parser, Subcommand};
use userdesk::{
    Role,
    constants::{DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_TOKEN, DEFAULT_USERNAME},
};

/// Userdesk user management server
#[derive(Parser, Debug)]
#[command(name = "userdesk")]
#[command(about = "Userdesk: in-memory user management with a REST API")]
#[command(version)]
pub struct Cli {
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Userdesk server
    Serve(ServeArgs),
    /// Check health of a running Userdesk server
    Health(HealthArgs),
    /// Log in to a running server and print the token
    Login(RemoteArgs),
    /// Manage users on a running server
    #[command(subcommand)]
    Users(UsersCommand),
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "USERDESK_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = DEFAULT_HOST, env = "USERDESK_HOST")]
    pub host: String,

    /// Username accepted by POST /login
    #[arg(long, default_value = DEFAULT_USERNAME, env = "USERDESK_USERNAME")]
    pub username: String,

    /// Password accepted by POST /login
    #[arg(long, default_value = DEFAULT_PASSWORD, env = "USERDESK_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Bearer token issued on login
    #[arg(long, default_value = DEFAULT_TOKEN, env = "USERDESK_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Start with an empty store instead of the three seed users
    #[arg(long)]
    pub empty: bool,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Base URL of the server
    #[arg(long, default_value = "http://127.0.0.1:5000", env = "USERDESK_URL")]
    pub url: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}

/// Connection settings shared by client commands
#[derive(clap::Args, Debug, Clone)]
pub struct RemoteArgs {
    /// Base URL of the server
    #[arg(long, default_value = "http://127.0.0.1:5000", env = "USERDESK_URL")]
    pub url: String,

    /// Bearer token; when absent the client logs in first
    #[arg(long, env = "USERDESK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Username used to log in
    #[arg(long, default_value = DEFAULT_USERNAME, env = "USERDESK_USERNAME")]
    pub username: String,

    /// Password used to log in
    #[arg(long, default_value = DEFAULT_PASSWORD, env = "USERDESK_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List all users
    List {
        #[command(flatten)]
        remote: RemoteArgs,
    },
    /// Show one user
    Get {
        id: String,
        #[command(flatten)]
        remote: RemoteArgs,
    },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// User or Admin (defaults to User)
        #[arg(long)]
        role: Option<Role>,
        #[command(flatten)]
        remote: RemoteArgs,
    },
    /// Update the given fields of a user
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[command(flatten)]
        remote: RemoteArgs,
    },
    /// Delete a user
    Delete {
        id: String,
        #[command(flatten)]
        remote: RemoteArgs,
    },
}
