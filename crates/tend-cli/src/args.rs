use std::net::SocketAddr;

use clap::{Args as ClapArgs, Parser, Subcommand};
use tend_core::config::{
    ApiUrl, DatabaseUrl, API_URL_ENV, BIND_ENV, DATABASE_URL_ENV, DEFAULT_BIND,
};

use crate::cli::{RoutineCommands, RunArgs};

/// Self-care routine tracker
///
/// Tend keeps routines of timed steps, optionally paired with a playlist, on
/// a small HTTP service. The client commands talk to that service; `serve`
/// starts it.
#[derive(Parser)]
#[command(version, about, name = "tend")]
pub struct Args {
    /// Base URL of the routine API, e.g. http://127.0.0.1:5001/api
    #[arg(long, env = API_URL_ENV, global = true)]
    pub api_url: Option<ApiUrl>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Do not show step completion notifications
    #[arg(long, global = true)]
    pub no_notify: bool,

    /// Store step completions reached during `run` on the server
    #[arg(long, global = true)]
    pub persist_completion: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Tend CLI
///
/// - `routine`: manage routines and their steps
/// - `run`: walk through a routine with step timers
/// - `serve`: start the routine API
#[derive(Subcommand)]
pub enum Commands {
    /// Manage routines
    #[command(alias = "r")]
    Routine {
        #[command(subcommand)]
        command: RoutineCommands,
    },
    /// Walk through a routine step by step with countdown timers
    Run(RunArgs),
    /// Start the routine API server
    Serve(ServeArgs),
}

/// Start the routine API server
#[derive(ClapArgs)]
pub struct ServeArgs {
    /// Storage connection string: sqlite://<path> or a plain file path
    #[arg(long, env = DATABASE_URL_ENV)]
    pub database_url: DatabaseUrl,

    /// Address to listen on
    #[arg(long, env = BIND_ENV, default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,
}
