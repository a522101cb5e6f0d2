//! Tend CLI application
//!
//! Terminal front-end of the routine tracker and launcher of the routine API.

mod args;
mod cli;
mod notify;
mod renderer;
mod session;

use anyhow::{Context, Result};
use args::{Args, Commands, ServeArgs};
use clap::Parser;
use cli::Cli;
use log::info;
use notify::TerminalNotifier;
use renderer::TerminalRenderer;
use tend_core::{
    config::{ApiUrl, API_URL_ENV},
    HttpRoutineApi, RoutineCatalog, RoutineStoreBuilder,
};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        api_url,
        no_color,
        no_notify,
        persist_completion,
        command,
    } = Args::parse();

    let connect = || client(api_url, no_color, no_notify, persist_completion);

    match command {
        Some(Routine { command }) => connect()?.handle_routine_command(command).await,
        Some(Run(args)) => connect()?.run_routine(args).await,
        Some(Serve(args)) => serve(args).await,
        None => connect()?.list_routines().await,
    }
}

fn client(
    api_url: Option<ApiUrl>,
    no_color: bool,
    no_notify: bool,
    persist_completion: bool,
) -> Result<Cli<HttpRoutineApi, TerminalNotifier>> {
    let api_url = api_url.with_context(|| {
        format!("No routine API configured. Pass --api-url or set {API_URL_ENV}")
    })?;
    let api = HttpRoutineApi::new(api_url).context("Failed to create routine API client")?;

    let renderer = TerminalRenderer::new(!no_color);
    let notifier = TerminalNotifier::new(renderer.clone(), !no_notify);
    info!("Using routine API at {}", api.base_url());

    Ok(Cli::new(RoutineCatalog::new(api, notifier), renderer)
        .with_persist_completion(persist_completion))
}

async fn serve(args: ServeArgs) -> Result<()> {
    let store = RoutineStoreBuilder::new()
        .with_database_path(args.database_url.path())
        .build()
        .await
        .context("Failed to initialize routine store")?;

    info!("Starting routine API with database {}", args.database_url);
    tend_server::serve(args.bind, store)
        .await
        .context("Routine API server failed")
}
