//! loginflow - sign in to the authentication service from a terminal.
//!
//! Prompts for a username and password, submits them once, and on success
//! keeps the returned session token in the configured session store.

mod cli;
mod view;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use loginflow_core::{AuthResult, Config, Credentials, LoginClient, LoginFlow, Settings, StoreKind};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Command, StoreArg};
use view::Dashboard;

/// Directory for log files; logs go to stderr when unset
const ENV_LOG_DIR: &str = "LOGINFLOW_LOG_DIR";

/// Log file name prefix inside `LOGINFLOW_LOG_DIR`
const LOG_FILE_PREFIX: &str = "loginflow.log";

const ENV_USERNAME: &str = "LOGINFLOW_USERNAME";
const ENV_PASSWORD: &str = "LOGINFLOW_PASSWORD";

/// Initialize the tracing subscriber for logging
fn init_tracing() -> WorkerGuard {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = std::env::var(ENV_LOG_DIR).ok().filter(|d| !d.is_empty());
    let to_file = log_dir.is_some();
    let (writer, guard) = match log_dir {
        Some(dir) => tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX)),
        None => tracing_appender::non_blocking(io::stderr()),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(!to_file))
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing();

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        Config::default()
    });

    match cli.command {
        Command::Login { username, store } => login(&mut config, username, store).await,
        Command::Status { store } => status(&config, store),
        Command::Logout { store } => logout(&config, store),
    }
}

fn store_kind(config: &Config, arg: Option<StoreArg>) -> StoreKind {
    arg.map(StoreKind::from).unwrap_or(config.session_store)
}

async fn login(
    config: &mut Config,
    username: Option<String>,
    store: Option<StoreArg>,
) -> Result<ExitCode> {
    let settings = Settings::from_env()?;
    let kind = store_kind(config, store);
    let store = kind.open(config.cache_dir()?)?;

    let username = match username.or_else(|| std::env::var(ENV_USERNAME).ok()) {
        Some(name) => name,
        None => prompt_username(config.last_username.as_deref())?,
    };
    let password = match std::env::var(ENV_PASSWORD) {
        Ok(password) => password,
        Err(_) => rpassword::prompt_password("Password: ")?,
    };
    let credentials = Credentials::new(username, password);

    let client = LoginClient::new(&settings)?;
    info!(endpoint = %client.endpoint(), store = %kind, "Submitting credentials");

    let mut flow = LoginFlow::new(client, store, Dashboard::default());
    let result = flow.submit(&credentials).await;

    if let AuthResult::Failure(e) = result {
        eprintln!("{}", view::failure_notice(&e));
        eprintln!("{}", view::registration_hint(settings.base_url.as_str()));
        return Ok(ExitCode::FAILURE);
    }

    config.last_username = Some(credentials.username().to_string());
    config.session_store = kind;
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }

    let (store, dashboard) = flow.into_parts();
    if dashboard.entered() {
        println!("{}", view::session_summary(&*store));
    }
    Ok(ExitCode::SUCCESS)
}

fn status(config: &Config, store: Option<StoreArg>) -> Result<ExitCode> {
    let store = store_kind(config, store).open(config.cache_dir()?)?;
    println!("{}", view::session_summary(&*store));
    if let Some(ref user) = config.last_username {
        println!("Last username: {}", user);
    }
    Ok(if store.is_authenticated() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn logout(config: &Config, store: Option<StoreArg>) -> Result<ExitCode> {
    let mut store = store_kind(config, store).open(config.cache_dir()?)?;
    let was_signed_in = store.is_authenticated();
    store.clear();
    info!(was_signed_in, "Session cleared");
    println!("Signed out.");
    Ok(ExitCode::SUCCESS)
}

fn prompt_username(last_username: Option<&str>) -> Result<String> {
    match last_username {
        Some(last) => print!("Username [{}]: ", last),
        None => print!("Username: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read username")?;
    let input = input.trim();

    Ok(match last_username {
        Some(last) if input.is_empty() => last.to_string(),
        _ => input.to_string(),
    })
}
