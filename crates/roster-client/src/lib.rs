pub mod api;
pub mod cli;
pub mod config;
pub mod http;
pub mod state;
pub mod store;
pub mod view;

#[cfg(test)]
mod testing;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use dialoguer::Confirm;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::{Cli, Command, Console, Outcome};
use crate::config::ClientConfig;
use crate::http::HttpUsersApi;
use crate::store::Store;

pub async fn run() -> anyhow::Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("roster_client_lib=info,warn"));

    // stdout carries the table; logs go to stderr.
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().with_api_url(cli.api_url);
    tracing::debug!(api_url = %config.api_url, "using server");

    let store = Store::new(HttpUsersApi::new(config.api_url));
    let mut console = Console::new(&store, io::stdout());

    let outcome = console
        .execute(cli.command.unwrap_or(Command::List), confirm_on_terminal)
        .await?;

    Ok(match outcome {
        Outcome::Done | Outcome::Cancelled => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::FAILURE,
    })
}

/// Anything but an explicit yes, including a non-interactive terminal,
/// counts as no.
fn confirm_on_terminal(prompt: &str) -> bool {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}
