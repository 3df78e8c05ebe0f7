mod cli;
mod commands;
mod config;
mod output;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use cli::{Cli, Commands};
use config::Profile;
use fetchdeck_core::{ApiClient, Session};
use output::TermSink;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut profile = Profile::load();
    tracing::debug!(path = ?Profile::default_path(), "loaded profile");
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| profile.base_url.clone())
        .context("no base URL configured; pass --base-url or set FETCHDECK_BASE_URL")?;
    let base_url = Url::parse(&base_url).context("invalid base URL")?;

    let session = match profile.access_token.clone() {
        Some(token) => Session::with_token(token),
        None => Session::new(),
    };
    let client = build_client(&base_url, session);

    match cli.command {
        Commands::Login { username } => {
            // Remember where we signed in, so later commands need no flag.
            profile.base_url = Some(base_url.to_string());
            commands::auth::login(&client, &mut profile, &username).await
        }
        Commands::Task { command } => commands::task::run(&client, command).await,
        Commands::Run { id } => commands::run::trigger(&client, id).await,
        Commands::Schedule { id, off } => commands::run::schedule(&client, id, off).await,
        Commands::Logs { id, follow } => commands::run::logs(&client, id, follow).await,
        Commands::ChangePassword => commands::auth::change_password(&client).await,
    }
}

fn build_client(base_url: &Url, session: Session) -> ApiClient {
    ApiClient::new(base_url.clone(), session, Arc::new(TermSink))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_construction_leaves_the_base_url_usable() {
        let base_url = Url::parse("http://localhost:9000/").unwrap();
        let _client = build_client(&base_url, Session::new());
        // The login flow still records this URL after the client exists.
        assert_eq!(base_url.to_string(), "http://localhost:9000/");
    }
}
