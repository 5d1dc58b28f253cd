use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wfm_api::{ApiError, Client};
use wfm_cli::flow::{self, Options};
use wfm_cli::prompt::Prompter;
use wfm_cli::theme::Theme;
use wfm_cli::{Cli, Config, ConfigError, TUTORIAL};

/// Explains how to write the config file; nothing else can run without it.
fn print_config_help(err: &ConfigError) {
    match err {
        ConfigError::Missing { path } => {
            println!("Please make a config file at {}\n\n{TUTORIAL}", path.display());
        }
        other => println!("{other}\n\n{TUTORIAL}"),
    }
}

/// Prints the raw body of an unparseable response, if one caused `err`.
fn print_raw_body(err: &anyhow::Error) {
    if let Some(body) = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ApiError>())
        .and_then(ApiError::raw_body)
    {
        eprintln!("{body}");
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with prompts.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = match Config::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            tracing::debug!(error = %err, "configuration unusable");
            print_config_help(&err);
            return Ok(ExitCode::from(1));
        }
    };
    tracing::debug!(?config, "loaded configuration");

    let result = Client::connect(config.credentials())
        .context("failed to connect to WorkflowMax")
        .and_then(|client| {
            let theme = Theme::detect(cli.no_color);
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock(), theme);
            let options = Options {
                pick_day: cli.pick_day,
            };
            flow::run(&client, &mut prompter, Local::now().date_naive(), options)
        });

    match result {
        Ok(outcome) => Ok(ExitCode::from(outcome.exit_status())),
        Err(err) => {
            print_raw_body(&err);
            Err(err)
        }
    }
}
