//! `ipdata` entry point.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use cli::args::{self, Cli, Cmd};
use cli::commands::{self, BatchOptions};
use cli::{Config, Result};
use lookup::HttpLookup;
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn keyed_lookup(config: &Config, api_key: Option<&str>) -> Result<HttpLookup> {
    let api_key = config.resolve_api_key(api_key)?;
    config.http_lookup(api_key)
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env();
    let Cli {
        api_key,
        fields,
        cmd,
        ..
    } = cli;

    match cmd {
        Some(Cmd::Init { key }) => {
            let store = config.credential_store()?;
            let lookup = config.http_lookup(key.as_str())?;
            commands::init(&lookup, &store, &key, &mut io::stdout(), &mut io::stderr()).await
        }
        None => {
            let lookup = keyed_lookup(&config, api_key.as_deref())?;
            let selectors = args::selectors(fields.as_deref());
            commands::lookup_one(&lookup, None, selectors, &mut io::stdout()).await
        }
        Some(Cmd::Me { fields }) => {
            let lookup = keyed_lookup(&config, api_key.as_deref())?;
            let selectors = args::selectors(fields.as_deref());
            commands::lookup_one(&lookup, None, selectors, &mut io::stdout()).await
        }
        Some(Cmd::Ip { ip, fields }) => {
            let lookup = keyed_lookup(&config, api_key.as_deref())?;
            let selectors = args::selectors(fields.as_deref());
            let address = ip.to_string();
            commands::lookup_one(&lookup, Some(&address), selectors, &mut io::stdout()).await
        }
        Some(Cmd::Batch {
            ip_list,
            output,
            output_format,
            fields,
            concurrency,
        }) => {
            let options = BatchOptions {
                format: output_format,
                selectors: args::selectors(fields.as_deref()),
                concurrency,
            };
            commands::validate_batch(&options)?;
            let lookup = keyed_lookup(&config, api_key.as_deref())?;

            let input = std::fs::read_to_string(&ip_list)?;
            let out: Box<dyn Write + Send> = match output {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(io::stdout()),
            };

            let summary = commands::run_batch(lookup, &input, options, out).await?;
            tracing::info!(%summary, input = %ip_list.display(), "batch finished");
            Ok(())
        }
        Some(Cmd::Info) => {
            let lookup = keyed_lookup(&config, api_key.as_deref())?;
            commands::info(&lookup, &mut io::stdout()).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_from(args::normalize_args(std::env::args_os()));

    // Diagnostics go to stderr; stdout carries command output only.
    let default_level = LevelFilter::from(cli.log_level);
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
