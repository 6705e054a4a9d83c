//! Command-line arguments.

use std::ffi::OsString;
use std::net::IpAddr;
use std::path::PathBuf;

use batch::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use common::Selector;
use tracing::Level;
use tracing::metadata::LevelFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
        .into()
    }
}

#[derive(Debug, Parser)]
#[command(name = "ipdata", author, version, about = "CLI for IPData API", long_about = None)]
pub struct Cli {
    /// IPData API Key
    #[arg(long, global = true)]
    pub api_key: Option<String>,
    #[arg(long, value_enum, global = true, default_value = "warn")]
    pub log_level: LogLevel,
    /// Comma separated list of fields to extract (when no subcommand is given)
    #[arg(long)]
    pub fields: Option<String>,
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Look up a single IP address
    Ip {
        ip: IpAddr,
        /// Comma separated list of fields to extract
        #[arg(long)]
        fields: Option<String>,
    },
    /// Look up your own IP address
    Me {
        /// Comma separated list of fields to extract
        #[arg(long)]
        fields: Option<String>,
    },
    /// Look up every address in a newline separated file
    Batch {
        ip_list: PathBuf,
        /// Output to file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Format of output: json or csv
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,
        /// Comma separated list of fields to extract
        #[arg(long)]
        fields: Option<String>,
        /// Number of lookups in flight at once
        #[arg(long, default_value_t = 1)]
        concurrency: usize,
    },
    /// Validate an API key and store it for later use
    Init {
        #[arg(value_name = "API_KEY")]
        key: String,
    },
    /// Show how many requests have been made with the API key
    Info,
}

/// Parses a `--fields` value into selectors.
pub fn selectors(fields: Option<&str>) -> Vec<Selector> {
    fields.map(Selector::parse_list).unwrap_or_default()
}

/// Rewrites `ipdata <ADDR> ...` into `ipdata ip <ADDR> ...`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    let first_is_ip = args
        .get(1)
        .and_then(|arg| arg.to_str())
        .is_some_and(|arg| arg.parse::<IpAddr>().is_ok());
    if first_is_ip {
        args.insert(1, OsString::from("ip"));
    }
    args
}
