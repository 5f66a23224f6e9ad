//! dd-conf-gen: Datadog Agent config generator
//!
//! Discovers ElastiCache Redis topology by AWS tags and writes Datadog Agent
//! check configs, either through user templates (`generate`) or the built-in
//! `redisdb` check generator.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ddconf_common::defaults::{DEFAULT_LOG_LEVEL, ELASTICACHE_REDIS_PROVIDER};
use ddconf_gen::aws::AwsError;
use ddconf_gen::checks::redisdb::{self, RedisDbConfig};
use ddconf_gen::error::DiscoveryError;
use ddconf_gen::{ProviderRegistry, orchestrator};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dd-conf-gen")]
#[command(about = "Generate Datadog Agent configs from AWS ElastiCache topology")]
#[command(version)]
struct Args {
    /// Base log level; RUST_LOG directives are applied on top
    #[arg(long, value_enum, default_value = DEFAULT_LOG_LEVEL, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover resources and render every output in a generation config
    Generate {
        /// Generation config file
        #[arg(short, long, env = "DD_CONF_GEN_CONFIG")]
        config: PathBuf,
    },

    /// Generate a redisdb check config for tagged ElastiCache Redis nodes
    Redisdb {
        /// Check generator config (a missing file means environment only)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the config here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List registered resource provider types
    Providers,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// AWS SDK crates log request internals at info; keep them quiet.
const AWS_TARGETS: &[&str] = &[
    "aws_config",
    "aws_sdk_elasticache",
    "aws_sdk_resourcegroupstagging",
    "aws_smithy_runtime",
    "aws_smithy_http",
];

fn init_tracing(level: LogLevel) -> Result<()> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::from(level).into())
        .from_env_lossy();
    for target in AWS_TARGETS {
        filter = filter.add_directive(format!("{target}=warn").parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if let Some(hint) = aws_hint(e) {
        let _ = writeln!(stderr, "\n\x1b[36mHint:\x1b[0m {hint}");
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

/// Suggestion for the AWS error behind a failed discovery, if any.
fn aws_hint(e: &anyhow::Error) -> Option<String> {
    e.chain()
        .find_map(|cause| cause.downcast_ref::<DiscoveryError>())
        .and_then(DiscoveryError::aws_error)
        .and_then(AwsError::suggestion)
}

async fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level)?;

    let registry = ProviderRegistry::with_default_providers();

    match args.command {
        Command::Generate { config } => {
            let summary = orchestrator::run(&config, &registry).await?;
            for (name, count) in &summary.resources {
                info!(resource = %name, nodes = count, "Resource summary");
            }
            info!(
                outputs = summary.outputs.len(),
                "Configuration generation completed"
            );
        }

        Command::Redisdb { config, output } => {
            let check_config = RedisDbConfig::load(config.as_deref())
                .context("failed to load config")?;
            let provider = registry.get(ELASTICACHE_REDIS_PROVIDER)?;
            let yaml = redisdb::run(&check_config, provider.as_ref()).await?;

            match output {
                Some(path) => {
                    orchestrator::write_output(&path, yaml.as_bytes())?;
                    info!(output_file = %path.display(), "Wrote redisdb config");
                }
                None => {
                    std::io::stdout()
                        .write_all(yaml.as_bytes())
                        .context("failed to write to stdout")?;
                }
            }
        }

        Command::Providers => {
            let mut stdout = std::io::stdout();
            for resource_type in registry.resource_types() {
                writeln!(stdout, "{resource_type}")?;
            }
        }
    }

    Ok(())
}
