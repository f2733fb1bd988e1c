//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, health), and their argument structs. Every `run` flag
//! has an environment variable equivalent for container deployments.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "toggleboard",
    version,
    about = "Feature toggle registry with package namespaces",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        toggleboard run                          Serve with an in-memory store\n  \
        toggleboard run -p 8080 --pretty         Local dev mode\n  \
        toggleboard health                       Probe a running instance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the feature toggle API server
    Run(Box<RunArgs>),

    /// Check health of a running instance
    Health(HealthArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        toggleboard run                                        In-memory store\n  \
        toggleboard run --mongodb-url mongodb://db:27017       MongoDB store\n  \
        toggleboard run --log-level debug --json               Verbose JSON logs")]
pub struct RunArgs {
    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // -- Storage --
    /// `MongoDB` connection URL (in-memory store when absent)
    #[cfg(feature = "mongodb")]
    #[arg(long, env = "MONGODB_URL", help_heading = "Storage")]
    pub mongodb_url: Option<String>,

    /// `MongoDB` database holding one collection per package
    #[cfg(feature = "mongodb")]
    #[arg(
        long,
        env = "MONGODB_DATABASE",
        default_value = crate::store::mongodb_store::DEFAULT_DATABASE,
        help_heading = "Storage"
    )]
    pub mongodb_database: String,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Tuning --
    /// Max request body size in bytes
    #[arg(
        long,
        env = "MAX_BODY_SIZE",
        default_value_t = 1_048_576,
        help_heading = "Tuning"
    )]
    pub max_body: usize,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:3000")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["toggleboard", "run"]).unwrap();
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run subcommand");
        };
        assert!(!args.json && !args.pretty);
    }

    #[test]
    fn run_accepts_explicit_flags() {
        let cli = Cli::try_parse_from([
            "toggleboard",
            "run",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
            "--log-level",
            "warn",
            "--json",
        ])
        .unwrap();
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(args.port, 8080);
        assert_eq!(args.host, "127.0.0.1");
        assert!(matches!(args.log_level, LogLevel::Warn));
        assert!(args.json);
    }

    #[test]
    fn pretty_and_json_conflict() {
        assert!(Cli::try_parse_from(["toggleboard", "run", "--pretty", "--json"]).is_err());
    }
}
