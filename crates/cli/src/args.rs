use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use shopseed_infra::{FailurePolicy, SeederConfig};
use shopseed_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(
    name = "shopseed",
    about = "Seed demo inventory with variant SKUs expanded from the catalog",
    version
)]
pub struct Cli {
    #[arg(long, help = "Directory containing inventory.json and products.json")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, help = "Inventory database URL (overrides INVENTORY_SERVICE_DATABASE_URL)")]
    pub database_url: Option<String>,

    #[arg(
        long,
        action = ArgAction::SetTrue,
        help = "Expand into memory and print the rows instead of writing to the database"
    )]
    pub dry_run: bool,

    #[arg(
        long,
        action = ArgAction::SetTrue,
        help = "Abort the run when any record cannot be expanded"
    )]
    pub halt_on_invalid: bool,

    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty, help = "Log output format")]
    pub log_format: LogFormatArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Json,
    Pretty,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Pretty => LogFormat::Pretty,
        }
    }
}

impl Cli {
    /// Layer command-line flags over an environment-derived config.
    pub fn apply(&self, mut config: SeederConfig) -> SeederConfig {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(url) = &self.database_url {
            config.database_url = Some(url.clone());
        }
        if self.halt_on_invalid {
            config.failure_policy = FailurePolicy::Halt;
        }
        config
    }

    /// Whether rows stay in memory rather than going to a database.
    pub fn in_memory(&self, config: &SeederConfig) -> bool {
        self.dry_run || config.database_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "shopseed",
            "--data-dir",
            "/tmp/seed",
            "--database-url",
            "postgres://localhost/inventory",
            "--halt-on-invalid",
        ]);

        let config = cli.apply(SeederConfig::default());

        assert_eq!(config.data_dir, PathBuf::from("/tmp/seed"));
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/inventory"));
        assert_eq!(config.failure_policy, FailurePolicy::Halt);
        assert!(!cli.in_memory(&config));
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = Cli::parse_from(["shopseed"]);
        let base = SeederConfig {
            database_url: Some("postgres://db/inventory".into()),
            ..SeederConfig::default()
        };

        let config = cli.apply(base.clone());

        assert_eq!(config, base);
        assert!(matches!(cli.log_format, LogFormatArg::Pretty));
    }

    #[test]
    fn dry_run_or_missing_url_stays_in_memory() {
        let cli = Cli::parse_from(["shopseed", "--dry-run"]);
        let with_url = SeederConfig {
            database_url: Some("postgres://db/inventory".into()),
            ..SeederConfig::default()
        };
        assert!(cli.in_memory(&with_url));

        let cli = Cli::parse_from(["shopseed"]);
        assert!(cli.in_memory(&SeederConfig::default()));
    }
}
