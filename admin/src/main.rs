use std::io;
use std::path::PathBuf;
use clap::Parser;
use pagegate::config::{env, file, layered};

mod command;

const ENV_PREFIX: &str = "PAGEGATE_";

/// Manage page access grants and site configuration variables.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// YAML config file; PAGEGATE_* environment variables take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: command::Command,
}

fn cfg_factory(path: Option<&PathBuf>) -> Result<layered::Config, String> {
    let cfg = layered::Config::default().with(env::new(ENV_PREFIX));
    Ok(match path {
        Some(path) => cfg.with(file::new(path)?),
        None => cfg,
    })
}

fn main() -> Result<(), String> {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = cfg_factory(cli.config.as_ref())?;
    let db = pagegate::db::open(&cfg)
        .map_err(|e| e.to_string())?;
    command::run(&db, &cli.command, &mut io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_config_flag() {
        let cli = Cli::try_parse_from([
            "pagegate-admin", "--config", "/etc/pagegate.yaml",
            "var", "list",
        ]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/pagegate.yaml")));
    }

    #[test]
    fn rejects_missing_subcommand() {
        assert!(Cli::try_parse_from(["pagegate-admin"]).is_err());
        assert!(Cli::try_parse_from(["pagegate-admin", "grant"]).is_err());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = cfg_factory(Some(&PathBuf::from("/nonexistent/cfg.yaml")))
            .unwrap_err();
        assert!(err.contains("/nonexistent/cfg.yaml"), "{err}");
    }
}
