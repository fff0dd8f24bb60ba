//! Command-line argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use mongery_config_build::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mongery",
    about = "Generate serialized field path constants for @Entity structs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Explicit log level (overrides -v/-q).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "compact",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan the configured tree and write field path constant files.
    Generate(GenerateArgs),

    /// Print the mongery version.
    Version,
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Config file to load.
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "MONGERY_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Scan root, overriding `basedir` from the config file.
    #[arg(long, value_name = "DIR")]
    pub basedir: Option<PathBuf>,

    /// List the files that would be written without writing them.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from(["mongery", "generate"]).unwrap();

        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        // MONGERY_CONFIG may be set in the environment running the tests
        if std::env::var_os("MONGERY_CONFIG").is_none() {
            assert_eq!(args.config, PathBuf::from(".mongery.toml"));
        }
        assert!(args.basedir.is_none());
        assert!(!args.dry_run);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mongery",
            "generate",
            "--basedir",
            "src",
            "--dry-run",
            "-vv",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.basedir, Some(PathBuf::from("src")));
        assert!(args.dry_run);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["mongery", "-q", "-v", "version"]).is_err());
    }
}
