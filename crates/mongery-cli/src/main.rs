//! The `mongery` command-line tool.

mod cli;
mod logging;

use crate::{
    cli::{Cli, Command, GenerateArgs, LogFormatArg, LogLevelArg},
    logging::{LogConfig, LogFormat, init_logging},
};
use clap::Parser;
use mongery_build::emit::WriteMode;
use mongery_config_build::Config;
use std::{
    error::Error,
    io::{self, IsTerminal},
    process,
};
use tracing::{Level, info};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let cli = Cli::parse();
    init_logging(&log_config_from_cli(&cli));

    let result = match cli.command {
        Command::Generate(args) => run_generate(&args),
        Command::Version => {
            println!("mongery version {VERSION}");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

// run_generate
fn run_generate(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load(&args.config)?;
    if let Some(basedir) = &args.basedir {
        config.basedir.clone_from(basedir);
        config.validate()?;
    }

    info!(config = %args.config.display(), "config loaded");

    if args.dry_run {
        for unit in mongery_build::plan(&config)? {
            let mode = match unit.mode {
                WriteMode::Create => "create",
                WriteMode::Append => "append",
            };
            println!("{mode} {}", unit.path.display());
        }

        return Ok(());
    }

    let report = mongery_build::generate(&config)?;
    info!(
        entities = report.entities,
        files = report.outputs.len(),
        "generation complete"
    );

    Ok(())
}

// log_config_from_cli
// --log-level beats -q, which beats -v; explicit flags disable RUST_LOG
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.is_some() || cli.quiet || cli.verbose > 0;

    let level = match cli.log_level {
        Some(LogLevelArg::Error) => Level::ERROR,
        Some(LogLevelArg::Warn) => Level::WARN,
        Some(LogLevelArg::Info) => Level::INFO,
        Some(LogLevelArg::Debug) => Level::DEBUG,
        Some(LogLevelArg::Trace) => Level::TRACE,
        None if cli.quiet => Level::ERROR,
        None => LogConfig::from_verbosity(cli.verbose).level,
    };

    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };

    LogConfig::default()
        .with_level(level)
        .with_format(format)
        .with_ansi(io::stderr().is_terminal())
        .with_env_filter(!explicit)
}
