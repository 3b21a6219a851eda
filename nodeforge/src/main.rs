// nodeforge/src/main.rs
use std::process;
use std::str::FromStr;

use clap::Parser;
use colored::Colorize;
use nodeforge_common::config::Config;
use nodeforge_common::error::{ForgeError, Result};
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::CliArgs;

fn init_logging(level: &str) -> Result<()> {
    let level_filter = LevelFilter::from_str(level)
        .map_err(|_| ForgeError::Usage(format!("Unknown log level '{level}'")))?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("NODEFORGE_LOG")
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .without_time()
        .try_init();
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    if let Err(e) = init_logging(&args.log) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(e.exit_code());
    }

    let config = Config::new(
        args.output,
        args.tmpdir,
        args.installdir,
        args.prefix,
        args.ver,
        args.files,
    );

    if let Err(e) = nodeforge_core::pipeline::run(&config).await {
        error!("Build failed: {:#}", e);
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(e.exit_code());
    }
}
