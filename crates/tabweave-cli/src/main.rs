//! Tabweave CLI - Command-line host for the tab classification engine.

use clap::Parser;
use std::io;
use tabweave_cli::commands;
use tabweave_cli::{Cli, Command, Config, Formatter};
use tabweave_engine::TabEngine;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TABWEAVE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> tabweave_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let engine = TabEngine::new(config.engine.clone())?;
    let stdout = io::stdout();
    let out = stdout.lock();

    match cli.command {
        Command::Group(args) => commands::execute_group(args, &config, &engine, &formatter, out),
        Command::Sort(args) => commands::execute_sort(args, &config, &engine, &formatter, out),
        Command::Calculate(args) => commands::execute_calculate(args, &config, &engine, &formatter, out),
        Command::Strategies(args) => commands::execute_strategies(args, &config, &engine, &formatter, out),
    }
}
