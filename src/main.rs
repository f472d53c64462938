use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use chronos::cli::args::{Cli, Commands};
use chronos::cli::commands;
use chronos::config::{ColorSetting, Config, Paths};
use chronos::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    let _guard = logging::init(&paths);

    let config = Config::load().context("loading configuration")?;

    if cli.no_color {
        colored::control::set_override(false);
    } else {
        match config.general.color {
            ColorSetting::Never => colored::control::set_override(false),
            ColorSetting::Always => colored::control::set_override(true),
            ColorSetting::Auto => {}
        }
    }

    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Task(args) => commands::task(args.command, format)?,
        Commands::Focus(args) => commands::focus(args, &config, format)?,
        Commands::Config(args) => commands::config(args.command, format)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
