mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{parse, render, roundtrip, text, ParseArgs, RenderArgs, RoundtripArgs, TextArgs};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Mailblock CLI - block newsletters from and to email HTML
#[derive(Parser, Debug)]
#[command(name = "mailblock")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse HTML into blocks JSON
    Parse(ParseArgs),

    /// Render blocks JSON to email HTML
    Render(RenderArgs),

    /// Parse HTML and render it back
    Roundtrip(RoundtripArgs),

    /// Plain-text rendering of HTML
    Text(TextArgs),
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} cannot read current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Parse(args) => parse(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Roundtrip(args) => roundtrip(args, &cwd),
        Command::Text(args) => text(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
