mod cli;
mod command;
mod output;

use clap::Parser;
use cli::{Cli, Command};
use richpaste::Pasteboard;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let name = command_name(&cli.command);

    let pb = match Pasteboard::system() {
        Ok(pb) => pb,
        Err(e) => {
            tracing::error!(error = %e, "clipboard unavailable");
            eprintln!("richpaste {name}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = command::run(cli.command, &pb) {
        tracing::error!(error = %e, "{name} failed");
        eprintln!("richpaste {name}: {e}");
        std::process::exit(1);
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Paste { .. } => "paste",
        Command::Available { .. } => "available",
        Command::PasteAll { .. } => "paste-all",
        Command::Copy { .. } => "copy",
        Command::Clear => "clear",
    }
}
