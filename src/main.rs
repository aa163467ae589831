mod cli;
mod error;
mod expander;
mod fmt;
mod importer;
mod models;
mod reports;
mod settings;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Summary {
            file,
            month,
            due_day,
        } => cli::summary::run(&file, month, due_day),
        Commands::Months { file, due_day } => cli::months::run(&file, due_day),
        Commands::Expand {
            file,
            format,
            output,
            due_day,
        } => cli::expand::run(&file, &format, output, due_day),
        Commands::Dashboard { file, due_day } => cli::dashboard::run(&file, due_day),
        Commands::Config { due_day } => cli::config::run(due_day),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
