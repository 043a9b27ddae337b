pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "mememart",
    about = "Mememart catalog CLI",
    long_about = "Browse the meme catalog, inspect items, manage the persisted cart, and check runtime readiness.",
    after_help = "Examples:\n  mememart catalog --search doge --sort rating_desc\n  mememart show 61579\n  mememart cart add 61579\n  mememart stats"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List the catalog with optional search, category filter, and sort")]
    Catalog {
        #[arg(long, help = "Case-insensitive substring match on the name")]
        search: Option<String>,
        #[arg(long, help = "Keep one category (animals|celebrities|gaming|school|random)")]
        category: Option<String>,
        #[arg(
            long,
            help = "Sort key (name_asc|name_desc|rating_desc|rating_asc|size_desc|size_asc); unknown keys leave the order unchanged"
        )]
        sort: Option<String>,
    },
    #[command(about = "Show one item in full, with a sample of related items")]
    Show {
        id: String,
        #[arg(long, help = "How many related items to sample")]
        related: Option<usize>,
    },
    #[command(about = "Print catalog and cart dashboard numbers")]
    Stats,
    #[command(subcommand, about = "Manage the persisted cart")]
    Cart(CartCommand),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, cart store access, and upstream API reachability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
enum CartCommand {
    #[command(about = "Add one of an item; the id is resolved against a fresh fetch")]
    Add { id: String },
    #[command(about = "Remove an item's line entirely")]
    Remove { id: String },
    #[command(about = "Decrease an item's quantity by one; a line at one is removed")]
    Decrease { id: String },
    #[command(about = "Empty the cart")]
    Clear,
    #[command(about = "Print the cart contents and totals")]
    Show,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Catalog { search, category, sort } => {
            commands::catalog::run(search, category, sort)
        }
        Command::Show { id, related } => commands::show::run(&id, related),
        Command::Stats => commands::stats::run(),
        Command::Cart(action) => match action {
            CartCommand::Add { id } => commands::cart::add(&id),
            CartCommand::Remove { id } => commands::cart::remove(&id),
            CartCommand::Decrease { id } => commands::cart::decrease(&id),
            CartCommand::Clear => commands::cart::clear(),
            CartCommand::Show => commands::cart::show(),
        },
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
