mod cli;
mod db;
mod error;
mod fmt;
mod models;
mod recurrence;
mod schedule;
mod settings;
mod startup;
mod store;

use clap::Parser;

use cli::{CategoriesCommands, Cli, Commands, RecurringCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Add {
            description,
            amount,
            date,
            category,
            payment,
            notes,
        } => cli::add::run(
            &description,
            amount,
            date.as_deref(),
            category.as_deref(),
            payment.as_deref(),
            notes.as_deref(),
        ),
        Commands::Recurring { command } => match command {
            RecurringCommands::Add {
                description,
                amount,
                frequency,
                start,
                end,
                category,
                payment,
                notes,
            } => cli::recurring::add(
                &description,
                amount,
                &frequency,
                &start,
                end.as_deref(),
                category.as_deref(),
                payment.as_deref(),
                notes.as_deref(),
            ),
            RecurringCommands::List => cli::recurring::list(),
        },
        Commands::List { month, limit } => cli::list::run(month.as_deref(), limit),
        Commands::Catchup => cli::catchup::run(),
        Commands::Categories { command } => match command {
            CategoriesCommands::Add { name, kind } => cli::categories::add(&name, &kind),
            CategoriesCommands::List => cli::categories::list(),
        },
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
