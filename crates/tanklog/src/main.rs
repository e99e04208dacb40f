//! Command-line form/list client for the fill-up logbook.

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::debug;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tanklog::init_logging;
use tanklog_config::StoreConfig;
use tanklog_core::date::format_date;
use tanklog_core::{Confirmation, DEFAULT_COLLECTION, FillUpRecord, FuelJournal};
use tanklog_store::{FirestoreStore, MemoryStore, RecordStore};

/// Command-line options.
#[derive(Parser)]
#[command(name = "tanklog", about = "Vehicle refueling logbook", version)]
struct Cli {
    /// Use a volatile in-memory store instead of the remote collection.
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a fill-up.
    Add {
        /// Fill-up date, dd/mm/yyyy.
        #[arg(long)]
        date: String,
        /// Fuel type label (Gasoline, Ethanol, Diesel, or free text).
        #[arg(long)]
        fuel: String,
        /// Distance covered since the previous fill-up, in km.
        #[arg(long)]
        km: String,
        /// Volume added, in liters.
        #[arg(long)]
        liters: String,
    },
    /// List fill-ups in chronological order.
    List {
        /// Print records as JSON instead of text lines.
        #[arg(long)]
        json: bool,
    },
    /// Delete a fill-up by id.
    Remove {
        /// Store-assigned record id.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (store, collection): (Arc<dyn RecordStore>, String) = if cli.memory {
        (Arc::new(MemoryStore::new()), DEFAULT_COLLECTION.to_string())
    } else {
        let config = StoreConfig::from_env().context("store configuration")?;
        debug!(
            "using remote store (project_id={}, collection={})",
            config.project_id, config.collection
        );
        let collection = config.collection.clone();
        (Arc::new(FirestoreStore::new(&config)), collection)
    };
    let journal = FuelJournal::with_collection(store, collection);

    match cli.command {
        Command::Add {
            date,
            fuel,
            km,
            liters,
        } => {
            let record = journal.create(&date, &fuel, &km, &liters).await?;
            println!("saved {}: {}", record.id, render_line(&record));
        }
        Command::List { json } => {
            let records = journal.load_all().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for record in &records {
                    println!("{}  {}", record.id, render_line(record));
                }
            }
        }
        Command::Remove { id, yes } => {
            if !yes && !confirm_delete(&id)? {
                println!("aborted.");
                return Ok(());
            }
            journal.delete(&id, Confirmation::granted()).await?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

/// One list line, matching the original history rendering.
fn render_line(record: &FillUpRecord) -> String {
    format!(
        "{} - {} - {:.2} - {:.2} - {:.2}",
        format_date(record.date),
        record.fuel,
        record.km,
        record.liters,
        record.autonomy
    )
}

/// Ask on the terminal before a destructive delete.
fn confirm_delete(id: &str) -> anyhow::Result<bool> {
    print!("delete fill-up {id}? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
