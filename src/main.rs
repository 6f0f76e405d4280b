use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;

use self::errors::KharchaError;
use self::export::prompt_export;
use self::record::ExpenseRecord;
use self::store::Store;
use self::tui::panels::ExpensePanels;

pub mod aggregate;
pub mod errors;
pub mod export;
pub mod parse;
pub mod record;
pub mod store;
pub mod tui;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KharchaConfig {
    pub currency: char,
    pub user_name: String,
}

impl Default for KharchaConfig {
    fn default() -> Self {
        Self {
            currency: '$',
            user_name: "you".to_string(),
        }
    }
}

fn parse_config() -> Result<KharchaConfig, KharchaError> {
    let cur_dir = std::env::current_dir()?;
    let config_path = cur_dir.join("kharcha.toml");

    if !config_path.exists() {
        return Ok(KharchaConfig::default());
    }

    let config = std::fs::read_to_string(&config_path)?;
    let config: KharchaConfig = toml::from_str(&config).map_err(|err| {
        println!("Could not read config file at {}", config_path.display());
        println!(
            "A minimal config would look like this:
\"user_name\" = \"Your name\"
\"currency\" = \"$\""
        );
        err
    })?;
    Ok(config)
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
    /// Path of the expenses data file
    #[arg(short, long)]
    file: Option<PathBuf>,
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new expense
    Add,
    /// Print all expenses in entry order
    List,
    /// Delete the expense at the given index
    Remove { index: usize },
    /// Browse the expense list and the category chart
    View,
    /// Write the expenses to a JSON or CSV file
    Export,
}

const KHARCHA_DB_FILE: &str = "expenses.json";

fn data_file(args: &Args) -> PathBuf {
    if let Some(path) = &args.file {
        return path.clone();
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kharcha")
        .join(KHARCHA_DB_FILE)
}

fn main() -> Result<(), KharchaError> {
    let args = Args::parse();
    let config = parse_config()?;

    let mut store = Store::load(data_file(&args));

    if args.debug {
        println!(
            "=== Expenses Before ===\n{:?}\n=======================",
            store.records()
        );
    }

    match args.command {
        Command::Add => {
            let record = ExpenseRecord::prompt(&config)?;
            store.add(record)?;
            println!("Expense added successfully!");
        }
        Command::List => {
            if store.records().is_empty() {
                println!("No expenses recorded yet");
            }
            for (index, record) in store.records().iter().enumerate() {
                println!("{:3}: {}", index, record.configured_line(&config));
            }
        }
        Command::Remove { index } => {
            let removed = store.remove(index)?;
            println!("Deleted {}", removed.configured_line(&config));
        }
        Command::View => {
            let panels = ExpensePanels::new(&mut store, &config);
            tui::open_widget(panels)?;
        }
        Command::Export => match prompt_export(store.records())? {
            Some(file_name) => println!("Wrote {}", file_name),
            None => println!("Export cancelled"),
        },
    }

    if args.debug {
        println!(
            "=== Expenses After ===\n{:?}\n======================",
            store.records()
        );
    }

    Ok(())
}
