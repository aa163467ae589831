pub mod config;
pub mod dashboard;
pub mod expand;
pub mod months;
pub mod summary;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::expander;
use crate::importer;
use crate::models::Installment;
use crate::settings::load_settings;

#[derive(Parser)]
#[command(
    name = "parcela",
    about = "Installment-aware expense dashboard for Brazilian credit-card sheets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Month summary: totals, payment-method breakdown and expense detail.
    Summary {
        /// Path to the expense CSV
        file: String,
        /// Month to summarize: YYYY-MM (default: most recent in the sheet)
        #[arg(long)]
        month: Option<String>,
        /// Day of month installments fall due (default: settings, then 10)
        #[arg(long = "due-day")]
        due_day: Option<u32>,
    },
    /// List the months available in a sheet, most recent first.
    Months {
        /// Path to the expense CSV
        file: String,
        #[arg(long = "due-day")]
        due_day: Option<u32>,
    },
    /// Expand installment rows and export the individual dated records.
    Expand {
        /// Path to the expense CSV
        file: String,
        /// Output format: csv or json
        #[arg(long, default_value = "csv")]
        format: String,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
        #[arg(long = "due-day")]
        due_day: Option<u32>,
    },
    /// Interactive dashboard with month navigation.
    Dashboard {
        /// Path to the expense CSV
        file: String,
        #[arg(long = "due-day")]
        due_day: Option<u32>,
    },
    /// Show or change the default due day.
    Config {
        /// New default due day (1-31); omit to show current settings
        #[arg(long = "due-day")]
        due_day: Option<u32>,
    },
}

/// Shared pipeline: settings → CSV → expansion, with today's date injected.
pub(crate) fn load_installments(file: &str, due_day: Option<u32>) -> Result<Vec<Installment>> {
    let due_day = due_day.unwrap_or_else(|| load_settings().due_day);
    let rows = importer::read_file(std::path::Path::new(file))?;
    let today = chrono::Local::now().date_naive();
    Ok(expander::expand_rows(&rows, due_day, today))
}
