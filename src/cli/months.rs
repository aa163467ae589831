use colored::Colorize;

use crate::cli::load_installments;
use crate::error::Result;
use crate::reports;

pub fn run(file: &str, due_day: Option<u32>) -> Result<()> {
    let records = load_installments(file, due_day)?;
    let months = reports::month_keys(&records);
    if months.is_empty() {
        println!("{}", "No valid expense rows found in the file.".yellow());
        return Ok(());
    }
    for m in &months {
        println!("{m}");
    }
    Ok(())
}
