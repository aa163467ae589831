use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::load_installments;
use crate::error::Result;
use crate::fmt::{money, number};
use crate::reports::{self, MonthSummary};

pub fn run(file: &str, month: Option<String>, due_day: Option<u32>) -> Result<()> {
    let records = load_installments(file, due_day)?;
    let months = reports::month_keys(&records);
    if months.is_empty() {
        println!("{}", "No valid expense rows found in the file.".yellow());
        return Ok(());
    }
    let month = month.unwrap_or_else(|| months[0].clone());
    let summary = reports::month_summary(&records, &month);
    println!("{}", format_summary(&summary));
    Ok(())
}

pub fn format_summary(s: &MonthSummary) -> String {
    let mut out = format!("{} \u{2014} {}\n\n", "Expense Dashboard".bold(), s.month);
    out.push_str(&format!("Total Spent    {}\n", money(s.total)));
    out.push_str(&format!("Transactions   {}\n", number(s.count as i64)));
    out.push_str(&format!("Average        {}\n", money(s.average)));

    if s.rows.is_empty() {
        out.push_str(&format!("\n{}", "No expenses in this month.".yellow()));
        return out;
    }

    let mut pay = Table::new();
    pay.set_header(vec!["Payment Method", "Amount", "%", "Count"]);
    for p in &s.by_payment {
        pay.add_row(vec![
            Cell::new(&p.method),
            Cell::new(money(p.total)),
            Cell::new(format!("{:.1}%", p.pct)),
            Cell::new(p.count),
        ]);
    }
    out.push_str(&format!("\n{}\n{pay}\n", "By Payment Method".bold()));

    let mut detail = Table::new();
    detail.set_header(vec!["Item", "Installment", "Amount", "Payment Method", "Due Date"]);
    for r in &s.rows {
        detail.add_row(vec![
            Cell::new(&r.item),
            Cell::new(r.label()),
            Cell::new(money(r.amount)),
            Cell::new(&r.payment_method),
            Cell::new(r.due_date.format("%d/%m/%Y").to_string()),
        ]);
    }
    out.push_str(&format!("\n{}\n{detail}", "Expense Detail".bold()));
    out
}
