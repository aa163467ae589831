use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::models::{Installment, RawRow};

/// Day of month installments fall due when the sheet row has no usable date.
pub const DEFAULT_DUE_DAY: u32 = 10;

// ---------------------------------------------------------------------------
// Parse helpers
// ---------------------------------------------------------------------------

/// Parse a VALOR cell: strip the "R$" prefix wherever it appears, convert the
/// decimal comma, then parse. Returns None on anything unparsable — callers
/// drop the row rather than guessing. Thousands separators are not accepted
/// ("1.234,56" does not parse).
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace("R$", "").replace(',', ".");
    s.trim().parse().ok()
}

/// Parse a DATA cell in DD/MM/YYYY form. Invalid calendar dates are rejected.
pub fn parse_date_dmy(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y").ok()
}

fn spec_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d+)\s*/\s*(\d+)\s*$").unwrap())
}

/// Parse a PARCELAS cell of the form "current/total". Absent or malformed
/// specs mean a single installment. The "current" component is carried by the
/// sheet format but never offsets expansion — rows always expand from 1.
pub fn parse_installment_spec(raw: &str) -> (u32, u32) {
    let Some(caps) = spec_regex().captures(raw) else {
        return (1, 1);
    };
    match (caps[1].parse(), caps[2].parse()) {
        (Ok(current), Ok(total)) => (current, total),
        _ => (1, 1),
    }
}

// ---------------------------------------------------------------------------
// Calendar stepping
// ---------------------------------------------------------------------------

/// Resolve `due_day` within a month, clamping past the month's last day
/// (due day 31 lands on 28/29 in February).
fn due_date_in(year: i32, month: u32, due_day: u32) -> NaiveDate {
    let mut day = due_day.max(1);
    loop {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => return date,
            None => day -= 1,
        }
    }
}

/// Advance `base` by whole calendar months, landing on the due day.
fn add_months(base: NaiveDate, months: u32, due_day: u32) -> NaiveDate {
    let total = base.year() * 12 + base.month0() as i32 + months as i32;
    due_date_in(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, due_day)
}

// ---------------------------------------------------------------------------
// Row expansion
// ---------------------------------------------------------------------------

/// Expand raw sheet rows into one record per installment.
///
/// `today` anchors the fallback date for rows without a parseable DATA and is
/// an explicit parameter so callers control it (the CLI passes the current
/// local date; tests pass a fixed one).
///
/// Row-level tolerance: blank ITEM or unparsable VALOR drops the row
/// silently; an unparsable DATA falls back to today normalized to the due
/// day; an unparsable PARCELAS means 1/1.
pub fn expand_rows(rows: &[RawRow], due_day: u32, today: NaiveDate) -> Vec<Installment> {
    let mut records = Vec::new();

    for row in rows {
        if row.item.trim().is_empty() {
            continue;
        }

        let Some(amount) = parse_amount(&row.amount) else {
            continue;
        };

        let explicit = parse_date_dmy(&row.date);
        let base = explicit.unwrap_or_else(|| due_date_in(today.year(), today.month(), due_day));

        let (_current, total) = parse_installment_spec(&row.installments);

        for i in 0..total {
            // The first installment keeps an explicit sheet date exactly;
            // every other one is normalized to the due day.
            let due_date = if i == 0 && explicit.is_some() {
                base
            } else {
                add_months(base, i, due_day)
            };
            records.push(Installment {
                item: row.item.clone(),
                number: i + 1,
                total,
                amount,
                category: row.category.clone(),
                payment_method: row.payment_method.clone(),
                due_date,
            });
        }
    }

    records
}
