use std::collections::BTreeMap;

use crate::models::Installment;

// ---------------------------------------------------------------------------
// Month filter
// ---------------------------------------------------------------------------

/// Distinct "YYYY-MM" keys present in the record set, most recent first.
/// Lexicographic order on this shape is chronological order.
pub fn month_keys(records: &[Installment]) -> Vec<String> {
    let mut keys: Vec<String> = records.iter().map(|r| r.month_key()).collect();
    keys.sort();
    keys.dedup();
    keys.reverse();
    keys
}

// ---------------------------------------------------------------------------
// Month summary
// ---------------------------------------------------------------------------

pub struct PaymentItem {
    pub method: String,
    pub total: f64,
    pub count: i64,
    pub pct: f64,
}

pub struct MonthSummary {
    pub month: String,
    pub total: f64,
    pub count: usize,
    pub average: f64,
    /// Totals grouped by payment method, method name ascending.
    pub by_payment: Vec<PaymentItem>,
    /// The month's records, due date ascending (stable on equal dates).
    pub rows: Vec<Installment>,
}

pub fn month_summary(records: &[Installment], month: &str) -> MonthSummary {
    let mut rows: Vec<Installment> = records
        .iter()
        .filter(|r| r.month_key() == month)
        .cloned()
        .collect();
    rows.sort_by_key(|r| r.due_date);

    let total: f64 = rows.iter().map(|r| r.amount).sum();
    let count = rows.len();
    let average = if count > 0 { total / count as f64 } else { 0.0 };

    let mut groups: BTreeMap<&str, (f64, i64)> = BTreeMap::new();
    for r in &rows {
        let entry = groups.entry(r.payment_method.as_str()).or_insert((0.0, 0));
        entry.0 += r.amount;
        entry.1 += 1;
    }
    let by_payment = groups
        .into_iter()
        .map(|(method, (t, c))| PaymentItem {
            method: method.to_string(),
            total: t,
            count: c,
            pct: if total != 0.0 { t / total * 100.0 } else { 0.0 },
        })
        .collect();

    MonthSummary {
        month: month.to_string(),
        total,
        count,
        average,
        by_payment,
        rows,
    }
}
