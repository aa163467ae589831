use chrono::NaiveDate;
use serde::Serialize;

/// One row of the source sheet as read from the CSV, before expansion.
/// Optional columns that were absent from the file read as empty strings.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub item: String,
    pub date: String,
    pub amount: String,
    pub installments: String,
    pub category: String,
    pub payment_method: String,
}

/// A single dated installment produced by expanding a RawRow.
///
/// `amount` is the full parsed amount of the source row, repeated on every
/// installment — the sheet records the per-installment charge, not the
/// purchase total, so it is never divided.
#[derive(Debug, Clone, Serialize)]
pub struct Installment {
    pub item: String,
    pub number: u32,
    pub total: u32,
    pub amount: f64,
    pub category: String,
    pub payment_method: String,
    pub due_date: NaiveDate,
}

impl Installment {
    /// "2/5"-style label shown in tables and exports.
    pub fn label(&self) -> String {
        format!("{}/{}", self.number, self.total)
    }

    /// Grouping key for month filtering: "YYYY-MM".
    pub fn month_key(&self) -> String {
        self.due_date.format("%Y-%m").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_and_month_key() {
        let rec = Installment {
            item: "Notebook".to_string(),
            number: 2,
            total: 5,
            amount: 1200.0,
            category: "Eletrônicos".to_string(),
            payment_method: "Nubank".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
        };
        assert_eq!(rec.label(), "2/5");
        assert_eq!(rec.month_key(), "2024-04");
    }
}
