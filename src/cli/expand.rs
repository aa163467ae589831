use crate::cli::load_installments;
use crate::error::{ParcelaError, Result};
use crate::models::Installment;

pub fn run(file: &str, format: &str, output: Option<String>, due_day: Option<u32>) -> Result<()> {
    let records = load_installments(file, due_day)?;
    let rendered = match format {
        "csv" => to_csv(&records)?,
        "json" => {
            let mut json = serde_json::to_string_pretty(&records)
                .map_err(|e| ParcelaError::Other(format!("JSON encoding failed: {e}")))?;
            json.push('\n');
            json
        }
        other => {
            return Err(ParcelaError::Other(format!(
                "unknown format: {other} (expected csv or json)"
            )))
        }
    };
    match output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            println!("Wrote {} records to {path}", records.len());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Expanded records in the sheet's own column vocabulary, one row per
/// installment, with display formatting (two decimals, DD/MM/YYYY).
fn to_csv(records: &[Installment]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["ITEM", "PARCELA", "VALOR", "CATEGORIA", "FORMA DE PAGAMENTO", "DATA"])?;
    for r in records {
        let label = r.label();
        let amount = format!("{:.2}", r.amount);
        let date = r.due_date.format("%d/%m/%Y").to_string();
        wtr.write_record([
            r.item.as_str(),
            label.as_str(),
            amount.as_str(),
            r.category.as_str(),
            r.payment_method.as_str(),
            date.as_str(),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ParcelaError::Other(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ParcelaError::Other(e.to_string()))
}
