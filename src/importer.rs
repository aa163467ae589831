use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::error::{ParcelaError, Result};
use crate::models::RawRow;

const COL_ITEM: &str = "ITEM";
const COL_AMOUNT: &str = "VALOR";
const COL_PAYMENT: &str = "FORMA DE PAGAMENTO";
const COL_DATE: &str = "DATA";
const COL_INSTALLMENTS: &str = "PARCELAS";
const COL_CATEGORY: &str = "CATEGORIA";

/// Resolved column positions for one file. DATA, PARCELAS and CATEGORIA are
/// optional; rows read an empty field when the column is absent.
struct Columns {
    item: usize,
    amount: usize,
    payment: usize,
    date: Option<usize>,
    installments: Option<usize>,
    category: Option<usize>,
}

/// Exports vary in header casing and may carry a UTF-8 BOM on the first cell.
fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_uppercase()
}

fn resolve_columns(header: &StringRecord) -> Result<Columns> {
    let mut item = None;
    let mut amount = None;
    let mut payment = None;
    let mut date = None;
    let mut installments = None;
    let mut category = None;

    for (i, field) in header.iter().enumerate() {
        match normalize_header(field).as_str() {
            COL_ITEM => item = Some(i),
            COL_AMOUNT => amount = Some(i),
            COL_PAYMENT => payment = Some(i),
            COL_DATE => date = Some(i),
            COL_INSTALLMENTS => installments = Some(i),
            COL_CATEGORY => category = Some(i),
            _ => {}
        }
    }

    Ok(Columns {
        item: item.ok_or_else(|| ParcelaError::MissingColumn(COL_ITEM.to_string()))?,
        amount: amount.ok_or_else(|| ParcelaError::MissingColumn(COL_AMOUNT.to_string()))?,
        payment: payment.ok_or_else(|| ParcelaError::MissingColumn(COL_PAYMENT.to_string()))?,
        date,
        installments,
        category,
    })
}

fn field(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or("").trim().to_string()
}

fn opt_field(record: &StringRecord, idx: Option<usize>) -> String {
    idx.map(|i| field(record, i)).unwrap_or_default()
}

/// Read an expense sheet into raw rows. The header is the first non-empty
/// record; short data rows are padded with empty fields.
pub fn read_file(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path)?;
    read_from(std::io::BufReader::new(file))
}

pub fn read_from<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut columns: Option<Columns> = None;

    for result in rdr.records() {
        let record = result?;
        match &columns {
            None => {
                if record.iter().all(|f| f.trim().is_empty()) {
                    continue;
                }
                columns = Some(resolve_columns(&record)?);
            }
            Some(cols) => {
                rows.push(RawRow {
                    item: field(&record, cols.item),
                    date: opt_field(&record, cols.date),
                    amount: field(&record, cols.amount),
                    installments: opt_field(&record, cols.installments),
                    category: opt_field(&record, cols.category),
                    payment_method: field(&record, cols.payment),
                });
            }
        }
    }

    if columns.is_none() {
        return Err(ParcelaError::Other("no header row found in CSV".to_string()));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_str(content: &str) -> Result<Vec<RawRow>> {
        read_from(content.as_bytes())
    }

    #[test]
    fn test_reads_all_columns() {
        let rows = read_str(
            "ITEM,DATA,VALOR,PARCELAS,CATEGORIA,FORMA DE PAGAMENTO\n\
             Notebook,15/03/2024,\"R$ 1200,00\",1/3,Eletrônicos,Nubank\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item, "Notebook");
        assert_eq!(rows[0].date, "15/03/2024");
        assert_eq!(rows[0].amount, "R$ 1200,00");
        assert_eq!(rows[0].installments, "1/3");
        assert_eq!(rows[0].category, "Eletrônicos");
        assert_eq!(rows[0].payment_method, "Nubank");
    }

    #[test]
    fn test_optional_columns_absent_read_empty() {
        let rows = read_str(
            "ITEM,VALOR,FORMA DE PAGAMENTO\n\
             Mercado,\"350,00\",Débito\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "");
        assert_eq!(rows[0].installments, "");
        assert_eq!(rows[0].category, "");
        assert_eq!(rows[0].payment_method, "Débito");
    }

    #[test]
    fn test_missing_required_column_errors_by_name() {
        let err = read_str("ITEM,VALOR\nMercado,100\n").unwrap_err();
        assert!(
            matches!(&err, ParcelaError::MissingColumn(c) if c == "FORMA DE PAGAMENTO"),
            "got: {err}"
        );

        let err = read_str("DATA,VALOR,FORMA DE PAGAMENTO\n01/01/2024,100,Pix\n").unwrap_err();
        assert!(matches!(&err, ParcelaError::MissingColumn(c) if c == "ITEM"), "got: {err}");
    }

    #[test]
    fn test_header_matching_is_case_insensitive_and_bom_tolerant() {
        let rows = read_str(
            "\u{feff}item, valor ,forma de pagamento\n\
             Uber,\"25,90\",Crédito\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item, "Uber");
        assert_eq!(rows[0].amount, "25,90");
    }

    #[test]
    fn test_short_rows_pad_with_empty_fields() {
        let rows = read_str(
            "ITEM,DATA,VALOR,PARCELAS,CATEGORIA,FORMA DE PAGAMENTO\n\
             Padaria,01/02/2024,\"15,00\"\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, "15,00");
        assert_eq!(rows[0].payment_method, "");
    }

    #[test]
    fn test_no_header_is_an_error() {
        assert!(read_str("").is_err());
        assert!(read_str("\n\n").is_err());
    }
}
