//! Data loading and transaction preparation using Polars
//!
//! Reads the retail CSV (`InvoiceNo, StockCode, Description, Quantity,
//! InvoiceDate, UnitPrice, CustomerID, Country`), removes credit notes and
//! the invoices they reverse, drops invoices containing malformed rows, and
//! groups the survivors into one item-label basket per invoice.

use std::collections::{BTreeMap, HashSet};

use polars::prelude::*;

/// Cleaned transaction data ready for encoding, plus corpus counts for
/// reporting.
#[derive(Debug)]
pub struct TransactionData {
    /// One basket of item labels per invoice, ordered by invoice number.
    pub transactions: Vec<Vec<String>>,
    /// Rows read from the CSV before cleaning.
    pub n_raw_rows: usize,
    /// Invoices excluded as credit notes, reversed originals or malformed.
    pub n_invalid_invoices: usize,
}

impl TransactionData {
    /// Number of distinct item labels across all baskets.
    pub fn n_unique_items(&self) -> usize {
        self.transactions
            .iter()
            .flatten()
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Load the CSV and build cleaned invoice baskets.
///
/// Cleaning mirrors the upstream analysis: an invoice is excluded when it is
/// a credit note (invoice number starting with `C`), when a credit note
/// references it (same number minus the `C` prefix), or when any of its rows
/// has a negative quantity or a missing/zero unit price.
pub fn load_transactions(file_path: &str) -> crate::Result<TransactionData> {
    let df = LazyCsvReader::new(file_path)
        .finish()?
        .select([
            col("InvoiceNo").cast(DataType::String),
            col("Description").cast(DataType::String),
            col("Quantity").cast(DataType::Int64),
            col("UnitPrice").cast(DataType::Float64),
        ])
        .collect()?;

    if df.height() == 0 {
        anyhow::bail!("No data found in {}", file_path);
    }

    let invoices = df.column("InvoiceNo")?.str()?;
    let descriptions = df.column("Description")?.str()?;
    let quantities = df.column("Quantity")?.i64()?;
    let prices = df.column("UnitPrice")?.f64()?;

    // Pass 1: collect the invoice numbers to exclude.
    let mut invalid: HashSet<String> = HashSet::new();
    for i in 0..df.height() {
        let Some(invoice) = invoices.get(i) else {
            continue;
        };
        if let Some(original) = invoice.strip_prefix('C') {
            // The credit note and the invoice it reverses both go.
            invalid.insert(invoice.to_string());
            invalid.insert(original.to_string());
        } else {
            let bad_quantity = quantities.get(i).map(|q| q < 0).unwrap_or(true);
            let bad_price = prices.get(i).map(|p| p == 0.0).unwrap_or(true);
            if bad_quantity || bad_price {
                invalid.insert(invoice.to_string());
            }
        }
    }

    // Pass 2: group the surviving rows into baskets, keyed by invoice
    // number in sorted order so output is reproducible.
    let mut baskets: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for i in 0..df.height() {
        let (Some(invoice), Some(description)) = (invoices.get(i), descriptions.get(i)) else {
            continue;
        };
        if invalid.contains(invoice) {
            continue;
        }
        baskets
            .entry(invoice.to_string())
            .or_default()
            .push(description.to_string());
    }

    if baskets.is_empty() {
        anyhow::bail!("No valid transactions remain after cleaning {}", file_path);
    }

    Ok(TransactionData {
        transactions: baskets.into_values().collect(),
        n_raw_rows: df.height(),
        n_invalid_invoices: invalid.len(),
    })
}

/// Count how many baskets each item appears in, most frequent first; ties
/// break alphabetically.
pub fn item_frequencies(transactions: &[Vec<String>]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for basket in transactions {
        let distinct: HashSet<&str> = basket.iter().map(String::as_str).collect();
        for item in distinct {
            *counts.entry(item).or_default() += 1;
        }
    }
    let mut frequencies: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(item, count)| (item.to_string(), count))
        .collect();
    frequencies.sort_by(|(ia, ca), (ib, cb)| cb.cmp(ca).then_with(|| ia.cmp(ib)));
    frequencies
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country").unwrap();
        writeln!(file, "536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,2010-12-01T08:26:00,2.55,17850,United Kingdom").unwrap();
        writeln!(file, "536365,71053,WHITE METAL LANTERN,6,2010-12-01T08:26:00,3.39,17850,United Kingdom").unwrap();
        writeln!(file, "536366,85123A,WHITE HANGING HEART T-LIGHT HOLDER,2,2010-12-01T08:28:00,2.55,13047,United Kingdom").unwrap();
        // credit note reversing invoice 536367, and the original itself
        writeln!(file, "C536367,22633,HAND WARMER UNION JACK,-6,2010-12-01T08:34:00,1.85,13047,United Kingdom").unwrap();
        writeln!(file, "536367,22633,HAND WARMER UNION JACK,6,2010-12-01T08:30:00,1.85,13047,United Kingdom").unwrap();
        // zero-price row poisons its whole invoice
        writeln!(file, "536368,22960,JAM MAKING SET WITH JARS,3,2010-12-01T08:45:00,0.0,12345,United Kingdom").unwrap();
        writeln!(file, "536368,22961,JAM MAKING SET PRINTED,3,2010-12-01T08:45:00,1.45,12345,United Kingdom").unwrap();
        file
    }

    #[test]
    fn test_load_and_clean() {
        let file = create_test_csv();
        let data = load_transactions(file.path().to_str().unwrap()).unwrap();

        // only 536365 and 536366 survive
        assert_eq!(data.transactions.len(), 2);
        assert_eq!(data.transactions[0].len(), 2);
        assert_eq!(
            data.transactions[1],
            vec!["WHITE HANGING HEART T-LIGHT HOLDER"]
        );
        assert_eq!(data.n_raw_rows, 7);
        // C536367, 536367, 536368
        assert_eq!(data.n_invalid_invoices, 3);
        assert_eq!(data.n_unique_items(), 2);
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(load_transactions("no_such_file.csv").is_err());
    }

    #[test]
    fn test_item_frequencies() {
        let transactions = vec![
            vec!["milk".to_string(), "bread".to_string()],
            vec!["milk".to_string(), "milk".to_string()],
            vec!["bread".to_string()],
        ];
        let frequencies = item_frequencies(&transactions);
        // tie at 2 baskets each breaks alphabetically
        assert_eq!(
            frequencies,
            vec![("bread".to_string(), 2), ("milk".to_string(), 2)]
        );
    }
}
