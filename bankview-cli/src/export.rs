//! CSV export of the filtered transaction view.

use anyhow::{Context, Result};
use bankview_core::Transaction;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct Row<'a> {
    id: &'a str,
    date: &'a str,
    #[serde(rename = "type")]
    txn_type: &'static str,
    amount: f64,
    category: &'a str,
    description: &'a str,
    payer_payee: &'a str,
}

impl<'a> From<&'a Transaction> for Row<'a> {
    fn from(t: &'a Transaction) -> Self {
        Self {
            id: &t.id,
            date: &t.date,
            txn_type: t.txn_type.as_str(),
            amount: t.amount,
            category: t.category().unwrap_or(""),
            description: t.description.as_deref().unwrap_or(""),
            payer_payee: t.payer_payee.as_deref().unwrap_or(""),
        }
    }
}

pub fn write_csv<W: Write>(out: W, txns: &[&Transaction]) -> Result<()> {
    let mut w = csv::Writer::from_writer(out);
    for t in txns {
        w.serialize(Row::from(*t)).context("write csv row")?;
    }
    w.flush().context("flush csv")?;
    Ok(())
}

pub fn export_csv(path: &Path, txns: &[&Transaction]) -> Result<()> {
    let f = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_csv(f, txns).with_context(|| format!("export {}", path.display()))
}
