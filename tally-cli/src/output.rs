//! Rendering of parsed statements for the terminal.

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tally_core::ParsedTransaction;
use tally_ingest::Preview;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Income and expense totals of a statement
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    /// Sum of signed amounts
    pub net: f64,
}

impl Totals {
    pub fn of(txns: &[ParsedTransaction]) -> Self {
        txns.iter().fold(Totals::default(), |mut acc, t| {
            if t.is_income() {
                acc.income += t.amount;
            } else {
                acc.expense += t.amount;
            }
            acc.net += t.signed_amount();
            acc
        })
    }
}

/// Print a preview. An empty table becomes the corrective hint on `out`;
/// json/csv keep stdout machine-readable and put the hint on `err`.
pub fn write_preview(
    out: &mut impl Write,
    err: &mut impl Write,
    preview: &Preview,
    format: OutputFormat,
) -> Result<()> {
    match (preview.hint(), format) {
        (Some(hint), OutputFormat::Table) => writeln!(out, "{hint}")?,
        (Some(hint), _) => {
            render(out, &preview.transactions, format)?;
            writeln!(err, "{hint}")?;
        }
        (None, _) => render(out, &preview.transactions, format)?,
    }
    Ok(())
}

pub fn render(out: &mut impl Write, txns: &[ParsedTransaction], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => render_table(out, txns),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, txns)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => render_csv(out, txns),
    }
}

fn render_table(out: &mut impl Write, txns: &[ParsedTransaction]) -> Result<()> {
    for t in txns {
        writeln!(
            out,
            "{} | {:<7} | {:>12.2} | {:<18} | {}",
            t.date,
            t.kind,
            t.amount,
            t.category,
            t.description
        )?;
    }
    let totals = Totals::of(txns);
    writeln!(
        out,
        "\n{} transactions | income={:.2} | expense={:.2} | net={:.2}",
        txns.len(),
        totals.income,
        totals.expense,
        totals.net
    )?;
    Ok(())
}

fn render_csv(out: &mut impl Write, txns: &[ParsedTransaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["date", "description", "merchant", "amount", "type", "category"])?;
    for t in txns {
        wtr.write_record([
            t.date.to_string(),
            t.description.clone(),
            t.merchant.clone().unwrap_or_default(),
            t.amount.to_string(),
            t.kind.to_string(),
            t.category.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
