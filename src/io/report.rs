//! Report rendering
//!
//! Pure transformations of a computed [`Summary`] into the three output
//! formats the CLI offers:
//!
//! - **text** - a shareable breakdown block suited to messaging apps
//! - **csv** - one row per participant, for spreadsheets
//! - **json** - the full `Summary` structure, pretty-printed
//!
//! Nothing here recomputes anything; every figure comes straight off the
//! summary.

use crate::cli::ReportFormat;
use crate::types::{Summary, SplitError};
use std::io::Write;

/// Render a summary in the requested format
///
/// Dispatches to the format-specific writer.
///
/// # Arguments
///
/// * `summary` - The computed split
/// * `format` - Output format selected on the command line
/// * `output` - Destination writer (stdout in the CLI)
pub fn write_report(
    summary: &Summary,
    format: &ReportFormat,
    output: &mut dyn Write,
) -> Result<(), SplitError> {
    match format {
        ReportFormat::Text => write_text_report(summary, output),
        ReportFormat::Csv => write_csv_report(summary, output),
        ReportFormat::Json => write_json_report(summary, output),
    }
}

/// Render the shareable text block
///
/// Aggregate totals first, then each participant's bottom line, then
/// the settlement instructions. Zero-valued charge lines are omitted.
pub fn write_text_report(summary: &Summary, output: &mut dyn Write) -> Result<(), SplitError> {
    writeln!(output, "=== Rincian Patungan ===")?;
    writeln!(
        output,
        "Total pesanan : {}",
        format_rupiah(summary.total_item_expenses)
    )?;
    if summary.ppn_amount != 0.0 {
        writeln!(output, "PPN           : {}", format_rupiah(summary.ppn_amount))?;
    }
    if summary.service_tax_amount != 0.0 {
        writeln!(
            output,
            "Biaya layanan : {}",
            format_rupiah(summary.service_tax_amount)
        )?;
    }
    if summary.delivery_fee != 0.0 {
        writeln!(
            output,
            "Ongkos kirim  : {}",
            format_rupiah(summary.delivery_fee)
        )?;
    }
    if summary.total_discount != 0.0 {
        writeln!(
            output,
            "Total diskon  : {}",
            format_rupiah(summary.total_discount)
        )?;
    }
    writeln!(output, "Total tagihan : {}", format_rupiah(summary.total_bill))?;
    // grand_total and total_bill come from different summation orders,
    // so with rounding off the difference can be a tiny fp residue
    // rather than exactly zero. Only a cent or more counts.
    if summary.rounding_difference.abs() >= 0.005 {
        writeln!(
            output,
            "Pembulatan    : {}",
            format_rupiah(summary.rounding_difference)
        )?;
        writeln!(output, "Grand total   : {}", format_rupiah(summary.grand_total))?;
    }

    writeln!(output)?;
    for row in &summary.participants {
        writeln!(
            output,
            "{} bayar {}",
            row.name,
            format_rupiah(row.total_to_pay)
        )?;
    }

    if !summary.transactions.is_empty() {
        writeln!(output)?;
        writeln!(output, "Transfer ke pembayar:")?;
        for t in &summary.transactions {
            writeln!(
                output,
                "- {} -> {}: {}",
                t.from,
                t.to,
                format_rupiah(t.amount)
            )?;
        }
    }

    Ok(())
}

/// Render the per-participant CSV table
///
/// Columns: name, subtotal, ppn, serviceTax, deliveryFee,
/// globalDiscount, finalShare, totalToPay. Rows follow session order,
/// which keeps the output deterministic.
pub fn write_csv_report(summary: &Summary, output: &mut dyn Write) -> Result<(), SplitError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record([
        "name",
        "subtotal",
        "ppn",
        "serviceTax",
        "deliveryFee",
        "globalDiscount",
        "finalShare",
        "totalToPay",
    ])?;

    for row in &summary.participants {
        writer.write_record(&[
            row.name.clone(),
            format!("{:.2}", row.subtotal),
            format!("{:.2}", row.ppn_share),
            format!("{:.2}", row.service_tax_share),
            format!("{:.2}", row.delivery_fee_share),
            format!("{:.2}", row.global_discount_share),
            format!("{:.2}", row.final_share),
            format!("{:.2}", row.total_to_pay),
        ])?;
    }

    writer.flush().map_err(|e| SplitError::report(e.to_string()))?;
    Ok(())
}

/// Render the full summary as pretty-printed JSON
pub fn write_json_report(summary: &Summary, output: &mut dyn Write) -> Result<(), SplitError> {
    serde_json::to_writer_pretty(&mut *output, summary)?;
    writeln!(output)?;
    Ok(())
}

/// Format an amount for display as Rupiah
///
/// Rounded to whole units, thousand-grouped with dots: `Rp12.500`.
fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{sign}Rp{grouped}")
}
