//! Rendering scan reports for people and for tools.

use std::io::{self, Write};

use colored::Colorize;

use crate::scan::{ScanReport, Summary};

const ARROW: &str = " -> ";

/// Write the summary block and the cycle listing as colored text.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_text(out: &mut impl Write, report: &ScanReport) -> io::Result<()> {
    write_summary(out, &report.summary)?;
    writeln!(out)?;

    let analysis = &report.analysis;
    if !analysis.has_cycles() {
        writeln!(out, "{}", "No cyclic dependencies found.".green())?;
        return Ok(());
    }

    writeln!(
        out,
        "Found {} cyclic {}:",
        analysis.cycle_count.to_string().red().bold(),
        if analysis.cycle_count == 1 {
            "dependency"
        } else {
            "dependencies"
        }
    )?;

    for (i, cycle) in analysis.cycles.iter().enumerate() {
        writeln!(out)?;
        writeln!(
            out,
            "  {} {}: {}",
            "Cycle".yellow().bold(),
            i + 1,
            cycle.closed_chain(ARROW)
        )?;
        for link in &cycle.links {
            writeln!(
                out,
                "    {}{ARROW}{}  {}",
                link.from,
                link.to,
                format!("(found in sheet: {})", link.distinct_sheets().join(", ")).dimmed()
            )?;
        }
    }

    Ok(())
}

fn write_summary(out: &mut impl Write, summary: &Summary) -> io::Result<()> {
    writeln!(out, "{}", "Summary".bold())?;
    let rows = [
        ("Sheets scanned", summary.sheets_scanned.to_string()),
        ("Sheets used", summary.sheets_with_dependencies.to_string()),
        ("Source column", summary.source_column.clone()),
        ("Target column", summary.target_column.clone()),
        ("Separator", summary.separator.to_string()),
        ("Unique items", summary.unique_items.to_string()),
        ("Total links", summary.total_links.to_string()),
        ("Cyclic groups", summary.cyclic_groups.to_string()),
    ];
    for (label, value) in rows {
        writeln!(out, "  {label:<15}: {value}")?;
    }
    Ok(())
}

/// Write the report as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns any error from serializing or writing to `out`.
pub fn write_json(out: &mut impl Write, report: &ScanReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}
