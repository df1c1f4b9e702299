//! `sheetcycle scan` command implementation.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use sheetcycle::columns::available_columns;
use sheetcycle::config::{Selection, Settings};
use sheetcycle::prompt::Prompter;
use sheetcycle::workbook::{self, Sheet};
use sheetcycle::{output, scan};
use sheetcycle_graph::Separator;

use super::types::OutputFormatArg;

/// Arguments of the scan command, after clap parsing.
pub struct ScanArgs {
    pub files: Vec<PathBuf>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub separator: Option<Separator>,
    pub format: OutputFormatArg,
    pub config: Option<PathBuf>,
    pub no_input: bool,
}

/// Run the scan command. Returns whether any cycle was found.
pub fn run(args: &ScanArgs) -> Result<bool> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let file_settings = Settings::discover(args.config.as_deref(), &cwd)?;
    let settings = file_settings.merged_with(Settings {
        source_column: args.source.clone(),
        target_column: args.target.clone(),
        separator: args.separator,
    });

    let sheets = workbook::load_all(&args.files)?;

    // Menus go to stderr so a redirected report stays clean.
    let stdin = io::stdin();
    let mut prompter = (!args.no_input && stdin.is_terminal())
        .then(|| Prompter::new(stdin.lock(), io::stderr()));

    let mut stdout = io::stdout().lock();
    let found = scan_and_report(&sheets, settings, prompter.as_mut(), args.format, &mut stdout)?;
    stdout.flush()?;

    Ok(found)
}

/// Resolve the selection (prompting when a prompter is given), scan, and
/// write the report to `out`.
fn scan_and_report<R: BufRead, W: Write>(
    sheets: &[Sheet],
    settings: Settings,
    prompter: Option<&mut Prompter<R, W>>,
    format: OutputFormatArg,
    out: &mut impl Write,
) -> Result<bool> {
    let columns = available_columns(sheets)?;

    let selection = match prompter {
        Some(prompter) => prompter.complete(settings, &columns)?,
        None => Selection::try_from(settings)?,
    };
    tracing::debug!(?selection, "Columns resolved");

    let report = scan::run(sheets, &selection)?;

    let written = match format {
        OutputFormatArg::Text => output::write_text(out, &report),
        OutputFormatArg::Json => output::write_json(out, &report),
    };
    written.context("failed to write report")?;

    Ok(report.analysis.has_cycles())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sheets() -> Vec<Sheet> {
        let cell = |v: &str| Some(v.to_string());
        vec![Sheet::new(
            "S1",
            vec![cell("Task"), cell("Depends On")],
            vec![vec![cell("A"), cell("B")], vec![cell("B"), cell("A")]],
        )]
    }

    #[test]
    fn prompts_never_reach_the_report_writer() {
        // Source "Task", target "Depends On", comma separator.
        let mut menus = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(b"1\n1\n1\n".to_vec()), &mut menus);
        let mut report = Vec::new();

        let found = scan_and_report(
            &sheets(),
            Settings::default(),
            Some(&mut prompter),
            OutputFormatArg::Json,
            &mut report,
        )
        .unwrap();

        drop(prompter);

        assert!(found);
        assert!(String::from_utf8(menus).unwrap().contains("Columns found in your input:"));
        let json: serde_json::Value = serde_json::from_slice(&report).unwrap();
        assert_eq!(json["cycle_count"], 1);
        assert_eq!(json["summary"]["target_column"], "Depends On");
    }

    #[test]
    fn without_prompter_both_columns_are_required() {
        let mut report = Vec::new();

        let err = scan_and_report(
            &sheets(),
            Settings::default(),
            None::<&mut Prompter<Cursor<Vec<u8>>, Vec<u8>>>,
            OutputFormatArg::Text,
            &mut report,
        )
        .unwrap_err();

        assert!(err.to_string().contains("--source is required"));
        assert!(report.is_empty());
    }
}
