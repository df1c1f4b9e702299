//! Interactive column and separator selection.
//!
//! Used only when a choice was not supplied by flags or a config file and
//! stdin is a terminal. Everything is resolved before the graph is built;
//! the graph core never waits on user input.

use std::io::{BufRead, Write};

use sheetcycle_graph::Separator;

use crate::config::{ensure_distinct_columns, Selection, Settings};
use crate::error::{Error, Result};
use crate::workbook::same_column;

const SEPARATOR_LABELS: [&str; 5] = [
    "Comma        (e.g. Task A, Task B)",
    "Semicolon    (e.g. Task A; Task B)",
    "Pipe         (e.g. Task A | Task B)",
    "New line     (e.g. each on its own line inside the cell)",
    "Only one dependency per cell (no separator needed)",
];

/// Numbered-menu prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompt on `output`, reading answers from `input`.
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show a numbered menu and return the zero-based index of the choice.
    ///
    /// Re-asks until a number in range is entered. Running out of input is
    /// an error rather than a silent default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Prompt`] when input ends first, and [`Error::Io`] if
    /// reading or writing fails.
    pub fn choose(&mut self, question: &str, options: &[&str]) -> Result<usize> {
        writeln!(self.output)?;
        writeln!(self.output, "{question}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {option}", i + 1)?;
        }

        let mut line = String::new();
        loop {
            write!(self.output, "Enter number (1-{}): ", options.len())?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::Prompt(
                    "input ended before a choice was made".into(),
                ));
            }

            match line.trim().parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(
                    self.output,
                    "  Please enter a number between 1 and {}.",
                    options.len()
                )?,
            }
        }
    }

    /// Ask for the item column, then the dependency column among the rest.
    ///
    /// # Errors
    ///
    /// Fails as [`Prompter::choose`] does, or with
    /// [`Error::NotEnoughColumns`] when no column is left for the dependency.
    pub fn columns(&mut self, columns: &[String]) -> Result<(String, String)> {
        writeln!(self.output)?;
        writeln!(self.output, "Columns found in your input:")?;
        for (i, column) in columns.iter().enumerate() {
            writeln!(self.output, "  {}. {column}", i + 1)?;
        }

        let source = self.column(
            "Which column contains the ITEM NAME (e.g. Task, Module)?",
            columns,
        )?;
        let target = self.column(
            "Which column contains the DEPENDENCY (e.g. Depends On, Requires)?",
            &other_columns(columns, &source),
        )?;
        Ok((source, target))
    }

    /// Ask how multiple dependencies are separated in one cell.
    ///
    /// # Errors
    ///
    /// Fails as [`Prompter::choose`] does.
    pub fn separator(&mut self) -> Result<Separator> {
        let idx = self.choose(
            "If one cell can list multiple dependencies, how are they separated?",
            &SEPARATOR_LABELS,
        )?;
        Ok(Separator::ALL[idx])
    }

    /// Fill in whatever `settings` leaves unset by prompting.
    ///
    /// # Errors
    ///
    /// Fails as the individual prompts do, and with [`Error::Config`] when
    /// the source and target name the same column.
    pub fn complete(&mut self, settings: Settings, columns: &[String]) -> Result<Selection> {
        let (source_column, target_column) = match (settings.source_column, settings.target_column)
        {
            (Some(source), Some(target)) => (source, target),
            (Some(source), None) => {
                let target = self.column(
                    "Which column contains the DEPENDENCY (e.g. Depends On, Requires)?",
                    &other_columns(columns, &source),
                )?;
                (source, target)
            }
            (None, Some(target)) => {
                let source = self.column(
                    "Which column contains the ITEM NAME (e.g. Task, Module)?",
                    &other_columns(columns, &target),
                )?;
                (source, target)
            }
            (None, None) => self.columns(columns)?,
        };
        ensure_distinct_columns(&source_column, &target_column)?;

        let separator = match settings.separator {
            Some(separator) => separator,
            None => self.separator()?,
        };

        Ok(Selection {
            source_column,
            target_column,
            separator,
        })
    }

    fn column(&mut self, question: &str, columns: &[String]) -> Result<String> {
        if columns.is_empty() {
            return Err(Error::NotEnoughColumns { found: 1 });
        }
        let options: Vec<&str> = columns.iter().map(String::as_str).collect();
        let idx = self.choose(question, &options)?;
        Ok(columns[idx].clone())
    }
}

/// Every column except `chosen`, compared the way headers are matched.
fn other_columns(columns: &[String], chosen: &str) -> Vec<String> {
    columns
        .iter()
        .filter(|c| !same_column(c, chosen))
        .cloned()
        .collect()
}
