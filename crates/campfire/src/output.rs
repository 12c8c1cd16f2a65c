//! Output formatting: table, JSON, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one line per item.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use campfire_core::FetchStatus;

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// A fetch status label, colored by lifecycle stage.
pub fn status_label(status: FetchStatus, color: bool) -> String {
    if !color {
        return status.to_string();
    }
    match status {
        FetchStatus::Idle => status.dimmed().to_string(),
        FetchStatus::Loading => status.yellow().to_string(),
        FetchStatus::Loaded => status.green().to_string(),
        FetchStatus::Failed => status.red().to_string(),
    }
}

/// Render a 1..=5 rating as stars.
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `plain`: calls `line_fn` on each item to emit one line per item
pub fn render_list<'a, T, R>(
    format: OutputFormat,
    data: &'a [T],
    to_row: impl Fn(&'a T) -> R,
    line_fn: impl Fn(&'a T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Plain => data.iter().map(line_fn).collect::<Vec<_>>().join("\n"),
    })
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, since single-item views don't use
/// the `Tabled` derive.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    line_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    Ok(match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Plain => line_fn(data),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print a notice to stderr, respecting quiet mode.
pub fn notice(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Item {
        id: u64,
        name: &'static str,
    }

    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "Name")]
        name: String,
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: 0, name: "React Lake" },
            Item { id: 1, name: "Chrome River" },
        ]
    }

    fn render(format: OutputFormat) -> String {
        render_list(
            format,
            &items(),
            |i| ItemRow { name: i.name.into() },
            |i| format!("{}\t{}", i.id, i.name),
        )
        .unwrap()
    }

    #[test]
    fn table_has_header_and_rows() {
        let out = render(OutputFormat::Table);
        assert!(out.contains("Name"));
        assert!(out.contains("Chrome River"));
    }

    #[test]
    fn json_is_an_array() {
        let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert!(!render(OutputFormat::JsonCompact).contains('\n'));
    }

    #[test]
    fn plain_is_one_line_per_item() {
        assert_eq!(render(OutputFormat::Plain), "0\tReact Lake\n1\tChrome River");
    }

    #[test]
    fn stars_clamp_to_five() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn uncolored_status_is_lowercase() {
        assert_eq!(status_label(FetchStatus::Failed, false), "failed");
    }
}
