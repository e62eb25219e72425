//! Output formatting for CLI display
//!
//! Column tables for the `--list-*` commands and the debug report printed
//! instead of starting the browser.

use colored::Colorize;

use crate::config::Configuration;
use crate::entries::Entry;
use crate::launcher::LaunchPlan;
use crate::system::InstallCheck;

const NONE: &str = "none";
const COLUMN_GAP: usize = 2;
const DEBUG_NAME_WIDTH: usize = 15;

#[must_use]
pub const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Render rows under a bold header, each column as wide as its widest cell
///
/// Cells of the `highlight` column read `yes` or `no` and are colored green
/// or red.
#[must_use]
pub fn table(header: &[&str], rows: &[Vec<String>], highlight: Option<usize>) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let last = header.len().saturating_sub(1);
    let pad = |column: usize, text: &str| {
        if column == last {
            text.to_string()
        } else {
            format!("{text:<width$}", width = widths[column] + COLUMN_GAP)
        }
    };

    let mut out = String::new();
    for (column, title) in header.iter().enumerate() {
        out.push_str(&pad(column, *title).bold().to_string());
    }
    out.push('\n');

    for row in rows {
        for (column, cell) in row.iter().enumerate() {
            let padded = pad(column, cell.as_str());
            let painted = match highlight {
                Some(h) if h == column && cell == "yes" => padded.green().to_string(),
                Some(h) if h == column => padded.red().to_string(),
                _ => padded,
            };
            out.push_str(&painted);
        }
        out.push('\n');
    }
    out
}

/// Every registered browser, with its install status
#[must_use]
pub fn browsers_table(config: &Configuration, installed: &dyn InstallCheck) -> String {
    let catalog = &config.catalog;
    let rows: Vec<Vec<String>> = catalog
        .browsers
        .iter()
        .map(|(_, browser)| {
            vec![
                browser.name().to_string(),
                browser.executable().to_string(),
                browser
                    .search_engine()
                    .map_or(NONE, |id| catalog.search_engine(id).name())
                    .to_string(),
                yes_no(browser.is_private()).to_string(),
                yes_no(installed.is_installed(browser.executable())).to_string(),
                browser
                    .base()
                    .map_or(NONE, |id| catalog.browser(id).name())
                    .to_string(),
            ]
        })
        .collect();

    table(
        &["BROWSER", "EXECUTABLE", "SEARCH-ENGINE", "IS-PRIVATE", "INSTALLED", "BASE"],
        &rows,
        Some(4),
    )
}

/// Every registered search engine
#[must_use]
pub fn search_engines_table(config: &Configuration) -> String {
    let rows: Vec<Vec<String>> = config
        .catalog
        .search_engines
        .iter()
        .map(|(_, engine)| {
            vec![
                engine.name().to_string(),
                yes_no(engine.is_private()).to_string(),
                engine.url().to_string(),
            ]
        })
        .collect();

    table(&["SEARCH-ENGINE", "IS-PRIVATE", "URL"], &rows, None)
}

/// Report printed by a dry run
#[must_use]
pub fn launch_table(plan: &LaunchPlan) -> String {
    let line = |name: &str, value: &str| format!("{name:width$}{value}\n", width = DEBUG_NAME_WIDTH);
    [
        line("NAME", "VALUE"),
        line("browser", &plan.browser),
        line("search-engine", &plan.search_engine),
        line("language", &plan.language),
        line("terms", &plan.terms),
        line("url", &plan.url),
        line("private-search", yes_no(plan.private)),
    ]
    .concat()
}
