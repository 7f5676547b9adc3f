//! Colored terminal output for CLI commands.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};
use mdsite_build::BuildReport;

/// Terminal output formatter writing to stderr.
pub(crate) struct Output {
    term: Term,
    label: Style,
    done: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            done: Style::new().green().bold(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }

    /// Print a labelled setting, e.g. `  Content  ./content`.
    pub(crate) fn field(&self, label: &str, value: impl Display) {
        let label = format!("{label:<8}");
        self.line(&format!("  {} {value}", self.label.apply_to(label)));
    }

    /// Print a warning (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.warn.apply_to(format!("Warning: {msg}")).to_string());
    }

    /// Print an error (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.fail.apply_to(msg).to_string());
    }

    /// Print the summary of a finished build (green).
    pub(crate) fn build_summary(&self, report: &BuildReport, output_dir: &Path) {
        let msg = format!(
            "Built {} {} and copied {} {} to {}",
            report.pages,
            plural(report.pages, "page", "pages"),
            report.assets,
            plural(report.assets, "asset", "assets"),
            output_dir.display()
        );
        self.line(&self.done.apply_to(msg).to_string());
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
