// src/report.rs
use crate::checker::CheckResult;
use std::fmt;
use std::path::Path;

const RULE_WIDTH: usize = 50;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// One console line for a finished check.
pub fn site_line(name: &str, result: &CheckResult) -> String {
    match (result.failure_reason(), result.elapsed_seconds()) {
        (None, Some(elapsed)) => format!(" {} is UP ({:.2}s)", name, elapsed),
        (None, None) => format!(" {} is UP", name),
        (Some(reason), _) => format!(" {} is DOWN - {}", name, reason),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownSite {
    pub url: String,
    pub reason: String,
}

/// Totals over a run of checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub up: usize,
    pub down: Vec<DownSite>,
}

impl Summary {
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a CheckResult>,
    {
        let mut summary = Summary::default();
        for result in results {
            summary.total += 1;
            match result.failure_reason() {
                None => summary.up += 1,
                Some(reason) => summary.down.push(DownSite {
                    url: result.target().to_string(),
                    reason,
                }),
            }
        }
        summary
    }

    pub fn down_count(&self) -> usize {
        self.down.len()
    }

    pub fn all_up(&self) -> bool {
        self.down.is_empty()
    }

    /// The summary block, followed by a pointer to the log file when there is one.
    pub fn render(&self, log_file: Option<&Path>) -> String {
        let mut out = self.to_string();
        if let Some(path) = log_file {
            out.push_str(&format!(
                "\nCheck the '{}' file for detailed logged messages!\n",
                path.display()
            ));
        }
        out
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}", rule())?;
        writeln!(f, "SUMMARY REPORT")?;
        writeln!(f, "{}", rule())?;
        writeln!(f, "Total sites checked: {}", self.total)?;
        writeln!(f, "Sites UP: {}", self.up)?;
        writeln!(f, "Sites DOWN: {}", self.down_count())?;

        if !self.all_up() {
            writeln!(f, "\n Sites that are DOWN:")?;
            for site in &self.down {
                writeln!(f, "   - {}: {}", site.url, site.reason)?;
            }
        }
        Ok(())
    }
}
