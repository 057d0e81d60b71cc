use crate::domain::entities::outcome::Outcome;
use colored::Colorize;

const NAME_WIDTH: usize = 10;
const BRANCH_WIDTH: usize = 30;

/// Renders the per-project summary shown after a run.
///
/// One line per outcome: the name padded to a fixed column, the branch in
/// parentheses (highlighted when it is not the main line), then `OK:` or
/// `ERR:` with the reason.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    use_color: bool,
    default_branch: String,
    show_details: bool,
}

impl ReportRenderer {
    pub fn new(use_color: bool, default_branch: impl Into<String>) -> Self {
        Self {
            use_color,
            default_branch: default_branch.into(),
            show_details: false,
        }
    }

    /// Print the diagnostic text of unhandled failures under their line
    pub fn with_details(mut self, show_details: bool) -> Self {
        self.show_details = show_details;
        self
    }

    pub fn render_line(&self, outcome: &Outcome) -> String {
        let name = format!("{:<width$}", outcome.project_name, width = NAME_WIDTH);
        let branch = format!("{:<width$}", format!("({})", outcome.branch), width = BRANCH_WIDTH);
        let status = if outcome.success() {
            format!(" OK: {}", outcome.reason())
        } else {
            format!("ERR: {}", outcome.reason())
        };

        if !self.use_color {
            return format!("{}{} {}", name, branch, status);
        }

        let branch = if outcome.branch == self.default_branch {
            branch.normal()
        } else {
            branch.yellow()
        };
        let status = if outcome.success() { status.green() } else { status.red() };

        format!("{}{} {}", name, branch, status)
    }

    /// The full report, framed by blank lines.
    pub fn render(&self, outcomes: &[Outcome]) -> String {
        let mut report = String::from("\n");

        for outcome in outcomes {
            report.push_str(&self.render_line(outcome));
            report.push('\n');

            if self.show_details {
                if let Some(detail) = outcome.status.detail() {
                    for line in detail.lines() {
                        report.push_str(&format!("{:width$}{}\n", "", line, width = NAME_WIDTH));
                    }
                }
            }
        }

        report.push('\n');
        report
    }

    pub fn print(&self, outcomes: &[Outcome]) {
        print!("{}", self.render(outcomes));
    }
}
