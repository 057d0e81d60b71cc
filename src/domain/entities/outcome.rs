use serde::Serialize;
use std::fmt;

/// Branch shown when the checked-out branch cannot be read.
pub const UNKNOWN_BRANCH: &str = "?????";

/// Final state of one project after synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    /// The checkout did not exist and was cloned
    Cloned,
    /// The checkout was clean and fast-forwarded (possibly by zero commits)
    Updated,
    /// The local branch has diverged from its upstream
    CouldNotFastForward,
    /// The checkout has uncommitted or untracked files and was left alone
    UncommittedChanges,
    /// Preparing the named environment failed
    EnvironmentPrepFailed { environment: String },
    /// Any other failure, with the error text kept for diagnostics
    Unhandled { detail: String },
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Cloned | Status::Updated)
    }

    /// Human-readable reason shown in the report.
    pub fn reason(&self) -> String {
        match self {
            Status::Cloned => "Cloned".to_string(),
            Status::Updated => "Updated".to_string(),
            Status::CouldNotFastForward => "Could not fast-forward".to_string(),
            Status::UncommittedChanges => "Uncommitted changes".to_string(),
            Status::EnvironmentPrepFailed { environment } => {
                format!("Environment prep failed for '{}'", environment)
            }
            Status::Unhandled { .. } => "Unhandled exception".to_string(),
        }
    }

    /// Extra diagnostic text, only present for unhandled failures.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Status::Unhandled { detail } => Some(detail),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

/// Result of initialising one project: always a name, a status and a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub project_name: String,
    pub status: Status,
    pub branch: String,
}

impl Outcome {
    pub fn new(project_name: impl Into<String>, status: Status, branch: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            status,
            branch: branch.into(),
        }
    }

    /// Outcome for a unit of work that failed before producing its own result.
    pub fn unhandled(project_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(
            project_name,
            Status::Unhandled {
                detail: detail.into(),
            },
            UNKNOWN_BRANCH,
        )
    }

    pub fn success(&self) -> bool {
        self.status.is_success()
    }

    pub fn reason(&self) -> String {
        self.status.reason()
    }

    /// Whether the branch could not be determined.
    pub fn branch_unknown(&self) -> bool {
        self.branch == UNKNOWN_BRANCH
    }
}
