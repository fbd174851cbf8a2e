//! Project / task selector for totals queries

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("no task or project specified")]
    Missing,

    #[error("task and project both specified")]
    Ambiguous,

    #[error("invalid {kind} id '{value}', expected an integer")]
    InvalidId { kind: &'static str, value: String },
}

/// What the totals are scoped to. Exactly one of project or task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Project(u64),
    Task(u64),
}

impl Selector {
    pub fn from_params(project: Option<&str>, task: Option<&str>) -> Result<Self, SelectorError> {
        match (project, task) {
            (Some(project), None) => parse_id("project", project).map(Self::Project),
            (None, Some(task)) => parse_id("task", task).map(Self::Task),
            (Some(_), Some(_)) => Err(SelectorError::Ambiguous),
            (None, None) => Err(SelectorError::Missing),
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Self::Project(id) | Self::Task(id) => *id,
        }
    }

    /// Plural path segment used by Toggl's report UI (`projects` / `tasks`)
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Project(_) => "projects",
            Self::Task(_) => "tasks",
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(id) => write!(f, "project {}", id),
            Self::Task(id) => write!(f, "task {}", id),
        }
    }
}

fn parse_id(kind: &'static str, value: &str) -> Result<u64, SelectorError> {
    value.trim().parse().map_err(|_| SelectorError::InvalidId {
        kind,
        value: value.to_string(),
    })
}
