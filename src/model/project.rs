use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::task::{Dependency, Task};

/// A construction project: its task list, dependency links and optional
/// explicit schedule bounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    /// Explicit start of the schedule; the chart window never starts later.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Explicit end of the schedule; the chart window never ends earlier.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}
