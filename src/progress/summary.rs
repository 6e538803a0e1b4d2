//! Task aggregation

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Which checklist a task belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPhase {
    Preparation,
    Recovery,
}

impl TaskPhase {
    /// Translation key for the phase label
    pub fn label_key(&self) -> &'static str {
        match self {
            TaskPhase::Preparation => "tasks.preparation",
            TaskPhase::Recovery => "tasks.recovery",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistTask {
    pub id: String,
    pub title: String,
    pub phase: TaskPhase,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ChecklistTask {
    pub fn new(id: impl Into<String>, title: impl Into<String>, phase: TaskPhase) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            phase,
            completed: false,
            due_date: None,
            completed_at: None,
        }
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn completed_on(mut self, at: DateTime<Utc>) -> Self {
        self.completed = true;
        self.completed_at = Some(at);
        self
    }

    /// Incomplete and past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.map(|d| d < today).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseProgress {
    pub total: usize,
    pub completed: usize,
}

impl PhaseProgress {
    pub fn percentage(&self) -> u8 {
        percentage(self.completed, self.total)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub completed: usize,
    /// Rounded to the nearest whole percent
    pub percentage: u8,
    pub overdue: usize,
    pub preparation: PhaseProgress,
    pub recovery: PhaseProgress,
}

fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

pub fn summarize(tasks: &[ChecklistTask], today: NaiveDate) -> ProgressSummary {
    let mut summary = ProgressSummary::default();

    for task in tasks {
        let phase = match task.phase {
            TaskPhase::Preparation => &mut summary.preparation,
            TaskPhase::Recovery => &mut summary.recovery,
        };
        phase.total += 1;
        if task.completed {
            phase.completed += 1;
        }
        if task.is_overdue(today) {
            summary.overdue += 1;
        }
    }

    summary.total = tasks.len();
    summary.completed = summary.preparation.completed + summary.recovery.completed;
    summary.percentage = percentage(summary.completed, summary.total);
    summary
}

/// Completed tasks, most recent first. Tasks without a completion time sort
/// last.
pub fn recent_activity(tasks: &[ChecklistTask], limit: usize) -> Vec<&ChecklistTask> {
    let mut done: Vec<&ChecklistTask> = tasks.iter().filter(|t| t.completed).collect();
    done.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    done.truncate(limit);
    done
}
