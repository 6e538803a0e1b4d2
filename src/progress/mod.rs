//! Checklist Progress
//!
//! Aggregates preparation and recovery checklist tasks into the numbers the
//! dashboard cards show.

mod phase;
mod summary;

pub use phase::SurgeryPhase;
pub use summary::{recent_activity, summarize, ChecklistTask, PhaseProgress, ProgressSummary, TaskPhase};
