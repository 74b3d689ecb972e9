use serde::{Deserialize, Serialize};

/// Month-scoped task aggregate for one user. The task service answers 404
/// for months without activity; that decodes as the empty default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyStats {
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub in_progress_tasks: u32,
    pub pending_tasks: u32,
    pub daily: Vec<DailyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyCount {
    pub day: u32,
    pub completed: u32,
}

impl MonthlyStats {
    pub fn is_empty(&self) -> bool {
        self.total_tasks == 0 && self.daily.is_empty()
    }

    /// Completed share in percent, 0 for an empty month.
    pub fn completion_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        f64::from(self.completed_tasks) * 100.0 / f64::from(self.total_tasks)
    }
}
