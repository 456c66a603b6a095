use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::tasks::entities::Task;
use crate::scoring::{ScoreProjection, project};

/// 任务及其实时得分预估
#[derive(Debug, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub projection: ScoreProjection,
}

impl TaskView {
    pub fn at(task: Task, now: DateTime<Utc>) -> Self {
        let projection = project(&task, now);
        Self { task, projection }
    }
}
