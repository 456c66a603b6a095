use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::requests::{CreateTaskRequest, UpdateTaskRequest};
use crate::config::GradingConfig;
use crate::errors::{EduSprintError, Result};
use crate::utils::validate::{validate_max_score, validate_penalty_rate, validate_title};

// 任务状态，只能向前推进
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Submitted,
    Graded,
}

impl TaskStatus {
    /// 相同状态视为无操作，回退一律拒绝
    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        next >= self
    }

    /// 提交之前教师仍可调整罚分率
    pub fn accepts_penalty_changes(self) -> bool {
        self < TaskStatus::Submitted
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::NotStarted => write!(f, "not-started"),
            TaskStatus::InProgress => write!(f, "in-progress"),
            TaskStatus::Submitted => write!(f, "submitted"),
            TaskStatus::Graded => write!(f, "graded"),
        }
    }
}

// 任务实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    // 唯一 ID
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    // 所属课程 ID
    pub subject_id: String,
    // 被分配的学生 ID
    pub student_id: Option<String>,
    pub status: TaskStatus,
    // 截止时间
    pub due_at: DateTime<Utc>,
    pub weight: u32,
    // 满分
    pub max_score: f64,
    // 名义罚分率（百分比）
    pub penalty_rate_percent: f64,
    // 完成标准
    pub definition: Vec<String>,
    pub submission: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// 根据创建请求构造任务，未提供的字段取评分配置中的默认值
    pub fn from_request(
        id: String,
        created_by: &str,
        req: CreateTaskRequest,
        defaults: &GradingConfig,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        validate_title(&req.title).map_err(EduSprintError::validation)?;
        validate_max_score(req.max_score).map_err(EduSprintError::validation)?;

        let penalty_rate_percent = req
            .penalty_rate_percent
            .unwrap_or(defaults.default_penalty_rate_percent);
        validate_penalty_rate(penalty_rate_percent).map_err(EduSprintError::validation)?;

        let weight = req.weight.unwrap_or(defaults.default_weight);
        if weight == 0 {
            return Err(EduSprintError::validation("weight must be positive"));
        }

        Ok(Self {
            id,
            title: req.title.trim().to_string(),
            description: req.description,
            subject_id: req.subject_id,
            student_id: None,
            status: TaskStatus::NotStarted,
            due_at: req.due_at,
            weight,
            max_score: req.max_score,
            penalty_rate_percent,
            definition: req.definition.unwrap_or_default(),
            submission: None,
            submitted_at: None,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// 已分配给学生或已离开 not-started 的任务视为已发布
    pub fn is_published(&self) -> bool {
        self.student_id.is_some() || self.status != TaskStatus::NotStarted
    }

    /// 推进任务状态
    pub fn transition_to(&mut self, next: TaskStatus, now: DateTime<Utc>) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(EduSprintError::invalid_transition(format!(
                "Task {} cannot move from {} back to {}",
                self.id, self.status, next
            )));
        }
        if self.status != next {
            self.status = next;
            self.updated_at = now;
        }
        Ok(())
    }

    /// 应用教师的更新请求，校验发布后不可变字段
    pub fn apply_update(&mut self, update: UpdateTaskRequest, now: DateTime<Utc>) -> Result<()> {
        let published = self.is_published();

        if let Some(due_at) = update.due_at
            && due_at != self.due_at
        {
            if published {
                return Err(EduSprintError::conflict(
                    "due_at cannot change once the task is published",
                ));
            }
            self.due_at = due_at;
        }

        if let Some(max_score) = update.max_score
            && max_score != self.max_score
        {
            if published {
                return Err(EduSprintError::conflict(
                    "max_score cannot change once the task is published",
                ));
            }
            validate_max_score(max_score).map_err(EduSprintError::validation)?;
            self.max_score = max_score;
        }

        if let Some(rate) = update.penalty_rate_percent
            && rate != self.penalty_rate_percent
        {
            if !self.status.accepts_penalty_changes() {
                return Err(EduSprintError::conflict(
                    "penalty_rate_percent cannot change after submission",
                ));
            }
            validate_penalty_rate(rate).map_err(EduSprintError::validation)?;
            self.penalty_rate_percent = rate;
        }

        if let Some(title) = update.title {
            validate_title(&title).map_err(EduSprintError::validation)?;
            self.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(weight) = update.weight {
            if weight == 0 {
                return Err(EduSprintError::validation("weight must be positive"));
            }
            self.weight = weight;
        }
        if let Some(definition) = update.definition {
            self.definition = definition;
        }

        if let Some(status) = update.status {
            // graded 只能由评分流程写入
            if status == TaskStatus::Graded && self.status != TaskStatus::Graded {
                return Err(EduSprintError::invalid_transition(
                    "Tasks become graded only through a grade record",
                ));
            }
            self.transition_to(status, now)?;
        }

        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn defaults() -> GradingConfig {
        GradingConfig {
            default_penalty_rate_percent: 2.0,
            default_weight: 10,
        }
    }

    fn create_request() -> CreateTaskRequest {
        CreateTaskRequest {
            title: "Binary Search Tree Implementation".to_string(),
            description: None,
            subject_id: "subject_1".to_string(),
            due_at: Utc::now() + Duration::days(7),
            weight: None,
            max_score: 10.0,
            penalty_rate_percent: Some(15.0),
            definition: Some(vec!["Implement BST insert operation".to_string()]),
        }
    }

    fn new_task() -> Task {
        Task::from_request(
            "task_1".to_string(),
            "faculty_1",
            create_request(),
            &defaults(),
            Utc::now(),
        )
        .expect("valid task")
    }

    #[test]
    fn test_status_order_is_forward_only() {
        assert!(TaskStatus::NotStarted.can_transition_to(TaskStatus::InProgress));
        assert!(TaskStatus::NotStarted.can_transition_to(TaskStatus::Submitted));
        assert!(TaskStatus::Submitted.can_transition_to(TaskStatus::Submitted));
        assert!(!TaskStatus::Graded.can_transition_to(TaskStatus::Submitted));
        assert!(!TaskStatus::InProgress.can_transition_to(TaskStatus::NotStarted));
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::NotStarted).expect("serializable");
        assert_eq!(json, "\"not-started\"");
        let parsed: TaskStatus = serde_json::from_str("\"in-progress\"").expect("valid status");
        assert_eq!(parsed, TaskStatus::InProgress);
    }

    #[test]
    fn test_from_request_applies_defaults() {
        let mut req = create_request();
        req.penalty_rate_percent = None;
        let task = Task::from_request(
            "task_2".to_string(),
            "faculty_1",
            req,
            &defaults(),
            Utc::now(),
        )
        .expect("valid task");
        assert_eq!(task.penalty_rate_percent, 2.0);
        assert_eq!(task.weight, 10);
        assert_eq!(task.status, TaskStatus::NotStarted);
    }

    #[test]
    fn test_from_request_rejects_bad_scores() {
        let mut req = create_request();
        req.max_score = 0.0;
        let err = Task::from_request("t".into(), "f", req, &defaults(), Utc::now()).unwrap_err();
        assert_eq!(err.code(), "E004");

        let mut req = create_request();
        req.penalty_rate_percent = Some(-1.0);
        assert!(Task::from_request("t".into(), "f", req, &defaults(), Utc::now()).is_err());

        let mut req = create_request();
        req.max_score = f64::NAN;
        assert!(Task::from_request("t".into(), "f", req, &defaults(), Utc::now()).is_err());
    }

    #[test]
    fn test_graded_task_cannot_move_back() {
        let mut task = new_task();
        task.transition_to(TaskStatus::Graded, Utc::now()).expect("forward");
        let err = task
            .transition_to(TaskStatus::InProgress, Utc::now())
            .unwrap_err();
        assert_eq!(err.code(), "E007");
        assert_eq!(task.status, TaskStatus::Graded);
    }

    #[test]
    fn test_due_at_locked_after_publication() {
        let mut task = new_task();
        task.student_id = Some("student_1".to_string());

        let update = UpdateTaskRequest {
            due_at: Some(task.due_at + Duration::days(1)),
            ..Default::default()
        };
        let err = task.apply_update(update, Utc::now()).unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[test]
    fn test_penalty_rate_editable_until_submission() {
        let mut task = new_task();
        task.transition_to(TaskStatus::InProgress, Utc::now())
            .expect("forward");
        let update = UpdateTaskRequest {
            penalty_rate_percent: Some(20.0),
            ..Default::default()
        };
        task.apply_update(update, Utc::now()).expect("still editable");
        assert_eq!(task.penalty_rate_percent, 20.0);

        task.transition_to(TaskStatus::Submitted, Utc::now())
            .expect("forward");
        let update = UpdateTaskRequest {
            penalty_rate_percent: Some(5.0),
            ..Default::default()
        };
        assert!(task.apply_update(update, Utc::now()).is_err());
    }

    #[test]
    fn test_update_cannot_mark_graded() {
        let mut task = new_task();
        let update = UpdateTaskRequest {
            status: Some(TaskStatus::Graded),
            ..Default::default()
        };
        assert!(task.apply_update(update, Utc::now()).is_err());
    }
}
