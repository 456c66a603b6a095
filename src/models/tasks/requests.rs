use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::common::pagination::PaginationQuery;
use crate::models::tasks::entities::TaskStatus;

/// 创建任务请求
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub subject_id: String,
    pub due_at: DateTime<Utc>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    pub weight: Option<u32>,
    pub max_score: f64,
    pub penalty_rate_percent: Option<f64>,
    pub definition: Option<Vec<String>>,
}

/// 更新任务请求
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_at: Option<DateTime<Utc>>,
    pub weight: Option<u32>,
    pub max_score: Option<f64>,
    pub penalty_rate_percent: Option<f64>,
    pub definition: Option<Vec<String>>,
}

/// 分配任务请求
#[derive(Debug, Deserialize)]
pub struct AssignTaskRequest {
    pub student_id: String,
}

/// 提交任务请求
#[derive(Debug, Deserialize)]
pub struct SubmitTaskRequest {
    pub submission: Option<String>,
}

/// 任务列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize)]
pub struct TaskListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub subject_id: Option<String>,
    pub student_id: Option<String>,
    pub status: Option<TaskStatus>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct TaskListQuery {
    pub subject_id: Option<String>,
    pub student_id: Option<String>,
    pub status: Option<TaskStatus>,
}
