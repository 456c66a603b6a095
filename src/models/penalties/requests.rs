use serde::Deserialize;

use crate::models::common::pagination::PaginationQuery;

/// 登记罚分请求
#[derive(Debug, Deserialize)]
pub struct CreatePenaltyRequest {
    pub task_id: String,
    pub student_id: String,
    pub penalty_percent: f64,
    pub reason: String,
}

/// 修改罚分请求，未提供的字段保持不变
#[derive(Debug, Deserialize)]
pub struct UpdatePenaltyRequest {
    pub penalty_percent: Option<f64>,
    pub reason: Option<String>,
}

/// 罚分列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize)]
pub struct PenaltyListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub task_id: Option<String>,
    pub student_id: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct PenaltyListQuery {
    pub task_id: Option<String>,
    pub student_id: Option<String>,
}
