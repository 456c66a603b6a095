use serde::Deserialize;

use super::entities::{GradeStatus, Strictness};
use crate::models::common::pagination::PaginationQuery;

/// 创建评分请求，auto_score 缺省时按提交时间推算
#[derive(Debug, Deserialize)]
pub struct CreateGradeRequest {
    pub task_id: String,
    pub student_id: String,
    pub auto_score: Option<f64>,
    pub feedback: Option<String>,
    pub strictness: Option<Strictness>,
}

/// 复核请求
#[derive(Debug, Deserialize)]
pub struct ReviewGradeRequest {
    pub final_score: f64,
    pub feedback: Option<String>,
}

/// 覆盖分数请求
#[derive(Debug, Deserialize)]
pub struct GradeOverrideRequest {
    pub task_id: String,
    pub student_id: String,
    pub final_score: f64,
    pub reason: String,
}

/// 评分列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize)]
pub struct GradeListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub task_id: Option<String>,
    pub student_id: Option<String>,
    pub status: Option<GradeStatus>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct GradeListQuery {
    pub task_id: Option<String>,
    pub student_id: Option<String>,
    pub status: Option<GradeStatus>,
}
