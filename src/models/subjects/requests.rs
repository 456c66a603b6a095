use crate::models::common::pagination::PaginationQuery;
use serde::Deserialize;

/// 创建课程请求
#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

/// 更新课程请求
#[derive(Debug, Deserialize)]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
}

/// 选课请求
#[derive(Debug, Deserialize)]
pub struct EnrollStudentRequest {
    pub student_id: String,
}

/// 课程列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub faculty_id: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct SubjectListQuery {
    pub faculty_id: Option<String>,
}
