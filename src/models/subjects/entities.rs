use serde::{Deserialize, Serialize};

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    // 唯一 ID
    pub id: String,
    // 课程名称
    pub name: String,
    // 课程代码，如 CS201
    pub code: String,
    // 课程描述
    pub description: Option<String>,
    // 负责教师 ID
    pub faculty_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 选课记录，(subject_id, student_id) 唯一
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectEnrollment {
    pub subject_id: String,
    pub student_id: String,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}
