pub mod auth;
pub mod common;
pub mod grades;
pub mod penalties;
pub mod subjects;
pub mod tasks;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::Serialize;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 认证与用户
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserNameInvalid = 2002,
    UserEmailInvalid = 2003,
    UserEmailAlreadyExists = 2004,
    UserPasswordInvalid = 2005,
    UserRoleInvalid = 2006,

    // 课程
    SubjectNotFound = 3000,
    SubjectInvalid = 3001,
    SubjectPermissionDenied = 3002,
    SubjectHasTasks = 3003,
    SubjectEnrollmentExists = 3004,
    SubjectEnrollmentNotFound = 3005,
    StudentNotEnrolled = 3006,

    // 任务
    TaskNotFound = 4000,
    TaskInvalid = 4001,
    TaskStatusInvalid = 4002,
    TaskLocked = 4003,
    TaskHasGrades = 4004,
    TaskNotAssigned = 4005,

    // 评分
    GradeNotFound = 5000,
    GradeAlreadyExists = 5001,
    GradeScoreInvalid = 5002,
    GradeTaskNotSubmitted = 5003,
    GradeAlreadyApproved = 5004,

    // 罚分记录
    PenaltyInvalid = 6000,
    PenaltyNotFound = 6001,
}
