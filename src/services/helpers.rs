//! 各服务共用的请求上下文、资源加载与权限校验

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::error;

use crate::errors::EduSprintError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    grades::entities::GradeRecord,
    subjects::entities::Subject,
    tasks::entities::Task,
    users::entities::{User, UserRole},
};
use crate::storage::Storage;

pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user",
        ))
    })
}

pub(crate) fn internal_error(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {err}"),
    ))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn forbidden(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn conflict(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(code, message))
}

/// 按错误类型映射 HTTP 状态，业务错误码由调用方指定
pub(crate) fn domain_error(err: &EduSprintError, code: ErrorCode) -> HttpResponse {
    match err {
        EduSprintError::Validation(msg) => bad_request(code, msg.as_str()),
        EduSprintError::NotFound(msg) => not_found(code, msg.as_str()),
        EduSprintError::Conflict(msg) | EduSprintError::InvalidTransition(msg) => {
            conflict(code, msg.as_str())
        }
        EduSprintError::Authentication(msg) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, msg.as_str())),
        EduSprintError::Authorization(msg) => forbidden(code, msg.as_str()),
        other => internal_error("Operation failed", other),
    }
}

pub(crate) async fn load_subject(
    storage: &Arc<dyn Storage>,
    subject_id: &str,
) -> Result<Subject, HttpResponse> {
    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(subject)) => Ok(subject),
        Ok(None) => Err(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => Err(internal_error("Failed to get subject", e)),
    }
}

pub(crate) async fn load_task(
    storage: &Arc<dyn Storage>,
    task_id: &str,
) -> Result<Task, HttpResponse> {
    match storage.get_task_by_id(task_id).await {
        Ok(Some(task)) => Ok(task),
        Ok(None) => Err(not_found(ErrorCode::TaskNotFound, "Task not found")),
        Err(e) => Err(internal_error("Failed to get task", e)),
    }
}

pub(crate) async fn load_grade(
    storage: &Arc<dyn Storage>,
    grade_id: &str,
) -> Result<GradeRecord, HttpResponse> {
    match storage.get_grade_by_id(grade_id).await {
        Ok(Some(grade)) => Ok(grade),
        Ok(None) => Err(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Err(internal_error("Failed to get grade", e)),
    }
}

/// 管理员放行，教师必须是课程负责人
pub(crate) fn ensure_subject_owner(user: &User, subject: &Subject) -> Result<(), HttpResponse> {
    match user.role {
        UserRole::Admin => Ok(()),
        UserRole::Faculty if subject.faculty_id == user.id => Ok(()),
        UserRole::Faculty => Err(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "You do not manage this subject",
        )),
        UserRole::Student => Err(forbidden(
            ErrorCode::Forbidden,
            "Only faculty can manage subjects",
        )),
    }
}

/// 加载任务所属课程并校验负责人
pub(crate) async fn ensure_task_owner(
    storage: &Arc<dyn Storage>,
    user: &User,
    task: &Task,
) -> Result<Subject, HttpResponse> {
    let subject = load_subject(storage, &task.subject_id).await?;
    ensure_subject_owner(user, &subject)?;
    Ok(subject)
}

/// 学生只能访问分配给自己的任务
pub(crate) fn ensure_task_visible(user: &User, task: &Task) -> Result<(), HttpResponse> {
    if user.role.is_staff() || task.student_id.as_deref() == Some(user.id.as_str()) {
        Ok(())
    } else {
        Err(forbidden(
            ErrorCode::Forbidden,
            "This task is not assigned to you",
        ))
    }
}

/// 学生的列表查询强制限定为本人
pub(crate) fn scope_student_filter(user: &User, requested: Option<String>) -> Option<String> {
    if user.role.is_staff() {
        requested
    } else {
        Some(user.id.clone())
    }
}
