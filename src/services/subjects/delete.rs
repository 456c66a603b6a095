use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::helpers::{
    conflict, current_user, ensure_subject_owner, internal_error, load_subject, not_found,
};

pub async fn delete_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: &str,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_subject_owner(&user, &subject) {
        return Ok(resp);
    }

    let task_count = match storage.count_tasks_for_subject(subject_id).await {
        Ok(count) => count,
        Err(e) => return Ok(internal_error("Failed to count subject tasks", e)),
    };
    if task_count > 0 {
        return Ok(conflict(
            ErrorCode::SubjectHasTasks,
            format!("Subject still has {task_count} task(s)"),
        ));
    }

    // 选课记录随课程一并删除
    match storage.delete_subject(subject_id).await {
        Ok(true) => {
            info!("Subject {} deleted by {}", subject_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => Ok(internal_error("Subject deletion failed", e)),
    }
}
