use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TaskService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::helpers::{
    conflict, current_user, ensure_task_owner, internal_error, load_task, not_found,
};

pub async fn delete_task(
    service: &TaskService,
    request: &HttpRequest,
    task_id: &str,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let task = match load_task(&storage, task_id).await {
        Ok(task) => task,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_task_owner(&storage, &user, &task).await {
        return Ok(resp);
    }

    // 有评分记录的任务不能删除
    let grade_count = match storage.count_grades_for_task(task_id).await {
        Ok(count) => count,
        Err(e) => return Ok(internal_error("Failed to count task grades", e)),
    };
    if grade_count > 0 {
        return Ok(conflict(
            ErrorCode::TaskHasGrades,
            "Task has grade records and cannot be deleted",
        ));
    }

    match storage.delete_task(task_id).await {
        Ok(true) => {
            info!("Task {} deleted by {}", task_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Task deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::TaskNotFound, "Task not found")),
        Err(e) => Ok(internal_error("Task deletion failed", e)),
    }
}
