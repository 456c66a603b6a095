use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TaskService;
use crate::models::{
    ApiResponse, PaginatedResponse,
    tasks::{
        requests::{TaskListParams, TaskListQuery},
        responses::TaskView,
    },
};
use crate::services::helpers::{current_user, internal_error, scope_student_filter};

pub async fn list_tasks(
    service: &TaskService,
    request: &HttpRequest,
    params: TaskListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let query = TaskListQuery {
        subject_id: params.subject_id,
        student_id: scope_student_filter(&user, params.student_id),
        status: params.status,
    };

    let tasks = match storage.list_tasks(query).await {
        Ok(tasks) => tasks,
        Err(e) => return Ok(internal_error("Failed to list tasks", e)),
    };

    // 同一次请求内的预估使用同一时刻
    let now = chrono::Utc::now();
    let page = PaginatedResponse::from_items(tasks, &params.pagination)
        .map(|task| TaskView::at(task, now));
    Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Tasks retrieved successfully")))
}
