use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TaskService, task_error};
use crate::config::AppConfig;
use crate::models::{
    ApiResponse,
    tasks::{entities::Task, requests::CreateTaskRequest, responses::TaskView},
};
use crate::services::helpers::{current_user, ensure_subject_owner, internal_error, load_subject};
use crate::utils::generate_id;

pub async fn create_task(
    service: &TaskService,
    request: &HttpRequest,
    req: CreateTaskRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let subject = match load_subject(&storage, &req.subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_subject_owner(&user, &subject) {
        return Ok(resp);
    }

    let now = chrono::Utc::now();
    let task = match Task::from_request(
        generate_id("task"),
        &user.id,
        req,
        &AppConfig::get().grading,
        now,
    ) {
        Ok(task) => task,
        Err(e) => return Ok(task_error(&e)),
    };

    match storage.create_task(task).await {
        Ok(task) => {
            info!(
                "Task {} created in subject {} by {} (due {}, max {}, rate {}%)",
                task.id,
                task.subject_id,
                user.id,
                task.due_at,
                task.max_score,
                task.penalty_rate_percent
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                TaskView::at(task, now),
                "Task created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Task creation failed", e)),
    }
}
