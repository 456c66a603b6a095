use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TaskService;
use crate::models::{ApiResponse, tasks::entities::Task, tasks::responses::TaskView};
use crate::scoring::project;
use crate::services::helpers::{current_user, ensure_task_visible, load_task};

pub async fn get_task(
    service: &TaskService,
    request: &HttpRequest,
    task_id: &str,
) -> ActixResult<HttpResponse> {
    let task = match load_visible_task(service, request, task_id).await {
        Ok(task) => task,
        Err(resp) => return Ok(resp),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TaskView::at(task, chrono::Utc::now()),
        "Task retrieved successfully",
    )))
}

pub async fn get_projection(
    service: &TaskService,
    request: &HttpRequest,
    task_id: &str,
) -> ActixResult<HttpResponse> {
    let task = match load_visible_task(service, request, task_id).await {
        Ok(task) => task,
        Err(resp) => return Ok(resp),
    };

    let projection = project(&task, chrono::Utc::now());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        projection,
        "Projection computed successfully",
    )))
}

async fn load_visible_task(
    service: &TaskService,
    request: &HttpRequest,
    task_id: &str,
) -> Result<Task, HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let task = load_task(&storage, task_id).await?;
    ensure_task_visible(&user, &task)?;
    Ok(task)
}
