use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TaskService, modify};
use crate::models::{
    ApiResponse,
    tasks::{entities::Task, requests::UpdateTaskRequest, responses::TaskView},
};
use crate::services::helpers::{current_user, ensure_task_owner, load_task};

pub async fn update_task(
    service: &TaskService,
    request: &HttpRequest,
    task_id: &str,
    update: UpdateTaskRequest,
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

    // 锁定规则按存储中的最新任务校验
    let now = chrono::Utc::now();
    let change = Box::new(move |task: &mut Task| task.apply_update(update, now));
    match modify(&*storage, task_id, change).await {
        Ok(task) => {
            info!("Task {} updated by {} (status {})", task.id, user.id, task.status);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                TaskView::at(task, now),
                "Task updated successfully",
            )))
        }
        Err(resp) => Ok(resp),
    }
}
