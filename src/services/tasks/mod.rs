pub mod create;
pub mod delete;
pub mod get;
pub mod lifecycle;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::helpers::{bad_request, conflict, domain_error, forbidden, internal_error, not_found};
use crate::errors::EduSprintError;
use crate::models::ErrorCode;
use crate::models::tasks::entities::Task;
use crate::models::tasks::requests::{
    AssignTaskRequest, CreateTaskRequest, SubmitTaskRequest, TaskListParams, UpdateTaskRequest,
};
use crate::storage::{Storage, TaskChange};

pub struct TaskService {
    storage: Option<Arc<dyn Storage>>,
}

impl TaskService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            super::helpers::storage_from_request(request)
        }
    }

    // 获取任务列表，学生只能看到自己的任务
    pub async fn list_tasks(
        &self,
        request: &HttpRequest,
        params: TaskListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_tasks(self, request, params).await
    }

    pub async fn create_task(
        &self,
        request: &HttpRequest,
        req: CreateTaskRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_task(self, request, req).await
    }

    pub async fn get_task(&self, request: &HttpRequest, task_id: String) -> ActixResult<HttpResponse> {
        get::get_task(self, request, &task_id).await
    }

    // 实时得分预估
    pub async fn get_projection(
        &self,
        request: &HttpRequest,
        task_id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_projection(self, request, &task_id).await
    }

    pub async fn update_task(
        &self,
        request: &HttpRequest,
        task_id: String,
        update: UpdateTaskRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_task(self, request, &task_id, update).await
    }

    pub async fn delete_task(
        &self,
        request: &HttpRequest,
        task_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_task(self, request, &task_id).await
    }

    pub async fn assign_task(
        &self,
        request: &HttpRequest,
        task_id: String,
        req: AssignTaskRequest,
    ) -> ActixResult<HttpResponse> {
        lifecycle::assign_task(self, request, &task_id, req).await
    }

    pub async fn start_task(
        &self,
        request: &HttpRequest,
        task_id: String,
    ) -> ActixResult<HttpResponse> {
        lifecycle::start_task(self, request, &task_id).await
    }

    pub async fn submit_task(
        &self,
        request: &HttpRequest,
        task_id: String,
        req: SubmitTaskRequest,
    ) -> ActixResult<HttpResponse> {
        lifecycle::submit_task(self, request, &task_id, req).await
    }
}

/// 任务领域错误到 API 错误码的映射
pub(crate) fn task_error(err: &EduSprintError) -> HttpResponse {
    match err {
        EduSprintError::Validation(msg) => bad_request(ErrorCode::TaskInvalid, msg.as_str()),
        EduSprintError::Conflict(msg) => conflict(ErrorCode::TaskLocked, msg.as_str()),
        EduSprintError::InvalidTransition(msg) => {
            conflict(ErrorCode::TaskStatusInvalid, msg.as_str())
        }
        EduSprintError::Authorization(msg) => forbidden(ErrorCode::TaskNotAssigned, msg.as_str()),
        other => domain_error(other, ErrorCode::InternalServerError),
    }
}

/// 通过存储层原子地修改任务，错误转换为响应
pub(crate) async fn modify(
    storage: &dyn Storage,
    task_id: &str,
    change: TaskChange,
) -> Result<Task, HttpResponse> {
    match storage.modify_task(task_id, change).await {
        Ok(Some(task)) => Ok(task),
        Ok(None) => Err(not_found(ErrorCode::TaskNotFound, "Task not found")),
        Err(
            e @ (EduSprintError::Validation(_)
            | EduSprintError::Conflict(_)
            | EduSprintError::InvalidTransition(_)
            | EduSprintError::Authorization(_)),
        ) => Err(task_error(&e)),
        Err(e) => Err(internal_error("Task update failed", e)),
    }
}
