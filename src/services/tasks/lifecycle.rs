//! 任务分配、开始与提交
//!
//! 状态与分配学生的校验都放在 `modify_task` 的闭包里，针对存储中的最新任务执行。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TaskService, modify};
use crate::errors::{EduSprintError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    tasks::{
        entities::{Task, TaskStatus},
        requests::{AssignTaskRequest, SubmitTaskRequest},
        responses::TaskView,
    },
    users::entities::UserRole,
};
use crate::services::helpers::{
    bad_request, current_user, ensure_task_owner, internal_error, load_task, not_found,
};

pub async fn assign_task(
    service: &TaskService,
    request: &HttpRequest,
    task_id: &str,
    req: AssignTaskRequest,
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

    let student = match storage.get_user_by_id(&req.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::NotFound, "Student not found")),
        Err(e) => return Ok(internal_error("Failed to get student", e)),
    };
    if student.role != UserRole::Student {
        return Ok(bad_request(
            ErrorCode::UserRoleInvalid,
            "Tasks can only be assigned to students",
        ));
    }

    // 只能分配给已选该课程的学生
    match storage.is_student_enrolled(&task.subject_id, &student.id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(bad_request(
                ErrorCode::StudentNotEnrolled,
                "Student is not enrolled in this subject",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to check enrollment", e)),
    }

    if task.student_id.as_deref() == Some(student.id.as_str()) {
        return Ok(task_response(task, "Task already assigned to this student"));
    }

    let student_id = student.id.clone();
    let change = Box::new(move |task: &mut Task| -> Result<()> {
        if task.student_id.as_deref() == Some(student_id.as_str()) {
            return Ok(());
        }
        // 学生开始后不能改派
        if task.status != TaskStatus::NotStarted {
            return Err(EduSprintError::conflict(
                "Task can only be reassigned before work starts",
            ));
        }
        task.student_id = Some(student_id);
        task.updated_at = chrono::Utc::now();
        Ok(())
    });
    let task = match modify(&*storage, task_id, change).await {
        Ok(task) => task,
        Err(resp) => return Ok(resp),
    };

    info!("Task {} assigned to student {} by {}", task.id, student.id, user.id);
    Ok(task_response(task, "Task assigned successfully"))
}

pub async fn start_task(
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
    if let Err(e) = ensure_assigned_student(&user.id, &task) {
        return Ok(super::task_error(&e));
    }
    if task.status == TaskStatus::InProgress {
        return Ok(task_response(task, "Task already in progress"));
    }

    let student_id = user.id.clone();
    let change = Box::new(move |task: &mut Task| -> Result<()> {
        ensure_assigned_student(&student_id, task)?;
        task.transition_to(TaskStatus::InProgress, chrono::Utc::now())
    });
    let task = match modify(&*storage, task_id, change).await {
        Ok(task) => task,
        Err(resp) => return Ok(resp),
    };

    info!("Student {} started task {}", user.id, task.id);
    Ok(task_response(task, "Task started"))
}

pub async fn submit_task(
    service: &TaskService,
    request: &HttpRequest,
    task_id: &str,
    req: SubmitTaskRequest,
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
    if let Err(e) = ensure_assigned_student(&user.id, &task) {
        return Ok(super::task_error(&e));
    }

    let student_id = user.id.clone();
    let change = Box::new(move |task: &mut Task| -> Result<()> {
        ensure_assigned_student(&student_id, task)?;
        // 提交时间决定自动得分，不允许重复提交
        if task.status >= TaskStatus::Submitted {
            return Err(EduSprintError::invalid_transition(format!(
                "Task is already {}",
                task.status
            )));
        }
        let now = chrono::Utc::now();
        task.transition_to(TaskStatus::Submitted, now)?;
        task.submission = req.submission;
        task.submitted_at = Some(now);
        Ok(())
    });
    let task = match modify(&*storage, task_id, change).await {
        Ok(task) => task,
        Err(resp) => return Ok(resp),
    };

    info!("Student {} submitted task {}", user.id, task.id);
    Ok(task_response(task, "Task submitted"))
}

fn ensure_assigned_student(user_id: &str, task: &Task) -> Result<()> {
    if task.student_id.as_deref() == Some(user_id) {
        Ok(())
    } else {
        Err(EduSprintError::authorization(
            "This task is not assigned to you",
        ))
    }
}

fn task_response(task: Task, message: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        TaskView::at(task, chrono::Utc::now()),
        message,
    ))
}
