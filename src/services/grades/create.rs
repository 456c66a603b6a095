use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::errors::EduSprintError;
use crate::models::{
    ApiResponse, ErrorCode,
    grades::{
        entities::{GradeRecord, GradeStatus},
        requests::CreateGradeRequest,
    },
    tasks::entities::TaskStatus,
};
use crate::scoring::project_score;
use crate::services::helpers::{
    bad_request, conflict, current_user, ensure_task_owner, internal_error, load_task, not_found,
};
use crate::utils::generate_id;
use crate::utils::validate::validate_score;

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    req: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let task = match load_task(&storage, &req.task_id).await {
        Ok(task) => task,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_task_owner(&storage, &user, &task).await {
        return Ok(resp);
    }

    // 重复评分优先于状态检查，第二次提交时任务已是 graded
    match storage
        .get_grade_by_task_and_student(&task.id, &req.student_id)
        .await
    {
        Ok(None) => {}
        Ok(Some(existing)) => {
            return Ok(conflict(
                ErrorCode::GradeAlreadyExists,
                format!("Grade {} already exists for this task and student", existing.id),
            ));
        }
        Err(e) => return Ok(internal_error("Failed to get grade", e)),
    }

    if task.status != TaskStatus::Submitted {
        return Ok(conflict(
            ErrorCode::GradeTaskNotSubmitted,
            format!("Task is {}, only submitted tasks can be graded", task.status),
        ));
    }
    if task.student_id.as_deref() != Some(req.student_id.as_str()) {
        return Ok(bad_request(
            ErrorCode::TaskNotAssigned,
            "Task is not assigned to this student",
        ));
    }

    // 未给出自动分时按提交时刻推算
    let submitted_at = task.submitted_at.unwrap_or(task.updated_at);
    let auto_score = match req.auto_score {
        Some(score) => {
            if let Err(msg) = validate_score(score, task.max_score) {
                return Ok(bad_request(ErrorCode::GradeScoreInvalid, msg));
            }
            score
        }
        None => project_score(&task, submitted_at),
    };

    let now = chrono::Utc::now();
    let grade = GradeRecord {
        id: generate_id("grade"),
        task_id: task.id.clone(),
        student_id: req.student_id,
        auto_score,
        final_score: None,
        feedback: req.feedback.unwrap_or_default(),
        strictness: req.strictness.unwrap_or_default(),
        status: GradeStatus::Pending,
        graded_by: user.id.clone(),
        created_at: now,
        updated_at: now,
    };

    // 写入评分与任务进入 graded 在存储层一次完成
    let grade = match storage.grade_submitted_task(grade).await {
        Ok(Some((grade, _task))) => grade,
        Ok(None) => return Ok(not_found(ErrorCode::TaskNotFound, "Task not found")),
        Err(EduSprintError::Conflict(msg)) => {
            return Ok(conflict(ErrorCode::GradeAlreadyExists, msg));
        }
        Err(EduSprintError::InvalidTransition(msg)) => {
            return Ok(conflict(ErrorCode::GradeTaskNotSubmitted, msg));
        }
        Err(EduSprintError::Validation(msg)) => {
            return Ok(bad_request(ErrorCode::TaskNotAssigned, msg));
        }
        Err(e) => return Ok(internal_error("Grade creation failed", e)),
    };

    info!(
        "Grade {} created for task {} student {} (auto score {:.2})",
        grade.id, grade.task_id, grade.student_id, grade.auto_score
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(grade, "Grade created successfully")))
}
