use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::models::{
    ApiResponse, ErrorCode,
    grades::{entities::GradeRecord, requests::ReviewGradeRequest},
    tasks::entities::Task,
};
use crate::services::helpers::{
    bad_request, conflict, current_user, ensure_task_owner, internal_error, load_grade, load_task,
    not_found,
};
use crate::storage::Storage;
use crate::utils::validate::validate_score;

pub async fn review_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: &str,
    req: ReviewGradeRequest,
) -> ActixResult<HttpResponse> {
    let (user_id, mut grade, task) = match load_owned_grade(service, request, grade_id).await {
        Ok(loaded) => loaded,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(msg) = validate_score(req.final_score, task.max_score) {
        return Ok(bad_request(ErrorCode::GradeScoreInvalid, msg));
    }
    if let Err(e) = grade.review(req.final_score, req.feedback, chrono::Utc::now()) {
        return Ok(conflict(ErrorCode::GradeAlreadyApproved, e.message()));
    }

    match save(&*storage, grade).await {
        Ok(grade) => {
            info!(
                "Faculty {} reviewed grade {} with score {:.2}",
                user_id, grade.id, req.final_score
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade reviewed successfully")))
        }
        Err(resp) => Ok(resp),
    }
}

pub async fn approve_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: &str,
) -> ActixResult<HttpResponse> {
    let (user_id, mut grade, _task) = match load_owned_grade(service, request, grade_id).await {
        Ok(loaded) => loaded,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    grade.approve(chrono::Utc::now());
    match save(&*storage, grade).await {
        Ok(grade) => {
            info!("Faculty {} approved grade {}", user_id, grade.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade approved successfully")))
        }
        Err(resp) => Ok(resp),
    }
}

/// 加载评分及其任务，并校验当前用户是课程负责人
pub(super) async fn load_owned_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: &str,
) -> Result<(String, GradeRecord, Task), HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let grade = load_grade(&storage, grade_id).await?;
    let task = load_task(&storage, &grade.task_id).await?;
    ensure_task_owner(&storage, &user, &task).await?;
    Ok((user.id, grade, task))
}

pub(super) async fn save(
    storage: &dyn Storage,
    grade: GradeRecord,
) -> Result<GradeRecord, HttpResponse> {
    match storage.update_grade(grade).await {
        Ok(Some(grade)) => Ok(grade),
        Ok(None) => Err(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Err(internal_error("Grade update failed", e)),
    }
}
