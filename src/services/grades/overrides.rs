use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use super::review::{load_owned_grade, save};
use crate::models::{
    ApiResponse, ErrorCode,
    grades::{
        entities::GradeOverride, requests::GradeOverrideRequest,
        responses::GradeOverrideResponse,
    },
};
use crate::services::helpers::{
    bad_request, current_user, ensure_task_owner, internal_error, load_task, not_found,
};
use crate::utils::generate_id;
use crate::utils::validate::validate_score;

pub async fn override_grade(
    service: &GradeService,
    request: &HttpRequest,
    req: GradeOverrideRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let reason = req.reason.trim();
    if reason.is_empty() {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "A reason is required to override a grade",
        ));
    }

    let task = match load_task(&storage, &req.task_id).await {
        Ok(task) => task,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_task_owner(&storage, &user, &task).await {
        return Ok(resp);
    }
    if let Err(msg) = validate_score(req.final_score, task.max_score) {
        return Ok(bad_request(ErrorCode::GradeScoreInvalid, msg));
    }

    let mut grade = match storage
        .get_grade_by_task_and_student(&req.task_id, &req.student_id)
        .await
    {
        Ok(Some(grade)) => grade,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::GradeNotFound,
                "No grade exists for this task and student",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to get grade", e)),
    };

    let now = chrono::Utc::now();
    let audit = GradeOverride {
        id: generate_id("override"),
        grade_id: grade.id.clone(),
        faculty_id: user.id.clone(),
        original_score: grade.effective_score(),
        override_score: req.final_score,
        reason: reason.to_string(),
        created_at: now,
    };
    let audit = match storage.create_grade_override(audit).await {
        Ok(audit) => audit,
        Err(e) => return Ok(internal_error("Failed to record grade override", e)),
    };

    grade.apply_override(req.final_score, reason, now);
    let grade = match save(&*storage, grade).await {
        Ok(grade) => grade,
        Err(resp) => return Ok(resp),
    };

    info!(
        "Faculty {} overrode grade {} from {:.2} to {:.2}: {}",
        user.id, grade.id, audit.original_score, audit.override_score, audit.reason
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GradeOverrideResponse { grade, audit },
        "Grade overridden successfully",
    )))
}

pub async fn list_overrides(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: &str,
) -> ActixResult<HttpResponse> {
    let (_user_id, grade, _task) = match load_owned_grade(service, request, grade_id).await {
        Ok(loaded) => loaded,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.list_grade_overrides(&grade.id).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            records,
            "Grade overrides retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list grade overrides", e)),
    }
}
