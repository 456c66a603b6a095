use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::PenaltyService;
use crate::models::{
    ApiResponse, ErrorCode,
    penalties::{entities::PenaltyRecord, requests::CreatePenaltyRequest},
};
use crate::services::helpers::{
    bad_request, current_user, ensure_task_owner, internal_error, load_task,
};
use crate::utils::generate_id;
use crate::utils::validate::validate_penalty_percent;

pub async fn create_penalty(
    service: &PenaltyService,
    request: &HttpRequest,
    req: CreatePenaltyRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(msg) = validate_penalty_percent(req.penalty_percent) {
        return Ok(bad_request(ErrorCode::PenaltyInvalid, msg));
    }
    let reason = req.reason.trim();
    if reason.is_empty() {
        return Ok(bad_request(
            ErrorCode::PenaltyInvalid,
            "A reason is required for a penalty",
        ));
    }

    let task = match load_task(&storage, &req.task_id).await {
        Ok(task) => task,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_task_owner(&storage, &user, &task).await {
        return Ok(resp);
    }
    if task.student_id.as_deref() != Some(req.student_id.as_str()) {
        return Ok(bad_request(
            ErrorCode::TaskNotAssigned,
            "Task is not assigned to this student",
        ));
    }

    let now = chrono::Utc::now();
    let penalty = PenaltyRecord {
        id: generate_id("penalty"),
        task_id: task.id.clone(),
        student_id: req.student_id.clone(),
        penalty_percent: req.penalty_percent,
        reason: reason.to_string(),
        applied_at: now,
        updated_at: now,
    };

    let penalty = match storage.create_penalty(penalty).await {
        Ok(penalty) => penalty,
        Err(e) => return Ok(internal_error("Failed to record penalty", e)),
    };

    info!(
        "Penalty {} of {}% recorded for student {} on task {}",
        penalty.id, penalty.penalty_percent, penalty.student_id, penalty.task_id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(penalty, "Penalty recorded successfully")))
}
