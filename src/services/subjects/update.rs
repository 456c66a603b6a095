use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::errors::EduSprintError;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::UpdateSubjectRequest};
use crate::services::helpers::{
    bad_request, conflict, current_user, ensure_subject_owner, internal_error, load_subject,
    not_found,
};
use crate::utils::validate::{validate_name, validate_subject_code};

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: &str,
    update: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let mut subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_subject_owner(&user, &subject) {
        return Ok(resp);
    }

    if let Some(name) = update.name {
        if let Err(msg) = validate_name(&name) {
            return Ok(bad_request(ErrorCode::SubjectInvalid, msg));
        }
        subject.name = name.trim().to_string();
    }
    if let Some(code) = update.code {
        if let Err(msg) = validate_subject_code(&code) {
            return Ok(bad_request(ErrorCode::SubjectInvalid, msg));
        }
        subject.code = code.to_uppercase();
    }
    if let Some(description) = update.description {
        subject.description = Some(description);
    }
    subject.updated_at = chrono::Utc::now();

    match storage.update_subject(subject).await {
        Ok(Some(subject)) => {
            info!("Subject {} updated by {}", subject.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(subject, "Subject updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(EduSprintError::Conflict(msg)) => Ok(conflict(ErrorCode::SubjectInvalid, msg)),
        Err(e) => Ok(internal_error("Subject update failed", e)),
    }
}
