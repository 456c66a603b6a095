use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::errors::EduSprintError;
use crate::models::{
    ApiResponse, ErrorCode,
    subjects::{entities::Subject, requests::CreateSubjectRequest},
};
use crate::services::helpers::{bad_request, conflict, current_user, internal_error};
use crate::utils::generate_id;
use crate::utils::validate::{validate_name, validate_subject_code};

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    req: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(msg) = validate_name(&req.name) {
        return Ok(bad_request(ErrorCode::SubjectInvalid, msg));
    }
    if let Err(msg) = validate_subject_code(&req.code) {
        return Ok(bad_request(ErrorCode::SubjectInvalid, msg));
    }

    let now = chrono::Utc::now();
    let subject = Subject {
        id: generate_id("subject"),
        name: req.name.trim().to_string(),
        code: req.code.to_uppercase(),
        description: req.description,
        faculty_id: user.id.clone(),
        created_at: now,
        updated_at: now,
    };

    match storage.create_subject(subject).await {
        Ok(subject) => {
            info!("Faculty {} created subject {} ({})", user.id, subject.id, subject.code);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(EduSprintError::Conflict(msg)) => Ok(conflict(ErrorCode::SubjectInvalid, msg)),
        Err(e) => Ok(internal_error("Subject creation failed", e)),
    }
}
