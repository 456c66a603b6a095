use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::ApiResponse;
use crate::services::helpers::load_subject;

pub async fn get_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match load_subject(&storage, subject_id).await {
        Ok(subject) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(subject, "Subject retrieved successfully"))),
        Err(resp) => Ok(resp),
    }
}
