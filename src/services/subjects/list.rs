use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{
    ApiResponse, PaginatedResponse,
    subjects::requests::{SubjectListParams, SubjectListQuery},
};
use crate::services::helpers::internal_error;

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    params: SubjectListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let query = SubjectListQuery {
        faculty_id: params.faculty_id,
    };

    match storage.list_subjects(query).await {
        Ok(subjects) => {
            let page = PaginatedResponse::from_items(subjects, &params.pagination);
            Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Subjects retrieved successfully")))
        }
        Err(e) => Ok(internal_error("Failed to list subjects", e)),
    }
}
