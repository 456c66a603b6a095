use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{
    ApiResponse, PaginatedResponse,
    grades::requests::{GradeListParams, GradeListQuery},
};
use crate::services::helpers::{current_user, internal_error, scope_student_filter};

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    params: GradeListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let query = GradeListQuery {
        task_id: params.task_id,
        student_id: scope_student_filter(&user, params.student_id),
        status: params.status,
    };

    match storage.list_grades(query).await {
        Ok(grades) => {
            let page = PaginatedResponse::from_items(grades, &params.pagination);
            Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Grades retrieved successfully")))
        }
        Err(e) => Ok(internal_error("Failed to list grades", e)),
    }
}
