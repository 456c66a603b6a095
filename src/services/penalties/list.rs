use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PenaltyService;
use crate::models::{
    ApiResponse, PaginatedResponse,
    penalties::requests::{PenaltyListParams, PenaltyListQuery},
};
use crate::services::helpers::{current_user, internal_error, scope_student_filter};

pub async fn list_penalties(
    service: &PenaltyService,
    request: &HttpRequest,
    params: PenaltyListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let query = PenaltyListQuery {
        task_id: params.task_id,
        student_id: scope_student_filter(&user, params.student_id),
    };

    match storage.list_penalties(query).await {
        Ok(penalties) => {
            let page = PaginatedResponse::from_items(penalties, &params.pagination);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(page, "Penalties retrieved successfully")))
        }
        Err(e) => Ok(internal_error("Failed to list penalties", e)),
    }
}
