use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{PenaltyService, load_owned_penalty};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::helpers::{internal_error, not_found};

pub async fn delete_penalty(
    service: &PenaltyService,
    request: &HttpRequest,
    penalty_id: &str,
) -> ActixResult<HttpResponse> {
    let (user_id, penalty) = match load_owned_penalty(service, request, penalty_id).await {
        Ok(loaded) => loaded,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_penalty(&penalty.id).await {
        Ok(true) => {
            info!(
                "Penalty {} for student {} deleted by {}",
                penalty.id, penalty.student_id, user_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Penalty deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::PenaltyNotFound, "Penalty not found")),
        Err(e) => Ok(internal_error("Penalty deletion failed", e)),
    }
}
