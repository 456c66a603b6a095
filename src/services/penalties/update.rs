use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{PenaltyService, load_owned_penalty};
use crate::models::{ApiResponse, ErrorCode, penalties::requests::UpdatePenaltyRequest};
use crate::services::helpers::{bad_request, internal_error, not_found};

pub async fn update_penalty(
    service: &PenaltyService,
    request: &HttpRequest,
    penalty_id: &str,
    update: UpdatePenaltyRequest,
) -> ActixResult<HttpResponse> {
    let (user_id, mut penalty) = match load_owned_penalty(service, request, penalty_id).await {
        Ok(loaded) => loaded,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(e) = penalty.apply_update(update, chrono::Utc::now()) {
        return Ok(bad_request(ErrorCode::PenaltyInvalid, e.message()));
    }

    match storage.update_penalty(penalty).await {
        Ok(Some(penalty)) => {
            info!(
                "Penalty {} updated by {} ({}%: {})",
                penalty.id, user_id, penalty.penalty_percent, penalty.reason
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(penalty, "Penalty updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::PenaltyNotFound, "Penalty not found")),
        Err(e) => Ok(internal_error("Penalty update failed", e)),
    }
}
