use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PenaltyService, load_penalty};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::helpers::{current_user, forbidden};

pub async fn get_penalty(
    service: &PenaltyService,
    request: &HttpRequest,
    penalty_id: &str,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let penalty = match load_penalty(&*storage, penalty_id).await {
        Ok(penalty) => penalty,
        Err(resp) => return Ok(resp),
    };
    if !user.role.is_staff() && penalty.student_id != user.id {
        return Ok(forbidden(
            ErrorCode::Forbidden,
            "You can only view your own penalties",
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(penalty, "Penalty retrieved successfully")))
}
