use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::helpers::{current_user, forbidden, load_grade};

pub async fn get_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: &str,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let grade = match load_grade(&storage, grade_id).await {
        Ok(grade) => grade,
        Err(resp) => return Ok(resp),
    };
    if !user.role.is_staff() && grade.student_id != user.id {
        return Ok(forbidden(
            ErrorCode::Forbidden,
            "You can only view your own grades",
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade retrieved successfully")))
}
