use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{
    CreateGradeRequest, GradeListParams, GradeOverrideRequest, ReviewGradeRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::GradeService;

// 懒加载的全局 GRADE_SERVICE 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// HTTP处理程序
pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(&req, query.into_inner()).await
}

pub async fn create_grade(
    req: HttpRequest,
    grade_data: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(&req, grade_data.into_inner()).await
}

pub async fn get_grade(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_grade(&req, path.into_inner()).await
}

pub async fn review_grade(
    req: HttpRequest,
    path: web::Path<String>,
    review_data: web::Json<ReviewGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .review_grade(&req, path.into_inner(), review_data.into_inner())
        .await
}

pub async fn approve_grade(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.approve_grade(&req, path.into_inner()).await
}

pub async fn override_grade(
    req: HttpRequest,
    override_data: web::Json<GradeOverrideRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .override_grade(&req, override_data.into_inner())
        .await
}

pub async fn list_overrides(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_overrides(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_grades)).route(
                    web::post()
                        .to(create_grade)
                        .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                ),
            )
            // 必须在 /{grade_id} 之前注册
            .service(
                web::resource("/override").route(
                    web::post()
                        .to(override_grade)
                        .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                ),
            )
            .service(web::resource("/{grade_id}").route(web::get().to(get_grade)))
            .service(
                web::scope("/{grade_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles()))
                    .route("/review", web::post().to(review_grade))
                    .route("/approve", web::post().to(approve_grade))
                    .route("/overrides", web::get().to(list_overrides)),
            ),
    );
}
