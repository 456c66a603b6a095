use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::penalties::requests::{
    CreatePenaltyRequest, PenaltyListParams, UpdatePenaltyRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::PenaltyService;

// 懒加载的全局 PENALTY_SERVICE 实例
static PENALTY_SERVICE: Lazy<PenaltyService> = Lazy::new(PenaltyService::new_lazy);

pub async fn list_penalties(
    req: HttpRequest,
    query: web::Query<PenaltyListParams>,
) -> ActixResult<HttpResponse> {
    PENALTY_SERVICE.list_penalties(&req, query.into_inner()).await
}

pub async fn create_penalty(
    req: HttpRequest,
    penalty_data: web::Json<CreatePenaltyRequest>,
) -> ActixResult<HttpResponse> {
    PENALTY_SERVICE
        .create_penalty(&req, penalty_data.into_inner())
        .await
}

pub async fn get_penalty(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    PENALTY_SERVICE.get_penalty(&req, path.into_inner()).await
}

pub async fn update_penalty(
    req: HttpRequest,
    path: web::Path<String>,
    update_data: web::Json<UpdatePenaltyRequest>,
) -> ActixResult<HttpResponse> {
    PENALTY_SERVICE
        .update_penalty(&req, path.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_penalty(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    PENALTY_SERVICE.delete_penalty(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_penalties_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/penalties")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_penalties)).route(
                    web::post()
                        .to(create_penalty)
                        .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                ),
            )
            .service(
                web::resource("/{penalty_id}")
                    .route(web::get().to(get_penalty))
                    .route(
                        web::put()
                            .to(update_penalty)
                            .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_penalty)
                            .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                    ),
            ),
    );
}
