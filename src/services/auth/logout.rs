use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::middlewares::{RequireJWT, user_cache_key};
use crate::models::ApiResponse;

/// 处理用户登出
/// 移除该 token 对应的用户缓存，下次请求重新从存储层解析
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if let (Some(token), Some(cache)) = (
        RequireJWT::extract_access_token(request),
        request.app_data::<web::Data<Arc<dyn ObjectCache>>>(),
    ) {
        cache.remove(&user_cache_key(&token)).await;
    }

    if let Some(user_id) = RequireJWT::extract_user_id(request) {
        tracing::info!("User {} logged out", user_id);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Logout successful")))
}
