use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Serialize;

use super::SystemService;
use crate::models::{ApiResponse, AppStartTime};

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub system_name: String,
    pub version: &'static str,
    pub uptime_seconds: i64,
}

pub async fn handle_ping(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or(0);

    let response = PingResponse {
        status: "ok",
        system_name: service.get_config().app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "pong")))
}
