pub mod auth;

pub mod subjects;

pub mod tasks;

pub mod grades;

pub mod penalties;

pub mod system;

pub use auth::configure_auth_routes;
pub use grades::configure_grades_routes;
pub use penalties::configure_penalties_routes;
pub use subjects::configure_subjects_routes;
pub use system::configure_system_routes;
pub use tasks::configure_tasks_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_system_routes)
        .configure(configure_auth_routes)
        .configure(configure_subjects_routes)
        .configure(configure_tasks_routes)
        .configure(configure_grades_routes)
        .configure(configure_penalties_routes);
}
