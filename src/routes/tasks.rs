use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::tasks::requests::{
    AssignTaskRequest, CreateTaskRequest, SubmitTaskRequest, TaskListParams, UpdateTaskRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::TaskService;

// 懒加载的全局 TASK_SERVICE 实例
static TASK_SERVICE: Lazy<TaskService> = Lazy::new(TaskService::new_lazy);

// HTTP处理程序
pub async fn list_tasks(
    req: HttpRequest,
    query: web::Query<TaskListParams>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE.list_tasks(&req, query.into_inner()).await
}

pub async fn create_task(
    req: HttpRequest,
    task_data: web::Json<CreateTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE.create_task(&req, task_data.into_inner()).await
}

pub async fn get_task(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    TASK_SERVICE.get_task(&req, path.into_inner()).await
}

pub async fn get_projection(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE.get_projection(&req, path.into_inner()).await
}

pub async fn update_task(
    req: HttpRequest,
    path: web::Path<String>,
    update_data: web::Json<UpdateTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE
        .update_task(&req, path.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_task(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    TASK_SERVICE.delete_task(&req, path.into_inner()).await
}

pub async fn assign_task(
    req: HttpRequest,
    path: web::Path<String>,
    assign_data: web::Json<AssignTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE
        .assign_task(&req, path.into_inner(), assign_data.into_inner())
        .await
}

pub async fn start_task(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    TASK_SERVICE.start_task(&req, path.into_inner()).await
}

pub async fn submit_task(
    req: HttpRequest,
    path: web::Path<String>,
    submit_data: web::Json<SubmitTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE
        .submit_task(&req, path.into_inner(), submit_data.into_inner())
        .await
}

// 配置路由
pub fn configure_tasks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tasks")
            .wrap(middlewares::RequireJWT)
            .service(
                // 学生只能看到分配给自己的任务
                web::resource("").route(web::get().to(list_tasks)).route(
                    web::post()
                        .to(create_task)
                        .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                ),
            )
            .service(
                web::resource("/{task_id}")
                    .route(web::get().to(get_task))
                    .route(
                        web::put()
                            .to(update_task)
                            .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_task)
                            .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                    ),
            )
            .service(
                web::resource("/{task_id}/assign").route(
                    web::post()
                        .to(assign_task)
                        .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                ),
            )
            // 开始与提交由被分配的学生操作，在服务层校验
            .route("/{task_id}/start", web::post().to(start_task))
            .route("/{task_id}/submit", web::post().to(submit_task))
            .route("/{task_id}/projection", web::get().to(get_projection)),
    );
}
