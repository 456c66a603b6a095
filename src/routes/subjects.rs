use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::subjects::requests::{
    CreateSubjectRequest, EnrollStudentRequest, SubjectListParams, UpdateSubjectRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::SubjectService;

// 懒加载的全局 SUBJECT_SERVICE 实例
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

// HTTP处理程序
pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SubjectListParams>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req, query.into_inner()).await
}

pub async fn create_subject(
    req: HttpRequest,
    subject_data: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_subject(&req, subject_data.into_inner())
        .await
}

pub async fn get_subject(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.get_subject(&req, path.into_inner()).await
}

pub async fn update_subject(
    req: HttpRequest,
    path: web::Path<String>,
    update_data: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(&req, path.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_subject(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(&req, path.into_inner()).await
}

pub async fn enroll_student(
    req: HttpRequest,
    path: web::Path<String>,
    enroll_data: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .enroll_student(&req, path.into_inner(), enroll_data.into_inner())
        .await
}

pub async fn unenroll_student(
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (subject_id, student_id) = path.into_inner();
    SUBJECT_SERVICE
        .unenroll_student(&req, subject_id, student_id)
        .await
}

pub async fn list_enrollments(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_enrollments(&req, path.into_inner()).await
}

pub async fn list_student_subjects(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .list_student_subjects(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_subjects_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_subjects)).route(
                    web::post()
                        .to(create_subject)
                        // 教师创建课程并成为负责人
                        .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                ),
            )
            // 必须在 /{subject_id} 之前注册
            .service(
                web::resource("/student/{student_id}").route(web::get().to(list_student_subjects)),
            )
            .service(
                web::resource("/{subject_id}")
                    .route(web::get().to(get_subject))
                    .route(
                        web::put()
                            .to(update_subject)
                            .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_subject)
                            .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                    ),
            )
            .service(
                web::scope("/{subject_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles()))
                    .route("/students", web::get().to(list_enrollments))
                    .route("/enroll", web::post().to(enroll_student))
                    .route("/enroll/{student_id}", web::delete().to(unenroll_student)),
            ),
    );
}
