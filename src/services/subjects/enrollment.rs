//! 选课、退课与名单

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::errors::EduSprintError;
use crate::models::{
    ApiResponse, ErrorCode,
    subjects::{entities::SubjectEnrollment, requests::EnrollStudentRequest},
    users::entities::UserRole,
};
use crate::services::helpers::{
    bad_request, conflict, current_user, ensure_subject_owner, forbidden, internal_error,
    load_subject, not_found,
};

pub async fn enroll_student(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: &str,
    req: EnrollStudentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_subject_owner(&user, &subject) {
        return Ok(resp);
    }

    let student = match storage.get_user_by_id(&req.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::NotFound, "Student not found")),
        Err(e) => return Ok(internal_error("Failed to get student", e)),
    };
    if student.role != UserRole::Student {
        return Ok(bad_request(
            ErrorCode::UserRoleInvalid,
            "Only students can be enrolled in a subject",
        ));
    }

    let enrollment = SubjectEnrollment {
        subject_id: subject.id.clone(),
        student_id: student.id.clone(),
        enrolled_at: chrono::Utc::now(),
    };
    match storage.enroll_student(enrollment).await {
        Ok(enrollment) => {
            info!(
                "Student {} enrolled in subject {} by {}",
                enrollment.student_id, enrollment.subject_id, user.id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(enrollment, "Student enrolled successfully")))
        }
        Err(EduSprintError::Conflict(msg)) => {
            Ok(conflict(ErrorCode::SubjectEnrollmentExists, msg))
        }
        Err(e) => Ok(internal_error("Enrollment failed", e)),
    }
}

pub async fn unenroll_student(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: &str,
    student_id: &str,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_subject_owner(&user, &subject) {
        return Ok(resp);
    }

    // 已分配的任务保留，只是不能再给该学生分配新任务
    match storage.unenroll_student(subject_id, student_id).await {
        Ok(true) => {
            info!(
                "Student {} unenrolled from subject {} by {}",
                student_id, subject_id, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student unenrolled successfully")))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::SubjectEnrollmentNotFound,
            "Enrollment not found",
        )),
        Err(e) => Ok(internal_error("Unenrollment failed", e)),
    }
}

pub async fn list_enrollments(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: &str,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_subject_owner(&user, &subject) {
        return Ok(resp);
    }

    match storage.list_subject_enrollments(subject_id).await {
        Ok(enrollments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            enrollments,
            "Enrollments retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list enrollments", e)),
    }
}

pub async fn list_student_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    student_id: &str,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if !user.role.is_staff() && user.id != student_id {
        return Ok(forbidden(
            ErrorCode::Forbidden,
            "You can only view your own subjects",
        ));
    }
    let storage = service.get_storage(request);

    match storage.list_subjects_for_student(student_id).await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subjects,
            "Subjects retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list student subjects", e)),
    }
}
