pub mod create;
pub mod delete;
pub mod enrollment;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::subjects::requests::{
    CreateSubjectRequest, EnrollStudentRequest, SubjectListParams, UpdateSubjectRequest,
};
use crate::storage::Storage;

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            super::helpers::storage_from_request(request)
        }
    }

    // 获取课程列表
    pub async fn list_subjects(
        &self,
        request: &HttpRequest,
        params: SubjectListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_subjects(self, request, params).await
    }

    // 创建课程，创建者即负责教师
    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        req: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_subject(self, request, req).await
    }

    pub async fn get_subject(
        &self,
        request: &HttpRequest,
        subject_id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_subject(self, request, &subject_id).await
    }

    pub async fn update_subject(
        &self,
        request: &HttpRequest,
        subject_id: String,
        update: UpdateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_subject(self, request, &subject_id, update).await
    }

    // 仍有任务的课程不能删除
    pub async fn delete_subject(
        &self,
        request: &HttpRequest,
        subject_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_subject(self, request, &subject_id).await
    }

    pub async fn enroll_student(
        &self,
        request: &HttpRequest,
        subject_id: String,
        req: EnrollStudentRequest,
    ) -> ActixResult<HttpResponse> {
        enrollment::enroll_student(self, request, &subject_id, req).await
    }

    pub async fn unenroll_student(
        &self,
        request: &HttpRequest,
        subject_id: String,
        student_id: String,
    ) -> ActixResult<HttpResponse> {
        enrollment::unenroll_student(self, request, &subject_id, &student_id).await
    }

    // 课程名单，仅负责教师可见
    pub async fn list_enrollments(
        &self,
        request: &HttpRequest,
        subject_id: String,
    ) -> ActixResult<HttpResponse> {
        enrollment::list_enrollments(self, request, &subject_id).await
    }

    // 学生已选课程，学生只能查看自己
    pub async fn list_student_subjects(
        &self,
        request: &HttpRequest,
        student_id: String,
    ) -> ActixResult<HttpResponse> {
        enrollment::list_student_subjects(self, request, &student_id).await
    }
}
