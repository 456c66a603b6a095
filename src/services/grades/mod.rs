pub mod create;
pub mod get;
pub mod list;
pub mod overrides;
pub mod review;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::requests::{
    CreateGradeRequest, GradeListParams, GradeOverrideRequest, ReviewGradeRequest,
};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        params: GradeListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, params).await
    }

    // 为已提交的任务创建评分
    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        req: CreateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, req).await
    }

    pub async fn get_grade(
        &self,
        request: &HttpRequest,
        grade_id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_grade(self, request, &grade_id).await
    }

    pub async fn review_grade(
        &self,
        request: &HttpRequest,
        grade_id: String,
        req: ReviewGradeRequest,
    ) -> ActixResult<HttpResponse> {
        review::review_grade(self, request, &grade_id, req).await
    }

    pub async fn approve_grade(
        &self,
        request: &HttpRequest,
        grade_id: String,
    ) -> ActixResult<HttpResponse> {
        review::approve_grade(self, request, &grade_id).await
    }

    // 覆盖分数并留下审计记录
    pub async fn override_grade(
        &self,
        request: &HttpRequest,
        req: GradeOverrideRequest,
    ) -> ActixResult<HttpResponse> {
        overrides::override_grade(self, request, req).await
    }

    pub async fn list_overrides(
        &self,
        request: &HttpRequest,
        grade_id: String,
    ) -> ActixResult<HttpResponse> {
        overrides::list_overrides(self, request, &grade_id).await
    }
}
