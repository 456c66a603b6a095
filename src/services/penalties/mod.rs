pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::helpers::{current_user, ensure_task_owner, internal_error, load_task, not_found};
use crate::models::ErrorCode;
use crate::models::penalties::{
    entities::PenaltyRecord,
    requests::{CreatePenaltyRequest, PenaltyListParams, UpdatePenaltyRequest},
};
use crate::storage::Storage;

pub struct PenaltyService {
    storage: Option<Arc<dyn Storage>>,
}

impl PenaltyService {
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

    pub async fn list_penalties(
        &self,
        request: &HttpRequest,
        params: PenaltyListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_penalties(self, request, params).await
    }

    pub async fn create_penalty(
        &self,
        request: &HttpRequest,
        req: CreatePenaltyRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_penalty(self, request, req).await
    }

    pub async fn get_penalty(
        &self,
        request: &HttpRequest,
        penalty_id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_penalty(self, request, &penalty_id).await
    }

    // 只有课程负责人能修改或删除罚分
    pub async fn update_penalty(
        &self,
        request: &HttpRequest,
        penalty_id: String,
        update: UpdatePenaltyRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_penalty(self, request, &penalty_id, update).await
    }

    pub async fn delete_penalty(
        &self,
        request: &HttpRequest,
        penalty_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_penalty(self, request, &penalty_id).await
    }
}

pub(crate) async fn load_penalty(
    storage: &dyn Storage,
    penalty_id: &str,
) -> Result<PenaltyRecord, HttpResponse> {
    match storage.get_penalty_by_id(penalty_id).await {
        Ok(Some(penalty)) => Ok(penalty),
        Ok(None) => Err(not_found(ErrorCode::PenaltyNotFound, "Penalty not found")),
        Err(e) => Err(internal_error("Failed to get penalty", e)),
    }
}

/// 加载罚分记录，并校验当前用户管理其任务所属课程
pub(crate) async fn load_owned_penalty(
    service: &PenaltyService,
    request: &HttpRequest,
    penalty_id: &str,
) -> Result<(String, PenaltyRecord), HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let penalty = load_penalty(&*storage, penalty_id).await?;
    let task = load_task(&storage, &penalty.task_id).await?;
    ensure_task_owner(&storage, &user, &task).await?;
    Ok((user.id, penalty))
}
