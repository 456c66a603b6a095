use super::MemoryStorage;
use crate::errors::{EduSprintError, Result};
use crate::models::penalties::{entities::PenaltyRecord, requests::PenaltyListQuery};

impl MemoryStorage {
    pub(crate) fn create_penalty_impl(&self, penalty: PenaltyRecord) -> Result<PenaltyRecord> {
        self.penalties.insert(penalty.id.clone(), penalty.clone());
        Ok(penalty)
    }

    /// 修改罚分记录，任务与学生不允许变化
    pub(crate) fn update_penalty_impl(&self, penalty: PenaltyRecord) -> Result<Option<PenaltyRecord>> {
        match self.penalties.get_mut(&penalty.id) {
            Some(mut slot) => {
                if slot.task_id != penalty.task_id || slot.student_id != penalty.student_id {
                    return Err(EduSprintError::validation(
                        "A penalty cannot move to another task or student",
                    ));
                }
                *slot = penalty.clone();
                Ok(Some(penalty))
            }
            None => Ok(None),
        }
    }

    /// 列出罚分记录，按登记时间升序
    pub(crate) fn list_penalties_impl(&self, query: PenaltyListQuery) -> Result<Vec<PenaltyRecord>> {
        let mut penalties: Vec<PenaltyRecord> = self
            .penalties
            .iter()
            .filter(|p| {
                query.task_id.as_deref().is_none_or(|id| p.task_id == id)
                    && query
                        .student_id
                        .as_deref()
                        .is_none_or(|id| p.student_id == id)
            })
            .map(|p| p.value().clone())
            .collect();
        penalties.sort_by(|a, b| a.applied_at.cmp(&b.applied_at).then(a.id.cmp(&b.id)));
        Ok(penalties)
    }
}
