use super::MemoryStorage;
use crate::errors::{EduSprintError, Result};
use crate::models::tasks::{entities::Task, requests::TaskListQuery};
use crate::storage::TaskChange;

impl MemoryStorage {
    /// 创建任务
    pub(crate) fn create_task_impl(&self, task: Task) -> Result<Task> {
        if self.tasks.contains_key(&task.id) {
            return Err(EduSprintError::conflict(format!(
                "Task already exists: {}",
                task.id
            )));
        }
        self.tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    /// 列出任务，按截止时间升序
    pub(crate) fn list_tasks_impl(&self, query: TaskListQuery) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| {
                query
                    .subject_id
                    .as_deref()
                    .is_none_or(|id| t.subject_id == id)
                    && query
                        .student_id
                        .as_deref()
                        .is_none_or(|id| t.student_id.as_deref() == Some(id))
                    && query.status.is_none_or(|status| t.status == status)
            })
            .map(|t| t.value().clone())
            .collect();
        tasks.sort_by(|a, b| a.due_at.cmp(&b.due_at).then(a.id.cmp(&b.id)));
        Ok(tasks)
    }

    /// 删除任务及其罚分记录
    pub(crate) fn delete_task_impl(&self, id: &str) -> Result<bool> {
        if self.tasks.remove(id).is_none() {
            return Ok(false);
        }
        self.penalties.retain(|_, p| p.task_id != id);
        Ok(true)
    }

    /// 在写锁内对最新的任务副本应用修改，成功后才写回
    pub(crate) fn modify_task_impl(&self, id: &str, change: TaskChange) -> Result<Option<Task>> {
        let Some(mut slot) = self.tasks.get_mut(id) else {
            return Ok(None);
        };
        let mut task = slot.clone();
        change(&mut task)?;
        *slot = task.clone();
        Ok(Some(task))
    }
}
