use dashmap::mapref::entry::Entry;

use super::MemoryStorage;
use crate::errors::{EduSprintError, Result};
use crate::models::grades::{
    entities::{GradeOverride, GradeRecord},
    requests::GradeListQuery,
};
use crate::models::tasks::entities::{Task, TaskStatus};

impl MemoryStorage {
    /// 插入评分记录，同一 (task, student) 只能有一条
    pub(crate) fn create_grade_impl(&self, grade: GradeRecord) -> Result<GradeRecord> {
        let key = (grade.task_id.clone(), grade.student_id.clone());
        match self.grade_keys.entry(key) {
            Entry::Occupied(_) => Err(EduSprintError::conflict(format!(
                "Grade already exists for task {} and student {}",
                grade.task_id, grade.student_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(grade.id.clone());
                self.grades.insert(grade.id.clone(), grade.clone());
                Ok(grade)
            }
        }
    }

    /// 写入评分并把任务标记为 graded
    ///
    /// 全程持有任务的写锁，重复评分的判断先于状态判断。
    pub(crate) fn grade_submitted_task_impl(
        &self,
        grade: GradeRecord,
    ) -> Result<Option<(GradeRecord, Task)>> {
        let Some(mut slot) = self.tasks.get_mut(&grade.task_id) else {
            return Ok(None);
        };

        let key = (grade.task_id.clone(), grade.student_id.clone());
        if self.grade_keys.contains_key(&key) {
            return Err(EduSprintError::conflict(format!(
                "Grade already exists for task {} and student {}",
                grade.task_id, grade.student_id
            )));
        }
        if slot.status != TaskStatus::Submitted {
            return Err(EduSprintError::invalid_transition(format!(
                "Task is {}, only submitted tasks can be graded",
                slot.status
            )));
        }
        if slot.student_id.as_deref() != Some(grade.student_id.as_str()) {
            return Err(EduSprintError::validation(
                "Task is not assigned to this student",
            ));
        }

        let mut task = slot.clone();
        task.transition_to(TaskStatus::Graded, grade.created_at)?;
        let grade = self.create_grade_impl(grade)?;
        *slot = task.clone();
        Ok(Some((grade, task)))
    }

    pub(crate) fn get_grade_by_task_and_student_impl(
        &self,
        task_id: &str,
        student_id: &str,
    ) -> Result<Option<GradeRecord>> {
        let key = (task_id.to_string(), student_id.to_string());
        let Some(id) = self.grade_keys.get(&key).map(|id| id.value().clone()) else {
            return Ok(None);
        };
        Ok(self.grades.get(&id).map(|g| g.value().clone()))
    }

    /// 列出评分，按创建时间升序
    pub(crate) fn list_grades_impl(&self, query: GradeListQuery) -> Result<Vec<GradeRecord>> {
        let mut grades: Vec<GradeRecord> = self
            .grades
            .iter()
            .filter(|g| {
                query.task_id.as_deref().is_none_or(|id| g.task_id == id)
                    && query
                        .student_id
                        .as_deref()
                        .is_none_or(|id| g.student_id == id)
                    && query.status.is_none_or(|status| g.status == status)
            })
            .map(|g| g.value().clone())
            .collect();
        grades.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(grades)
    }

    /// 更新评分，(task, student) 不允许变化
    pub(crate) fn update_grade_impl(&self, grade: GradeRecord) -> Result<Option<GradeRecord>> {
        match self.grades.get_mut(&grade.id) {
            Some(mut slot) => {
                if slot.task_id != grade.task_id || slot.student_id != grade.student_id {
                    return Err(EduSprintError::validation(
                        "A grade cannot move to another task or student",
                    ));
                }
                *slot = grade.clone();
                Ok(Some(grade))
            }
            None => Ok(None),
        }
    }

    pub(crate) fn count_grades_for_task_impl(&self, task_id: &str) -> Result<u64> {
        Ok(self
            .grades
            .iter()
            .filter(|g| g.task_id == task_id)
            .count() as u64)
    }

    pub(crate) fn create_grade_override_impl(&self, record: GradeOverride) -> Result<GradeOverride> {
        self.grade_overrides
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    /// 覆盖记录，最新的在前
    pub(crate) fn list_grade_overrides_impl(&self, grade_id: &str) -> Result<Vec<GradeOverride>> {
        let mut records: Vec<GradeOverride> = self
            .grade_overrides
            .iter()
            .filter(|o| o.grade_id == grade_id)
            .map(|o| o.value().clone())
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }
}
