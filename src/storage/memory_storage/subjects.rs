use dashmap::mapref::entry::Entry;

use super::MemoryStorage;
use crate::errors::{EduSprintError, Result};
use crate::models::subjects::{entities::Subject, requests::SubjectListQuery};

fn code_key(code: &str) -> String {
    code.trim().to_uppercase()
}

impl MemoryStorage {
    /// 创建课程
    pub(crate) fn create_subject_impl(&self, subject: Subject) -> Result<Subject> {
        match self.subject_codes.entry(code_key(&subject.code)) {
            Entry::Occupied(_) => Err(EduSprintError::conflict(format!(
                "Subject code already in use: {}",
                subject.code
            ))),
            Entry::Vacant(slot) => {
                slot.insert(subject.id.clone());
                self.subjects.insert(subject.id.clone(), subject.clone());
                Ok(subject)
            }
        }
    }

    /// 列出课程
    pub(crate) fn list_subjects_impl(&self, query: SubjectListQuery) -> Result<Vec<Subject>> {
        let mut subjects: Vec<Subject> = self
            .subjects
            .iter()
            .filter(|s| {
                query
                    .faculty_id
                    .as_deref()
                    .is_none_or(|faculty_id| s.faculty_id == faculty_id)
            })
            .map(|s| s.value().clone())
            .collect();
        subjects.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(subjects)
    }

    /// 更新课程，代码变化时同步索引
    pub(crate) fn update_subject_impl(&self, subject: Subject) -> Result<Option<Subject>> {
        let Some(old_code) = self.subjects.get(&subject.id).map(|s| code_key(&s.code)) else {
            return Ok(None);
        };

        let new_code = code_key(&subject.code);
        if new_code != old_code {
            match self.subject_codes.entry(new_code) {
                Entry::Occupied(_) => {
                    return Err(EduSprintError::conflict(format!(
                        "Subject code already in use: {}",
                        subject.code
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(subject.id.clone());
                }
            }
            self.subject_codes.remove(&old_code);
        }

        self.subjects.insert(subject.id.clone(), subject.clone());
        Ok(Some(subject))
    }

    /// 删除课程，同时清理代码索引与选课记录
    pub(crate) fn delete_subject_impl(&self, id: &str) -> Result<bool> {
        match self.subjects.remove(id) {
            Some((_, subject)) => {
                self.subject_codes.remove(&code_key(&subject.code));
                self.enrollments.retain(|(subject_id, _), _| subject_id != id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub(crate) fn count_tasks_for_subject_impl(&self, subject_id: &str) -> Result<u64> {
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.subject_id == subject_id)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(id: &str, code: &str, faculty_id: &str) -> Subject {
        let now = chrono::Utc::now();
        Subject {
            id: id.to_string(),
            name: "Data Structures".to_string(),
            code: code.to_string(),
            description: None,
            faculty_id: faculty_id.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_code_is_unique() {
        let storage = MemoryStorage::new();
        storage
            .create_subject_impl(subject("s1", "CS201", "f1"))
            .expect("insert");
        assert!(
            storage
                .create_subject_impl(subject("s2", "cs201", "f1"))
                .is_err()
        );
    }

    #[test]
    fn test_update_moves_code_index() {
        let storage = MemoryStorage::new();
        storage
            .create_subject_impl(subject("s1", "CS201", "f1"))
            .expect("insert");
        storage
            .create_subject_impl(subject("s2", "MA101", "f1"))
            .expect("insert");

        // 改成已占用的代码被拒绝
        assert!(
            storage
                .update_subject_impl(subject("s1", "MA101", "f1"))
                .is_err()
        );

        storage
            .update_subject_impl(subject("s1", "CS202", "f1"))
            .expect("update")
            .expect("present");
        // 旧代码释放
        storage
            .create_subject_impl(subject("s3", "CS201", "f2"))
            .expect("old code is free again");

        assert!(
            storage
                .update_subject_impl(subject("missing", "XX", "f1"))
                .expect("no error")
                .is_none()
        );
    }

    #[test]
    fn test_filter_by_faculty_and_delete() {
        let storage = MemoryStorage::new();
        storage
            .create_subject_impl(subject("s1", "CS201", "f1"))
            .expect("insert");
        storage
            .create_subject_impl(subject("s2", "MA101", "f2"))
            .expect("insert");

        let query = SubjectListQuery {
            faculty_id: Some("f2".to_string()),
        };
        let listed = storage.list_subjects_impl(query).expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "s2");

        assert!(storage.delete_subject_impl("s2").expect("delete"));
        assert!(!storage.delete_subject_impl("s2").expect("delete"));
        storage
            .create_subject_impl(subject("s4", "MA101", "f1"))
            .expect("code freed by delete");
    }
}
