use dashmap::mapref::entry::Entry;

use super::MemoryStorage;
use crate::errors::{EduSprintError, Result};
use crate::models::subjects::entities::{Subject, SubjectEnrollment};

impl MemoryStorage {
    /// 学生选课
    pub(crate) fn enroll_student_impl(
        &self,
        enrollment: SubjectEnrollment,
    ) -> Result<SubjectEnrollment> {
        let key = (enrollment.subject_id.clone(), enrollment.student_id.clone());
        match self.enrollments.entry(key) {
            Entry::Occupied(_) => Err(EduSprintError::conflict(format!(
                "Student {} already enrolled in subject {}",
                enrollment.student_id, enrollment.subject_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(enrollment.clone());
                Ok(enrollment)
            }
        }
    }

    pub(crate) fn unenroll_student_impl(&self, subject_id: &str, student_id: &str) -> Result<bool> {
        Ok(self
            .enrollments
            .remove(&(subject_id.to_string(), student_id.to_string()))
            .is_some())
    }

    /// 课程名单，按选课时间升序
    pub(crate) fn list_subject_enrollments_impl(
        &self,
        subject_id: &str,
    ) -> Result<Vec<SubjectEnrollment>> {
        let mut enrollments: Vec<SubjectEnrollment> = self
            .enrollments
            .iter()
            .filter(|e| e.subject_id == subject_id)
            .map(|e| e.value().clone())
            .collect();
        enrollments.sort_by(|a, b| {
            a.enrolled_at
                .cmp(&b.enrolled_at)
                .then(a.student_id.cmp(&b.student_id))
        });
        Ok(enrollments)
    }

    /// 学生已选课程
    pub(crate) fn list_subjects_for_student_impl(&self, student_id: &str) -> Result<Vec<Subject>> {
        let subject_ids: Vec<String> = self
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .map(|e| e.subject_id.clone())
            .collect();
        let mut subjects: Vec<Subject> = subject_ids
            .iter()
            .filter_map(|id| self.subjects.get(id).map(|s| s.value().clone()))
            .collect();
        subjects.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(subjects)
    }
}
