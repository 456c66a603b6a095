//! 内存存储实现
//!
//! 所有数据保存在 DashMap 中，进程退出即丢失。唯一性约束通过辅助索引表的 entry API 保证。

mod enrollments;
mod grades;
mod penalties;
mod subjects;
mod tasks;
mod users;

use dashmap::DashMap;
use tracing::info;

use crate::models::{
    grades::entities::{GradeOverride, GradeRecord},
    penalties::entities::PenaltyRecord,
    subjects::entities::{Subject, SubjectEnrollment},
    tasks::entities::Task,
    users::entities::User,
};

/// 内存存储实现
#[derive(Default)]
pub struct MemoryStorage {
    pub(crate) users: DashMap<String, User>,
    // 小写邮箱 -> 用户 ID
    pub(crate) user_emails: DashMap<String, String>,
    pub(crate) subjects: DashMap<String, Subject>,
    // 大写课程代码 -> 课程 ID
    pub(crate) subject_codes: DashMap<String, String>,
    // (subject_id, student_id) -> 选课记录
    pub(crate) enrollments: DashMap<(String, String), SubjectEnrollment>,
    pub(crate) tasks: DashMap<String, Task>,
    pub(crate) grades: DashMap<String, GradeRecord>,
    // (task_id, student_id) -> 评分 ID
    pub(crate) grade_keys: DashMap<(String, String), String>,
    pub(crate) grade_overrides: DashMap<String, GradeOverride>,
    pub(crate) penalties: DashMap<String, PenaltyRecord>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        info!("内存存储初始化完成");
        Self::default()
    }
}

// Storage trait 实现
use crate::errors::Result;
use crate::models::{
    grades::requests::GradeListQuery, penalties::requests::PenaltyListQuery,
    subjects::requests::SubjectListQuery, tasks::requests::TaskListQuery,
};
use crate::storage::{Storage, TaskChange};
use async_trait::async_trait;

#[async_trait]
impl Storage for MemoryStorage {
    // 用户模块
    async fn create_user(&self, user: User) -> Result<User> {
        self.create_user_impl(user)
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.get_user_by_id_impl(id)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email)
    }

    async fn count_users(&self) -> Result<u64> {
        Ok(self.users.len() as u64)
    }

    async fn update_last_login(&self, id: &str) -> Result<bool> {
        self.update_last_login_impl(id)
    }

    // 课程模块
    async fn create_subject(&self, subject: Subject) -> Result<Subject> {
        self.create_subject_impl(subject)
    }

    async fn get_subject_by_id(&self, id: &str) -> Result<Option<Subject>> {
        Ok(self.subjects.get(id).map(|s| s.value().clone()))
    }

    async fn list_subjects(&self, query: SubjectListQuery) -> Result<Vec<Subject>> {
        self.list_subjects_impl(query)
    }

    async fn update_subject(&self, subject: Subject) -> Result<Option<Subject>> {
        self.update_subject_impl(subject)
    }

    async fn delete_subject(&self, id: &str) -> Result<bool> {
        self.delete_subject_impl(id)
    }

    async fn count_tasks_for_subject(&self, subject_id: &str) -> Result<u64> {
        self.count_tasks_for_subject_impl(subject_id)
    }

    // 选课模块
    async fn enroll_student(&self, enrollment: SubjectEnrollment) -> Result<SubjectEnrollment> {
        self.enroll_student_impl(enrollment)
    }

    async fn unenroll_student(&self, subject_id: &str, student_id: &str) -> Result<bool> {
        self.unenroll_student_impl(subject_id, student_id)
    }

    async fn is_student_enrolled(&self, subject_id: &str, student_id: &str) -> Result<bool> {
        Ok(self
            .enrollments
            .contains_key(&(subject_id.to_string(), student_id.to_string())))
    }

    async fn list_subject_enrollments(&self, subject_id: &str) -> Result<Vec<SubjectEnrollment>> {
        self.list_subject_enrollments_impl(subject_id)
    }

    async fn list_subjects_for_student(&self, student_id: &str) -> Result<Vec<Subject>> {
        self.list_subjects_for_student_impl(student_id)
    }

    // 任务模块
    async fn create_task(&self, task: Task) -> Result<Task> {
        self.create_task_impl(task)
    }

    async fn get_task_by_id(&self, id: &str) -> Result<Option<Task>> {
        Ok(self.tasks.get(id).map(|t| t.value().clone()))
    }

    async fn list_tasks(&self, query: TaskListQuery) -> Result<Vec<Task>> {
        self.list_tasks_impl(query)
    }

    async fn modify_task(&self, id: &str, change: TaskChange) -> Result<Option<Task>> {
        self.modify_task_impl(id, change)
    }

    async fn delete_task(&self, id: &str) -> Result<bool> {
        self.delete_task_impl(id)
    }

    // 评分模块
    async fn grade_submitted_task(
        &self,
        grade: GradeRecord,
    ) -> Result<Option<(GradeRecord, Task)>> {
        self.grade_submitted_task_impl(grade)
    }

    async fn get_grade_by_id(&self, id: &str) -> Result<Option<GradeRecord>> {
        Ok(self.grades.get(id).map(|g| g.value().clone()))
    }

    async fn get_grade_by_task_and_student(
        &self,
        task_id: &str,
        student_id: &str,
    ) -> Result<Option<GradeRecord>> {
        self.get_grade_by_task_and_student_impl(task_id, student_id)
    }

    async fn list_grades(&self, query: GradeListQuery) -> Result<Vec<GradeRecord>> {
        self.list_grades_impl(query)
    }

    async fn update_grade(&self, grade: GradeRecord) -> Result<Option<GradeRecord>> {
        self.update_grade_impl(grade)
    }

    async fn count_grades_for_task(&self, task_id: &str) -> Result<u64> {
        self.count_grades_for_task_impl(task_id)
    }

    async fn create_grade_override(&self, record: GradeOverride) -> Result<GradeOverride> {
        self.create_grade_override_impl(record)
    }

    async fn list_grade_overrides(&self, grade_id: &str) -> Result<Vec<GradeOverride>> {
        self.list_grade_overrides_impl(grade_id)
    }

    // 罚分模块
    async fn create_penalty(&self, penalty: PenaltyRecord) -> Result<PenaltyRecord> {
        self.create_penalty_impl(penalty)
    }

    async fn get_penalty_by_id(&self, id: &str) -> Result<Option<PenaltyRecord>> {
        Ok(self.penalties.get(id).map(|p| p.value().clone()))
    }

    async fn update_penalty(&self, penalty: PenaltyRecord) -> Result<Option<PenaltyRecord>> {
        self.update_penalty_impl(penalty)
    }

    async fn delete_penalty(&self, id: &str) -> Result<bool> {
        Ok(self.penalties.remove(id).is_some())
    }

    async fn list_penalties(&self, query: PenaltyListQuery) -> Result<Vec<PenaltyRecord>> {
        self.list_penalties_impl(query)
    }
}
