use std::sync::Arc;

use crate::models::{
    grades::{
        entities::{GradeOverride, GradeRecord},
        requests::GradeListQuery,
    },
    penalties::{entities::PenaltyRecord, requests::PenaltyListQuery},
    subjects::{
        entities::{Subject, SubjectEnrollment},
        requests::SubjectListQuery,
    },
    tasks::{entities::Task, requests::TaskListQuery},
    users::entities::User,
};

use crate::errors::Result;

pub mod memory_storage;

/// 在存储锁内对任务做的修改，返回 Err 时任务保持原样
pub type TaskChange = Box<dyn FnOnce(&mut Task) -> Result<()> + Send>;

/// 存储层接口
///
/// 列表方法返回按固定顺序排好的完整结果，分页由服务层完成。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，邮箱重复时返回 Conflict
    async fn create_user(&self, user: User) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息（不区分大小写）
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: &str) -> Result<bool>;

    /// 课程管理方法
    // 创建课程，课程代码重复时返回 Conflict
    async fn create_subject(&self, subject: Subject) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: &str) -> Result<Option<Subject>>;
    // 按创建时间排序
    async fn list_subjects(&self, query: SubjectListQuery) -> Result<Vec<Subject>>;
    // 整体替换，不存在时返回 None
    async fn update_subject(&self, subject: Subject) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: &str) -> Result<bool>;
    // 课程下的任务数量
    async fn count_tasks_for_subject(&self, subject_id: &str) -> Result<u64>;

    /// 选课管理方法
    // 重复选课返回 Conflict
    async fn enroll_student(&self, enrollment: SubjectEnrollment) -> Result<SubjectEnrollment>;
    async fn unenroll_student(&self, subject_id: &str, student_id: &str) -> Result<bool>;
    async fn is_student_enrolled(&self, subject_id: &str, student_id: &str) -> Result<bool>;
    // 按选课时间排序
    async fn list_subject_enrollments(&self, subject_id: &str) -> Result<Vec<SubjectEnrollment>>;
    // 学生已选的课程，按课程创建时间排序
    async fn list_subjects_for_student(&self, student_id: &str) -> Result<Vec<Subject>>;

    /// 任务管理方法
    async fn create_task(&self, task: Task) -> Result<Task>;
    async fn get_task_by_id(&self, id: &str) -> Result<Option<Task>>;
    // 按截止时间排序
    async fn list_tasks(&self, query: TaskListQuery) -> Result<Vec<Task>>;
    // 在任务的写锁内读取、校验并修改，不存在时返回 None
    async fn modify_task(&self, id: &str, change: TaskChange) -> Result<Option<Task>>;
    async fn delete_task(&self, id: &str) -> Result<bool>;

    /// 评分管理方法
    // 为已提交的任务写入评分并把任务推进到 graded，两步在同一把锁内完成
    // 已有评分返回 Conflict，任务未提交返回 InvalidTransition，学生不符返回 Validation
    async fn grade_submitted_task(
        &self,
        grade: GradeRecord,
    ) -> Result<Option<(GradeRecord, Task)>>;
    async fn get_grade_by_id(&self, id: &str) -> Result<Option<GradeRecord>>;
    async fn get_grade_by_task_and_student(
        &self,
        task_id: &str,
        student_id: &str,
    ) -> Result<Option<GradeRecord>>;
    // 按创建时间排序
    async fn list_grades(&self, query: GradeListQuery) -> Result<Vec<GradeRecord>>;
    async fn update_grade(&self, grade: GradeRecord) -> Result<Option<GradeRecord>>;
    async fn count_grades_for_task(&self, task_id: &str) -> Result<u64>;
    // 分数覆盖审计
    async fn create_grade_override(&self, record: GradeOverride) -> Result<GradeOverride>;
    // 最新的在前
    async fn list_grade_overrides(&self, grade_id: &str) -> Result<Vec<GradeOverride>>;

    /// 罚分记录方法
    async fn create_penalty(&self, penalty: PenaltyRecord) -> Result<PenaltyRecord>;
    async fn get_penalty_by_id(&self, id: &str) -> Result<Option<PenaltyRecord>>;
    // 整体替换，不存在时返回 None
    async fn update_penalty(&self, penalty: PenaltyRecord) -> Result<Option<PenaltyRecord>>;
    async fn delete_penalty(&self, id: &str) -> Result<bool>;
    // 按登记时间排序
    async fn list_penalties(&self, query: PenaltyListQuery) -> Result<Vec<PenaltyRecord>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = memory_storage::MemoryStorage::new();
    Ok(Arc::new(storage))
}
