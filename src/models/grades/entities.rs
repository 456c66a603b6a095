use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{EduSprintError, Result};

/// 评分严格程度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Loose,
    #[default]
    Medium,
    Hard,
}

/// 评分状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeStatus {
    #[default]
    Pending,
    Reviewed,
    Approved,
}

impl std::fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeStatus::Pending => write!(f, "pending"),
            GradeStatus::Reviewed => write!(f, "reviewed"),
            GradeStatus::Approved => write!(f, "approved"),
        }
    }
}

// 评分记录，每个 (task, student) 只有一条
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRecord {
    pub id: String,
    pub task_id: String,
    pub student_id: String,
    // 系统按提交时间计算的分数
    pub auto_score: f64,
    // 教师给出的最终分数
    pub final_score: Option<f64>,
    pub feedback: String,
    pub strictness: Strictness,
    pub status: GradeStatus,
    pub graded_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GradeRecord {
    /// 有最终分数时以最终分数为准
    pub fn effective_score(&self) -> f64 {
        self.final_score.unwrap_or(self.auto_score)
    }

    /// 教师复核，已批准的记录不能再复核
    pub fn review(
        &mut self,
        final_score: f64,
        feedback: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if self.status == GradeStatus::Approved {
            return Err(EduSprintError::conflict(format!(
                "Grade {} is already approved",
                self.id
            )));
        }
        self.final_score = Some(final_score);
        if let Some(feedback) = feedback {
            self.feedback = feedback;
        }
        self.status = GradeStatus::Reviewed;
        self.updated_at = now;
        Ok(())
    }

    pub fn approve(&mut self, now: DateTime<Utc>) {
        if self.status != GradeStatus::Approved {
            self.status = GradeStatus::Approved;
            self.updated_at = now;
        }
    }

    /// 覆盖分数：写入最终分数并在反馈末尾追加原因
    pub fn apply_override(&mut self, final_score: f64, reason: &str, now: DateTime<Utc>) {
        let marker = format!("[OVERRIDDEN: {reason}]");
        self.feedback = if self.feedback.is_empty() {
            marker
        } else {
            format!("{} {marker}", self.feedback)
        };
        self.final_score = Some(final_score);
        self.status = GradeStatus::Approved;
        self.updated_at = now;
    }
}

/// 分数覆盖审计记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeOverride {
    pub id: String,
    pub grade_id: String,
    pub faculty_id: String,
    pub original_score: f64,
    pub override_score: f64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade() -> GradeRecord {
        GradeRecord {
            id: "grade_1".to_string(),
            task_id: "task_1".to_string(),
            student_id: "student_1".to_string(),
            auto_score: 8.5,
            final_score: None,
            feedback: "Good structure".to_string(),
            strictness: Strictness::default(),
            status: GradeStatus::default(),
            graded_by: "faculty_1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_score_prefers_final() {
        let mut g = grade();
        assert_eq!(g.effective_score(), 8.5);
        g.final_score = Some(9.0);
        assert_eq!(g.effective_score(), 9.0);
    }

    #[test]
    fn test_review_refused_after_approval() {
        let mut g = grade();
        g.review(9.0, None, Utc::now()).expect("pending grade");
        assert_eq!(g.status, GradeStatus::Reviewed);
        assert_eq!(g.feedback, "Good structure");

        g.approve(Utc::now());
        let err = g.review(7.0, None, Utc::now()).unwrap_err();
        assert_eq!(err.code(), "E006");
        assert_eq!(g.final_score, Some(9.0));
    }

    #[test]
    fn test_override_appends_reason() {
        let mut g = grade();
        g.apply_override(10.0, "Regrade request accepted", Utc::now());
        assert_eq!(
            g.feedback,
            "Good structure [OVERRIDDEN: Regrade request accepted]"
        );
        assert_eq!(g.status, GradeStatus::Approved);
        assert_eq!(g.effective_score(), 10.0);

        let mut empty = grade();
        empty.feedback.clear();
        empty.apply_override(5.0, "late", Utc::now());
        assert_eq!(empty.feedback, "[OVERRIDDEN: late]");
    }

    #[test]
    fn test_enums_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&Strictness::Hard).expect("serializable"),
            "\"hard\""
        );
        assert_eq!(
            serde_json::to_string(&GradeStatus::Approved).expect("serializable"),
            "\"approved\""
        );
    }
}
