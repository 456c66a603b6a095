use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::requests::UpdatePenaltyRequest;
use crate::errors::{EduSprintError, Result};
use crate::utils::validate::validate_penalty_percent;

// 罚分记录，只做登记，不参与分数推算
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyRecord {
    pub id: String,
    pub task_id: String,
    pub student_id: String,
    // 0 到 100
    pub penalty_percent: f64,
    pub reason: String,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PenaltyRecord {
    /// 修改比例或原因，任务与学生不可变
    pub fn apply_update(&mut self, update: UpdatePenaltyRequest, now: DateTime<Utc>) -> Result<()> {
        if let Some(percent) = update.penalty_percent {
            validate_penalty_percent(percent).map_err(EduSprintError::validation)?;
        }
        let reason = update.reason.as_deref().map(str::trim);
        if reason.is_some_and(str::is_empty) {
            return Err(EduSprintError::validation(
                "A reason is required for a penalty",
            ));
        }

        if let Some(percent) = update.penalty_percent {
            self.penalty_percent = percent;
        }
        if let Some(reason) = reason {
            self.reason = reason.to_string();
        }
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PenaltyRecord {
        let now = Utc::now();
        PenaltyRecord {
            id: "penalty_1".to_string(),
            task_id: "task_1".to_string(),
            student_id: "student_1".to_string(),
            penalty_percent: 10.0,
            reason: "Late submission".to_string(),
            applied_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let mut penalty = record();
        penalty
            .apply_update(
                UpdatePenaltyRequest {
                    penalty_percent: Some(25.0),
                    reason: None,
                },
                Utc::now(),
            )
            .expect("valid update");
        assert_eq!(penalty.penalty_percent, 25.0);
        assert_eq!(penalty.reason, "Late submission");
        assert!(penalty.updated_at >= penalty.applied_at);
    }

    #[test]
    fn test_invalid_update_is_rejected() {
        let mut penalty = record();
        let err = penalty
            .apply_update(
                UpdatePenaltyRequest {
                    penalty_percent: Some(120.0),
                    reason: None,
                },
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, EduSprintError::Validation(_)));

        let err = penalty
            .apply_update(
                UpdatePenaltyRequest {
                    penalty_percent: None,
                    reason: Some("   ".to_string()),
                },
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, EduSprintError::Validation(_)));
        assert_eq!(penalty.penalty_percent, 10.0);
    }
}
