use chrono::{DateTime, Utc};
use serde::Serialize;

use super::penalty::penalty_fraction;
use super::urgency::{Urgency, classify};
use crate::models::tasks::entities::Task;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// 距截止还剩多少天，向上取整；已过截止时间为负数或 0
pub fn days_until_due(due_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = due_at.signed_duration_since(now).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

/// 任务在 `now` 时刻的预估得分
///
/// `max_score * (1 - penalty_fraction(rate, days_until_due))`，结果不小于 0。
pub fn project_score(task: &Task, now: DateTime<Utc>) -> f64 {
    let days = days_until_due(task.due_at, now);
    let fraction = penalty_fraction(task.penalty_rate_percent, days);
    (task.max_score * (1.0 - fraction)).max(0.0)
}

/// 一次预估的完整结果，供接口层展示
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreProjection {
    pub days_remaining: i64,
    pub urgency: Urgency,
    pub penalty_fraction: f64,
    pub potential_score: f64,
    pub max_score: f64,
    pub evaluated_at: DateTime<Utc>,
}

pub fn project(task: &Task, now: DateTime<Utc>) -> ScoreProjection {
    let days_remaining = days_until_due(task.due_at, now);
    ScoreProjection {
        days_remaining,
        urgency: classify(days_remaining),
        penalty_fraction: penalty_fraction(task.penalty_rate_percent, days_remaining),
        potential_score: project_score(task, now),
        max_score: task.max_score,
        evaluated_at: now,
    }
}
