//! 截止时间罚分模型
//!
//! 纯计算模块，不做 I/O、不持有状态，所有函数都只依赖参数和调用方传入的当前时间。
//!
//! - `penalty`: 罚分表，把天数换算成扣分比例
//! - `projector`: 结合任务满分计算实时的预估得分
//! - `urgency`: 把剩余天数映射为紧急程度
//!
//! 注意：公式里的天数实际上是"距截止还剩几天"，罚分随天数增大而减小。
//! 这一极性与产品文案描述的"逾期后罚分递增"相反，目前按现有行为保留，
//! 是否翻转需要产品确认。

pub mod penalty;
pub mod projector;
pub mod urgency;

pub use penalty::{PENALTY_DECAY_PERCENT_PER_DAY, penalty_fraction};
pub use projector::{ScoreProjection, days_until_due, project, project_score};
pub use urgency::{Urgency, classify};
