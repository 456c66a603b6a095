/// 距截止每多一天，名义罚分率下降的百分点
pub const PENALTY_DECAY_PERCENT_PER_DAY: f64 = 2.0;

/// 计算应扣除的满分比例
///
/// `raw = max(0, penalty_rate_percent - days * 2)`，结果为 `raw / 100`。
///
/// 结果落在 `[0, penalty_rate_percent / 100]`，对 `days` 单调不增。
/// `days` 为负（已过截止时间）时上限同样生效，扣分比例停留在名义罚分率。
/// 逾期天数不会继续按每天 2% 累加罚分，逾期多久都只扣名义罚分率。
pub fn penalty_fraction(penalty_rate_percent: f64, days_remaining: i64) -> f64 {
    let raw_percent = (penalty_rate_percent
        - days_remaining as f64 * PENALTY_DECAY_PERCENT_PER_DAY)
        .clamp(0.0, penalty_rate_percent.max(0.0));
    raw_percent / 100.0
}
