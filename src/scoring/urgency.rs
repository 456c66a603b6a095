use serde::Serialize;

/// 截止时间紧急程度，只用于提醒展示，不参与评分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Urgent,
    High,
    Medium,
    Low,
}

/// 边界值 2、5、10 归入更宽松的一档
pub fn classify(days_remaining: i64) -> Urgency {
    if days_remaining < 2 {
        Urgency::Urgent
    } else if days_remaining < 5 {
        Urgency::High
    } else if days_remaining < 10 {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets() {
        assert_eq!(classify(1), Urgency::Urgent);
        assert_eq!(classify(4), Urgency::High);
        assert_eq!(classify(9), Urgency::Medium);
        assert_eq!(classify(10), Urgency::Low);
    }

    #[test]
    fn test_boundaries_map_to_upper_bucket() {
        assert_eq!(classify(2), Urgency::High);
        assert_eq!(classify(5), Urgency::Medium);
        assert_eq!(classify(10), Urgency::Low);
    }

    #[test]
    fn test_overdue_is_urgent() {
        assert_eq!(classify(0), Urgency::Urgent);
        assert_eq!(classify(-7), Urgency::Urgent);
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_string(&Urgency::Medium).expect("serializable");
        assert_eq!(json, "\"medium\"");
    }
}
