use serde::Serialize;

use super::entities::{GradeOverride, GradeRecord};

/// 覆盖分数后的评分记录及本次审计记录
#[derive(Debug, Serialize)]
pub struct GradeOverrideResponse {
    pub grade: GradeRecord,
    pub audit: GradeOverride,
}
