// ==========================================
// 测试夹具物料齐套系统 - 领域类型定义
// ==========================================
// 职责: 物料可用状态 / 夹具上线状态
// 序列化格式: 与平面文件及前端展示文本一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 物料可用状态 (Availability Status)
// ==========================================
// 红线: 仅由 (需求数量, 当前库存) 决定，不接受外部覆写
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    #[serde(rename = "Not Applicable")]
    NotApplicable, // 无需求
    Adequate, // 恰好齐套
    Shortage, // 缺料
    Surplus,  // 富余
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::NotApplicable => "Not Applicable",
            AvailabilityStatus::Adequate => "Adequate",
            AvailabilityStatus::Shortage => "Shortage",
            AvailabilityStatus::Surplus => "Surplus",
        }
    }

    pub fn is_shortage(&self) -> bool {
        matches!(self, AvailabilityStatus::Shortage)
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 上线状态 (Launch Status)
// ==========================================
// 聚合口径: (夹具号, 销售订单) 组内任一物料缺料 → ShortageExists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaunchStatus {
    #[serde(rename = "Shortage-exists")]
    ShortageExists, // 存在缺料，不可上线
    Ready, // 齐套，可上线
}

impl LaunchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchStatus::ShortageExists => "Shortage-exists",
            LaunchStatus::Ready => "Ready",
        }
    }
}

impl fmt::Display for LaunchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
