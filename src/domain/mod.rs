// ==========================================
// 测试夹具物料齐套系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件访问逻辑,不含判定逻辑
// ==========================================

pub mod part;
pub mod types;

// 重导出核心类型
pub use part::{
    PartRecord, PurchaseRecommendation, RawPartRow, FLAT_FILE_COLUMNS, NOT_AVAILABLE,
};
pub use types::{AvailabilityStatus, LaunchStatus};
