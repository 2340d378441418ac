// ==========================================
// 测试夹具物料齐套系统 - 物料领域模型
// ==========================================
// 用途: 导入层产出，查询层只读
// 字段命名: 序列化名与平面文件列名一致
// ==========================================

use crate::domain::types::{AvailabilityStatus, LaunchStatus};
use serde::{Deserialize, Serialize};

/// 文本字段缺失时的统一占位值
pub const NOT_AVAILABLE: &str = "N/A";

/// 平面文件列顺序（与 PartRecord 序列化顺序一致）
pub const FLAT_FILE_COLUMNS: [&str; 11] = [
    "testerId",
    "tester_jig_number",
    "sale_order",
    "top_assy_no",
    "part_number",
    "unitName",
    "requiredQuantity",
    "currentStock",
    "availability_status",
    "officialIncharge",
    "status",
];

// ==========================================
// PartRecord - 物料记录
// ==========================================
// 红线: 加载后不可变，快照整体重建
// 注意: 字段顺序即平面文件列顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRecord {
    #[serde(rename = "testerId")]
    pub tester_id: String, // 测试台编号
    pub tester_jig_number: String, // 夹具号
    pub sale_order: String,        // 销售订单
    pub top_assy_no: String,       // 顶层装配号
    pub part_number: String,       // 物料号

    #[serde(rename = "unitName")]
    pub unit_name: String, // 单元名称/描述

    #[serde(rename = "requiredQuantity")]
    pub required_quantity: u32, // 需求数量

    #[serde(rename = "currentStock")]
    pub current_stock: u32, // 当前库存

    pub availability_status: AvailabilityStatus, // 派生: 可用状态

    #[serde(rename = "officialIncharge")]
    pub official_incharge: String, // 负责人联系方式

    pub status: LaunchStatus, // 派生: 所在 (夹具, 销售订单) 组的上线状态
}

impl PartRecord {
    /// 缺口数量（库存不足部分，非缺料时为 0）
    pub fn deficit(&self) -> u32 {
        self.required_quantity.saturating_sub(self.current_stock)
    }
}

// ==========================================
// RawPartRow - 导入中间结构体
// ==========================================
// 用途: 文件解析 → 字段映射 → 此结构 → 清洗/派生
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPartRow {
    pub tester_id: Option<String>,
    pub jig_number: Option<String>,
    pub sale_order: Option<String>,
    pub top_assy_no: Option<String>,
    pub part_number: Option<String>,
    pub unit_name: Option<String>,
    pub required_quantity: Option<String>,
    pub current_stock: Option<String>,
    pub official_incharge: Option<String>,

    // 元信息
    pub row_number: usize,
}

// ==========================================
// PurchaseRecommendation - 采购建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseRecommendation {
    #[serde(flatten)]
    pub part: PartRecord,

    /// 采购裕量百分比
    pub p_factor: f64,

    #[serde(rename = "recommendedQuantity")]
    pub recommended_quantity: u32,
}
