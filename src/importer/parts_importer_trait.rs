// ==========================================
// 测试夹具物料齐套系统 - 物料导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 文件解析 → 字段映射 → 数据清洗 → 状态派生
// ==========================================

use crate::domain::part::RawPartRow;
use crate::domain::types::{AvailabilityStatus, LaunchStatus};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::ColumnMap;
use crate::importer::file_parser::{ParsedSheet, RawRow};
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为表头 + 原始行记录
    ///
    /// # 返回
    /// - Ok(ParsedSheet): 表头与行记录（已跳过全空行）
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<ParsedSheet>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将源表头解析为标准字段 → 源列名映射
    ///
    /// # 返回
    /// - Err(MissingRequiredColumn): 找不到夹具号列
    fn resolve_columns(&self, headers: &[String], source: &str) -> ImportResult<ColumnMap>;

    /// 将原始行记录映射为 RawPartRow
    fn map_row(&self, columns: &ColumnMap, row: &RawRow) -> RawPartRow;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 2）
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM，空值/NaN → "N/A"）
    fn clean_text(&self, value: Option<&str>) -> String;

    /// 数量字段强制转换为非负整数
    ///
    /// # 返回
    /// - (数值, 是否发生强制转换)
    fn coerce_quantity(&self, value: Option<&str>) -> (u32, bool);
}

// ==========================================
// DerivationService Trait
// ==========================================
// 用途: 派生字段接口（阶段 3）
// 实现者: DerivationService
pub trait DerivationService: Send + Sync {
    /// 派生物料可用状态
    fn classify_availability(&self, required: u32, stock: u32) -> AvailabilityStatus;

    /// 派生组级上线状态
    fn derive_launch_status(&self, statuses: &[AvailabilityStatus]) -> LaunchStatus;

    /// 派生建议采购数量
    fn derive_recommended_quantity(&self, required: u32, stock: u32, p_factor: f64) -> u32;
}
