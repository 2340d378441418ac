// ==========================================
// 测试夹具物料齐套系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数量强制转换
// 红线: 脏数据一律降级为默认值，不中断导入
// ==========================================

use crate::domain::part::NOT_AVAILABLE;
use crate::importer::parts_importer_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: Option<&str>) -> String {
        match value.map(str::trim) {
            None | Some("") => NOT_AVAILABLE.to_string(),
            // 表格工具导出的空值标记
            Some(v) if v.eq_ignore_ascii_case("nan") || v.eq_ignore_ascii_case("none") => {
                NOT_AVAILABLE.to_string()
            }
            Some(v) => v.to_string(),
        }
    }

    fn coerce_quantity(&self, value: Option<&str>) -> (u32, bool) {
        let text = match value.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => return (0, true),
        };

        // 整数快速路径
        if let Ok(n) = text.parse::<u32>() {
            return (n, false);
        }

        // 兼容千分位与 Excel 浮点格式（"1,200" / "5.0"）
        let cleaned: String = text.chars().filter(|c| *c != ',').collect();
        match cleaned.parse::<f64>() {
            Ok(f) if f.is_finite() && f >= 0.0 => {
                let truncated = f.trunc();
                let coerced = truncated != f || cleaned != text;
                if truncated > u32::MAX as f64 {
                    (u32::MAX, true)
                } else {
                    (truncated as u32, coerced)
                }
            }
            _ => (0, true),
        }
    }
}
