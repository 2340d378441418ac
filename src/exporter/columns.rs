// ==========================================
// 测试夹具物料齐套系统 - 导出列定义
// ==========================================
// 红线: 列顺序与表头文本固定，下游表格依赖此顺序
// ==========================================

use crate::domain::part::{PartRecord, PurchaseRecommendation};

/// 导出列（字段名, 表头）
pub const EXPORT_COLUMNS: [(&str, &str); 10] = [
    ("tester_jig_number", "Tester Jig Number"),
    ("sale_order", "Sale Order"),
    ("testerId", "Tester ID"),
    ("part_number", "Part Number"),
    ("unitName", "Unit Name"),
    ("requiredQuantity", "Required Quantity"),
    ("currentStock", "Current Stock"),
    ("availability_status", "Availability Status"),
    ("officialIncharge", "Official Incharge (Contact)"),
    ("status", "Part Status"),
];

/// 采购建议导出追加列
pub const RECOMMENDED_EXTRA_COLUMNS: [&str; 2] = ["P-Factor (%)", "Recommended Quantity"];

/// 导出类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    AllParts,
    Shortage,
    Recommended,
}

impl ExportKind {
    pub fn sheet_name(&self) -> &'static str {
        match self {
            ExportKind::AllParts => "All_Parts_List",
            ExportKind::Shortage => "Shortage List",
            ExportKind::Recommended => "Recommended Purchase",
        }
    }

    /// 下载文件名
    pub fn file_name(&self, jig_number: &str) -> String {
        let prefix = match self {
            ExportKind::AllParts => "HAL_All_Parts",
            ExportKind::Shortage => "HAL_Shortage_List",
            ExportKind::Recommended => "HAL_Recommended_Purchase",
        };
        format!("{}_{}.xlsx", prefix, sanitize_file_component(jig_number))
    }

    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers: Vec<&'static str> = EXPORT_COLUMNS.iter().map(|(_, h)| *h).collect();
        if *self == ExportKind::Recommended {
            headers.extend(RECOMMENDED_EXTRA_COLUMNS);
        }
        headers
    }
}

/// 单元格值
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

/// 物料记录 → 行（按 EXPORT_COLUMNS 顺序）
pub fn part_row(part: &PartRecord) -> Vec<CellValue> {
    vec![
        CellValue::Text(part.tester_jig_number.clone()),
        CellValue::Text(part.sale_order.clone()),
        CellValue::Text(part.tester_id.clone()),
        CellValue::Text(part.part_number.clone()),
        CellValue::Text(part.unit_name.clone()),
        CellValue::Number(f64::from(part.required_quantity)),
        CellValue::Number(f64::from(part.current_stock)),
        CellValue::Text(part.availability_status.to_string()),
        CellValue::Text(part.official_incharge.clone()),
        CellValue::Text(part.status.to_string()),
    ]
}

/// 采购建议 → 行（基础列 + 追加列）
pub fn recommendation_row(rec: &PurchaseRecommendation) -> Vec<CellValue> {
    let mut row = part_row(&rec.part);
    row.push(CellValue::Number(rec.p_factor));
    row.push(CellValue::Number(f64::from(rec.recommended_quantity)));
    row
}

// 文件名只保留安全字符，避免 Content-Disposition 注入
fn sanitize_file_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_fixed_order() {
        assert_eq!(
            ExportKind::Shortage.headers(),
            vec![
                "Tester Jig Number",
                "Sale Order",
                "Tester ID",
                "Part Number",
                "Unit Name",
                "Required Quantity",
                "Current Stock",
                "Availability Status",
                "Official Incharge (Contact)",
                "Part Status",
            ]
        );

        let recommended = ExportKind::Recommended.headers();
        assert_eq!(recommended.len(), 12);
        assert_eq!(recommended[10], "P-Factor (%)");
        assert_eq!(recommended[11], "Recommended Quantity");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            ExportKind::AllParts.file_name("JIG-100"),
            "HAL_All_Parts_JIG-100.xlsx"
        );
        assert_eq!(
            ExportKind::Shortage.file_name("JIG 7/\"x\""),
            "HAL_Shortage_List_JIG_7__x_.xlsx"
        );
    }
}
