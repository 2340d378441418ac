// ==========================================
// 测试夹具物料齐套系统 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 标准字段映射（列名归一化 + 别名匹配）
// 说明: 同一映射同时用于原始 BOM 表与平面文件
// ==========================================

use crate::domain::part::RawPartRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use crate::importer::parts_importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

// ==========================================
// PartField - 标准字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartField {
    TesterId,
    JigNumber,
    SaleOrder,
    TopAssyNo,
    PartNumber,
    UnitName,
    RequiredQuantity,
    CurrentStock,
    OfficialIncharge,
}

impl PartField {
    pub const ALL: [PartField; 9] = [
        PartField::TesterId,
        PartField::JigNumber,
        PartField::SaleOrder,
        PartField::TopAssyNo,
        PartField::PartNumber,
        PartField::UnitName,
        PartField::RequiredQuantity,
        PartField::CurrentStock,
        PartField::OfficialIncharge,
    ];

    /// 归一化后的别名（按优先级排列）
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            PartField::TesterId => &["testerid", "testerno"],
            PartField::JigNumber => &["testerjignumber", "jignumber", "jigno", "jig"],
            PartField::SaleOrder => &["saleorder", "saleorderno", "so"],
            PartField::TopAssyNo => &["topassyno", "topassemblyno", "topassy"],
            PartField::PartNumber => &["partnumber", "partno"],
            PartField::UnitName => &["unitname", "unit", "description", "partdescription"],
            PartField::RequiredQuantity => {
                &["requiredquantity", "requiredqty", "reqqty", "qtyrequired"]
            }
            PartField::CurrentStock => &["currentstock", "stock", "stockqty", "availablestock"],
            PartField::OfficialIncharge => &[
                "officialincharge",
                "officialinchargecontact",
                "incharge",
                "contact",
            ],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartField::TesterId => "tester id",
            PartField::JigNumber => "tester jig number",
            PartField::SaleOrder => "sale order",
            PartField::TopAssyNo => "top assy no",
            PartField::PartNumber => "part number",
            PartField::UnitName => "unit name",
            PartField::RequiredQuantity => "required quantity",
            PartField::CurrentStock => "current stock",
            PartField::OfficialIncharge => "official incharge",
        }
    }
}

/// 列名归一化: 小写 + 仅保留字母数字
///
/// "Tester Jig Number" / "tester_jig_number" / "testerJigNumber" → "testerjignumber"
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

// ==========================================
// ColumnMap - 标准字段 → 源列名
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: HashMap<PartField, String>,
}

impl ColumnMap {
    pub fn get(&self, field: PartField) -> Option<&str> {
        self.columns.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: PartField) -> bool {
        self.columns.contains_key(&field)
    }

    /// 源文件中未出现的标准字段
    pub fn missing_fields(&self) -> Vec<PartField> {
        PartField::ALL
            .iter()
            .copied()
            .filter(|f| !self.contains(*f))
            .collect()
    }
}

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn resolve_columns(&self, headers: &[String], source: &str) -> ImportResult<ColumnMap> {
        let normalized: Vec<(String, &String)> = headers
            .iter()
            .map(|h| (normalize_header(h), h))
            .collect();

        let mut columns = HashMap::new();
        for field in PartField::ALL {
            // 别名优先级高于列顺序
            let hit = field.aliases().iter().find_map(|alias| {
                normalized
                    .iter()
                    .find(|(norm, _)| norm == alias)
                    .map(|(_, raw)| (*raw).clone())
            });
            if let Some(raw) = hit {
                columns.insert(field, raw);
            }
        }

        if !columns.contains_key(&PartField::JigNumber) {
            return Err(ImportError::MissingRequiredColumn {
                file: source.to_string(),
                column: PartField::JigNumber.label().to_string(),
            });
        }

        Ok(ColumnMap { columns })
    }

    fn map_row(&self, columns: &ColumnMap, row: &RawRow) -> RawPartRow {
        let get = |field: PartField| -> Option<String> {
            let header = columns.get(field)?;
            let value = row.cells.get(header)?.trim();
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        };

        RawPartRow {
            tester_id: get(PartField::TesterId),
            jig_number: get(PartField::JigNumber),
            sale_order: get(PartField::SaleOrder),
            top_assy_no: get(PartField::TopAssyNo),
            part_number: get(PartField::PartNumber),
            unit_name: get(PartField::UnitName),
            required_quantity: get(PartField::RequiredQuantity),
            current_stock: get(PartField::CurrentStock),
            official_incharge: get(PartField::OfficialIncharge),
            row_number: row.row_number,
        }
    }
}
