// ==========================================
// 测试夹具物料齐套系统 - 物料导入管道
// ==========================================
// 流程: 解析 → 映射 → 清洗 → 派生可用状态 → 派生上线状态
// 说明: 上线状态跨文件聚合，须在全部记录汇总后统一派生
// ==========================================

use crate::domain::part::{PartRecord, NOT_AVAILABLE};
use crate::domain::types::{AvailabilityStatus, LaunchStatus};
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::derivation::DerivationService as DerivationServiceImpl;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{FieldMapper as FieldMapperImpl, PartField};
use crate::importer::file_parser::{ParsedSheet, UniversalFileParser};
use crate::importer::parts_importer_trait::{
    DataCleaner, DerivationService, FieldMapper, FileParser,
};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// 单次管道运行统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// 非空数据行数
    pub rows_read: usize,
    /// 成功构建的记录数
    pub rows_built: usize,
    /// 因缺少夹具号被跳过的行数
    pub rows_skipped: usize,
    /// 数量字段发生强制转换的行数
    pub rows_coerced: usize,
    /// 无法读取而跳过的记录数
    pub rows_malformed: usize,
}

impl PipelineStats {
    pub fn merge(&mut self, other: PipelineStats) {
        self.rows_read += other.rows_read;
        self.rows_built += other.rows_built;
        self.rows_skipped += other.rows_skipped;
        self.rows_coerced += other.rows_coerced;
        self.rows_malformed += other.rows_malformed;
    }
}

// ==========================================
// PartsPipeline
// ==========================================
pub struct PartsPipeline {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
    derivation_service: Box<dyn DerivationService>,
}

impl Default for PartsPipeline {
    fn default() -> Self {
        Self::new(
            Box::new(UniversalFileParser),
            Box::new(FieldMapperImpl),
            Box::new(DataCleanerImpl),
            Box::new(DerivationServiceImpl),
        )
    }
}

impl PartsPipeline {
    pub fn new(
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        data_cleaner: Box<dyn DataCleaner>,
        derivation_service: Box<dyn DerivationService>,
    ) -> Self {
        Self {
            file_parser,
            field_mapper,
            data_cleaner,
            derivation_service,
        }
    }

    /// 读取单个文件并构建记录（上线状态为临时值）
    pub fn read_file(&self, path: &Path) -> ImportResult<(Vec<PartRecord>, PipelineStats)> {
        let sheet = self.file_parser.parse_sheet(path)?;
        debug!(source = %sheet.source, rows = sheet.rows.len(), "文件解析完成");
        self.build_records(&sheet)
    }

    /// 由已解析工作表构建记录（上线状态为临时值）
    pub fn build_records(
        &self,
        sheet: &ParsedSheet,
    ) -> ImportResult<(Vec<PartRecord>, PipelineStats)> {
        let columns = self.field_mapper.resolve_columns(&sheet.headers, &sheet.source)?;

        for field in columns.missing_fields() {
            if matches!(field, PartField::RequiredQuantity | PartField::CurrentStock) {
                warn!(source = %sheet.source, column = field.label(), "缺少数量列，按 0 处理");
            }
        }

        let mut stats = PipelineStats {
            rows_read: sheet.rows.len(),
            rows_malformed: sheet.malformed_rows,
            ..Default::default()
        };
        let mut records = Vec::with_capacity(sheet.rows.len());

        for row in &sheet.rows {
            let raw = self.field_mapper.map_row(&columns, row);

            // 无夹具号无法分组（含 nan / None 等空值标记）
            let jig_number = self.data_cleaner.clean_text(raw.jig_number.as_deref());
            if jig_number == NOT_AVAILABLE {
                warn!(source = %sheet.source, row_number = raw.row_number, "缺少夹具号，跳过该行");
                stats.rows_skipped += 1;
                continue;
            }

            let (required_quantity, required_coerced) = self
                .data_cleaner
                .coerce_quantity(raw.required_quantity.as_deref());
            let (current_stock, stock_coerced) = self
                .data_cleaner
                .coerce_quantity(raw.current_stock.as_deref());
            if required_coerced || stock_coerced {
                debug!(
                    row_number = raw.row_number,
                    required = ?raw.required_quantity,
                    stock = ?raw.current_stock,
                    "数量字段已强制转换"
                );
                stats.rows_coerced += 1;
            }

            let availability_status = self
                .derivation_service
                .classify_availability(required_quantity, current_stock);

            records.push(PartRecord {
                tester_id: self.data_cleaner.clean_text(raw.tester_id.as_deref()),
                tester_jig_number: jig_number,
                sale_order: self.data_cleaner.clean_text(raw.sale_order.as_deref()),
                top_assy_no: self.data_cleaner.clean_text(raw.top_assy_no.as_deref()),
                part_number: self.data_cleaner.clean_text(raw.part_number.as_deref()),
                unit_name: self.data_cleaner.clean_text(raw.unit_name.as_deref()),
                required_quantity,
                current_stock,
                availability_status,
                official_incharge: self
                    .data_cleaner
                    .clean_text(raw.official_incharge.as_deref()),
                status: LaunchStatus::Ready,
            });
        }

        stats.rows_built = records.len();
        Ok((records, stats))
    }

    /// 按 (夹具号, 销售订单) 聚合并回写上线状态
    pub fn assign_launch_status(&self, records: &mut [PartRecord]) {
        let mut groups: HashMap<(String, String), Vec<AvailabilityStatus>> = HashMap::new();
        for record in records.iter() {
            groups
                .entry((
                    record.tester_jig_number.clone(),
                    record.sale_order.clone(),
                ))
                .or_default()
                .push(record.availability_status);
        }

        let statuses: HashMap<(String, String), LaunchStatus> = groups
            .into_iter()
            .map(|(key, members)| {
                let status = self.derivation_service.derive_launch_status(&members);
                (key, status)
            })
            .collect();

        for record in records.iter_mut() {
            let key = (
                record.tester_jig_number.clone(),
                record.sale_order.clone(),
            );
            if let Some(status) = statuses.get(&key) {
                record.status = *status;
            }
        }
    }
}
