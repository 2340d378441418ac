// ==========================================
// 测试夹具物料齐套系统 - Excel 导出
// ==========================================
// 职责: 物料列表 → 内存中的 .xlsx 字节
// 格式: 单工作表，首行加粗表头，其余为数据行
// ==========================================

use crate::domain::part::{PartRecord, PurchaseRecommendation};
use crate::exporter::columns::{part_row, recommendation_row, CellValue, ExportKind};
use crate::exporter::error::ExportResult;
use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

const COLUMN_WIDTH: f64 = 20.0;

pub struct XlsxExporter;

impl XlsxExporter {
    /// 导出物料记录（全部物料 / 缺料清单）
    pub fn export_parts(kind: ExportKind, parts: &[&PartRecord]) -> ExportResult<Vec<u8>> {
        let rows: Vec<Vec<CellValue>> = parts.iter().map(|p| part_row(p)).collect();
        Self::write_workbook(kind, &rows)
    }

    /// 导出采购建议
    pub fn export_recommendations(recs: &[PurchaseRecommendation]) -> ExportResult<Vec<u8>> {
        let rows: Vec<Vec<CellValue>> = recs.iter().map(recommendation_row).collect();
        Self::write_workbook(ExportKind::Recommended, &rows)
    }

    fn write_workbook(kind: ExportKind, rows: &[Vec<CellValue>]) -> ExportResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(kind.sheet_name())?;

        for (col, header) in (0u16..).zip(kind.headers()) {
            worksheet.write_string_with_format(0, col, header, &header_format)?;
            worksheet.set_column_width(col, COLUMN_WIDTH)?;
        }

        for (row_idx, row) in (1u32..).zip(rows) {
            for (col, cell) in (0u16..).zip(row) {
                match cell {
                    CellValue::Text(text) => {
                        worksheet.write_string(row_idx, col, text)?;
                    }
                    CellValue::Number(value) => {
                        worksheet.write_number(row_idx, col, *value)?;
                    }
                }
            }
        }

        let buffer = workbook.save_to_buffer()?;
        debug!(
            sheet = kind.sheet_name(),
            rows = rows.len(),
            bytes = buffer.len(),
            "工作簿生成完成"
        );
        Ok(buffer)
    }
}
