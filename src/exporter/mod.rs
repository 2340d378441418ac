// ==========================================
// 测试夹具物料齐套系统 - 导出层
// ==========================================
// 职责: 物料子集导出为 Excel 工作簿
// ==========================================

pub mod columns;
pub mod error;
pub mod xlsx_writer;

pub use columns::{CellValue, ExportKind, EXPORT_COLUMNS, RECOMMENDED_EXTRA_COLUMNS};
pub use error::{ExportError, ExportResult};
pub use xlsx_writer::XlsxExporter;

/// xlsx 响应 MIME 类型
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
