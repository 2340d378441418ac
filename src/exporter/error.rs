// ==========================================
// 测试夹具物料齐套系统 - 导出层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("工作簿生成失败: {0}")]
    WorkbookError(String),
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::WorkbookError(err.to_string())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
