// ==========================================
// 测试夹具物料齐套系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换下层错误为用户可读消息
// 说明: 错误文本直接作为 HTTP 响应体 message 字段返回前端
// ==========================================

use crate::exporter::ExportError;
use crate::notify::NotifyError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求错误
    // ==========================================
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    // ==========================================
    // 下游错误
    // ==========================================
    #[error("Failed to generate Excel file: {0}")]
    ExportFailed(String),

    #[error("{0}")]
    AlertFailed(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 对应 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidInput(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::ExportFailed(_)
            | ApiError::AlertFailed(_)
            | ApiError::InternalError(_)
            | ApiError::Other(_) => 500,
        }
    }
}

// ==========================================
// 从下层错误转换
// ==========================================
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportFailed(err.to_string())
    }
}

impl From<NotifyError> for ApiError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::EmptyMessage => {
                ApiError::InvalidInput("Message content is required.".to_string())
            }
            NotifyError::NotConfigured(_) => {
                ApiError::AlertFailed("Telegram is not configured on the server.".to_string())
            }
            NotifyError::TransportError(_) | NotifyError::Rejected { .. } => {
                ApiError::AlertFailed("Failed to send Telegram alert. Check server logs.".to_string())
            }
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
