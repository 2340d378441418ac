// ==========================================
// 测试夹具物料齐套系统 - 告警推送错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("告警通道未配置: {0}")]
    NotConfigured(String),

    #[error("告警内容为空")]
    EmptyMessage,

    #[error("告警请求失败: {0}")]
    TransportError(String),

    #[error("告警接口拒绝: status={status}, body={body}")]
    Rejected { status: u16, body: String },
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::TransportError(err.to_string())
    }
}

pub type NotifyResult<T> = Result<T, NotifyError>;
