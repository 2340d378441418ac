// ==========================================
// 测试夹具物料齐套系统 - 告警 API
// ==========================================
// 职责: 转发前端告警文本至聊天机器人；WhatsApp 告警仅记录日志
// 规则: 推送失败不致命，返回 false 并记录日志
// ==========================================

use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::notify::{AlertSender, NotifyError, NotifyResult};

/// WhatsApp 告警请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WhatsAppAlertRequest {
    #[serde(rename = "testerId")]
    pub tester_id: Option<String>,
    #[serde(rename = "officialIncharge")]
    pub official_incharge: Option<String>,
    pub message: Option<String>,
}

pub struct AlertApi {
    sender: Arc<dyn AlertSender>,
}

impl AlertApi {
    pub fn new(sender: Arc<dyn AlertSender>) -> Self {
        Self { sender }
    }

    /// 发送告警（失败返回 false，不重试）
    ///
    /// 程序内调用入口；HTTP 层使用 `send_telegram` 以区分错误类型，两者共用同一发送路径
    pub async fn send_alert(&self, text: &str) -> bool {
        self.deliver(text).await.is_ok()
    }

    /// 发送告警（供 HTTP 层使用，区分错误类型）
    pub async fn send_telegram(&self, message: Option<&str>) -> ApiResult<()> {
        let text = message.map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(NotifyError::EmptyMessage.into());
        }
        self.deliver(text).await.map_err(ApiError::from)
    }

    async fn deliver(&self, text: &str) -> NotifyResult<()> {
        let result = self.sender.send(text).await;
        match &result {
            Ok(()) => {}
            Err(NotifyError::NotConfigured(reason)) => {
                warn!(channel = self.sender.channel(), reason = %reason, "告警通道未配置，跳过发送");
            }
            Err(e) => {
                error!(channel = self.sender.channel(), error = %e, "告警发送失败");
            }
        }
        result
    }

    /// WhatsApp 告警模拟（三项必填，仅记录日志）
    pub fn simulate_whatsapp(&self, request: &WhatsAppAlertRequest) -> ApiResult<()> {
        let required = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let (tester_id, official_incharge, message) = match (
            required(&request.tester_id),
            required(&request.official_incharge),
            required(&request.message),
        ) {
            (Some(t), Some(o), Some(m)) => (t, o, m),
            _ => {
                return Err(ApiError::InvalidInput(
                    "Missing data for WhatsApp alert".to_string(),
                ))
            }
        };

        info!(
            channel = "whatsapp",
            to = %official_incharge,
            tester_id = %tester_id,
            message = %message,
            "模拟 WhatsApp 告警"
        );
        Ok(())
    }
}
