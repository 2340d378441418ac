// ==========================================
// 测试夹具物料齐套系统 - Telegram 告警推送
// ==========================================
// 接口: POST {api_base}/bot{token}/sendMessage
// 规则: 单次发送，带超时，不重试
// ==========================================

use crate::config::TelegramConfig;
use crate::notify::error::{NotifyError, NotifyResult};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, instrument, warn};

// ==========================================
// AlertSender Trait
// ==========================================
#[async_trait]
pub trait AlertSender: Send + Sync {
    /// 通道名称（日志用）
    fn channel(&self) -> &'static str;

    /// 发送告警文本
    async fn send(&self, text: &str) -> NotifyResult<()>;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

pub struct TelegramNotifier {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "HTTP 客户端构建失败，使用默认客户端");
                reqwest::Client::new()
            });
        Self { config, client }
    }
}

#[async_trait]
impl AlertSender for TelegramNotifier {
    fn channel(&self) -> &'static str {
        "telegram"
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn send(&self, text: &str) -> NotifyResult<()> {
        if text.trim().is_empty() {
            return Err(NotifyError::EmptyMessage);
        }

        let (token, chat_id) = match (&self.config.bot_token, &self.config.chat_id) {
            (Some(token), Some(chat_id)) => (token, chat_id),
            _ => {
                return Err(NotifyError::NotConfigured(
                    "TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID 未设置".to_string(),
                ))
            }
        };

        let url = format!("{}/bot{}/sendMessage", self.config.api_base, token);
        let payload = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "Markdown",
        };

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(chat_id = %chat_id, "Telegram 告警已发送");
        Ok(())
    }
}
