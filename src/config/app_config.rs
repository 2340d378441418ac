// ==========================================
// 测试夹具物料齐套系统 - 应用配置
// ==========================================
// 来源: 进程环境变量（启动时读取一次）
// 规则: 缺失或无法解析 → 使用默认值
// ==========================================

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 数据与服务
    pub const DATA_FILE: &str = "JIG_DATA_FILE";
    pub const BIND_ADDR: &str = "JIG_BIND_ADDR";
    pub const STATIC_DIR: &str = "JIG_STATIC_DIR";

    // 采购建议
    pub const P_FACTOR_PERCENT: &str = "JIG_P_FACTOR_PERCENT";

    // 告警推送
    pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
    pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
    pub const TELEGRAM_API_BASE: &str = "TELEGRAM_API_BASE";
    pub const ALERT_TIMEOUT_MS: &str = "JIG_ALERT_TIMEOUT_MS";
}

pub const DEFAULT_DATA_FILE: &str = "data/processed_testers_data.csv";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_P_FACTOR_PERCENT: f64 = 10.0;
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_ALERT_TIMEOUT_MS: u64 = 10_000;

// ==========================================
// TelegramConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub api_base: String,
}

impl TelegramConfig {
    /// token 与 chat_id 均非空才视为已配置
    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
        }
    }
}

// ==========================================
// AppConfig
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub p_factor_percent: f64,
    pub telegram: TelegramConfig,
    pub alert_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            bind_addr: default_bind_addr(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            p_factor_percent: DEFAULT_P_FACTOR_PERCENT,
            telegram: TelegramConfig::default(),
            alert_timeout: Duration::from_millis(DEFAULT_ALERT_TIMEOUT_MS),
        }
    }
}

impl AppConfig {
    /// 从进程环境变量读取
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取（测试可注入）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvReader { lookup: &lookup };

        let bind_addr = match env.string(config_keys::BIND_ADDR) {
            Some(raw) => raw.parse::<SocketAddr>().unwrap_or_else(|e| {
                warn!(value = %raw, error = %e, "监听地址无效，使用默认值");
                default_bind_addr()
            }),
            None => default_bind_addr(),
        };

        Self {
            data_file: env.path(config_keys::DATA_FILE, DEFAULT_DATA_FILE),
            bind_addr,
            static_dir: env.path(config_keys::STATIC_DIR, DEFAULT_STATIC_DIR),
            p_factor_percent: env.f64(config_keys::P_FACTOR_PERCENT, DEFAULT_P_FACTOR_PERCENT),
            telegram: TelegramConfig {
                bot_token: env.string(config_keys::TELEGRAM_BOT_TOKEN),
                chat_id: env.string(config_keys::TELEGRAM_CHAT_ID),
                api_base: env
                    .string(config_keys::TELEGRAM_API_BASE)
                    .map(|base| base.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_API_BASE.to_string()),
            },
            alert_timeout: Duration::from_millis(
                env.u64(config_keys::ALERT_TIMEOUT_MS, DEFAULT_ALERT_TIMEOUT_MS),
            ),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5001))
}

// 环境变量读取助手（空白值视为缺失）
struct EnvReader<'a, F: Fn(&str) -> Option<String>> {
    lookup: &'a F,
}

impl<F: Fn(&str) -> Option<String>> EnvReader<'_, F> {
    fn string(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn path(&self, name: &str, default: &str) -> PathBuf {
        PathBuf::from(self.string(name).unwrap_or_else(|| default.to_string()))
    }

    fn u64(&self, name: &str, default: u64) -> u64 {
        self.string(name)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(default)
    }

    fn f64(&self, name: &str, default: f64) -> f64 {
        self.string(name)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }
}
