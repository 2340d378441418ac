// ==========================================
// Mock 配置 - 用于集成测试
// ==========================================

use jig_readiness::config::AppConfig;
use std::collections::HashMap;

/// 由键值对构建配置（不读取进程环境变量）
pub fn config_with(pairs: &[(&str, &str)]) -> AppConfig {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| env.get(key).cloned())
}

/// 默认测试配置（静态目录不存在，Telegram 未配置）
pub fn test_config() -> AppConfig {
    config_with(&[("JIG_STATIC_DIR", "/nonexistent/static")])
}

/// 指向假 Telegram 服务的配置
pub fn telegram_config(api_base: &str) -> AppConfig {
    config_with(&[
        ("JIG_STATIC_DIR", "/nonexistent/static"),
        ("TELEGRAM_BOT_TOKEN", "test-token"),
        ("TELEGRAM_CHAT_ID", "-1001"),
        ("TELEGRAM_API_BASE", api_base),
        ("JIG_ALERT_TIMEOUT_MS", "2000"),
    ])
}
