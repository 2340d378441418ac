// ==========================================
// 测试夹具物料齐套系统 - 配置层
// ==========================================
// 职责: 环境变量 → 强类型配置
// ==========================================

pub mod app_config;

pub use app_config::{config_keys, AppConfig, TelegramConfig};
