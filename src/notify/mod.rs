// ==========================================
// 测试夹具物料齐套系统 - 告警推送层
// ==========================================

pub mod error;
pub mod telegram;

pub use error::{NotifyError, NotifyResult};
pub use telegram::{AlertSender, TelegramNotifier};
