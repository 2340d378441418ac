// ==========================================
// 测试夹具物料齐套系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 HTTP 路由调用
// ==========================================

pub mod alert_api;
pub mod error;
pub mod export_api;
pub mod jig_api;

// 重导出核心类型
pub use alert_api::{AlertApi, WhatsAppAlertRequest};
pub use error::{ApiError, ApiResult};
pub use export_api::{ExportApi, ExportFile};
pub use jig_api::{JigApi, JigSummary, SaleOrderSummary};
