// ==========================================
// 测试夹具物料齐套系统 - 应用层
// ==========================================
// 职责: HTTP 集成,连接前端与 API 层
// ==========================================

pub mod http;
pub mod state;

// 重导出
pub use http::{router, serve, JigQuery, MessageBody};
pub use state::AppState;
