// ==========================================
// 测试夹具物料齐套系统 - 核心库
// ==========================================
// 技术栈: axum + tokio + calamine/csv + rust_xlsxwriter
// 系统定位: BOM 表批量转换 + 夹具齐套查询服务
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - BOM 表转换
pub mod importer;

// 存储层 - 只读物料快照
pub mod store;

// 导出层 - Excel 导出
pub mod exporter;

// 告警推送层
pub mod notify;

// 配置层 - 环境变量配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AvailabilityStatus, LaunchStatus};

// 领域实体
pub use domain::{PartRecord, PurchaseRecommendation};

// 导入
pub use importer::{PartsPipeline, PartsTransformer, TransformReport};

// 存储
pub use store::{PartsSnapshot, SnapshotLoader};

// API
pub use api::{AlertApi, ExportApi, JigApi};

// 配置
pub use config::AppConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "测试夹具物料齐套系统";
