// ==========================================
// 测试夹具物料齐套系统 - 快照存储层
// ==========================================
// 职责: 启动时一次性加载平面文件，供查询层只读共享
// ==========================================

pub mod loader;
pub mod snapshot;

pub use loader::SnapshotLoader;
pub use snapshot::{JigGroup, PartsSnapshot};
