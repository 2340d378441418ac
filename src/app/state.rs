// ==========================================
// 测试夹具物料齐套系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 红线: 快照只读共享，不加锁
// ==========================================

use std::sync::Arc;

use tracing::info;

use crate::api::{AlertApi, ExportApi, JigApi};
use crate::config::AppConfig;
use crate::notify::{AlertSender, TelegramNotifier};
use crate::store::{PartsSnapshot, SnapshotLoader};

/// 应用状态
///
/// 包含所有API实例和共享资源
/// 在 HTTP 路由中作为共享状态注入
pub struct AppState {
    /// 启动配置
    pub config: Arc<AppConfig>,

    /// 物料快照
    pub snapshot: Arc<PartsSnapshot>,

    /// 夹具查询API
    pub jig_api: Arc<JigApi>,

    /// 导出API
    pub export_api: Arc<ExportApi>,

    /// 告警API
    pub alert_api: Arc<AlertApi>,
}

impl AppState {
    /// 加载快照并组装默认依赖（Telegram 告警）
    pub fn new(config: AppConfig) -> Self {
        let snapshot = SnapshotLoader::default().load(&config.data_file);
        let sender = Arc::new(TelegramNotifier::new(
            config.telegram.clone(),
            config.alert_timeout,
        ));
        Self::with_parts(config, snapshot, sender)
    }

    /// 由已构建的快照与告警通道组装（测试可注入）
    pub fn with_parts(
        config: AppConfig,
        snapshot: PartsSnapshot,
        sender: Arc<dyn AlertSender>,
    ) -> Self {
        let snapshot = Arc::new(snapshot);
        let jig_api = Arc::new(JigApi::new(snapshot.clone(), config.p_factor_percent));
        let export_api = Arc::new(ExportApi::new(jig_api.clone()));
        let alert_api = Arc::new(AlertApi::new(sender));

        info!(
            jigs = snapshot.jig_count(),
            records = snapshot.record_count(),
            p_factor = jig_api.p_factor(),
            "AppState 初始化完成"
        );

        Self {
            config: Arc::new(config),
            snapshot,
            jig_api,
            export_api,
            alert_api,
        }
    }
}
