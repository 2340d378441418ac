// ==========================================
// 测试夹具物料齐套系统 - HTTP 服务主入口
// ==========================================
// 流程: 读取配置 → 加载物料快照 → 启动 HTTP 服务
// 退出: SIGINT / SIGTERM 优雅关闭
// ==========================================

use std::sync::Arc;

use anyhow::Context;
use jig_readiness::app::{serve, AppState};
use jig_readiness::config::AppConfig;
use jig_readiness::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", jig_readiness::APP_NAME);
    tracing::info!("系统版本: {}", jig_readiness::VERSION);
    tracing::info!("==================================================");

    let config = AppConfig::from_env();
    tracing::info!(
        data_file = %config.data_file.display(),
        bind_addr = %config.bind_addr,
        static_dir = %config.static_dir.display(),
        telegram_configured = config.telegram.is_configured(),
        "配置加载完成"
    );

    let state = Arc::new(AppState::new(config));

    serve(state, wait_for_shutdown_signal())
        .await
        .context("HTTP 服务异常退出")?;

    tracing::info!("服务已关闭");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                tracing::warn!("信号监听注册失败，退回 Ctrl-C 监听");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("收到关闭信号，开始优雅关闭");
}
