// ==========================================
// 测试夹具物料齐套系统 - HTTP 路由
// ==========================================
// 职责: axum 路由 → API 层；错误统一为 {"message": ...}
// 静态资源: 配置目录存在时作为兜底服务
// ==========================================

use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::api::{ApiError, ApiResult, JigSummary, WhatsAppAlertRequest};
use crate::app::state::AppState;
use crate::domain::part::{PartRecord, PurchaseRecommendation};
use crate::exporter::{ExportKind, XLSX_CONTENT_TYPE};

// ==========================================
// 请求/响应体
// ==========================================

/// 夹具查询参数（缺失时返回 400 而非提取器拒绝）
#[derive(Debug, Default, Deserialize)]
pub struct JigQuery {
    pub jig_number: Option<String>,
    pub sale_order: Option<String>,
}

impl JigQuery {
    fn jig_number(&self) -> ApiResult<&str> {
        self.jig_number
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::InvalidInput("Jig number is required.".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct TelegramAlertBody {
    message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    jigs: usize,
    records: usize,
    loaded_at: DateTime<Utc>,
    data_file: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "请求处理失败");
        } else {
            debug!(status = status.as_u16(), error = %self, "请求被拒绝");
        }
        (status, Json(MessageBody::new(self.to_string()))).into_response()
    }
}

// ==========================================
// 路由
// ==========================================
pub fn router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        .route("/api/health", get(health))
        .route("/api/jig_details", get(jig_details))
        .route("/api/shortage_list", get(shortage_list))
        .route("/api/all_parts_for_jig", get(all_parts_for_jig))
        .route("/api/recommend_purchase", get(recommend_purchase))
        .route("/api/download_all_parts_excel", get(download_all_parts_excel))
        .route("/api/download_shortage_excel", get(download_shortage_excel))
        .route("/api/download_recommended_excel", get(download_recommended_excel))
        .route("/api/send_telegram_alert", post(send_telegram_alert))
        .route("/api/send_whatsapp_alert", post(send_whatsapp_alert));

    let router = if static_dir.is_dir() {
        router.fallback_service(ServeDir::new(static_dir))
    } else {
        router.fallback(not_found)
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 绑定监听地址并服务，直到 shutdown 完成
pub async fn serve<F>(state: Arc<AppState>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP 服务已启动");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

// ==========================================
// 处理函数
// ==========================================

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = &state.snapshot;
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
        jigs: snapshot.jig_count(),
        records: snapshot.record_count(),
        loaded_at: snapshot.loaded_at(),
        data_file: snapshot.source().map(|p| p.display().to_string()),
    })
}

async fn jig_details(
    State(state): State<Arc<AppState>>,
    Query(query): Query<JigQuery>,
) -> ApiResult<Json<JigSummary>> {
    let summary = state.jig_api.get_summary(query.jig_number()?)?;
    Ok(Json(summary))
}

async fn shortage_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<JigQuery>,
) -> ApiResult<Json<Vec<PartRecord>>> {
    let parts = state
        .jig_api
        .get_parts(query.jig_number()?, query.sale_order.as_deref(), true)?;
    Ok(Json(parts))
}

async fn all_parts_for_jig(
    State(state): State<Arc<AppState>>,
    Query(query): Query<JigQuery>,
) -> ApiResult<Json<Vec<PartRecord>>> {
    let parts = state
        .jig_api
        .get_parts(query.jig_number()?, query.sale_order.as_deref(), false)?;
    Ok(Json(parts))
}

async fn recommend_purchase(
    State(state): State<Arc<AppState>>,
    Query(query): Query<JigQuery>,
) -> ApiResult<Json<Vec<PurchaseRecommendation>>> {
    let recs = state
        .jig_api
        .recommend_purchase(query.jig_number()?, query.sale_order.as_deref())?;
    Ok(Json(recs))
}

async fn download_all_parts_excel(
    State(state): State<Arc<AppState>>,
    Query(query): Query<JigQuery>,
) -> ApiResult<Response> {
    download(state, query, ExportKind::AllParts).await
}

async fn download_shortage_excel(
    State(state): State<Arc<AppState>>,
    Query(query): Query<JigQuery>,
) -> ApiResult<Response> {
    download(state, query, ExportKind::Shortage).await
}

async fn download_recommended_excel(
    State(state): State<Arc<AppState>>,
    Query(query): Query<JigQuery>,
) -> ApiResult<Response> {
    download(state, query, ExportKind::Recommended).await
}

async fn download(state: Arc<AppState>, query: JigQuery, kind: ExportKind) -> ApiResult<Response> {
    let jig_number = query.jig_number()?.to_string();
    let sale_order = query.sale_order.clone();
    let export_api = state.export_api.clone();

    // 工作簿生成为 CPU 密集操作
    let file = tokio::task::spawn_blocking(move || {
        export_api.export(&jig_number, sale_order.as_deref(), kind)
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("导出任务异常: {}", e)))??;

    let disposition = format!("attachment; filename=\"{}\"", file.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}

async fn send_telegram_alert(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TelegramAlertBody>, JsonRejection>,
) -> ApiResult<Json<MessageBody>> {
    let Json(body) = payload
        .map_err(|_| ApiError::InvalidInput("Message content is required.".to_string()))?;

    state.alert_api.send_telegram(body.message.as_deref()).await?;
    Ok(Json(MessageBody::new("Telegram alert sent successfully!")))
}

async fn send_whatsapp_alert(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WhatsAppAlertRequest>, JsonRejection>,
) -> ApiResult<Json<MessageBody>> {
    let Json(request) = payload
        .map_err(|_| ApiError::InvalidInput("Missing data for WhatsApp alert".to_string()))?;

    state.alert_api.simulate_whatsapp(&request)?;
    Ok(Json(MessageBody::new("WhatsApp alert simulation successful!")))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}
