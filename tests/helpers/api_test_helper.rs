// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 路由构建、请求发送、假 Telegram 服务
// ==========================================

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode, Uri};
use axum::response::Response;
use axum::{Json, Router};
use http_body_util::BodyExt;
use jig_readiness::app::{router, AppState};
use jig_readiness::config::AppConfig;
use jig_readiness::notify::TelegramNotifier;
use jig_readiness::store::PartsSnapshot;
use tower::ServiceExt;

/// 构建路由（注入快照与真实 Telegram 客户端）
pub fn build_router(config: AppConfig, snapshot: PartsSnapshot) -> Router {
    let sender = Arc::new(TelegramNotifier::new(
        config.telegram.clone(),
        config.alert_timeout,
    ));
    router(Arc::new(AppState::with_parts(config, snapshot, sender)))
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(app, request).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("json body")
}

// ==========================================
// 假 Telegram 服务
// ==========================================

/// 收到的请求（路径, JSON 体）
pub type ReceivedRequests = Arc<Mutex<Vec<(String, serde_json::Value)>>>;

pub struct FakeTelegram {
    pub base_url: String,
    pub received: ReceivedRequests,
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    received: ReceivedRequests,
}

async fn record_request(
    State(state): State<FakeState>,
    uri: Uri,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    state
        .received
        .lock()
        .expect("lock")
        .push((uri.path().to_string(), body));
    let ok = state.status.is_success();
    (state.status, Json(serde_json::json!({ "ok": ok })))
}

/// 启动假 Telegram 服务（127.0.0.1 随机端口），所有请求返回给定状态码
pub async fn spawn_fake_telegram(status: StatusCode) -> FakeTelegram {
    let received: ReceivedRequests = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(record_request).with_state(FakeState {
        status,
        received: received.clone(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake telegram");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    FakeTelegram {
        base_url: format!("http://{}", addr),
        received,
    }
}
