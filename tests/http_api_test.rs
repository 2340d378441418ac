// ==========================================
// HTTP 路由集成测试
// ==========================================
// 测试范围: 路由 → API 层 → 响应（状态码、JSON、附件、告警转发）
// ==========================================

mod helpers;

use axum::http::{header, StatusCode};
use helpers::api_test_helper::{
    body_bytes, body_json, build_router, get, post_json, spawn_fake_telegram,
};
use helpers::mock_config::{config_with, telegram_config, test_config};
use helpers::test_data_builder::sample_snapshot;
use jig_readiness::logging;
use jig_readiness::store::PartsSnapshot;
use serde_json::json;

// ==========================================
// 查询接口
// ==========================================

#[tokio::test]
async fn test_health_reports_snapshot() {
    let app = build_router(test_config(), sample_snapshot());
    let response = get(app, "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["jigs"], 2);
    assert_eq!(body["records"], 5);
}

#[tokio::test]
async fn test_jig_details() {
    logging::init_test();
    let app = build_router(test_config(), sample_snapshot());
    let response = get(app, "/api/jig_details?jig_number=JIG-100").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tester_jig_number"], "JIG-100");
    assert_eq!(body["testerId"], "T-JIG-100");
    assert_eq!(body["sale_orders"], json!(["SO-1", "SO-2"]));
    assert_eq!(body["status"], "Shortage-exists");
    assert_eq!(body["officialIncharge"], "ops@example.com");
}

#[tokio::test]
async fn test_jig_details_errors() {
    let app = build_router(test_config(), sample_snapshot());

    let response = get(app.clone(), "/api/jig_details").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Jig number is required.");

    let response = get(app.clone(), "/api/jig_details?jig_number=%20%20").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, "/api/jig_details?jig_number=JIG-404").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("JIG-404"));
}

#[tokio::test]
async fn test_shortage_list_and_all_parts() {
    let app = build_router(test_config(), sample_snapshot());

    let response = get(app.clone(), "/api/shortage_list?jig_number=JIG-100&sale_order=SO-1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let parts = body.as_array().unwrap();
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0]["part_number"], "P-1");
    assert_eq!(parts[0]["availability_status"], "Shortage");
    assert_eq!(parts[0]["requiredQuantity"], 10);
    assert_eq!(parts[0]["currentStock"], 7);

    let response = get(app.clone(), "/api/all_parts_for_jig?jig_number=jig-100").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let response = get(app, "/api/shortage_list?jig_number=JIG-100&sale_order=SO-404").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommend_purchase() {
    let app = build_router(
        config_with(&[
            ("JIG_STATIC_DIR", "/nonexistent/static"),
            ("JIG_P_FACTOR_PERCENT", "50"),
        ]),
        sample_snapshot(),
    );
    let response = get(app, "/api/recommend_purchase?jig_number=JIG-100").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let recs = body.as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["part_number"], "P-1");
    assert_eq!(recs[0]["p_factor"], 50.0);
    // 缺口 3 × 1.5 = 4.5 → 5
    assert_eq!(recs[0]["recommendedQuantity"], 5);
}

#[tokio::test]
async fn test_empty_snapshot_answers_not_found() {
    let app = build_router(test_config(), PartsSnapshot::empty(None));

    let response = get(app.clone(), "/api/jig_details?jig_number=JIG-100").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, "/api/health").await;
    let body = body_json(response).await;
    assert_eq!(body["records"], 0);
}

// ==========================================
// 导出接口
// ==========================================

#[tokio::test]
async fn test_download_excel_attachment() {
    let app = build_router(test_config(), sample_snapshot());

    let response = get(app.clone(), "/api/download_shortage_excel?jig_number=JIG-100").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"HAL_Shortage_List_JIG-100.xlsx\""
    );
    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"PK"));

    let response = get(app.clone(), "/api/download_all_parts_excel?jig_number=JIG-200").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.clone(), "/api/download_recommended_excel?jig_number=JIG-100").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"HAL_Recommended_Purchase_JIG-100.xlsx\""
    );

    // 文件名使用规范夹具号
    let response = get(app.clone(), "/api/download_shortage_excel?jig_number=jig-100").await;
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"HAL_Shortage_List_JIG-100.xlsx\""
    );

    let response = get(app, "/api/download_all_parts_excel?jig_number=JIG-404").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ==========================================
// 告警接口
// ==========================================

#[tokio::test]
async fn test_telegram_alert_forwarded() {
    logging::init_test();
    let fake = spawn_fake_telegram(StatusCode::OK).await;
    let app = build_router(telegram_config(&fake.base_url), sample_snapshot());

    let response = post_json(
        app,
        "/api/send_telegram_alert",
        json!({ "message": "*JIG-100* has shortages" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Telegram alert sent successfully!");

    let received = fake.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let (path, payload) = &received[0];
    assert_eq!(path, "/bottest-token/sendMessage");
    assert_eq!(payload["chat_id"], "-1001");
    assert_eq!(payload["text"], "*JIG-100* has shortages");
    assert_eq!(payload["parse_mode"], "Markdown");
}

#[tokio::test]
async fn test_telegram_alert_failures() {
    let fake = spawn_fake_telegram(StatusCode::UNAUTHORIZED).await;
    let app = build_router(telegram_config(&fake.base_url), sample_snapshot());

    // 对端拒绝 → 500
    let response = post_json(app.clone(), "/api/send_telegram_alert", json!({ "message": "hi" })).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["message"].is_string());

    // 空消息 → 400，不发起调用
    let response = post_json(app.clone(), "/api/send_telegram_alert", json!({ "message": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = post_json(app, "/api/send_telegram_alert", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(fake.received.lock().unwrap().len(), 1);

    // 未配置 → 500
    let app = build_router(test_config(), sample_snapshot());
    let response = post_json(app, "/api/send_telegram_alert", json!({ "message": "hi" })).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Telegram is not configured on the server.");
}

#[tokio::test]
async fn test_whatsapp_simulation() {
    let app = build_router(test_config(), sample_snapshot());

    let response = post_json(
        app.clone(),
        "/api/send_whatsapp_alert",
        json!({
            "testerId": "T-JIG-100",
            "officialIncharge": "+91-0000",
            "message": "Shortage on JIG-100"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app,
        "/api/send_whatsapp_alert",
        json!({ "testerId": "T-JIG-100", "message": "no contact" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing data for WhatsApp alert");
}

// ==========================================
// 静态资源
// ==========================================

#[tokio::test]
async fn test_static_index_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Jig Readiness</h1>").unwrap();

    let static_dir = dir.path().to_str().unwrap().to_string();
    let app = build_router(
        config_with(&[("JIG_STATIC_DIR", static_dir.as_str())]),
        sample_snapshot(),
    );

    let response = get(app.clone(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body_bytes(response).await;
    assert_eq!(bytes, b"<h1>Jig Readiness</h1>");

    let response = get(app, "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_without_static_dir() {
    let app = build_router(test_config(), sample_snapshot());
    let response = get(app, "/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
