use super::*;
use crate::net::testing::{ScriptedTransport, capture_logs, captured};
use crate::util::credentials::MemoryCredentials;

fn gateway(token: Option<&str>) -> (Gateway<ScriptedTransport, MemoryCredentials>, ScriptedTransport) {
    let transport = ScriptedTransport::default();
    let credentials = token.map_or_else(MemoryCredentials::default, MemoryCredentials::with_token);
    (Gateway::new(ApiConfig::default(), transport.clone(), credentials), transport)
}

// =============================================================
// Authorization header
// =============================================================

#[tokio::test]
async fn attaches_bearer_token_when_present() {
    let (gw, transport) = gateway(Some("tok-1"));
    transport.reply(200, serde_json::json!({"ok": true}));

    gw.request(Method::Get, "/smtp", None).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].header("Authorization"), Some("Bearer tok-1"));
    assert_eq!(sent[0].url, "/api/smtp");
}

#[tokio::test]
async fn omits_authorization_without_credential() {
    let (gw, transport) = gateway(None);
    transport.reply(200, serde_json::json!({"accessToken": "t"}));

    gw.request(Method::Post, "/auth/login", Some(&serde_json::json!({"email": "a@x.com"})))
        .await
        .unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].header("Authorization"), None);
    assert_eq!(sent[0].header("content-type"), Some("application/json"));
    assert_eq!(sent[0].body.as_deref(), Some(r#"{"email":"a@x.com"}"#));
}

#[tokio::test]
async fn reads_credential_at_dispatch_time() {
    let (gw, transport) = gateway(None);
    transport.reply(200, serde_json::Value::Null).reply(200, serde_json::Value::Null);

    gw.request(Method::Get, "/logs", None).await.unwrap();
    gw.credentials().set("tok-late");
    gw.request(Method::Get, "/logs", None).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].header("Authorization"), None);
    assert_eq!(sent[1].header("Authorization"), Some("Bearer tok-late"));
}

#[test]
fn build_request_has_no_content_type_without_body() {
    let (gw, _) = gateway(Some("tok-1"));
    let req = gw.build_request(Method::Delete, "apikeys/k1", None);
    assert_eq!(req.method, Method::Delete);
    assert_eq!(req.url, "/api/apikeys/k1");
    assert_eq!(req.header("Content-Type"), None);
}

// =============================================================
// Success decoding
// =============================================================

#[tokio::test]
async fn empty_success_body_decodes_as_null() {
    let (gw, transport) = gateway(Some("tok-1"));
    transport.reply_raw(204, "");

    let value = gw.request(Method::Delete, "/apikeys/k1", None).await.unwrap();
    assert!(value.is_null());
}

#[tokio::test]
async fn typed_get_deserializes_body() {
    #[derive(serde::Deserialize)]
    struct Count {
        total: u32,
    }

    let (gw, transport) = gateway(Some("tok-1"));
    transport.reply(200, serde_json::json!({"total": 7}));

    let count: Count = gw.get("/logs/count").await.unwrap();
    assert_eq!(count.total, 7);
}

#[tokio::test]
async fn typed_get_shape_mismatch_is_decode_failure() {
    #[derive(Debug, serde::Deserialize)]
    struct Count {
        #[allow(dead_code)]
        total: u32,
    }

    let (gw, transport) = gateway(Some("tok-1"));
    transport.reply(201, serde_json::json!({"other": 1}));

    let err = gw.get::<Count>("/logs/count").await.unwrap_err();
    assert_eq!(err.status, Some(201));
    assert!(matches!(err.failure, ApiFailure::Decode { status: 201, .. }));
}

#[tokio::test]
async fn malformed_success_body_is_decode_failure() {
    let (gw, transport) = gateway(None);
    transport.reply_raw(200, "<html>");

    let err = gw.request(Method::Get, "/users/me", None).await.unwrap_err();
    assert!(matches!(err.failure, ApiFailure::Decode { status: 200, .. }));
}

// =============================================================
// Failure normalization
// =============================================================

#[tokio::test]
async fn non_2xx_prefers_body_message() {
    let (gw, transport) = gateway(Some("tok-1"));
    transport.reply(400, serde_json::json!({"message": "X", "error": "Y"}));

    let err = gw.request(Method::Post, "/otp/send", None).await.unwrap_err();
    assert_eq!(err.method, Method::Post);
    assert_eq!(err.url, "/api/otp/send");
    assert_eq!(err.status, Some(400));
    assert_eq!(err.message, "X");
    assert!(matches!(err.failure, ApiFailure::Status { status: 400, .. }));
}

#[tokio::test]
async fn non_2xx_falls_back_to_body_error() {
    let (gw, transport) = gateway(Some("tok-1"));
    transport.reply(403, serde_json::json!({"error": "Y"}));

    let err = gw.request(Method::Get, "/admin/users", None).await.unwrap_err();
    assert_eq!(err.message, "Y");
}

#[tokio::test]
async fn non_2xx_without_body_uses_status_message() {
    let (gw, transport) = gateway(Some("tok-1"));
    transport.reply_raw(401, "");

    let err = gw.request(Method::Get, "/users/me", None).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.message, "Request failed with status code 401");
}

#[tokio::test]
async fn transport_failure_has_no_status() {
    let (gw, transport) = gateway(None);
    transport.fail("timeout");

    let err = gw.request(Method::Get, "/users/me", None).await.unwrap_err();
    assert_eq!(err.status, None);
    assert_eq!(err.message, "timeout");
    assert_eq!(err.failure, ApiFailure::Transport(TransportError("timeout".to_owned())));
    assert!(!err.is_unauthorized());
}

#[tokio::test]
async fn transport_failure_without_message_uses_fallback() {
    let (gw, transport) = gateway(None);
    transport.fail("");

    let err = gw.request(Method::Put, "/templates/t1", None).await.unwrap_err();
    assert_eq!(err.message, FALLBACK_MESSAGE);
}

#[tokio::test]
async fn each_call_is_sent_at_most_once() {
    let (gw, transport) = gateway(Some("tok-1"));
    transport.reply(503, serde_json::json!({"message": "down"}));

    let _ = gw.request(Method::Get, "/logs", None).await;
    assert_eq!(transport.sent_count(), 1);
}

// =============================================================
// resolve_message
// =============================================================

#[test]
fn resolve_message_precedence() {
    let both = serde_json::json!({"message": "X", "error": "Y"});
    let error_only = serde_json::json!({"error": "Y"});
    let empty = serde_json::json!({});

    assert_eq!(resolve_message(Some(&both), Some("timeout")), "X");
    assert_eq!(resolve_message(Some(&error_only), Some("timeout")), "Y");
    assert_eq!(resolve_message(Some(&empty), Some("timeout")), "timeout");
    assert_eq!(resolve_message(None, Some("timeout")), "timeout");
    assert_eq!(resolve_message(None, None), "Request failed");
}

#[test]
fn resolve_message_skips_blank_and_non_string_fields() {
    let blank = serde_json::json!({"message": "  ", "error": "Y"});
    assert_eq!(resolve_message(Some(&blank), None), "Y");

    let non_string = serde_json::json!({"message": {"code": 1}, "error": 42});
    assert_eq!(resolve_message(Some(&non_string), Some("  ")), "Request failed");
}

// =============================================================
// Diagnostic line
// =============================================================

#[tokio::test]
async fn display_renders_diagnostic_line_with_status() {
    let (gw, transport) = gateway(Some("tok-1"));
    transport.reply(401, serde_json::json!({"message": "Unauthorized"}));

    let err = gw.request(Method::Get, "/users/me", None).await.unwrap_err();
    assert_eq!(err.to_string(), "[API] GET /api/users/me -> 401: Unauthorized");
}

#[tokio::test]
async fn display_renders_no_status_for_transport_failure() {
    let (gw, transport) = gateway(None);
    transport.fail("network down");

    let err = gw.request(Method::Patch, "/smtp/s1", None).await.unwrap_err();
    assert_eq!(err.to_string(), "[API] PATCH /api/smtp/s1 -> NO_STATUS: network down");
}

#[tokio::test]
async fn each_failure_logs_exactly_one_error_line() {
    #[derive(Debug, serde::Deserialize)]
    struct Point {
        #[allow(dead_code)]
        y: i32,
    }

    capture_logs();
    let (gw, transport) = gateway(None);
    transport
        .reply(500, serde_json::json!({"message": "boom"}))
        .reply(200, serde_json::json!({"x": 1}))
        .fail("");

    assert!(gw.request(Method::Get, "/a", None).await.is_err());
    assert!(gw.get::<Point>("/b").await.is_err());
    assert!(gw.delete::<serde_json::Value>("/c").await.is_err());

    assert_eq!(
        captured(log::Level::Error),
        vec![
            "[API] GET /api/a -> 500: boom".to_owned(),
            "[API] GET /api/b -> 200: missing field `y`".to_owned(),
            "[API] DELETE /api/c -> NO_STATUS: Request failed".to_owned(),
        ]
    );
}

#[tokio::test]
async fn success_logs_nothing() {
    capture_logs();
    let (gw, transport) = gateway(Some("tok-1"));
    transport.reply(200, serde_json::json!({"ok": true}));

    gw.request(Method::Get, "/users/me", None).await.unwrap();
    assert!(captured(log::Level::Error).is_empty());
}

// =============================================================
// server_message
// =============================================================

#[tokio::test]
async fn server_message_only_reports_body_message() {
    let (gw, transport) = gateway(None);
    transport
        .reply(409, serde_json::json!({"message": "Email already registered"}))
        .reply(500, serde_json::json!({"error": "boom"}));

    let err = gw.request(Method::Post, "/auth/register", None).await.unwrap_err();
    assert_eq!(err.server_message().as_deref(), Some("Email already registered"));

    let err = gw.request(Method::Post, "/auth/register", None).await.unwrap_err();
    assert_eq!(err.message, "boom");
    assert_eq!(err.server_message(), None);
}
