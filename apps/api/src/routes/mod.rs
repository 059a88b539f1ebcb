pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::archive::handlers as archive;
use crate::compose::handlers as compose;
use crate::form::handlers as form;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Dashboard
        .route("/api/v1/resumes", get(archive::handle_dashboard))
        // Editing sessions
        .route("/api/v1/sessions", post(form::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(form::handle_get_session).delete(form::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/commands",
            post(form::handle_apply_command),
        )
        // Preview and export
        .route("/api/v1/sessions/:id/preview", get(compose::handle_preview))
        .route(
            "/api/v1/sessions/:id/preview/text",
            get(compose::handle_preview_text),
        )
        .route(
            "/api/v1/sessions/:id/export/latex",
            get(compose::handle_export_latex),
        )
        .route("/api/v1/sessions/:id/export", get(compose::handle_export_pdf))
        .route("/api/v1/sessions/:id/save", post(archive::handle_save))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use bytes::Bytes;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::archive::tests::FixedArchive;
    use crate::archive::DisabledArchive;
    use crate::config::Config;
    use crate::form::session::{SessionLimits, SessionStore};
    use crate::render::{PdfCompiler, RenderError};

    const EMAIL_HEADER: &str = "x-auth-request-email";
    const NAME_HEADER: &str = "x-auth-request-user";

    struct FakePdf;

    #[async_trait]
    impl PdfCompiler for FakePdf {
        async fn compile(&self, latex_source: &str) -> Result<Bytes, RenderError> {
            assert!(latex_source.contains("\\begin{document}"));
            Ok(Bytes::from_static(b"%PDF-1.7 fake"))
        }
    }

    struct BrokenEngine;

    #[async_trait]
    impl PdfCompiler for BrokenEngine {
        async fn compile(&self, _latex_source: &str) -> Result<Bytes, RenderError> {
            Err(RenderError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "! Undefined control sequence.".to_string(),
            })
        }
    }

    fn app_with(
        archive: Arc<dyn crate::archive::ResumeArchive>,
        compiler: Arc<dyn PdfCompiler>,
    ) -> Router {
        build_router(AppState {
            sessions: SessionStore::new(SessionLimits::default()),
            config: Config::default(),
            archive,
            compiler,
        })
    }

    fn app() -> Router {
        app_with(Arc::new(DisabledArchive), Arc::new(FakePdf))
    }

    fn request(method: Method, uri: &str, email: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(email) = email {
            builder = builder
                .header(EMAIL_HEADER, email)
                .header(NAME_HEADER, "Asha Rao");
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Bytes) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body)
    }

    async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = send(app, req).await;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, value)
    }

    async fn create_session(app: &Router) -> String {
        let (status, body) = send_json(
            app,
            request(Method::POST, "/api/v1/sessions", Some("asha@example.com"), None),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["sessionId"].as_str().unwrap().to_string()
    }

    async fn command(app: &Router, id: &str, cmd: Value) -> (StatusCode, Value) {
        send_json(
            app,
            request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/commands"),
                Some("asha@example.com"),
                Some(cmd),
            ),
        )
        .await
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send_json(&app(), request(Method::GET, "/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resumebuddy-api");
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn test_requests_without_identity_are_unauthorized() {
        let (status, body) =
            send_json(&app(), request(Method::POST, "/api/v1/sessions", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_create_session_prefills_identity() {
        let app = app();
        let (status, body) = send_json(
            &app,
            request(Method::POST, "/api/v1/sessions", Some("asha@example.com"), None),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["document"]["personal"]["fullName"], "Asha Rao");
        assert_eq!(body["document"]["personal"]["email"], "asha@example.com");
        assert_eq!(body["openSections"], json!(["personal"]));
        assert_eq!(body["totalSections"], 8);
        assert_eq!(body["completion"]["personal"], false);
    }

    #[tokio::test]
    async fn test_commands_update_document_and_completion() {
        let app = app();
        let id = create_session(&app).await;

        let (status, body) = command(
            &app,
            &id,
            json!({"op": "update_list_field", "index": 0,
                   "field": {"section": "experience", "field": "title"}, "value": "Engineer"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"]["outcome"], "applied");
        assert_eq!(body["session"]["completion"]["experience"], false);

        let (_, body) = command(
            &app,
            &id,
            json!({"op": "update_list_field", "index": 0,
                   "field": {"section": "experience", "field": "company"}, "value": "Acme"}),
        )
        .await;
        assert_eq!(body["session"]["completion"]["experience"], true);

        let (_, body) = command(
            &app,
            &id,
            json!({"op": "update_skill_list", "category": "programming", "rawText": " Go, , Rust ,Go"}),
        )
        .await;
        assert_eq!(
            body["session"]["document"]["skills"]["programming"],
            json!(["Go", "Rust", "Go"])
        );

        let (_, body) = command(&app, &id, json!({"op": "add_entry", "section": "projects"})).await;
        assert_eq!(body["outcome"]["outcome"], "added");
        assert_eq!(body["session"]["document"]["projects"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_removing_last_entry_is_unchanged() {
        let app = app();
        let id = create_session(&app).await;
        let (status, body) = command(
            &app,
            &id,
            json!({"op": "remove_entry", "section": "education", "index": 0}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"]["outcome"], "unchanged");
        assert_eq!(body["session"]["document"]["education"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_index_is_bad_request() {
        let app = app();
        let id = create_session(&app).await;
        let (status, body) = command(
            &app,
            &id,
            json!({"op": "update_list_field", "index": 7,
                   "field": {"section": "education", "field": "degree"}, "value": "B.Tech"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_command_is_rejected() {
        let app = app();
        let id = create_session(&app).await;
        let (status, _) = send(
            &app,
            request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/commands"),
                Some("asha@example.com"),
                Some(json!({"op": "update_list_field", "index": 0,
                            "field": {"section": "projects", "field": "company"}, "value": "x"})),
            ),
        )
        .await;
        assert!(status.is_client_error(), "got {status}");
    }

    #[tokio::test]
    async fn test_other_users_session_is_forbidden() {
        let app = app();
        let id = create_session(&app).await;
        let (status, _) = send_json(
            &app,
            request(
                Method::GET,
                &format!("/api/v1/sessions/{id}"),
                Some("ravi@example.com"),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_delete_session_then_not_found() {
        let app = app();
        let id = create_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}");
        let (status, _) =
            send(&app, request(Method::DELETE, &uri, Some("asha@example.com"), None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) =
            send(&app, request(Method::GET, &uri, Some("asha@example.com"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_preview_returns_tree_and_fill() {
        let app = app();
        let id = create_session(&app).await;
        let (status, body) = send_json(
            &app,
            request(
                Method::GET,
                &format!("/api/v1/sessions/{id}/preview"),
                Some("asha@example.com"),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fill"]["pageCount"], 1);
        let blocks = body["tree"]["pages"][0]["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0]["kind"], "header");
        assert_eq!(blocks[1]["kind"], "education");
        assert_eq!(blocks[0]["nodes"][0]["text"], "ASHA RAO");
    }

    #[tokio::test]
    async fn test_text_and_latex_previews() {
        let app = app();
        let id = create_session(&app).await;
        let (status, body) = send(
            &app,
            request(
                Method::GET,
                &format!("/api/v1/sessions/{id}/preview/text"),
                Some("asha@example.com"),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8_lossy(&body).starts_with("--- page 1 ---"));

        let (status, body) = send(
            &app,
            request(
                Method::GET,
                &format!("/api/v1/sessions/{id}/export/latex"),
                Some("asha@example.com"),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8_lossy(&body).contains("\\resumesection{Education}"));
    }

    #[tokio::test]
    async fn test_pdf_export_sets_download_name() {
        let app = app();
        let id = create_session(&app).await;
        let response = app
            .clone()
            .oneshot(request(
                Method::GET,
                &format!("/api/v1/sessions/{id}/export"),
                Some("asha@example.com"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"resume_Asha_Rao_"));
        assert!(disposition.ends_with(".pdf\""));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"%PDF-1.7 fake");
    }

    #[tokio::test]
    async fn test_engine_failure_is_bad_gateway_and_session_survives() {
        let app = app_with(Arc::new(DisabledArchive), Arc::new(BrokenEngine));
        let id = create_session(&app).await;
        let (status, body) = send_json(
            &app,
            request(
                Method::GET,
                &format!("/api/v1/sessions/{id}/export"),
                Some("asha@example.com"),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "RENDER_ERROR");

        let (status, _) = send(
            &app,
            request(
                Method::GET,
                &format!("/api/v1/sessions/{id}"),
                Some("asha@example.com"),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_save_with_disabled_archive() {
        let app = app();
        let id = create_session(&app).await;
        let (status, body) = send_json(
            &app,
            request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/save"),
                Some("asha@example.com"),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body["error"]["message"],
            "Saving to cloud is disabled. Download your PDF instead."
        );
    }

    #[tokio::test]
    async fn test_save_with_enabled_archive() {
        let app = app_with(Arc::new(FixedArchive(Vec::new())), Arc::new(FakePdf));
        let id = create_session(&app).await;
        let (status, body) = send_json(
            &app,
            request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/save"),
                Some("asha@example.com"),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["documentUrl"]
            .as_str()
            .unwrap()
            .starts_with("https://files.test/resume_Asha_Rao_"));
    }

    #[tokio::test]
    async fn test_dashboard_with_disabled_archive() {
        let (status, body) = send_json(
            &app(),
            request(Method::GET, "/api/v1/resumes", Some("asha@example.com"), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resumes"], json!([]));
        assert_eq!(body["storageEnabled"], false);
        assert_eq!(body["message"], "No resumes found. (Cloud storage disabled)");
    }

    #[tokio::test]
    async fn test_dashboard_with_enabled_empty_archive() {
        let app = app_with(Arc::new(FixedArchive(Vec::new())), Arc::new(FakePdf));
        let (_, body) = send_json(
            &app,
            request(Method::GET, "/api/v1/resumes", Some("asha@example.com"), None),
        )
        .await;
        assert_eq!(body["message"], "No resumes found.");
    }
}
