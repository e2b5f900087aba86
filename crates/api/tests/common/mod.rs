#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use lettre::Message;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use counsel_api::config::ServerConfig;
use counsel_api::router::build_app_router;
use counsel_api::state::AppState;
use counsel_core::blob_store::BlobStore;
use counsel_mail::{ContactMailer, MailConfig, MailError, MailTransport};

/// Multipart boundary used by [`post_multipart`].
const BOUNDARY: &str = "counsel-test-boundary";

/// Mail transport that records messages instead of sending them.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<Message>>,
    pub fail: bool,
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, message: Message) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Build("connection refused".into()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

pub fn test_mail_config() -> MailConfig {
    MailConfig {
        smtp_host: "smtp.example.com".into(),
        smtp_port: 587,
        smtp_secure: false,
        smtp_user: "mailer@example.com".into(),
        smtp_password: "secret".into(),
        default_from: "mailer@example.com".into(),
        recipient: "office@example.com".into(),
        recipient_override: None,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(upload_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://localhost/unused".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_path_buf(),
        mail: test_mail_config(),
    }
}

/// A router plus the fixtures it was built over.
///
/// The upload directory lives as long as the `TestApp`.
pub struct TestApp {
    pub router: Router,
    pub uploads: TempDir,
    pub outbox: Arc<RecordingTransport>,
}

impl TestApp {
    /// A fresh handle to the router; `oneshot` consumes it.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Write a file straight into the upload directory.
    pub fn put_file(&self, name: &str, bytes: &[u8]) {
        std::fs::write(self.uploads.path().join(name), bytes).unwrap();
    }

    /// Names currently in the upload directory, sorted.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.uploads.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    pub fn sent_mail(&self) -> std::sync::MutexGuard<'_, Vec<Message>> {
        self.outbox.sent.lock().unwrap()
    }
}

/// Build the full application with the production middleware stack over the
/// given pool, a temporary upload directory and a recording mail transport.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with_transport(pool, RecordingTransport::default())
}

pub fn build_test_app_with_transport(pool: PgPool, transport: RecordingTransport) -> TestApp {
    let uploads = tempfile::tempdir().unwrap();
    let config = test_config(uploads.path());
    let outbox = Arc::new(transport);
    let mailer = ContactMailer::new(config.mail.clone(), outbox.clone());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        blobs: Arc::new(BlobStore::new(uploads.path())),
        mailer: Arc::new(mailer),
    };

    TestApp {
        router: build_app_router(state, &config),
        uploads,
        outbox,
    }
}

/// An app whose pool never connects. For routes that do not touch the
/// database (files, email).
pub fn build_offline_app() -> TestApp {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .unwrap();
    build_test_app(pool)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PATCH, uri, body).await
}

/// One multipart part: file name, declared content type and bytes.
pub struct Part<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n",
                part.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
        body.extend_from_slice(part.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Small opaque PNG for upload tests.
pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(6, 4, image::Rgb([200, 40, 40]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}
