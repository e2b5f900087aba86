//! Integration tests for media upload and download.
//!
//! None of these routes touch the database, so the app is built over a pool
//! that never connects.

mod common;

use axum::http::{header, StatusCode};
use common::{body_bytes, body_json, get, png_bytes, post_multipart, Part};

#[tokio::test]
async fn test_png_is_stored_as_jpeg_under_fresh_name() {
    let app = common::build_offline_app();
    let png = png_bytes();

    let response = post_multipart(
        app.app(),
        "/files",
        &[Part {
            file_name: "logo.png",
            content_type: "image/png",
            bytes: &png,
        }],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    let name = files[0]["name"].as_str().unwrap().to_string();
    assert_ne!(name, "logo.png");
    assert!(name.ends_with(".jpg"));
    assert_eq!(files[0]["type"], "image/jpeg");

    let response = get(app.app(), &format!("/files/{name}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
    let bytes = body_bytes(response).await;
    assert_eq!(bytes.len() as u64, files[0]["size"].as_u64().unwrap());
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
}

#[tokio::test]
async fn test_second_video_replaces_first() {
    let app = common::build_offline_app();

    for payload in [b"first-video-bytes".as_slice(), b"second".as_slice()] {
        let response = post_multipart(
            app.app(),
            "/files",
            &[Part {
                file_name: "clip.mov",
                content_type: "video/mp4",
                bytes: payload,
            }],
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["files"][0]["name"], "video.mp4");
        assert_eq!(json["files"][0]["type"], "video/mp4");
    }

    assert_eq!(app.stored_files(), vec!["video.mp4".to_string()]);

    let response = get(app.app(), "/files/video.mp4").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "video/mp4");
    assert_eq!(body_bytes(response).await, b"second");
}

#[tokio::test]
async fn test_mixed_upload_reports_every_file() {
    let app = common::build_offline_app();
    let png = png_bytes();

    let response = post_multipart(
        app.app(),
        "/files",
        &[
            Part {
                file_name: "a.png",
                content_type: "image/png",
                bytes: &png,
            },
            Part {
                file_name: "intro.mp4",
                content_type: "video/mp4",
                bytes: b"video",
            },
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["files"].as_array().unwrap().len(), 2);
    assert_eq!(json["files"][1]["size"], 5);
}

#[tokio::test]
async fn test_non_media_part_is_rejected() {
    let app = common::build_offline_app();

    let response = post_multipart(
        app.app(),
        "/files",
        &[Part {
            file_name: "notes.pdf",
            content_type: "application/pdf",
            bytes: b"%PDF-1.4",
        }],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("notes.pdf"));
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_undecodable_image_is_rejected() {
    let app = common::build_offline_app();

    let response = post_multipart(
        app.app(),
        "/files",
        &[Part {
            file_name: "broken.png",
            content_type: "image/png",
            bytes: b"not really a png",
        }],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_upload_without_files_is_rejected() {
    let app = common::build_offline_app();

    let response = post_multipart(app.app(), "/files", &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_traversal_names_are_rejected() {
    let app = common::build_offline_app();

    for uri in [
        "/files/..%2fsecret",
        "/files/..%2fsecret.txt",
        "/files/..",
        "/files/a%5Cb.jpg",
    ] {
        let response = get(app.app(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_hidden_staging_file_is_not_served() {
    let app = common::build_offline_app();
    app.put_file(".video.mp4.partial", b"half a video");

    let response = get(app.app(), "/files/.video.mp4.partial").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_file_returns_404() {
    let app = common::build_offline_app();

    let response = get(app.app(), "/files/nope.jpg").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "FILE_NOT_FOUND");
}

#[tokio::test]
async fn test_content_type_follows_extension() {
    let app = common::build_offline_app();
    app.put_file("banner.webp", b"RIFF");
    app.put_file("data.bin", b"\x00\x01");

    let response = get(app.app(), "/files/banner.webp").await;
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/webp");

    let response = get(app.app(), "/files/data.bin").await;
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/octet-stream"
    );
}
