//! HTTP-level integration tests for the image upload endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, error_body, post_multipart};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn single_upload_stores_file_and_returns_url(pool: PgPool) {
    let dir = common::fresh_upload_dir();
    let app = common::build_test_app_with_upload_dir(pool, &dir);

    let response = post_multipart(
        app,
        "/api/v1/upload/apartment-image",
        &[("image", "photo.jpg", b"jpeg-bytes")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let url = json["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/listings/listing-"));
    assert!(url.ends_with(".jpg"));

    // The bytes landed under the generated name.
    let name = url.rsplit('/').next().unwrap();
    let on_disk = std::fs::read(std::path::Path::new(&dir).join(name)).unwrap();
    assert_eq!(on_disk, b"jpeg-bytes");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn single_upload_rejects_disallowed_extension(pool: PgPool) {
    let dir = common::fresh_upload_dir();
    let app = common::build_test_app_with_upload_dir(pool, &dir);

    let response = post_multipart(
        app,
        "/api/v1/upload/apartment-image",
        &[("image", "malware.exe", b"nope")],
    )
    .await;

    let json = error_body(response, StatusCode::BAD_REQUEST).await;
    assert!(json["error"].as_str().unwrap().contains("Invalid file type"));
    assert!(upload_count(&dir) == 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn single_upload_rejects_oversized_file(pool: PgPool) {
    let dir = common::fresh_upload_dir();
    let app = common::build_test_app_with_upload_dir(pool, &dir);

    let big = vec![0u8; 5 * 1024 * 1024 + 1];
    let response = post_multipart(
        app,
        "/api/v1/upload/apartment-image",
        &[("image", "huge.png", &big)],
    )
    .await;

    let json = error_body(response, StatusCode::BAD_REQUEST).await;
    assert!(json["error"].as_str().unwrap().contains("too large"));
    assert!(upload_count(&dir) == 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn single_upload_without_file_is_rejected(pool: PgPool) {
    let dir = common::fresh_upload_dir();
    let app = common::build_test_app_with_upload_dir(pool, &dir);

    let response = post_multipart(app, "/api/v1/upload/apartment-image", &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn batch_upload_returns_urls_in_part_order(pool: PgPool) {
    let dir = common::fresh_upload_dir();
    let app = common::build_test_app_with_upload_dir(pool, &dir);

    let response = post_multipart(
        app,
        "/api/v1/upload/apartment-images",
        &[
            ("images", "a.jpg", b"aaa"),
            ("images", "b.png", b"bbb"),
            ("images", "c.webp", b"ccc"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let urls = json["urls"].as_array().unwrap();
    assert_eq!(urls.len(), 3);
    assert!(urls[0].as_str().unwrap().ends_with(".jpg"));
    assert!(urls[1].as_str().unwrap().ends_with(".png"));
    assert!(urls[2].as_str().unwrap().ends_with(".webp"));
    assert_eq!(upload_count(&dir), 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn batch_upload_is_atomic_on_one_bad_file(pool: PgPool) {
    let dir = common::fresh_upload_dir();
    let app = common::build_test_app_with_upload_dir(pool, &dir);

    let response = post_multipart(
        app,
        "/api/v1/upload/apartment-images",
        &[
            ("images", "a.jpg", b"aaa"),
            ("images", "b.gif", b"bad-type"),
            ("images", "c.png", b"ccc"),
        ],
    )
    .await;

    error_body(response, StatusCode::BAD_REQUEST).await;
    // Nothing was stored, including the valid files.
    assert_eq!(upload_count(&dir), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn batch_upload_rejects_too_many_files(pool: PgPool) {
    let dir = common::fresh_upload_dir();
    let app = common::build_test_app_with_upload_dir(pool, &dir);

    let names: Vec<String> = (0..11).map(|i| format!("f{i}.jpg")).collect();
    let parts: Vec<(&str, &str, &[u8])> = names
        .iter()
        .map(|n| ("images", n.as_str(), b"x".as_slice()))
        .collect();

    let response = post_multipart(app, "/api/v1/upload/apartment-images", &parts).await;
    let json = error_body(response, StatusCode::BAD_REQUEST).await;
    assert!(json["error"].as_str().unwrap().contains("Too many files"));
    assert_eq!(upload_count(&dir), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn uploaded_file_is_served_statically(pool: PgPool) {
    let dir = common::fresh_upload_dir();
    let app = common::build_test_app_with_upload_dir(pool.clone(), &dir);

    let response = post_multipart(
        app,
        "/api/v1/upload/apartment-image",
        &[("image", "photo.webp", b"webp-bytes")],
    )
    .await;
    let json = body_json(response).await;
    let url = json["url"].as_str().unwrap().to_string();

    let app = common::build_test_app_with_upload_dir(pool, &dir);
    let response = common::get(app, &url).await;
    assert_eq!(response.status(), StatusCode::OK);
}

fn upload_count(dir: &str) -> usize {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}
