//! HTTP-level integration tests for the `/api/projects` endpoints.
//!
//! Requests go straight to the router through `tower::ServiceExt`, without
//! a TCP listener.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;
use taskhub_api::cache::MemoryRepoCache;
use taskhub_api::enrichment::GithubRepoService;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_project_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/projects", json!({"name": "A"})).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "A");
    assert!(json["id"].is_number());
    assert!(json.get("description").is_none());
    assert_eq!(json["githubRepos"], json!([]));
    assert!(json["createdAt"].is_string());
    assert!(json["updatedAt"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_project_trims_and_keeps_description(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/projects",
        json!({"name": "  Padded name  ", "description": "  plain text  "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Padded name");
    assert_eq!(json["description"], "plain text");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_project_escapes_description_markup(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/projects",
        json!({"name": "Safe", "description": "<script>alert('x')</script>"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(
        json["description"],
        "&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2F;script&gt;"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_project_drops_unknown_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/projects",
        json!({"name": "Extra", "owner": "mallory", "id": 777}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json.get("owner").is_none());
    assert_ne!(json["id"], 777);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_project_without_name_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/projects", json!({"description": "no name"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["errors"],
        json!([{"field": "name", "message": "Project name is required"}])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_project_with_blank_name_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/projects", json!({"name": "   \t "})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["message"], "Project name is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_project_rejects_markup_in_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/projects", json!({"name": "<b>bold</b>"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"],
        json!([{"field": "name", "message": "Project name contains invalid characters"}])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_project_enforces_length_limits(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/projects",
        json!({"name": "a".repeat(256), "description": "d".repeat(2001)}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"],
        json!([
            {"field": "description", "message": "Description must not exceed 2000 characters"},
            {"field": "name", "message": "Project name must be between 1 and 255 characters"},
        ])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_project_accepts_limit_lengths(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/projects",
        json!({"name": "a".repeat(255), "description": "d".repeat(2000)}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_projects_in_id_order(pool: PgPool) {
    let first = common::create_project(&pool, "First").await;
    let second = common::create_project(&pool, "Second").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/projects").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_projects_empty(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/projects").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_project_by_id(pool: PgPool) {
    let id = common::create_project(&pool, "Get Me").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Get Me");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_nonexistent_project_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/projects/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Project not found");
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_project_with_non_numeric_id_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/projects/invalid-id").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Project not found");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_project_changes_only_given_fields(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/projects",
            json!({"name": "Original", "description": "keep me"}),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("/api/projects/{id}"), json!({"name": "Updated"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Updated");
    assert_eq!(json["description"], "keep me");
    assert_eq!(json["createdAt"], created["createdAt"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_project_with_empty_body_is_a_no_op(pool: PgPool) {
    let id = common::create_project(&pool, "Stable").await;

    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("/api/projects/{id}"), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Stable");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_project_with_blank_name_is_rejected(pool: PgPool) {
    let id = common::create_project(&pool, "Named").await;

    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("/api/projects/{id}"), json!({"name": "  "})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["errors"],
        json!([{"field": "name", "message": "Project name cannot be empty"}])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_project_with_null_name_is_rejected(pool: PgPool) {
    let id = common::create_project(&pool, "Named").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &format!("/api/projects/{id}"), json!({"name": null})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["errors"],
        json!([{"field": "name", "message": "Project name cannot be empty"}])
    );

    let app = common::build_test_app(pool);
    let stored = body_json(get(app, &format!("/api/projects/{id}")).await).await;
    assert_eq!(stored["name"], "Named");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_project_with_null_description_clears_it(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/projects",
            json!({"name": "Described", "description": "temporary"}),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &format!("/api/projects/{id}"), json!({"description": null})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Described");
    assert!(json.get("description").is_none());

    let app = common::build_test_app(pool);
    let stored = body_json(get(app, &format!("/api/projects/{id}")).await).await;
    assert!(stored.get("description").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_project_drops_unknown_fields(pool: PgPool) {
    let id = common::create_project(&pool, "Plain").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/projects/{id}"),
        json!({
            "name": "Renamed",
            "extraField": "ignored",
            "githubRepos": [{"name": "x", "description": null, "url": "y"}],
            "id": 777,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["name"], "Renamed");
    assert!(json.get("extraField").is_none());
    assert_eq!(json["githubRepos"], json!([]));

    let app = common::build_test_app(pool);
    let stored = body_json(get(app, &format!("/api/projects/{id}")).await).await;
    assert_eq!(stored["githubRepos"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_nonexistent_project_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(app, "/api/projects/999999", json!({"name": "Ghost"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_project_returns_204_then_404(pool: PgPool) {
    let id = common::create_project(&pool, "Doomed").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_project_orphans_its_tasks(pool: PgPool) {
    let project_id = common::create_project(&pool, "Parent").await;

    let app = common::build_test_app(pool.clone());
    let task = body_json(
        post_json(
            app,
            &format!("/api/projects/{project_id}/tasks"),
            json!({"title": "Survivor"}),
        )
        .await,
    )
    .await;
    let task_id = task["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/tasks/{task_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Survivor");
    assert!(json["projectId"].is_null());
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database_and_cache(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"]["healthy"], true);
    assert_eq!(
        json["cache"],
        json!({"backend": "memory", "configured": "memory", "healthy": true})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_is_degraded_after_cache_fallback(pool: PgPool) {
    let mut config = common::test_config();
    config.cache.host = Some("redis.invalid".to_string());
    let github = Arc::new(GithubRepoService::new(
        Arc::new(MemoryRepoCache::new()),
        Arc::new(common::FakeSource::returning(Vec::new())),
        Duration::from_secs(600),
    ));

    let app = common::build_test_app_with_config(pool, github, config);
    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["cache"]["backend"], "memory");
    assert_eq!(json["cache"]["configured"], "redis");
}
