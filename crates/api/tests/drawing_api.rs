//! End-to-end tests for the drawing listing, search, annotation, and
//! release-status endpoints.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, editor_token, expect_json, get, multipart_body, multipart_request};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

async fn seed_project(pool: &PgPool, name: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as("INSERT INTO projects (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap();
    id
}

async fn seed_log(
    pool: &PgPool,
    dwg: &str,
    status: Option<&str>,
    date: Option<&str>,
    project_id: Option<i64>,
) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO drawing_log (dwg, status, description, total_weight,
            latest_submitted_date, project_id)
         VALUES ($1, $2, 'log detail', 10.0, $3, $4)
         RETURNING id",
    )
    .bind(dwg)
    .bind(status)
    .bind(date)
    .bind(project_id)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

async fn seed_yet_to_release(pool: &PgPool, dwg_no: &str, date: Option<&str>) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO yet_to_release (dwg_no, description, total_weight_tons,
            latest_submitted_date)
         VALUES ($1, 'release detail', 20.0, $2)
         RETURNING id",
    )
    .bind(dwg_no)
    .bind(date)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

async fn seed_yet_to_return(
    pool: &PgPool,
    dwg_no: &str,
    status: Option<&str>,
    weight: f64,
    date: Option<&str>,
) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO yet_to_return (dwg_no, status, description, total_weight_tons,
            latest_submitted_date)
         VALUES ($1, $2, 'return detail', $3, $4)
         RETURNING id",
    )
    .bind(dwg_no)
    .bind(status)
    .bind(weight)
    .bind(date)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_merges_all_sources_sorted_descending(pool: PgPool) {
    seed_log(&pool, "L-1", Some("APP"), Some("2023-01-10"), None).await;
    seed_yet_to_release(&pool, "YR-1", Some("2023-12-01")).await;
    seed_yet_to_return(&pool, "YT-1", Some("APP"), 5.0, Some("2023-06-15")).await;

    let (app, _blobs) = common::build_test_app(pool);
    let response = get(app, "/api/v1/drawings?page=1&pageSize=10").await;
    let json = expect_json(response, StatusCode::OK).await;

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);

    // Sorted by submitted date descending across the merged set.
    assert_eq!(data[0]["dwgNo"], "YR-1");
    assert_eq!(data[1]["dwgNo"], "YT-1");
    assert_eq!(data[2]["dwgNo"], "L-1");

    // Forced statuses: yet-to-release is FFU, yet-to-return is PND even
    // though the raw row said APP. Log rows use the mapping table.
    assert_eq!(data[0]["status"], "FFU");
    assert_eq!(data[1]["status"], "PND");
    assert_eq!(data[2]["status"], "APP");

    assert_eq!(json["pagination"]["total"], 3);
    assert_eq!(json["pagination"]["totalPages"], 1);
    assert_eq!(json["pagination"]["hasNextPage"], false);
    assert_eq!(json["pagination"]["hasPreviousPage"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_paginates_and_clamps_page_size(pool: PgPool) {
    for i in 0..5 {
        seed_log(&pool, &format!("L-{i}"), None, Some("2023-01-01"), None).await;
    }

    let (app, _blobs) = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/drawings?page=2&pageSize=2").await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["pagination"]["page"], 2);
    assert_eq!(json["pagination"]["totalPages"], 3);
    assert_eq!(json["pagination"]["hasNextPage"], true);
    assert_eq!(json["pagination"]["hasPreviousPage"], true);

    // Oversized pageSize clamps to the maximum of 100.
    let response = get(app.clone(), "/api/v1/drawings?pageSize=500").await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["pagination"]["pageSize"], 100);

    // A page number at i64::MAX is past the end, not a server error.
    let response = get(app, "/api/v1/drawings?page=9223372036854775807").await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
    assert_eq!(json["pagination"]["hasNextPage"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_is_empty_not_an_error(pool: PgPool) {
    let (app, _blobs) = common::build_test_app(pool);
    let response = get(app, "/api/v1/drawings").await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
    assert_eq!(json["pagination"]["total"], 0);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn search_is_case_insensitive(pool: PgPool) {
    let project_id = seed_project(&pool, "Yard 12 Expansion").await;
    seed_log(&pool, "R-1", Some("R&R"), Some("2023-05-01"), Some(project_id)).await;

    let (app, _blobs) = common::build_test_app(pool);

    let lower = expect_json(
        get(app.clone(), "/api/v1/drawings/search?dwgNo=r-1").await,
        StatusCode::OK,
    )
    .await;
    let upper = expect_json(
        get(app, "/api/v1/drawings/search?dwgNo=R-1").await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(lower, upper);
    assert_eq!(lower["dwgNo"], "R-1");
    assert_eq!(lower["status"], "REV");
    assert_eq!(lower["projectName"], "Yard 12 Expansion");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_prefers_higher_priority_source(pool: PgPool) {
    // The same drawing number in two sources: the log wins.
    seed_yet_to_release(&pool, "R-1", Some("2023-12-01")).await;
    seed_log(&pool, "R-1", Some("APP"), Some("2023-01-01"), None).await;

    let (app, _blobs) = common::build_test_app(pool);
    let json = expect_json(
        get(app, "/api/v1/drawings/search?dwgNo=R-1").await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(json["source"], "log");
    assert_eq!(json["status"], "APP");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_finds_yet_to_return_only_drawing(pool: PgPool) {
    seed_yet_to_return(&pool, "R-3", None, 71500.0, Some("2023-09-06")).await;

    let (app, _blobs) = common::build_test_app(pool);
    let json = expect_json(
        get(app, "/api/v1/drawings/search?dwgNo=r-3").await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(json["dwgNo"], "R-3");
    assert_eq!(json["status"], "PND");
    assert_eq!(json["totalWeightTons"], 71500.0);
    assert_eq!(json["latestSubmittedDate"], "2023-09-06");
    assert!(json["weeksSinceSent"].as_i64().unwrap() > 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_missing_param_returns_400(pool: PgPool) {
    let (app, _blobs) = common::build_test_app(pool);

    let json = expect_json(
        get(app.clone(), "/api/v1/drawings/search").await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "BAD_REQUEST");

    // Whitespace-only is rejected as well.
    let json = expect_json(
        get(app, "/api/v1/drawings/search?dwgNo=%20%20").await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_unknown_drawing_returns_404(pool: PgPool) {
    let (app, _blobs) = common::build_test_app(pool);
    let json = expect_json(
        get(app, "/api/v1/drawings/search?dwgNo=NOPE-1").await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Annotations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn save_requires_authentication(pool: PgPool) {
    let drawing_id = seed_log(&pool, "R-1", None, None, None).await;
    let (app, _blobs) = common::build_test_app(pool);

    let body = multipart_body(&[
        ("annotations", None, b"[]".as_slice()),
        ("pdfBlob", Some("r.pdf"), b"%PDF-1.7".as_slice()),
    ]);
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/v1/drawings/{drawing_id}/annotations"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", common::BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn save_missing_annotations_writes_nothing(pool: PgPool) {
    let drawing_id = seed_log(&pool, "R-1", None, None, None).await;
    let (app, blobs) = common::build_test_app(pool.clone());
    let token = editor_token(9, "E. Stone");

    let body = multipart_body(&[("pdfBlob", Some("r.pdf"), b"%PDF-1.7".as_slice())]);
    let request = multipart_request(
        &format!("/api/v1/drawings/{drawing_id}/annotations"),
        &token,
        body,
    );

    let response = app.oneshot(request).await.unwrap();
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // No blob and no revision row were created.
    assert!(!blobs.path().join("drawings").exists());
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM drawing_revisions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn save_missing_pdf_writes_nothing(pool: PgPool) {
    let drawing_id = seed_log(&pool, "R-1", None, None, None).await;
    let (app, blobs) = common::build_test_app(pool.clone());
    let token = editor_token(9, "E. Stone");

    let body = multipart_body(&[("annotations", None, br#"[{"type":"rect"}]"#.as_slice())]);
    let request = multipart_request(
        &format!("/api/v1/drawings/{drawing_id}/annotations"),
        &token,
        body,
    );

    let response = app.oneshot(request).await.unwrap();
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(!blobs.path().join("drawings").exists());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn save_and_fetch_latest_round_trip(pool: PgPool) {
    let drawing_id = seed_log(&pool, "R-1", None, None, None).await;
    let (app, blobs) = common::build_test_app(pool.clone());
    let token = editor_token(7, "M. Vega");

    let body = multipart_body(&[
        (
            "annotations",
            None,
            br#"[{"type":"rect","x":10,"y":20}]"#.as_slice(),
        ),
        ("pdfBlob", Some("r.pdf"), b"%PDF-1.7 content".as_slice()),
        ("revisionNumber", None, b"3".as_slice()),
        ("revisionStatus", None, b"AS-BUILT".as_slice()),
    ]);
    let request = multipart_request(
        &format!("/api/v1/drawings/{drawing_id}/annotations"),
        &token,
        body,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["revisionNumber"], 3);
    let pdf_url = json["pdfUrl"].as_str().unwrap();
    assert!(pdf_url.starts_with("http://localhost:3000/files/drawings/"));

    // The binary landed in the blob root.
    assert!(blobs
        .path()
        .join(format!("drawings/{drawing_id}"))
        .read_dir()
        .unwrap()
        .next()
        .is_some());

    // The denormalized snapshot was written onto the owning drawing.
    let (rev_status, rev_number, editor_name): (Option<String>, Option<i32>, Option<String>) =
        sqlx::query_as(
            "SELECT revision_status, revision_number, corrected_by_name
             FROM drawing_log WHERE id = $1",
        )
        .bind(drawing_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rev_status.as_deref(), Some("AS-BUILT"));
    assert_eq!(rev_number, Some(3));
    assert_eq!(editor_name.as_deref(), Some("M. Vega"));

    // GET returns what was saved.
    let json = expect_json(
        get(app, &format!("/api/v1/drawings/{drawing_id}/annotations")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["annotations"][0]["type"], "rect");
    assert_eq!(json["pdfUrl"], pdf_url);
    assert_eq!(json["revisionNumber"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn latest_is_by_creation_time_not_revision_number(pool: PgPool) {
    let drawing_id = seed_log(&pool, "R-1", None, None, None).await;
    let (app, _blobs) = common::build_test_app(pool.clone());
    let token = editor_token(7, "M. Vega");

    for (number, marker) in [(5, "first"), (2, "second")] {
        let body = multipart_body(&[
            (
                "annotations",
                None,
                format!(r#"[{{"type":"note","text":"{marker}"}}]"#).as_bytes(),
            ),
            ("pdfBlob", Some("r.pdf"), b"%PDF-1.7".as_slice()),
            ("revisionNumber", None, number.to_string().as_bytes()),
        ]);
        let request = multipart_request(
            &format!("/api/v1/drawings/{drawing_id}/annotations"),
            &token,
            body,
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Two distinct revision rows exist.
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM drawing_revisions WHERE drawing_id = $1",
    )
    .bind(drawing_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 2);

    // The later save wins even though its revision number is smaller.
    let json = expect_json(
        get(app, &format!("/api/v1/drawings/{drawing_id}/annotations")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["revisionNumber"], 2);
    assert_eq!(json["annotations"][0]["text"], "second");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn latest_defaults_when_no_revisions_exist(pool: PgPool) {
    let drawing_id = seed_log(&pool, "R-1", None, None, None).await;
    let (app, _blobs) = common::build_test_app(pool);

    let json = expect_json(
        get(app, &format!("/api/v1/drawings/{drawing_id}/annotations")).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(json["annotations"], serde_json::json!([]));
    assert_eq!(json["pdfUrl"], serde_json::Value::Null);
    assert_eq!(json["revisionNumber"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn save_to_unknown_drawing_returns_404(pool: PgPool) {
    let (app, _blobs) = common::build_test_app(pool);
    let token = editor_token(7, "M. Vega");

    let body = multipart_body(&[
        ("annotations", None, b"[]".as_slice()),
        ("pdfBlob", Some("r.pdf"), b"%PDF-1.7".as_slice()),
    ]);
    let request = multipart_request("/api/v1/drawings/99999/annotations", &token, body);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Release status
// ---------------------------------------------------------------------------

async fn patch_release_status(
    app: axum::Router,
    drawing_id: i64,
    token: Option<&str>,
    body: serde_json::Value,
) -> axum::http::Response<Body> {
    let mut builder = Request::builder()
        .method("PATCH")
        .uri(format!("/api/v1/drawings/{drawing_id}/release-status"))
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn release_status_requires_authentication(pool: PgPool) {
    let drawing_id = seed_log(&pool, "R-1", None, None, None).await;
    let (app, _blobs) = common::build_test_app(pool);

    let response = patch_release_status(
        app,
        drawing_id,
        None,
        serde_json::json!({"releaseStatus": "Partially Released"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn release_status_accepts_both_defined_values(pool: PgPool) {
    let drawing_id = seed_log(&pool, "R-1", None, None, None).await;
    let (app, _blobs) = common::build_test_app(pool.clone());
    let token = editor_token(4, "A. Reyes");

    for value in ["Partially Released", "Yet to Be Released"] {
        let response = patch_release_status(
            app.clone(),
            drawing_id,
            Some(&token),
            serde_json::json!({"releaseStatus": value}),
        )
        .await;
        let json = expect_json(response, StatusCode::OK).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["releaseStatus"], value);

        let (stored,): (Option<String>,) =
            sqlx::query_as("SELECT release_status FROM drawing_log WHERE id = $1")
                .bind(drawing_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(stored.as_deref(), Some(value));
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn release_status_rejects_third_value_without_writing(pool: PgPool) {
    let drawing_id = seed_log(&pool, "R-1", None, None, None).await;
    sqlx::query("UPDATE drawing_log SET release_status = 'Partially Released' WHERE id = $1")
        .bind(drawing_id)
        .execute(&pool)
        .await
        .unwrap();

    let (app, _blobs) = common::build_test_app(pool.clone());
    let token = editor_token(4, "A. Reyes");

    let response = patch_release_status(
        app,
        drawing_id,
        Some(&token),
        serde_json::json!({"releaseStatus": "Somewhere Else"}),
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // The stored value is unchanged.
    let (stored,): (Option<String>,) =
        sqlx::query_as("SELECT release_status FROM drawing_log WHERE id = $1")
            .bind(drawing_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stored.as_deref(), Some("Partially Released"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn release_status_unknown_drawing_returns_404(pool: PgPool) {
    let (app, _blobs) = common::build_test_app(pool);
    let token = editor_token(4, "A. Reyes");

    let response = patch_release_status(
        app,
        99999,
        Some(&token),
        serde_json::json!({"releaseStatus": "Partially Released"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let (app, _blobs) = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let (app, _blobs) = common::build_test_app(pool);
    let response = get(app, "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}
