mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use serde_json::json;
use talentflow::chaos::Chaos;
use talentflow::routes;

use common::{send, test_state, test_state_with_chaos};

#[tokio::test]
async fn create_job_assigns_id_status_and_order() {
    let app = routes::router(test_state().await);

    let (status, first) = send(
        &app,
        "POST",
        "/api/jobs",
        Some(json!({"title": "Backend Engineer", "slug": "backend-engineer"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(first["id"].as_str().is_some());
    assert_eq!(first["status"], "active");
    assert_eq!(first["order"], 0);
    assert!(first["createdAt"].as_str().is_some());

    let (status, second) = send(
        &app,
        "POST",
        "/api/jobs",
        Some(json!({"title": "Frontend Engineer", "slug": "frontend-engineer"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["order"], 1);
}

#[tokio::test]
async fn duplicate_slug_is_rejected() {
    let app = routes::router(test_state().await);

    let (status, _) = send(
        &app,
        "POST",
        "/api/jobs",
        Some(json!({"title": "First", "slug": "shared-slug"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/jobs",
        Some(json!({"title": "Second", "slug": "shared-slug"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Slug must be unique");

    let (_, other) = send(
        &app,
        "POST",
        "/api/jobs",
        Some(json!({"title": "Third", "slug": "other-slug"})),
    )
    .await;
    let other_id = other["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/jobs/{}", other_id),
        Some(json!({"slug": "shared-slug"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Slug must be unique");

    // A record keeping its own slug is not a collision.
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/jobs/{}", other_id),
        Some(json!({"slug": "other-slug", "title": "Third, renamed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn empty_title_is_rejected() {
    let app = routes::router(test_state().await);

    let (status, _) = send(
        &app,
        "POST",
        "/api/jobs",
        Some(json!({"title": "", "slug": "blank"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_paginates_with_default_page_size() {
    let app = routes::router(test_state().await);
    for i in 0..25 {
        let (status, _) = send(
            &app,
            "POST",
            "/api/jobs",
            Some(json!({"title": format!("Job {}", i), "slug": format!("job-{}", i)})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/api/jobs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 25);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 10);
    assert_eq!(body["items"].as_array().unwrap().len(), 10);

    let (_, page3) = send(&app, "GET", "/api/jobs?page=3", None).await;
    assert_eq!(page3["items"].as_array().unwrap().len(), 5);
    assert_eq!(page3["total"], 25);

    let (status, past_end) = send(&app, "GET", "/api/jobs?page=4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(past_end["items"].as_array().unwrap().len(), 0);
    assert_eq!(past_end["total"], 25);
}

#[tokio::test]
async fn extreme_page_number_yields_an_empty_page() {
    let app = routes::router(test_state().await);
    for i in 0..3 {
        send(
            &app,
            "POST",
            "/api/jobs",
            Some(json!({"title": format!("Job {}", i), "slug": format!("job-{}", i)})),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        "GET",
        "/api/jobs?page=9223372036854775807&pageSize=10",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn repeated_reads_return_identical_pages() {
    let app = routes::router(test_state().await);
    for i in 0..12 {
        send(
            &app,
            "POST",
            "/api/jobs",
            Some(json!({"title": format!("Job {}", i), "slug": format!("job-{}", i)})),
        )
        .await;
    }

    let (_, first) = send(&app, "GET", "/api/jobs?page=2&pageSize=5", None).await;
    let (_, second) = send(&app, "GET", "/api/jobs?page=2&pageSize=5", None).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn pages_partition_the_dataset() {
    let app = routes::router(test_state().await);
    for i in 0..25 {
        send(
            &app,
            "POST",
            "/api/jobs",
            Some(json!({"title": format!("Job {}", i), "slug": format!("job-{}", i)})),
        )
        .await;
    }

    let mut seen = HashSet::new();
    for page in 1..=3 {
        let (_, body) = send(&app, "GET", &format!("/api/jobs?page={}", page), None).await;
        for item in body["items"].as_array().unwrap() {
            let id = item["id"].as_str().unwrap().to_string();
            assert!(seen.insert(id), "id appeared on more than one page");
        }
    }
    assert_eq!(seen.len(), 25);
}

#[tokio::test]
async fn list_filters_by_status_tags_and_search() {
    let app = routes::router(test_state().await);
    send(
        &app,
        "POST",
        "/api/jobs",
        Some(json!({
            "title": "Rust Engineer",
            "slug": "rust-engineer",
            "tags": ["Rust", "Backend"]
        })),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/jobs",
        Some(json!({
            "title": "Product Designer",
            "slug": "product-designer",
            "status": "archived",
            "tags": ["Figma"]
        })),
    )
    .await;

    let (_, archived) = send(&app, "GET", "/api/jobs?status=archived", None).await;
    assert_eq!(archived["total"], 1);
    assert_eq!(archived["items"][0]["slug"], "product-designer");

    // "all" is the no-filter sentinel.
    let (_, all) = send(&app, "GET", "/api/jobs?status=all", None).await;
    assert_eq!(all["total"], 2);

    let (_, tagged) = send(&app, "GET", "/api/jobs?tags=rust", None).await;
    assert_eq!(tagged["total"], 1);
    assert_eq!(tagged["items"][0]["slug"], "rust-engineer");

    let (_, searched) = send(&app, "GET", "/api/jobs?search=engineer", None).await;
    assert_eq!(searched["total"], 1);

    let (_, none) = send(&app, "GET", "/api/jobs?search=astronaut", None).await;
    assert_eq!(none["total"], 0);
}

#[tokio::test]
async fn list_sorts_by_requested_field() {
    let app = routes::router(test_state().await);
    for (title, slug) in [("Bravo", "bravo"), ("Alpha", "alpha"), ("Charlie", "charlie")] {
        send(
            &app,
            "POST",
            "/api/jobs",
            Some(json!({"title": title, "slug": slug})),
        )
        .await;
    }

    let (_, asc) = send(&app, "GET", "/api/jobs?sort=title", None).await;
    let titles: Vec<&str> = asc["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alpha", "Bravo", "Charlie"]);

    let (_, desc) = send(&app, "GET", "/api/jobs?sort=title:desc", None).await;
    let titles: Vec<&str> = desc["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Charlie", "Bravo", "Alpha"]);
}

#[tokio::test]
async fn get_unknown_job_is_not_found() {
    let app = routes::router(test_state().await);
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(&app, "GET", &format!("/api/jobs/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/jobs/{}", missing),
        Some(json!({"title": "Ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/jobs/{}/reorder", missing),
        Some(json!({"order": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reorder_moves_job_within_the_default_listing() {
    let app = routes::router(test_state().await);
    let mut first_id = String::new();
    for i in 0..3 {
        let (_, job) = send(
            &app,
            "POST",
            "/api/jobs",
            Some(json!({"title": format!("Job {}", i), "slug": format!("job-{}", i)})),
        )
        .await;
        if i == 0 {
            first_id = job["id"].as_str().unwrap().to_string();
        }
    }

    let (status, reordered) = send(
        &app,
        "PATCH",
        &format!("/api/jobs/{}/reorder", first_id),
        Some(json!({"order": 99})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reordered["order"], 99);

    let (_, listed) = send(&app, "GET", "/api/jobs", None).await;
    let items = listed["items"].as_array().unwrap();
    assert_eq!(items.last().unwrap()["id"], first_id.as_str());
}

#[tokio::test]
async fn writes_fail_under_failure_injection_but_reads_survive() {
    let app = routes::router(test_state_with_chaos(Chaos::always_fail()).await);

    let (status, body) = send(
        &app,
        "POST",
        "/api/jobs",
        Some(json!({"title": "Doomed", "slug": "doomed"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");

    let (status, body) = send(&app, "GET", "/api/jobs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
}
