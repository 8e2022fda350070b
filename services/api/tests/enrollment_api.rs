//! Enrollment and lesson gating through the HTTP surface.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, get, post, StubCompletions};
use serde_json::Value;

fn access(body: &Value) -> Vec<String> {
    body["videos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["access"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Test: a $29.99 course locks lesson 2 until the user enrolls
// ---------------------------------------------------------------------------

#[tokio::test]
async fn enrolling_unlocks_priced_course() {
    let app = build_test_app(StubCompletions::offline());
    post(&app, "/courses/c3/select", None).await;

    let (_, before) = get(&app, "/courses/c3/access").await;
    assert_eq!(access(&before), vec!["preview_locked", "locked"]);
    let (status, _) = post(&app, "/player/videos/v5", None).await;
    assert_eq!(status, StatusCode::LOCKED);

    let (status, enrolled) = post(&app, "/courses/c3/enroll", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(enrolled["newly_enrolled"], true);

    let (_, after) = get(&app, "/courses/c3/access").await;
    assert_eq!(access(&after), vec!["playable", "playable"]);
    let (status, video) = post(&app, "/player/videos/v5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(video["id"], "v5");
}

#[tokio::test]
async fn enrolling_twice_keeps_a_single_entry() {
    let app = build_test_app(StubCompletions::offline());

    post(&app, "/courses/c3/enroll", None).await;
    let (_, second) = post(&app, "/courses/c3/enroll", None).await;

    assert_eq!(second["newly_enrolled"], false);
    let enrolled: Vec<&str> = second["enrolled_courses"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|id| id.as_str())
        .filter(|id| *id == "c3")
        .collect();
    assert_eq!(enrolled.len(), 1);
}

#[tokio::test]
async fn free_course_is_open_without_enrollment() {
    let app = build_test_app(StubCompletions::offline());

    let (_, body) = get(&app, "/courses/c2/access").await;

    assert_eq!(access(&body), vec!["playable"]);
}

#[tokio::test]
async fn unknown_course_enrollment_is_not_found() {
    let app = build_test_app(StubCompletions::offline());

    let (status, _) = post(&app, "/courses/nope/enroll", None).await;
    let (_, state) = get(&app, "/state").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(state["user"]["enrolledCourses"], serde_json::json!(["c1"]));
}
