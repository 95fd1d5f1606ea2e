mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{delete, get, post_json, post_raw, TestApp};
use golf_api::database::models::{NewGolfCourse, NewTeeBox};

fn new_course(name: &str) -> NewGolfCourse {
    NewGolfCourse {
        golf_club_id: 1,
        name: name.to_string(),
        num_holes: 18,
    }
}

fn new_tee_box(golf_course_id: i32) -> NewTeeBox {
    NewTeeBox {
        golf_course_id,
        tee_color: "blue".to_string(),
        par: 72,
        distance: 6800,
        unit: "yards".to_string(),
        course_rating: 72.4,
        slope: 131.0,
    }
}

fn tee_box_body() -> Value {
    json!({
        "tee_color": "red",
        "par": 72,
        "distance": 5200,
        "unit": "yards",
        "course_rating": 69.8,
        "slope": 118
    })
}

fn hole_body(number: i32, handicap: i32) -> Value {
    json!({
        "hole_number": number,
        "name": format!("Hole {}", number),
        "par": 4,
        "handicap": handicap,
        "distance": 410,
        "unit": "yards"
    })
}

fn names(body: &Value) -> Vec<String> {
    body["result"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn list_courses_returns_everything() -> Result<()> {
    let app = TestApp::new();
    for name in ["North", "South", "East"] {
        app.golf_courses.seed(new_course(name)).await;
    }

    let (status, body) = app.send(get("/api/golf-courses/")).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["North", "South", "East"]);
    assert_eq!(app.golf_courses.calls(), vec!["get_all"]);
    Ok(())
}

#[tokio::test]
async fn list_courses_by_repeated_id_passes_strings() -> Result<()> {
    let app = TestApp::new();
    for name in ["North", "South", "East"] {
        app.golf_courses.seed(new_course(name)).await;
    }

    let (status, body) = app.send(get("/api/golf-courses/?id=2&id=3")).await?;

    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    assert_eq!(
        app.golf_courses.requested_ids(),
        vec![vec!["2".to_string(), "3".to_string()]]
    );
    assert_eq!(names(&body), vec!["South", "East"]);
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_filter_is_bad_request() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.send(get("/api/golf-courses/?id=north")).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn get_course_and_missing_course() -> Result<()> {
    let app = TestApp::new();
    let course = app.golf_courses.seed(new_course("Links")).await;

    let (status, body) = app.send(get(&format!("/api/golf-courses/{}", course.id))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["name"], "Links");
    assert_eq!(body["result"]["tee_boxes"], json!([]));

    let (status, _) = app.send(get("/api/golf-courses/404")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_course_reports_outcome() -> Result<()> {
    let app = TestApp::new();
    let course = app.golf_courses.seed(new_course("Links")).await;

    let (status, body) = app.send(delete(&format!("/api/golf-courses/{}", course.id))).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.send(delete("/api/golf-courses/77")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn tee_box_create_merges_course_id() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .send(post_json("/api/golf-courses/5/tee-boxes", &tee_box_body()))
        .await?;

    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    assert_eq!(body["result"]["golf_course_id"], 5);
    assert_eq!(body["result"]["tee_color"], "red");

    let created = app.tee_boxes.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].golf_course_id, 5);
    Ok(())
}

#[tokio::test]
async fn tee_box_create_requires_json_content_type() -> Result<()> {
    let app = TestApp::new();

    let (status, _) = app
        .send(post_raw("/api/golf-courses/5/tee-boxes", None, &tee_box_body().to_string()))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(post_raw("/api/golf-courses/5/tee-boxes", Some("text/plain"), "red tees"))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(app.tee_boxes.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn tee_box_create_rejects_schema_errors() -> Result<()> {
    let app = TestApp::new();
    let mut body = tee_box_body();
    body["slope"] = json!(20);

    let (status, response) = app.send(post_json("/api/golf-courses/5/tee-boxes", &body)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["field_errors"]["slope"].is_string(), "{}", response);

    let (status, _) = app
        .send(post_json("/api/golf-courses/5/tee-boxes", &json!({"tee_color": "red"})))
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert!(app.tee_boxes.created().is_empty());
    Ok(())
}

#[tokio::test]
async fn tee_box_lookup_and_delete() -> Result<()> {
    let app = TestApp::new();
    let tee_box = app.tee_boxes.seed(new_tee_box(3)).await;
    app.tee_boxes.seed(new_tee_box(4)).await;

    let (status, body) = app.send(get("/api/golf-courses/3/tee-boxes")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"].as_array().map(Vec::len), Some(1));

    let (status, body) = app.send(get(&format!("/api/golf-courses/tee-boxes/{}", tee_box.id))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["tee_color"], "blue");

    let (status, _) = app.send(get("/api/golf-courses/tee-boxes/99")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(delete(&format!("/api/golf-courses/tee-boxes/{}", tee_box.id))).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.send(delete(&format!("/api/golf-courses/tee-boxes/{}", tee_box.id))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn holes_post_requires_holes_key() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .send(post_json("/api/golf-courses/1/tee-boxes/2/holes", &json!({"hole": [hole_body(1, 1)]})))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST, "unexpected body: {}", body);
    assert!(app.holes.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn holes_post_rejects_bad_holes() -> Result<()> {
    let app = TestApp::new();
    let mut unknown = hole_body(1, 1);
    unknown["color"] = json!("green");

    let (status, _) = app
        .send(post_json("/api/golf-courses/1/tee-boxes/2/holes", &json!({"holes": [unknown]})))
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app
        .send(post_json(
            "/api/golf-courses/1/tee-boxes/2/holes",
            &json!({"holes": [hole_body(1, 1), hole_body(2, 1)]}),
        ))
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app
        .send(post_json("/api/golf-courses/1/tee-boxes/2/holes", &json!({"holes": [hole_body(19, 3)]})))
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert!(app.holes.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn holes_post_bulk_creates_with_path_ids() -> Result<()> {
    let app = TestApp::new();
    let tee_box = app.tee_boxes.seed(new_tee_box(1)).await;
    let uri = format!("/api/golf-courses/1/tee-boxes/{}/holes", tee_box.id);
    let holes = json!({"holes": [hole_body(2, 7), hole_body(1, 11)]});

    let (status, body) = app.send(post_json(&uri, &holes)).await?;

    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    assert_eq!(app.tee_boxes.calls(), vec!["get"]);
    assert_eq!(app.holes.calls(), vec!["get_by_tee_box_id", "bulk_create"]);
    let created = app.holes.created();
    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|h| h.golf_course_id == 1 && h.tee_box_id == tee_box.id));

    let (status, body) = app.send(get(&uri)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Hole 1", "Hole 2"]);
    Ok(())
}

#[tokio::test]
async fn holes_post_for_missing_tee_box_is_not_found() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .send(post_json("/api/golf-courses/77/tee-boxes/999/holes", &json!({"holes": [hole_body(1, 1)]})))
        .await?;

    assert_eq!(status, StatusCode::NOT_FOUND, "unexpected body: {}", body);
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(app.holes.created().is_empty());
    Ok(())
}

#[tokio::test]
async fn holes_post_rejects_tee_box_of_another_course() -> Result<()> {
    let app = TestApp::new();
    let tee_box = app.tee_boxes.seed(new_tee_box(3)).await;

    let (status, body) = app
        .send(post_json(
            &format!("/api/golf-courses/1/tee-boxes/{}/holes", tee_box.id),
            &json!({"holes": [hole_body(1, 1)]}),
        ))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST, "unexpected body: {}", body);
    assert!(app.holes.created().is_empty());
    Ok(())
}

#[tokio::test]
async fn holes_stay_unique_across_submissions() -> Result<()> {
    let app = TestApp::new();
    let tee_box = app.tee_boxes.seed(new_tee_box(1)).await;
    let uri = format!("/api/golf-courses/1/tee-boxes/{}/holes", tee_box.id);

    let (status, _) = app.send(post_json(&uri, &json!({"holes": [hole_body(1, 1)]}))).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send(post_json(&uri, &json!({"holes": [hole_body(1, 1)]}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["field_errors"]["holes[0].hole_number"].is_string(), "{}", body);

    let (status, body) = app.send(post_json(&uri, &json!({"holes": [hole_body(2, 1)]}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["field_errors"]["holes[0].handicap"].is_string(), "{}", body);

    let (status, _) = app.send(post_json(&uri, &json!({"holes": [hole_body(2, 2)]}))).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.send(get(&uri)).await?;
    assert_eq!(names(&body), vec!["Hole 1", "Hole 2"]);
    assert_eq!(app.holes.created().len(), 2);
    Ok(())
}

#[tokio::test]
async fn non_numeric_path_id_uses_error_envelope() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.send(get("/api/golf-courses/abc")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["error"], true);

    let (status, body) = app.send(delete("/api/golf-courses/tee-boxes/blue")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = app
        .send(post_json("/api/golf-courses/1/tee-boxes/x/holes", &json!({"holes": [hole_body(1, 1)]})))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    assert!(app.golf_courses.calls().is_empty());
    assert!(app.tee_boxes.calls().is_empty());
    Ok(())
}
