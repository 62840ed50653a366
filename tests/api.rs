use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use mathtutor_backend::config::TutorConfig;
use mathtutor_backend::routes::build_router;
use mathtutor_backend::state::AppState;

fn app() -> Router {
    build_router(Arc::new(AppState::with_config(TutorConfig::default())))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health() {
    let (status, body) = send(&app(), get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn practice_round_trip() {
    let app = app();
    let (status, session) = send(&app, post("/api/v1/session", json!({ "topic": "pythagoras", "seed": 7 }))).await;
    assert_eq!(status, StatusCode::OK);
    let sid = session["sessionId"].as_str().unwrap().to_string();
    assert_eq!(session["kinds"].as_array().unwrap().len(), 5);

    let (status, _) = send(&app, get(&format!("/api/v1/hint?sessionId={sid}"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, served) = send(&app, get(&format!("/api/v1/problem?sessionId={sid}&kind=missing_hypotenuse"))).await;
    assert_eq!(status, StatusCode::OK);
    let problem = &served["problem"];
    assert!(problem.get("expected").is_none());
    let a = problem["parameters"]["a"].as_i64().unwrap();
    let b = problem["parameters"]["b"].as_i64().unwrap();
    let c = ((a * a + b * b) as f64).sqrt();

    let (_, hint) = send(&app, get(&format!("/api/v1/hint?sessionId={sid}"))).await;
    assert!(!hint["text"].as_str().unwrap().is_empty());

    let answer = json!({ "sessionId": sid, "answer": format!("{c:.1}") });
    let (status, result) = send(&app, post("/api/v1/answer", answer.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["correct"], true);
    assert_eq!(result["verdict"], "correct");
    assert_eq!(result["score"]["score"], 10);
    assert!(result["explanation"].as_str().unwrap().contains("a² + b² = c²"));

    let (status, _) = send(&app, post("/api/v1/answer", answer)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, reset) = send(&app, post("/api/v1/score/reset", json!({ "sessionId": sid }))).await;
    assert_eq!(reset["score"]["score"], 0);
}

#[tokio::test]
async fn invalid_input_asks_again() {
    let app = app();
    let (_, session) = send(&app, post("/api/v1/session", json!({ "topic": "surface_area" }))).await;
    let sid = session["sessionId"].as_str().unwrap();
    send(&app, get(&format!("/api/v1/problem?sessionId={sid}"))).await;

    let (status, result) = send(&app, post("/api/v1/answer", json!({ "sessionId": sid, "answer": "lots" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["verdict"], "invalid");
    assert_eq!(result["expected"], "");
    assert_eq!(result["score"]["attempts"], 0);

    let (_, result) = send(&app, post("/api/v1/answer", json!({ "sessionId": sid, "answer": "-1" }))).await;
    assert_eq!(result["verdict"], "incorrect");
    assert!(result["expected"].as_str().unwrap().ends_with("sq units"));
}

#[tokio::test]
async fn quiz_queue() {
    let app = app();
    let (_, session) = send(&app, post("/api/v1/session", json!({ "topic": "real_numbers", "seed": 3 }))).await;
    let sid = session["sessionId"].as_str().unwrap();
    let (status, quiz) = send(&app, post("/api/v1/quiz", json!({ "sessionId": sid, "len": 4 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quiz["queued"], 4);

    let (_, served) = send(&app, get(&format!("/api/v1/problem?sessionId={sid}"))).await;
    assert_eq!(served["quizRemaining"], 3);

    let (status, body) = send(&app, post("/api/v1/quiz", json!({ "sessionId": sid, "len": 1000 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("at most 50"));
}

#[tokio::test]
async fn triangle_solving_asks_for_x_and_the_angle() {
    let app = app();
    let (_, session) = send(&app, post("/api/v1/session", json!({ "topic": "angles", "seed": 4 }))).await;
    let sid = session["sessionId"].as_str().unwrap();

    let (_, served) = send(&app, get(&format!("/api/v1/problem?sessionId={sid}&kind=triangle_solve"))).await;
    let problem = &served["problem"];
    assert_eq!(problem["fields"], json!(["x", "angle"]));
    let params = problem["parameters"].as_object().unwrap();
    assert!(params.get("x").is_none() && params.get("angle").is_none(), "{params:?}");

    let (_, result) = send(&app, post("/api/v1/answer", json!({ "sessionId": sid, "answer": "0" }))).await;
    assert_eq!(result["verdict"], "invalid");
    assert_eq!(result["message"], "Please enter an answer first.");

    let (_, result) = send(&app, post("/api/v1/answer", json!({ "sessionId": sid, "answer": "0", "angle": "0" }))).await;
    assert_eq!(result["verdict"], "incorrect");
    assert!(result["expected"].as_str().unwrap().starts_with("x = "));
}

#[tokio::test]
async fn closing_a_session() {
    let app = app();
    let (_, session) = send(&app, post("/api/v1/session", json!({ "topic": "sci_notation" }))).await;
    let sid = session["sessionId"].as_str().unwrap();

    let (status, body) = send(&app, delete(&format!("/api/v1/session?sessionId={sid}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["closed"], true);

    let (status, _) = send(&app, get(&format!("/api/v1/score?sessionId={sid}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, delete(&format!("/api/v1/session?sessionId={sid}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_errors() {
    let app = app();
    let (status, body) = send(&app, get("/api/v1/problem?sessionId=missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("missing"));

    let (_, session) = send(&app, post("/api/v1/session", json!({ "topic": "angles" }))).await;
    let sid = session["sessionId"].as_str().unwrap();
    let (status, _) = send(&app, get(&format!("/api/v1/problem?sessionId={sid}&kind=cylinder"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn relationship_and_convert() {
    let app = app();
    let (status, rel) = send(&app, get("/api/v1/relationship?diagram=transversal&a=5&b=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rel["name"], "Corresponding Angles");
    assert_eq!(rel["classification"], "congruent");

    let (_, rel) = send(&app, get("/api/v1/relationship?diagram=triangle&a=ExtC&b=C")).await;
    assert_eq!(rel["name"], "Linear Pair");

    let (status, _) = send(&app, get("/api/v1/relationship?diagram=transversal&a=0&b=1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, out) = send(&app, post("/api/v1/convert", json!({ "value": "2.5x10^5", "to": "standard" }))).await;
    assert_eq!(out, json!({ "result": "250000", "pretty": "250,000" }));
    let (status, out) = send(&app, post("/api/v1/convert", json!({ "value": "0", "to": "scientific" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(out["error"], "zero has no scientific form");
}
