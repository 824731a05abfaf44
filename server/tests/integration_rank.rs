use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use shortlist_server::{build_app, ServerConfig};
use tower::ServiceExt;

fn app() -> Router {
    build_app(ServerConfig { max_candidates: 3, ..Default::default() }).unwrap()
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

async fn post_rank(body: Value) -> (StatusCode, Value) {
    let req = Request::post("/rank")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = call(app(), req).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = call(app(), Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn rank_returns_shortlist() {
    let (status, json) = post_rank(json!({
        "query": "machine learning engineer python",
        "candidates": [
            {"id": "r1", "text": "machine learning engineer"},
            {"id": "r2", "text": "sales associate retail"}
        ],
        "k": 1
    }))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_candidates"], 2);
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["id"], "r1");
    assert!(arr[0]["score"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn k_beyond_i64_returns_every_candidate() {
    for k in [json!(u64::MAX), json!("99999999999999999999")] {
        let (status, json) = post_rank(json!({
            "query": "rust",
            "candidates": [{"id": "a", "text": "rust"}, {"id": "b", "text": "go"}],
            "k": k
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        let arr = json["results"].as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["id"], "a");
    }
}

#[tokio::test]
async fn missing_k_uses_server_default() {
    let (status, json) = post_rank(json!({
        "query": "rust",
        "candidates": [{"id": "a", "text": "rust"}, {"id": "b", "text": "go"}]
    }))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn non_integer_k_is_bad_request() {
    let (status, json) = post_rank(json!({"query": "rust", "candidates": [], "k": "many"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("`k`"));
}

#[tokio::test]
async fn duplicate_ids_are_unprocessable() {
    let (status, json) = post_rank(json!({
        "query": "rust",
        "candidates": [{"id": "a", "text": "rust"}, {"id": "a", "text": "go"}],
        "k": 1
    }))
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "duplicate candidate identifier: a");
}

#[tokio::test]
async fn too_many_candidates_is_rejected() {
    let candidates: Vec<Value> = (0..4).map(|i| json!({"id": format!("c{i}"), "text": "x"})).collect();
    let (status, _) = post_rank(json!({"query": "x", "candidates": candidates, "k": 1})).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let req = Request::post("/rank")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, bytes) = call(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["error"].is_string());
}
