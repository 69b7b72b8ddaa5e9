use std::collections::HashMap;

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Hostname, HostnameList, Problem, FORBIDDEN_CONFIG_ID};
use tower::ServiceExt;

const PATH: &str = "/appsec/v1/configs/12345/versions/7/selected-hostnames";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn seeded() -> axum::Router {
    let mut seed = HashMap::new();
    seed.insert(
        (12345, 7),
        vec![Hostname {
            hostname: "example.com".to_string(),
        }],
    );
    app_with(seed)
}

// --- get ---

#[tokio::test]
async fn get_seeded_hostnames() {
    let resp = seeded().oneshot(get_request(PATH)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: HostnameList = body_json(resp).await;
    assert_eq!(list.hostname_list.len(), 1);
    assert_eq!(list.hostname_list[0].hostname, "example.com");
}

#[tokio::test]
async fn get_unknown_version_returns_problem_404() {
    let resp = app().oneshot(get_request(PATH)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/problem+json"
    );
    let problem: Problem = body_json(resp).await;
    assert_eq!(problem.status, 404);
    assert!(problem.instance.contains("/error-instances/"));
}

#[tokio::test]
async fn get_forbidden_config_returns_403() {
    let uri = format!("/appsec/v1/configs/{FORBIDDEN_CONFIG_ID}/versions/1/selected-hostnames");
    let resp = app().oneshot(get_request(&uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let problem: Problem = body_json(resp).await;
    assert_eq!(problem.title, "Unauthorized");
}

#[tokio::test]
async fn get_non_numeric_id_returns_400() {
    let resp = app()
        .oneshot(get_request(
            "/appsec/v1/configs/abc/versions/1/selected-hostnames",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn first_update_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            PATH,
            r#"{"configId":12345,"version":7,"hostnameList":[{"hostname":"a.com"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let list: HostnameList = body_json(resp).await;
    assert_eq!(list.hostname_list[0].hostname, "a.com");
}

#[tokio::test]
async fn update_normalizes_hostnames() {
    let resp = seeded()
        .oneshot(json_request(
            "PUT",
            PATH,
            r#"{"configId":12345,"version":7,"hostnameList":[{"hostname":" B.com"},{"hostname":"b.com"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: HostnameList = body_json(resp).await;
    assert_eq!(
        list.hostname_list,
        vec![Hostname {
            hostname: "b.com".to_string()
        }]
    );
}

#[tokio::test]
async fn update_with_mismatched_ids_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            PATH,
            r#"{"configId":1,"version":7,"hostnameList":[]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem: Problem = body_json(resp).await;
    assert!(problem.kind.ends_with("INVALID-INPUT-ERROR"));
}

#[tokio::test]
async fn update_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("PUT", PATH, r#"{"hostnames":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- replace lifecycle ---

#[tokio::test]
async fn replace_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // get before any update: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(PATH))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // first replace: created
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            PATH,
            r#"{"configId":12345,"version":7,"hostnameList":[{"hostname":"a.com"},{"hostname":"b.com"}]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // get: both hostnames
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(PATH))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let list: HostnameList = body_json(resp).await;
    assert_eq!(list.hostname_list.len(), 2);

    // second replace swaps the full set
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            PATH,
            r#"{"configId":12345,"version":7,"hostnameList":[{"hostname":"c.com"}]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(PATH))
        .await
        .unwrap();
    let list: HostnameList = body_json(resp).await;
    assert_eq!(list.hostname_list.len(), 1);
    assert_eq!(list.hostname_list[0].hostname, "c.com");

    // other versions are untouched
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(
            "/appsec/v1/configs/12345/versions/8/selected-hostnames",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
