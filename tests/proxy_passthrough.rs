//! End-to-end tests: client → proxy → mock course backend.

use axum::http::StatusCode;

mod common;

#[tokio::test]
async fn test_list_all_passes_through() {
    let (upstream, _) = common::start_upstream().await;
    let (proxy, shutdown) = common::start_proxy(format!("http://{}", upstream)).await;

    let res = common::client()
        .get(format!("http://{}/api/all", proxy))
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), r#"{"courses":[]}"#);

    shutdown.trigger();
}

#[tokio::test]
async fn test_search_body_forwarded_verbatim() {
    let (upstream, recorded) = common::start_upstream().await;
    let (proxy, shutdown) = common::start_proxy(format!("http://{}", upstream)).await;

    let res = common::client()
        .post(format!("http://{}/api/search", proxy))
        .header("content-type", "application/json")
        .body(r#"{"keywords":"cs"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "[]");

    let searches = recorded.searches();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].body, br#"{"keywords":"cs"}"#);
    assert_eq!(searches[0].content_type.as_deref(), Some("application/json"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_search_keeps_full_query() {
    let (upstream, recorded) = common::start_upstream().await;
    let (proxy, shutdown) = common::start_proxy(format!("http://{}", upstream)).await;

    let body = r#"{"keywords":"data","offset":50,"filters":{"requirements":["the American Cultures requirement"],"requirements_or":false}}"#;
    common::client()
        .post(format!("http://{}/api/search", proxy))
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(recorded.searches()[0].body, body.as_bytes());

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_search_body_fails_open() {
    let (upstream, recorded) = common::start_upstream().await;
    let (proxy, shutdown) = common::start_proxy(format!("http://{}", upstream)).await;
    let client = common::client();

    for body in ["keywords=cs", "", "{\"keywords\":"] {
        let res = client
            .post(format!("http://{}/api/search", proxy))
            .header("content-type", "text/plain")
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "body {body:?} should not fail");
    }

    let searches = recorded.searches();
    assert_eq!(searches.len(), 3);
    for search in searches {
        assert_eq!(search.body, br#"{"keywords":""}"#);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_not_found_is_forwarded() {
    let (upstream, _) = common::start_upstream().await;
    let (proxy, shutdown) = common::start_proxy(format!("http://{}/missing", upstream)).await;

    let res = common::client()
        .get(format!("http://{}/api/all", proxy))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), r#"{"error":"not found"}"#);

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_content_type_defaults_to_json() {
    let upstream = common::start_raw_upstream("500 Internal Server Error", "db down").await;
    let (proxy, shutdown) = common::start_proxy(format!("http://{}", upstream)).await;

    let res = common::client()
        .get(format!("http://{}/api/all", proxy))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), "db down");

    shutdown.trigger();
}

#[tokio::test]
async fn test_large_body_streams_through() {
    let (upstream, _) = common::start_upstream().await;
    let (proxy, shutdown) = common::start_proxy(format!("http://{}/large", upstream)).await;

    let res = common::client()
        .get(format!("http://{}/api/all", proxy))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/plain; charset=utf-8");
    let body = res.text().await.unwrap();
    assert_eq!(body.len(), common::LARGE_BODY_LEN);
    assert_eq!(body, common::large_body());

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    let upstream = common::closed_addr().await;
    let (proxy, shutdown) = common::start_proxy(format!("http://{}", upstream)).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/api/all", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(res.text().await.unwrap(), r#"{"error":"upstream unavailable"}"#);

    let res = client
        .post(format!("http://{}/api/search", proxy))
        .body(r#"{"keywords":"cs"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    shutdown.trigger();
}
