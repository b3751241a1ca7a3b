//! End-to-end tests against a running server.

use std::time::Duration;

use lang_negotiation::{Method, NegotiationOption};

mod common;

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_serves_negotiated_language() {
    let (addr, shutdown) = common::start_server(common::config(
        &["en", "ja", "de"],
        &[Method::PathPrefix, Method::Header],
        &[],
    ))
    .await;

    let res = client()
        .get(format!("http://{}/docs", addr))
        .header("Accept-Language", "de;q=0.7, ja;q=0.3")
        .send()
        .await
        .expect("Server unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-language"], "de");
    assert_eq!(res.headers()["vary"], "Accept-Language");

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["language"], "de");
    assert_eq!(body["method"], "header");

    let res = client()
        .get(format!("http://{}/ja/docs", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["content-language"], "ja");

    shutdown.trigger();
}

#[tokio::test]
async fn test_redirect_and_not_acceptable() {
    let (addr, shutdown) = common::start_server(common::config(
        &["en", "ja"],
        &[Method::PathPrefix, Method::Header],
        &[
            NegotiationOption::RedirectOnHeaderMatch,
            NegotiationOption::NotAcceptableOnHeaderMatchFail,
        ],
    ))
    .await;

    let res = client()
        .get(format!("http://{}/news", addr))
        .header("Accept-Language", "ja")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 307);
    assert_eq!(res.headers()["location"], "/ja/news");

    let res = client()
        .get(format!("http://{}/news", addr))
        .header("Accept-Language", "fr")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 406);

    shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let config = common::config(&["en"], &[Method::Header], &[]);
    let (addr, shutdown) = common::start_server(config).await;

    let res = client().get(format!("http://{}/", addr)).send().await.unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(client().get(format!("http://{}/", addr)).send().await.is_err());
}
