//! Shared helpers for integration tests.

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use tokio::net::TcpListener;

use lang_negotiation::config::{AppConfig, NegotiationConfig};
use lang_negotiation::{HttpServer, Method, NegotiationOption, Shutdown};

/// Build a config with the given negotiation settings and test-friendly defaults.
pub fn config(languages: &[&str], methods: &[Method], options: &[NegotiationOption]) -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.negotiation = NegotiationConfig {
        languages: languages.iter().map(|l| l.to_string()).collect(),
        methods: methods.to_vec(),
        options: options.to_vec(),
    };
    config
}

/// Router of a server built from `config`.
#[allow(dead_code)]
pub fn router(config: AppConfig) -> Router {
    HttpServer::new(config).expect("valid test config").router()
}

/// GET request with optional Host and Accept-Language headers.
#[allow(dead_code)]
pub fn get(uri: &str, host: Option<&str>, accept_language: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(host) = host {
        builder = builder.header("Host", host);
    }
    if let Some(value) = accept_language {
        builder = builder.header("Accept-Language", value);
    }
    builder.body(Body::empty()).unwrap()
}

/// Start a server on an ephemeral port. Returns its address and the shutdown handle.
#[allow(dead_code)]
pub async fn start_server(config: AppConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).expect("valid test config");
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}
