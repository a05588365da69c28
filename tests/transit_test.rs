mod common;

use common::{canned_server, json_response, silent_server};
use serde_json::json;
use vpc_egress_probe::config::model::TransitSettings;
use vpc_egress_probe::handler::transit::{self, TransitRequest};

#[tokio::test]
async fn test_direct_request_returns_json_body() {
    let (addr, server) = canned_server(vec![json_response(r#"{"origin": "203.0.113.77"}"#)]).await;
    let settings = TransitSettings {
        url: format!("http://{addr}/ip"),
        ..Default::default()
    };

    let response = transit::handle_event(json!({}), &settings).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, json!({"origin": "203.0.113.77"}));
    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("GET /ip HTTP/1.1\r\n"), "{}", requests[0]);
}

#[tokio::test]
async fn test_use_vpc_b_routes_through_proxy_address() {
    let (proxy_addr, proxy) = canned_server(vec![json_response(r#"{"origin": "198.51.100.1"}"#)]).await;
    let settings = TransitSettings {
        // Only reachable through the proxy.
        url: "http://egress-check.invalid/ip".to_string(),
        proxy_address: proxy_addr.to_string(),
        timeout_ms: Some(2_000),
    };

    let response = transit::handle(&TransitRequest { use_vpc_b: true }, &settings).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body["origin"], "198.51.100.1");
    let requests = proxy.await.unwrap();
    assert!(
        requests[0].starts_with("GET http://egress-check.invalid/ip HTTP/1.1\r\n"),
        "{}",
        requests[0]
    );
}

#[tokio::test]
async fn test_flag_false_ignores_proxy_address() {
    let (addr, server) = canned_server(vec![json_response(r#"{"origin": "203.0.113.78"}"#)]).await;
    let settings = TransitSettings {
        url: format!("http://{addr}/ip"),
        // Would blackhole the request if it were used.
        proxy_address: "127.0.0.1:1".to_string(),
        timeout_ms: Some(2_000),
    };

    let response = transit::handle_event(json!({"use_vpc_b": false}), &settings).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(server.await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_timeout_becomes_500_with_message() {
    let (addr, silent) = silent_server().await;
    let settings = TransitSettings {
        url: format!("http://{addr}/ip"),
        timeout_ms: Some(200),
        ..Default::default()
    };

    let response = transit::handle(&TransitRequest::default(), &settings).await;
    silent.abort();

    assert_eq!(response.status_code, 500);
    assert_eq!(response.body, json!("request timed out"));
}

#[tokio::test]
async fn test_non_json_body_becomes_500() {
    let (addr, _server) = canned_server(vec![common::plain_response("200 OK", "203.0.113.5")]).await;
    let settings = TransitSettings {
        url: format!("http://{addr}/ip"),
        ..Default::default()
    };

    let response = transit::handle(&TransitRequest::default(), &settings).await;

    assert_eq!(response.status_code, 500);
    let message = response.body.as_str().unwrap();
    assert!(message.starts_with("invalid response body"), "{message}");
}
