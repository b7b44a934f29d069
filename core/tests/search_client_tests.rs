// tests/search_client_tests.rs
mod common;

use common::*;
use pricehound::search::{similar_query, DEFAULT_SEARCH_TEMPLATE};
use pricehound::{LookupError, SearchClient, SearchSettings, SimilarProducts};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves exactly one canned HTTP response and hands back the raw request head.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  let handle = tokio::spawn(async move {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
      let n = socket.read(&mut buf).await.unwrap();
      if n == 0 {
        break;
      }
      request.extend_from_slice(&buf[..n]);
    }
    let response = format!(
      "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
      status_line,
      body.len(),
      body
    );
    socket.write_all(response.as_bytes()).await.unwrap();
    socket.shutdown().await.ok();
    String::from_utf8_lossy(&request).into_owned()
  });
  (format!("http://{}/recom/sng/common/v8/search?lang=ru&query={{query}}", addr), handle)
}

fn settings_for(url_template: String) -> SearchSettings {
  SearchSettings {
    url_template,
    timeout: Duration::from_secs(5),
    ..Default::default()
  }
}

#[test]
fn test_default_settings_point_at_marketplace() {
  let settings = SearchSettings::default();
  assert_eq!(settings.url_template, DEFAULT_SEARCH_TEMPLATE);
  assert_eq!(settings.timeout, Duration::from_secs(15));
  assert!(settings.validate().is_ok());

  let url = settings.search_url("123");
  assert!(url.starts_with("https://recom.wb.ru/recom/sng/common/v8/search?ab_testing=false&appType=1&curr=byn"));
  assert!(url.contains("&query=%D0%BF%D0%BE%D1%85%D0%BE%D0%B6%D0%B8%D0%B5%20123&resultset=catalog"));
  assert!(url.ends_with("&spp=30&suppressSpellcheck=false"));
}

#[test]
fn test_similar_query_prefixes_id() {
  assert_eq!(similar_query("555"), "похожие 555");
}

#[test]
fn test_template_without_placeholder_is_rejected() {
  let settings = settings_for("https://example.com/search?q=fixed".to_string());
  assert!(matches!(settings.validate(), Err(LookupError::Settings(_))));
  assert!(SearchClient::new(settings).is_err());

  let zero_timeout = SearchSettings {
    timeout: Duration::ZERO,
    ..Default::default()
  };
  assert!(matches!(zero_timeout.validate(), Err(LookupError::Settings(_))));
}

#[tokio::test]
async fn test_search_sends_expected_request_and_decodes() {
  setup_tracing();
  let body = r#"{"products":[{"id":7,"name":"Mug","sizes":[{"price":{"basic":1,"product":500,"logistics":20}}]}],"total":1}"#;
  let (template, server) = serve_once("HTTP/1.1 200 OK", body).await;
  let client = SearchClient::new(settings_for(template)).unwrap();

  let products = client.similar_products("987654").await.unwrap();
  assert_eq!(products.len(), 1);
  assert_eq!(products[0].id, 7);
  assert_eq!(products[0].total_price(), Some(520));

  let request = server.await.unwrap().to_lowercase();
  assert!(request.starts_with("get /recom/sng/common/v8/search?lang=ru&query=%d0%bf%d0%be%d1%85%d0%be%d0%b6%d0%b8%d0%b5%20987654 http/1.1"));
  assert!(request.contains("user-agent: mozilla/5.0 (pricetrackerbot/1.0)"));
  assert!(request.contains("accept: application/json"));
}

#[tokio::test]
async fn test_empty_product_list_is_not_an_error() {
  setup_tracing();
  let (template, _server) = serve_once("HTTP/1.1 200 OK", r#"{"products":[],"total":0}"#).await;
  let client = SearchClient::new(settings_for(template)).unwrap();
  let result = client.search("1").await.unwrap();
  assert!(result.products.is_empty());
  assert_eq!(result.total, 0);
}

#[tokio::test]
async fn test_non_success_status_is_upstream_error() {
  setup_tracing();
  let (template, _server) = serve_once("HTTP/1.1 503 Service Unavailable", "{}").await;
  let client = SearchClient::new(settings_for(template)).unwrap();
  match client.similar_products("1").await {
    Err(err @ LookupError::UpstreamStatus { .. }) => {
      assert_eq!(err.to_string(), "API вернуло ошибку: 503 Service Unavailable");
    }
    other => panic!("expected UpstreamStatus, got {:?}", other),
  }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
  setup_tracing();
  let (template, _server) = serve_once("HTTP/1.1 200 OK", r#"{"products": "nope"}"#).await;
  let client = SearchClient::new(settings_for(template)).unwrap();
  let err = client.similar_products("1").await.unwrap_err();
  assert!(matches!(err, LookupError::Decode(_)), "{:?}", err);
  assert!(err.is_search_failure());
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
  setup_tracing();
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let client = SearchClient::new(settings_for(format!("http://{}/search?query={{query}}", addr))).unwrap();
  let err = client.similar_products("1").await.unwrap_err();
  assert!(matches!(err, LookupError::Transport(_)), "{:?}", err);
  assert!(!LookupError::InvalidLink.is_search_failure());
}

#[tokio::test]
async fn test_silent_server_times_out_as_transport_error() {
  setup_tracing();
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  let _holder = tokio::spawn(async move {
    let (_socket, _) = listener.accept().await.unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;
  });

  let client = SearchClient::new(SearchSettings {
    url_template: format!("http://{}/search?query={{query}}", addr),
    timeout: Duration::from_millis(200),
    ..Default::default()
  })
  .unwrap();
  match client.similar_products("1").await {
    Err(LookupError::Transport(source)) => assert!(source.is_timeout()),
    other => panic!("expected a timeout, got {:?}", other),
  }
}
