//! Drives `HttpAnalysisClient` against a one-shot local HTTP server and
//! checks what goes over the wire.

use revsense_core::client::{AnalysisService, HttpAnalysisClient};
use revsense_core::config::ApiConfig;
use revsense_core::error::AnalysisError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request as the server received it.
struct Captured {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Accepts one connection, answers it with `status` and `reply_body`, and returns
/// the captured request.
async fn serve_once(
    status: &'static str,
    reply_body: &'static str,
) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];

        let header_end = loop {
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "connection closed before headers ended");
            raw.extend_from_slice(&buf[..n]);
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos;
            }
        };
        let head = String::from_utf8(raw[..header_end].to_vec()).unwrap();
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap().to_owned();
        let headers: Vec<(String, String)> = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
            .collect();

        let content_length: usize = headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
            .map(|(_, value)| value.parse().unwrap())
            .unwrap_or(0);
        let body_start = header_end + 4;
        while raw.len() < body_start + content_length {
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "connection closed before body ended");
            raw.extend_from_slice(&buf[..n]);
        }
        let body = String::from_utf8(raw[body_start..body_start + content_length].to_vec())
            .unwrap();

        let reply = format!(
            "HTTP/1.1 {status}\r\n\
             content-type: application/json\r\n\
             content-length: {}\r\n\
             connection: close\r\n\r\n{reply_body}",
            reply_body.len()
        );
        socket.write_all(reply.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        Captured {
            request_line,
            headers,
            body,
        }
    });

    (base_url, handle)
}

fn client_for(base_url: String) -> HttpAnalysisClient {
    HttpAnalysisClient::new(&ApiConfig {
        base_url,
        request_timeout_secs: Some(10),
    })
    .unwrap()
}

#[tokio::test]
async fn predict_posts_untrimmed_text_as_json() {
    let (base_url, server) =
        serve_once("200 OK", r#"{"final_sentiment":"negative","confidence":0.87}"#).await;
    let client = client_for(base_url);

    let result = client.predict(" late delivery ").await.unwrap();
    assert_eq!(result.final_sentiment, "negative");
    assert_eq!(result.confidence_label(), "87% confidence");

    let request = server.await.unwrap();
    assert_eq!(request.request_line, "POST /predict HTTP/1.1");
    assert_eq!(request.header("content-type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, serde_json::json!({ "text": " late delivery " }));
}

#[tokio::test]
async fn explain_and_rephrase_use_their_own_paths() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"sentiment":"positive","explanation":"Praises the fit."}"#,
    )
    .await;
    let explanation = client_for(base_url).explain("fits well").await.unwrap();
    assert_eq!(explanation.explanation, "Praises the fit.");
    assert_eq!(server.await.unwrap().request_line, "POST /explain HTTP/1.1");

    let (base_url, server) = serve_once("200 OK", r#"{"rephrased":"It fits well."}"#).await;
    let rephrased = client_for(format!("{base_url}/")).rephrase("fits well").await.unwrap();
    assert_eq!(rephrased.rephrased, "It fits well.");
    let request = server.await.unwrap();
    assert_eq!(request.request_line, "POST /rephrase HTTP/1.1");
    assert_eq!(request.body, r#"{"text":"fits well"}"#);
}

#[tokio::test]
async fn error_status_with_success_shaped_body_is_an_api_error() {
    let (base_url, server) =
        serve_once("500 Internal Server Error", r#"{"rephrased":"x"}"#).await;

    let err = client_for(base_url).rephrase("anything").await.unwrap_err();
    match err {
        AnalysisError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, r#"{"rephrased":"x"}"#);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    server.await.unwrap();
}
