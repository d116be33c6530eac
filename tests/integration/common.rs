//! Common test utilities: a stub SPARQL endpoint and result fixtures.

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// A request as seen by the stub endpoint.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Returns a header value, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the decoded `query` parameter.
    pub fn query_param(&self) -> Option<String> {
        let url = url::Url::parse(&format!("http://stub{}", self.target)).ok()?;
        url.query_pairs()
            .find(|(name, _)| name == "query")
            .map(|(_, value)| value.into_owned())
    }
}

/// A canned response.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl StubResponse {
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: vec![(
                "Content-Type".to_string(),
                "application/sparql-results+json".to_string(),
            )],
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// A running stub endpoint.
pub struct StubEndpoint {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubEndpoint {
    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a stub endpoint answering every request with `handler`.
///
/// Each connection serves one request and is then closed.
pub async fn spawn_endpoint<F>(handler: F) -> StubEndpoint
where
    F: Fn(&RecordedRequest) -> StubResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/sparql", listener.local_addr().unwrap());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            if reader.read_line(&mut request_line).await.is_err() {
                continue;
            }
            let mut parts = request_line.split_whitespace();
            let method = parts.next().unwrap_or_default().to_string();
            let target = parts.next().unwrap_or_default().to_string();

            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                match reader.read_line(&mut line).await {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {}
                }
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    headers.push((name.trim().to_string(), value.trim().to_string()));
                }
            }

            let request = RecordedRequest {
                method,
                target,
                headers,
            };
            let response = handler(&request);
            recorded.lock().unwrap().push(request);

            let mut text = format!("HTTP/1.1 {} Stub\r\n", response.status);
            for (name, value) in &response.headers {
                text.push_str(&format!("{name}: {value}\r\n"));
            }
            text.push_str(&format!(
                "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.body.len(),
                response.body
            ));

            let mut stream = reader.into_inner();
            let _ = stream.write_all(text.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    StubEndpoint { url, requests }
}

/// Builds a results document with `key`, `value` and `description` columns.
pub fn guide_document(rows: &[(&str, &str, &str)]) -> String {
    let bindings: Vec<serde_json::Value> = rows
        .iter()
        .map(|(key, value, description)| {
            serde_json::json!({
                "key": { "type": "literal", "value": key },
                "value": { "type": "literal", "value": value },
                "description": { "type": "literal", "value": description },
            })
        })
        .collect();

    serde_json::json!({
        "head": { "vars": ["key", "value", "description"] },
        "results": { "bindings": bindings },
    })
    .to_string()
}
