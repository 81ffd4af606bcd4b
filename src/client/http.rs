/// HTTP transport for the prediction service.
///
/// Uses the synchronous `ureq` client. The call blocks the calling thread
/// until the service answers, which is the single suspension point of a scan
/// cycle. No timeout is applied unless `endpoint.timeout_ms` is set, so an
/// unresponsive service can leave a scan pending indefinitely.
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{PredictionClient, ScanResult};
use crate::config::schema::EndpointConfig;

/// Timeout for the reachability probe; unrelated to scan requests.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Request body for `POST /predict`.
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    url: &'a str,
}

/// Error body the service sends with 4xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Blocking prediction client bound to one endpoint URL.
#[derive(Debug)]
pub struct HttpPredictionClient {
    agent: ureq::Agent,
    url: String,
    timeout: Option<Duration>,
}

impl HttpPredictionClient {
    /// Build a client from the resolved endpoint config.
    pub fn from_config(config: &EndpointConfig) -> Self {
        Self::new(&config.url, config.timeout())
    }

    pub fn new(url: &str, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
            url: url.trim().to_string(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl PredictionClient for HttpPredictionClient {
    fn predict(&self, url: &str) -> Result<ScanResult> {
        let resp = match self.agent.post(&self.url).send_json(PredictRequest { url }) {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, resp)) => {
                match resp.into_json::<ErrorBody>() {
                    Ok(body) => anyhow::bail!("prediction service returned HTTP {code}: {}", body.error),
                    Err(_) => anyhow::bail!("prediction service returned HTTP {code}"),
                }
            }
            Err(err) => return Err(err).context("prediction request failed"),
        };

        let result: ScanResult = resp
            .into_json()
            .context("failed to parse prediction response")?;
        result.validate()?;

        Ok(result)
    }

    /// Check that something is answering HTTP at the endpoint.
    ///
    /// Any status counts as reachable (the route only accepts POST, so a
    /// `405` is the expected answer); only transport failures are errors.
    /// Returns the status code the server answered with.
    fn probe(&self) -> Result<u16> {
        match self.agent.get(&self.url).timeout(PROBE_TIMEOUT).call() {
            Ok(resp) => Ok(resp.status()),
            Err(ureq::Error::Status(code, _)) => Ok(code),
            Err(err) => {
                Err(err).with_context(|| format!("prediction service unreachable at {}", self.url))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::thread;

    use super::*;

    /// Serve exactly one request with a canned answer. The join handle
    /// yields the request's content type and body.
    fn stub_server(status: u16, body: &'static str) -> (String, thread::JoinHandle<(String, String)>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let handle = thread::spawn(move || {
            let mut request = server.recv().unwrap();
            let content_type = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Content-Type"))
                .map(|h| h.value.as_str().to_string())
                .unwrap_or_default();
            let mut received = String::new();
            request.as_reader().read_to_string(&mut received).unwrap();
            let resp = tiny_http::Response::from_string(body)
                .with_status_code(tiny_http::StatusCode(status));
            request.respond(resp).unwrap();
            (content_type, received)
        });
        (format!("http://{addr}/predict"), handle)
    }

    #[test]
    fn client_from_default_config() {
        let client = HttpPredictionClient::from_config(&EndpointConfig::default());
        assert_eq!(client.endpoint(), "http://127.0.0.1:5000/predict");
        assert!(client.timeout().is_none());
    }

    #[test]
    fn client_uses_configured_timeout() {
        let config = EndpointConfig {
            url: " http://localhost:5000/predict ".to_string(),
            timeout_ms: 1200,
        };
        let client = HttpPredictionClient::from_config(&config);
        assert_eq!(client.endpoint(), "http://localhost:5000/predict");
        assert_eq!(client.timeout(), Some(Duration::from_millis(1200)));
    }

    #[test]
    fn predict_posts_json_and_parses_result() {
        let (url, handle) = stub_server(200, r#"{"prediction": 1, "probability": 0.87}"#);
        let client = HttpPredictionClient::new(&url, None);

        let result = client.predict("http://paypa1-login.example").unwrap();
        assert_eq!(result, ScanResult::new(1, 0.87));

        let (content_type, body) = handle.join().unwrap();
        assert!(content_type.starts_with("application/json"));
        let sent: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(sent["url"], "http://paypa1-login.example");
    }

    #[test]
    fn predict_surfaces_service_error_message() {
        let (url, handle) = stub_server(400, r#"{"error": "No URL provided"}"#);
        let client = HttpPredictionClient::new(&url, None);

        let err = client.predict(" ").unwrap_err();
        assert!(err.to_string().contains("HTTP 400"));
        assert!(err.to_string().contains("No URL provided"));
        handle.join().unwrap();
    }

    #[test]
    fn predict_rejects_server_error_without_body() {
        let (url, handle) = stub_server(500, "Internal Server Error");
        let client = HttpPredictionClient::new(&url, None);

        let err = client.predict("example.com").unwrap_err();
        assert!(err.to_string().contains("HTTP 500"));
        handle.join().unwrap();
    }

    #[test]
    fn predict_rejects_malformed_json() {
        let (url, handle) = stub_server(200, "<html>not json</html>");
        let client = HttpPredictionClient::new(&url, None);

        assert!(client.predict("example.com").is_err());
        handle.join().unwrap();
    }

    #[test]
    fn predict_rejects_out_of_range_prediction() {
        let (url, handle) = stub_server(200, r#"{"prediction": 3, "probability": 0.5}"#);
        let client = HttpPredictionClient::new(&url, None);

        let err = client.predict("example.com").unwrap_err();
        assert!(err.to_string().contains("invalid prediction"));
        handle.join().unwrap();
    }

    #[test]
    fn predict_fails_when_service_is_down() {
        // Grab a free port, then release it so nothing is listening.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = HttpPredictionClient::new(&format!("http://127.0.0.1:{port}/predict"), None);

        assert!(client.predict("example.com").is_err());
        assert!(client.probe().is_err());
    }

    #[test]
    fn probe_treats_any_status_as_reachable() {
        let (url, handle) = stub_server(405, "Method Not Allowed");
        let client = HttpPredictionClient::new(&url, None);

        assert_eq!(client.probe().unwrap(), 405);
        handle.join().unwrap();
    }
}
