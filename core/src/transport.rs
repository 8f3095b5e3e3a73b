//! Pluggable HTTP transport.
//!
//! The client never touches the network directly. A `Transport` executes a
//! fully built `HttpRequest` and returns the `HttpResponse` as data, whatever
//! its status; only a missing or unreadable response is an error. Bodies
//! that are not valid UTF-8 are decoded lossily. `UreqTransport` is the
//! bundled blocking implementation and any matching closure also works.

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync,
{
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
///
/// Status codes are never turned into errors here; 4xx/5xx responses are
/// returned as data so the executor can normalize them.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| {
                TransportError::after_status(status, format!("failed to read response body: {e}"))
            })?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::executor::{Executor, ResponseBody};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::Arc;
    use std::thread::JoinHandle;

    /// Serve one connection with a raw status line and body, then close.
    fn serve_once(status_line: &'static str, body: &'static [u8]) -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let head = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(b"X-Raw: caf\xe9\r\n\r\n").unwrap();
            stream.write_all(body).unwrap();
            stream.flush().unwrap();
        });
        (format!("http://{addr}/service-account"), handle)
    }

    fn get(url: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn closures_are_transports() {
        let transport = |req: &HttpRequest| -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse {
                status: 204,
                headers: Vec::new(),
                body: req.url.clone(),
            })
        };
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost/ping".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let resp = transport.send(&req).unwrap();
        assert_eq!(resp.status, 204);
        assert_eq!(resp.body, "http://localhost/ping");
    }

    #[test]
    fn ureq_transport_reports_connection_failure() {
        // Bound then dropped, so nothing is listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let req = HttpRequest {
            method: HttpMethod::Get,
            url: format!("http://{addr}/service-account"),
            headers: Vec::new(),
            body: None,
        };
        let err = UreqTransport::new().send(&req).unwrap_err();
        assert!(!err.message.is_empty());
        assert_eq!(err.status, None);
    }

    #[test]
    fn non_utf8_success_body_is_decoded_lossily() {
        let (url, server) = serve_once("200 OK", &[0xff, 0xfe, b'x']);
        let resp = UreqTransport::new().send(&get(url)).unwrap();
        server.join().unwrap();

        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, "\u{fffd}\u{fffd}x");
        assert_eq!(resp.header("x-raw"), Some("caf\u{fffd}"));
    }

    #[test]
    fn non_utf8_bodies_keep_their_outcome() {
        let executor = Executor::new(Arc::new(UreqTransport::new()));

        let (url, server) = serve_once("200 OK", &[0xff, 0xfe, b'x']);
        let outcome = executor.execute(&get(url));
        server.join().unwrap();
        assert!(outcome.is_success());
        assert_eq!(
            outcome.body(),
            Some(&ResponseBody::Text("\u{fffd}\u{fffd}x".to_string()))
        );

        let (url, server) = serve_once("500 Internal Server Error", &[0xff, 0xfe, 0x00]);
        let outcome = executor.execute(&get(url));
        server.join().unwrap();
        assert!(matches!(outcome.error(), Some(ApiError::Http { status: 500, .. })));
        assert_eq!(outcome.raw.as_ref().map(|r| r.status), Some(500));
    }
}
