//! Single best-effort fetch of a company site.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::config::FetchConfig;
use crate::error::{LeadsmithResult, LeadsmithError};
use crate::utils::http::HttpClient;

/// Statuses treated as anti-automation defenses
pub const BLOCKED_STATUSES: &[u16] = &[401, 403, 503];

/// Classified result of one fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx response
    Content { raw_html: String, status_code: u16 },
    /// 401, 403 or 503
    Blocked { status_code: u16 },
    /// Transport failure, timeout or any other non-2xx status
    Unreachable { reason: String },
}

/// Fetches a page and classifies the result. Implementations never fail;
/// every failure mode is an outcome.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// Classify a response status that is not a body-bearing success
pub fn classify_status(status: StatusCode) -> Option<FetchOutcome> {
    if status.is_success() {
        return None;
    }

    if BLOCKED_STATUSES.contains(&status.as_u16()) {
        return Some(FetchOutcome::Blocked { status_code: status.as_u16() });
    }

    Some(FetchOutcome::Unreachable {
        reason: format!("HTTP {}", status),
    })
}

/// Describe a transport error for the synthetic research note
pub fn describe_error(error: &reqwest::Error, timeout: Duration) -> String {
    if error.is_timeout() {
        format!("request timed out after {} seconds", timeout.as_secs())
    } else if error.is_connect() {
        format!("connection failed: {}", root_cause(error))
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_body() || error.is_decode() {
        format!("malformed response: {}", root_cause(error))
    } else {
        root_cause(error)
    }
}

fn root_cause(error: &(dyn std::error::Error + 'static)) -> String {
    let mut current = error;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

/// HTTP implementation of [`PageFetcher`]
#[derive(Clone)]
pub struct SiteFetcher {
    http: HttpClient,
}

impl SiteFetcher {
    /// Create a fetcher with a browser-like identity and a bounded timeout
    pub fn new(config: &FetchConfig) -> LeadsmithResult<Self> {
        let user_agent = Some(config.user_agent.clone()).filter(|ua| !ua.trim().is_empty());
        let http = HttpClient::new(
            user_agent,
            Duration::from_secs(config.timeout_secs),
            config.max_redirects,
        )
        .map_err(|e| LeadsmithError::NetworkError(e.to_string()))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl PageFetcher for SiteFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let response = match self.http.get(url).await {
            Ok(response) => response,
            Err(e) => {
                let reason = describe_error(&e, self.http.timeout());
                warn!("Failed to fetch {}: {}", url, reason);
                return FetchOutcome::Unreachable { reason };
            }
        };

        let status = response.status();
        debug!("GET {} status: {}", url, status);

        if let Some(outcome) = classify_status(status) {
            warn!("Fetch of {} not usable: {:?}", url, outcome);
            return outcome;
        }

        match response.text().await {
            Ok(raw_html) => FetchOutcome::Content {
                raw_html,
                status_code: status.as_u16(),
            },
            Err(e) => {
                let reason = describe_error(&e, self.http.timeout());
                warn!("Failed to read body from {}: {}", url, reason);
                FetchOutcome::Unreachable { reason }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    //! Minimal local HTTP endpoints for exercising real fetches.

    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned response per connection until the test ends
    pub async fn serve(status_line: &'static str, body: &'static str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else { break };
                tokio::spawn(async move {
                    read_request(&mut socket).await;
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status_line,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        addr
    }

    /// Consume request headers and any Content-Length body
    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];

        let header_end = loop {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
            if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let headers = String::from_utf8_lossy(&request[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        while request.len() < header_end + content_length {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
    }

    /// Accept connections and never answer
    pub async fn silent() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        addr
    }

    /// An address nothing listens on
    pub async fn refused() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        addr
    }
}
