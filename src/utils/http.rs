// src/utils/http.rs
use std::time::Duration;
use anyhow::{Result, Context};
use reqwest::{Client, Response, header, redirect};
use serde::Serialize;
use tracing::debug;

/// Browser identification presented to target sites. Many sites reject
/// clients that announce themselves as automated.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// HTTP client for making requests
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client. Every request made through it is bounded by `timeout`.
    pub fn new(user_agent: Option<String>, timeout: Duration, max_redirects: usize) -> Result<Self> {
        let user_agent = user_agent.unwrap_or_else(|| BROWSER_USER_AGENT.to_string());

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(&user_agent)
            .redirect(redirect::Policy::limited(max_redirects))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, user_agent, timeout })
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> reqwest::Result<Response> {
        debug!("GET {}", url);

        self.client
            .get(url)
            .send()
            .await
    }

    /// Make a POST request with a JSON body and extra headers
    pub async fn post_json<T: Serialize>(
        &self,
        url: &str,
        headers: header::HeaderMap,
        data: &T,
    ) -> reqwest::Result<Response> {
        debug!("POST {}", url);

        self.client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .headers(headers)
            .json(data)
            .send()
            .await
    }

    /// Get the user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Get the per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
