// src/network/http_client.rs

use std::sync::Arc;
use std::time::Duration;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use tracing::debug;
use crate::commands::types::{FetchFn, FetchFuture, FetchResponse};
use super::types::{HttpMethod, NetworkConfig, NetworkError};

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// Build the HTTP client shared by every request of a session.
pub fn build_client(config: &NetworkConfig) -> Result<Client, NetworkError> {
    Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()
        .map_err(|e| NetworkError::Client { message: e.to_string() })
}

/// Send one request and collect the whole response.
pub async fn send_request(
    client: &Client,
    config: &NetworkConfig,
    url: &str,
    method: &str,
    headers: Vec<(String, String)>,
    body: Option<String>,
) -> Result<FetchResponse, NetworkError> {
    let method: HttpMethod = method.parse()?;
    debug!(%method, url, "sending request");

    let mut request = client.request(method.into(), url);
    if !headers.iter().any(|(name, _)| name.eq_ignore_ascii_case("user-agent")) {
        request = request.header(USER_AGENT, config.user_agent.as_str());
    }
    for (name, value) in headers {
        request = request.header(name, value);
    }
    if let Some(body) = body.filter(|_| !method.is_bodyless()) {
        request = request.body(body);
    }

    let response = request
        .send()
        .await
        .map_err(|e| NetworkError::Request { message: e.to_string() })?;

    let status = response.status();
    let final_url = response.url().to_string();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (name.to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
        })
        .collect();
    let body = response
        .text()
        .await
        .map_err(|e| NetworkError::Request { message: e.to_string() })?;

    debug!(status = status.as_u16(), url = %final_url, "response received");
    Ok(FetchResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        headers,
        body,
        url: final_url,
    })
}

/// Create a FetchFn backed by a real HTTP client.
pub fn create_http_fetch_fn(config: NetworkConfig) -> Result<FetchFn, NetworkError> {
    let client = build_client(&config)?;
    let config = Arc::new(config);

    Ok(Arc::new(move |url: String, method: String, headers: Vec<(String, String)>, body: Option<String>| {
        let client = client.clone();
        let config = Arc::clone(&config);
        Box::pin(async move {
            send_request(&client, &config, &url, &method, headers, body)
                .await
                .map_err(|e| e.to_string())
        }) as FetchFuture
    }))
}
