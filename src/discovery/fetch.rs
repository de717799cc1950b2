//! Plain-text HTTP GET with manual redirect handling.
//!
//! # Responsibilities
//! - Follow 3xx + `Location` up to a fixed limit
//! - Map error statuses, transport failures and timeouts to [`NetworkError`]
//! - Never swallow a failure

use std::time::Duration;

use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use crate::discovery::types::NetworkError;
use crate::resilience::timeouts::with_deadline;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Build an HTTP client that leaves redirects to the caller.
pub fn discovery_client() -> Result<Client, NetworkError> {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .map_err(|e| NetworkError::Transport(format!("Failed to build HTTP client: {}", e)))
}

/// GET `url` and return the body as text.
///
/// One deadline covers the whole redirect chain and the body read.
pub async fn fetch_text(
    client: &Client,
    url: &str,
    timeout: Duration,
    max_redirects: u32,
) -> Result<String, NetworkError> {
    with_deadline(timeout, follow(client, url, max_redirects)).await
}

async fn follow(client: &Client, url: &str, max_redirects: u32) -> Result<String, NetworkError> {
    let mut current = parse_url(url)?;
    let mut redirects = 0u32;

    loop {
        let response = client
            .get(current.clone())
            .send()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;
        let status = response.status();

        if status.is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            let Some(location) = location else {
                return Err(NetworkError::Http {
                    status: status.as_u16(),
                    url: current.to_string(),
                });
            };

            if redirects >= max_redirects {
                return Err(NetworkError::TooManyRedirects {
                    url: url.to_string(),
                    limit: max_redirects,
                });
            }
            redirects += 1;

            let next = current.join(&location).map_err(|e| NetworkError::InvalidUrl {
                url: location.clone(),
                reason: e.to_string(),
            })?;
            tracing::debug!(from = %current, to = %next, redirects, "Following redirect");
            current = next;
            continue;
        }

        if status.as_u16() >= 400 {
            return Err(NetworkError::Http {
                status: status.as_u16(),
                url: current.to_string(),
            });
        }

        return response
            .text()
            .await
            .map_err(|e| NetworkError::Transport(format!("Failed to read body: {}", e)));
    }
}

fn parse_url(url: &str) -> Result<Url, NetworkError> {
    Url::parse(url).map_err(|e| NetworkError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_plain_get() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/hello");
                then.status(200).body("world");
            })
            .await;

        let client = discovery_client().unwrap();
        let body = fetch_text(&client, &server.url("/hello"), DEFAULT_FETCH_TIMEOUT, 5)
            .await
            .unwrap();
        assert_eq!(body, "world");
    }

    #[tokio::test]
    async fn test_follows_relative_redirect() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/old");
                then.status(302).header("Location", "/new");
            })
            .await;
        let target = server
            .mock_async(|when, then| {
                when.method(GET).path("/new");
                then.status(200).body("moved");
            })
            .await;

        let client = discovery_client().unwrap();
        let body = fetch_text(&client, &server.url("/old"), DEFAULT_FETCH_TIMEOUT, 5)
            .await
            .unwrap();
        assert_eq!(body, "moved");
        target.assert_async().await;
    }

    #[tokio::test]
    async fn test_too_many_redirects() {
        let server = MockServer::start_async().await;
        let looping = server
            .mock_async(|when, then| {
                when.method(GET).path("/loop");
                then.status(301).header("Location", "/loop");
            })
            .await;

        let client = discovery_client().unwrap();
        let err = fetch_text(&client, &server.url("/loop"), DEFAULT_FETCH_TIMEOUT, 3)
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::TooManyRedirects { limit: 3, .. }));
        // Initial request plus three followed redirects.
        assert_eq!(looping.hits_async().await, 4);
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404).body("not here");
            })
            .await;

        let client = discovery_client().unwrap();
        let err = fetch_text(&client, &server.url("/missing"), DEFAULT_FETCH_TIMEOUT, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::Http { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200).delay(Duration::from_secs(3)).body("late");
            })
            .await;

        let client = discovery_client().unwrap();
        let err = fetch_text(&client, &server.url("/slow"), Duration::from_millis(200), 5)
            .await
            .unwrap_err();
        assert_eq!(err, NetworkError::Timeout(200));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = discovery_client().unwrap();
        // Port 9 (discard) on localhost is expected to refuse connections.
        let err = fetch_text(&client, "http://127.0.0.1:9/", Duration::from_secs(5), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::Transport(_)));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let client = discovery_client().unwrap();
        let err = fetch_text(&client, "not a url", DEFAULT_FETCH_TIMEOUT, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::InvalidUrl { .. }));
    }
}
