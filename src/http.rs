//! HTTP GET primitive
//!
//! One GET request with query parameters, decoded as JSON. Failures surface
//! as an explicit [`FetchError`] so callers decide how to degrade; the
//! orchestrator maps them to "no data for this unit" instead of aborting.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Failure of a single collaborator call
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {source}")]
    Client { source: reqwest::Error },

    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },
}

/// Perform one GET request and decode the JSON body.
///
/// Fails on transport errors, non-2xx statuses, and undecodable bodies.
/// No retries.
pub async fn http_get<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, FetchError> {
    debug!("GET {} {:?}", url, query);

    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.json().await.map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        value: u32,
    }

    #[tokio::test]
    async fn test_http_get_decodes_json() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/data").query_param("format", "json");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"value": 42}"#);
            })
            .await;

        let client = reqwest::Client::new();
        let payload: Payload = http_get(&client, &server.url("/data"), &[("format", "json")])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(payload.value, 42);
    }

    #[tokio::test]
    async fn test_http_get_fails_on_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/data");
                then.status(500);
            })
            .await;

        let client = reqwest::Client::new();
        let result: Result<Payload, FetchError> =
            http_get(&client, &server.url("/data"), &[]).await;

        match result {
            Err(FetchError::Status { status, .. }) => assert_eq!(status.as_u16(), 500),
            other => panic!("expected status error, got {:?}", other.map(|p| p.value)),
        }
    }

    #[tokio::test]
    async fn test_http_get_fails_on_invalid_json() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/data");
                then.status(200).body("not json");
            })
            .await;

        let client = reqwest::Client::new();
        let result: Result<Payload, FetchError> =
            http_get(&client, &server.url("/data"), &[]).await;

        assert!(matches!(result, Err(FetchError::Decode { .. })));
    }
}
