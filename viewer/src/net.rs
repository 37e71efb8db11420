//! Outbound fetches. Both run as fire-and-forget tasks; failures come back
//! as `Err(String)` messages and never block interaction.

use arsenalcore::geo::BoundaryOverlay;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

pub fn http_client(user_agent: &str) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(FETCH_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

pub async fn fetch_boundary(
    client: reqwest::Client,
    url: String,
) -> Result<BoundaryOverlay, String> {
    let response = client.get(&url).send().await.map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("HTTP error! status: {}", response.status()));
    }
    let body = response.text().await.map_err(|e| e.to_string())?;
    BoundaryOverlay::from_geojson(&body).map_err(|e| e.to_string())
}

pub async fn fetch_tile(client: reqwest::Client, url: String) -> Result<Vec<u8>, String> {
    let response = client.get(&url).send().await.map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("HTTP error! status: {}", response.status()));
    }
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_boundary_reports_error() {
        let client = http_client("arsenal-viewer-test");
        let result = fetch_boundary(client, "http://127.0.0.1:9/india.geojson".into()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unreachable_tile_reports_error() {
        let client = http_client("arsenal-viewer-test");
        let result = fetch_tile(client, "http://127.0.0.1:9/5/22/14.png".into()).await;
        assert!(result.is_err());
    }
}
