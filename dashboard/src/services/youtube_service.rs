use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use url::Url;

/// Upper bound on video references returned by `fetch_channel_videos`.
pub const MAX_CHANNEL_VIDEOS: usize = 50;

/// Read-only operations against the video platform.
#[async_trait]
pub trait VideoPlatformApi: Send + Sync {
    /// First channel whose name matches `name`, in provider order.
    async fn resolve_channel_id(&self, name: &str) -> Result<String>;

    /// Raw channel record (snippet, statistics, contentDetails).
    async fn fetch_channel_details(&self, channel_id: &str) -> Result<Value>;

    /// Up to 50 video references, most viewed first. Empty when the channel has none.
    async fn fetch_channel_videos(&self, channel_id: &str) -> Result<Vec<Value>>;

    /// Raw video records for one batch of ids.
    async fn fetch_video_details(&self, video_ids: &[String]) -> Result<Vec<Value>>;
}

/// YouTube Data API v3 client.
pub struct YouTubeClient {
    client: Client,
    config: DashboardConfig,
}

impl YouTubeClient {
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DashboardError::fetch("building HTTP client", e))?;

        Ok(Self { client, config })
    }

    async fn get_json(
        &self,
        operation: &'static str,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        let mut url = Url::parse(&format!("{}/{endpoint}", self.config.api_base_url))
            .map_err(|e| DashboardError::fetch(operation, e))?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", &self.config.api_key);

        debug!("GET {endpoint} {params:?}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DashboardError::fetch(operation, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DashboardError::fetch(operation, e))?;

        if !status.is_success() {
            // Try to use the provider's structured error first
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| body["error"]["message"].as_str().map(String::from))
                .unwrap_or(text);
            warn!("{endpoint} failed: HTTP {status} - {message}");
            return Err(DashboardError::fetch(
                operation,
                format!("HTTP {status} - {message}"),
            ));
        }

        serde_json::from_str::<Value>(&text).map_err(|e| DashboardError::fetch(operation, e))
    }
}

fn into_items(mut body: Value) -> Vec<Value> {
    match body.get_mut("items").map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

#[async_trait]
impl VideoPlatformApi for YouTubeClient {
    async fn resolve_channel_id(&self, name: &str) -> Result<String> {
        // Documentation: https://developers.google.com/youtube/v3/docs/search/list
        let body = self
            .get_json(
                "searching for channel",
                "search",
                &[("part", "snippet"), ("q", name), ("type", "channel")],
            )
            .await?;

        into_items(body)
            .first()
            .and_then(|item| item["id"]["channelId"].as_str())
            .map(String::from)
            .ok_or(DashboardError::not_found("searching for channel", "Channel"))
    }

    async fn fetch_channel_details(&self, channel_id: &str) -> Result<Value> {
        let body = self
            .get_json(
                "fetching channel details",
                "channels",
                &[
                    ("part", "snippet,statistics,contentDetails"),
                    ("id", channel_id),
                ],
            )
            .await?;

        into_items(body)
            .into_iter()
            .next()
            .ok_or(DashboardError::not_found(
                "fetching channel details",
                "Channel details",
            ))
    }

    async fn fetch_channel_videos(&self, channel_id: &str) -> Result<Vec<Value>> {
        let max_results = MAX_CHANNEL_VIDEOS.to_string();
        let body = self
            .get_json(
                "fetching channel videos",
                "search",
                &[
                    ("part", "snippet"),
                    ("channelId", channel_id),
                    ("maxResults", &max_results),
                    ("order", "viewCount"),
                    ("type", "video"),
                ],
            )
            .await?;

        let mut items = into_items(body);
        items.truncate(MAX_CHANNEL_VIDEOS);
        Ok(items)
    }

    async fn fetch_video_details(&self, video_ids: &[String]) -> Result<Vec<Value>> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        // Documentation: https://developers.google.com/youtube/v3/docs/videos
        let ids = video_ids.join(",");
        let body = self
            .get_json(
                "fetching video details",
                "videos",
                &[("part", "snippet,statistics,contentDetails"), ("id", &ids)],
            )
            .await?;

        Ok(into_items(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> YouTubeClient {
        YouTubeClient::new(DashboardConfig::new("test-key").with_base_url(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn resolve_returns_first_channel_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Linus Tech Tips"))
            .and(query_param("type", "channel"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": { "kind": "youtube#channel", "channelId": "UCfirst" } },
                    { "id": { "kind": "youtube#channel", "channelId": "UCsecond" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let id = client.resolve_channel_id("Linus Tech Tips").await.unwrap();
        assert_eq!(id, "UCfirst");
    }

    #[tokio::test]
    async fn resolve_without_items_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.resolve_channel_id("nobody").await.unwrap_err();
        assert!(matches!(err, DashboardError::NotFound { what: "Channel", .. }));
        assert_eq!(err.to_string(), "Error searching for channel: Channel not found");
    }

    #[tokio::test]
    async fn channel_details_missing_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param("part", "snippet,statistics,contentDetails"))
            .and(query_param("id", "UCgone"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pageInfo": {} })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.fetch_channel_details("UCgone").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error fetching channel details: Channel details not found"
        );
    }

    #[tokio::test]
    async fn channel_videos_request_is_sorted_by_views() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("channelId", "UCabc"))
            .and(query_param("maxResults", "50"))
            .and(query_param("order", "viewCount"))
            .and(query_param("type", "video"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [ { "id": { "videoId": "v1" }, "snippet": { "title": "One" } } ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let videos = client.fetch_channel_videos("UCabc").await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0]["id"]["videoId"], "v1");
    }

    #[tokio::test]
    async fn channel_videos_without_items_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.fetch_channel_videos("UCabc").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn video_details_joins_ids_with_commas() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "a,b,c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [ { "id": "a" }, { "id": "b" } ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let videos = client.fetch_video_details(&ids).await.unwrap();
        assert_eq!(videos.len(), 2);
    }

    #[tokio::test]
    async fn empty_id_batch_skips_the_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.fetch_video_details(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn provider_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "quota exceeded" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        match client.fetch_channel_details("UCabc").await {
            Err(DashboardError::Fetch { operation, message }) => {
                assert_eq!(operation, "fetching channel details");
                assert!(message.contains("403"));
                assert!(message.contains("quota exceeded"));
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_a_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.resolve_channel_id("MKBHD").await.unwrap_err();
        assert!(matches!(err, DashboardError::Fetch { operation: "searching for channel", .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_error() {
        let client = YouTubeClient::new(
            DashboardConfig::new("test-key").with_base_url("http://127.0.0.1:1"),
        )
        .unwrap();
        let err = client.fetch_channel_videos("UCabc").await.unwrap_err();
        assert!(matches!(err, DashboardError::Fetch { .. }));
    }

    #[tokio::test]
    async fn slow_response_times_out_as_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "items": [ { "id": "UCslow" } ] }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = YouTubeClient::new(
            DashboardConfig::new("test-key")
                .with_base_url(server.uri())
                .with_timeout(Duration::from_millis(50)),
        )
        .unwrap();

        let err = client.fetch_channel_details("UCslow").await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Fetch { operation: "fetching channel details", .. }
        ));
    }
}
