use crate::adapters::text::path_safe;
use crate::core::{ContentSource, SlideContent, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use reqwest::Client;
use serde_json::Value;

pub const DEFAULT_ENDPOINT: &str = "https://api.giphy.com";

/// Full-screen GIF from Giphy's random endpoint, downloaded into local storage.
pub struct GiphySource<S: Storage> {
    client: Client,
    endpoint: String,
    api_key: String,
    storage: S,
}

impl<S: Storage> GiphySource<S> {
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: impl Into<String>, storage: S) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            storage,
        }
    }

    /// Name of the GIF: its Giphy id, else the URL's parent directory.
    fn gif_name(data: &Value, gif_url: &str) -> String {
        if let Some(id) = data.get("id").and_then(Value::as_str).filter(|id| !id.is_empty()) {
            return path_safe(id);
        }
        let mut segments = gif_url.rsplit('/');
        segments.next();
        path_safe(segments.next().unwrap_or("giphy"))
    }
}

#[async_trait]
impl<S: Storage + 'static> ContentSource for GiphySource<S> {
    fn name(&self) -> &str {
        "Giphy"
    }

    async fn produce(&self, seed: &str, _rng: &mut StdRng) -> Result<Option<SlideContent>> {
        let url = format!("{}/v1/gifs/random", self.endpoint.trim_end_matches('/'));
        let body: Value = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("tag", seed)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Giphy answers `"data": []` when nothing matches the tag
        let data = &body["data"];
        let Some(gif_url) = data.pointer("/images/original/url").and_then(Value::as_str) else {
            tracing::debug!("Giphy has nothing for '{}'", seed);
            return Ok(None);
        };

        let bytes = self
            .client
            .get(gif_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let path = format!("{}/gifs/{}.gif", path_safe(seed), Self::gif_name(data, gif_url));
        self.storage.write_file(&path, &bytes).await?;
        tracing::debug!("Saved GIF for '{}' to {}", seed, path);

        Ok(Some(SlideContent::Image {
            title: Some(seed.to_string()),
            image: self.storage.locate(&path),
        }))
    }
}
