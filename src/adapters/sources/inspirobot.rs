use crate::core::{ContentSource, SlideContent, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;
use reqwest::Client;

pub const DEFAULT_ENDPOINT: &str = "http://generated.inspirobot.me";

/// Random pre-generated InspiroBot poster. Ignores the seed.
pub struct InspirobotSource<S: Storage> {
    client: Client,
    endpoint: String,
    storage: S,
}

impl<S: Storage> InspirobotSource<S> {
    pub fn new(client: Client, endpoint: impl Into<String>, storage: S) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            storage,
        }
    }

    fn poster_url(&self, folder: u32, number: u32) -> String {
        format!(
            "{}/0{:02}/aXm{}xjU.jpg",
            self.endpoint.trim_end_matches('/'),
            folder,
            number
        )
    }
}

#[async_trait]
impl<S: Storage + 'static> ContentSource for InspirobotSource<S> {
    fn name(&self) -> &str {
        "Inspirobot"
    }

    async fn produce(&self, _seed: &str, rng: &mut StdRng) -> Result<Option<SlideContent>> {
        let folder = rng.random_range(1..=73u32);
        let number = rng.random_range(0..=9998u32);
        let url = self.poster_url(folder, number);

        let response = self.client.get(&url).send().await?;
        // Not every generated name exists; a miss is simply no poster
        if !response.status().is_success() {
            tracing::debug!("No InspiroBot poster at {} ({})", url, response.status());
            return Ok(None);
        }
        let bytes = response.bytes().await?;

        let path = format!("inspirobot/{:02}-{}.jpg", folder, number);
        self.storage.write_file(&path, &bytes).await?;

        Ok(Some(SlideContent::Image {
            title: None,
            image: self.storage.locate(&path),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use httpmock::prelude::*;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_poster_url_shape() {
        let source = InspirobotSource::new(
            Client::new(),
            "http://generated.inspirobot.me/",
            LocalStorage::new("downloads".to_string()),
        );
        assert_eq!(
            source.poster_url(7, 42),
            "http://generated.inspirobot.me/007/aXm42xjU.jpg"
        );
    }

    #[tokio::test]
    async fn test_downloads_existing_poster() {
        let temp_dir = TempDir::new().unwrap();
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path_matches(regex::Regex::new(r"^/0\d{2}/aXm\d+xjU\.jpg$").unwrap());
                then.status(200).body("JPEG");
            })
            .await;

        let source = InspirobotSource::new(
            Client::new(),
            server.base_url(),
            LocalStorage::new(temp_dir.path().to_str().unwrap().to_string()),
        );
        let content = source.produce("anything", &mut rng(3)).await.unwrap();

        mock.assert_async().await;
        match content {
            Some(SlideContent::Image { title, image }) => {
                assert!(title.is_none());
                assert!(image.contains("inspirobot"));
                assert_eq!(std::fs::read(&image).unwrap(), b"JPEG");
            }
            other => panic!("expected an image, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_poster_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(404);
            })
            .await;

        let source = InspirobotSource::new(
            Client::new(),
            server.base_url(),
            LocalStorage::new(temp_dir.path().to_str().unwrap().to_string()),
        );
        assert!(source.produce("anything", &mut rng(3)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_same_rng_seed_same_poster() {
        let temp_dir = TempDir::new().unwrap();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200).body("JPEG");
            })
            .await;

        let source = InspirobotSource::new(
            Client::new(),
            server.base_url(),
            LocalStorage::new(temp_dir.path().to_str().unwrap().to_string()),
        );

        let first = source.produce("anything", &mut rng(8)).await.unwrap();
        let second = source.produce("anything", &mut rng(8)).await.unwrap();
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}
