use crate::adapters::text::path_safe;
use crate::core::{ContentSource, SlideContent, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Image previously downloaded into `<downloads>/<seed>/`.
pub struct LocalImageSource<S: Storage> {
    storage: S,
    limit: usize,
}

impl<S: Storage> LocalImageSource<S> {
    /// Considers at most `limit` cached images per seed; zero disables the source.
    pub fn new(storage: S, limit: usize) -> Self {
        Self { storage, limit }
    }

    fn is_image(file: &str) -> bool {
        Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }
}

#[async_trait]
impl<S: Storage + 'static> ContentSource for LocalImageSource<S> {
    fn name(&self) -> &str {
        "Local images"
    }

    async fn produce(&self, seed: &str, rng: &mut StdRng) -> Result<Option<SlideContent>> {
        if self.limit == 0 {
            return Ok(None);
        }

        let dir = path_safe(seed);
        let images: Vec<String> = self
            .storage
            .list_files(&dir)
            .await?
            .into_iter()
            .filter(|file| Self::is_image(file))
            .take(self.limit)
            .collect();
        tracing::debug!("{} local images on '{}' found", images.len(), seed);

        let Some(file) = images.choose(rng) else {
            return Ok(None);
        };

        Ok(Some(SlideContent::Image {
            title: Some(seed.to_string()),
            image: self.storage.locate(&format!("{}/{}", dir, file)),
        }))
    }
}
