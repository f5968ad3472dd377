use crate::domain::model::{Presentation, SlideContent};
use crate::utils::error::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use std::collections::BTreeSet;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Names of the regular files directly under `dir`; a missing directory yields an empty list.
    fn list_files(&self, dir: &str) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    /// Location of `path` as shown to users.
    fn locate(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn topic(&self) -> &str;
    fn num_slides(&self) -> usize;
    fn num_images(&self) -> usize;
    fn output_path(&self) -> &str;
    fn downloads_path(&self) -> &str;
    fn rng_seed(&self) -> Option<u64>;
}

/// Source of related words used to seed slides.
#[async_trait]
pub trait LexicalRelations: Send + Sync {
    async fn synonyms(&self, word: &str) -> Result<BTreeSet<String>>;
}

#[async_trait]
pub trait LocationLookup: Send + Sync {
    /// Places associated with `word`, each with a relevance weight.
    async fn related_locations(&self, word: &str) -> Result<Vec<(f64, String)>>;
}

/// Produces slide content from a seed word.
///
/// `Ok(None)` means "nothing found for this seed" and lets the scheduler try
/// another generator. Transport or storage failures must be returned as `Err`.
/// Every random pick a source makes comes from `rng`, which the scheduler
/// derives from the talk's random seed.
#[async_trait]
pub trait ContentSource: Send + Sync {
    fn name(&self) -> &str;
    async fn produce(&self, seed: &str, rng: &mut StdRng) -> Result<Option<SlideContent>>;
}

#[async_trait]
pub trait PresentationSink: Send + Sync {
    /// Persists the presentation and returns where it was written.
    async fn save(&self, presentation: &Presentation) -> Result<String>;
}
