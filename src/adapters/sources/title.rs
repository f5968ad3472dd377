use crate::adapters::text::{pluralize, title_case};
use crate::core::{ContentSource, SlideContent};
use crate::utils::error::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// Title slide built from a random template, e.g. "Why Cats Matter More Than You Think".
pub struct TitleSource {
    templates: Vec<String>,
}

impl TitleSource {
    pub fn new(templates: Vec<String>) -> Self {
        Self { templates }
    }

    pub fn title_for(template: &str, seed: &str) -> String {
        template.replace("{}", &title_case(&pluralize(seed)))
    }
}

#[async_trait]
impl ContentSource for TitleSource {
    fn name(&self) -> &str {
        "Title slide"
    }

    async fn produce(&self, seed: &str, rng: &mut StdRng) -> Result<Option<SlideContent>> {
        let Some(template) = self.templates.choose(rng) else {
            return Ok(None);
        };

        Ok(Some(SlideContent::Title {
            title: Self::title_for(template, seed),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::text::DEFAULT_TITLES;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(5)
    }

    #[tokio::test]
    async fn test_title_uses_plural_title_case_seed() {
        let source = TitleSource::new(vec!["All About {}".to_string()]);
        let content = source.produce("house cat", &mut rng()).await.unwrap();
        assert_eq!(
            content,
            Some(SlideContent::Title {
                title: "All About House Cats".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_no_templates_means_no_title() {
        let source = TitleSource::new(Vec::new());
        assert!(source.produce("cat", &mut rng()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_same_rng_seed_same_title() {
        let source = TitleSource::new(DEFAULT_TITLES.iter().map(|t| t.to_string()).collect());

        let first = source.produce("cat", &mut rng()).await.unwrap();
        for _ in 0..10 {
            assert_eq!(source.produce("cat", &mut rng()).await.unwrap(), first);
        }
    }
}
