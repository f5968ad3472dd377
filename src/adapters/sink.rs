use crate::adapters::text::path_safe;
use crate::core::{Presentation, PresentationSink, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Writes the presentation as pretty-printed JSON, one file per topic.
#[derive(Debug, Clone)]
pub struct JsonSink<S: Storage> {
    storage: S,
}

impl<S: Storage> JsonSink<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn file_name(topic: &str) -> String {
        format!("{}.json", path_safe(topic).replace(' ', "_"))
    }
}

#[async_trait]
impl<S: Storage> PresentationSink for JsonSink<S> {
    async fn save(&self, presentation: &Presentation) -> Result<String> {
        let file_name = Self::file_name(&presentation.topic);
        let data = serde_json::to_vec_pretty(presentation)?;

        tracing::debug!("Writing {} ({} bytes)", file_name, data.len());
        self.storage.write_file(&file_name, &data).await?;

        Ok(self.storage.locate(&file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use crate::core::{Provenance, Slide, SlideContent};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_writes_readable_json() {
        let temp_dir = TempDir::new().unwrap();
        let sink = JsonSink::new(LocalStorage::new(temp_dir.path().to_str().unwrap().to_string()));

        let presentation = Presentation::new(
            "ice cream",
            vec![Slide {
                index: 0,
                content: SlideContent::Title {
                    title: "Everything I Know About Ice Creams".to_string(),
                },
                provenance: Provenance {
                    generator: "Title slide".to_string(),
                    seed: "ice cream".to_string(),
                    rejected: vec![],
                },
            }],
        );

        let location = sink.save(&presentation).await.unwrap();

        let expected = temp_dir.path().join("ice_cream.json");
        assert_eq!(location, expected.display().to_string());

        let saved: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&expected).unwrap()).unwrap();
        assert_eq!(saved["topic"], "ice cream");
        assert_eq!(saved["slides"][0]["content"]["kind"], "title");
        assert_eq!(saved["slides"][0]["provenance"]["generator"], "Title slide");
        assert!(saved["slides"][0]["provenance"].get("rejected").is_none());
    }

    #[test]
    fn test_file_name_is_never_hidden_or_empty() {
        assert_eq!(JsonSink::<LocalStorage>::file_name("ice cream"), "ice_cream.json");
        assert_eq!(JsonSink::<LocalStorage>::file_name(".."), "_.json");
        assert_eq!(JsonSink::<LocalStorage>::file_name("a/b"), "a_b.json");
    }
}
