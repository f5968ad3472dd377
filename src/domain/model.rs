use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Material for a single slide, as produced by a content source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideContent {
    Title { title: String },
    Image { title: Option<String>, image: String },
    Statement { text: String },
}

/// Where a slide came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub generator: String,
    pub seed: String,
    /// Generators that came back empty for this slide before `generator` succeeded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub index: usize,
    pub content: SlideContent,
    pub provenance: Provenance,
}

impl Slide {
    /// Speaker note recording which generator produced the slide and from which seed.
    pub fn notes(&self) -> String {
        format!(
            "SlideGenerator[{}] / {}",
            self.provenance.generator, self.provenance.seed
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    pub topic: String,
    pub generated_at: DateTime<Utc>,
    pub slides: Vec<Slide>,
}

impl Presentation {
    pub fn new(topic: &str, slides: Vec<Slide>) -> Self {
        Self {
            topic: topic.to_string(),
            generated_at: Utc::now(),
            slides,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}
