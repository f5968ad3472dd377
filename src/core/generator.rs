use crate::domain::model::{Provenance, Slide};
use crate::domain::ports::ContentSource;
use crate::utils::error::Result;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Selection weight of a generator for `(slide_index, total_slides)`.
pub type WeightFn = Arc<dyn Fn(usize, usize) -> f64 + Send + Sync>;

pub fn constant_weight(weight: f64) -> WeightFn {
    Arc::new(move |_, _| weight)
}

/// Position-dependent weight rules that can be written down in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum WeightPolicy {
    Constant { weight: f64 },
    /// `weight` on the first slide, zero everywhere else.
    FirstSlide { weight: f64 },
    /// `weight` on the last slide, zero everywhere else.
    LastSlide { weight: f64 },
    /// Zero on the first slide, `weight` everywhere else.
    AfterFirst { weight: f64 },
}

impl Default for WeightPolicy {
    fn default() -> Self {
        WeightPolicy::Constant { weight: 1.0 }
    }
}

impl WeightPolicy {
    pub fn weight(&self) -> f64 {
        match *self {
            WeightPolicy::Constant { weight }
            | WeightPolicy::FirstSlide { weight }
            | WeightPolicy::LastSlide { weight }
            | WeightPolicy::AfterFirst { weight } => weight,
        }
    }

    pub fn into_fn(self) -> WeightFn {
        match self {
            WeightPolicy::Constant { weight } => constant_weight(weight),
            WeightPolicy::FirstSlide { weight } => {
                Arc::new(move |slide, _| if slide == 0 { weight } else { 0.0 })
            }
            WeightPolicy::LastSlide { weight } => {
                Arc::new(move |slide, total| if slide + 1 == total { weight } else { 0.0 })
            }
            WeightPolicy::AfterFirst { weight } => {
                Arc::new(move |slide, _| if slide == 0 { 0.0 } else { weight })
            }
        }
    }
}

/// A named content source together with its selection weight.
#[derive(Clone)]
pub struct SlideGenerator {
    name: String,
    source: Arc<dyn ContentSource>,
    weight: WeightFn,
}

impl SlideGenerator {
    /// Wraps `source` under its own name with a constant weight of 1.
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            name: source.name().to_string(),
            source,
            weight: constant_weight(1.0),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_weight<F>(mut self, weight: F) -> Self
    where
        F: Fn(usize, usize) -> f64 + Send + Sync + 'static,
    {
        self.weight = Arc::new(weight);
        self
    }

    pub fn with_policy(mut self, policy: WeightPolicy) -> Self {
        self.weight = policy.into_fn();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self, slide_index: usize, total_slides: usize) -> f64 {
        (self.weight)(slide_index, total_slides)
    }

    /// Asks the source for content about `seed` and tags it with provenance.
    ///
    /// `Ok(None)` is passed through unchanged so the caller can try another generator.
    pub async fn generate(
        &self,
        slide_index: usize,
        seed: &str,
        rng: &mut StdRng,
    ) -> Result<Option<Slide>> {
        let content = self.source.produce(seed, rng).await?;

        Ok(content.map(|content| Slide {
            index: slide_index,
            content,
            provenance: Provenance {
                generator: self.name.clone(),
                seed: seed.to_string(),
                rejected: Vec::new(),
            },
        }))
    }
}

impl fmt::Debug for SlideGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlideGenerator")
            .field("name", &self.name)
            .field("source", &self.source.name())
            .finish()
    }
}

impl fmt::Display for SlideGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlideGenerator[{}]", self.name)
    }
}
