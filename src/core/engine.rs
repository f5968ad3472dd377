use crate::core::schema::PresentationSchema;
use crate::core::{ConfigProvider, PresentationSink};
use crate::domain::model::Presentation;
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct TalkEngine<K: PresentationSink, C: ConfigProvider> {
    schema: PresentationSchema,
    sink: K,
    config: C,
}

impl<K: PresentationSink, C: ConfigProvider> TalkEngine<K, C> {
    pub fn new(schema: PresentationSchema, sink: K, config: C) -> Self {
        Self {
            schema,
            sink,
            config,
        }
    }

    /// Generates the configured talk without saving it.
    pub async fn build(&self) -> Result<Presentation> {
        let mut rng = match self.config.rng_seed() {
            Some(seed) => {
                tracing::debug!("Using fixed random seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        self.schema
            .generate_presentation(self.config.topic(), self.config.num_slides(), &mut rng)
            .await
    }

    /// Generates the talk and hands it to the sink; returns where it was saved.
    pub async fn run(&self) -> Result<String> {
        tracing::info!(
            "Making {} slide talk on: {}",
            self.config.num_slides(),
            self.config.topic()
        );

        let presentation = self.build().await?;
        tracing::info!("Generated {} slides", presentation.len());
        for slide in &presentation.slides {
            tracing::debug!("Slide {}: {}", slide.index + 1, slide.notes());
        }

        let location = self.sink.save(&presentation).await?;
        tracing::info!("Saved talk to {}", location);

        Ok(location)
    }
}
