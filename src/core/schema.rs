use crate::core::generator::SlideGenerator;
use crate::core::seeds::SeedSequence;
use crate::core::weighted::weighted_choice;
use crate::domain::model::{Presentation, Slide};
use crate::domain::ports::LexicalRelations;
use crate::utils::error::{Result, TalkError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;

/// Decides which generator fills each slide and which seed it gets.
pub struct PresentationSchema {
    lexicon: Arc<dyn LexicalRelations>,
    generators: Vec<SlideGenerator>,
}

impl PresentationSchema {
    /// # Errors
    /// `DuplicateGenerator` if two generators share a name.
    pub fn new(lexicon: Arc<dyn LexicalRelations>, generators: Vec<SlideGenerator>) -> Result<Self> {
        let mut names = HashSet::new();
        for generator in &generators {
            if !names.insert(generator.name()) {
                return Err(TalkError::DuplicateGenerator {
                    name: generator.name().to_string(),
                });
            }
        }

        Ok(Self {
            lexicon,
            generators,
        })
    }

    /// Builds a presentation of exactly `total_slides` slides about `topic`.
    ///
    /// Slides are produced in order. Any error aborts the whole build; no
    /// partial presentation is returned.
    pub async fn generate_presentation<R: Rng + Send>(
        &self,
        topic: &str,
        total_slides: usize,
        rng: &mut R,
    ) -> Result<Presentation> {
        if total_slides == 0 {
            return Err(TalkError::InvalidSlideCount { requested: 0 });
        }

        let seeds = SeedSequence::build(topic, total_slides, self.lexicon.as_ref(), rng).await?;

        let mut slides = Vec::with_capacity(total_slides);
        for (slide_index, seed) in seeds.iter().enumerate() {
            let slide = self.generate_slide(slide_index, total_slides, seed, rng).await?;
            slides.push(slide);
        }

        Ok(Presentation::new(topic, slides))
    }

    /// Retries one slide with the same seed until a generator produces content.
    ///
    /// Each generator that comes back empty joins the exclusion set, which only
    /// grows, so the loop runs at most once per configured generator. Sources get
    /// their own generator seeded from `rng`, so a fixed seed fixes their picks too.
    async fn generate_slide<R: Rng + Send>(
        &self,
        slide_index: usize,
        total_slides: usize,
        seed: &str,
        rng: &mut R,
    ) -> Result<Slide> {
        let mut excluded: HashSet<usize> = HashSet::new();
        let mut rejected: Vec<String> = Vec::new();

        loop {
            let chosen = self.select_generator(slide_index, total_slides, &excluded, rng)?;
            let Some(position) = chosen else {
                return Err(TalkError::NoEligibleGenerator {
                    slide_index,
                    seed: seed.to_string(),
                    excluded: rejected,
                });
            };
            let generator = &self.generators[position];

            tracing::info!(
                "Generating slide {} about '{}' using {}",
                slide_index + 1,
                seed,
                generator
            );

            let mut source_rng = StdRng::from_rng(rng);
            match generator.generate(slide_index, seed, &mut source_rng).await? {
                Some(mut slide) => {
                    slide.provenance.rejected = rejected;
                    return Ok(slide);
                }
                None => {
                    tracing::warn!(
                        "{} found nothing for '{}', excluding it for slide {}",
                        generator,
                        seed,
                        slide_index + 1
                    );
                    excluded.insert(position);
                    rejected.push(generator.name().to_string());
                }
            }
        }
    }

    /// Weighted pick among generators that are not excluded and can still be drawn.
    ///
    /// Returns `Ok(None)` when nothing is left for this slide.
    fn select_generator<R: Rng>(
        &self,
        slide_index: usize,
        total_slides: usize,
        excluded: &HashSet<usize>,
        rng: &mut R,
    ) -> Result<Option<usize>> {
        let mut eligible = Vec::new();
        for (position, generator) in self.generators.iter().enumerate() {
            if excluded.contains(&position) {
                continue;
            }
            let weight = generator.weight(slide_index, total_slides);
            if !weight.is_finite() || weight < 0.0 {
                return Err(TalkError::InvalidWeight { weight });
            }
            if weight > 0.0 {
                eligible.push((weight, position));
            }
        }

        if eligible.is_empty() {
            return Ok(None);
        }

        weighted_choice(eligible, rng).map(Some)
    }
}
