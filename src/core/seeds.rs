use crate::domain::ports::LexicalRelations;
use crate::utils::error::{Result, TalkError};
use rand::seq::SliceRandom;
use rand::Rng;

/// One topic word per slide, fixed for the lifetime of a presentation build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSequence {
    seeds: Vec<String>,
}

impl SeedSequence {
    /// Builds the sequence for `topic` from the words `lexicon` relates to it.
    pub async fn build<L, R>(
        topic: &str,
        total_slides: usize,
        lexicon: &L,
        rng: &mut R,
    ) -> Result<Self>
    where
        L: LexicalRelations + ?Sized,
        R: Rng + Send,
    {
        if total_slides == 0 {
            return Err(TalkError::InvalidSlideCount { requested: 0 });
        }

        let vocabulary: Vec<String> = lexicon.synonyms(topic).await?.into_iter().collect();
        tracing::debug!("{} related words for '{}'", vocabulary.len(), topic);

        Self::from_vocabulary(topic, vocabulary, total_slides, rng)
    }

    /// Tiles, shuffles and truncates `vocabulary` to exactly `total_slides` seeds.
    ///
    /// The vocabulary is deduplicated and sorted first so a seeded `rng` always
    /// yields the same assignment. An empty vocabulary falls back to `topic`.
    pub fn from_vocabulary<R: Rng>(
        topic: &str,
        mut vocabulary: Vec<String>,
        total_slides: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if total_slides == 0 {
            return Err(TalkError::InvalidSlideCount { requested: 0 });
        }

        vocabulary.sort();
        vocabulary.dedup();
        if vocabulary.is_empty() {
            tracing::warn!("No related words for '{}', using the topic for every slide", topic);
            vocabulary.push(topic.to_string());
        }

        let mut seeds = if vocabulary.len() < total_slides {
            let repeats = total_slides.div_ceil(vocabulary.len());
            vocabulary
                .iter()
                .cycle()
                .take(vocabulary.len() * repeats)
                .cloned()
                .collect()
        } else {
            vocabulary
        };

        seeds.shuffle(rng);
        seeds.truncate(total_slides);

        Ok(Self { seeds })
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.seeds.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::lexicon::StaticLexicon;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn occurrences(sequence: &SeedSequence) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for seed in sequence.iter() {
            *counts.entry(seed).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_length_matches_slide_count() {
        let mut rng = StdRng::seed_from_u64(1);
        for total in 1..=12 {
            let sequence =
                SeedSequence::from_vocabulary("cat", words(&["cat", "kitty", "puss"]), total, &mut rng)
                    .unwrap();
            assert_eq!(sequence.len(), total);
        }
    }

    #[test]
    fn test_repeats_are_bounded_when_vocabulary_is_small() {
        let mut rng = StdRng::seed_from_u64(2);
        let vocabulary = words(&["cat", "kitty", "puss"]);
        let total = 10;

        let sequence = SeedSequence::from_vocabulary("cat", vocabulary, total, &mut rng).unwrap();
        let limit = total.div_ceil(3);

        let counts = occurrences(&sequence);
        assert_eq!(counts.len(), 3);
        for (seed, count) in counts {
            assert!(count <= limit, "{} appeared {} times", seed, count);
        }
    }

    #[test]
    fn test_empty_vocabulary_falls_back_to_topic() {
        let mut rng = StdRng::seed_from_u64(3);
        let sequence = SeedSequence::from_vocabulary("bagels", Vec::new(), 4, &mut rng).unwrap();
        assert!(sequence.iter().all(|seed| seed == "bagels"));
        assert_eq!(sequence.len(), 4);
    }

    #[test]
    fn test_large_vocabulary_yields_distinct_seeds() {
        let mut rng = StdRng::seed_from_u64(4);
        let vocabulary = words(&["a", "b", "c", "d", "e", "f", "g"]);
        let sequence = SeedSequence::from_vocabulary("a", vocabulary, 5, &mut rng).unwrap();
        assert_eq!(occurrences(&sequence).len(), 5);
    }

    #[test]
    fn test_duplicates_in_vocabulary_are_ignored() {
        let mut rng = StdRng::seed_from_u64(5);
        let vocabulary = words(&["cat", "cat", "cat", "kitty"]);
        let sequence = SeedSequence::from_vocabulary("cat", vocabulary, 4, &mut rng).unwrap();
        let counts = occurrences(&sequence);
        assert_eq!(counts.get("cat"), Some(&2));
        assert_eq!(counts.get("kitty"), Some(&2));
    }

    #[test]
    fn test_same_seed_same_assignment() {
        let build = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            SeedSequence::from_vocabulary("cat", words(&["kitty", "cat", "puss", "tom"]), 9, &mut rng)
                .unwrap()
        };
        assert_eq!(build(99), build(99));
    }

    #[test]
    fn test_shuffle_moves_seeds_around() {
        // With 8 distinct words the sorted order survives a shuffle with probability 1/40320.
        let vocabulary = words(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let shuffled = (0..5u64).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let sequence =
                SeedSequence::from_vocabulary("a", vocabulary.clone(), 8, &mut rng).unwrap();
            sequence.iter().collect::<Vec<_>>() != vec!["a", "b", "c", "d", "e", "f", "g", "h"]
        });
        assert!(shuffled);
    }

    #[test]
    fn test_zero_slides_is_rejected() {
        let mut rng = StdRng::seed_from_u64(6);
        let result = SeedSequence::from_vocabulary("cat", words(&["cat"]), 0, &mut rng);
        assert!(matches!(
            result,
            Err(TalkError::InvalidSlideCount { requested: 0 })
        ));
    }

    #[tokio::test]
    async fn test_build_uses_lexicon() {
        let mut entries = HashMap::new();
        entries.insert("cat".to_string(), words(&["kitty", "puss"]));
        let lexicon = StaticLexicon::new(entries);
        let mut rng = StdRng::seed_from_u64(7);

        let sequence = SeedSequence::build("cat", 3, &lexicon, &mut rng).await.unwrap();

        let mut seeds: Vec<&str> = sequence.iter().collect();
        seeds.sort();
        assert_eq!(seeds, vec!["cat", "kitty", "puss"]);
    }

    #[tokio::test]
    async fn test_build_with_unknown_topic() {
        let lexicon = StaticLexicon::new(HashMap::new());
        let mut rng = StdRng::seed_from_u64(8);

        let sequence = SeedSequence::build("zyzzyva", 2, &lexicon, &mut rng).await.unwrap();
        assert_eq!(sequence.iter().collect::<Vec<_>>(), vec!["zyzzyva", "zyzzyva"]);
    }
}
